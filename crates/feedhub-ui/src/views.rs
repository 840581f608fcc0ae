//! Panels of the single page: header, feedback form, recent list, footer.

use chrono::{Datelike, Local};
use egui::{Align, Color32, Layout, RichText, ScrollArea, Sense, TextEdit, Ui, Vec2};
use feedhub_core::form::EMPTY_RECENT;
use feedhub_core::{FeedbackForm, Field, RatingInput, Theme};
use feedhub_platform::Feedback;

use crate::stars::{activation, star_row};

const ERROR_RED: Color32 = Color32::from_rgb(0xdc, 0x35, 0x45);
const SUCCESS_GREEN: Color32 = Color32::from_rgb(0x2a, 0x7f, 0x6b);
const ACCENT: Color32 = Color32::from_rgb(0x6a, 0x5a, 0xcd);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Reset,
}

/// Returns `true` when the theme switch was activated.
pub fn header(ui: &mut Ui, theme: Theme) -> bool {
    let mut toggled = false;
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new("Feedback Hub").color(ACCENT).strong());
            ui.heading(RichText::new("We'd love to hear from you").strong());
            ui.label("Short, friendly and secure feedback collection — designed for humans.");
        });
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            toggled = theme_switch(ui, theme);
        });
    });
    toggled
}

fn theme_switch(ui: &mut Ui, theme: Theme) -> bool {
    let dark = theme == Theme::Dark;
    let (rect, response) = ui.allocate_exact_size(Vec2::new(52.0, 26.0), Sense::click());
    let painter = ui.painter();
    let track = if dark { ACCENT } else { ui.visuals().widgets.inactive.bg_fill };
    painter.rect_filled(rect, rect.height() / 2.0, track);
    let radius = rect.height() / 2.0 - 3.0;
    let thumb_x = if dark {
        rect.right() - radius - 3.0
    } else {
        rect.left() + radius + 3.0
    };
    painter.circle_filled(egui::pos2(thumb_x, rect.center().y), radius, Color32::WHITE);
    if response.has_focus() {
        painter.rect_stroke(
            rect.expand(2.0),
            rect.height() / 2.0,
            ui.visuals().selection.stroke,
            egui::StrokeKind::Outside,
        );
    }
    let activated = activation(ui, &response).is_some_and(|event| event.activates());
    response.on_hover_text(if dark { "Enable light mode" } else { "Enable dark mode" });
    ui.label(if dark { "🌙" } else { "☀" });
    activated
}

pub fn feedback_form(ui: &mut Ui, form: &mut FeedbackForm) -> Option<FormAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new("Share your thoughts").size(18.0).strong());
            ui.label(
                RichText::new("Quick feedback helps us improve. Takes less than a minute.").weak(),
            );
        });
        ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
            ui.label(RichText::new(form.responses_badge()).color(ACCENT).small());
        });
    });

    if let Some(banner) = form.banner() {
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&banner.message).strong());
                    ui.label(RichText::new("We really appreciate your time.").weak().small());
                });
                ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                    ui.label(RichText::new(banner.rating_line()).color(SUCCESS_GREEN));
                });
            });
        });
    }

    ui.add_space(8.0);
    let enabled = !form.is_submitting();

    ui.add_enabled_ui(enabled, |ui| {
        ui.label("Full name");
        let mut name = form.draft().name.clone();
        if ui
            .add(TextEdit::singleline(&mut name).hint_text("e.g. Aarti Singh"))
            .changed()
        {
            form.set_name(name);
        }
        field_error(ui, form, Field::Name);

        ui.label("Email");
        let mut email = form.draft().email.clone();
        if ui
            .add(TextEdit::singleline(&mut email).hint_text("you@domain.com"))
            .changed()
        {
            form.set_email(email);
        }
        field_error(ui, form, Field::Email);

        ui.label("Rate your experience");
        let rating = form.draft().rating;
        ui.horizontal(|ui| {
            if let Some(picked) = star_row(ui, rating) {
                form.set_rating(picked);
            }
            let rating = form.draft().rating;
            let mood = RatingInput::mood(rating);
            ui.label(RichText::new(format!("{rating} / 5 — {mood}")).small());
        });
        field_error(ui, form, Field::Rating);

        ui.label("Comments (optional)");
        let mut comments = form.draft().comments.clone();
        if ui
            .add(
                TextEdit::multiline(&mut comments)
                    .desired_rows(3)
                    .hint_text("Tell us what you liked or what we can improve..."),
            )
            .changed()
        {
            form.set_comments(comments);
        }
    });

    if let Some(message) = form.errors().get(Field::Submit) {
        ui.colored_label(ERROR_RED, message);
    }

    ui.add_space(6.0);
    ui.horizontal(|ui| {
        let label = if enabled { "Send feedback" } else { "Sending..." };
        if ui.add_enabled(enabled, egui::Button::new(label)).clicked() {
            action = Some(FormAction::Submit);
        }
        if ui.add_enabled(enabled, egui::Button::new("Reset")).clicked() {
            action = Some(FormAction::Reset);
        }
    });

    action
}

fn field_error(ui: &mut Ui, form: &FeedbackForm, field: Field) {
    if let Some(message) = form.errors().get(field) {
        ui.colored_label(ERROR_RED, message);
    }
}

pub fn recent_list(ui: &mut Ui, recent: &[Feedback]) {
    ui.label(RichText::new("Recent feedback").strong());
    ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
        if recent.is_empty() {
            ui.label(RichText::new(EMPTY_RECENT).weak().small());
        }
        for feedback in recent {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&feedback.name).strong());
                        if let Some(created_at) = feedback.created_at {
                            let local = created_at.with_timezone(&Local);
                            let stamp = local.format("%Y-%m-%d %H:%M").to_string();
                            ui.label(RichText::new(stamp).weak().small());
                        }
                    });
                    ui.with_layout(Layout::right_to_left(Align::Min), |ui| {
                        ui.label(RichText::new("★").color(Color32::from_rgb(0xff, 0xb0, 0x20)));
                        ui.label(RichText::new(feedback.rating.to_string()).strong());
                    });
                });
                if !feedback.comments.is_empty() {
                    ui.label(&feedback.comments);
                }
            });
        }
    });
}

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        let year = Local::now().year();
        ui.label(
            RichText::new(format!("© {year} Feedback Hub • Built with Rust & egui"))
                .weak()
                .small(),
        );
    });
}
