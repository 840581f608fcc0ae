use std::sync::Arc;
use std::time::Instant;

use egui::{Align2, Id, LayerId, Order, Visuals};
use feedhub_core::{
    Confetti, FeedbackForm, FireOptions, FrameOutcome, HubConfig, SubmitOutcome, Theme, ThemeState,
};
use feedhub_io::{spawn_api_worker, ApiCommand, ApiEvent, ApiHandles};
use feedhub_platform::{FeedbackApi, PreferenceStore, Viewport};
use tracing::{debug, info};

use crate::surface::ShapeSurface;
use crate::views::{self, FormAction};

pub struct FeedbackHubApp {
    form: FeedbackForm,
    theme: ThemeState,
    store: Box<dyn PreferenceStore>,
    confetti: Confetti<ShapeSurface>,
    api: ApiHandles,
}

impl FeedbackHubApp {
    pub fn new(
        creation_context: &eframe::CreationContext<'_>,
        config: &HubConfig,
        api: Arc<dyn FeedbackApi>,
        store: Box<dyn PreferenceStore>,
    ) -> Self {
        let egui_context = creation_context.egui_ctx.clone();
        let api = spawn_api_worker(api, move || egui_context.request_repaint());
        api.send(ApiCommand::FetchRecent);

        let theme = ThemeState::load(store.as_ref(), config.shell.toast_duration());
        apply_visuals(&creation_context.egui_ctx, theme.theme());

        let screen = creation_context.egui_ctx.screen_rect();
        let surface = ShapeSurface::new(Viewport::new(screen.width(), screen.height()));

        Self {
            form: FeedbackForm::new(config.celebration.clone()),
            theme,
            store,
            confetti: Confetti::new(surface, &config.confetti),
            api,
        }
    }

    fn drain_api_events(&mut self, now: Instant) {
        while let Ok(event) = self.api.event_receiver.try_recv() {
            match event {
                ApiEvent::Recent(result) => self.form.apply_recent(result),
                ApiEvent::Submitted(result) => {
                    let outcome = self.form.finish_submit(result, now);
                    if let SubmitOutcome::Accepted { confetti_count } = outcome {
                        self.confetti.fire(FireOptions::count(confetti_count), now);
                        self.api.send(ApiCommand::FetchRecent);
                    }
                }
            }
        }
    }

    fn handle_form_action(&mut self, action: FormAction) {
        match action {
            FormAction::Submit => {
                if let Some(record) = self.form.begin_submit() {
                    debug!("submitting feedback (rating {})", record.rating);
                    self.api.send(ApiCommand::Submit(record));
                }
            }
            FormAction::Reset => self.form.reset(),
        }
    }

    fn paint_confetti(&mut self, ctx: &egui::Context, now: Instant) {
        let screen = ctx.screen_rect();
        self.confetti.resize(Viewport::new(screen.width(), screen.height()));
        if !self.confetti.is_animating() {
            return;
        }
        let outcome = self.confetti.frame(now);
        if let Some(surface) = self.confetti.surface() {
            surface.paint(&ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("confetti"))));
        }
        if outcome == FrameOutcome::Continue {
            ctx.request_repaint();
        }
    }

    fn show_toast(&self, ctx: &egui::Context) {
        let Some(toast) = self.theme.toast() else {
            return;
        };
        egui::Area::new(Id::new("theme-toast"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
            .order(Order::Tooltip)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(toast.text);
                });
            });
    }

    fn schedule_expiry(&self, ctx: &egui::Context, now: Instant) {
        let deadlines = [
            self.theme.toast().map(|t| t.expires_at),
            self.form.banner().map(|b| b.expires_at),
        ];
        if let Some(next) = deadlines.into_iter().flatten().min() {
            ctx.request_repaint_after(next.saturating_duration_since(now));
        }
    }
}

fn apply_visuals(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(match theme {
        Theme::Light => Visuals::light(),
        Theme::Dark => Visuals::dark(),
    });
}

impl eframe::App for FeedbackHubApp {
    fn update(&mut self, context: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.drain_api_events(now);
        self.form.tick(now);
        self.theme.tick(now);

        let mut toggled = false;
        let mut action = None;
        egui::TopBottomPanel::bottom("footer").show(context, views::footer);
        egui::CentralPanel::default().show(context, |ui| {
            toggled = views::header(ui, self.theme.theme());
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                action = views::feedback_form(ui, &mut self.form);
                ui.separator();
                views::recent_list(ui, self.form.recent());
            });
        });

        if toggled {
            self.theme.toggle(self.store.as_mut(), now);
            apply_visuals(context, self.theme.theme());
        }
        if let Some(action) = action {
            self.handle_form_action(action);
        }

        self.show_toast(context);
        self.paint_confetti(context, now);
        self.schedule_expiry(context, now);
    }
}

impl Drop for FeedbackHubApp {
    fn drop(&mut self) {
        info!("UI closing; stopping animation and API worker");
        self.confetti.teardown();
        self.api.shutdown();
    }
}
