use std::f32::consts::{FRAC_PI_2, TAU};

use egui::{Color32, Key, Pos2, Response, Sense, Shape, Stroke, Ui, Vec2};
use feedhub_core::{RatingEvent, RatingInput, RatingKey};

const STAR_SIZE: f32 = 30.0;
const LIT_FILL: Color32 = Color32::from_rgb(0xff, 0xb0, 0x20);
const LIT_STROKE: Color32 = Color32::from_rgb(0xff, 0x8a, 0x00);
const UNLIT_STROKE: Color32 = Color32::from_rgb(0xbf, 0xc7, 0xd6);

/// Activation of a focusable widget by keyboard (Enter/Space) or pointer.
pub(crate) fn activation(ui: &Ui, response: &Response) -> Option<RatingEvent> {
    if response.has_focus() {
        let key = ui.input(|input| {
            if input.key_pressed(Key::Enter) {
                Some(RatingKey::Enter)
            } else if input.key_pressed(Key::Space) {
                Some(RatingKey::Space)
            } else {
                None
            }
        });
        if let Some(key) = key {
            return Some(RatingEvent::Key(key));
        }
    }
    response.clicked().then_some(RatingEvent::Pointer)
}

/// Row of five stars. Returns the newly chosen value, if any.
pub fn star_row(ui: &mut Ui, value: u8) -> Option<u8> {
    let mut chosen = None;
    ui.horizontal(|ui| {
        for star in RatingInput::stars() {
            let (rect, response) = ui.allocate_exact_size(Vec2::splat(STAR_SIZE), Sense::click());
            let lit = RatingInput::is_lit(value, star);
            paint_star(ui, rect.center(), STAR_SIZE * 0.45, lit);
            if response.has_focus() {
                let stroke = ui.visuals().selection.stroke;
                ui.painter().rect_stroke(rect, 4.0, stroke, egui::StrokeKind::Inside);
            }
            let event = activation(ui, &response);
            response.on_hover_text(RatingInput::tooltip(star));
            if let Some(picked) = event.and_then(|event| RatingInput::activate(star, event)) {
                chosen = Some(picked);
            }
        }
    });
    chosen
}

fn star_points(center: Pos2, outer: f32) -> Vec<Pos2> {
    let inner = outer * 0.42;
    (0..10)
        .map(|i| {
            let radius = if i % 2 == 0 { outer } else { inner };
            let angle = -FRAC_PI_2 + i as f32 * TAU / 10.0;
            center + Vec2::angled(angle) * radius
        })
        .collect()
}

fn paint_star(ui: &Ui, center: Pos2, outer: f32, lit: bool) {
    let points = star_points(center, outer);
    let painter = ui.painter();
    if lit {
        // The outline is concave; fill it as a convex core plus five tips.
        let core: Vec<Pos2> = points.iter().skip(1).step_by(2).copied().collect();
        painter.add(Shape::convex_polygon(core, LIT_FILL, Stroke::NONE));
        for tip in (0..10).step_by(2) {
            let triangle = vec![points[(tip + 9) % 10], points[tip], points[tip + 1]];
            painter.add(Shape::convex_polygon(triangle, LIT_FILL, Stroke::NONE));
        }
    }
    let stroke = Stroke::new(1.2, if lit { LIT_STROKE } else { UNLIT_STROKE });
    painter.add(Shape::closed_line(points, stroke));
}

#[cfg(test)]
mod tests {
    use egui::{Context, Event, Id, Modifiers, RawInput, Rect};

    use super::*;

    fn key_press(key: Key) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    /// Runs two passes over one star-sized widget: the first settles layout,
    /// the second delivers `events`.
    fn activation_with(focused: bool, events: Vec<Event>) -> Option<RatingEvent> {
        let ctx = Context::default();
        let id = Id::new("star-3");
        let mut seen = None;
        for events in [Vec::new(), events] {
            let input = RawInput {
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let rect = Rect::from_min_size(ui.min_rect().min, Vec2::splat(STAR_SIZE));
                    let response = ui.interact(rect, id, Sense::click());
                    if focused {
                        response.request_focus();
                    }
                    seen = activation(ui, &response);
                });
            });
        }
        seen
    }

    #[test]
    fn space_on_a_focused_star_activates_it() {
        let event = activation_with(true, vec![key_press(Key::Space)]);
        assert_eq!(event, Some(RatingEvent::Key(RatingKey::Space)));
        assert_eq!(event.and_then(|e| RatingInput::activate(3, e)), Some(3));
    }

    #[test]
    fn enter_on_a_focused_star_activates_it() {
        let event = activation_with(true, vec![key_press(Key::Enter)]);
        assert_eq!(event, Some(RatingEvent::Key(RatingKey::Enter)));
    }

    #[test]
    fn keys_are_ignored_without_focus() {
        assert_eq!(activation_with(false, vec![key_press(Key::Space)]), None);
        assert_eq!(activation_with(true, Vec::new()), None);
    }

    #[test]
    fn star_alternates_outer_and_inner_points() {
        let points = star_points(Pos2::new(0.0, 0.0), 10.0);
        assert_eq!(points.len(), 10);
        // First point is the top tip.
        assert!((points[0].x).abs() < 1e-4);
        assert!((points[0].y + 10.0).abs() < 1e-4);
        assert!((points[1].to_vec2().length() - 4.2).abs() < 1e-4);
    }
}
