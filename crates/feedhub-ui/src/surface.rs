use egui::{Color32, Painter, Pos2, Shape, Stroke, Vec2};
use feedhub_platform::{Rgba, Surface, Viewport};

/// Confetti drawing surface: a retained list of shapes, repainted on a
/// foreground layer every frame.
#[derive(Debug, Default)]
pub struct ShapeSurface {
    viewport: Viewport,
    shapes: Vec<Shape>,
}

impl ShapeSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            shapes: Vec::new(),
        }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn paint(&self, painter: &Painter) {
        painter.extend(self.shapes.iter().cloned());
    }
}

impl Surface for ShapeSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    fn clear(&mut self) {
        self.shapes.clear();
    }

    fn fill_rotated_rect(
        &mut self,
        center: [f32; 2],
        size: [f32; 2],
        rotation_deg: f32,
        color: Rgba,
    ) {
        let center = Pos2::new(center[0], center[1]);
        let half = Vec2::new(size[0], size[1]) / 2.0;
        let (sin, cos) = rotation_deg.to_radians().sin_cos();
        let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .into_iter()
        .map(|corner| center + rotate(corner))
        .collect();
        let fill = Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
        self.shapes.push(Shape::convex_polygon(corners, fill, Stroke::NONE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotated_rect_spans_the_swapped_extent() {
        let mut surface = ShapeSurface::new(Viewport::new(100.0, 100.0));
        surface.fill_rotated_rect([50.0, 50.0], [10.0, 20.0], 90.0, Rgba::rgb(255, 0, 0));
        assert_eq!(surface.shapes().len(), 1);
        let bounds = surface.shapes()[0].visual_bounding_rect();
        assert!((bounds.width() - 20.0).abs() < 1e-3);
        assert!((bounds.height() - 10.0).abs() < 1e-3);
        assert!((bounds.center().x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn clear_drops_everything() {
        let mut surface = ShapeSurface::new(Viewport::new(10.0, 10.0));
        surface.fill_rotated_rect([1.0, 1.0], [2.0, 2.0], 0.0, Rgba::rgb(0, 0, 0));
        surface.clear();
        assert!(surface.shapes().is_empty());
        surface.resize(Viewport::new(20.0, 5.0));
        assert_eq!(surface.viewport(), Viewport::new(20.0, 5.0));
    }
}
