use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Color, Rect};
use crate::foundation::error::{PixmillError, PixmillResult};
use crate::raster::canvas::{Canvas, OwnedCanvas, PixelStorage};
use crate::raster::draw;

/// Output dimensions of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneCanvas {
    pub width: u32,
    pub height: u32,
}

/// A canvas size, a background and shapes drawn in order on top of it.
///
/// ```json
/// {
///   "canvas": { "width": 64, "height": 64 },
///   "background": "#00222dff",
///   "shapes": [
///     { "circle_fill": { "center": [32, 32], "radius": 10, "color": "#ffff00" } }
///   ]
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub canvas: SceneCanvas,
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

fn default_background() -> Color {
    Color::TRANSPARENT
}

/// One drawing command. Coordinates are canvas pixels and may lie off-canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Pixel {
        at: [i32; 2],
        color: Color,
    },
    Line {
        from: [i32; 2],
        to: [i32; 2],
        color: Color,
    },
    Rect {
        rect: Rect,
        color: Color,
    },
    RectFill {
        rect: Rect,
        color: Color,
    },
    Circle {
        center: [i32; 2],
        radius: i32,
        color: Color,
    },
    CircleFill {
        center: [i32; 2],
        radius: i32,
        color: Color,
    },
    Triangle {
        points: [[i32; 2]; 3],
        color: Color,
    },
    TriangleFill {
        points: [[i32; 2]; 3],
        color: Color,
    },
}

fn shift(p: [i32; 2], dx: i32, dy: i32) -> [i32; 2] {
    [p[0].saturating_add(dx), p[1].saturating_add(dy)]
}

/// Shift an unsigned rect, trimming whatever would move past the top or left edge.
fn shift_rect(r: Rect, dx: i32, dy: i32) -> Rect {
    fn axis(origin: u32, len: u32, delta: i32) -> (u32, u32) {
        let moved = i64::from(origin) + i64::from(delta);
        if moved < 0 {
            let cut = u32::try_from(-moved).unwrap_or(u32::MAX);
            (0, len.saturating_sub(cut))
        } else {
            (u32::try_from(moved).unwrap_or(u32::MAX), len)
        }
    }
    let (x, w) = axis(r.x, r.w, dx);
    let (y, h) = axis(r.y, r.h, dy);
    Rect { x, y, w, h }
}

impl Shape {
    /// Draw the shape offset by `(dx, dy)`.
    pub fn draw<P: PixelStorage>(&self, c: &mut Canvas<P>, dx: i32, dy: i32) {
        match *self {
            Shape::Pixel { at, color } => {
                let [x, y] = shift(at, dx, dy);
                c.set(x, y, color);
            }
            Shape::Line { from, to, color } => {
                let [x0, y0] = shift(from, dx, dy);
                let [x1, y1] = shift(to, dx, dy);
                draw::line(c, x0, y0, x1, y1, color);
            }
            Shape::Rect { rect, color } => draw::rect(c, shift_rect(rect, dx, dy), color),
            Shape::RectFill { rect, color } => {
                draw::rect_fill(c, shift_rect(rect, dx, dy), color)
            }
            Shape::Circle {
                center,
                radius,
                color,
            } => {
                let [x, y] = shift(center, dx, dy);
                draw::circle(c, x, y, radius, color);
            }
            Shape::CircleFill {
                center,
                radius,
                color,
            } => {
                let [x, y] = shift(center, dx, dy);
                draw::circle_fill(c, x, y, radius, color);
            }
            Shape::Triangle { points, color } => {
                let [[x0, y0], [x1, y1], [x2, y2]] = points.map(|p| shift(p, dx, dy));
                draw::triangle(c, x0, y0, x1, y1, x2, y2, color);
            }
            Shape::TriangleFill { points, color } => {
                let [[x0, y0], [x1, y1], [x2, y2]] = points.map(|p| shift(p, dx, dy));
                draw::triangle_fill(c, x0, y0, x1, y1, x2, y2, color);
            }
        }
    }
}

impl Scene {
    pub fn from_json(json: &str) -> PixmillResult<Self> {
        let scene: Self =
            serde_json::from_str(json).map_err(|e| PixmillError::serde(e.to_string()))?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_path(path: impl AsRef<Path>) -> PixmillResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scene '{}'", path.display()))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> PixmillResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(PixmillError::validation(format!(
                "scene canvas must be non-empty, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        Ok(())
    }

    /// Clear `c` to the background and draw every shape in order.
    pub fn draw<P: PixelStorage>(&self, c: &mut Canvas<P>) {
        self.draw_offset(c, 0, 0);
    }

    /// [`Scene::draw`] with every shape shifted by `(dx, dy)`; the background is not shifted.
    pub fn draw_offset<P: PixelStorage>(&self, c: &mut Canvas<P>, dx: i32, dy: i32) {
        c.clear(self.background);
        for shape in &self.shapes {
            shape.draw(c, dx, dy);
        }
    }

    /// Allocate a canvas of the scene's size and draw into it.
    #[tracing::instrument(skip(self), fields(shapes = self.shapes.len()))]
    pub fn render(&self) -> PixmillResult<OwnedCanvas> {
        self.validate()?;
        let mut c = Canvas::new(self.canvas.width, self.canvas.height)?;
        self.draw(&mut c);
        Ok(c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
