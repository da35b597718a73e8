//! Clipped integer rasterization.
//!
//! Coordinates are signed and may lie anywhere; every primitive clips against the canvas and
//! never fails. Degenerate input draws fewer pixels or nothing.

use crate::foundation::core::{Color, Rect};
use crate::raster::canvas::{Canvas, PixelStorage};

type Vertex = (i64, i64);

/// Horizontal run from `x0` to `x1` inclusive, in either order.
pub fn hline<P: PixelStorage>(c: &mut Canvas<P>, x0: i32, x1: i32, y: i32, color: Color) {
    span_h(c, i64::from(x0), i64::from(x1), i64::from(y), color);
}

/// Vertical run from `y0` to `y1` inclusive, in either order.
pub fn vline<P: PixelStorage>(c: &mut Canvas<P>, x: i32, y0: i32, y1: i32, color: Color) {
    span_v(c, i64::from(x), i64::from(y0), i64::from(y1), color);
}

fn clip_run(a: i64, b: i64, dim: u32) -> Option<(u32, u32)> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let max = i64::from(dim) - 1;
    if hi < 0 || lo > max {
        return None;
    }
    Some((lo.max(0) as u32, hi.min(max) as u32))
}

fn span_h<P: PixelStorage>(c: &mut Canvas<P>, x0: i64, x1: i64, y: i64, color: Color) {
    if y < 0 || y >= i64::from(c.height()) {
        return;
    }
    if let Some((lo, hi)) = clip_run(x0, x1, c.width()) {
        c.fill_row(y as u32, lo, hi + 1, color);
    }
}

fn span_v<P: PixelStorage>(c: &mut Canvas<P>, x: i64, y0: i64, y1: i64, color: Color) {
    if x < 0 || x >= i64::from(c.width()) {
        return;
    }
    if let Some((lo, hi)) = clip_run(y0, y1, c.height()) {
        for y in lo..=hi {
            c.put(x, i64::from(y), color);
        }
    }
}

/// Bresenham line, endpoints inclusive.
pub fn line<P: PixelStorage>(c: &mut Canvas<P>, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    line_i64(c, (i64::from(x0), i64::from(y0)), (i64::from(x1), i64::from(y1)), color);
}

fn line_i64<P: PixelStorage>(c: &mut Canvas<P>, from: Vertex, to: Vertex, color: Color) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        c.put(x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Rectangle outline: top, bottom, left and right runs.
pub fn rect<P: PixelStorage>(c: &mut Canvas<P>, r: Rect, color: Color) {
    if r.is_empty() {
        return;
    }
    let x0 = i64::from(r.x);
    let y0 = i64::from(r.y);
    let x1 = x0 + i64::from(r.w) - 1;
    let y1 = y0 + i64::from(r.h) - 1;

    span_h(c, x0, x1, y0, color);
    span_h(c, x0, x1, y1, color);
    span_v(c, x0, y0, y1, color);
    span_v(c, x1, y0, y1, color);
}

/// Filled rectangle, clipped to the canvas before iterating.
pub fn rect_fill<P: PixelStorage>(c: &mut Canvas<P>, r: Rect, color: Color) {
    let Some((x0, y0, x1, y1)) = r.clip_to(c.width(), c.height()) else {
        return;
    };
    for y in y0..y1 {
        c.fill_row(y, x0, x1, color);
    }
}

/// Midpoint circle stepping from `(r, 0)` towards the diagonal; calls `step(x, y)` per octant
/// point.
fn midpoint_steps(r: i64, mut step: impl FnMut(i64, i64)) {
    let mut x = r;
    let mut y = 0;
    let mut err = 1 - r;
    while x >= y {
        step(x, y);
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Circle outline. Negative radii draw nothing, radius 0 draws the center.
pub fn circle<P: PixelStorage>(c: &mut Canvas<P>, cx: i32, cy: i32, r: i32, color: Color) {
    if r < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    // All eight octants are written every step; on the axes and the diagonal some coincide.
    midpoint_steps(i64::from(r), |x, y| {
        c.put(cx + x, cy + y, color);
        c.put(cx - x, cy + y, color);
        c.put(cx + x, cy - y, color);
        c.put(cx - x, cy - y, color);
        c.put(cx + y, cy + x, color);
        c.put(cx - y, cy + x, color);
        c.put(cx + y, cy - x, color);
        c.put(cx - y, cy - x, color);
    });
}

/// Filled circle built from four symmetric horizontal runs per step.
pub fn circle_fill<P: PixelStorage>(c: &mut Canvas<P>, cx: i32, cy: i32, r: i32, color: Color) {
    if r < 0 {
        return;
    }
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    midpoint_steps(i64::from(r), |x, y| {
        span_h(c, cx - x, cx + x, cy + y, color);
        span_h(c, cx - x, cx + x, cy - y, color);
        span_h(c, cx - y, cx + y, cy + x, color);
        span_h(c, cx - y, cx + y, cy - x, color);
    });
}

/// Triangle outline joining the vertices in the given order.
#[allow(clippy::too_many_arguments)]
pub fn triangle<P: PixelStorage>(
    c: &mut Canvas<P>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
) {
    let v0 = (i64::from(x0), i64::from(y0));
    let v1 = (i64::from(x1), i64::from(y1));
    let v2 = (i64::from(x2), i64::from(y2));
    line_i64(c, v0, v1, color);
    line_i64(c, v1, v2, color);
    line_i64(c, v2, v0, color);
}

/// Order three vertices by ascending `y` with the fixed swaps (0,1), (0,2), (1,2).
///
/// Vertices with equal `y` keep the order these swaps leave them in, so fills are deterministic.
fn sort_by_y(mut v: [Vertex; 3]) -> [Vertex; 3] {
    if v[0].1 > v[1].1 {
        v.swap(0, 1);
    }
    if v[0].1 > v[2].1 {
        v.swap(0, 2);
    }
    if v[1].1 > v[2].1 {
        v.swap(1, 2);
    }
    v
}

/// Filled triangle via a flat-bottom and a flat-top half split at the middle vertex.
#[allow(clippy::too_many_arguments)]
pub fn triangle_fill<P: PixelStorage>(
    c: &mut Canvas<P>,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Color,
) {
    let [v0, v1, v2] = sort_by_y([
        (i64::from(x0), i64::from(y0)),
        (i64::from(x1), i64::from(y1)),
        (i64::from(x2), i64::from(y2)),
    ]);

    if v0.1 == v2.1 {
        let lo = v0.0.min(v1.0).min(v2.0);
        let hi = v0.0.max(v1.0).max(v2.0);
        span_h(c, lo, hi, v0.1, color);
        return;
    }

    if v1.1 == v2.1 {
        fill_flat_bottom(c, v0, v1, v2, color);
    } else if v0.1 == v1.1 {
        fill_flat_top(c, v0, v1, v2, color);
    } else {
        let t = (v1.1 - v0.1) as f64 / (v2.1 - v0.1) as f64;
        let x_split = (v0.0 as f64 + t * (v2.0 - v0.0) as f64 + 0.5) as i64;
        let split = (x_split, v1.1);
        fill_flat_bottom(c, v0, v1, split, color);
        fill_flat_top(c, v1, split, v2, color);
    }
}

/// `x` of edge `p -> q` at scanline `y`, truncated toward zero. `p` and `q` must differ in `y`.
fn edge_x(p: Vertex, q: Vertex, y: i64) -> i64 {
    let dy = i128::from(q.1 - p.1);
    let num = i128::from(p.0) * dy + i128::from(q.0 - p.0) * i128::from(y - p.1);
    (num / dy) as i64
}

/// Scanlines of `[y0, y1]` that lie on the canvas.
fn visible_rows<P: PixelStorage>(
    c: &Canvas<P>,
    y0: i64,
    y1: i64,
) -> std::ops::RangeInclusive<i64> {
    y0.max(0)..=y1.min(i64::from(c.height()) - 1)
}

/// `top` above the shared scanline of `a` and `b`.
fn fill_flat_bottom<P: PixelStorage>(
    c: &mut Canvas<P>,
    top: Vertex,
    a: Vertex,
    b: Vertex,
    color: Color,
) {
    for y in visible_rows(c, top.1, a.1) {
        span_h(c, edge_x(top, a, y), edge_x(top, b, y), y, color);
    }
}

/// `a` and `b` share the top scanline, `bottom` lies below it.
fn fill_flat_top<P: PixelStorage>(
    c: &mut Canvas<P>,
    a: Vertex,
    b: Vertex,
    bottom: Vertex,
    color: Color,
) {
    for y in visible_rows(c, a.1, bottom.1) {
        span_h(c, edge_x(a, bottom, y), edge_x(b, bottom, y), y, color);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/draw.rs"]
mod tests;
