//! In-memory canvas and the clipped rasterizer that draws on it.

/// Pixel storage with total, bounds-checked access.
pub mod canvas;
/// Line, rectangle, circle and triangle primitives.
pub mod draw;
