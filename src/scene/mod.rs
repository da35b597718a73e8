//! JSON scene descriptions rendered through the rasterizer.

/// Scene and shape model.
pub mod model;
