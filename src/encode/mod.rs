//! Serializers for canvas pixels.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::PixmillResult;

/// CRC32 and Adler32 checksums.
pub mod checksum;
/// Still images as PNG files.
pub mod png;
/// Frame streams as YUV4MPEG2 files.
pub mod y4m;

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PixmillResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
