// this_file: backends/fontsel-fs/src/loader.rs

//! Memory-mapped font loading and existence checks on the real filesystem.

use camino::Utf8Path;
use fontsel_core::{
    FileSystem, FontData, FontLoader, FontResource, FontVariant, FontselError, Result,
};
use memmap2::Mmap;
use std::fs::File;

/// Maximum accepted font file size (50MB)
pub const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024;

/// Loads font files by memory-mapping them and checking they parse.
#[derive(Debug, Clone)]
pub struct FsFontLoader {
    max_size: u64,
}

impl Default for FsFontLoader {
    fn default() -> Self {
        Self {
            max_size: MAX_FONT_SIZE,
        }
    }
}

impl FsFontLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject files larger than `max_size` bytes.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }
}

impl FontLoader for FsFontLoader {
    fn load(&self, variant: &FontVariant) -> Result<FontResource> {
        let name = variant.resource_name.as_str();
        let path = variant.filepath.as_path();
        let file = File::open(path).map_err(|e| FontselError::not_found(name, path, e))?;

        let size = file
            .metadata()
            .map_err(|e| FontselError::not_found(name, path, e))?
            .len();
        if size > self.max_size {
            return Err(FontselError::not_found(
                name,
                path,
                format!(
                    "font file too large: {} bytes (max: {} bytes)",
                    size, self.max_size
                ),
            ));
        }

        let mmap = unsafe { Mmap::map(&file).map_err(|e| FontselError::not_found(name, path, e))? };

        ttf_parser::Face::parse(&mmap, variant.face_index)
            .map_err(|e| FontselError::not_found(name, path, e))?;

        log::debug!(
            "Loaded font '{}' ({} bytes) from {} face {}",
            name,
            size,
            path,
            variant.face_index
        );
        Ok(FontResource::new(name, path, FontData::Mapped(mmap)).with_face_index(variant.face_index))
    }
}

/// Existence checks against the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Utf8Path) -> bool {
        path.is_file()
    }
}
