// this_file: backends/fontsel-core/src/utils.rs

//! Utility functions for the fontsel selector.

use camino::{Utf8Path, Utf8PathBuf};

/// File extensions recognised as font files (lowercase).
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc", "otc", "woff", "woff2"];

/// True when `path` has a font file extension, case-insensitively.
pub fn is_font_file(path: &Utf8Path) -> bool {
    path.extension()
        .map(|ext| FONT_EXTENSIONS.iter().any(|f| ext.eq_ignore_ascii_case(f)))
        .unwrap_or(false)
}

/// Expand `~` and environment variables in a configured directory.
///
/// Falls back to the raw string when a variable is undefined.
pub fn expand_dir(dir: &str) -> Utf8PathBuf {
    match shellexpand::full(dir) {
        Ok(expanded) => Utf8PathBuf::from(expanded.as_ref()),
        Err(e) => {
            log::warn!("Could not expand font directory '{}': {}", dir, e);
            Utf8PathBuf::from(dir)
        }
    }
}

/// System font directories for different platforms
pub fn system_font_dirs() -> Vec<String> {
    #[cfg(target_os = "macos")]
    {
        vec![
            "/System/Library/Fonts".to_string(),
            "/Library/Fonts".to_string(),
            "~/Library/Fonts".to_string(),
        ]
    }

    #[cfg(target_os = "windows")]
    {
        vec![
            "C:\\Windows\\Fonts".to_string(),
            "$LOCALAPPDATA\\Microsoft\\Windows\\Fonts".to_string(),
        ]
    }

    #[cfg(target_os = "linux")]
    {
        vec![
            "/usr/share/fonts".to_string(),
            "/usr/local/share/fonts".to_string(),
            "~/.fonts".to_string(),
            "~/.local/share/fonts".to_string(),
        ]
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    {
        vec![]
    }
}
