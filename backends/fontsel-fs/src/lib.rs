// this_file: backends/fontsel-fs/src/lib.rs

//! Filesystem backend for fontsel: memory-mapped font loading, existence
//! checks and name-table probing.

pub mod loader;
pub mod probe;

pub use loader::{FsFontLoader, OsFileSystem, MAX_FONT_SIZE};
pub use probe::{probe_faces, FaceInfo, FaceNames};
