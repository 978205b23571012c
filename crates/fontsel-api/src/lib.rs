// this_file: crates/fontsel-api/src/lib.rs

//! Guarded selector entry points: select family, select variant, toggle
//! favorite, switch, relink and catalog reload.

pub mod selector;
pub mod shared;

pub use selector::{Direction, FamilyRow, FontSelector, UpdateOutcome};
pub use shared::SharedSelector;
