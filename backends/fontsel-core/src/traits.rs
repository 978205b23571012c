// this_file: backends/fontsel-core/src/traits.rs

//! Seams to the host and the filesystem.

use crate::types::{EntityKind, FontHandle, FontResource, FontVariant, SelectorState};
use crate::Result;
use camino::Utf8Path;

/// Loads font files into resources.
///
/// The returned resource must be inert: it is not in use until an entity
/// stores a handle to it.
pub trait FontLoader: Send + Sync {
    /// Load the variant's face from its file, naming the resource after
    /// `variant.resource_name`.
    fn load(&self, variant: &FontVariant) -> Result<FontResource>;
}

/// Existence checks used to validate cached resources.
pub trait FileSystem: Send + Sync {
    fn exists(&self, path: &Utf8Path) -> bool;
}

/// A host entity that can carry a font (text object or text strip).
pub trait TextEntity {
    fn kind(&self) -> EntityKind;

    /// Current font resource.
    fn font(&self) -> Option<&FontHandle>;

    fn set_font(&mut self, font: Option<FontHandle>);

    /// Reset the auxiliary type-face slots (bold, italic, bold-italic).
    ///
    /// Strips have none, hence the no-op default.
    fn set_type_face_slots(&mut self, _font: Option<FontHandle>) {}

    fn state(&self) -> &SelectorState;

    fn state_mut(&mut self) -> &mut SelectorState;
}

impl<T: TextEntity + ?Sized> TextEntity for &mut T {
    fn kind(&self) -> EntityKind {
        (**self).kind()
    }

    fn font(&self) -> Option<&FontHandle> {
        (**self).font()
    }

    fn set_font(&mut self, font: Option<FontHandle>) {
        (**self).set_font(font)
    }

    fn set_type_face_slots(&mut self, font: Option<FontHandle>) {
        (**self).set_type_face_slots(font)
    }

    fn state(&self) -> &SelectorState {
        (**self).state()
    }

    fn state_mut(&mut self) -> &mut SelectorState {
        (**self).state_mut()
    }
}
