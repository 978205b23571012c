// this_file: backends/fontsel-core/src/types.rs

//! Core types used throughout the fontsel selector.

use camino::{Utf8Path, Utf8PathBuf};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One concrete font file within a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontVariant {
    /// Identifier, unique within its family (e.g. "Regular", "Bold")
    pub name: String,
    /// Name the loaded resource is cached under, unique across the catalog
    pub resource_name: String,
    /// Backing font file
    pub filepath: Utf8PathBuf,
    /// Face inside a collection file, 0 for single fonts
    #[serde(default)]
    pub face_index: u32,
}

impl FontVariant {
    pub fn new(
        name: impl Into<String>,
        resource_name: impl Into<String>,
        filepath: impl Into<Utf8PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            resource_name: resource_name.into(),
            filepath: filepath.into(),
            face_index: 0,
        }
    }

    /// Address face `index` of a collection file.
    pub fn with_face_index(mut self, index: u32) -> Self {
        self.face_index = index;
        self
    }
}

/// A named group of related variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontFamily {
    /// Family name, unique within a catalog
    pub name: String,
    /// Variants in display order
    pub variants: Vec<FontVariant>,
    /// Favorite flag, mirrored from the persisted favorites
    pub favorite: bool,
}

impl FontFamily {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
            favorite: false,
        }
    }

    /// Builder-style variant append.
    pub fn with_variant(mut self, variant: FontVariant) -> Self {
        self.variants.push(variant);
        self
    }

    /// True when the family has more than one variant.
    pub fn multi_component(&self) -> bool {
        self.variants.len() > 1
    }

    pub fn variant(&self, name: &str) -> Option<&FontVariant> {
        self.variants.iter().find(|v| v.name == name)
    }
}

/// Raw bytes backing a loaded font.
pub enum FontData {
    /// Memory-mapped font file
    Mapped(Mmap),
    /// Bytes owned in memory
    Owned(Vec<u8>),
}

impl FontData {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FontData::Mapped(mmap) => mmap.as_ref(),
            FontData::Owned(bytes) => bytes.as_slice(),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl fmt::Debug for FontData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            FontData::Mapped(_) => "Mapped",
            FontData::Owned(_) => "Owned",
        };
        write!(f, "{kind}({} bytes)", self.len())
    }
}

/// A loaded font resource.
#[derive(Debug)]
pub struct FontResource {
    name: String,
    filepath: Utf8PathBuf,
    face_index: u32,
    data: FontData,
}

impl FontResource {
    pub fn new(name: impl Into<String>, filepath: impl Into<Utf8PathBuf>, data: FontData) -> Self {
        Self {
            name: name.into(),
            filepath: filepath.into(),
            face_index: 0,
            data,
        }
    }

    pub fn with_face_index(mut self, index: u32) -> Self {
        self.face_index = index;
        self
    }

    /// Name the resource is cached under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// File the resource was loaded from.
    pub fn filepath(&self) -> &Utf8Path {
        &self.filepath
    }

    /// Face of the backing file this resource renders with.
    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn data(&self) -> &FontData {
        &self.data
    }
}

/// Shared handle to a loaded resource. Identity is pointer identity.
pub type FontHandle = Arc<FontResource>;

/// True when both optional handles point at the same resource.
pub fn same_handle(a: Option<&FontHandle>, b: Option<&FontHandle>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        (None, None) => true,
        _ => false,
    }
}

/// Host entity discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Scene text object, carries bold/italic/bold-italic slots
    TextObject,
    /// Sequencer text strip, single font slot
    TextStrip,
    /// Anything else that may appear in a selection
    Other,
}

impl EntityKind {
    pub fn is_font_bearing(self) -> bool {
        !matches!(self, EntityKind::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::TextObject => "object",
            EntityKind::TextStrip => "strip",
            EntityKind::Other => "other",
        }
    }
}

/// Per-entity icon display toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayOptions {
    pub show_favorite: bool,
    pub show_multi_component: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_favorite: true,
            show_multi_component: true,
        }
    }
}

/// Per-entity family list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyFilter {
    /// Case-insensitive substring searched in family names
    pub search: String,
    /// Also search variant identifiers
    pub search_variant_names: bool,
    /// Also search variant filepaths
    pub search_filepaths: bool,
    /// Only keep favorite families
    pub favorites_only: bool,
    /// Invert the result of the filters
    pub invert: bool,
}

/// Selector state attached to every text-bearing entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorState {
    /// Display index into the catalog, `None` when nothing is selected
    pub family_index: Option<usize>,
    /// Current variant identifier
    pub variant: Option<String>,
    /// Family name of the last applied selection
    pub relink_family_name: String,
    /// Variant identifier of the last applied selection
    pub relink_variant: String,
    pub display: DisplayOptions,
    pub filter: FamilyFilter,
}

impl SelectorState {
    /// Authoritative (family, variant) key, `None` before the first apply.
    pub fn relink_pair(&self) -> Option<(&str, &str)> {
        if self.relink_family_name.is_empty() {
            None
        } else {
            Some((&self.relink_family_name, &self.relink_variant))
        }
    }

    /// Copy index, variant and relink identifiers from a resolved selection.
    pub fn adopt(&mut self, selection: &Selection) {
        self.family_index = Some(selection.family_index);
        self.variant = Some(selection.variant.clone());
        self.relink_family_name = selection.family_name.clone();
        self.relink_variant = selection.variant.clone();
    }
}

/// A resolved (family, variant) pair ready to be mirrored onto entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub family_index: usize,
    pub family_name: String,
    pub variant: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_component() {
        let family = FontFamily::new("Roboto")
            .with_variant(FontVariant::new("Regular", "Roboto-Regular", "r.ttf"));
        assert!(!family.multi_component());
        let family = family.with_variant(FontVariant::new("Bold", "Roboto-Bold", "b.ttf"));
        assert!(family.multi_component());
        assert_eq!(family.variant("Bold").map(|v| v.face_index), Some(0));
    }

    #[test]
    fn test_relink_pair_empty_before_apply() {
        let mut state = SelectorState::default();
        assert_eq!(state.relink_pair(), None);

        state.adopt(&Selection {
            family_index: 2,
            family_name: "Roboto".into(),
            variant: "Bold".into(),
        });
        assert_eq!(state.relink_pair(), Some(("Roboto", "Bold")));
        assert_eq!(state.family_index, Some(2));
    }

    #[test]
    fn test_same_handle_uses_identity() {
        let a: FontHandle = Arc::new(FontResource::new("A", "a.ttf", FontData::Owned(vec![])));
        let b: FontHandle = Arc::new(FontResource::new("A", "a.ttf", FontData::Owned(vec![])));
        assert!(same_handle(Some(&a), Some(&a.clone())));
        assert!(!same_handle(Some(&a), Some(&b)));
        assert!(same_handle(None, None));
    }
}
