// this_file: backends/fontsel-core/src/catalog.rs

//! In-memory model of families, their ordered variants and filepaths.

use crate::favorites::FavoriteSet;
use crate::types::{FamilyFilter, FontFamily, FontVariant};
use crate::{FontselError, Result};

/// Catalog of font families in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyCatalog {
    families: Vec<FontFamily>,
}

impl FamilyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog, merging families that share a name.
    pub fn from_families(families: impl IntoIterator<Item = FontFamily>) -> Self {
        let mut catalog = Self::new();
        for family in families {
            catalog.push(family);
        }
        catalog
    }

    /// Append a family. A family whose name is already present has its
    /// variants appended to the existing entry, skipping known identifiers.
    pub fn push(&mut self, family: FontFamily) {
        match self.find_family(&family.name) {
            Some(index) => {
                let existing = &mut self.families[index];
                existing.favorite |= family.favorite;
                for variant in family.variants {
                    if existing.variant(&variant.name).is_none() {
                        existing.variants.push(variant);
                    }
                }
            }
            None => self.families.push(family),
        }
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    pub fn family(&self, index: usize) -> Result<&FontFamily> {
        self.families
            .get(index)
            .ok_or(FontselError::FamilyIndexOutOfRange {
                index,
                len: self.families.len(),
            })
    }

    pub fn find_family(&self, name: &str) -> Option<usize> {
        self.families.iter().position(|f| f.name == name)
    }

    /// Variant identifiers of a family, in display order.
    ///
    /// Computed from live state on every call.
    pub fn variants_of(&self, index: usize) -> Result<Vec<&str>> {
        Ok(self
            .family(index)?
            .variants
            .iter()
            .map(|v| v.name.as_str())
            .collect())
    }

    /// Default variant used when a family becomes selected.
    pub fn first_variant(&self, index: usize) -> Result<&str> {
        let family = self.family(index)?;
        family
            .variants
            .first()
            .map(|v| v.name.as_str())
            .ok_or_else(|| FontselError::UnknownVariant {
                family: family.name.clone(),
                variant: String::new(),
            })
    }

    pub fn variant(&self, index: usize, name: &str) -> Result<&FontVariant> {
        let family = self.family(index)?;
        family
            .variant(name)
            .ok_or_else(|| FontselError::UnknownVariant {
                family: family.name.clone(),
                variant: name.to_owned(),
            })
    }

    pub fn set_favorite(&mut self, index: usize, favorite: bool) -> Result<()> {
        let len = self.families.len();
        let family = self
            .families
            .get_mut(index)
            .ok_or(FontselError::FamilyIndexOutOfRange { index, len })?;
        family.favorite = favorite;
        Ok(())
    }

    /// Make every family's favorite flag agree with the persisted set.
    pub fn apply_favorites(&mut self, favorites: &FavoriteSet) {
        for family in &mut self.families {
            family.favorite = favorites.contains(&family.name);
        }
    }

    /// Indices of the families the filter keeps, in display order.
    pub fn filter(&self, filter: &FamilyFilter) -> Vec<usize> {
        let needle = filter.search.trim().to_lowercase();
        self.families
            .iter()
            .enumerate()
            .filter(|(_, family)| {
                let mut keep = needle.is_empty() || matches_search(family, &needle, filter);
                if filter.favorites_only {
                    keep &= family.favorite;
                }
                keep != filter.invert
            })
            .map(|(index, _)| index)
            .collect()
    }
}

fn matches_search(family: &FontFamily, needle: &str, filter: &FamilyFilter) -> bool {
    if family.name.to_lowercase().contains(needle) {
        return true;
    }
    family.variants.iter().any(|v| {
        (filter.search_variant_names && v.name.to_lowercase().contains(needle))
            || (filter.search_filepaths && v.filepath.as_str().to_lowercase().contains(needle))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FamilyCatalog {
        FamilyCatalog::from_families([
            FontFamily::new("Inter")
                .with_variant(FontVariant::new("Regular", "Inter-Regular", "/f/Inter.ttf")),
            FontFamily::new("Roboto")
                .with_variant(FontVariant::new("Regular", "Roboto-Regular", "/f/Roboto-Regular.ttf"))
                .with_variant(FontVariant::new("Bold", "Roboto-Bold", "/f/Roboto-Bold.ttf")),
        ])
    }

    #[test]
    fn test_variants_in_display_order() {
        let catalog = sample();
        assert_eq!(catalog.variants_of(1).unwrap(), vec!["Regular", "Bold"]);
        assert_eq!(catalog.first_variant(1).unwrap(), "Regular");
        assert!(matches!(
            catalog.variants_of(5),
            Err(FontselError::FamilyIndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_push_merges_same_name() {
        let mut catalog = sample();
        catalog.push(
            FontFamily::new("Roboto")
                .with_variant(FontVariant::new("Bold", "dup", "/dup.ttf"))
                .with_variant(FontVariant::new("Italic", "Roboto-Italic", "/f/Roboto-Italic.ttf")),
        );
        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.variants_of(1).unwrap(),
            vec!["Regular", "Bold", "Italic"]
        );
        assert_eq!(
            catalog.variant(1, "Bold").unwrap().resource_name,
            "Roboto-Bold"
        );
    }

    #[test]
    fn test_unknown_variant() {
        let catalog = sample();
        let err = catalog.variant(0, "Black").unwrap_err();
        assert_eq!(err.to_string(), "Family 'Inter' has no variant 'Black'");
    }

    #[test]
    fn test_filter_search_and_favorites() {
        let mut catalog = sample();
        catalog.set_favorite(1, true).unwrap();

        let all = FamilyFilter::default();
        assert_eq!(catalog.filter(&all), vec![0, 1]);

        let search = FamilyFilter {
            search: "rob".into(),
            ..Default::default()
        };
        assert_eq!(catalog.filter(&search), vec![1]);

        let by_variant = FamilyFilter {
            search: "bold".into(),
            search_variant_names: true,
            ..Default::default()
        };
        assert_eq!(catalog.filter(&by_variant), vec![1]);

        let by_path = FamilyFilter {
            search: "inter.ttf".into(),
            search_filepaths: true,
            ..Default::default()
        };
        assert_eq!(catalog.filter(&by_path), vec![0]);

        let favorites = FamilyFilter {
            favorites_only: true,
            ..Default::default()
        };
        assert_eq!(catalog.filter(&favorites), vec![1]);

        let inverted = FamilyFilter {
            favorites_only: true,
            invert: true,
            ..Default::default()
        };
        assert_eq!(catalog.filter(&inverted), vec![0]);
    }

    #[test]
    fn test_apply_favorites() {
        let mut catalog = sample();
        catalog.set_favorite(0, true).unwrap();
        let favorites = FavoriteSet::from_names(["Roboto"]);
        catalog.apply_favorites(&favorites);
        assert!(!catalog.family(0).unwrap().favorite);
        assert!(catalog.family(1).unwrap().favorite);
    }
}
