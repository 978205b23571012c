// this_file: crates/fontsel-fontdb/src/lib.rs

//! Font discovery: walks font directories, probes every face and groups the
//! results into a [`FamilyCatalog`].
//!
//! Ordering is deterministic for a given set of files: families sort by
//! case-insensitive name, variants put "Regular" first and then sort by
//! identifier. That order decides which variant a freshly selected family
//! defaults to.

use camino::{Utf8Path, Utf8PathBuf};
use fontsel_core::utils::{expand_dir, is_font_file, system_font_dirs};
use fontsel_core::{FamilyCatalog, FontFamily, FontVariant, SelectorConfig};
use fontsel_fs::{probe_faces, FaceInfo};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use walkdir::WalkDir;

/// Scans a set of directories for fonts.
#[derive(Debug, Clone)]
pub struct FontScanner {
    dirs: Vec<Utf8PathBuf>,
}

impl FontScanner {
    pub fn new(dirs: impl IntoIterator<Item = Utf8PathBuf>) -> Self {
        Self {
            dirs: dirs.into_iter().collect(),
        }
    }

    /// Scanner over the configured directories.
    pub fn from_config(config: &SelectorConfig) -> Self {
        Self::new(config.expanded_font_dirs())
    }

    pub fn dirs(&self) -> &[Utf8PathBuf] {
        &self.dirs
    }

    /// Font files below the scanned directories, sorted and de-duplicated.
    pub fn font_files(&self) -> Vec<Utf8PathBuf> {
        let mut files: Vec<Utf8PathBuf> = self
            .dirs
            .iter()
            .filter(|dir| {
                let exists = dir.is_dir();
                if !exists {
                    log::debug!("Skipping missing font directory {}", dir);
                }
                exists
            })
            .flat_map(|dir| {
                WalkDir::new(dir)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(move |entry| match entry {
                        Ok(entry) => Some(entry),
                        Err(e) => {
                            log::warn!("Error walking {}: {}", dir, e);
                            None
                        }
                    })
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| Utf8PathBuf::from_path_buf(entry.into_path()).ok())
            .filter(|path| is_font_file(path))
            .collect();
        files.sort();
        files.dedup();
        files
    }

    /// Walk, probe in parallel and build the catalog. Files that do not parse
    /// are skipped with a warning.
    pub fn scan(&self) -> FamilyCatalog {
        let files = self.font_files();
        log::info!("Probing {} font file(s)", files.len());

        let faces: Vec<FaceInfo> = files
            .par_iter()
            .flat_map_iter(|path| probe_file(path))
            .collect();

        let catalog = build_catalog(faces);
        log::info!("Catalogued {} font families", catalog.len());
        catalog
    }
}

impl Default for FontScanner {
    fn default() -> Self {
        Self::new(default_font_dirs())
    }
}

/// Platform font directories with `~` expanded.
pub fn default_font_dirs() -> Vec<Utf8PathBuf> {
    system_font_dirs().iter().map(|d| expand_dir(d)).collect()
}

fn probe_file(path: &Utf8Path) -> Vec<FaceInfo> {
    match probe_faces(path) {
        Ok(faces) => faces,
        Err(e) => {
            log::warn!("Skipping {}: {}", path, e);
            Vec::new()
        }
    }
}

/// Group probed faces into families.
pub fn build_catalog(faces: Vec<FaceInfo>) -> FamilyCatalog {
    let mut grouped: HashMap<String, Vec<FaceInfo>> = HashMap::new();
    for face in faces {
        grouped.entry(face.family.clone()).or_default().push(face);
    }

    let mut names: Vec<String> = grouped.keys().cloned().collect();
    names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)));

    let mut used_resources = HashSet::new();
    let families = names.into_iter().filter_map(|name| {
        let mut faces = grouped.remove(&name)?;
        faces.sort_by(|a, b| {
            variant_rank(&a.subfamily)
                .cmp(&variant_rank(&b.subfamily))
                .then_with(|| a.subfamily.to_lowercase().cmp(&b.subfamily.to_lowercase()))
                .then_with(|| a.path.cmp(&b.path))
                .then_with(|| a.index.cmp(&b.index))
        });

        let mut family = FontFamily::new(name.as_str());
        for face in faces {
            let variant = unique_name(&face.subfamily, |candidate| {
                family.variant(candidate).is_some()
            });
            let base = face
                .postscript_name
                .clone()
                .unwrap_or_else(|| format!("{} {}", name, variant));
            let resource = unique_name(&base, |candidate| used_resources.contains(candidate));
            used_resources.insert(resource.clone());
            family.variants.push(
                FontVariant::new(variant, resource, face.path).with_face_index(face.index),
            );
        }
        Some(family)
    });

    FamilyCatalog::from_families(families.collect::<Vec<_>>())
}

fn variant_rank(subfamily: &str) -> u8 {
    if subfamily.eq_ignore_ascii_case("regular") {
        0
    } else {
        1
    }
}

/// `base`, or `base (2)`, `base (3)`... whichever is free first.
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{} ({})", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(path: &str, family: &str, subfamily: &str, ps: Option<&str>) -> FaceInfo {
        FaceInfo {
            path: Utf8PathBuf::from(path),
            index: 0,
            family: family.to_string(),
            subfamily: subfamily.to_string(),
            postscript_name: ps.map(str::to_string),
        }
    }

    #[test]
    fn test_families_sorted_and_regular_first() {
        let catalog = build_catalog(vec![
            face("/f/Roboto-Bold.ttf", "Roboto", "Bold", Some("Roboto-Bold")),
            face("/f/inter.ttf", "inter", "Regular", Some("Inter-Regular")),
            face("/f/Roboto-Regular.ttf", "Roboto", "Regular", Some("Roboto-Regular")),
            face("/f/Roboto-Black.ttf", "Roboto", "Black", Some("Roboto-Black")),
        ]);

        let names: Vec<_> = catalog.families().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["inter", "Roboto"]);
        assert_eq!(
            catalog.variants_of(1).unwrap(),
            vec!["Regular", "Black", "Bold"]
        );
        assert_eq!(catalog.first_variant(1).unwrap(), "Regular");
        assert!(catalog.family(1).unwrap().multi_component());
    }

    #[test]
    fn test_duplicate_identifiers_get_suffix() {
        let catalog = build_catalog(vec![
            face("/a/Inter.ttf", "Inter", "Regular", Some("Inter-Regular")),
            face("/b/Inter.ttf", "Inter", "Regular", Some("Inter-Regular")),
            face("/c/Inter.otf", "Inter", "Regular", None),
        ]);
        let family = catalog.family(0).unwrap();
        let ids: Vec<_> = family.variants.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(ids, vec!["Regular", "Regular (2)", "Regular (3)"]);

        let resources: Vec<_> = family
            .variants
            .iter()
            .map(|v| v.resource_name.as_str())
            .collect();
        assert_eq!(
            resources,
            vec!["Inter-Regular", "Inter-Regular (2)", "Inter Regular (3)"]
        );
    }

    #[test]
    fn test_unique_name() {
        assert_eq!(unique_name("Bold", |_| false), "Bold");
        assert_eq!(unique_name("Bold", |c| c == "Bold" || c == "Bold (2)"), "Bold (3)");
    }

    #[test]
    fn test_collection_faces_keep_their_index() {
        let mut bold = face("/f/Family.ttc", "Family", "Bold", Some("Family-Bold"));
        bold.index = 1;
        let catalog = build_catalog(vec![
            face("/f/Family.ttc", "Family", "Regular", Some("Family-Regular")),
            bold,
        ]);

        let family = catalog.family(0).unwrap();
        let faces: Vec<_> = family
            .variants
            .iter()
            .map(|v| (v.name.as_str(), v.filepath.as_str(), v.face_index))
            .collect();
        assert_eq!(
            faces,
            vec![("Regular", "/f/Family.ttc", 0), ("Bold", "/f/Family.ttc", 1)]
        );
    }
}
