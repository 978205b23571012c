// this_file: backends/fontsel-fs/src/probe.rs

//! Reading family/subfamily names out of font files.

use camino::{Utf8Path, Utf8PathBuf};
use fontsel_core::{FontselError, Result};
use memmap2::Mmap;
use std::fs::File;
use ttf_parser::name_id;

/// Names of one face inside a font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceInfo {
    pub path: Utf8PathBuf,
    /// Face index inside a collection, 0 for single fonts
    pub index: u32,
    pub family: String,
    pub subfamily: String,
    pub postscript_name: Option<String>,
}

/// Name table records relevant to grouping, before fallbacks are applied.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FaceNames {
    pub family: Option<String>,
    pub subfamily: Option<String>,
    pub typographic_family: Option<String>,
    pub typographic_subfamily: Option<String>,
    pub postscript_name: Option<String>,
}

impl FaceNames {
    /// Collect names from `(name id, value)` records. The first record of
    /// each id wins.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (u16, String)>,
    {
        let mut names = Self::default();
        for (id, value) in records {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            let slot = match id {
                name_id::FAMILY => &mut names.family,
                name_id::SUBFAMILY => &mut names.subfamily,
                name_id::TYPOGRAPHIC_FAMILY => &mut names.typographic_family,
                name_id::TYPOGRAPHIC_SUBFAMILY => &mut names.typographic_subfamily,
                name_id::POST_SCRIPT_NAME => &mut names.postscript_name,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        names
    }

    /// Resolve into a [`FaceInfo`]: typographic names first, then legacy
    /// names, then the file stem and "Regular".
    pub fn into_face_info(self, path: &Utf8Path, index: u32) -> FaceInfo {
        let family = self
            .typographic_family
            .or(self.family)
            .or_else(|| path.file_stem().map(str::to_string))
            .unwrap_or_else(|| path.to_string());
        let subfamily = self
            .typographic_subfamily
            .or(self.subfamily)
            .unwrap_or_else(|| "Regular".to_string());
        FaceInfo {
            path: path.to_owned(),
            index,
            family,
            subfamily,
            postscript_name: self.postscript_name,
        }
    }
}

/// Read every face of the font file at `path`.
///
/// The collection header's face count is untrusted: probing stops at the
/// first face that does not parse, and only a failing first face is an error.
pub fn probe_faces(path: &Utf8Path) -> Result<Vec<FaceInfo>> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    probe_data(path, &mmap)
}

fn probe_data(path: &Utf8Path, data: &[u8]) -> Result<Vec<FaceInfo>> {
    let count = ttf_parser::fonts_in_collection(data).unwrap_or(1);
    let mut faces = Vec::new();
    for index in 0..count {
        let face = match ttf_parser::Face::parse(data, index) {
            Ok(face) => face,
            Err(e) if index == 0 => {
                return Err(FontselError::InvalidFont {
                    path: path.to_owned(),
                    reason: e.to_string(),
                })
            }
            Err(e) => {
                log::warn!(
                    "{} claims {} faces, face {} is unreadable: {}",
                    path,
                    count,
                    index,
                    e
                );
                break;
            }
        };
        let records = face
            .names()
            .into_iter()
            .filter(|name| name.is_unicode())
            .filter_map(|name| name.to_string().map(|value| (name.name_id, value)));
        faces.push(FaceNames::from_records(records).into_face_info(path, index));
    }
    Ok(faces)
}
