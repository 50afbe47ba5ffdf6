//! EXIF metadata extraction.
//!
//! Reads the EXIF container of an image into an [`ExifBag`] — a plain
//! tag-name → string-value map. The bag is deliberately forgiving: an image
//! with no EXIF at all (or a corrupt container) yields an empty bag, and
//! looking up an absent tag returns the [`UNKNOWN`] sentinel instead of an
//! error. Downstream resolution (see [`crate::resolve`]) decides which
//! absences matter.
//!
//! Only primary-IFD fields are kept; thumbnail-IFD duplicates would
//! otherwise collide on tag name.

use exif::In;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Sentinel value for absent tags. Rendered as-is on the output image for
/// the exposure fields; the lens field is never left at this value.
pub const UNKNOWN: &str = "N/A";

/// Tag names consumed by the resolver.
pub const TAG_MAKE: &str = "Make";
pub const TAG_MODEL: &str = "Model";
pub const TAG_LENS_MODEL: &str = "LensModel";
pub const TAG_LENS_ID: &str = "LensSpecification";
pub const TAG_ISO: &str = "PhotographicSensitivity";
pub const TAG_APERTURE: &str = "FNumber";
pub const TAG_SHUTTER: &str = "ExposureTime";

/// A read-only bag of EXIF tags as display strings.
///
/// Sorted by tag name so the `--debug` dump is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifBag {
    tags: BTreeMap<String, String>,
}

impl ExifBag {
    /// Read the EXIF container of `path` into a bag.
    ///
    /// Any failure — unreadable file, no EXIF segment, corrupt container —
    /// produces an empty bag. Absent metadata is a normal condition for this
    /// pipeline, not an error; the image itself is decoded separately.
    pub fn from_file(path: &Path) -> Self {
        let Ok(file) = File::open(path) else {
            return Self::default();
        };
        let mut reader = BufReader::new(file);
        let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
            return Self::default();
        };

        let mut tags = BTreeMap::new();
        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let value = field.display_value().to_string();
            // Ascii values render quoted ("NIKON CORPORATION")
            let value = value.trim_matches('"').trim().to_string();
            if !value.is_empty() {
                tags.insert(field.tag.to_string(), value);
            }
        }
        Self { tags }
    }

    /// Build a bag from literal tag/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tags: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up a tag, returning the [`UNKNOWN`] sentinel when absent.
    pub fn get(&self, tag: &str) -> &str {
        self.tags.get(tag).map(String::as_str).unwrap_or(UNKNOWN)
    }

    /// Iterate all tags in name order. Used for the `--debug` dump.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
