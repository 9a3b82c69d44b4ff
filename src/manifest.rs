//! The YAML manifest that maps icon files to codepoints and describes the font.
//!
//! ```yaml
//! font:
//!   fontname: pupil_icons
//!   familyname: pupil
//!   ascent: 850
//!   descent: -150
//!   scale: 0.8
//!   viewbox: 1000
//! glyphs:
//!   - codename: home
//!     code: 0xE001
//! ```
//!
//! A manifest is loaded as [`RawManifest`] and has to be [validated](Manifest::validate)
//! into a [`Config`] before a font can be built from it.

use core::fmt::Debug;
use std::{
    collections::HashSet,
    fs::read_to_string,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::Error;

pub type Config = Manifest<Validated>;
pub type RawManifest = Manifest<Unchecked>;

/// Rounding precision is capped so `10^precision` stays exact.
pub const MAX_PRECISION: u8 = 6;

const DEFAULT_METADATA: &str = "Generated by svg-font";

#[allow(private_bounds)]
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest<T: ManifestValidation> {
    pub font: FontMetadata,
    pub glyphs: Vec<GlyphEntry>,
    /// Where the manifest was read from, for error messages.
    pub path: PathBuf,

    _validation: PhantomData<T>,
}

/// Font wide parameters shared by every glyph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontMetadata {
    #[serde(rename = "fontname")]
    pub name: String,
    #[serde(rename = "familyname")]
    pub family: String,
    pub ascent: f64,
    pub descent: f64,
    /// Fraction of the glyph box an icon covers.
    pub scale: f64,
    /// Size of the square icons are drawn in.
    pub viewbox: f64,

    #[serde(default = "default_metadata")]
    pub metadata: String,
    /// Fixed advance width for every glyph, instead of each icon's width.
    #[serde(default)]
    pub advance: Option<f64>,
    /// Decimals kept in glyph outlines.
    #[serde(default)]
    pub precision: u8,
    /// Icons drawn on a square of this size are rescaled to a 1000 unit viewbox
    /// before placement.
    #[serde(default)]
    pub normalize: Option<f64>,
}

impl FontMetadata {
    /// Height of the glyph box, which is also the em size.
    pub fn height(&self) -> f64 {
        self.ascent - self.descent
    }
}

fn default_metadata() -> String {
    DEFAULT_METADATA.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GlyphEntry {
    /// File stem of the icon, `home` for `home.svg`.
    pub codename: String,
    #[serde(rename = "code")]
    pub codepoint: Codepoint,
}

/// A codepoint as written in the manifest: a YAML integer (`0xE001`, `57345`)
/// or a hexadecimal string (`"e001"`, `"U+E001"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "CodeRepr")]
pub struct Codepoint(pub u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum CodeRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<CodeRepr> for Codepoint {
    type Error = String;

    fn try_from(repr: CodeRepr) -> Result<Self, Self::Error> {
        match repr {
            CodeRepr::Number(code) => Ok(Self(code)),
            CodeRepr::Text(text) => {
                let digits = text
                    .trim()
                    .trim_start_matches("U+")
                    .trim_start_matches("0x");

                u32::from_str_radix(digits, 16)
                    .map(Self)
                    .map_err(|_| format!("{text:?} is not a hexadecimal codepoint"))
            }
        }
    }
}

impl Codepoint {
    pub fn as_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

/// Shape of the file on disk.
#[derive(Deserialize)]
struct ManifestFile {
    font: FontMetadata,
    glyphs: Vec<GlyphEntry>,
}

impl RawManifest {
    /// Reads and parses the manifest at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = read_to_string(path).map_err(Error::io(path))?;

        Self::parse(&text, path)
    }

    /// Parses manifest text. `path` is kept for error messages.
    pub fn parse(text: &str, path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();

        let file: ManifestFile =
            serde_yaml::from_str(text).map_err(|e| Error::manifest(&path, e))?;

        Ok(Self {
            font: file.font,
            glyphs: file.glyphs,
            path,
            _validation: PhantomData,
        })
    }

    pub fn validate(self) -> Result<Config, Error> {
        let fail = |reason: String| Err(Error::manifest(&self.path, reason));
        let font = &self.font;

        for (prop, value) in [("ascent", font.ascent), ("descent", font.descent)] {
            if !value.is_finite() {
                return fail(format!("{prop} must be a finite number, got {value}"));
            }
        }

        if font.ascent <= font.descent {
            return fail(format!(
                "ascent ({}) must be above descent ({})",
                font.ascent, font.descent
            ));
        }

        if !(font.viewbox.is_finite() && font.viewbox > 0.0) {
            return fail(format!("viewbox must be positive, got {}", font.viewbox));
        }

        if !(font.scale.is_finite() && font.scale > 0.0) {
            return fail(format!("scale must be positive, got {}", font.scale));
        }

        if font.precision > MAX_PRECISION {
            return fail(format!(
                "precision must be at most {MAX_PRECISION}, got {}",
                font.precision
            ));
        }

        for (prop, value) in [("advance", font.advance), ("normalize", font.normalize)] {
            if let Some(value) = value {
                if !(value.is_finite() && value > 0.0) {
                    return fail(format!("{prop} must be positive, got {value}"));
                }
            }
        }

        if self.glyphs.is_empty() {
            return fail("no glyphs listed".to_string());
        }

        let mut codenames = HashSet::new();
        let mut codepoints = HashSet::new();

        for glyph in &self.glyphs {
            let codename = glyph.codename.as_str();

            if codename.is_empty() {
                return fail("empty codename".to_string());
            }

            if codename.contains(['/', '\\']) || codename == "." || codename == ".." {
                return fail(format!("codename {codename:?} is not a file name"));
            }

            if glyph.codepoint.as_char().is_none() {
                return fail(format!(
                    "code {:#x} of {codename:?} is not a unicode scalar value",
                    glyph.codepoint.0
                ));
            }

            if !codenames.insert(codename) {
                return fail(format!("codename {codename:?} is listed twice"));
            }

            if !codepoints.insert(glyph.codepoint) {
                return fail(format!(
                    "code {:#x} of {codename:?} is already taken",
                    glyph.codepoint.0
                ));
            }
        }

        Ok(Config {
            font: self.font,
            glyphs: self.glyphs,
            path: self.path,
            _validation: PhantomData,
        })
    }
}

#[allow(private_bounds)]
impl<T: ManifestValidation> Manifest<T> {
    pub fn contains(&self, codename: &str) -> bool {
        self.glyphs.iter().any(|glyph| glyph.codename == codename)
    }
}

trait ManifestValidation: Clone + PartialEq + Debug {}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Validated;
impl ManifestValidation for Validated {}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Unchecked;
impl ManifestValidation for Unchecked {}
