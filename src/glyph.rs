use crate::{
    manifest::{FontMetadata, GlyphEntry},
    parser::icon::Icon,
    path::{PathData, Transform},
};

/// An icon placed in the glyph box, ready to be written into the font.
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    pub name: String,
    pub codepoint: u32,
    pub path: PathData,
    pub advance: f64,
}

impl Glyph {
    /// Places `icon` in the glyph box described by `font`.
    ///
    /// The advance width is the icon's own width unless the font fixes one.
    pub fn place(icon: Icon, entry: &GlyphEntry, font: &FontMetadata) -> Self {
        let icon = match font.normalize {
            Some(size) => icon.normalize(size),
            None => icon,
        };

        let transform = Transform::placement(font.viewbox, font.scale, font.descent);
        debug!("Placing {} with {transform:?}", entry.codename);

        Self {
            name: entry.codename.clone(),
            codepoint: entry.codepoint.0,
            path: icon.path.canonicalize(&transform, font.precision),
            advance: font.advance.unwrap_or(icon.width),
        }
    }
}
