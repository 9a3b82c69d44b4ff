//! Emits the SVG font document.

use core::fmt;

use quick_xml::escape::escape;

use crate::{glyph::Glyph, manifest::FontMetadata, path::Number};

const PROLOGUE: &str = concat!(
    "<?xml version=\"1.0\" standalone=\"no\"?>\n",
    "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" ",
    "\"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n",
    "<svg xmlns=\"http://www.w3.org/2000/svg\">\n",
);

/// A complete SVG font. Rendering happens through [`Display`](fmt::Display).
///
/// ```rust
/// # use svg_font::{glyph::Glyph, path::PathData, render::svg_font::SvgFont};
/// # use svg_font::manifest::FontMetadata;
/// # let font: FontMetadata = serde_yaml::from_str(
/// #     "{fontname: icons, familyname: icons, ascent: 850, descent: -150, scale: 1, viewbox: 1000}"
/// # ).unwrap();
/// let glyph = Glyph {
///     name: "home".to_string(),
///     codepoint: 0xE001,
///     path: PathData::parse("M0 0h10").unwrap(),
///     advance: 24.0,
/// };
///
/// let svg = SvgFont::new(&font, vec![glyph]).to_string();
///
/// assert!(svg.contains(r#"<glyph glyph-name="home" unicode="&#xe001;" d="M0 0h10" horiz-adv-x="24" />"#));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SvgFont<'a> {
    font: &'a FontMetadata,
    glyphs: Vec<Glyph>,
}

impl<'a> SvgFont<'a> {
    /// `glyphs` are written in the order given.
    pub fn new(font: &'a FontMetadata, glyphs: Vec<Glyph>) -> Self {
        Self { font, glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }
}

impl fmt::Display for SvgFont<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let font = self.font;
        let height = Number(font.height());

        f.write_str(PROLOGUE)?;
        writeln!(f, "<metadata>{}</metadata>", escape(font.metadata.as_str()))?;
        writeln!(f, "<defs>")?;
        writeln!(
            f,
            r#"<font id="{}" horiz-adv-x="{height}">"#,
            escape(font.name.as_str())
        )?;
        writeln!(
            f,
            r#"<font-face font-family="{}" font-weight="400" font-stretch="normal" units-per-em="{height}" ascent="{}" descent="{}" />"#,
            escape(font.family.as_str()),
            Number(font.ascent),
            Number(font.descent),
        )?;
        writeln!(f, r#"<missing-glyph horiz-adv-x="{height}" />"#)?;

        for glyph in &self.glyphs {
            writeln!(
                f,
                r#"<glyph glyph-name="{}" unicode="&#x{:x};" d="{}" horiz-adv-x="{}" />"#,
                escape(glyph.name.as_str()),
                glyph.codepoint,
                glyph.path,
                Number(glyph.advance),
            )?;
        }

        writeln!(f, "</font>")?;
        writeln!(f, "</defs>")?;
        f.write_str("</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::SvgFont;
    use crate::{glyph::Glyph, manifest::FontMetadata, path::PathData};

    fn font() -> FontMetadata {
        FontMetadata {
            name: "pupil_icons".to_string(),
            family: "pupil".to_string(),
            ascent: 850.0,
            descent: -150.0,
            scale: 0.8,
            viewbox: 1000.0,
            metadata: "Internal font".to_string(),
            advance: None,
            precision: 0,
            normalize: None,
        }
    }

    fn glyph(name: &str, codepoint: u32) -> Glyph {
        Glyph {
            name: name.to_string(),
            codepoint,
            path: PathData::parse("M100-50l800 800").unwrap(),
            advance: 1000.0,
        }
    }

    #[test_case("plain" => "<metadata>plain</metadata>"; "nothing to escape")]
    #[test_case("a<b>&\"c\"" => "<metadata>a&lt;b&gt;&amp;&quot;c&quot;</metadata>"; "special characters")]
    fn escaped_metadata(metadata: &str) -> String {
        let font = FontMetadata {
            metadata: metadata.to_string(),
            ..font()
        };
        let svg = SvgFont::new(&font, vec![]).to_string();

        svg.lines()
            .find(|line| line.starts_with("<metadata>"))
            .unwrap()
            .to_string()
    }

    #[test]
    fn full_document() {
        let font = font();
        let svg = SvgFont::new(&font, vec![glyph("home", 0xE001)]).to_string();

        assert_eq!(
            svg,
            r#"<?xml version="1.0" standalone="no"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg">
<metadata>Internal font</metadata>
<defs>
<font id="pupil_icons" horiz-adv-x="1000">
<font-face font-family="pupil" font-weight="400" font-stretch="normal" units-per-em="1000" ascent="850" descent="-150" />
<missing-glyph horiz-adv-x="1000" />
<glyph glyph-name="home" unicode="&#xe001;" d="M100-50l800 800" horiz-adv-x="1000" />
</font>
</defs>
</svg>"#
        );
    }

    #[test]
    fn glyphs_in_given_order_with_one_missing_glyph() {
        let font = font();
        let glyphs = vec![glyph("b", 0xE002), glyph("a", 0xE001), glyph("c", 0x41)];
        let svg = SvgFont::new(&font, glyphs).to_string();

        assert_eq!(svg.matches("<glyph ").count(), 3);
        assert_eq!(svg.matches("<missing-glyph ").count(), 1);

        let b = svg.find(r#"glyph-name="b""#).unwrap();
        let a = svg.find(r#"glyph-name="a""#).unwrap();
        let c = svg.find(r#"glyph-name="c""#).unwrap();
        assert!(b < a && a < c);
        assert!(svg.contains(r#"unicode="&#x41;""#));
    }

    #[test]
    fn output_is_well_formed_xml() {
        let font = FontMetadata {
            metadata: "Icons & <more>".to_string(),
            ..font()
        };
        let svg = SvgFont::new(&font, vec![glyph("a\"b", 0xE001)]).to_string();

        let doc = roxmltree::Document::parse_with_options(
            &svg,
            roxmltree::ParsingOptions {
                allow_dtd: true,
                ..Default::default()
            },
        )
        .unwrap();

        let glyph = doc
            .descendants()
            .find(|node| node.tag_name().name() == "glyph")
            .unwrap();
        assert_eq!(glyph.attribute("glyph-name"), Some("a\"b"));
        assert_eq!(glyph.attribute("unicode"), Some("\u{e001}"));
    }
}
