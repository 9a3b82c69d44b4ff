//! Extraction of the drawable outline from a single SVG icon file.

use std::path::Path;

use nom::{
    bytes::complete::tag,
    character::complete::multispace0,
    combinator::{all_consuming, map_res, opt, verify},
    number::complete::recognize_float,
    sequence::{delimited, terminated},
    Finish, IResult,
};
use roxmltree::{Document, Node, ParsingOptions};

use crate::{
    path::{PathData, Transform, NORMALIZED_PRECISION, NORMALIZED_VIEWBOX},
    Error,
};

/// The parts of an icon file that end up in a glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct Icon {
    pub width: f64,
    pub height: f64,
    pub view_box: Option<String>,
    pub path: PathData,
}

impl Icon {
    /// Parses SVG markup. `filename` is only used in error messages.
    ///
    /// ```rust
    /// # use svg_font::parser::icon::Icon;
    /// let svg = r#"<svg width="24" height="24" viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg">
    ///   <path d="M0 0h24v24H0z"/>
    ///   <path d="M5 5h14v14H5z"/>
    /// </svg>"#;
    ///
    /// let icon = Icon::parse(svg, "home.svg").unwrap();
    ///
    /// assert_eq!(icon.width, 24.0);
    /// assert_eq!(icon.path.to_string(), "M5 5h14v14H5z");
    /// ```
    pub fn parse(markup: &str, filename: impl AsRef<Path>) -> Result<Self, Error> {
        let filename = filename.as_ref();

        // Editors like Illustrator emit a DOCTYPE.
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };

        let doc = Document::parse_with_options(markup, options).map_err(|source| Error::Xml {
            path: filename.to_owned(),
            source,
        })?;

        let svg = doc.root_element();
        if svg.tag_name().name() != "svg" {
            return Err(Error::NotSvg {
                found: svg.tag_name().name().to_string(),
                path: filename.to_owned(),
            });
        }

        let height = dimension(svg, "height", filename)?;
        let width = dimension(svg, "width", filename)?;
        let view_box = svg.attribute("viewBox").map(str::to_string);

        let path = Self::outline(svg, filename)?;

        // Some editors put the artboard rectangle into the same path as the icon.
        let path = match path.strip_bounding_box(width, height) {
            Some(stripped) => {
                debug!("Removed embedded bounding box from {}", filename.display());
                stripped
            }
            None => path,
        };

        Ok(Self {
            width,
            height,
            view_box,
            path,
        })
    }

    /// Picks the single path that draws the icon, skipping bounding box paths
    /// when there is more than one.
    fn outline(svg: Node, filename: &Path) -> Result<PathData, Error> {
        let mut paths = svg
            .descendants()
            .filter(|node| node.tag_name().name() == "path")
            .filter_map(|node| node.attribute("d"))
            .filter(|d| !d.trim().is_empty())
            .map(|d| {
                PathData::parse(d).map_err(|source| Error::InvalidPathData {
                    path: filename.to_owned(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if paths.len() > 1 {
            let before = paths.len();
            paths.retain(|path| !path.starts_at_origin());

            let removed = before - paths.len();
            if removed > 0 {
                warn!(
                    "Discarded {removed} bounding box path(s) in {}",
                    filename.display()
                );
            }
        }

        match paths.len() {
            0 => Err(Error::NoPathFound {
                path: filename.to_owned(),
            }),
            1 => Ok(paths.remove(0)),
            count => Err(Error::AmbiguousPath {
                count,
                path: filename.to_owned(),
            }),
        }
    }

    /// Rescales an icon drawn on a `size` by `size` square to the normalized
    /// viewbox. Icons of any other size are returned unchanged.
    pub fn normalize(self, size: f64) -> Self {
        if self.width != size || self.height != size {
            return self;
        }

        let path = self
            .path
            .canonicalize(&Transform::normalize(size), NORMALIZED_PRECISION);

        Self {
            width: NORMALIZED_VIEWBOX,
            height: NORMALIZED_VIEWBOX,
            view_box: Some(format!("0 0 {NORMALIZED_VIEWBOX} {NORMALIZED_VIEWBOX}")),
            path,
        }
    }
}

/// Reads a required length attribute of the root element.
fn dimension(svg: Node, attribute: &'static str, filename: &Path) -> Result<f64, Error> {
    let value = svg.attribute(attribute).ok_or_else(|| Error::MissingAttribute {
        attribute,
        path: filename.to_owned(),
    })?;

    length(value)
        .finish()
        .map(|(_, length)| length)
        .map_err(|_| Error::InvalidAttribute {
            attribute,
            value: value.to_string(),
            path: filename.to_owned(),
        })
}

/// A number in user units, optionally suffixed with `px`.
fn length(input: &str) -> IResult<&str, f64> {
    all_consuming(delimited(
        multispace0,
        terminated(number, opt(tag("px"))),
        multispace0,
    ))(input)
}

/// A signed decimal number with an optional exponent. Values that overflow to
/// infinity are rejected.
fn number(input: &str) -> IResult<&str, f64> {
    verify(map_res(recognize_float, str::parse::<f64>), |value: &f64| {
        value.is_finite()
    })(input)
}
