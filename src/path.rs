//! Path data model and the transforms applied to icon outlines.
//!
//! A [`PathData`] is a flat list of [`Segment`]s. Every operation consumes the
//! path and returns the transformed one, so a pipeline reads left to right:
//!
//! ```rust
//! # use svg_font::path::{PathData, Transform};
//! let path = PathData::parse("M5 5L19 5 19 19Z").unwrap();
//! let placed = path.canonicalize(&Transform::new(2.0, 10.0, 0.0), 0);
//!
//! assert_eq!(placed.to_string(), "M20 10l28 0 0 28z");
//! ```

use core::fmt::{self, Write};

use thiserror::Error;

use crate::parser::path_data::path_data;

/// Size of the viewbox icons from foreign sets are normalized to.
pub const NORMALIZED_VIEWBOX: f64 = 1000.0;

/// Rounding precision used when normalizing foreign icons.
pub const NORMALIZED_PRECISION: u8 = 1;

/// Tolerance used when comparing coordinates for bounding box detection.
const EPSILON: f64 = 1e-9;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Command {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CurveTo,
    SmoothCurveTo,
    Quadratic,
    SmoothQuadratic,
    EllipticalArc,
    ClosePath,
}

impl Command {
    /// Upper case letter of the command.
    pub fn letter(self) -> char {
        use Command::*;
        match self {
            MoveTo => 'M',
            LineTo => 'L',
            HorizontalLineTo => 'H',
            VerticalLineTo => 'V',
            CurveTo => 'C',
            SmoothCurveTo => 'S',
            Quadratic => 'Q',
            SmoothQuadratic => 'T',
            EllipticalArc => 'A',
            ClosePath => 'Z',
        }
    }
}

/// A single path command with its arguments, in the order they appear in path data.
///
/// Arc flags are stored as `0.0` or `1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub command: Command,
    pub absolute: bool,
    pub args: Vec<f64>,
}

impl Segment {
    pub fn new(command: Command, absolute: bool, args: Vec<f64>) -> Self {
        Self {
            command,
            absolute,
            args,
        }
    }

    /// Letter as it is written in path data, lower case for relative segments.
    pub fn letter(&self) -> char {
        let letter = self.command.letter();
        if self.absolute {
            letter
        } else {
            letter.to_ascii_lowercase()
        }
    }

    /// End point of the segment, ignoring whether it is relative.
    /// `None` for `H`, `V` and `Z`, which only carry one or no coordinate.
    fn end_point(&self) -> Option<(f64, f64)> {
        match self.command {
            Command::HorizontalLineTo | Command::VerticalLineTo | Command::ClosePath => None,
            _ => {
                let len = self.args.len();
                Some((self.args[len - 2], self.args[len - 1]))
            }
        }
    }

    /// Adds `(dx, dy)` to every coordinate that moves with the current point.
    fn offset(&mut self, dx: f64, dy: f64) {
        match self.command {
            Command::ClosePath => {}
            Command::HorizontalLineTo => self.args[0] += dx,
            Command::VerticalLineTo => self.args[0] += dy,
            Command::EllipticalArc => {
                self.args[5] += dx;
                self.args[6] += dy;
            }
            _ => {
                for (index, arg) in self.args.iter_mut().enumerate() {
                    *arg += if index % 2 == 0 { dx } else { dy };
                }
            }
        }
    }
}

/// Tracks the current point while walking a path.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
struct Cursor {
    x: f64,
    y: f64,
    start_x: f64,
    start_y: f64,
}

impl Cursor {
    fn advance(&mut self, segment: &Segment) {
        let (base_x, base_y) = if segment.absolute {
            (0.0, 0.0)
        } else {
            (self.x, self.y)
        };

        match segment.command {
            Command::ClosePath => {
                self.x = self.start_x;
                self.y = self.start_y;
            }
            Command::HorizontalLineTo => self.x = base_x + segment.args[0],
            Command::VerticalLineTo => self.y = base_y + segment.args[0],
            _ => {
                if let Some((x, y)) = segment.end_point() {
                    self.x = base_x + x;
                    self.y = base_y + y;
                }

                if segment.command == Command::MoveTo {
                    self.start_x = self.x;
                    self.start_y = self.y;
                }
            }
        }
    }
}

/// Scale followed by translation. Scaling is uniform, so arcs stay arcs and
/// horizontal/vertical lines keep their direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Transform {
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    /// Centers an icon drawn in a `viewbox` sized box inside the glyph box after
    /// scaling it by `scale`, then shifts it down by the font `descent`.
    ///
    /// ```rust
    /// # use svg_font::path::Transform;
    /// let t = Transform::placement(1000.0, 0.8, -150.0);
    ///
    /// assert_eq!(t, Transform::new(0.8, 100.0, -50.0));
    /// ```
    pub fn placement(viewbox: f64, scale: f64, descent: f64) -> Self {
        let scaled = viewbox * scale;
        let margin = (viewbox - scaled) / 2.0;

        Self::new(scale, margin, margin + descent)
    }

    /// Rescales an icon drawn in a `size` sized box to [`NORMALIZED_VIEWBOX`].
    pub fn normalize(size: f64) -> Self {
        Self::new(NORMALIZED_VIEWBOX / size, 0.0, 0.0)
    }

    fn point(&self, x: f64, y: f64, relative: bool) -> (f64, f64) {
        if relative {
            (x * self.scale, y * self.scale)
        } else {
            (
                x * self.scale + self.translate_x,
                y * self.scale + self.translate_y,
            )
        }
    }

    fn apply(&self, segment: &mut Segment, relative: bool) {
        let args = &mut segment.args;

        match segment.command {
            Command::ClosePath => {}
            Command::HorizontalLineTo => args[0] = self.point(args[0], 0.0, relative).0,
            Command::VerticalLineTo => args[0] = self.point(0.0, args[0], relative).1,
            Command::EllipticalArc => {
                args[0] *= self.scale.abs();
                args[1] *= self.scale.abs();
                (args[5], args[6]) = self.point(args[5], args[6], relative);
            }
            _ => {
                for pair in args.chunks_exact_mut(2) {
                    (pair[0], pair[1]) = self.point(pair[0], pair[1], relative);
                }
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathDataError {
    #[error("Malformed path data: {0}")]
    Syntax(String),

    #[error("Path data value {0} is out of range")]
    OutOfRange(String),
}

/// Parsed contents of a `d` attribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    pub segments: Vec<Segment>,
}

impl PathData {
    pub fn parse(input: &str) -> Result<Self, PathDataError> {
        Ok(Self {
            segments: path_data(input)?,
        })
    }

    /// True when the path opens with a move to `(0, 0)`, which is how icon
    /// editors export artboard bounding boxes.
    pub fn starts_at_origin(&self) -> bool {
        matches!(
            self.segments.first(),
            Some(Segment { command: Command::MoveTo, args, .. })
                if args[0].abs() < EPSILON && args[1].abs() < EPSILON
        )
    }

    /// Converts every segment to absolute coordinates.
    pub fn abs(mut self) -> Self {
        let mut cursor = Cursor::default();

        for segment in &mut self.segments {
            let before = cursor;
            cursor.advance(segment);

            if !segment.absolute {
                segment.offset(before.x, before.y);
                segment.absolute = true;
            }
        }

        self
    }

    /// Converts every segment to relative coordinates. The first moveto is left
    /// absolute.
    pub fn rel(mut self) -> Self {
        let mut cursor = Cursor::default();

        for (index, segment) in self.segments.iter_mut().enumerate() {
            let before = cursor;
            cursor.advance(segment);

            if index == 0 && segment.command == Command::MoveTo {
                continue;
            }

            if segment.absolute {
                segment.offset(-before.x, -before.y);
                segment.absolute = false;
            }
        }

        self
    }

    /// Rounds every argument to `precision` decimals. Arc rotation keeps two
    /// more decimals and arc flags are left alone.
    pub fn round(mut self, precision: u8) -> Self {
        for segment in &mut self.segments {
            let is_arc = segment.command == Command::EllipticalArc;

            for (index, arg) in segment.args.iter_mut().enumerate() {
                *arg = match (is_arc, index) {
                    (true, 2) => round_to(*arg, precision.saturating_add(2)),
                    (true, 3 | 4) => *arg,
                    _ => round_to(*arg, precision),
                };
            }
        }

        self
    }

    /// Applies `transform` to every segment. A leading relative moveto is
    /// treated as absolute, since it is relative to the origin.
    pub fn transform(mut self, transform: &Transform) -> Self {
        for (index, segment) in self.segments.iter_mut().enumerate() {
            let relative = !segment.absolute && !(index == 0 && segment.command == Command::MoveTo);
            transform.apply(segment, relative);
        }

        self
    }

    /// Transforms the path and brings it to its canonical form: relative
    /// commands with every coordinate rounded to `precision` decimals.
    ///
    /// Rounding happens on absolute coordinates so errors do not accumulate along
    /// the path, and the relative deltas are rounded again to drop float noise
    /// from the subtraction.
    pub fn canonicalize(self, transform: &Transform, precision: u8) -> Self {
        self.transform(transform)
            .abs()
            .round(precision)
            .rel()
            .round(precision)
    }

    /// Removes a leading subpath that traces the `(0, 0)`-`(width, height)`
    /// rectangle, as long as another subpath follows it. The result is absolute.
    ///
    /// The subpath has to visit all four corners with straight horizontal or
    /// vertical edges, so a triangle sitting in a corner is kept.
    ///
    /// Returns `None` when there is no such bounding box.
    pub fn strip_bounding_box(&self, width: f64, height: f64) -> Option<Self> {
        if !self.starts_at_origin() {
            return None;
        }

        let absolute = self.clone().abs();
        let segments = &absolute.segments;

        let end = segments
            .iter()
            .skip(1)
            .position(|s| s.command == Command::MoveTo)?
            + 1;

        let outline = &segments[..end];
        if outline.last()?.command != Command::ClosePath {
            return None;
        }

        let same = |a: f64, b: f64| (a - b).abs() < EPSILON;
        let corners = [(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)];
        let mut visited = [false; 4];
        let mut cursor = Cursor::default();

        for segment in outline {
            if !matches!(
                segment.command,
                Command::MoveTo
                    | Command::LineTo
                    | Command::HorizontalLineTo
                    | Command::VerticalLineTo
                    | Command::ClosePath
            ) {
                return None;
            }

            let before = cursor;
            cursor.advance(segment);

            let axis_aligned = same(before.x, cursor.x) || same(before.y, cursor.y);
            if segment.command != Command::MoveTo && !axis_aligned {
                return None;
            }

            let corner = corners
                .iter()
                .position(|&(x, y)| same(cursor.x, x) && same(cursor.y, y))?;
            visited[corner] = true;
        }

        if !visited.iter().all(|&corner| corner) {
            return None;
        }

        Some(Self {
            segments: segments[end..].to_vec(),
        })
    }
}

impl fmt::Display for PathData {
    /// Writes the most compact form: repeated command letters are omitted and
    /// separators are only written where a number would otherwise merge with
    /// the previous one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut previous = None;

        for segment in &self.segments {
            let letter = segment.letter();
            let repeated = previous == Some(letter)
                && !matches!(segment.command, Command::MoveTo | Command::ClosePath);

            if !repeated {
                // FontForge misreads "zm" when importing.
                if letter == 'm' && previous == Some('z') {
                    f.write_char(' ')?;
                }
                f.write_char(letter)?;
            }

            for (index, &arg) in segment.args.iter().enumerate() {
                if (index > 0 || repeated) && arg >= 0.0 {
                    f.write_char(' ')?;
                }
                write!(f, "{}", Number(arg))?;
            }

            previous = Some(letter);
        }

        Ok(())
    }
}

/// Displays a number in its shortest form, without a sign on zero.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Number(pub f64);

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            f.write_char('0')
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Rounds half away from zero to `precision` decimals.
pub fn round_to(value: f64, precision: u8) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;

    // Avoids -0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::{Number, PathData, Transform};

    fn parse(input: &str) -> PathData {
        PathData::parse(input).unwrap()
    }

    #[test_case(1.5, 0 => 2.0; "half rounds up")]
    #[test_case(-1.5, 0 => -2.0; "negative half rounds away from zero")]
    #[test_case(12.34, 1 => 12.3; "one decimal")]
    #[test_case(-0.04, 1 => 0.0; "negative zero is dropped")]
    fn round_to(value: f64, precision: u8) -> f64 {
        super::round_to(value, precision)
    }

    #[test_case(0.0 => "0"; "zero")]
    #[test_case(-0.0 => "0"; "negative zero")]
    #[test_case(1000.0 => "1000"; "integer")]
    #[test_case(-0.5 => "-0.5"; "negative fraction")]
    fn number(value: f64) -> String {
        Number(value).to_string()
    }

    #[test_case("M10 10L20 20" => "M10 10l10 10"; "absolute lineto")]
    #[test_case("m10 10l10 10" => "m10 10l10 10"; "already relative")]
    #[test_case("M0 0H10V10H0Z" => "M0 0h10v10h-10z"; "horizontal and vertical")]
    #[test_case("M0 0L10 0L10 10ZM20 20L30 20" => "M0 0l10 0 0 10z m20 20l10 0"; "space between z and m")]
    #[test_case("M0 0L5 -5L10 0" => "M0 0l5-5 5 5"; "negative numbers need no separator")]
    fn rel(input: &str) -> String {
        parse(input).rel().to_string()
    }

    #[test_case("m10 10l10 10h5v-5z" => "M10 10L20 20H25V15Z"; "relative chain")]
    #[test_case("M0 0l10 0zm5 5l1 1" => "M0 0L10 0ZM5 5L6 6"; "moveto after close starts at subpath start")]
    #[test_case("M0 0a5 5 0 0 1 10 10" => "M0 0A5 5 0 0 1 10 10"; "arc endpoint only")]
    fn abs(input: &str) -> String {
        parse(input).abs().to_string()
    }

    #[test]
    fn transform_scales_relative_and_translates_absolute() {
        let path = parse("M10 10l10 0H40V0a5 10 45 1 0 10 10").transform(&Transform::new(2.0, 1.0, 3.0));

        assert_eq!(path.to_string(), "M21 23l20 0H81V3a10 20 45 1 0 20 20");
    }

    #[test]
    fn leading_relative_moveto_is_translated() {
        let path = parse("m10 10").transform(&Transform::new(1.0, 5.0, 5.0));

        assert_eq!(path.to_string(), "m15 15");
    }

    #[test]
    fn canonical_form_has_no_float_noise() {
        let path = parse("M0.1 0.2L0.3 0.4L0.7 0.9").canonicalize(&Transform::new(1.0, 0.0, 0.0), 1);

        assert_eq!(path.to_string(), "M0.1 0.2l0.2 0.2 0.4 0.5");
    }

    #[test]
    fn canonicalize_is_deterministic() {
        let input = "M5,5 L19,5 C19.3,7.1 12.25,17.75 5,19 Q3 3 7.5 2.25 Z";
        let transform = Transform::placement(1000.0, 0.8, -150.0);

        let first = parse(input).canonicalize(&transform, 0).to_string();
        let second = parse(input).canonicalize(&transform, 0).to_string();

        assert_eq!(first, second);
        assert_eq!(
            parse(&first).canonicalize(&Transform::new(1.0, 0.0, 0.0), 0).to_string(),
            first
        );
    }

    #[test]
    fn placement_centers_the_icon() {
        let path = parse("M0 0L1000 1000").canonicalize(&Transform::placement(1000.0, 0.8, -150.0), 0);

        assert_eq!(path.to_string(), "M100-50l800 800");
    }

    #[test]
    fn normalize_scales_to_viewbox() {
        let path = parse("M12 0L24 24").canonicalize(&Transform::normalize(24.0), 1);

        assert_eq!(path.to_string(), "M500 0l500 1000");
    }

    #[test]
    fn strips_embedded_bounding_box() {
        let path = parse("M0,0 L24,0 L24,24 L0,24 Z M5,5 L19,5 L19,19 Z");

        assert_eq!(
            path.strip_bounding_box(24.0, 24.0).unwrap().to_string(),
            "M5 5L19 5 19 19Z"
        );
    }

    #[test_case("M0,0 L24,0 L24,24 L0,24 Z"; "nothing follows")]
    #[test_case("M0,0 L12,0 L12,12 Z M5,5 L19,5"; "not the artboard")]
    #[test_case("M0,0 L24,24 L0,24 M5,5 L19,5"; "not closed")]
    #[test_case("M1,1 L24,1 L24,24 Z M5,5 L19,5"; "not at origin")]
    #[test_case("M0,0 C24,0 24,24 0,24 Z M5,5 L19,5"; "curved")]
    #[test_case("M0,0 L0,24 L24,24 Z M5,5 L9,5 L9,9 Z"; "triangle in the corner")]
    #[test_case("M0,0 L24,24 L24,0 L0,24 Z M5,5 L19,5"; "diagonal through every corner")]
    #[test_case("M0,0 L24,0 L24,24 L24,0 Z M5,5 L19,5"; "three corners and back")]
    fn keeps_real_outlines(input: &str) {
        assert_eq!(parse(input).strip_bounding_box(24.0, 24.0), None);
    }

    #[test_case("M0 0A5.4 5.6 12.3456 1 0 10.4 10.6", 0 => "M0 0A5 6 12.35 1 0 10 11"; "rotation keeps two more decimals")]
    #[test_case("M0 0A5.4 5.6 12.3456 1 0 10.4 10.6", 1 => "M0 0A5.4 5.6 12.346 1 0 10.4 10.6"; "one decimal")]
    #[test_case("M0 0a5 5 0.004 0 1 10 10", 0 => "M0 0a5 5 0 0 1 10 10"; "small rotation")]
    fn round_arc(input: &str, precision: u8) -> String {
        parse(input).round(precision).to_string()
    }

    #[test]
    fn round_leaves_arc_flags_alone() {
        let path = parse("M0 0a5.5 5.5 0 1 1 10 10a5 5 0 0 0 1 1").round(0);

        assert_eq!(path.segments[1].args[3..5], [1.0, 1.0]);
        assert_eq!(path.segments[2].args[3..5], [0.0, 0.0]);
    }

    #[test_case("L10 10"; "no leading moveto")]
    #[test_case("M0 0 L10 #"; "unknown character")]
    #[test_case("M1e400 0L1 1"; "overflowing coordinate")]
    fn rejects(input: &str) {
        assert!(PathData::parse(input).is_err());
    }
}
