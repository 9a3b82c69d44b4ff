//! Reads SVG path data (the `d` attribute of `<path>`) into [`Segment`]s.
//!
//! Tokenizing is left to `svgtypes`, which knows the SVG 1.1 grammar:
//! commands may repeat their arguments without repeating the letter, extra
//! coordinate pairs after a moveto become linetos, and arc flags may be written
//! without separators (`a1 1 0 01 10 10`).
//!
//! ```rust
//! # use svg_font::parser::path_data::path_data;
//! # use svg_font::path::{Command, Segment};
//! let segments = path_data("M0,0 10 10z").unwrap();
//!
//! assert_eq!(segments, vec![
//!     Segment::new(Command::MoveTo, true, vec![0.0, 0.0]),
//!     Segment::new(Command::LineTo, true, vec![10.0, 10.0]),
//!     Segment::new(Command::ClosePath, false, vec![]),
//! ]);
//! ```

use svgtypes::{PathParser, PathSegment};

use crate::path::{Command, PathDataError, Segment};

/// Parses a complete path data string. The first command has to be a moveto.
pub fn path_data(input: &str) -> Result<Vec<Segment>, PathDataError> {
    PathParser::from(input)
        .map(|segment| {
            segment
                .map_err(|e| PathDataError::Syntax(e.to_string()))
                .and_then(segment_from)
        })
        .collect()
}

fn segment_from(segment: PathSegment) -> Result<Segment, PathDataError> {
    let flag = |set: bool| if set { 1.0 } else { 0.0 };

    let (command, absolute, args) = match segment {
        PathSegment::MoveTo { abs, x, y } => (Command::MoveTo, abs, vec![x, y]),
        PathSegment::LineTo { abs, x, y } => (Command::LineTo, abs, vec![x, y]),
        PathSegment::HorizontalLineTo { abs, x } => (Command::HorizontalLineTo, abs, vec![x]),
        PathSegment::VerticalLineTo { abs, y } => (Command::VerticalLineTo, abs, vec![y]),
        PathSegment::CurveTo {
            abs,
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        } => (Command::CurveTo, abs, vec![x1, y1, x2, y2, x, y]),
        PathSegment::SmoothCurveTo { abs, x2, y2, x, y } => {
            (Command::SmoothCurveTo, abs, vec![x2, y2, x, y])
        }
        PathSegment::Quadratic { abs, x1, y1, x, y } => {
            (Command::Quadratic, abs, vec![x1, y1, x, y])
        }
        PathSegment::SmoothQuadratic { abs, x, y } => (Command::SmoothQuadratic, abs, vec![x, y]),
        PathSegment::EllipticalArc {
            abs,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x,
            y,
        } => (
            Command::EllipticalArc,
            abs,
            vec![rx, ry, x_axis_rotation, flag(large_arc), flag(sweep), x, y],
        ),
        PathSegment::ClosePath { abs } => (Command::ClosePath, abs, vec![]),
    };

    // `1e400` parses to infinity, which would end up as "inf" in the font.
    if let Some(value) = args.iter().find(|value| !value.is_finite()) {
        return Err(PathDataError::OutOfRange(value.to_string()));
    }

    Ok(Segment::new(command, absolute, args))
}
