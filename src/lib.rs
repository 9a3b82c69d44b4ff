//! Builds an SVG font out of a directory of SVG icons.
//!
//! A YAML [manifest] lists the icons by file name together with the codepoint
//! each one gets. Every icon is [parsed](parser::icon::Icon::parse), placed in
//! the glyph box and canonicalized by the [`path`] transforms, then the
//! [renderer](render::svg_font::SvgFont) writes them all into one document.
//!
//! [`build::build_font`] runs the whole thing.

#[cfg(test)]
#[macro_use]
extern crate test_case;

#[macro_use]
extern crate log;

pub mod build;
pub mod error;
pub mod glyph;
pub mod manifest;
pub mod parser;
pub mod path;
pub mod render;

pub use error::Error;
