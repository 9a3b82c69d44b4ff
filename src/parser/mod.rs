//! Parsers for the two textual inputs of a build: icon files and the path data inside them.

pub mod icon;
pub mod path_data;
