pub mod svg_font;
