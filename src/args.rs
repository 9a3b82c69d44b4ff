use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Converts a set of SVG icons into a single SVG font.
#[derive(Parser)]
#[clap(version, about)]
pub struct Args {
    /// Directories containing one `<codename>.svg` per glyph, searched in order.
    #[clap(long, short = 'i', required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Where to write the font.
    #[clap(long, short = 'o')]
    pub output: PathBuf,

    /// The glyph manifest.
    #[clap(long, short = 'c', default_value = "config.yml")]
    pub config: PathBuf,

    /// Log more, repeat for even more.
    #[clap(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
