//! Ties the manifest, the icon files and the renderer together.

use std::{
    fs::{self, read_to_string},
    path::{Path, PathBuf},
};

use crate::{
    glyph::Glyph,
    manifest::{Config, GlyphEntry, RawManifest},
    parser::icon::Icon,
    render::svg_font::SvgFont,
    Error,
};

/// Icon source directories, searched in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconDirs(Vec<PathBuf>);

impl IconDirs {
    pub fn new(dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self(dirs.into_iter().map(Into::into).collect())
    }

    /// Returns the first `<dir>/<codename>.svg` that exists.
    pub fn locate(&self, codename: &str) -> Result<PathBuf, Error> {
        let file_name = format!("{codename}.svg");

        self.0
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|path| path.is_file())
            .ok_or_else(|| Error::MissingIcon {
                codename: codename.to_string(),
            })
    }

    /// Locates and reads the icon of `entry`.
    pub fn load(&self, entry: &GlyphEntry) -> Result<(PathBuf, String), Error> {
        let path = self.locate(&entry.codename)?;
        let markup = read_to_string(&path).map_err(Error::io(&path))?;

        Ok((path, markup))
    }

    /// SVG files in the directories that the manifest does not list, sorted.
    /// Fails if a directory can't be read.
    pub fn unreferenced(&self, manifest: &Config) -> Result<Vec<PathBuf>, Error> {
        let mut unreferenced = Vec::new();

        for dir in &self.0 {
            for dir_entry in fs::read_dir(dir).map_err(Error::io(dir))? {
                let path = dir_entry.map_err(Error::io(dir))?.path();

                let is_svg = path.extension().is_some_and(|ext| ext == "svg");
                let listed = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| manifest.contains(stem));

                if is_svg && !listed {
                    unreferenced.push(path);
                }
            }
        }

        unreferenced.sort();
        Ok(unreferenced)
    }
}

/// Builds the glyphs of a validated manifest.
pub struct Builder<'a> {
    manifest: &'a Config,
}

impl<'a> Builder<'a> {
    pub fn new(manifest: &'a Config) -> Self {
        Self { manifest }
    }

    /// Parses and places a single icon.
    pub fn glyph(&self, entry: &GlyphEntry, source: &Path, markup: &str) -> Result<Glyph, Error> {
        debug!("Reading {} from {}", entry.codename, source.display());

        let icon = Icon::parse(markup, source)?;

        Ok(Glyph::place(icon, entry, &self.manifest.font))
    }

    /// Builds every glyph in manifest order. `load` returns the path and
    /// contents of an entry's icon. Stops at the first error.
    pub fn build<F>(&self, mut load: F) -> Result<SvgFont<'a>, Error>
    where
        F: FnMut(&GlyphEntry) -> Result<(PathBuf, String), Error>,
    {
        let glyphs = self
            .manifest
            .glyphs
            .iter()
            .map(|entry| {
                let (source, markup) = load(entry)?;
                self.glyph(entry, &source, &markup)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SvgFont::new(&self.manifest.font, glyphs))
    }
}

/// Runs a whole build: loads the manifest, converts every icon found in
/// `inputs` and writes the font to `output`. Nothing is written unless every
/// glyph converted.
pub fn build_font(manifest: &Path, inputs: &[PathBuf], output: &Path) -> Result<(), Error> {
    let manifest = RawManifest::load(manifest)?.validate()?;
    info!(
        "Loaded {} glyphs for font {} from {}",
        manifest.glyphs.len(),
        manifest.font.name,
        manifest.path.display()
    );

    let dirs = IconDirs::new(inputs);
    for path in dirs.unreferenced(&manifest)? {
        warn!("{} is not listed in the manifest", path.display());
    }

    let svg = Builder::new(&manifest)
        .build(|entry| dirs.load(entry))?
        .to_string();

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(Error::io(parent))?;
    }

    fs::write(output, svg).map_err(Error::io(output))?;
    info!("Wrote {}", output.display());

    Ok(())
}
