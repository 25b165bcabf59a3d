//! Brand × platform build orchestration.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use crate::{
    config::{expand, BuildConfig},
    error::{Error, Result},
    format::FormatContext,
    source::{self, Group},
    Dictionary, Registry,
};

/// A rendered file, `path` relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: PathBuf,
    pub contents: String,
}

pub struct Builder<'a> {
    registry: &'a Registry,
    config: &'a BuildConfig,
    root: PathBuf,
}
impl<'a> Builder<'a> {
    pub fn new(registry: &'a Registry, config: &'a BuildConfig, root: impl Into<PathBuf>) -> Self {
        Builder {
            registry,
            config,
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The merged, untransformed dictionary of one brand/platform.
    pub fn dictionary(&self, brand: &str, platform: &str) -> Result<Dictionary> {
        let files = source::discover(&self.root, &self.config.sources(brand, platform))?;
        info!(brand, platform, files = files.len(); "Merging token sources");
        Dictionary::new(Group::load_layers(&files)?.flatten())
    }

    /// Renders every file of the named output without touching the disk.
    pub fn render(
        &self,
        dictionary: &Dictionary,
        output: &str,
        brand: &str,
        platform: &str,
    ) -> Result<Vec<RenderedFile>> {
        let output = self.config.output(output)?;
        let pipeline = self.registry.pipeline(&output.transform_group)?;
        let dictionary = dictionary.transform(&pipeline, output.prefix.as_deref())?;
        let build_path = PathBuf::from(expand(&output.build_path, brand, platform));

        output
            .files
            .iter()
            .map(|file| -> Result<RenderedFile> {
                let format = self.registry.format(&file.format)?;
                let mut context = FormatContext::new(&dictionary, &file.options);
                context.tokens = dictionary.filtered(file.filter.as_ref());
                Ok(RenderedFile {
                    path: build_path.join(expand(&file.destination, brand, platform)),
                    contents: format(&context)?,
                })
            })
            .collect()
    }

    /// Builds every output configured for `platform` and writes the files,
    /// replacing existing ones.
    pub fn build(&self, brand: &str, platform: &str) -> Result<Vec<PathBuf>> {
        let dictionary = self.dictionary(brand, platform)?;
        let mut written = Vec::new();
        for output in self.config.builds(platform) {
            info!(brand, platform, output = output.as_str(); "Building output");
            for file in self.render(&dictionary, output, brand, platform)? {
                let path = self.root.join(&file.path);
                write_file(&path, &file.contents).map_err(|source| Error::WriteOutput {
                    path: path.clone(),
                    source,
                })?;
                debug!(path = path.display().to_string(); "Wrote file");
                written.push(path);
            }
        }
        Ok(written)
    }

    /// Builds every configured platform × brand combination, restricted to
    /// `brands` / `platforms` when those are not empty.
    pub fn build_all(&self, brands: &[String], platforms: &[String]) -> Result<Vec<PathBuf>> {
        let selected = |wanted: &[String], name: &String| wanted.is_empty() || wanted.contains(name);
        let mut written = Vec::new();
        for platform in self.config.platforms.iter().filter(|x| selected(platforms, *x)) {
            for brand in self.config.brands.iter().filter(|x| selected(brands, *x)) {
                info!(brand = brand.as_str(), platform = platform.as_str(); "Processing");
                written.extend(self.build(brand, platform)?);
            }
        }
        Ok(written)
    }
}

fn write_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
