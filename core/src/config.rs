//! Build configuration.
//!
//! Describes which sources make up a brand/platform dictionary and which
//! outputs are rendered from it. Loaded from TOML; `{brand}` and
//! `{platform}` placeholders in source patterns, build paths and file
//! destinations are substituted per build.

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::info;
use serde::Deserialize;

use crate::{
    dictionary::TokenFilter,
    error::{Error, Result},
    format::FormatOptions,
};

const DEFAULT_CONFIG: &str = include_str!("../default.toml");

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub brands: Vec<String>,
    pub platforms: Vec<String>,
    /// Source globs, relative to the project root, lowest precedence first.
    pub sources: Vec<String>,
    /// Platform name to the outputs built for it, in order.
    pub builds: IndexMap<String, Vec<String>>,
    pub outputs: IndexMap<String, OutputConfig>,
}
impl BuildConfig {
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }
    pub fn parse(data: &str) -> Result<Self> {
        Ok(toml::from_str(data)?)
    }
    pub fn load(path: &Path) -> Result<Self> {
        info!(path = path.display().to_string(); "Loading configuration");
        Self::parse(&fs::read_to_string(path)?)
    }

    pub fn sources(&self, brand: &str, platform: &str) -> Vec<String> {
        self.sources
            .iter()
            .map(|pattern| expand(pattern, brand, platform))
            .collect()
    }
    pub fn builds(&self, platform: &str) -> &[String] {
        self.builds
            .get(platform)
            .map(|x| x.as_slice())
            .unwrap_or_default()
    }
    pub fn output(&self, name: &str) -> Result<&OutputConfig> {
        self.outputs
            .get(name)
            .ok_or_else(|| Error::UnknownOutput(name.to_string()))
    }
}

/// One named output target: a transform group and the files it renders.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub transform_group: String,
    pub build_path: String,
    /// Prepended to every token name by the name transforms.
    pub prefix: Option<String>,
    pub files: Vec<FileConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub destination: String,
    pub format: String,
    pub filter: Option<TokenFilter>,
    #[serde(default)]
    pub options: FormatOptions,
}

pub fn expand(template: &str, brand: &str, platform: &str) -> String {
    template
        .replace("{brand}", brand)
        .replace("{platform}", platform)
}
