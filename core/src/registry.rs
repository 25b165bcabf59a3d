//! Named transforms, transform groups and formats.
//!
//! A [`Registry`] is built once at start-up and handed to every build by
//! reference; nothing is registered globally.

use indexmap::IndexMap;

use crate::{
    error::{Error, Result},
    format::{self, FormatFn},
    transform::{self, Transform},
};

const BUILTIN_GROUPS: &[(&str, &[&str])] = &[
    (
        "styleguide",
        &["attribute/cti", "name/kebab", "size/px", "color/css"],
    ),
    ("tokens-js", &["name/constant", "size/px", "color/hex"]),
    (
        "tokens-json",
        &["attribute/cti", "name/kebab", "size/px", "color/css"],
    ),
    (
        "tokens-scss",
        &["name/kebab", "time/seconds", "size/px", "color/css"],
    ),
    ("tokens-ios", &["attribute/cti", "name/camel", "size/pxToPt"]),
    (
        "tokens-android",
        &["attribute/cti", "name/camel", "size/pxToDp"],
    ),
];

#[derive(Clone, Default)]
pub struct Registry {
    transforms: IndexMap<String, Transform>,
    groups: IndexMap<String, Vec<String>>,
    formats: IndexMap<String, FormatFn>,
}
impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("transforms", &self.transforms.keys().collect::<Vec<_>>())
            .field("groups", &self.groups)
            .field("formats", &self.formats.keys().collect::<Vec<_>>())
            .finish()
    }
}
impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in transforms, transform groups and formats.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, transform) in transform::builtins() {
            registry.register_transform(name, transform);
        }
        for (name, transforms) in BUILTIN_GROUPS {
            registry.register_group(name, transforms.iter().copied());
        }
        registry
            .register_format("scss/css-variables", format::css_variables)
            .register_format("android/xml", format::android_xml)
            .register_format("ios/plist-alias", format::ios_plist_alias)
            .register_format("json/flat", format::json_flat)
            .register_format("scss/variables", format::scss_variables)
            .register_format("javascript/es6", format::javascript_es6);
        registry
    }

    pub fn register_transform(&mut self, name: &str, transform: Transform) -> &mut Self {
        self.transforms.insert(name.to_string(), transform);
        self
    }
    pub fn register_group<'a>(
        &mut self,
        name: &str,
        transforms: impl IntoIterator<Item = &'a str>,
    ) -> &mut Self {
        self.groups.insert(
            name.to_string(),
            transforms.into_iter().map(|x| x.to_string()).collect(),
        );
        self
    }
    pub fn register_format(&mut self, name: &str, format: FormatFn) -> &mut Self {
        self.formats.insert(name.to_string(), format);
        self
    }

    pub fn transform(&self, name: &str) -> Option<&Transform> {
        self.transforms.get(name)
    }
    pub fn format(&self, name: &str) -> Result<FormatFn> {
        self.formats
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownFormat(name.to_string()))
    }

    /// The transforms of a group, in application order.
    pub fn pipeline(&self, group: &str) -> Result<Vec<Transform>> {
        self.groups
            .get(group)
            .ok_or_else(|| Error::UnknownTransformGroup(group.to_string()))?
            .iter()
            .map(|name| {
                self.transform(name)
                    .copied()
                    .ok_or_else(|| Error::UnknownTransform(name.clone()))
            })
            .collect()
    }
}
