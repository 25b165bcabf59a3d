//! Design-token build engine.
//!
//! Token sources are merged into a [`Dictionary`], run through a named
//! transform group and rendered by named formats. Formats that preserve
//! references rewrite each `{a.b.c}` in the target's idiom: `var(--name)`
//! for CSS, `@color/name` for Android resources, the bare alias name for iOS
//! property lists.
//!
//! ```no_run
//! use design_tokens_core::{BuildConfig, Builder, Registry};
//!
//! let registry = Registry::with_builtins();
//! let config = BuildConfig::builtin()?;
//! Builder::new(&registry, &config, ".").build("brand#1", "android")?;
//! # Ok::<(), design_tokens_core::Error>(())
//! ```

mod builder;
pub mod classify;
pub mod config;
mod dictionary;
pub mod error;
pub mod expression;
pub mod format;
mod registry;
mod resolve;
pub mod source;
mod token;
pub mod transform;

pub use builder::{Builder, RenderedFile};
pub use config::BuildConfig;
pub use dictionary::{Dictionary, TokenFilter};
pub use error::{Error, Result};
pub use registry::Registry;
pub use token::{Original, Token, TokenValue};
