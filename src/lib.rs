//! # wrap-i18n — Locale plugin for wrap content pipelines
//!
//! A plugin that extends a wrap-style document pipeline with locale
//! semantics:
//!
//! - **Id prefixing**: container ids are prefixed with the current locale
//!   (`en-doc1`) before load and save.
//! - **Locale stamping**: at adapter pre-save, the record is stamped with
//!   the locale and a `path` holding the id with the prefix stripped.
//! - **Post-load translation**: one content field can be run through a
//!   host-supplied translation function after load.
//! - **Typed lifecycle hooks**: containers and adapters invoke hooks
//!   synchronously through per-point traits instead of string-keyed
//!   event callbacks.
//!
//! Every hook degrades gracefully: missing locale, id, or record means a
//! logged no-op, never a failure in the host pipeline.
//!
//! # Quick Start
//!
//! ```rust
//! use wrap_i18n::{plugin, I18nConfig, Wrap};
//!
//! let mut wrap = Wrap::new();
//! let i18n = plugin(I18nConfig::default());
//! wrap.register_plugin(&i18n).unwrap();
//!
//! wrap.set_locale(Some("de-CH"));
//! assert_eq!(wrap.get_locale(), Some("de-CH"));
//! ```

pub mod config;
pub mod error;
pub mod hooks;
pub mod host;
pub mod plugin;
pub mod session;
pub mod wrap;

pub use config::I18nConfig;
pub use error::PluginError;
pub use hooks::{AdapterHooks, ContainerHooks, WrapHooks};
pub use host::{Adapter, Container, FlowController, SaveRequest};
pub use plugin::{plugin, I18nPlugin, PluginContext, PluginMetadata, WrapPlugin, WRAP_PLUGIN_API};
pub use session::{I18nBundle, LocaleSession, Translate};
pub use wrap::Wrap;
