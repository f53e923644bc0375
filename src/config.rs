use serde::{Deserialize, Serialize};

use crate::error::PluginError;

fn default_locale_field() -> String {
    "locale".to_string()
}

fn default_path_field() -> String {
    "path".to_string()
}

/// Configuration for the i18n plugin.
///
/// Field names refer to keys on the persisted record; `translate_field`
/// names the content field to run through the translator after load and
/// leaves the translation pass disabled when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    /// Record field that receives the current locale on save.
    #[serde(default = "default_locale_field")]
    pub locale_field: String,
    /// Record field that receives the id with the locale prefix stripped.
    #[serde(default = "default_path_field")]
    pub path_field: String,
    /// Content field to translate after load, if any.
    #[serde(default)]
    pub translate_field: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale_field: default_locale_field(),
            path_field: default_path_field(),
            translate_field: None,
        }
    }
}

impl I18nConfig {
    pub(crate) fn validate(&self) -> Result<(), PluginError> {
        if self.locale_field.is_empty() {
            return Err(PluginError::InvalidConfig("locale_field must not be empty".into()));
        }
        if self.path_field.is_empty() {
            return Err(PluginError::InvalidConfig("path_field must not be empty".into()));
        }
        if matches!(&self.translate_field, Some(field) if field.is_empty()) {
            return Err(PluginError::InvalidConfig("translate_field must not be empty".into()));
        }
        Ok(())
    }
}
