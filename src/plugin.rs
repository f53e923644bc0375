//! The locale prefixing plugin and the plugin registration contract.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::config::I18nConfig;
use crate::error::PluginError;
use crate::hooks::{AdapterHooks, ContainerHooks, WrapHooks};
use crate::host::{Container, SaveRequest};
use crate::session::LocaleSession;

/// Api tag every wrap plugin must carry to be accepted by
/// [`Wrap::register_plugin`](crate::Wrap::register_plugin).
pub const WRAP_PLUGIN_API: &str = "wrap-plugin";

/// Plugin identity and registration metadata.
#[derive(Debug, Clone)]
pub struct PluginMetadata {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    /// Registration contract tag, checked against [`WRAP_PLUGIN_API`].
    pub api: String,
}

/// Unified plugin interface.
pub trait WrapPlugin: Send + Sync {
    fn metadata(&self) -> &PluginMetadata;

    fn install(&self, context: &mut PluginContext<'_>) -> Result<(), PluginError>;
}

/// Mutable context passed to [`WrapPlugin::install`].
///
/// Provides methods for registering container, adapter, and wrap hooks.
/// Container and adapter hooks are held pending until the wrap's first
/// pre-load, when they attach to whatever containers exist by then.
pub struct PluginContext<'a> {
    plugin_id: String,
    container_hooks: &'a mut Vec<Arc<dyn ContainerHooks>>,
    adapter_hooks: &'a mut Vec<Arc<dyn AdapterHooks>>,
    wrap_hooks: &'a mut Vec<Arc<dyn WrapHooks>>,
}

impl<'a> PluginContext<'a> {
    pub(crate) fn new(
        plugin_id: String,
        container_hooks: &'a mut Vec<Arc<dyn ContainerHooks>>,
        adapter_hooks: &'a mut Vec<Arc<dyn AdapterHooks>>,
        wrap_hooks: &'a mut Vec<Arc<dyn WrapHooks>>,
    ) -> Self {
        Self {
            plugin_id,
            container_hooks,
            adapter_hooks,
            wrap_hooks,
        }
    }

    /// Return the id of the plugin currently being installed.
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    pub fn register_container_hooks(&mut self, hooks: Arc<dyn ContainerHooks>) {
        debug!(plugin_id = %self.plugin_id, hooks = hooks.name(), "register container hooks");
        self.container_hooks.push(hooks);
    }

    pub fn register_adapter_hooks(&mut self, hooks: Arc<dyn AdapterHooks>) {
        debug!(plugin_id = %self.plugin_id, hooks = hooks.name(), "register adapter hooks");
        self.adapter_hooks.push(hooks);
    }

    pub fn register_wrap_hooks(&mut self, hooks: Arc<dyn WrapHooks>) {
        debug!(plugin_id = %self.plugin_id, hooks = hooks.name(), "register wrap hooks");
        self.wrap_hooks.push(hooks);
    }
}

/// Build the i18n plugin from a configuration.
///
/// The plugin:
/// - prefixes container ids with the current locale before load and save,
/// - stamps `locale` and a prefix-stripped `path` onto records at adapter
///   pre-save,
/// - optionally translates one content field after load.
pub fn plugin(config: I18nConfig) -> I18nPlugin {
    I18nPlugin::new(config)
}

/// Locale prefixing plugin. See [`plugin`].
pub struct I18nPlugin {
    metadata: PluginMetadata,
    config: I18nConfig,
}

impl I18nPlugin {
    pub fn new(config: I18nConfig) -> Self {
        Self {
            metadata: PluginMetadata {
                id: "wrap-i18n".to_string(),
                name: "Wrap i18n".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: "Locale id prefixing, locale stamping, and post-load translation"
                    .to_string(),
                api: WRAP_PLUGIN_API.to_string(),
            },
            config,
        }
    }
}

impl WrapPlugin for I18nPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.metadata
    }

    fn install(&self, context: &mut PluginContext<'_>) -> Result<(), PluginError> {
        self.config.validate()?;

        context.register_container_hooks(Arc::new(LocalePrefix));
        context.register_adapter_hooks(Arc::new(LocaleStamp {
            locale_field: self.config.locale_field.clone(),
            path_field: self.config.path_field.clone(),
        }));
        if let Some(field) = &self.config.translate_field {
            context.register_wrap_hooks(Arc::new(TranslateContent {
                field: field.clone(),
            }));
        }
        Ok(())
    }
}

/// Prefixes the container id with `<locale>-` before load and save.
struct LocalePrefix;

impl ContainerHooks for LocalePrefix {
    fn before_load(&self, session: &LocaleSession, container: &mut dyn Container) {
        prefix_container_id(session, container, "pre-load");
    }

    fn before_save(&self, session: &LocaleSession, container: &mut dyn Container) {
        prefix_container_id(session, container, "pre-save");
    }

    fn name(&self) -> &str {
        "i18n-locale-prefix"
    }
}

fn prefix_container_id(session: &LocaleSession, container: &mut dyn Container, event: &str) {
    let locale = session.locale();
    let id = container.id();
    debug!(event, ?id, ?locale, "container id prefix check");
    let (Some(locale), Some(id)) = (locale, id) else {
        return;
    };
    // id already starts with the locale
    if id.starts_with(locale) {
        return;
    }
    container.set_id(format!("{locale}-{id}"));
}

/// Stamps the current locale and the prefix-stripped id onto the record
/// at adapter pre-save.
struct LocaleStamp {
    locale_field: String,
    path_field: String,
}

impl AdapterHooks for LocaleStamp {
    fn before_save(&self, session: &LocaleSession, request: &mut SaveRequest<'_>) {
        let Some(record) = request.record.as_object_mut() else {
            debug!(id = %request.id, "save record is not an object");
            return;
        };
        let Some(locale) = session.locale() else {
            error!("locale not set at adapter pre-save");
            return;
        };
        // strip the first `<locale>-` occurrence from the id
        let path = request.id.replacen(&format!("{locale}-"), "", 1);
        debug!(locale = %locale, path = %path, "adapter pre-save stamp");
        record.insert(self.locale_field.clone(), Value::String(locale.to_string()));
        record.insert(self.path_field.clone(), Value::String(path));
    }

    fn name(&self) -> &str {
        "i18n-locale-stamp"
    }
}

/// Replaces one content field with its translation after load.
struct TranslateContent {
    field: String,
}

impl WrapHooks for TranslateContent {
    fn after_load(&self, session: &LocaleSession, content: &mut Value) {
        // translations are resolved server-side only; in the browser the
        // raw i18n keys stay editable
        if cfg!(target_arch = "wasm32") {
            return;
        }
        let Some(translator) = session.translator() else {
            return;
        };
        let Some(object) = content.as_object_mut() else {
            return;
        };
        let Some(text) = object.get(&self.field).and_then(Value::as_str) else {
            return;
        };
        let text = text.to_string();
        let translated = translator
            .translate(&text)
            .filter(|translated| !translated.is_empty());
        debug!(field = %self.field, text = %text, ?translated, "post-load translate");
        object.insert(
            self.field.clone(),
            Value::String(translated.unwrap_or(text)),
        );
    }

    fn name(&self) -> &str {
        "i18n-translate-content"
    }
}
