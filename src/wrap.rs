//! The wrap host object: session, containers, flow, plugins, dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use crate::error::PluginError;
use crate::hooks::{AdapterHooks, ContainerHooks, WrapHooks};
use crate::host::{Container, FlowController, SaveRequest};
use crate::plugin::{PluginContext, PluginMetadata, WrapPlugin, WRAP_PLUGIN_API};
use crate::session::{I18nBundle, LocaleSession};

struct ContainerSlot {
    container: Box<dyn Container>,
    hooks: Vec<Arc<dyn ContainerHooks>>,
    adapter_hooks: Vec<Arc<dyn AdapterHooks>>,
}

/// Central coordination object of the wrap framework, reduced to the
/// surface the i18n plugin extends: locale session state, the container
/// collection, the flow controllers, and synchronous lifecycle dispatch.
///
/// Container and adapter hooks registered by plugins stay pending until
/// the first [`pre_load`](Wrap::pre_load), because containers may not
/// exist yet when plugins are registered. Attachment happens exactly once
/// per wrap instance; containers added afterwards receive no hooks.
#[derive(Default)]
pub struct Wrap {
    session: LocaleSession,
    slots: Vec<ContainerSlot>,
    flow: Vec<Box<dyn FlowController>>,
    plugins: Vec<PluginMetadata>,
    pending_container_hooks: Vec<Arc<dyn ContainerHooks>>,
    pending_adapter_hooks: Vec<Arc<dyn AdapterHooks>>,
    wrap_hooks: Vec<Arc<dyn WrapHooks>>,
    hooks_attached: bool,
}

impl Wrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin against this wrap.
    ///
    /// Rejects plugins whose metadata does not carry the
    /// [`WRAP_PLUGIN_API`] tag, and duplicate plugin ids.
    pub fn register_plugin(&mut self, plugin: &dyn WrapPlugin) -> Result<(), PluginError> {
        let metadata = plugin.metadata().clone();
        if metadata.api != WRAP_PLUGIN_API {
            return Err(PluginError::ApiMismatch {
                expected: WRAP_PLUGIN_API.to_string(),
                actual: metadata.api,
            });
        }
        if self.plugins.iter().any(|known| known.id == metadata.id) {
            return Err(PluginError::Conflict(format!(
                "plugin '{}' already registered",
                metadata.id
            )));
        }

        let mut context = PluginContext::new(
            metadata.id.clone(),
            &mut self.pending_container_hooks,
            &mut self.pending_adapter_hooks,
            &mut self.wrap_hooks,
        );
        plugin.install(&mut context)?;

        debug!(plugin_id = %metadata.id, version = %metadata.version, "plugin registered");
        self.plugins.push(metadata);
        Ok(())
    }

    /// Metadata of every registered plugin.
    pub fn plugin_metadata(&self) -> &[PluginMetadata] {
        &self.plugins
    }

    pub fn add_container(&mut self, container: Box<dyn Container>) {
        self.slots.push(ContainerSlot {
            container,
            hooks: Vec::new(),
            adapter_hooks: Vec::new(),
        });
    }

    pub fn container(&self, index: usize) -> Option<&dyn Container> {
        self.slots.get(index).map(|slot| slot.container.as_ref())
    }

    pub fn container_count(&self) -> usize {
        self.slots.len()
    }

    /// Register a controller in the wrap's flow; it receives every locale
    /// change made through [`set_locale`](Wrap::set_locale).
    pub fn add_flow_controller(&mut self, controller: Box<dyn FlowController>) {
        self.flow.push(controller);
    }

    /// Locale session read by all hooks.
    pub fn session(&self) -> &LocaleSession {
        &self.session
    }

    /// Set the current locale and forward it to every flow controller.
    /// Chainable; `None` is a no-op besides returning self.
    pub fn set_locale(&mut self, value: Option<&str>) -> &mut Self {
        debug!(?value, "wrap set_locale");
        if let Some(value) = value {
            self.session.set_locale(value);
            for controller in &mut self.flow {
                debug!(controller = controller.name(), locale = %value, "forward locale to flow");
                controller.set_locale(value);
            }
        }
        self
    }

    /// Alias for [`set_locale`](Wrap::set_locale).
    pub fn locale(&mut self, value: Option<&str>) -> &mut Self {
        self.set_locale(value)
    }

    /// Current locale, e.g. `en` or `en-GB`, or `None` when unset.
    pub fn get_locale(&self) -> Option<&str> {
        self.session.locale()
    }

    /// Initialize the wrap for i18n from a bundle of locale, locale list,
    /// and translation function. Logs and returns self unchanged when no
    /// bundle is provided.
    pub fn i18n(&mut self, bundle: Option<I18nBundle>) -> &mut Self {
        let Some(bundle) = bundle else {
            error!("no i18n bundle provided");
            return self;
        };
        debug!(locale = ?bundle.locale, locales = ?bundle.locales, "applying i18n bundle");
        self.set_locale(bundle.locale.as_deref());
        self.session.set_locales(bundle.locales);
        self.session.set_translator(bundle.translate);
        self
    }

    /// Dispatch the pre-load lifecycle point: attach pending hooks to the
    /// containers on the first call, then run every container's
    /// before-load hooks.
    pub fn pre_load(&mut self) {
        if !self.hooks_attached {
            self.attach_handlers();
            self.hooks_attached = true;
        }
        let session = &self.session;
        for slot in &mut self.slots {
            for hooks in &slot.hooks {
                hooks.before_load(session, slot.container.as_mut());
            }
        }
    }

    /// Dispatch the pre-save lifecycle point on every container.
    pub fn pre_save(&mut self) {
        let session = &self.session;
        for slot in &mut self.slots {
            for hooks in &slot.hooks {
                hooks.before_save(session, slot.container.as_mut());
            }
        }
    }

    /// Dispatch an adapter pre-save for the container at `index`.
    pub fn adapter_pre_save(&self, index: usize, request: &mut SaveRequest<'_>) {
        let Some(slot) = self.slots.get(index) else {
            debug!(index, "adapter pre-save for unknown container");
            return;
        };
        for hooks in &slot.adapter_hooks {
            hooks.before_save(&self.session, request);
        }
    }

    /// Dispatch the post-load lifecycle point with the loaded content.
    pub fn post_load(&self, content: &mut Value) {
        for hooks in &self.wrap_hooks {
            hooks.after_load(&self.session, content);
        }
    }

    // Attachment is deferred to the first pre-load because containers
    // might not be available while plugins register. Adapter hooks only
    // attach where the container has an adapter.
    fn attach_handlers(&mut self) {
        debug!(containers = self.slots.len(), "attaching container handlers");
        for slot in &mut self.slots {
            slot.hooks.extend(self.pending_container_hooks.iter().cloned());
            if slot.container.adapter().is_some() {
                slot.adapter_hooks
                    .extend(self.pending_adapter_hooks.iter().cloned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct NullContainer;

    impl Container for NullContainer {
        fn id(&self) -> Option<String> {
            None
        }

        fn set_id(&mut self, _id: String) {}

        fn adapter(&self) -> Option<&dyn crate::host::Adapter> {
            None
        }
    }

    struct Recorder {
        seen: Arc<Mutex<Vec<String>>>,
    }

    impl FlowController for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn set_locale(&mut self, locale: &str) {
            self.seen.lock().unwrap().push(locale.to_string());
        }
    }

    #[test]
    fn test_set_locale_chainable() {
        let mut wrap = Wrap::new();
        assert_eq!(wrap.set_locale(Some("fr")).get_locale(), Some("fr"));
    }

    #[test]
    fn test_set_locale_none_keeps_previous() {
        let mut wrap = Wrap::new();
        wrap.set_locale(Some("fr"));
        assert_eq!(wrap.set_locale(None).get_locale(), Some("fr"));
    }

    #[test]
    fn test_locale_alias() {
        let mut wrap = Wrap::new();
        assert_eq!(wrap.locale(Some("de-CH")).get_locale(), Some("de-CH"));
    }

    #[test]
    fn test_set_locale_forwards_to_flow() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut wrap = Wrap::new();
        wrap.add_flow_controller(Box::new(Recorder { seen: seen.clone() }));

        wrap.set_locale(Some("en")).set_locale(None).set_locale(Some("de"));
        assert_eq!(*seen.lock().unwrap(), ["en", "de"]);
    }

    #[test]
    fn test_i18n_none_leaves_wrap_unchanged() {
        let mut wrap = Wrap::new();
        wrap.set_locale(Some("en"));
        wrap.i18n(None);
        assert_eq!(wrap.get_locale(), Some("en"));
        assert!(wrap.session().locales().is_empty());
        assert!(wrap.session().translator().is_none());
    }

    #[test]
    fn test_i18n_applies_bundle() {
        let mut wrap = Wrap::new();
        wrap.i18n(Some(I18nBundle {
            locale: Some("de".into()),
            locales: vec!["de".into(), "en".into()],
            translate: None,
        }));
        assert_eq!(wrap.get_locale(), Some("de"));
        assert_eq!(wrap.session().locales(), ["de", "en"]);
    }

    struct CountingHooks {
        loads: Arc<Mutex<usize>>,
    }

    impl ContainerHooks for CountingHooks {
        fn before_load(&self, _session: &LocaleSession, _container: &mut dyn Container) {
            *self.loads.lock().unwrap() += 1;
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    struct CountingPlugin {
        metadata: PluginMetadata,
        loads: Arc<Mutex<usize>>,
    }

    impl CountingPlugin {
        fn new(api: &str, loads: Arc<Mutex<usize>>) -> Self {
            Self {
                metadata: PluginMetadata {
                    id: "counting".into(),
                    name: "Counting".into(),
                    version: "0.0.0".into(),
                    description: String::new(),
                    api: api.into(),
                },
                loads,
            }
        }
    }

    impl WrapPlugin for CountingPlugin {
        fn metadata(&self) -> &PluginMetadata {
            &self.metadata
        }

        fn install(&self, context: &mut PluginContext<'_>) -> Result<(), PluginError> {
            context.register_container_hooks(Arc::new(CountingHooks {
                loads: self.loads.clone(),
            }));
            Ok(())
        }
    }

    #[test]
    fn test_register_plugin_rejects_wrong_api() {
        let mut wrap = Wrap::new();
        let plugin = CountingPlugin::new("other-api", Arc::new(Mutex::new(0)));
        assert!(matches!(
            wrap.register_plugin(&plugin),
            Err(PluginError::ApiMismatch { .. })
        ));
    }

    #[test]
    fn test_register_plugin_rejects_duplicate_id() {
        let mut wrap = Wrap::new();
        let plugin = CountingPlugin::new(WRAP_PLUGIN_API, Arc::new(Mutex::new(0)));
        wrap.register_plugin(&plugin).unwrap();
        assert!(matches!(
            wrap.register_plugin(&plugin),
            Err(PluginError::Conflict(_))
        ));
    }

    #[test]
    fn test_hooks_attach_once_and_skip_late_containers() {
        let loads = Arc::new(Mutex::new(0));
        let mut wrap = Wrap::new();
        wrap.register_plugin(&CountingPlugin::new(WRAP_PLUGIN_API, loads.clone()))
            .unwrap();
        wrap.add_container(Box::new(NullContainer));

        wrap.pre_load();
        assert_eq!(*loads.lock().unwrap(), 1);

        // attachment already happened; the new container gets no hooks
        wrap.add_container(Box::new(NullContainer));
        wrap.pre_load();
        assert_eq!(*loads.lock().unwrap(), 2);
    }

    #[test]
    fn test_adapter_pre_save_unknown_index_is_noop() {
        let wrap = Wrap::new();
        let mut record = serde_json::json!({});
        wrap.adapter_pre_save(0, &mut SaveRequest { id: "doc", record: &mut record });
        assert_eq!(record, serde_json::json!({}));
    }
}
