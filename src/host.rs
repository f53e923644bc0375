//! Host framework contract consumed by the plugin.
//!
//! The wrap framework owns containers, adapters, and flow controllers;
//! this module expresses the slice of that surface the i18n plugin needs
//! as traits, so hooks stay testable against in-memory fakes.

use serde_json::Value;

/// Persistence endpoint owned by a container.
pub trait Adapter: Send {
    /// Backend name for diagnostics.
    fn name(&self) -> &str;
}

/// A document container: a framework-level wrapper around one document,
/// identified by a string id, persisting through zero-or-one adapter.
pub trait Container: Send {
    /// Current container id, or `None` when not yet assigned.
    fn id(&self) -> Option<String>;

    fn set_id(&mut self, id: String);

    fn adapter(&self) -> Option<&dyn Adapter>;
}

/// Controller registered in the wrap's flow that wants locale changes
/// forwarded to it.
pub trait FlowController: Send {
    /// Controller name for diagnostics.
    fn name(&self) -> &str;

    fn set_locale(&mut self, locale: &str);
}

/// Named parameters for an adapter pre-save event: the record id and the
/// record about to be persisted.
pub struct SaveRequest<'a> {
    pub id: &'a str,
    pub record: &'a mut Value,
}
