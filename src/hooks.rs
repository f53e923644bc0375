//! Typed lifecycle hooks invoked synchronously by the wrap.
//!
//! Hooks replace string-keyed event callbacks with one trait per
//! attachment point. Every method is a no-op by default; a hook
//! implements only the lifecycle points it cares about. Hooks run to
//! completion inside the dispatching call and never fail: a hook that
//! cannot act logs and returns.

use serde_json::Value;

use crate::host::{Container, SaveRequest};
use crate::session::LocaleSession;

/// Hooks attached to each container reachable from the wrap.
pub trait ContainerHooks: Send + Sync {
    /// Runs before the container loads its document.
    fn before_load(&self, _session: &LocaleSession, _container: &mut dyn Container) {}

    /// Runs before the container saves its document.
    fn before_save(&self, _session: &LocaleSession, _container: &mut dyn Container) {}

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Hooks attached to a container's adapter.
pub trait AdapterHooks: Send + Sync {
    /// Runs before the adapter persists a record.
    fn before_save(&self, _session: &LocaleSession, _request: &mut SaveRequest<'_>) {}

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}

/// Hooks attached to the wrap itself.
pub trait WrapHooks: Send + Sync {
    /// Runs after content has been loaded, with mutable access to it.
    fn after_load(&self, _session: &LocaleSession, _content: &mut Value) {}

    /// Human-readable name for logging.
    fn name(&self) -> &str;
}
