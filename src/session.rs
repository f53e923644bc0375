//! Locale session state shared by all lifecycle hooks.

use std::sync::Arc;

/// Translation function supplied by the host.
///
/// Returns `None` when no translation exists for the given text; callers
/// fall back to the original text.
pub trait Translate: Send + Sync {
    fn translate(&self, text: &str) -> Option<String>;
}

/// Internationalization bundle handed to [`Wrap::i18n`](crate::Wrap::i18n).
pub struct I18nBundle {
    pub locale: Option<String>,
    pub locales: Vec<String>,
    pub translate: Option<Arc<dyn Translate>>,
}

/// Current locale state of a wrap instance.
///
/// Replaces ad-hoc attributes on the wrap object with one explicit struct
/// that every hook receives by reference.
#[derive(Default)]
pub struct LocaleSession {
    locale: Option<String>,
    locales: Vec<String>,
    translate: Option<Arc<dyn Translate>>,
}

impl LocaleSession {
    /// Current locale, e.g. `en` or `de-CH`, or `None` when unset.
    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = Some(locale.into());
    }

    /// Locale codes known to the host.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn set_locales(&mut self, locales: Vec<String>) {
        self.locales = locales;
    }

    pub fn translator(&self) -> Option<&Arc<dyn Translate>> {
        self.translate.as_ref()
    }

    pub fn set_translator(&mut self, translate: Option<Arc<dyn Translate>>) {
        self.translate = translate;
    }
}

impl std::fmt::Debug for LocaleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleSession")
            .field("locale", &self.locale)
            .field("locales", &self.locales)
            .field("translate", &self.translate.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;
    impl Translate for Upper {
        fn translate(&self, text: &str) -> Option<String> {
            Some(text.to_uppercase())
        }
    }

    #[test]
    fn test_session_locale_roundtrip() {
        let mut session = LocaleSession::default();
        assert!(session.locale().is_none());
        session.set_locale("de-CH");
        assert_eq!(session.locale(), Some("de-CH"));
    }

    #[test]
    fn test_session_translator() {
        let mut session = LocaleSession::default();
        assert!(session.translator().is_none());
        session.set_translator(Some(Arc::new(Upper)));
        let translated = session.translator().unwrap().translate("hi");
        assert_eq!(translated.as_deref(), Some("HI"));
    }
}
