#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::debug;

use crate::constants::{
    DEFAULT_SCAN_DEPTH, EXCLUDED_METHODS_ENV, SCAN_DEPTH_ENV, SYNTHETIC_METHOD_NAMES,
};

/// Runtime configuration shared across the crate.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Method names never reported by method queries.
    excluded_methods: Vec<String>,
    /// How many directory levels the Java loader descends.
    scan_depth:       i8,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn from_env() -> Self {
        let extra = std::env::var(EXCLUDED_METHODS_ENV).ok();
        let excluded_methods = excluded_methods_from(extra.as_deref());
        let scan_depth = read_i8(SCAN_DEPTH_ENV, DEFAULT_SCAN_DEPTH);
        debug!(?excluded_methods, scan_depth, "loaded configuration");

        Self {
            excluded_methods,
            scan_depth,
        }
    }

    /// Returns the method names excluded from every method query result.
    pub fn excluded_methods(&self) -> &[String] {
        &self.excluded_methods
    }

    /// True if `name` must never appear in a method query result.
    pub fn is_excluded_method(&self, name: &str) -> bool {
        self.excluded_methods.iter().any(|m| m == name)
    }

    /// Returns the directory depth used when searching for Java sources.
    pub fn scan_depth(&self) -> i8 {
        self.scan_depth
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone, Debug)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Returns the active configuration, reading the environment on first use.
pub fn get() -> ConfigHandle {
    let mut guard = slot().lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cfg) = guard.as_ref() {
        return ConfigHandle(Arc::clone(cfg));
    }

    let cfg = Arc::new(ConfigState::from_env());
    *guard = Some(Arc::clone(&cfg));
    ConfigHandle(cfg)
}

/// Drops the cached configuration so the next [`get`] re-reads the
/// environment.
pub fn reload() -> ConfigHandle {
    slot()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
    get()
}

/// Returns the configured directory depth for the Java loader.
pub fn scan_depth() -> i8 {
    get().scan_depth()
}

/// The synthetic method names followed by each distinct, non-blank entry of
/// the comma-separated `extra` list.
fn excluded_methods_from(extra: Option<&str>) -> Vec<String> {
    let mut excluded: Vec<String> = SYNTHETIC_METHOD_NAMES.iter().map(|s| s.to_string()).collect();

    for name in extra
        .into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if !excluded.iter().any(|m| m == name) {
            excluded.push(name.to_string());
        }
    }
    excluded
}

/// Parses an environment variable into an `i8`, falling back to `default`
/// when parsing fails or the variable is missing.
fn read_i8(env: &str, default: i8) -> i8 {
    std::env::var(env)
        .ok()
        .and_then(|value| value.trim().parse::<i8>().ok())
        .filter(|depth| *depth >= 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{excluded_methods_from, read_i8};

    #[test]
    fn extra_excluded_methods_are_appended_once() {
        assert_eq!(excluded_methods_from(None), vec!["$jacocoInit"]);
        assert_eq!(excluded_methods_from(Some(" , ")), vec!["$jacocoInit"]);
        assert_eq!(
            excluded_methods_from(Some("helper, $jacocoInit,,trace ,helper")),
            vec!["$jacocoInit", "helper", "trace"]
        );
    }

    #[test]
    fn depth_falls_back_on_missing_or_negative_values() {
        assert_eq!(read_i8("INTROSPECT_TEST_UNSET_DEPTH", 7), 7);

        // SAFETY: these variables are only touched by this test
        unsafe { std::env::set_var("INTROSPECT_TEST_NEGATIVE_DEPTH", "-2") };
        assert_eq!(read_i8("INTROSPECT_TEST_NEGATIVE_DEPTH", 7), 7);

        unsafe { std::env::set_var("INTROSPECT_TEST_DEPTH", " 3 ") };
        assert_eq!(read_i8("INTROSPECT_TEST_DEPTH", 7), 3);
    }
}
