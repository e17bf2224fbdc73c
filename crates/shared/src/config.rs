//! Cache settings management.
//!
//! Settings seed the cache configuration of every thread that was not spawned
//! through the cache's own spawn helper (those inherit their parent's config).

use std::sync::OnceLock;

use serde::Deserialize;

/// Top-level settings document.
#[derive(Debug, Clone, Default, Deserialize)]
struct Settings {
    #[serde(default)]
    cache: CacheSettings,
}

/// Cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CacheSettings {
    /// Whether memoization is enabled.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base entry count, scaled per function by its size multiplier.
    #[serde(default = "default_base_size")]
    pub base_size: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_base_size() -> usize {
    256
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            base_size: default_base_size(),
        }
    }
}

impl CacheSettings {
    /// Loads settings from the optional `config/fxspace` file and the environment.
    ///
    /// Environment variables use the `FXSPACE` prefix with `__` as separator,
    /// e.g. `FXSPACE__CACHE__BASE_SIZE=512`. Entries of a `.env` file are read as
    /// well but never exported to the process environment; real variables win.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(dotenv_entries())
    }

    fn load_with(
        dotenv: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self, config::ConfigError> {
        let mut variables: config::Map<String, String> = dotenv.into_iter().collect();
        variables.extend(std::env::vars_os().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        }));

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/fxspace").required(false))
            .add_source(
                config::Environment::with_prefix("FXSPACE")
                    .separator("__")
                    .try_parsing(true)
                    .source(Some(variables)),
            )
            .build()?;

        config.try_deserialize::<Settings>().map(|s| s.cache)
    }

    /// Returns the process-wide defaults, loading them on first use.
    ///
    /// Falls back to the built-in defaults if loading fails.
    pub fn process_defaults() -> Self {
        static DEFAULTS: OnceLock<CacheSettings> = OnceLock::new();

        *DEFAULTS.get_or_init(|| {
            Self::load().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "failed to load cache settings, using defaults");
                Self::default()
            })
        })
    }
}

/// Entries of the nearest `.env` file. A missing file yields nothing.
fn dotenv_entries() -> Vec<(String, String)> {
    match dotenvy::dotenv_iter() {
        Ok(entries) => entries
            .filter_map(|entry| {
                entry
                    .inspect_err(|err| tracing::warn!(error = %err, "skipping invalid .env line"))
                    .ok()
            })
            .collect(),
        Err(err) if err.not_found() => Vec::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read .env file");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let settings = CacheSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.base_size, 256);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            ["FXSPACE__CACHE__BASE_SIZE", "FXSPACE__CACHE__ENABLED"],
            || {
                let settings = CacheSettings::load().unwrap();
                assert_eq!(settings, CacheSettings::default());
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("FXSPACE__CACHE__BASE_SIZE", Some("512")),
                ("FXSPACE__CACHE__ENABLED", Some("false")),
            ],
            || {
                let settings = CacheSettings::load().unwrap();
                assert_eq!(settings.base_size, 512);
                assert!(!settings.enabled);
            },
        );
    }

    #[test]
    fn test_dotenv_entries_are_applied_without_touching_environment() {
        temp_env::with_vars_unset(
            ["FXSPACE__CACHE__BASE_SIZE", "FXSPACE_UNRELATED_SECRET"],
            || {
                let dotenv = [
                    ("FXSPACE__CACHE__BASE_SIZE".to_string(), "64".to_string()),
                    ("FXSPACE_UNRELATED_SECRET".to_string(), "hidden".to_string()),
                ];
                let settings = CacheSettings::load_with(dotenv).unwrap();
                assert_eq!(settings.base_size, 64);
                assert!(std::env::var("FXSPACE_UNRELATED_SECRET").is_err());
                assert!(std::env::var("FXSPACE__CACHE__BASE_SIZE").is_err());
            },
        );
    }

    #[test]
    fn test_environment_overrides_dotenv() {
        temp_env::with_var("FXSPACE__CACHE__BASE_SIZE", Some("128"), || {
            let dotenv = [("FXSPACE__CACHE__BASE_SIZE".to_string(), "64".to_string())];
            let settings = CacheSettings::load_with(dotenv).unwrap();
            assert_eq!(settings.base_size, 128);
        });
    }

    #[test]
    fn test_load_rejects_invalid_base_size() {
        temp_env::with_var("FXSPACE__CACHE__BASE_SIZE", Some("lots"), || {
            assert!(CacheSettings::load().is_err());
        });
    }
}
