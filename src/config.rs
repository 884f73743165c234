//! Runtime settings, read from the environment once at start-up.

use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIST_LIMIT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the data service, without a trailing slash.
    pub api_base: String,
    /// Page size requested by the "all names" call.
    pub list_limit: usize,
    /// Where log output goes. Nothing is logged when unset.
    pub log_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
            log_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = lookup("POKERECORD_API_BASE")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let list_limit = lookup("POKERECORD_LIST_LIMIT")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT);
        let log_path = lookup("POKERECORD_LOG")
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);

        Self {
            api_base,
            list_limit,
            log_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let cfg = Config::from_lookup(lookup_from(&[]));
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.api_base, "https://pokeapi.co/api/v2");
        assert_eq!(cfg.list_limit, 1000);
    }

    #[test]
    fn reads_overrides() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("POKERECORD_API_BASE", "http://localhost:9000/api/"),
            ("POKERECORD_LIST_LIMIT", "151"),
            ("POKERECORD_LOG", "/tmp/pokerecord.log"),
        ]));
        assert_eq!(cfg.api_base, "http://localhost:9000/api");
        assert_eq!(cfg.list_limit, 151);
        assert_eq!(cfg.log_path, Some(PathBuf::from("/tmp/pokerecord.log")));
    }

    #[test]
    fn bad_limit_falls_back_to_default() {
        for bad in ["lots", "-3", "0", ""] {
            let cfg = Config::from_lookup(lookup_from(&[("POKERECORD_LIST_LIMIT", bad)]));
            assert_eq!(cfg.list_limit, DEFAULT_LIST_LIMIT, "input {bad:?}");
        }
    }
}
