//! Configuration loaded from environment variables.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::cache::{DEFAULT_MAX_CAPACITY, DEFAULT_TTL_SECS, FragmentCache, MokaFragmentCache};
use crate::security::{DEFAULT_MAX_URL_LENGTH, DEFAULT_PROTOCOLS, UrlPolicy};

/// Renderer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL schemes links may use (default: http,https,mailto,tel).
    pub allowed_protocols: Vec<String>,

    /// Longest URL accepted before falling back to the placeholder (default: 2048).
    pub max_url_length: usize,

    /// Apply the dangerous-pattern block-list to URLs (default: true).
    pub strict_urls: bool,

    /// Fragment cache capacity in entries; 0 disables the cache (default: 10000).
    pub fragment_cache_capacity: u64,

    /// Fragment cache time-to-live in seconds (default: 60).
    pub fragment_cache_ttl_secs: u64,

    /// Variant used when the CLI is not given one (default: simple).
    pub default_variant: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_protocols: DEFAULT_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            max_url_length: DEFAULT_MAX_URL_LENGTH,
            strict_urls: true,
            fragment_cache_capacity: DEFAULT_MAX_CAPACITY,
            fragment_cache_ttl_secs: DEFAULT_TTL_SECS,
            default_variant: "simple".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let allowed_protocols = lookup("MENU_ALLOWED_PROTOCOLS")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_ascii_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.allowed_protocols);

        let max_url_length = lookup("MENU_MAX_URL_LENGTH")
            .map(|v| v.parse::<usize>())
            .transpose()
            .context("MENU_MAX_URL_LENGTH must be a valid usize")?
            .unwrap_or(defaults.max_url_length);

        let strict_urls = match lookup("MENU_STRICT_URLS").map(|v| v.to_lowercase()) {
            None => defaults.strict_urls,
            Some(v) => match v.as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                other => bail!("MENU_STRICT_URLS must be a boolean, got `{other}`"),
            },
        };

        let fragment_cache_capacity = lookup("MENU_FRAGMENT_CACHE_CAPACITY")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("MENU_FRAGMENT_CACHE_CAPACITY must be a valid u64")?
            .unwrap_or(defaults.fragment_cache_capacity);

        let fragment_cache_ttl_secs = lookup("MENU_FRAGMENT_CACHE_TTL_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("MENU_FRAGMENT_CACHE_TTL_SECS must be a valid u64")?
            .unwrap_or(defaults.fragment_cache_ttl_secs);

        let default_variant = lookup("MENU_DEFAULT_VARIANT")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.default_variant);

        Ok(Self {
            allowed_protocols,
            max_url_length,
            strict_urls,
            fragment_cache_capacity,
            fragment_cache_ttl_secs,
            default_variant,
        })
    }

    /// URL policy for the renderer.
    pub fn url_policy(&self) -> UrlPolicy {
        UrlPolicy {
            allowed_protocols: self.allowed_protocols.clone(),
            max_length: self.max_url_length,
            strict: self.strict_urls,
        }
    }

    /// Fragment cache, or `None` when disabled.
    pub fn fragment_cache(&self) -> Option<Arc<dyn FragmentCache>> {
        if self.fragment_cache_capacity == 0 {
            return None;
        }
        Some(Arc::new(MokaFragmentCache::new(
            self.fragment_cache_capacity,
            Duration::from_secs(self.fragment_cache_ttl_secs),
        )))
    }
}
