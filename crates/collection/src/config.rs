//! Table defaults.

use std::time::Duration;

use crate::error::CollectionError;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    pub page_size: usize,
    /// Quiet period before a free-text query takes effect.
    pub debounce: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl ViewConfig {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Read `ERPDESK_PAGE_SIZE` and `ERPDESK_DEBOUNCE_MS`.
    pub fn from_env() -> Result<Self, CollectionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CollectionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("ERPDESK_PAGE_SIZE") {
            let size = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| CollectionError::InvalidConfig {
                    key: "ERPDESK_PAGE_SIZE",
                    reason: format!("{raw:?} is not a positive integer"),
                })?;
            config.page_size = size;
        }

        if let Some(raw) = lookup("ERPDESK_DEBOUNCE_MS") {
            let ms = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| CollectionError::InvalidConfig {
                    key: "ERPDESK_DEBOUNCE_MS",
                    reason: format!("{raw:?}: {e}"),
                })?;
            config.debounce = Duration::from_millis(ms);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_overrides() {
        let config = ViewConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.debounce, Duration::from_millis(300));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = ViewConfig::from_lookup(|key| match key {
            "ERPDESK_PAGE_SIZE" => Some("25".into()),
            "ERPDESK_DEBOUNCE_MS" => Some("150".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.page_size, 25);
        assert_eq!(config.debounce, Duration::from_millis(150));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = ViewConfig::from_lookup(|key| {
            (key == "ERPDESK_PAGE_SIZE").then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(
            err,
            CollectionError::InvalidConfig { key: "ERPDESK_PAGE_SIZE", .. }
        ));
    }
}
