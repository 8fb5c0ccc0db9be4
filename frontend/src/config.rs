use log::warn;

pub const WEBHOOK_URL: &str = "https://primary-production-ed284.up.railway.app/webhook/call-me-final";

pub const REQUEST_TIMEOUT_MS: u32 = 15_000;
pub const SUCCESS_RESET_MS: u32 = 5_000;
pub const ERROR_RESET_MS: u32 = 2_000;

/// Browser timers take a signed 32-bit delay; anything above wraps negative
/// and fires at once.
pub const MAX_DELAY_MS: u32 = i32::MAX as u32;

/// Id of the element the widget renders into.
pub const MOUNT_ELEMENT_ID: &str = "kg-widget-root";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetConfig {
    pub webhook_url: String,
    pub request_timeout_ms: u32,
    pub success_reset_ms: u32,
    pub error_reset_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            webhook_url: WEBHOOK_URL.to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            success_reset_ms: SUCCESS_RESET_MS,
            error_reset_ms: ERROR_RESET_MS,
        }
    }
}

impl WidgetConfig {
    /// Defaults overridden by `data-*` attributes of the mount element, e.g.
    /// `<div id="kg-widget-root" data-request-timeout-ms="8000">`.
    pub fn from_attributes<F>(attribute: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = attribute("data-webhook-url") {
            let url = url.trim();
            if url.is_empty() {
                warn!("Ignoring empty data-webhook-url");
            } else {
                config.webhook_url = url.to_string();
            }
        }

        override_millis(&attribute, "data-request-timeout-ms", &mut config.request_timeout_ms);
        override_millis(&attribute, "data-success-reset-ms", &mut config.success_reset_ms);
        override_millis(&attribute, "data-error-reset-ms", &mut config.error_reset_ms);

        if config.error_reset_ms >= config.success_reset_ms {
            warn!(
                "Error reset ({} ms) must be shorter than success reset ({} ms), using defaults",
                config.error_reset_ms, config.success_reset_ms
            );
            config.success_reset_ms = SUCCESS_RESET_MS;
            config.error_reset_ms = ERROR_RESET_MS;
        }

        config
    }
}

fn override_millis<F>(attribute: &F, name: &str, target: &mut u32)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = attribute(name) else {
        return;
    };

    match raw.trim().parse::<u32>() {
        Ok(ms) if ms > 0 && ms <= MAX_DELAY_MS => *target = ms,
        _ => warn!("Ignoring invalid {}={:?}, keeping {} ms", name, raw, target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn attributes(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn no_attributes_gives_defaults() {
        let config = WidgetConfig::from_attributes(|_: &str| None);
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.webhook_url, WEBHOOK_URL);
        assert_eq!(config.success_reset_ms, 5_000);
        assert_eq!(config.error_reset_ms, 2_000);
        assert!(config.error_reset_ms < config.success_reset_ms);
    }

    #[test]
    fn attributes_override_defaults() {
        let config = WidgetConfig::from_attributes(attributes(&[
            ("data-webhook-url", " https://example.test/hook "),
            ("data-request-timeout-ms", "8000"),
            ("data-success-reset-ms", "3000"),
            ("data-error-reset-ms", "1500"),
        ]));
        assert_eq!(config.webhook_url, "https://example.test/hook");
        assert_eq!(config.request_timeout_ms, 8000);
        assert_eq!(config.success_reset_ms, 3000);
        assert_eq!(config.error_reset_ms, 1500);
    }

    #[test]
    fn bad_values_keep_defaults() {
        let config = WidgetConfig::from_attributes(attributes(&[
            ("data-webhook-url", "   "),
            ("data-request-timeout-ms", "soon"),
            ("data-success-reset-ms", "0"),
            ("data-error-reset-ms", "-5"),
        ]));
        assert_eq!(config, WidgetConfig::default());

        let config = WidgetConfig::from_attributes(attributes(&[
            ("data-request-timeout-ms", "3000000000"),
            ("data-success-reset-ms", "4294967295"),
            ("data-error-reset-ms", "2147483648"),
        ]));
        assert_eq!(config, WidgetConfig::default());
        assert!(config.request_timeout_ms as i32 > 0);
    }

    #[test]
    fn largest_timer_delay_is_accepted() {
        let config = WidgetConfig::from_attributes(attributes(&[(
            "data-request-timeout-ms",
            "2147483647",
        )]));
        assert_eq!(config.request_timeout_ms, MAX_DELAY_MS);
        assert_eq!(config.request_timeout_ms as i32, i32::MAX);
    }

    #[test]
    fn error_reset_must_stay_shorter() {
        let config = WidgetConfig::from_attributes(attributes(&[
            ("data-success-reset-ms", "1000"),
            ("data-error-reset-ms", "1000"),
        ]));
        assert_eq!(config.success_reset_ms, SUCCESS_RESET_MS);
        assert_eq!(config.error_reset_ms, ERROR_RESET_MS);

        let config = WidgetConfig::from_attributes(attributes(&[("data-success-reset-ms", "1500")]));
        assert_eq!(config.success_reset_ms, SUCCESS_RESET_MS);
        assert_eq!(config.error_reset_ms, ERROR_RESET_MS);

        let config = WidgetConfig::from_attributes(attributes(&[
            ("data-success-reset-ms", "1500"),
            ("data-error-reset-ms", "500"),
        ]));
        assert_eq!(config.success_reset_ms, 1500);
        assert_eq!(config.error_reset_ms, 500);
    }
}
