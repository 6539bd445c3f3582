//! Runtime configuration.
//!
//! Values start from [`DemoConfig::default`], then the container's
//! `data-demo` attribute, then the page URL query. Bad values are logged and
//! skipped so a typo in the address bar never blanks the page.

use crate::demos::DemoKind;
use crate::error::ConfigError;

/// Default DOM id of the element the demo mounts into.
pub const DEFAULT_CONTAINER_ID: &str = "container";

#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub demo: DemoKind,
    pub container_id: String,
    pub film_grain_strength: f32,
    pub film_grain_speed: f32,
    /// Seed for the glitch pass. `None` derives one from the clock at startup.
    pub glitch_seed: Option<u64>,
    pub max_pixel_ratio: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            demo: DemoKind::SimpleScene,
            container_id: DEFAULT_CONTAINER_ID.to_string(),
            film_grain_strength: 0.1,
            film_grain_speed: 0.05,
            glitch_seed: None,
            max_pixel_ratio: 2.0,
        }
    }
}

impl DemoConfig {
    /// Query keys understood by [`DemoConfig::apply`].
    pub const KEYS: [&'static str; 6] = [
        "demo",
        "container",
        "grain",
        "grain-speed",
        "seed",
        "max-pixel-ratio",
    ];

    /// Apply a single key/value pair.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match key {
            "demo" => self.demo = value.parse()?,
            "container" if !value.is_empty() => self.container_id = value.to_string(),
            "grain" => self.film_grain_strength = parse_number("grain", value)?,
            "grain-speed" => self.film_grain_speed = parse_number("grain-speed", value)?,
            "seed" => {
                let seed = value.parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                    key: "seed",
                    value: value.to_string(),
                })?;
                self.glitch_seed = Some(seed);
            }
            "max-pixel-ratio" => {
                let ratio: f32 = parse_number("max-pixel-ratio", value)?;
                if ratio <= 0.0 {
                    return Err(ConfigError::InvalidNumber {
                        key: "max-pixel-ratio",
                        value: value.to_string(),
                    });
                }
                self.max_pixel_ratio = ratio;
            }
            _ => log::debug!("ignoring config key `{key}`"),
        }
        Ok(())
    }

    /// Apply every pair, logging and skipping the ones that fail.
    pub fn apply<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in pairs {
            if let Err(err) = self.set(key.as_ref(), value.as_ref()) {
                log::warn!("config: {err}");
            }
        }
    }

    /// Layer the page sources over the defaults: the query's `container`
    /// picks the element, `data_demo` reads that element's `data-demo`
    /// attribute, then the whole query is applied on top.
    pub fn from_page<F>(query: &[(String, String)], data_demo: F) -> Self
    where
        F: FnOnce(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply(
            query
                .iter()
                .filter(|(key, _)| key == "container")
                .map(|(key, value)| (key.as_str(), value.as_str())),
        );
        if let Some(demo) = data_demo(&config.container_id) {
            config.apply([("demo", demo)]);
        }
        config.apply(query.iter().map(|(key, value)| (key.as_str(), value.as_str())));
        config
    }

    /// Clamp a device pixel ratio to the configured maximum.
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f32 {
        let ratio = device_pixel_ratio as f32;
        if ratio.is_finite() && ratio > 0.0 {
            ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
