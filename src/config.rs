use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::rates::{CategoryRates, DEFAULT_RATE_PER_MILLE};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub rates: RatesConfig,
    pub discount: DiscountConfig,
    pub volume: VolumeConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RatesConfig {
    /// Per-mille rate for categories without an entry
    pub default_rate: f64,
    /// Per-category overrides, keyed by category name (lowercased on load)
    pub categories: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DiscountConfig {
    /// Flat MSME seller discount, in percent of the traffic price
    pub seller_discount_percent: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Impression count per volume step
    pub step_impressions: u64,
    /// Price increase per volume step (0.1 = +10%)
    pub step_increase: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rates: RatesConfig::default(),
            discount: DiscountConfig::default(),
            volume: VolumeConfig::default(),
        }
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            default_rate: DEFAULT_RATE_PER_MILLE,
            categories: HashMap::new(),
        }
    }
}

impl Default for DiscountConfig {
    fn default() -> Self {
        Self {
            seller_discount_percent: 15.0,
        }
    }
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            step_impressions: 1000,
            step_increase: 0.1,
        }
    }
}

impl PricingConfig {
    /// Resolve the configured rate table (built-ins plus overrides).
    pub fn category_rates(&self) -> CategoryRates {
        CategoryRates::new(self.rates.default_rate, &self.rates.categories)
    }

    /// Seller discount as a fraction of the traffic price.
    pub fn seller_discount_fraction(&self) -> f64 {
        self.discount.seller_discount_percent / 100.0
    }
}

/// Load configuration from an optional `pricing` file in the working
/// directory, overlaid with `TRAFFIC_PRICING__*` environment variables.
/// Missing file and variables leave the built-in defaults in place.
pub fn load_config() -> anyhow::Result<PricingConfig> {
    let config = config::Config::builder()
        .add_source(config::File::with_name("pricing").required(false))
        .add_source(config::Environment::with_prefix("TRAFFIC_PRICING").separator("__"))
        .build()?;

    let cfg: PricingConfig = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &PricingConfig) -> anyhow::Result<()> {
    if !cfg.rates.default_rate.is_finite() || cfg.rates.default_rate < 0.0 {
        anyhow::bail!(
            "rates.default_rate must be a non-negative number, got {}",
            cfg.rates.default_rate
        );
    }

    for (category, rate) in &cfg.rates.categories {
        if !rate.is_finite() || *rate < 0.0 {
            anyhow::bail!(
                "rates.categories['{}'] must be a non-negative number, got {}",
                category,
                rate
            );
        }
    }

    if !cfg.discount.seller_discount_percent.is_finite()
        || !(0.0..=100.0).contains(&cfg.discount.seller_discount_percent)
    {
        anyhow::bail!(
            "discount.seller_discount_percent must be between 0 and 100, got {}",
            cfg.discount.seller_discount_percent
        );
    }

    if cfg.volume.step_impressions == 0 {
        anyhow::bail!("volume.step_impressions must be greater than zero");
    }

    if !cfg.volume.step_increase.is_finite() || cfg.volume.step_increase < 0.0 {
        anyhow::bail!(
            "volume.step_increase must be a non-negative number, got {}",
            cfg.volume.step_increase
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = PricingConfig::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.rates.default_rate, DEFAULT_RATE_PER_MILLE);
        assert_eq!(cfg.discount.seller_discount_percent, 15.0);
        assert_eq!(cfg.volume.step_impressions, 1000);
    }

    #[test]
    fn test_validate_rejects_negative_default_rate() {
        let mut cfg = PricingConfig::default();
        cfg.rates.default_rate = -0.1;

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("rates.default_rate"));
    }

    #[test]
    fn test_validate_rejects_nan_category_rate() {
        let mut cfg = PricingConfig::default();
        cfg.rates.categories.insert("steel".to_string(), f64::NAN);

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("steel"));
    }

    #[test]
    fn test_validate_rejects_discount_above_100() {
        let mut cfg = PricingConfig::default();
        cfg.discount.seller_discount_percent = 120.0;

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("seller_discount_percent"));
    }

    #[test]
    fn test_validate_rejects_zero_step_impressions() {
        let mut cfg = PricingConfig::default();
        cfg.volume.step_impressions = 0;

        let result = validate_config(&cfg);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("step_impressions"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: PricingConfig = toml::from_str(
            r#"
            [rates]
            default_rate = 0.12

            [rates.categories]
            steel = 0.50
            "#,
        )
        .unwrap();

        assert_eq!(cfg.rates.default_rate, 0.12);
        assert_eq!(cfg.rates.categories["steel"], 0.50);
        // Unspecified sections keep their defaults
        assert_eq!(cfg.discount.seller_discount_percent, 15.0);
        assert_eq!(cfg.volume.step_increase, 0.1);
    }

    #[test]
    fn test_category_rates_resolution() {
        let mut cfg = PricingConfig::default();
        cfg.rates.categories.insert("Steel".to_string(), 0.60);

        let rates = cfg.category_rates();
        assert_eq!(rates.lookup("steel"), 0.60);
        assert_eq!(rates.lookup("textiles"), 0.22);
    }

    #[test]
    fn test_seller_discount_fraction() {
        let cfg = PricingConfig::default();
        assert!((cfg.seller_discount_fraction() - 0.15).abs() < f64::EPSILON);
    }
}
