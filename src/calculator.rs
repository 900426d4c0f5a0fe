//! Traffic-based price calculation
//!
//! Turns a listing's base price and observed traffic metrics into a
//! marked-up display price. The calculation is pure arithmetic: no
//! I/O, no shared state, safe to call from any number of request
//! handlers concurrently.

use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::error::PricingError;
use crate::rates::CategoryRates;
use crate::tier::TrafficTier;

/// Inputs for a single price quote
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingInput {
    pub base_price: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub tier: TrafficTier,
    pub category: String,
    /// Apply the flat MSME seller discount to the quoted price
    pub apply_seller_discount: bool,
}

/// A computed price quote, derived entirely from a [`PricingInput`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    pub base_price: f64,
    /// Display price after traffic markup, rounded to whole currency units
    pub traffic_price: f64,
    /// Discounted display price when the seller discount was requested
    pub discounted_price: Option<f64>,
    pub cost_per_mille: f64,
    pub conversion_rate_percent: f64,
    pub traffic_volume_multiplier: f64,
    pub tier_multiplier: f64,
}

/// Price calculator resolved from a [`PricingConfig`]
///
/// Construct once at startup and share by reference; all methods are
/// read-only.
#[derive(Debug, Clone)]
pub struct PriceCalculator {
    rates: CategoryRates,
    seller_discount: f64,
    volume_step_impressions: u64,
    volume_step_increase: f64,
}

impl PriceCalculator {
    pub fn new(cfg: &PricingConfig) -> Self {
        Self {
            rates: cfg.category_rates(),
            seller_discount: cfg.seller_discount_fraction(),
            volume_step_impressions: cfg.volume.step_impressions,
            volume_step_increase: cfg.volume.step_increase,
        }
    }

    /// Compute the display price for a listing.
    ///
    /// `base_price` must be a finite, non-negative number; anything
    /// else fails with [`PricingError::InvalidInput`] naming the field.
    /// `clicks <= impressions` is expected but not enforced here.
    pub fn calculate_price(&self, input: &PricingInput) -> Result<PricingResult, PricingError> {
        if let Err(err) = validate_input(input) {
            crate::metrics::record_validation_error(err.field());
            return Err(err);
        }

        let tier_multiplier = input.tier.multiplier();
        let category_rate = self.rates.lookup(&input.category);
        let cost_per_mille = category_rate * tier_multiplier;

        let volume_steps = input.impressions as f64 / self.volume_step_impressions as f64;
        let traffic_volume_multiplier = 1.0 + volume_steps * self.volume_step_increase;

        let conversion_rate_percent = if input.impressions > 0 {
            input.conversions as f64 / input.impressions as f64 * 100.0
        } else {
            0.0
        };

        // The tier factor is applied twice: once inside cost_per_mille
        // and again on the total.
        let traffic_price = ((input.base_price + cost_per_mille * input.impressions as f64)
            * traffic_volume_multiplier
            * tier_multiplier)
            .round();

        let discounted_price = input
            .apply_seller_discount
            .then(|| (traffic_price * (1.0 - self.seller_discount)).round());

        tracing::debug!(
            category = %input.category,
            tier = %input.tier,
            base_price = input.base_price,
            traffic_price = traffic_price,
            "Computed traffic price"
        );
        crate::metrics::record_quote(&input.category, input.tier);

        Ok(PricingResult {
            base_price: input.base_price,
            traffic_price,
            discounted_price,
            cost_per_mille,
            conversion_rate_percent,
            traffic_volume_multiplier,
            tier_multiplier,
        })
    }
}

impl Default for PriceCalculator {
    fn default() -> Self {
        Self::new(&PricingConfig::default())
    }
}

/// Compute a display price with the built-in configuration.
pub fn calculate_price(input: &PricingInput) -> Result<PricingResult, PricingError> {
    PriceCalculator::default().calculate_price(input)
}

fn validate_input(input: &PricingInput) -> Result<(), PricingError> {
    if input.base_price.is_nan() {
        return Err(PricingError::invalid_input("base_price", "must not be NaN"));
    }
    if input.base_price.is_infinite() {
        return Err(PricingError::invalid_input("base_price", "must be finite"));
    }
    if input.base_price < 0.0 {
        return Err(PricingError::invalid_input(
            "base_price",
            format!("must be non-negative, got {}", input.base_price),
        ));
    }
    Ok(())
}
