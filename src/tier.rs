//! Traffic tier classification
//!
//! Tiers classify a listing's historical traffic volume and conversion
//! performance. The tier scales displayed pricing through a
//! multiplicative factor, and is derived from aggregated counters by a
//! fixed threshold cascade evaluated from the highest tier down.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PricingError;

/// Traffic tier of a listing, lowest to highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrafficTier {
    Free,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl TrafficTier {
    /// All tiers in ascending order.
    pub const ALL: [TrafficTier; 5] = [
        TrafficTier::Free,
        TrafficTier::Bronze,
        TrafficTier::Silver,
        TrafficTier::Gold,
        TrafficTier::Platinum,
    ];

    /// Price multiplier for this tier, strictly increasing from
    /// Free (1.0) to Platinum (2.0).
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Free => 1.0,
            Self::Bronze => 1.2,
            Self::Silver => 1.5,
            Self::Gold => 1.75,
            Self::Platinum => 2.0,
        }
    }

    /// Wire representation used by the marketplace datastore.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Bronze => "BRONZE",
            Self::Silver => "SILVER",
            Self::Gold => "GOLD",
            Self::Platinum => "PLATINUM",
        }
    }
}

impl fmt::Display for TrafficTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrafficTier {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "BRONZE" => Ok(Self::Bronze),
            "SILVER" => Ok(Self::Silver),
            "GOLD" => Ok(Self::Gold),
            "PLATINUM" => Ok(Self::Platinum),
            _ => Err(PricingError::UnknownTier(s.to_string())),
        }
    }
}

/// Aggregated traffic counters for one listing, as supplied by the
/// upstream traffic recorder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
}

impl TrafficTotals {
    pub fn new(impressions: u64, clicks: u64, conversions: u64) -> Self {
        Self {
            impressions,
            clicks,
            conversions,
        }
    }

    /// Conversions as a percentage of impressions (0 when there are no
    /// impressions).
    pub fn conversion_rate_percent(&self) -> f64 {
        if self.impressions > 0 {
            self.conversions as f64 / self.impressions as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Clicks as a percentage of impressions (0 when there are no
    /// impressions).
    pub fn click_through_rate_percent(&self) -> f64 {
        if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// One row of the classification cascade
struct TierThreshold {
    tier: TrafficTier,
    min_avg_daily_impressions: f64,
    min_conversion_rate_percent: f64,
}

/// Threshold cascade, highest tier first. Both conditions in a row
/// must hold for that tier to be assigned; the first matching row wins.
const CLASSIFICATION_CASCADE: [TierThreshold; 4] = [
    TierThreshold {
        tier: TrafficTier::Platinum,
        min_avg_daily_impressions: 1000.0,
        min_conversion_rate_percent: 5.0,
    },
    TierThreshold {
        tier: TrafficTier::Gold,
        min_avg_daily_impressions: 500.0,
        min_conversion_rate_percent: 3.0,
    },
    TierThreshold {
        tier: TrafficTier::Silver,
        min_avg_daily_impressions: 200.0,
        min_conversion_rate_percent: 2.0,
    },
    TierThreshold {
        tier: TrafficTier::Bronze,
        min_avg_daily_impressions: 50.0,
        min_conversion_rate_percent: 1.0,
    },
];

/// Classify a listing's traffic tier from its aggregated counters.
///
/// `days_active` below 1 is treated as 1 so a listing's first day of
/// activity counts as a full day. The classification is a pure step
/// function: identical inputs always yield the identical tier, and a
/// listing whose traffic fluctuates will see its tier fluctuate
/// call-to-call.
pub fn classify_traffic_tier(totals: &TrafficTotals, days_active: u32) -> TrafficTier {
    let days = days_active.max(1) as f64;
    let avg_daily_impressions = totals.impressions as f64 / days;
    let conversion_rate = totals.conversion_rate_percent();

    let tier = CLASSIFICATION_CASCADE
        .iter()
        .find(|t| {
            avg_daily_impressions >= t.min_avg_daily_impressions
                && conversion_rate >= t.min_conversion_rate_percent
        })
        .map(|t| t.tier)
        .unwrap_or(TrafficTier::Free);

    tracing::debug!(
        avg_daily_impressions = avg_daily_impressions,
        conversion_rate_percent = conversion_rate,
        tier = %tier,
        "Classified traffic tier"
    );
    crate::metrics::record_classification(tier);

    tier
}

/// Whole days between a listing's first recorded activity and `now`,
/// clamped to a minimum of 1.
pub fn days_active(first_activity: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    (now - first_activity).num_days().max(1) as u32
}
