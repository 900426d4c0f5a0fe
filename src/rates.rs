//! Category rate table
//!
//! Maps marketplace categories to a per-mille advertising rate (price
//! per thousand impressions). Lookup is case-insensitive; categories
//! without an entry deliberately fall back to the default rate.

use std::collections::HashMap;

/// Per-mille rate applied when a category has no entry.
pub const DEFAULT_RATE_PER_MILLE: f64 = 0.20;

/// Built-in per-mille rates for the marketplace's major categories.
/// Keys must be lowercase.
const BUILTIN_RATES: &[(&str, f64)] = &[
    ("agriculture", 0.18),
    ("automotive", 0.32),
    ("chemicals", 0.28),
    ("construction", 0.24),
    ("electronics", 0.30),
    ("machinery", 0.26),
    ("pharmaceuticals", 0.35),
    ("steel", 0.25),
    ("textiles", 0.22),
];

/// Resolved category rate table
#[derive(Debug, Clone)]
pub struct CategoryRates {
    rates: HashMap<String, f64>,
    default_rate: f64,
}

impl CategoryRates {
    /// Table with the built-in rates and the standard default.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_RATE_PER_MILLE, &HashMap::new())
    }

    /// Table with the built-in rates, a custom default, and per-category
    /// overrides. Override keys are lowercased, so they both replace
    /// built-in entries and add new categories.
    pub fn new(default_rate: f64, overrides: &HashMap<String, f64>) -> Self {
        let mut rates: HashMap<String, f64> = BUILTIN_RATES
            .iter()
            .map(|(category, rate)| (category.to_string(), *rate))
            .collect();
        for (category, rate) in overrides {
            rates.insert(category.trim().to_lowercase(), *rate);
        }
        Self { rates, default_rate }
    }

    /// Per-mille rate for a category, case-insensitive. Unknown
    /// categories fall back to the default rate and are counted.
    pub fn lookup(&self, category: &str) -> f64 {
        let key = category.trim().to_lowercase();
        match self.rates.get(&key) {
            Some(rate) => *rate,
            None => {
                tracing::debug!(
                    category = category,
                    default_rate = self.default_rate,
                    "Unknown category, using default rate"
                );
                crate::metrics::record_category_fallback(category);
                self.default_rate
            }
        }
    }

    pub fn default_rate(&self) -> f64 {
        self.default_rate
    }

    /// Number of known categories.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for CategoryRates {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_category() {
        let rates = CategoryRates::with_defaults();
        assert_eq!(rates.lookup("steel"), 0.25);
        assert_eq!(rates.lookup("electronics"), 0.30);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let rates = CategoryRates::with_defaults();
        assert_eq!(rates.lookup("Steel"), 0.25);
        assert_eq!(rates.lookup("STEEL"), 0.25);
        assert_eq!(rates.lookup("  steel  "), 0.25);
    }

    #[test]
    fn test_unknown_category_falls_back_to_default() {
        let rates = CategoryRates::with_defaults();
        assert_eq!(rates.lookup("unknown-category"), DEFAULT_RATE_PER_MILLE);
    }

    #[test]
    fn test_overrides_replace_and_extend() {
        let mut overrides = HashMap::new();
        overrides.insert("Steel".to_string(), 0.40);
        overrides.insert("handicrafts".to_string(), 0.15);

        let rates = CategoryRates::new(0.10, &overrides);
        assert!(!rates.is_empty());
        // Nine built-ins plus one new category; the steel override
        // replaces rather than adds
        assert_eq!(rates.len(), 10);
        assert_eq!(rates.lookup("steel"), 0.40);
        assert_eq!(rates.lookup("handicrafts"), 0.15);
        // Untouched built-in entries survive
        assert_eq!(rates.lookup("textiles"), 0.22);
        // Custom default applies to unknowns
        assert_eq!(rates.lookup("no-such-category"), 0.10);
    }
}
