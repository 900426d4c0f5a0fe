//! Presentation helpers for price quotes
//!
//! Currency rendering and the up/down trend indicator shown next to a
//! listing's price in dashboards. No pricing logic lives here.

use serde::{Deserialize, Serialize};

use crate::calculator::PricingResult;

/// Digit grouping styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    /// Western grouping: 1,234,567.89
    Thousands,
    /// Indian grouping: 12,34,567.89
    Indian,
}

/// How to render amounts for one currency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub grouping: Grouping,
}

impl CurrencyFormat {
    /// Indian rupees, the marketplace's display currency.
    pub fn inr() -> Self {
        Self {
            code: "INR".to_string(),
            symbol: "₹".to_string(),
            grouping: Grouping::Indian,
        }
    }

    pub fn usd() -> Self {
        Self {
            code: "USD".to_string(),
            symbol: "$".to_string(),
            grouping: Grouping::Thousands,
        }
    }

    /// Render an amount with two decimals, symbol-prefixed, minus sign
    /// ahead of the symbol.
    pub fn format(&self, amount: f64) -> String {
        let negative = amount < 0.0;
        // Work in hundredths so cent rounding can carry into the
        // whole part
        let hundredths = (amount.abs() * 100.0).round() as u64;
        let whole = hundredths / 100;
        let cents = hundredths % 100;

        format!(
            "{}{}{}.{:02}",
            if negative { "-" } else { "" },
            self.symbol,
            group_digits(whole, self.grouping),
            cents
        )
    }

    /// Render every price field of a quote for display.
    pub fn format_result(&self, result: &PricingResult) -> FormattedQuote {
        FormattedQuote {
            base_price: self.format(result.base_price),
            traffic_price: self.format(result.traffic_price),
            discounted_price: result.discounted_price.map(|price| self.format(price)),
            trend: PriceTrend::for_result(result),
        }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::inr()
    }
}

/// A quote rendered as display strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedQuote {
    pub base_price: String,
    pub traffic_price: String,
    pub discounted_price: Option<String>,
    pub trend: PriceTrend,
}

/// Direction of the traffic price relative to the base price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceTrend {
    Up,
    Down,
    Flat,
}

impl PriceTrend {
    pub fn from_prices(base_price: f64, traffic_price: f64) -> Self {
        if traffic_price > base_price {
            Self::Up
        } else if traffic_price < base_price {
            Self::Down
        } else {
            Self::Flat
        }
    }

    pub fn for_result(result: &PricingResult) -> Self {
        Self::from_prices(result.base_price, result.traffic_price)
    }

    /// Arrow shown next to the price.
    pub fn indicator(self) -> &'static str {
        match self {
            Self::Up => "↗",
            Self::Down => "↘",
            Self::Flat => "→",
        }
    }
}

fn group_digits(whole: u64, grouping: Grouping) -> String {
    let digits = whole.to_string();
    let bytes = digits.as_bytes();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            let remaining = bytes.len() - i;
            let at_boundary = match grouping {
                Grouping::Thousands => remaining % 3 == 0,
                // Indian style groups the last three digits, then pairs
                Grouping::Indian => remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0),
            };
            if at_boundary {
                grouped.push(',');
            }
        }
        grouped.push(*byte as char);
    }

    grouped
}
