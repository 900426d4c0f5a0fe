/// Integration tests for quote presentation
use traffic_pricing::{
    calculator::{calculate_price, PricingInput},
    format::{CurrencyFormat, Grouping, PriceTrend},
    tier::TrafficTier,
};

fn steel_listing(base_price: f64, impressions: u64) -> PricingInput {
    PricingInput {
        base_price,
        impressions,
        clicks: 0,
        conversions: 0,
        tier: TrafficTier::Free,
        category: "steel".to_string(),
        apply_seller_discount: true,
    }
}

#[test]
fn test_quote_renders_in_rupees_with_indian_grouping() {
    let result = calculate_price(&steel_listing(100_000.0, 0)).unwrap();
    let quote = CurrencyFormat::inr().format_result(&result);

    assert_eq!(quote.traffic_price, "₹1,00,000.00");
    assert_eq!(quote.discounted_price.as_deref(), Some("₹85,000.00"));
    assert_eq!(quote.trend, PriceTrend::Flat);
}

#[test]
fn test_marked_up_quote_trends_up() {
    let result = calculate_price(&steel_listing(1000.0, 2000)).unwrap();
    let quote = CurrencyFormat::inr().format_result(&result);

    assert_eq!(quote.trend, PriceTrend::Up);
    assert_eq!(quote.trend.indicator(), "↗");
}

#[test]
fn test_western_grouping_for_usd_displays() {
    let format = CurrencyFormat::usd();
    assert_eq!(format.grouping, Grouping::Thousands);
    assert_eq!(format.format(1234567.89), "$1,234,567.89");
}

#[test]
fn test_default_format_is_inr() {
    let format = CurrencyFormat::default();
    assert_eq!(format.code, "INR");
    assert_eq!(format.format(42.0), "₹42.00");
}
