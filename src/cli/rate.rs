use super::{load_rates, rates_as_of, ui};
use crate::core::CurrencyCode;
use crate::resolver::RateResolver;
use anyhow::Result;

pub async fn rate(
    resolver: &RateResolver,
    from: &CurrencyCode,
    to: &CurrencyCode,
    precision: usize,
) -> Result<String> {
    let table = load_rates(resolver).await?;
    let rate = resolver.exchange_rate(from, to).await?;

    let rate_text = format!("{rate:.precision$} {to}");
    Ok(format!(
        "1 {from} = {}\n{}",
        ui::style_text(&rate_text, ui::StyleType::Value),
        rates_as_of(&table)
    ))
}
