use super::{load_rates, rates_as_of, ui};
use crate::core::{CurrencyCode, ExchangeError};
use crate::resolver::RateResolver;
use anyhow::Result;
use comfy_table::Cell;
use futures::future::join_all;

/// Converts `amount` of `from` into every target and renders the results.
pub async fn convert(
    resolver: &RateResolver,
    amount: f64,
    from: &CurrencyCode,
    targets: &[CurrencyCode],
    precision: usize,
) -> Result<String> {
    let table = load_rates(resolver).await?;
    // An unknown source currency makes every row meaningless
    table.get(from.as_str())?;

    let conversions = join_all(targets.iter().map(|to| async move {
        let rate = resolver.exchange_rate(from, to).await;
        let converted = resolver.convert(amount, from, to).await;
        (to, rate, converted)
    }))
    .await;

    let mut output_table = ui::new_styled_table();
    output_table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (per {from})")),
        ui::header_cell("Amount"),
    ]);

    for (to, rate, converted) in conversions {
        match (rate, converted) {
            (Ok(rate), Ok(converted)) => output_table.add_row(vec![
                Cell::new(to),
                ui::number_cell(rate, precision),
                ui::number_cell(converted, precision),
            ]),
            (Err(e), _) | (_, Err(e)) => {
                tracing::debug!(%to, error = %e, "Conversion failed");
                let reason = match e {
                    ExchangeError::CurrencyCode(_) => "unknown currency".to_string(),
                    other => other.to_string(),
                };
                output_table.add_row(vec![
                    Cell::new(format!(
                        "{to} ({})",
                        ui::style_text(&reason, ui::StyleType::Error)
                    )),
                    ui::na_cell(true),
                    ui::na_cell(true),
                ])
            }
        };
    }

    let amount_text = format!("{amount:.precision$} {from}");
    Ok(format!(
        "Converting {}\n\n{}\n\n{}",
        ui::style_text(&amount_text, ui::StyleType::Title),
        output_table,
        rates_as_of(&table)
    ))
}
