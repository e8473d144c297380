use super::{load_rates, rates_as_of, ui};
use crate::core::{BASE_CURRENCY, RateTable};
use crate::resolver::RateResolver;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

/// Renders every known currency with its value against the base currency.
pub fn display_rate_table(table: &RateTable, precision: usize) -> String {
    let mut output_table = ui::new_styled_table();
    output_table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Nominal"),
        ui::header_cell(&format!("Value ({BASE_CURRENCY})")),
        ui::header_cell(&format!("Unit rate ({BASE_CURRENCY})")),
    ]);

    for entry in table.entries() {
        let name = entry
            .name
            .as_deref()
            .map_or_else(|| ui::na_cell(false), Cell::new);
        output_table.add_row(vec![
            Cell::new(&entry.code),
            name,
            Cell::new(entry.nominal).set_alignment(CellAlignment::Right),
            ui::number_cell(entry.value, precision),
            ui::number_cell(entry.unit_rate(), precision),
        ]);
    }

    format!(
        "{} currencies\n\n{}\n\n{}",
        ui::style_text(&table.len().to_string(), ui::StyleType::Title),
        output_table,
        rates_as_of(table)
    )
}

pub async fn list(resolver: &RateResolver, precision: usize) -> Result<String> {
    let table = load_rates(resolver).await?;
    Ok(display_rate_table(&table, precision))
}
