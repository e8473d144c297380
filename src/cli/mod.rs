pub mod convert;
pub mod list;
pub mod rate;
pub mod setup;
pub mod ui;

use crate::core::RateTable;
use crate::resolver::RateResolver;
use anyhow::Result;
use std::sync::Arc;

/// Loads the resolver's rate table behind a spinner.
async fn load_rates(resolver: &RateResolver) -> Result<Arc<RateTable>> {
    let spinner = ui::new_spinner("Loading exchange rates...");
    let result = resolver.rates().await;
    spinner.finish_and_clear();
    Ok(result?)
}

/// Footer line naming the feed's publication date.
fn rates_as_of(table: &RateTable) -> String {
    let text = match table.date() {
        Some(date) => format!("Rates as of {}", date.format("%Y-%m-%d %H:%M %:z")),
        None => "Rates date unknown".to_string(),
    };
    ui::style_text(&text, ui::StyleType::Subtle)
}
