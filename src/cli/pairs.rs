use super::ui;
use crate::core::{RateService, currencies_from_pairs};
use anyhow::Result;
use comfy_table::Cell;

/// Lists the currency pairs the quote API offers, plus the currencies they
/// decompose into.
pub async fn run(service: &RateService) -> Result<()> {
    let pairs = service.load_pairs().await?;

    if pairs.is_empty() {
        println!(
            "{}",
            ui::style_text("No currency pairs available.", ui::StyleType::Subtle)
        );
        return Ok(());
    }

    println!(
        "{}\n",
        ui::style_text("Available currency pairs", ui::StyleType::Title)
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Pair"),
        ui::header_cell("Base"),
        ui::header_cell("Quote"),
    ]);
    for pair in &pairs {
        table.add_row(vec![
            Cell::new(pair.display_name()),
            Cell::new(pair.base()),
            Cell::new(pair.quote()),
        ]);
    }
    println!("{table}");

    let currencies = currencies_from_pairs(&pairs);
    println!(
        "\n{} {}",
        ui::style_text("Currencies:", ui::StyleType::Label),
        currencies.join(", ")
    );

    Ok(())
}
