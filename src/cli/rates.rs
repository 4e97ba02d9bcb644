use super::ui;
use crate::core::{PairKey, RateService};
use anyhow::Result;
use comfy_table::Cell;

/// Fetches and renders the provider quotes for one currency pair. A failed
/// fetch clears the cached entry and reports a terminal error message; the
/// user re-runs the command to retry.
pub async fn run(service: &RateService, pair_arg: &str) -> Result<()> {
    let pair: PairKey = pair_arg.parse()?;

    let mut quotes = match service.refresh_pair(&pair).await {
        Ok(quotes) => quotes,
        Err(e) => {
            tracing::debug!(error = %e, "Rate fetch failed");
            println!(
                "{}",
                ui::style_text(
                    &format!(
                        "Error loading rates for {}. Please try again.",
                        pair.display_name()
                    ),
                    ui::StyleType::Error,
                )
            );
            return Ok(());
        }
    };

    if quotes.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("No rates found for {}.", pair.display_name()),
                ui::StyleType::Subtle,
            )
        );
        return Ok(());
    }

    // Best (lowest) quoted rate first, the ordering the backend uses.
    quotes.sort_by(|a, b| a.rate.total_cmp(&b.rate));

    println!(
        "{}\n",
        ui::style_text(
            &format!("Rates for {}", pair.display_name()),
            ui::StyleType::Title
        )
    );

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Provider"),
        ui::header_cell(&format!("Rate ({})", pair.quote())),
        ui::header_cell("Updated"),
        ui::header_cell("Register"),
    ]);

    for quote in &quotes {
        let updated = ui::format_optional_cell(quote.last_updated, |ts| {
            ts.format("%Y-%m-%d %H:%M UTC").to_string()
        });
        table.add_row(vec![
            Cell::new(&quote.provider),
            Cell::new(format!("{:.4}", quote.rate)),
            updated,
            Cell::new(&quote.register_link),
        ]);
    }
    println!("{table}");

    println!(
        "\n{}",
        ui::style_text(
            &format!(
                "1 {} = {:.4} {} at the best quoted rate",
                pair.base(),
                quotes[0].rate,
                pair.quote()
            ),
            ui::StyleType::Subtle,
        )
    );

    Ok(())
}
