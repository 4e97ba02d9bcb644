use super::ui;
use crate::core::{RateService, currencies_from_pairs};
use anyhow::Result;

/// Converts an amount between two currencies. The cache is primed with fresh
/// quotes for every pair the resolver may consult, then the conversion runs
/// over cached state only.
///
/// When a currency is not given it defaults from the pair listing: `from` is
/// the first derived currency, `to` the second.
pub async fn run(
    service: &RateService,
    raw_amount: &str,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let offered = service.load_pairs().await?;
    let currencies = currencies_from_pairs(&offered);

    let from = match from {
        Some(code) => code.to_uppercase(),
        None => match currencies.first() {
            Some(code) => code.clone(),
            None => {
                println!("{}", ui::style_text("Invalid input", ui::StyleType::Error));
                return Ok(());
            }
        },
    };
    let to = match to {
        Some(code) => code.to_uppercase(),
        None => match currencies.get(1) {
            Some(code) => code.clone(),
            None => {
                println!("{}", ui::style_text("Invalid input", ui::StyleType::Error));
                return Ok(());
            }
        },
    };

    let candidates = service.candidate_pairs(&from, &to, &offered);
    if !candidates.is_empty() {
        let pb = ui::new_progress_bar(candidates.len() as u64, true);
        pb.set_message("Fetching rates...");
        service.refresh_all(&candidates, &|| pb.inc(1)).await;
        pb.finish_and_clear();
    }

    match service.convert(raw_amount, &from, &to).await {
        Ok(conversion) => {
            println!(
                "{} {} = {}",
                ui::style_text(&format!("{:.2}", conversion.amount), ui::StyleType::Label),
                conversion.from,
                ui::style_text(&conversion.to_string(), ui::StyleType::Value)
            );
        }
        Err(e) => {
            println!("{}", ui::style_text(&e.to_string(), ui::StyleType::Error));
        }
    }

    Ok(())
}
