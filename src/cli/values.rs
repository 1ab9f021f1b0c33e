use super::ui;
use crate::core::rates::RateProvider;
use crate::engine::PriceEngine;
use anyhow::Result;
use comfy_table::Cell;

/// Prints the supported currencies as a code/name table in snapshot order.
pub async fn run<P: RateProvider>(engine: &PriceEngine<P>) -> Result<()> {
    let pb = ui::new_spinner("Fetching daily rates...");
    let rates = engine.fetch_rates().await;
    pb.finish_and_clear();
    let rates = rates?;

    if let Some(as_of) = rates.as_of() {
        println!(
            "{}",
            ui::style_text(
                &format!("Bank of Russia rates as of {}", as_of.format("%Y-%m-%d")),
                ui::StyleType::Subtle
            )
        );
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for (code, name) in engine.list_entries(Some(&rates)).await? {
        table.add_row(vec![Cell::new(code), Cell::new(name)]);
    }

    println!("{table}");
    Ok(())
}
