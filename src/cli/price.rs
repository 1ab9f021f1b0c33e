use super::ui;
use crate::core::rates::RateProvider;
use crate::engine::{PriceEngine, Reply};
use anyhow::Result;

/// Runs a free-text query and prints the price or the rejection message.
pub async fn run<P: RateProvider>(engine: &PriceEngine<P>, raw: &str) -> Result<()> {
    let pb = ui::new_spinner("Fetching daily rates...");
    let reply = engine.get_price(raw).await;
    pb.finish_and_clear();

    match reply? {
        Reply::Price(price) => println!(
            "{}",
            ui::style_text(&format!("{price:.2}"), ui::StyleType::PriceValue)
        ),
        Reply::Invalid(message) => {
            println!("{}", ui::style_text(&message, ui::StyleType::Error))
        }
    }

    Ok(())
}
