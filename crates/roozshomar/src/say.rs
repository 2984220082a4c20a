//! Numeral preview: the same rendering the bot posts, on demand.

use roozshomar_core::persian;

use crate::prelude::*;
use crate::prelude::println;

#[derive(Debug, clap::Parser)]
#[command(name = "say")]
#[command(about = "Print the Persian word form of a number")]
pub struct App {
    /// Number to convert (supported range -999,999 to 999,999)
    number: i64,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let words = persian::to_persian_words(app.number);

    if app.json {
        let output = serde_json::json!({
            "number": app.number,
            "words": words,
            "supported": persian::is_supported(app.number),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if global.verbose {
        let (min, max) = persian::supported_range();
        println!("Supported range: {min} to {max}");
    }
    println!("{words}");

    Ok(())
}
