//! Offline report of the campaign state: what is stored, what the calendar
//! expects, and whether a rate-limit cooldown is in effect. No network.

use chrono::{Local, Utc};
use colored::Colorize;
use roozshomar_core::state::StateStore;
use serde::Serialize;

use crate::post::{format_duration, BotConfig};
use crate::prelude::*;
use crate::prelude::println;

#[derive(Debug, clap::Parser)]
#[command(name = "status")]
#[command(about = "Show stored vs expected counter and rate-limit state")]
pub struct App {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct StatusOutput {
    stored_counter: i64,
    last_post_id: Option<String>,
    expected_counter: i64,
    lag: i64,
    cooldown_remaining_seconds: Option<i64>,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    let config = BotConfig::from_env()?;
    let store = StateStore::new(&global.state_dir);

    let state = store.read_state();
    let today = Local::now().date_naive();
    let expected = config.campaign.expected_counter_for(today);
    let lag = (expected - state.counter).max(0);
    let cooldown = store.cooldown_remaining(Utc::now(), config.cooldown_window);

    if app.json {
        let output = StatusOutput {
            stored_counter: state.counter,
            last_post_id: state.last_post_id,
            expected_counter: expected,
            lag,
            cooldown_remaining_seconds: cooldown.map(|remaining| remaining.num_seconds()),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let rate_limit = match cooldown {
        Some(remaining) => format!("active, {} remaining", format_duration(remaining))
            .yellow()
            .to_string(),
        None => "clear".green().to_string(),
    };

    let mut table = new_table();
    table.add_row(prettytable::row!["Stored counter".bold().cyan(), state.counter]);
    table.add_row(prettytable::row!["Expected counter".bold().cyan(), expected]);
    table.add_row(prettytable::row!["Lag".bold().cyan(), lag]);
    if let Some(id) = &state.last_post_id {
        table.add_row(prettytable::row!["Last post id".bold().cyan(), id]);
    }
    table.add_row(prettytable::row!["Rate limit".bold().cyan(), rate_limit]);
    table.printstd();

    if lag > 0 {
        println!("\n{lag} post(s) owed. Run `roozshomar post`.");
    }

    Ok(())
}
