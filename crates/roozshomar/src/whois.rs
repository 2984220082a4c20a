//! Resolve user ids to usernames, batched the way the platform allows.

use std::collections::HashMap;

use colored::Colorize;
use futures::future::join_all;

use crate::prelude::*;
use crate::prelude::println;
use crate::twitter::{TwitterApi, TwitterConfig};

/// The users endpoint accepts at most this many ids per request.
const MAX_IDS_PER_REQUEST: usize = 100;

#[derive(Debug, clap::Parser)]
#[command(name = "whois")]
#[command(about = "Resolve user ids to usernames")]
pub struct App {
    /// Numeric user ids to resolve
    #[arg(required = true)]
    user_ids: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    for id in &app.user_ids {
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(eyre!("'{id}' is not a valid user id (must be numeric)"));
        }
    }

    let api = TwitterApi::new(&TwitterConfig::from_env()?)?;

    if global.verbose {
        println!("Resolving {} user id(s)...", app.user_ids.len());
    }

    let chunk_futures = app
        .user_ids
        .chunks(MAX_IDS_PER_REQUEST)
        .map(|chunk| api.get_users_by_ids(chunk));

    let mut found: HashMap<String, String> = HashMap::new();
    for result in join_all(chunk_futures).await {
        for user in result? {
            found.insert(user.id, user.username);
        }
    }

    if app.json {
        let output: serde_json::Map<String, serde_json::Value> = app
            .user_ids
            .iter()
            .map(|id| {
                let username = found
                    .get(id)
                    .cloned()
                    .map_or(serde_json::Value::Null, serde_json::Value::String);
                (id.clone(), username)
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&serde_json::Value::Object(output))?);
        return Ok(());
    }

    let mut table = new_table();
    for id in &app.user_ids {
        match found.get(id) {
            Some(username) => {
                table.add_row(prettytable::row![id, format!("@{username}").bright_white()])
            }
            None => table.add_row(prettytable::row![id, "NOT FOUND".bright_black()]),
        };
    }
    table.printstd();

    let resolved = app
        .user_ids
        .iter()
        .filter(|id| found.contains_key(*id))
        .count();
    println!("\nResolved {resolved} out of {} user id(s)", app.user_ids.len());

    Ok(())
}
