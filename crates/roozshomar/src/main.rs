use crate::prelude::*;
use clap::Parser;

mod error;
mod post;
mod prelude;
mod say;
mod status;
mod twitter;
mod whois;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Daily Persian counting bot for X/Twitter"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Directory holding the counter and rate-limit state files
    #[clap(
        long,
        env = "ROOZSHOMAR_STATE_DIR",
        global = true,
        default_value = "."
    )]
    state_dir: std::path::PathBuf,

    /// Whether to display additional information.
    #[clap(long, env = "ROOZSHOMAR_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Publish the quote-tweets owed for today
    Post(crate::post::App),

    /// Show stored vs expected counter and rate-limit state
    Status(crate::status::App),

    /// Print the Persian word form of a number
    Say(crate::say::App),

    /// Resolve user ids to usernames
    Whois(crate::whois::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Post(sub_app) => crate::post::run(sub_app, app.global).await,
        SubCommands::Status(sub_app) => crate::status::run(sub_app, app.global).await,
        SubCommands::Say(sub_app) => crate::say::run(sub_app, app.global).await,
        SubCommands::Whois(sub_app) => crate::whois::run(sub_app, app.global).await,
    }
}
