//! The daily posting run.
//!
//! Reads the stored counter, computes the counter the calendar expects, and
//! publishes one quote-tweet per owed increment, advancing the stored state
//! exactly once per confirmed publish. The loop stops at the first failed
//! iteration: skipping a day would break the chain of quote-tweets.

use chrono::{Duration, Local, NaiveDate, Utc};
use roozshomar_core::campaign::{self, Campaign, NOT_SCHEDULED};
use roozshomar_core::state::{PersistedState, StateError, StateStore};

use crate::prelude::*;
use crate::prelude::{eprintln, println};
use crate::twitter::{Platform, Tweet, TwitterApi, TwitterConfig};

const MAX_TWEET_PREVIEW_LENGTH: usize = 100;

#[derive(Debug, clap::Parser)]
#[command(name = "post")]
#[command(about = "Publish the quote-tweets owed for today")]
#[command(after_help = "EXAMPLES:
  # Normal daily run (cron, every 20-30 minutes):
  roozshomar post

  # Run against a dedicated state directory:
  roozshomar post --state-dir /var/lib/roozshomar

ENVIRONMENT:
  ACCESS_TOKEN               OAuth 2.0 user-context token (required)
  START_DATE                 Campaign start date, YYYY-MM-DD (default 2025-03-18)
  MIN_COUNTER, MAX_COUNTER   Counter bounds (default 1 and 1000)
  FINAL_TWEET_TEXT           Text posted for the last counter value
  RATE_LIMIT_RESET_MINUTES   Cooldown window after a 429 (default 16)
  MAX_TWEETS_TO_FETCH        Timeline page size, 5-100 (default 50)
  CI / GITHUB_ACTIONS        When set, stop on an active cooldown instead of sleeping")]
pub struct App {}

/// Static campaign configuration from environment variables.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub campaign: Campaign,
    pub cooldown_window: Duration,
    pub page_size: usize,
}

impl BotConfig {
    pub fn from_env() -> Result<Self> {
        let start_date = match std::env::var("START_DATE") {
            Ok(value) => NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|e| eyre!("Invalid START_DATE {value:?}: {e}"))?,
            Err(_) => NaiveDate::from_ymd_opt(2025, 3, 18).unwrap(),
        };

        let min_counter = env_i64("MIN_COUNTER", 1)?;
        let max_counter = env_i64("MAX_COUNTER", 1000)?;
        if min_counter < 1 || max_counter < min_counter {
            return Err(eyre!(
                "Invalid counter bounds: MIN_COUNTER={min_counter}, MAX_COUNTER={max_counter}"
            ));
        }

        let final_text = std::env::var("FINAL_TWEET_TEXT")
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "هزارتو".to_string());

        Ok(Self {
            campaign: Campaign {
                start_date,
                min_counter,
                max_counter,
                final_text,
            },
            cooldown_window: Duration::minutes(env_i64("RATE_LIMIT_RESET_MINUTES", 16)?),
            page_size: env_i64("MAX_TWEETS_TO_FETCH", 50)?.clamp(5, 100) as usize,
        })
    }
}

fn env_i64(name: &str, default: i64) -> Result<i64> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|e| eyre!("Invalid {name} {value:?}: {e}")),
        Err(_) => Ok(default),
    }
}

/// Check if running in a CI environment.
pub fn is_ci_environment() -> bool {
    ["CI", "GITHUB_ACTIONS"]
        .iter()
        .any(|name| std::env::var(name).map(|value| !value.is_empty()).unwrap_or(false))
}

pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);
    format!("{}m {}s", total_seconds / 60, total_seconds % 60)
}

/// What a run did, for the final summary and for scenario tests.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Counter values published this run, in order.
    pub posted: Vec<i64>,
    /// True when the loop stopped before reaching the expected counter.
    pub stopped_early: bool,
    /// True when this run recorded a new rate-limit cooldown marker.
    pub cooldown_written: bool,
}

pub async fn run(_app: App, global: crate::Global) -> Result<()> {
    let config = BotConfig::from_env()?;
    let api = TwitterApi::new(&TwitterConfig::from_env()?)?;
    let store = StateStore::new(&global.state_dir);

    let today = Local::now().date_naive();
    let report = run_pending(
        &api,
        &store,
        &config,
        today,
        is_ci_environment(),
        global.verbose,
    )
    .await?;

    if report.posted.is_empty() && !report.cooldown_written {
        println!("No changes were made during this run.");
    } else {
        println!("Posted {} tweet(s) this run.", report.posted.len());
    }

    Ok(())
}

/// Run the posting loop for every counter increment owed as of `today`.
///
/// `fail_fast` controls the reaction to an active cooldown: stop the run so
/// an external scheduler retries later, or sleep the window out in-process.
pub async fn run_pending(
    platform: &dyn Platform,
    store: &StateStore,
    config: &BotConfig,
    today: NaiveDate,
    fail_fast: bool,
    verbose: bool,
) -> Result<RunReport> {
    let state = store.read_state();
    let expected = config.campaign.expected_counter_for(today);

    println!("Stored counter value: {}", state.counter);
    println!("Expected counter value: {}", expected);

    if state.counter < config.campaign.min_counter {
        return Err(eyre!(
            "Stored counter {} is invalid (minimum is {}). Fix {} by hand before running again.",
            state.counter,
            config.campaign.min_counter,
            store.counter_path().display()
        ));
    }

    if expected == NOT_SCHEDULED {
        println!("Today is outside the campaign window. Nothing to post.");
        return Ok(RunReport::default());
    }

    if state.counter >= expected {
        println!("No tweet needed today. Stored counter is up to date.");
        return Ok(RunReport::default());
    }

    let lag = expected - state.counter;
    println!("Stored counter is behind by {lag} day(s). Proceeding to post...");

    let mut report = RunReport::default();
    let mut current = state;

    for new_counter in (current.counter + 1)..=expected {
        println!("--- Processing counter value: {new_counter} ---");

        match store.cooldown_remaining(Utc::now(), config.cooldown_window) {
            Some(remaining) if fail_fast => {
                println!(
                    "Rate limit active for another {}. Stopping so the scheduler can retry.",
                    format_duration(remaining)
                );
                report.stopped_early = true;
                break;
            }
            Some(remaining) => {
                println!(
                    "Rate limit active. Waiting {} for the window to elapse...",
                    format_duration(remaining)
                );
                tokio::time::sleep(remaining.to_std().unwrap_or_default()).await;
                store.clear_cooldown()?;
            }
            None => {
                if store.read_cooldown().is_some() {
                    store.clear_cooldown()?;
                    println!("Rate limit window has elapsed. Safe to proceed.");
                }
            }
        }

        match post_one(platform, store, config, &mut current, new_counter, verbose).await {
            Ok(()) => {
                report.posted.push(new_counter);
                println!("Successfully posted for counter {new_counter}.");
            }
            Err(IterationError::RateLimited) => {
                store.write_cooldown(Utc::now())?;
                report.cooldown_written = true;
                report.stopped_early = true;
                eprintln!(
                    "Rate limit hit. Recorded the cooldown marker; wait {} before the next run.",
                    format_duration(config.cooldown_window)
                );
                break;
            }
            Err(IterationError::PublishedNotPersisted { id, source }) => {
                // The tweet exists but the counter file does not know it.
                // Retrying would double-post; a human has to reconcile.
                return Err(source).wrap_err(format!(
                    "tweet {id} was published but the stored counter was not updated to \
                     {new_counter}; update {} by hand before the next run",
                    store.counter_path().display()
                ));
            }
            Err(IterationError::Failed(reason)) => {
                eprintln!("Failed to post for counter {new_counter}: {reason}");
                report.stopped_early = true;
                break;
            }
        }
    }

    Ok(report)
}

enum IterationError {
    RateLimited,
    Failed(String),
    PublishedNotPersisted { id: String, source: StateError },
}

impl From<&Error> for IterationError {
    fn from(error: &Error) -> Self {
        match error {
            Error::RateLimited => IterationError::RateLimited,
            other => IterationError::Failed(other.to_string()),
        }
    }
}

/// One iteration: authenticate, fetch, locate the anchor, render, publish,
/// persist. Advances `state` only after the state file write succeeded.
async fn post_one(
    platform: &dyn Platform,
    store: &StateStore,
    config: &BotConfig,
    state: &mut PersistedState,
    new_counter: i64,
    verbose: bool,
) -> Result<(), IterationError> {
    let user = platform
        .authenticate()
        .await
        .map_err(|e| IterationError::from(&e))?;
    println!("Authenticated as @{} (id {})", user.username, user.id);

    let tweets = platform
        .recent_posts(&user.id, config.page_size)
        .await
        .map_err(|e| IterationError::from(&e))?;
    if tweets.is_empty() {
        return Err(IterationError::Failed("no recent tweets found".to_string()));
    }
    println!("Fetched {} recent tweet(s).", tweets.len());
    if verbose {
        for (index, tweet) in tweets.iter().enumerate() {
            print_tweet_line(index + 1, tweet, &user.username);
        }
    }

    let anchor = locate_anchor(&config.campaign, state, new_counter, &tweets).ok_or_else(|| {
        IterationError::Failed("no suitable quote tweet found to anchor on".to_string())
    })?;
    println!(
        "Selected anchor tweet: {}",
        campaign::tweet_url(&user.username, &anchor.id)
    );

    let text = config.campaign.tweet_text(new_counter);
    println!("Posting quote tweet with text: {text}");

    let published_id = platform
        .publish_quote(&text, &anchor.id)
        .await
        .map_err(|e| IterationError::from(&e))?;
    println!(
        "Quote tweet posted successfully: {}",
        campaign::tweet_url(&user.username, &published_id)
    );

    let new_state = PersistedState {
        counter: new_counter,
        last_post_id: Some(published_id.clone()),
    };
    store.write_state(&new_state).map_err(|source| {
        IterationError::PublishedNotPersisted {
            id: published_id,
            source,
        }
    })?;
    *state = new_state;

    Ok(())
}

/// Pick the post today's tweet should quote.
///
/// The persisted last-post id is the primary reference; the text scan is the
/// fallback for state written before ids were recorded, or for a first run.
fn locate_anchor<'a>(
    campaign: &Campaign,
    state: &PersistedState,
    new_counter: i64,
    tweets: &'a [Tweet],
) -> Option<&'a Tweet> {
    if let Some(last_id) = &state.last_post_id {
        if let Some(tweet) = tweets.iter().find(|tweet| &tweet.id == last_id) {
            return Some(tweet);
        }
    }

    let prev_counter = new_counter - 1;
    tweets
        .iter()
        .find(|tweet| tweet.quoted_id().is_some() && campaign.is_anchor_text(&tweet.text, prev_counter))
}

fn print_tweet_line(index: usize, tweet: &Tweet, username: &str) {
    let created_at = tweet.created_at.as_deref().unwrap_or("unknown");
    // Persian text: truncate on characters, not bytes.
    let mut preview: String = tweet
        .text
        .replace('\n', " ")
        .chars()
        .take(MAX_TWEET_PREVIEW_LENGTH)
        .collect();
    if tweet.text.chars().count() > MAX_TWEET_PREVIEW_LENGTH {
        preview.push_str("...");
    }

    println!(
        "{index:2}. {:8} | {created_at} | {}",
        tweet.kind(),
        campaign::tweet_url(username, &tweet.id)
    );
    println!("    {preview}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twitter::{ReferencedTweet, User};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tempfile::TempDir;

    enum PublishScript {
        Ok(&'static str),
        RateLimited,
        Fail,
    }

    /// Scripted platform double. Successful publishes are appended to the
    /// fake timeline so the next iteration can anchor on them, the way the
    /// real platform behaves between fetches.
    struct FakePlatform {
        user: User,
        tweets: Mutex<Vec<Tweet>>,
        publish_script: Mutex<VecDeque<PublishScript>>,
        published: Mutex<Vec<(String, String)>>,
        auth_calls: AtomicUsize,
    }

    impl FakePlatform {
        fn new(tweets: Vec<Tweet>, script: Vec<PublishScript>) -> Self {
            Self {
                user: User {
                    id: "12".to_string(),
                    username: "simjow".to_string(),
                },
                tweets: Mutex::new(tweets),
                publish_script: Mutex::new(script.into()),
                published: Mutex::new(Vec::new()),
                auth_calls: AtomicUsize::new(0),
            }
        }

        fn published(&self) -> Vec<(String, String)> {
            self.published.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl Platform for FakePlatform {
        async fn authenticate(&self) -> Result<User, Error> {
            self.auth_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.user.clone())
        }

        async fn recent_posts(
            &self,
            _user_id: &str,
            _page_size: usize,
        ) -> Result<Vec<Tweet>, Error> {
            Ok(self.tweets.lock().unwrap().clone())
        }

        async fn publish_quote(&self, text: &str, quote_tweet_id: &str) -> Result<String, Error> {
            let next = self
                .publish_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(PublishScript::Fail);
            match next {
                PublishScript::Ok(id) => {
                    self.published
                        .lock()
                        .unwrap()
                        .push((text.to_string(), quote_tweet_id.to_string()));
                    self.tweets.lock().unwrap().insert(
                        0,
                        quote_tweet(id, &format!("{text} https://t.co/xyz"), quote_tweet_id),
                    );
                    Ok(id.to_string())
                }
                PublishScript::RateLimited => Err(Error::RateLimited),
                PublishScript::Fail => Err(Error::InvalidResponse("scripted failure".to_string())),
            }
        }
    }

    fn quote_tweet(id: &str, text: &str, quoted: &str) -> Tweet {
        Tweet {
            id: id.to_string(),
            text: text.to_string(),
            created_at: None,
            referenced_tweets: Some(vec![ReferencedTweet {
                ref_type: "quoted".to_string(),
                id: quoted.to_string(),
            }]),
        }
    }

    fn plain_tweet(id: &str, text: &str) -> Tweet {
        Tweet {
            id: id.to_string(),
            text: text.to_string(),
            created_at: None,
            referenced_tweets: None,
        }
    }

    /// Config whose schedule expects `expected` on `today`.
    fn config_expecting(today: NaiveDate, expected: i64) -> BotConfig {
        BotConfig {
            campaign: Campaign {
                start_date: today - Duration::days(expected - 1),
                min_counter: 1,
                max_counter: 1000,
                final_text: "هزارتو".to_string(),
            },
            cooldown_window: Duration::minutes(16),
            page_size: 50,
        }
    }

    fn store_with_state(dir: &TempDir, counter: i64, last_post_id: Option<&str>) -> StateStore {
        let store = StateStore::new(dir.path());
        store
            .write_state(&PersistedState {
                counter,
                last_post_id: last_post_id.map(str::to_string),
            })
            .unwrap();
        store
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::seconds(754)), "12m 34s");
        assert_eq!(format_duration(Duration::seconds(60)), "1m 0s");
        assert_eq!(format_duration(Duration::seconds(-5)), "0m 0s");
    }

    #[test]
    fn test_is_ci_environment() {
        // This test is the only reader and writer of these variables.
        std::env::remove_var("CI");
        std::env::remove_var("GITHUB_ACTIONS");
        assert!(!is_ci_environment());

        std::env::set_var("CI", "true");
        assert!(is_ci_environment());
        std::env::remove_var("CI");

        std::env::set_var("GITHUB_ACTIONS", "1");
        assert!(is_ci_environment());
        std::env::remove_var("GITHUB_ACTIONS");
    }

    #[tokio::test]
    async fn test_two_owed_days_produce_two_posts() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 98, Some("t98"));
        let platform = FakePlatform::new(
            vec![quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97")],
            vec![PublishScript::Ok("t99"), PublishScript::Ok("t100")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report.posted, vec![99, 100]);
        assert!(!report.stopped_early);
        assert_eq!(
            platform.published(),
            vec![
                ("نود و نه تو".to_string(), "t98".to_string()),
                ("صد تو".to_string(), "t99".to_string()),
            ]
        );
        let state = store.read_state();
        assert_eq!(state.counter, 100);
        assert_eq!(state.last_post_id.as_deref(), Some("t100"));
    }

    #[tokio::test]
    async fn test_rate_limited_publish_writes_cooldown_and_stops() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 98, Some("t98"));
        let platform = FakePlatform::new(
            vec![quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97")],
            vec![PublishScript::RateLimited],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert!(report.posted.is_empty());
        assert!(report.stopped_early);
        assert!(report.cooldown_written);
        assert!(store.read_cooldown().is_some());
        assert!(platform.published().is_empty());
        assert_eq!(store.read_state().counter, 98);
    }

    #[tokio::test]
    async fn test_final_day_posts_terminal_phrase() {
        let today = NaiveDate::from_ymd_opt(2027, 12, 12).unwrap();
        let config = config_expecting(today, 1000);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 999, Some("t999"));
        let platform = FakePlatform::new(
            vec![quote_tweet("t999", "نهصد و نود و نه تو https://t.co/a", "t998")],
            vec![PublishScript::Ok("t1000")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report.posted, vec![1000]);
        assert_eq!(
            platform.published(),
            vec![("هزارتو".to_string(), "t999".to_string())]
        );
        assert_eq!(store.read_state().counter, 1000);
    }

    #[tokio::test]
    async fn test_invalid_stored_counter_aborts_before_any_network_call() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("counter.txt"), "0\n").unwrap();
        let store = StateStore::new(dir.path());
        let platform = FakePlatform::new(Vec::new(), Vec::new());

        let result = run_pending(&platform, &store, &config, today, true, false).await;

        assert!(result.is_err());
        assert_eq!(platform.auth_calls.load(Ordering::SeqCst), 0);
        assert!(platform.published().is_empty());
    }

    #[tokio::test]
    async fn test_up_to_date_counter_is_a_no_op_twice() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 100, Some("t100"));
        let platform = FakePlatform::new(Vec::new(), Vec::new());

        for _ in 0..2 {
            let report = run_pending(&platform, &store, &config, today, true, false)
                .await
                .unwrap();
            assert_eq!(report, RunReport::default());
        }

        assert_eq!(platform.auth_calls.load(Ordering::SeqCst), 0);
        assert!(platform.published().is_empty());
        assert_eq!(store.read_state().counter, 100);
    }

    #[tokio::test]
    async fn test_outside_campaign_window_is_a_no_op() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let mut config = config_expecting(today, 100);
        config.campaign.start_date = today + Duration::days(5);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 1, None);
        let platform = FakePlatform::new(Vec::new(), Vec::new());

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report, RunReport::default());
        assert_eq!(platform.auth_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_anchor_stops_the_loop() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        // No last post id recorded and nothing in the timeline matches.
        let store = store_with_state(&dir, 98, None);
        let platform = FakePlatform::new(
            vec![plain_tweet("t1", "unrelated"), plain_tweet("t2", "also unrelated")],
            vec![PublishScript::Ok("t99")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert!(report.posted.is_empty());
        assert!(report.stopped_early);
        assert!(platform.published().is_empty());
        assert_eq!(store.read_state().counter, 98);
    }

    #[tokio::test]
    async fn test_anchor_falls_back_to_text_match() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 99);
        let dir = TempDir::new().unwrap();
        // Legacy state: no post id recorded.
        let store = store_with_state(&dir, 98, None);
        let platform = FakePlatform::new(
            vec![
                plain_tweet("t5", "noise"),
                quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97"),
            ],
            vec![PublishScript::Ok("t99")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report.posted, vec![99]);
        assert_eq!(
            platform.published(),
            vec![("نود و نه تو".to_string(), "t98".to_string())]
        );
    }

    #[tokio::test]
    async fn test_bootstrap_quotes_any_quote_tweet() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 19).unwrap();
        let config = config_expecting(today, 2);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 1, None);
        let platform = FakePlatform::new(
            vec![
                plain_tweet("t0", "introduction"),
                quote_tweet("t1", "kickoff, unrelated wording", "t0"),
            ],
            vec![PublishScript::Ok("t2")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report.posted, vec![2]);
        assert_eq!(
            platform.published(),
            vec![("دو تو".to_string(), "t1".to_string())]
        );
    }

    #[tokio::test]
    async fn test_active_cooldown_fails_fast_without_posting() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 98, Some("t98"));
        store.write_cooldown(Utc::now()).unwrap();
        let platform = FakePlatform::new(
            vec![quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97")],
            vec![PublishScript::Ok("t99")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert!(report.posted.is_empty());
        assert!(report.stopped_early);
        assert!(platform.published().is_empty());
        // The marker stays for the next scheduled run.
        assert!(store.read_cooldown().is_some());
    }

    #[tokio::test]
    async fn test_elapsed_cooldown_is_cleared_and_run_proceeds() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 99);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 98, Some("t98"));
        store
            .write_cooldown(Utc::now() - Duration::minutes(17))
            .unwrap();
        let platform = FakePlatform::new(
            vec![quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97")],
            vec![PublishScript::Ok("t99")],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert_eq!(report.posted, vec![99]);
        assert_eq!(store.read_cooldown(), None);
    }

    #[tokio::test]
    async fn test_platform_error_stops_without_state_change() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 25).unwrap();
        let config = config_expecting(today, 100);
        let dir = TempDir::new().unwrap();
        let store = store_with_state(&dir, 98, Some("t98"));
        let platform = FakePlatform::new(
            vec![quote_tweet("t98", "نود و هشت تو https://t.co/a", "t97")],
            vec![PublishScript::Fail],
        );

        let report = run_pending(&platform, &store, &config, today, true, false)
            .await
            .unwrap();

        assert!(report.posted.is_empty());
        assert!(report.stopped_early);
        assert!(!report.cooldown_written);
        assert_eq!(store.read_state().counter, 98);
    }
}
