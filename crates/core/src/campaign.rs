//! Campaign schedule and tweet composition.
//!
//! The counting campaign is a pure function of the calendar: the counter
//! equals `min_counter` on the start date and grows by one per day until
//! `max_counter`, whose post carries a ceremonial closing phrase instead of
//! a numeral.

use chrono::NaiveDate;

use crate::persian;

/// Sentinel counter value meaning "outside the campaign window".
pub const NOT_SCHEDULED: i64 = 0;

/// Immutable campaign configuration, built once by the shell from the
/// environment and injected into everything that needs the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub start_date: NaiveDate,
    pub min_counter: i64,
    pub max_counter: i64,
    /// Posted for `max_counter` in place of the numeral word form.
    pub final_text: String,
}

impl Campaign {
    /// Counter value that should exist on `today`.
    ///
    /// Returns [`NOT_SCHEDULED`] before the start date and after the final
    /// day. The final day itself is inside the window: `max_counter` is a
    /// reachable, postable value.
    pub fn expected_counter_for(&self, today: NaiveDate) -> i64 {
        let days_passed = (today - self.start_date).num_days();
        let count = days_passed + self.min_counter;

        if count < self.min_counter || count > self.max_counter {
            NOT_SCHEDULED
        } else {
            count
        }
    }

    /// Text of the quote-tweet announcing `counter`.
    pub fn tweet_text(&self, counter: i64) -> String {
        if counter == self.max_counter {
            self.final_text.clone()
        } else {
            format!("{} تو", persian::to_persian_words(counter))
        }
    }

    /// Whether `text` is the tweet this bot posted for `prev_counter`.
    ///
    /// Used to find the anchor post to quote. At or below the first counter
    /// there is no prior rendered text to match, so any candidate qualifies.
    /// Fetched quote-tweets carry a trailing t.co link after the posted
    /// text, hence the prefix match.
    pub fn is_anchor_text(&self, text: &str, prev_counter: i64) -> bool {
        if prev_counter <= self.min_counter {
            return true;
        }
        text.starts_with(&self.tweet_text(prev_counter))
    }
}

/// Canonical URL of a tweet.
pub fn tweet_url(username: &str, tweet_id: &str) -> String {
    format!("https://x.com/{username}/status/{tweet_id}")
}
