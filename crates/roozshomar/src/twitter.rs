//! Minimal X/Twitter API v2 client covering what the bot needs: the
//! authenticated user, their recent timeline, quote-tweet publishing, and
//! batch user lookup.

use serde::Deserialize;

use crate::error::Error;

const DEFAULT_API_BASE: &str = "https://api.x.com/2";

/// Allowed `max_results` range of the user-tweets endpoint.
const PAGE_SIZE_RANGE: (usize, usize) = (5, 100);

/// Twitter configuration from environment variables
#[derive(Debug, Clone)]
pub struct TwitterConfig {
    pub base_url: String,
    pub access_token: String,
}

impl TwitterConfig {
    /// Load configuration from environment variables.
    ///
    /// `ACCESS_TOKEN` must be an OAuth 2.0 user-context token authorized for
    /// `tweet.read`, `tweet.write`, and `users.read`. `TWITTER_API_BASE_URL`
    /// overrides the API host, which also makes the client testable against
    /// a local mock server.
    pub fn from_env() -> Result<Self, Error> {
        let access_token = std::env::var("ACCESS_TOKEN").map_err(|_| {
            Error::MissingCredentials("ACCESS_TOKEN environment variable not set".to_string())
        })?;

        Ok(Self {
            base_url: std::env::var("TWITTER_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            access_token,
        })
    }
}

/// Create an authenticated HTTP client with bearer auth headers
fn create_authenticated_client(config: &TwitterConfig) -> Result<reqwest::Client, Error> {
    use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.access_token))
            .map_err(|e| Error::Config(format!("access token is not a valid header value: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(Error::Http)
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReferencedTweet {
    #[serde(rename = "type")]
    pub ref_type: String,
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id: String,
    pub text: String,
    pub created_at: Option<String>,
    pub referenced_tweets: Option<Vec<ReferencedTweet>>,
}

impl Tweet {
    /// The tweet this one quotes, if it is a quote-tweet.
    pub fn quoted_id(&self) -> Option<&str> {
        self.referenced_tweets
            .as_ref()?
            .iter()
            .find(|r| r.ref_type == "quoted")
            .map(|r| r.id.as_str())
    }

    /// Descriptive label for run listings.
    pub fn kind(&self) -> &'static str {
        if let Some(first) = self.referenced_tweets.as_ref().and_then(|refs| refs.first()) {
            match first.ref_type.as_str() {
                "retweeted" => return "retweet",
                "replied_to" => return "reply",
                "quoted" => return "quote",
                _ => {}
            }
        }
        if self.text.starts_with('@') {
            return "reply";
        }
        "original"
    }
}

#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}

pub struct TwitterApi {
    base_url: String,
    client: reqwest::Client,
}

impl TwitterApi {
    pub fn new(config: &TwitterConfig) -> Result<Self, Error> {
        Ok(Self {
            // Handle base_url that may or may not have trailing slash
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: create_authenticated_client(config)?,
        })
    }

    /// Map a response status before touching the body. 429 is the one
    /// status the posting loop must tell apart from everything else.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(Error::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// The authenticated user (`GET /users/me`).
    pub async fn get_me(&self) -> Result<User, Error> {
        let url = format!("{}/users/me", self.base_url);
        let response = Self::check(self.client.get(&url).send().await?).await?;

        let envelope: DataEnvelope<User> = response.json().await?;
        envelope.data.ok_or_else(|| {
            Error::InvalidResponse("could not get authenticated user information".to_string())
        })
    }

    /// Recent tweets of a user, most recent first.
    pub async fn get_user_tweets(
        &self,
        user_id: &str,
        page_size: usize,
    ) -> Result<Vec<Tweet>, Error> {
        let url = format!("{}/users/{}/tweets", self.base_url, user_id);
        let max_results = page_size.clamp(PAGE_SIZE_RANGE.0, PAGE_SIZE_RANGE.1).to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("max_results", max_results.as_str()),
                ("tweet_fields", "created_at,referenced_tweets"),
                ("expansions", "referenced_tweets.id"),
            ])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: DataEnvelope<Vec<Tweet>> = response.json().await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Publish a quote-tweet and return the created tweet id.
    pub async fn create_quote_tweet(
        &self,
        text: &str,
        quote_tweet_id: &str,
    ) -> Result<String, Error> {
        let url = format!("{}/tweets", self.base_url);
        let body = serde_json::json!({
            "text": text,
            "quote_tweet_id": quote_tweet_id,
        });

        let response = Self::check(self.client.post(&url).json(&body).send().await?).await?;

        let envelope: DataEnvelope<CreatedTweet> = response.json().await?;
        envelope
            .data
            .map(|tweet| tweet.id)
            .ok_or_else(|| Error::InvalidResponse("create tweet response had no data".to_string()))
    }

    /// Resolve up to 100 user ids in one request (`GET /users?ids=...`).
    /// Ids the platform does not know are simply absent from the result.
    pub async fn get_users_by_ids(&self, ids: &[String]) -> Result<Vec<User>, Error> {
        let url = format!("{}/users", self.base_url);
        let ids_param = ids.join(",");

        let response = self
            .client
            .get(&url)
            .query(&[("ids", ids_param.as_str())])
            .send()
            .await?;
        let response = Self::check(response).await?;

        let envelope: DataEnvelope<Vec<User>> = response.json().await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

/// The slice of the platform the posting loop depends on. Scenario tests
/// substitute a scripted double for the live API.
#[async_trait::async_trait]
pub trait Platform {
    async fn authenticate(&self) -> Result<User, Error>;
    async fn recent_posts(&self, user_id: &str, page_size: usize) -> Result<Vec<Tweet>, Error>;
    async fn publish_quote(&self, text: &str, quote_tweet_id: &str) -> Result<String, Error>;
}

#[async_trait::async_trait]
impl Platform for TwitterApi {
    async fn authenticate(&self) -> Result<User, Error> {
        self.get_me().await
    }

    async fn recent_posts(&self, user_id: &str, page_size: usize) -> Result<Vec<Tweet>, Error> {
        self.get_user_tweets(user_id, page_size).await
    }

    async fn publish_quote(&self, text: &str, quote_tweet_id: &str) -> Result<String, Error> {
        self.create_quote_tweet(text, quote_tweet_id).await
    }
}
