/// Platform client error taxonomy. The posting loop branches on
/// `RateLimited`; everything else stops the run without a retry.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("rate limited by the platform")]
    RateLimited,

    #[error("platform API error [{status}]: {body}")]
    Api { status: u16, body: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("unexpected platform response: {0}")]
    InvalidResponse(String),
}
