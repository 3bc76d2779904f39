use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("failed to build LLM client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("LLM returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("LLM response has no `response` field")]
    MissingResponse,

    #[error("narrative generation unavailable: {0}")]
    Unavailable(String),
}

pub type NarrativeResult<T> = Result<T, NarrativeError>;
