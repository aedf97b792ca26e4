use thiserror::Error;

#[derive(Error, Debug)]
pub enum NavError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport: {0}")]
    Transport(String),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unable to encode request: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("malformed response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl NavError {
    /// Status code for failures the server reported itself.
    pub fn status(&self) -> Option<u16> {
        match self {
            NavError::Status { status, .. } => Some(*status),
            NavError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
