#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Missing {0}")]
    MissingCredentials(&'static str),

    #[error("{channel} request failed: {source}")]
    Request {
        channel: &'static str,
        source: reqwest::Error,
    },

    #[error("{channel} API failed: {status} {body}")]
    Status {
        channel: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{channel} API error: {description}")]
    Api {
        channel: &'static str,
        description: String,
    },
}
