use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed meetings document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("meeting #{index} has an unreadable `{field}`: {value:?}")]
    InvalidDate {
        index: usize,
        field: &'static str,
        value: String,
    },
}
