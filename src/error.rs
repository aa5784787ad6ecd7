use reqwest::StatusCode;
use thiserror::Error;

use crate::post::MAX_TEXT_LEN;

/// Everything that can go wrong talking to the backend or the image host.
///
/// The CLI boundary shows a generic message either way; these kinds exist so
/// the logs can say what actually happened.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("image upload failed: {0}")]
    Upload(String),

    #[error("report text is {0} characters, limit is {MAX_TEXT_LEN}")]
    TextTooLong(usize),

    #[error("could not read image file: {0}")]
    Io(#[from] std::io::Error),

    #[error("base url must be http(s): {0}")]
    BaseUrl(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
