use reqwest::StatusCode;
use thiserror::Error;

/// Failures that the status-code rules of the fetcher do not absorb.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("could not decode sprite: {0}")]
    Image(#[from] image::ImageError),
}
