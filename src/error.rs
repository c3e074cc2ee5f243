use thiserror::Error;

/// Errors raised at the crate's I/O edges. Curve generation itself cannot fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("image encode error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParam { name: &'static str, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, Error>;
