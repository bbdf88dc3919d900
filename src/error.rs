use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid image shape {shape:?}: {reason}")]
    Shape { shape: Vec<usize>, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("PNG encoding failed: {0}")]
    Encoding(#[from] ::png::EncodingError),

    #[error("PNG decoding failed: {0}")]
    Decoding(#[from] ::png::DecodingError),

    #[error("image can not be stored as PNG: {0}")]
    Unencodable(String),

    #[error("unsupported image: {0}")]
    Unsupported(String),

    #[error("invalid argument: {0}")]
    Validation(String),

    #[error("invalid template {template:?}: {reason}")]
    Template { template: String, reason: String },
}

impl Error {
    pub(crate) fn shape(shape: &[usize], reason: impl Into<String>) -> Error {
        Error::Shape {
            shape: shape.to_vec(),
            reason: reason.into(),
        }
    }
}
