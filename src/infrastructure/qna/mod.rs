//! # QnA Providers
//!
//! Implementations of the `QnaProvider` trait for hosted extractive question-answering models.

mod huggingface;

pub use huggingface::HuggingFaceQna;

/// Error raised by a QnA provider
#[derive(Debug, Clone)]
pub struct Error {
    pub message: String,
    pub provider: String,
}

impl Error {
    pub fn new(provider: &str, message: impl Into<String>) -> Self {
        Self {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.provider, self.message)
    }
}

impl std::error::Error for Error {}
