//! Error types for the wellrep-core library.

use thiserror::Error;

/// Main error type for the wellrep library.
#[derive(Error, Debug)]
pub enum WellrepError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Extraction provider error.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised by extraction providers.
///
/// The rule engine itself never fails; these only come from provider
/// selection and the remote text-completion path.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The requested provider name is not known.
    #[error("provider '{0}' is not supported")]
    Unsupported(String),

    /// A remote provider needs an API key that was not configured.
    #[error("{0} is not set")]
    MissingApiKey(String),

    /// The remote endpoint answered with an error or could not be reached.
    #[error("{provider} request failed: {reason}")]
    Http { provider: String, reason: String },

    /// The remote reply did not contain a usable JSON object.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// Result type for the wellrep library.
pub type Result<T> = std::result::Result<T, WellrepError>;
