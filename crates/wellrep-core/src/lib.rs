//! Core library for well-completion report extraction.
//!
//! This crate provides:
//! - PDF text extraction (pdf-extract text layer with a lopdf fallback)
//! - A deterministic rule engine for Portuguese completion reports
//! - Report field models and pipeline configuration
//! - The provider contract shared by rule-based and model-backed extraction

pub mod error;
pub mod models;
pub mod pdf;
pub mod provider;
pub mod report;

pub use error::{PdfError, ProviderError, Result, WellrepError};
pub use models::config::WellrepConfig;
pub use models::report::{Field, FieldMap, ValueSet};
pub use pdf::{PdfExtractor, PdfProcessor, PdfText, TextMethod};
pub use provider::{ExtractionProvider, ProviderKind, RuleProvider};
pub use report::{DebugTrace, Extraction, ReportParser, RuleEngine};
