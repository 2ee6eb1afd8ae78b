//! Report field extraction module.

mod parser;
pub mod rules;
pub mod trace;

pub use parser::{Extraction, ReportParser, RuleEngine};
pub use trace::DebugTrace;
