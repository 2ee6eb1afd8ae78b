//! Rule-based field extractors for well-completion reports.

pub mod anchors;
pub mod corrections;
pub mod depths;
pub mod numbers;
pub mod patterns;
pub mod pump;

pub use anchors::{apply_anchor_rules, AnchorRule, CaptureKind, ANCHOR_RULES};
pub use corrections::{apply_corrections, Correction, CORRECTIONS};
pub use depths::{resolve_depths, resolve_extremes, DepthMarker, Extremes};
pub use numbers::{normalize_depth, normalize_number, render_depth};
pub use pump::{find_pump_depth, resolve_pump_depth, PumpDepthSource};
