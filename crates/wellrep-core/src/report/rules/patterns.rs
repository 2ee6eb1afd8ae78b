//! Compiled regex patterns for well-completion report extraction.
//!
//! Every pattern is built once on first use and shared read-only across
//! threads. `{NUM}` inside a template stands for the numeric literal grammar.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric literal grammar: `1.234,56`, `1 234,56`, `1234,56`, `943.21`.
///
/// The grouped alternative needs at least one separator, otherwise a plain
/// `1200.5` would stop after its first three digits.
pub const NUMBER_GRAMMAR: &str =
    r"(?:\d{1,3}(?:[. \u{00A0}]\d{3}\b)+|\d+)(?:[.,]\d+)?";

/// Characters scanned after a pump keyword.
pub const PUMP_WINDOW_CHARS: usize = 200;

/// Maximum gap between consecutive labels of the OD/ID/COMP/PROFD block.
pub const BLOCK_GAP_CHARS: usize = 80;

fn compile(template: &str) -> Regex {
    Regex::new(
        &template
            .replace("{NUM}", NUMBER_GRAMMAR)
            .replace("{GAP}", &BLOCK_GAP_CHARS.to_string()),
    )
    .unwrap()
}

lazy_static! {
    pub static ref NUMBER: Regex = compile("{NUM}");

    // Well identifier (SPT-115, SPT 115, SPT115)
    pub static ref WELL_NAME: Regex = compile(r"(?i)\bSPT[-\s]?(\d+)\b");

    // Tubing block: OD / ID / COMP / PROFD
    pub static ref OUTER_DIAMETER: Regex = compile(r"(?i)\bOD\s*({NUM})");

    pub static ref INNER_DIAMETER: Regex = compile(r"(?i)\bID\s*({NUM})");

    pub static ref JOINT_LENGTH: Regex =
        compile(r"(?i)\bCOMP(?:ETENCIA|RIMENTO)?\s*({NUM})");

    pub static ref LET_DOWN: Regex = compile(r"(?i)LET\s*DOWN\s*({NUM})");

    pub static ref DEPTH_MARKER: Regex = compile(r"(?i)\bPROFD\s*({NUM})");

    // Polished rod, kept verbatim: 1 1/4"
    pub static ref ROD_STRING: Regex = compile(r#"(?i)HASTE\s+POLIDA\s+([0-9\s/"]+)"#);

    // Textual diameters: TUBOS DE PRODUÇÃO 2 7/8" EU
    pub static ref TUBING_OD_TEXT: Regex =
        compile(r#"(?i)TUBOS\s+DE\s+PRODU[ÇC][AÃ]O\s+([0-9\s/]+)(?:"|''|”)"#);

    pub static ref CASING_OD_TEXT: Regex =
        compile(r#"(?i)REVESTIMENTO\s+DE\s+PRODU[ÇC][AÃ]O\s+([0-9\s/]+)(?:"|''|”)"#);

    // Weights
    pub static ref TUBING_WEIGHT: Regex = compile(
        r"(?i)\bPESO(?:\s+NOMINAL)?(?:\s+(?:DA\s+COLUNA|DOS\s+TUBOS))?\s*[:=]?\s*({NUM})"
    );

    pub static ref CASING_WEIGHT: Regex =
        compile(r"(?i)\bPESO\s+DO\s+REVESTIMENTO\s*[:=]?\s*({NUM})");

    // Reference elevation
    pub static ref KB_OFFSET: Regex =
        compile(r"(?i)(?:\bMESA\s+ROTATIVA|\bKB)\s*[:=]?\s*({NUM})");

    // Casing interval
    pub static ref CASING_TOP: Regex =
        compile(r"(?i)\bTOPO\s+DO\s+REVESTIMENTO\s*[:=]?\s*({NUM})");

    pub static ref CASING_BOTTOM: Regex =
        compile(r"(?i)\bSAPATA(?:\s+DO\s+REVESTIMENTO)?\s*[:=]?\s*({NUM})");

    // Downhole equipment
    pub static ref TUBING_ANCHOR: Regex =
        compile(r"(?i)\b[ÂA]NCORA(?:\s+DE\s+TUBOS)?\s*[:=]?\s*({NUM})");

    pub static ref PLUGBACK: Regex =
        compile(r"(?i)(?:\bTAMP[ÃA]O|\bPLUG\s*BACK|\bFUNDO\s+FALSO)\s*[:=]?\s*({NUM})");

    // Perforated interval: CANHONEADO 1402,5 A 1410
    pub static ref PERFORATION: Regex = compile(
        r"(?i)\bCANHONE(?:IO|ADO)\s*[:=]?\s*({NUM})\s*m?\s*(?:AT[ÉE]|A|-|/)\s*({NUM})"
    );

    // Pump keywords and the structural block used when they are missing.
    // Gaps are greedy: the last PROFD starting within a gap of COMP is taken.
    pub static ref PUMP_ANCHOR: Regex =
        compile(r"(?i)PARTE\s+SUPERIOR\s+DA\s+BOMBA|BOMBA(?:\s+TUBULAR)?");

    pub static ref PUMP_BLOCK: Regex = compile(
        r"(?is)\bOD\s*{NUM}.{0,{GAP}}\bID\s*{NUM}.{0,{GAP}}\bCOMP\s*{NUM}.{0,{GAP}}\bPROFD\s*({NUM})"
    );

    // First JSON object in a model reply
    pub static ref JSON_OBJECT: Regex = compile(r"(?s)\{.*\}");
}
