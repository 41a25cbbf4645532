//! Function span extraction
//!
//! Global invariants enforced:
//! - Every declaration the provider yields is considered exactly once
//! - Records are pushed to the sink as they are produced, never collected
//! - No deduplication at this layer; duplicates are a sink policy

use crate::ast::FunctionRecord;
use crate::parser::ParsedUnit;
use crate::sink::RecordSink;
use anyhow::Result;

/// Extract one record per function definition in a translation unit
///
/// Walks the unit's declarations in traversal order, filters for
/// definitions (function-like declarations with an attached body), and
/// pushes one record per match to the sink immediately. Prototypes and
/// forward declarations produce nothing. Returns the number of records
/// written; the observable effect is the sequence of sink writes.
///
/// Declarations the provider skipped or mangled are not an error here: a
/// unit the provider could not fully recognize simply contributes fewer
/// records.
pub fn extract_unit(unit: &dyn ParsedUnit, sink: &mut dyn RecordSink) -> Result<usize> {
    let mut written = 0;
    for decl in unit.declarations() {
        if !decl.is_definition() {
            continue;
        }
        let record = FunctionRecord::from_declaration(&decl);
        sink.append(&record)?;
        written += 1;
    }
    Ok(written)
}
