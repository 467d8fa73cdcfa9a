//! Dispatch sentences and their outcomes.

mod command;

pub use command::Command;

use crate::types::Record;

/// Result of one dispatch call.
///
/// The variant is determined by the parsed command, so callers can match
/// on exactly the shape they asked for.
#[derive(Debug, Clone)]
pub enum QueryOutcome {
    /// All records of a collection (`select * from ...`)
    Records(Vec<Record>),

    /// A single lookup, absent when no document has the id
    Record(Option<Record>),

    /// Store-assigned id of a newly inserted document
    Inserted(String),

    /// Completed write with nothing to return (update / delete)
    Done,
}
