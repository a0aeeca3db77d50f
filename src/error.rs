use thiserror::Error;

pub type Result<T> = std::result::Result<T, EditDistanceError>;

/// Every way a calculation (or the application of its script) can fail.
///
/// Successful results are never mixed with these; a strategy returns either a
/// complete [`EditDistanceContainer`](crate::EditDistanceContainer) or one of
/// the variants below.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditDistanceError {
    /// The workspace needed for the inputs is larger than the configured ceiling.
    #[error("workspace of {cells} cells exceeds the configured ceiling of {max_cells}")]
    ResourceExceeded { cells: u64, max_cells: u64 },

    /// The cancellation flag was raised before the calculation finished.
    #[error("calculation cancelled")]
    Cancelled,

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An edit script was applied to a sequence it was not computed from.
    #[error("edit script does not fit input at index {from_index}: {reason}")]
    ScriptMismatch { from_index: usize, reason: String },
}
