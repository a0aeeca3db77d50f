use serde::{Deserialize, Serialize};

/// One step of an edit script.
///
/// `from_index` and `to_index` are positions in the `from` and `to` nested
/// sequences. Inner sequences are carried by value so a script can outlive
/// the inputs it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "op")]
pub enum EditOperation<T> {
    Match {
        from_index: usize,
        to_index: usize,
        value: Vec<T>,
    },
    Substitute {
        from_index: usize,
        to_index: usize,
        from: Vec<T>,
        to: Vec<T>,
    },
    Delete {
        from_index: usize,
        value: Vec<T>,
    },
    Insert {
        to_index: usize,
        value: Vec<T>,
    },
}

/// Result of a calculation: the distance and the script that realizes it.
/// Read-only once a strategy hands it back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditDistanceContainer<T> {
    pub(crate) distance: u64,
    pub(crate) operations: Vec<EditOperation<T>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationCounts {
    pub matches: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl OperationCounts {
    /// Number of operations that change something.
    pub fn edits(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }
}
