//! Store failure taxonomy
//!
//! Controllers branch on these: a conflict retries the whole pass from a
//! fresh read, a not-found on a delete usually means another pass got there
//! first, and everything else propagates.

use std::fmt;

/// Failures surfaced by the object store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound {
        kind: &'static str,
        name: String,
    },
    Conflict {
        kind: &'static str,
        name: String,
        expected: u64,
        actual: u64,
    },
    AlreadyExists {
        kind: &'static str,
        name: String,
    },
    Codec {
        kind: &'static str,
        detail: String,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, StoreError::AlreadyExists { .. })
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound { kind, name } => write!(f, "{kind} {name:?} not found"),
            StoreError::Conflict {
                kind,
                name,
                expected,
                actual,
            } => write!(
                f,
                "{kind} {name:?} revision conflict: expected {expected}, is {actual}"
            ),
            StoreError::AlreadyExists { kind, name } => {
                write!(f, "{kind} {name:?} already exists")
            }
            StoreError::Codec { kind, detail } => write!(f, "{kind} codec failure: {detail}"),
        }
    }
}

impl std::error::Error for StoreError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_predicates() {
        let not_found = StoreError::NotFound {
            kind: "board",
            name: "board".into(),
        };
        assert!(not_found.is_not_found());
        assert!(!not_found.is_conflict());

        let conflict = StoreError::Conflict {
            kind: "board",
            name: "board".into(),
            expected: 3,
            actual: 5,
        };
        assert!(conflict.is_conflict());
        assert!(!conflict.is_already_exists());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Conflict {
            kind: "board",
            name: "board".into(),
            expected: 3,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "board \"board\" revision conflict: expected 3, is 5"
        );
    }
}
