use crate::toolkit::ToolkitError;
use std::fmt;
use thiserror::Error;

/// Why a record was dropped.
#[derive(Debug, Error)]
pub enum RejectReason {
    #[error("could not be parsed: {0}")]
    Parse(#[source] ToolkitError),

    #[error("describes no structure")]
    Empty,

    #[error("normalization failed: {0}")]
    Normalize(#[source] ToolkitError),

    #[error("fingerprint provider failed: {0}")]
    Fingerprint(#[source] ToolkitError),

    #[error("fingerprint has {actual} bits, expected {expected}")]
    WidthMismatch { expected: usize, actual: usize },
}

/// A dropped record together with enough context to report it.
#[derive(Debug)]
pub struct Rejection {
    pub index: usize,
    pub substance_id: String,
    /// Short description of the raw input (the notation or the record title).
    pub raw: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "record {} ('{}', id '{}') {}",
            self.index, self.raw, self.substance_id, self.reason
        )
    }
}

/// Result of one pipeline stage for one record.
///
/// Stages never fail a run; they either hand the record on or reject it.
#[derive(Debug)]
pub enum Outcome<T> {
    Accepted(T),
    Rejected(Rejection),
}

impl<T> Outcome<T> {
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Outcome::Accepted(value) => f(value),
            Outcome::Rejected(rejection) => Outcome::Rejected(rejection),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        self.and_then(|value| Outcome::Accepted(f(value)))
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<T> {
        match self {
            Outcome::Accepted(value) => Some(value),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Accepted(_) => None,
            Outcome::Rejected(rejection) => Some(rejection),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected<T>() -> Outcome<T> {
        Outcome::Rejected(Rejection {
            index: 4,
            substance_id: "x".into(),
            raw: "C1CC".into(),
            reason: RejectReason::Empty,
        })
    }

    #[test]
    fn and_then_short_circuits_rejections() {
        let mut called = false;
        let out: Outcome<u8> = rejected::<u8>().and_then(|v| {
            called = true;
            Outcome::Accepted(v)
        });
        assert!(!called);
        assert_eq!(out.rejection().map(|r| r.index), Some(4));
    }

    #[test]
    fn map_transforms_accepted_values() {
        let out = Outcome::Accepted(2).map(|v| v * 10);
        assert!(out.is_accepted());
        assert_eq!(out.accepted(), Some(20));
    }

    #[test]
    fn rejection_display_names_record_and_reason() {
        let text = rejected::<()>().rejection().unwrap().to_string();
        assert_eq!(text, "record 4 ('C1CC', id 'x') describes no structure");
    }
}
