//! Revision numbers
//!
//! A revision is either a concrete, monotonically increasing number or the
//! `head` sentinel meaning "latest at request time". Head is resolved to a
//! concrete number exactly once per export, before the export key is formed,
//! so concurrent edits cannot change what a request refers to mid-flight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A project revision number or the head sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevisionNumber {
    /// Resolve to the latest revision at request time
    Head,
    /// A concrete revision
    Numbered(u64),
}

impl RevisionNumber {
    /// Returns `true` for the head sentinel
    pub fn is_head(&self) -> bool {
        matches!(self, RevisionNumber::Head)
    }

    /// Returns the concrete value, or `None` for head
    pub fn value(&self) -> Option<u64> {
        match self {
            RevisionNumber::Head => None,
            RevisionNumber::Numbered(n) => Some(*n),
        }
    }
}

impl fmt::Display for RevisionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevisionNumber::Head => write!(f, "head"),
            RevisionNumber::Numbered(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for RevisionNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("head") {
            return Ok(RevisionNumber::Head);
        }
        s.parse::<u64>()
            .map(RevisionNumber::Numbered)
            .map_err(|_| format!("Invalid revision number: {s}. Expected a number or 'head'"))
    }
}
