//! Evidence Collection
//!
//! The hunters' shared findings: at most three unique evidence kinds, and the
//! verdict that compares them against the ghost classes' signatures.

use rand::Rng;
use thiserror::Error;

use haunt_events::{EvidenceKind, GhostClass, MAX_EVIDENCE};

/// Why a submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("{0} evidence has already been collected")]
    Duplicate(EvidenceKind),
    #[error("evidence collection already holds {MAX_EVIDENCE} kinds")]
    Full,
}

/// Outcome of reviewing the collected evidence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Fewer than three kinds collected
    Insufficient,
    /// The evidence identifies the actual ghost
    Match(GhostClass),
    /// Three kinds collected but they do not identify the actual ghost
    Mismatch { identified: Option<GhostClass> },
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match(_))
    }

    /// The class the evidence points at, whether or not it is the right one
    pub fn identified(&self) -> Option<GhostClass> {
        match self {
            Verdict::Match(class) => Some(*class),
            Verdict::Mismatch { identified } => *identified,
            Verdict::Insufficient => None,
        }
    }
}

/// Unique evidence kinds submitted by hunters, in submission order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceCollection {
    kinds: Vec<EvidenceKind>,
}

impl EvidenceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind, returning the new collection size
    pub fn submit(&mut self, kind: EvidenceKind) -> Result<usize, SubmitError> {
        if self.is_full() {
            return Err(SubmitError::Full);
        }
        if self.contains(kind) {
            return Err(SubmitError::Duplicate(kind));
        }
        self.kinds.push(kind);
        Ok(self.kinds.len())
    }

    pub fn contains(&self, kind: EvidenceKind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn is_full(&self) -> bool {
        self.kinds.len() >= MAX_EVIDENCE
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    pub fn kinds(&self) -> &[EvidenceKind] {
        &self.kinds
    }

    /// Compare the collection against the actual ghost class
    pub fn verdict(&self, actual: GhostClass) -> Verdict {
        if self.kinds.len() != MAX_EVIDENCE {
            return Verdict::Insufficient;
        }
        match GhostClass::identify(&self.kinds) {
            Some(class) if class == actual => Verdict::Match(class),
            identified => Verdict::Mismatch { identified },
        }
    }
}

/// Pick one of the class's three signature kinds uniformly at random
pub fn emitted_kind<R: Rng + ?Sized>(class: GhostClass, rng: &mut R) -> EvidenceKind {
    let signature = class.signature();
    signature[rng.gen_range(0..signature.len())]
}
