//! Evidence Kinds and Ghost Classes
//!
//! The four evidence kinds a ghost can leave behind and the four ghost
//! classes, each identified by a fixed three-kind signature.
//!
//! # Example
//!
//! ```
//! use haunt_events::{EvidenceKind, GhostClass};
//!
//! let found = [EvidenceKind::Sound, EvidenceKind::Temperature, EvidenceKind::Fingerprints];
//! assert_eq!(GhostClass::identify(&found), Some(GhostClass::Phantom));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum number of unique evidence kinds the investigation collects.
pub const MAX_EVIDENCE: usize = 3;

/// A kind of evidence, detectable by one piece of hunter equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Emf,
    Temperature,
    Fingerprints,
    Sound,
}

impl EvidenceKind {
    /// Every evidence kind, in declaration order.
    pub const ALL: [EvidenceKind; 4] = [
        EvidenceKind::Emf,
        EvidenceKind::Temperature,
        EvidenceKind::Fingerprints,
        EvidenceKind::Sound,
    ];
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceKind::Emf => write!(f, "EMF"),
            EvidenceKind::Temperature => write!(f, "TEMPERATURE"),
            EvidenceKind::Fingerprints => write!(f, "FINGERPRINTS"),
            EvidenceKind::Sound => write!(f, "SOUND"),
        }
    }
}

/// The class of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GhostClass {
    Poltergeist,
    Banshee,
    Bullies,
    Phantom,
}

impl GhostClass {
    /// Every ghost class, in declaration order.
    pub const ALL: [GhostClass; 4] = [
        GhostClass::Poltergeist,
        GhostClass::Banshee,
        GhostClass::Bullies,
        GhostClass::Phantom,
    ];

    /// The three evidence kinds this class leaves behind.
    pub fn signature(self) -> [EvidenceKind; 3] {
        use EvidenceKind::*;
        match self {
            GhostClass::Poltergeist => [Emf, Temperature, Fingerprints],
            GhostClass::Banshee => [Emf, Temperature, Sound],
            GhostClass::Bullies => [Emf, Fingerprints, Sound],
            GhostClass::Phantom => [Temperature, Fingerprints, Sound],
        }
    }

    /// Returns true if this class can leave the given kind of evidence.
    pub fn leaves(self, kind: EvidenceKind) -> bool {
        self.signature().contains(&kind)
    }

    /// Returns true if every kind of this class's signature appears in `found`.
    ///
    /// Order and duplicates in `found` are irrelevant.
    pub fn matches(self, found: &[EvidenceKind]) -> bool {
        self.signature().iter().all(|kind| found.contains(kind))
    }

    /// Identifies the class whose signature is covered by `found`.
    ///
    /// Signatures are distinct 3-of-4 subsets, so a set of three kinds names
    /// at most one class. Four distinct kinds would cover every signature and
    /// identify nothing.
    pub fn identify(found: &[EvidenceKind]) -> Option<GhostClass> {
        let mut matching = GhostClass::ALL.into_iter().filter(|class| class.matches(found));
        let first = matching.next()?;
        match matching.next() {
            Some(_) => None,
            None => Some(first),
        }
    }
}

impl fmt::Display for GhostClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GhostClass::Poltergeist => write!(f, "Poltergeist"),
            GhostClass::Banshee => write!(f, "Banshee"),
            GhostClass::Bullies => write!(f, "Bullies"),
            GhostClass::Phantom => write!(f, "Phantom"),
        }
    }
}

/// Error returned when a ghost class name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseGhostClassError(pub String);

impl fmt::Display for ParseGhostClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown ghost class '{}'", self.0)
    }
}

impl std::error::Error for ParseGhostClassError {}

impl FromStr for GhostClass {
    type Err = ParseGhostClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "poltergeist" => Ok(GhostClass::Poltergeist),
            "banshee" => Ok(GhostClass::Banshee),
            "bullies" => Ok(GhostClass::Bullies),
            "phantom" => Ok(GhostClass::Phantom),
            _ => Err(ParseGhostClassError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// All four 3-element subsets of the evidence space.
    fn triples() -> Vec<[EvidenceKind; 3]> {
        let all = EvidenceKind::ALL;
        (0..all.len())
            .map(|skip| {
                let mut triple = [EvidenceKind::Emf; 3];
                let mut i = 0;
                for (j, kind) in all.iter().enumerate() {
                    if j != skip {
                        triple[i] = *kind;
                        i += 1;
                    }
                }
                triple
            })
            .collect()
    }

    #[test]
    fn test_signatures_are_distinct() {
        for a in GhostClass::ALL {
            for b in GhostClass::ALL {
                if a != b {
                    assert!(!a.matches(&b.signature()), "{} covers {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_each_triple_identifies_one_class() {
        for triple in triples() {
            let matching: Vec<_> = GhostClass::ALL
                .into_iter()
                .filter(|c| c.matches(&triple))
                .collect();
            assert_eq!(matching.len(), 1, "triple {:?}", triple);
            assert_eq!(GhostClass::identify(&triple), Some(matching[0]));
        }
    }

    #[test]
    fn test_identify_is_order_independent() {
        let a = [EvidenceKind::Sound, EvidenceKind::Emf, EvidenceKind::Temperature];
        let b = [EvidenceKind::Temperature, EvidenceKind::Sound, EvidenceKind::Emf];
        assert_eq!(GhostClass::identify(&a), Some(GhostClass::Banshee));
        assert_eq!(GhostClass::identify(&b), Some(GhostClass::Banshee));
    }

    #[test]
    fn test_identify_needs_full_signature() {
        assert_eq!(GhostClass::identify(&[EvidenceKind::Emf, EvidenceKind::Sound]), None);
        assert_eq!(GhostClass::identify(&[]), None);
        assert_eq!(GhostClass::identify(&EvidenceKind::ALL), None);
    }

    #[test]
    fn test_ghost_class_parsing() {
        assert_eq!("Phantom".parse::<GhostClass>(), Ok(GhostClass::Phantom));
        assert_eq!(" banshee ".parse::<GhostClass>(), Ok(GhostClass::Banshee));
        assert!("wraith".parse::<GhostClass>().is_err());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(EvidenceKind::Emf.to_string(), "EMF");
        assert_eq!(GhostClass::Bullies.to_string(), "Bullies");
    }
}
