//! Service selection - what a payment is for
//!
//! Exactly one variant is active per calculation:
//! - one student taking several disciplines, or several siblings taking one each
//! - a prepaid membership plan
//! - siblings with independent discipline counts

use serde::{Deserialize, Serialize};

use crate::MAX_DISCIPLINES;

/// What is being priced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ServiceSelection {
    /// `siblings = 1` with `count` in 1..=4, or `siblings > 1` with `count = 1`
    Disciplines { count: u32, siblings: u32 },
    /// Reference to a plan in the membership catalog
    Membership { membership_id: String },
    /// Each sibling priced on its own as a single student
    SiblingsWithMixedDisciplines { disciplines_per_sibling: Vec<u32> },
}

impl ServiceSelection {
    /// One student, `count` disciplines
    pub fn disciplines(count: u32) -> Self {
        ServiceSelection::Disciplines { count, siblings: 1 }
    }

    /// `siblings` students, one discipline each
    pub fn siblings(siblings: u32) -> Self {
        ServiceSelection::Disciplines { count: 1, siblings }
    }

    pub fn membership(membership_id: impl Into<String>) -> Self {
        ServiceSelection::Membership {
            membership_id: membership_id.into(),
        }
    }

    pub fn mixed_siblings(disciplines_per_sibling: Vec<u32>) -> Self {
        ServiceSelection::SiblingsWithMixedDisciplines {
            disciplines_per_sibling,
        }
    }

    pub fn is_membership(&self) -> bool {
        matches!(self, ServiceSelection::Membership { .. })
    }

    /// Why the discipline/sibling combination cannot be priced, if it can't.
    ///
    /// Memberships always pass here; an unknown plan id is a lookup failure,
    /// not a configuration problem.
    pub fn configuration_issue(&self) -> Option<String> {
        match self {
            ServiceSelection::Disciplines { count, siblings } => {
                discipline_issue(*count, *siblings)
            }
            ServiceSelection::Membership { .. } => None,
            ServiceSelection::SiblingsWithMixedDisciplines {
                disciplines_per_sibling,
            } => {
                if disciplines_per_sibling.is_empty() {
                    return Some("no siblings were given".to_string());
                }
                disciplines_per_sibling
                    .iter()
                    .enumerate()
                    .find_map(|(i, count)| {
                        discipline_issue(*count, 1).map(|issue| format!("sibling {}: {}", i + 1, issue))
                    })
            }
        }
    }
}

fn discipline_issue(count: u32, siblings: u32) -> Option<String> {
    if siblings == 0 {
        return Some("at least one student is required".to_string());
    }
    if count == 0 || count > MAX_DISCIPLINES {
        return Some(format!(
            "{} disciplines is outside the supported range 1-{}",
            count, MAX_DISCIPLINES
        ));
    }
    if siblings > 1 && count > 1 {
        return Some(format!(
            "{} siblings with {} disciplines each has no pricing rule",
            siblings, count
        ));
    }
    None
}
