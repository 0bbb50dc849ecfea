//! # Team Statistics
//!
//! Pure functions over a team's member sequence. No store access.

use serde::{Deserialize, Serialize};

use crate::models::{Member, TEAM_CAPACITY};

/// Summary shown next to the active team
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TeamStats {
    pub size: usize,
    pub capacity: usize,
    pub types_covered: Vec<String>,
    pub average_base_experience: u32,
}

impl TeamStats {
    pub fn of(members: &[Member]) -> Self {
        Self {
            size: members.len(),
            capacity: TEAM_CAPACITY,
            types_covered: types_covered(members),
            average_base_experience: average_base_experience(members),
        }
    }
}

/// Distinct lowercase type labels across all members, in first-seen order
pub fn types_covered(members: &[Member]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in members
        .iter()
        .flat_map(|m| m.type_.split(','))
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
    {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    seen
}

/// Mean base experience rounded half-up; 0 for an empty team
pub fn average_base_experience(members: &[Member]) -> u32 {
    if members.is_empty() {
        return 0;
    }
    let total: u64 = members.iter().map(|m| u64::from(m.base_experience)).sum();
    let count = members.len() as u64;
    // integer half-up: floor((2 * total + count) / (2 * count))
    ((2 * total + count) / (2 * count)) as u32
}
