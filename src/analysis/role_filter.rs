use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::str::FromStr;

use crate::analysis::scoring::CandidateResult;
use crate::error::AppError;

/// Fixed lane-role vocabulary. Role files use these labels verbatim
/// (with "hard support" also accepted in its spaced form).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Carry,
    Mid,
    Offlane,
    Support,
    HardSupport,
}

pub const ALL_ROLES: [Role; 5] = [
    Role::Carry,
    Role::Mid,
    Role::Offlane,
    Role::Support,
    Role::HardSupport,
];

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Carry => "carry",
            Role::Mid => "mid",
            Role::Offlane => "offlane",
            Role::Support => "support",
            Role::HardSupport => "hard-support",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carry" => Ok(Role::Carry),
            "mid" => Ok(Role::Mid),
            "offlane" => Ok(Role::Offlane),
            "support" => Ok(Role::Support),
            "hard support" | "hard-support" => Ok(Role::HardSupport),
            other => Err(AppError::UnknownRole(other.to_string())),
        }
    }
}

/// Role labels per hero slug. Heroes absent from the map have zero roles.
pub type RoleMap = HashMap<String, BTreeSet<Role>>;

/// Keeps only candidates whose known roles intersect `selected`. An empty
/// selection (or the full vocabulary) means "no filter" and passes the
/// results through untouched. A hero with zero known roles never survives
/// an active filter. Input ordering is preserved either way.
pub fn filter(
    results: Vec<CandidateResult>,
    role_map: &RoleMap,
    selected: &BTreeSet<Role>,
) -> Vec<CandidateResult> {
    if selected.is_empty() || selected.len() == ALL_ROLES.len() {
        return results;
    }

    results
        .into_iter()
        .filter(|candidate| {
            role_map
                .get(&candidate.hero)
                .map(|roles| roles.iter().any(|r| selected.contains(r)))
                .unwrap_or(false)
        })
        .collect()
}
