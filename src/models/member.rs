//! Admin-facing member records
//!
//! Members are never persisted locally. The admin dashboard keeps the last
//! fetched list in memory and patches it after deletes and workout additions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::lenient;
use super::workout::Workout;

/// A gym member as returned by `/api/getAllUsers`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    #[serde(alias = "_id", deserialize_with = "lenient::id")]
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default, alias = "mobile")]
    pub phone: String,

    /// Tier name such as "Basic" or "Premium"
    #[serde(default, alias = "membership")]
    pub membership_type: String,

    #[serde(default, alias = "fitnessGoal")]
    pub goal: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub height: Option<f64>,

    #[serde(default, deserialize_with = "lenient::optional_f64")]
    pub weight: Option<f64>,

    #[serde(default, alias = "joinDate")]
    pub created_at: Option<String>,

    /// Logged workouts in the order the backend returned them
    #[serde(default)]
    pub workouts: Vec<Workout>,
}

/// Returns the members whose name or membership type contains `query`,
/// ignoring case.
///
/// An empty query matches everyone. The input slice is left untouched, and
/// applying the same query to the result yields the result again.
///
/// # Examples
///
/// ```
/// use fittrack::models::{filter_members, Member};
///
/// let members: Vec<Member> = serde_json::from_str(r#"[
///     {"_id": "1", "name": "Ram Kadam", "membershipType": "Premium"},
///     {"_id": "2", "name": "Sham Pawar", "membershipType": "Basic"}
/// ]"#).unwrap();
///
/// let hits = filter_members(&members, "prem");
/// assert_eq!(hits.len(), 1);
/// assert_eq!(hits[0].name, "Ram Kadam");
/// ```
pub fn filter_members(members: &[Member], query: &str) -> Vec<Member> {
    let needle = query.to_lowercase();
    members
        .iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&needle)
                || m.membership_type.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Removes the first member whose id equals `id`.
///
/// Returns the removed member, or `None` when no member has that id. Ids
/// are unique in a fetched list, so at most one entry is removed.
pub fn remove_member(members: &mut Vec<Member>, id: &str) -> Option<Member> {
    let index = members.iter().position(|m| m.id == id)?;
    Some(members.remove(index))
}

/// Headline numbers for the admin dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    pub total_members: usize,
    /// Member count per membership type, keyed by type name
    pub membership_types: BTreeMap<String, usize>,
    pub total_workouts: usize,
}

impl MemberStats {
    /// Derives the stats from a member list.
    pub fn from_members(members: &[Member]) -> Self {
        let mut membership_types = BTreeMap::new();
        for m in members {
            let key = if m.membership_type.trim().is_empty() {
                "Unknown".to_string()
            } else {
                m.membership_type.clone()
            };
            *membership_types.entry(key).or_insert(0) += 1;
        }
        Self {
            total_members: members.len(),
            membership_types,
            total_workouts: members.iter().map(|m| m.workouts.len()).sum(),
        }
    }
}
