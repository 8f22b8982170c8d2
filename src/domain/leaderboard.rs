//! Leaderboard standings (read-only).

use serde::{Deserialize, Serialize};

use crate::domain::entity::Identified;

/// One learner's standing as reported by the backend.
///
/// `recent_courses` is only populated when the backend sends course detail;
/// it is never synthesized from `completed_courses`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u64,
    pub user_name: Option<String>,
    pub points: Option<u64>,
    pub completed_courses: Option<u32>,
    pub badges_earned: Option<u32>,
    pub rank: Option<u32>,
    #[serde(default)]
    pub recent_courses: Vec<String>,
}

impl Identified for LeaderboardEntry {
    type Id = u64;

    fn id(&self) -> &u64 {
        &self.id
    }
}
