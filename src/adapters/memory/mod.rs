//! Memory gateway adapters.
//!
//! Both adapters share the same session/turn record shape and the same
//! relevance rules: sessions are scanned newest first, only the last three
//! turns of each session are considered, and a turn is relevant when the
//! query appears (case-insensitively) in its message or response.

mod filesystem;
mod in_memory;

pub use filesystem::FsMemoryStore;
pub use in_memory::InMemoryMemoryStore;

use serde::{Deserialize, Serialize};

use crate::domain::assessment::{MemoryHit, StoredExperience};
use crate::domain::foundation::{ExperienceId, RiskLevel, SessionId, Timestamp, UserId};

/// Turns per session considered during retrieval.
const TURNS_SCANNED_PER_SESSION: usize = 3;

/// One stored session: an ordered list of turns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SessionRecord {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub started_at: Timestamp,
    pub turns: Vec<TurnRecord>,
}

impl SessionRecord {
    fn open(user_id: UserId) -> Self {
        Self {
            session_id: SessionId::new(),
            user_id,
            started_at: Timestamp::now(),
            turns: Vec::new(),
        }
    }
}

/// One stored turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TurnRecord {
    pub timestamp: Timestamp,
    pub user_message: String,
    pub response: String,
    pub risk_level: Option<RiskLevel>,
}

/// Appends an experience to the user's most recent session, opening a new
/// session when none exists. Returns the session id as the experience id.
pub(crate) fn append_turn(
    sessions: &mut Vec<SessionRecord>,
    experience: StoredExperience,
) -> ExperienceId {
    if sessions.is_empty() {
        sessions.push(SessionRecord::open(experience.user_id.clone()));
    }
    let session = sessions
        .last_mut()
        .expect("sessions is non-empty after push");

    session.turns.push(TurnRecord {
        timestamp: experience.timestamp,
        user_message: experience.message,
        response: experience.response.unwrap_or_default(),
        risk_level: experience.risk_level,
    });

    ExperienceId::from(session.session_id)
}

/// Scans sessions newest-first for turns relevant to the query.
pub(crate) fn relevant_hits(
    sessions: &[SessionRecord],
    query: &str,
    top_k: usize,
) -> Vec<MemoryHit> {
    let needle = query.to_lowercase();
    let mut hits = Vec::new();

    for session in sessions.iter().rev() {
        for turn in session.turns.iter().rev().take(TURNS_SCANNED_PER_SESSION) {
            if hits.len() >= top_k {
                return hits;
            }
            if turn.user_message.to_lowercase().contains(&needle)
                || turn.response.to_lowercase().contains(&needle)
            {
                hits.push(MemoryHit {
                    timestamp: turn.timestamp,
                    user_message: turn.user_message.clone(),
                    prior_response: turn.response.clone(),
                    risk_level: turn.risk_level,
                });
            }
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::SynthesisVerdict;

    fn experience(message: &str) -> StoredExperience {
        StoredExperience::new(
            UserId::new("u1").unwrap(),
            message,
            Some("回应".to_string()),
            Some(RiskLevel::Low),
            SynthesisVerdict::new(),
        )
    }

    #[test]
    fn append_opens_a_session_and_reuses_it() {
        let mut sessions = Vec::new();
        let first = append_turn(&mut sessions, experience("一"));
        let second = append_turn(&mut sessions, experience("二"));

        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].turns.len(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn retrieval_only_scans_recent_turns() {
        let mut sessions = Vec::new();
        for i in 0..5 {
            append_turn(&mut sessions, experience(&format!("压力 {i}")));
        }

        // Five matching turns in one session, but only the last three are
        // scanned.
        let hits = relevant_hits(&sessions, "压力", 10);
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].user_message, "压力 4");
        assert_eq!(hits[2].user_message, "压力 2");
    }

    #[test]
    fn retrieval_matches_case_insensitively_and_caps_at_top_k() {
        let mut sessions = Vec::new();
        append_turn(&mut sessions, experience("Sleep problems"));
        append_turn(&mut sessions, experience("sleep again"));
        append_turn(&mut sessions, experience("别的话题"));

        let hits = relevant_hits(&sessions, "SLEEP", 1);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].user_message, "sleep again");
    }

    #[test]
    fn retrieval_matches_response_text_too() {
        let mut sessions = Vec::new();
        append_turn(&mut sessions, experience("随便聊聊"));
        let hits = relevant_hits(&sessions, "回应", 5);
        assert_eq!(hits.len(), 1);
    }
}
