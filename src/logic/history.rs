//! Player → matches index and the "already played tonight" set.

use crate::models::{Match, MatchState, PlayerId};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// Every match each player appears in, sorted by match ordering.
pub fn build_player_match_index(matches: &[Match]) -> HashMap<PlayerId, Vec<&Match>> {
    let mut index: HashMap<PlayerId, Vec<&Match>> = HashMap::new();
    for m in matches {
        for &pid in &m.players {
            index.entry(pid).or_default().push(m);
        }
    }
    for list in index.values_mut() {
        list.sort();
    }
    index
}

/// Players who share a match with anyone in `selected`, counting only matches that are
/// not completed or were completed after `cutoff`. The selected players themselves are
/// never in the result.
pub fn previously_played(
    selected: &[PlayerId],
    index: &HashMap<PlayerId, Vec<&Match>>,
    cutoff: DateTime<Utc>,
) -> HashSet<PlayerId> {
    let counts = |m: &Match| match m.state {
        MatchState::Completed { finished_at, .. } => finished_at > cutoff,
        _ => true,
    };
    selected
        .iter()
        .filter_map(|pid| index.get(pid))
        .flatten()
        .filter(|m| counts(**m))
        .flat_map(|m| m.players.iter().copied())
        .filter(|pid| !selected.contains(pid))
        .collect()
}
