use crate::engine::eligibility::EligibleMatch;
use crate::model::matches::Match;
use crate::model::tournament::TournamentSummary;
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TournamentGroup {
    pub tournament: TournamentSummary,
    pub matches: Vec<Match>,
}

/// Groups matches by tournament. Groups appear in order of each tournament's
/// first match in `matches`; matches keep their relative input order.
pub fn group_by_tournament(matches: Vec<EligibleMatch>) -> Vec<TournamentGroup> {
    let mut groups: Vec<TournamentGroup> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for EligibleMatch {
        fixture,
        tournament,
    } in matches
    {
        match index.get(&tournament.id) {
            Some(&i) => groups[i].matches.push(fixture),
            None => {
                index.insert(tournament.id, groups.len());
                groups.push(TournamentGroup {
                    tournament,
                    matches: vec![fixture],
                });
            }
        }
    }

    groups
}
