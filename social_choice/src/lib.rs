mod config;
pub mod builder;
pub mod quick_start;

use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet};

pub use crate::config::*;

/// A preference profile: one strict total ranking over the same set of
/// alternatives for every agent.
///
/// Both invariants of the data model are checked at construction and never
/// again: there is at least one agent, and every ranking is a permutation of
/// `{1..m}`. A profile is immutable afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Profile {
    rankings: BTreeMap<Agent, Vec<Alternative>>,
    num_alternatives: usize,
}

impl Profile {
    /// Builds a profile from explicit rankings.
    pub fn new(rankings: BTreeMap<Agent, Vec<Alternative>>) -> Result<Profile, VotingError> {
        let num_alternatives = match rankings.values().next() {
            Some(ranking) if !ranking.is_empty() => ranking.len(),
            _ => {
                return Err(VotingError::InvalidArgument(
                    "a profile needs at least one agent and one alternative".to_string(),
                ))
            }
        };
        for (agent, ranking) in rankings.iter() {
            if agent.0 == 0 {
                return Err(VotingError::InvalidArgument(
                    "agent identifiers are 1-based".to_string(),
                ));
            }
            check_permutation(*agent, ranking, num_alternatives)?;
        }
        Ok(Profile {
            rankings,
            num_alternatives,
        })
    }

    /// Derives a profile from cardinal valuations, one row per agent and one
    /// column per alternative.
    ///
    /// Each row is sorted by decreasing valuation. Two alternatives with the
    /// same valuation are ordered by ascending identifier, so the derived
    /// ranking never depends on the stability of a particular sort.
    pub fn from_valuations(matrix: &[Vec<f64>]) -> Result<Profile, VotingError> {
        check_matrix(matrix)?;
        let mut rankings: BTreeMap<Agent, Vec<Alternative>> = BTreeMap::new();
        for (i, row) in matrix.iter().enumerate() {
            let mut order: Vec<usize> = (0..row.len()).collect();
            order.sort_by(|&a, &b| row[b].total_cmp(&row[a]).then(a.cmp(&b)));
            let ranking = order.iter().map(|&j| Alternative((j + 1) as u32)).collect();
            rankings.insert(Agent((i + 1) as u32), ranking);
        }
        Ok(Profile {
            rankings,
            num_alternatives: matrix[0].len(),
        })
    }

    pub fn num_agents(&self) -> usize {
        self.rankings.len()
    }

    pub fn num_alternatives(&self) -> usize {
        self.num_alternatives
    }

    /// All the alternatives of the profile, in ascending order.
    pub fn alternatives(&self) -> impl Iterator<Item = Alternative> {
        (1..=self.num_alternatives as u32).map(Alternative)
    }

    /// The full ranking of one agent, best choice first.
    pub fn ranking(&self, agent: Agent) -> Option<&[Alternative]> {
        self.rankings.get(&agent).map(|r| r.as_slice())
    }

    /// All the rankings, keyed by agent in ascending order.
    pub fn rankings(&self) -> impl Iterator<Item = (Agent, &[Alternative])> {
        self.rankings.iter().map(|(&a, r)| (a, r.as_slice()))
    }
}

fn check_permutation(
    agent: Agent,
    ranking: &[Alternative],
    num_alternatives: usize,
) -> Result<(), VotingError> {
    if ranking.len() != num_alternatives {
        return Err(VotingError::InvalidArgument(format!(
            "agent {} ranks {} alternatives, expected {}",
            agent.0,
            ranking.len(),
            num_alternatives
        )));
    }
    let mut seen = vec![false; num_alternatives];
    for alt in ranking {
        let idx = alt.0 as usize;
        if idx < 1 || idx > num_alternatives || seen[idx - 1] {
            return Err(VotingError::InvalidArgument(format!(
                "the ranking of agent {} is not a permutation of 1..={}",
                agent.0, num_alternatives
            )));
        }
        seen[idx - 1] = true;
    }
    Ok(())
}

pub(crate) fn check_matrix(matrix: &[Vec<f64>]) -> Result<(), VotingError> {
    let first = matrix.first().ok_or_else(|| {
        VotingError::InvalidArgument("the value matrix has no rows".to_string())
    })?;
    if first.is_empty() {
        return Err(VotingError::InvalidArgument(
            "the value matrix has no columns".to_string(),
        ));
    }
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != first.len() {
            return Err(VotingError::InvalidArgument(format!(
                "row {} has {} cells, expected {}",
                i + 1,
                row.len(),
                first.len()
            )));
        }
    }
    Ok(())
}

/// Resolves a non-empty set of tied alternatives into a single winner.
///
/// `Max` and `Min` pick the extreme identifier. `AgentPriority` walks the
/// designated agent's full ranking and returns the first alternative that
/// belongs to `candidates`. An unknown agent is an explicit `NotFound`, and
/// so is a candidate set disjoint from the ranking; there is no silent empty
/// result.
pub fn tie_breaking(
    profile: &Profile,
    rule: TieBreakRule,
    candidates: &[Alternative],
) -> Result<Alternative, VotingError> {
    if candidates.is_empty() {
        return Err(VotingError::InvalidArgument(
            "tie_breaking: the candidate set is empty".to_string(),
        ));
    }
    match rule {
        TieBreakRule::Max => {
            let mut best = candidates[0];
            for &c in candidates {
                if c > best {
                    best = c;
                }
            }
            Ok(best)
        }
        TieBreakRule::Min => {
            let mut best = candidates[0];
            for &c in candidates {
                if c < best {
                    best = c;
                }
            }
            Ok(best)
        }
        TieBreakRule::AgentPriority(agent) => {
            let ranking = profile.ranking(agent).ok_or_else(|| {
                VotingError::NotFound(format!(
                    "tie_breaking: agent {} is not part of the profile",
                    agent.0
                ))
            })?;
            ranking
                .iter()
                .find(|alt| candidates.contains(alt))
                .copied()
                .ok_or_else(|| {
                    VotingError::NotFound(format!(
                        "tie_breaking: no candidate appears in the ranking of agent {}",
                        agent.0
                    ))
                })
        }
    }
}

// A singleton winner set bypasses the tie-breaker entirely.
fn resolve_winners(
    profile: &Profile,
    tie_break: TieBreakRule,
    winners: Vec<Alternative>,
) -> Result<Alternative, VotingError> {
    match winners.as_slice() {
        [] => Err(VotingError::InvalidArgument(
            "no alternative to select from".to_string(),
        )),
        [single] => Ok(*single),
        _ => tie_breaking(profile, tie_break, &winners),
    }
}

/// All the keys of the tally that attain the maximum value.
fn leaders<V: PartialOrd + Copy>(tally: &BTreeMap<Alternative, V>) -> Vec<Alternative> {
    let mut best: Option<V> = None;
    for &v in tally.values() {
        match best {
            Some(b) if v <= b => {}
            _ => best = Some(v),
        }
    }
    match best {
        None => Vec::new(),
        Some(b) => tally
            .iter()
            .filter_map(|(&alt, &v)| if v == b { Some(alt) } else { None })
            .collect(),
    }
}

// Per-alternative totals for a positional scoring rule. The scores are
// expected in decreasing order; the totals cover the full alternative set so
// that no entry gets created implicitly during accumulation.
fn positional_totals(profile: &Profile, sorted_scores: &[f64]) -> BTreeMap<Alternative, f64> {
    let mut totals: BTreeMap<Alternative, f64> =
        profile.alternatives().map(|alt| (alt, 0.0)).collect();
    for (_, ranking) in profile.rankings() {
        for (alt, score) in ranking.iter().zip(sorted_scores.iter()) {
            if let Some(total) = totals.get_mut(alt) {
                *total += *score;
            }
        }
    }
    totals
}

/// Evaluates an arbitrary positional scoring rule.
///
/// The score vector must have one entry per alternative. It is sorted in
/// decreasing order and zipped positionally with every agent's ranking: the
/// best-ranked alternative earns the largest score, and so on down the
/// ranking. The alternative with the maximum total wins; residual ties go to
/// `tie_break`.
pub fn scoring_rule(
    profile: &Profile,
    score_vector: &[f64],
    tie_break: TieBreakRule,
) -> Result<Alternative, VotingError> {
    if score_vector.len() != profile.num_alternatives() {
        return Err(VotingError::InvalidArgument(format!(
            "the score vector has length {}, expected {}",
            score_vector.len(),
            profile.num_alternatives()
        )));
    }
    let mut sorted_scores = score_vector.to_vec();
    sorted_scores.sort_by(|a, b| b.total_cmp(a));
    let totals = positional_totals(profile, &sorted_scores);
    debug!("scoring_rule: totals: {:?}", totals);
    resolve_winners(profile, tie_break, leaders(&totals))
}

/// Plurality: the alternative ranked first by the most agents wins.
///
/// Result-identical to [`scoring_rule`] with the vector `(1, 0, .., 0)`.
pub fn plurality(profile: &Profile, tie_break: TieBreakRule) -> Result<Alternative, VotingError> {
    let mut tally: BTreeMap<Alternative, u64> =
        profile.alternatives().map(|alt| (alt, 0)).collect();
    for (_, ranking) in profile.rankings() {
        if let Some(first) = ranking.first() {
            if let Some(count) = tally.get_mut(first) {
                *count += 1;
            }
        }
    }
    debug!("plurality: first-place counts: {:?}", tally);
    resolve_winners(profile, tie_break, leaders(&tally))
}

/// Veto: every agent gives one point to each alternative except the one they
/// rank last.
///
/// Result-identical to [`scoring_rule`] with the vector `(1, .., 1, 0)`.
pub fn veto(profile: &Profile, tie_break: TieBreakRule) -> Result<Alternative, VotingError> {
    let mut points: BTreeMap<Alternative, u64> =
        profile.alternatives().map(|alt| (alt, 0)).collect();
    for (_, ranking) in profile.rankings() {
        for alt in &ranking[..ranking.len() - 1] {
            if let Some(p) = points.get_mut(alt) {
                *p += 1;
            }
        }
    }
    debug!("veto: points: {:?}", points);
    resolve_winners(profile, tie_break, leaders(&points))
}

/// Borda: rank position `i` (0-based) earns `m - 1 - i` points.
pub fn borda(profile: &Profile, tie_break: TieBreakRule) -> Result<Alternative, VotingError> {
    let num_alternatives = profile.num_alternatives();
    let mut scores: BTreeMap<Alternative, u64> =
        profile.alternatives().map(|alt| (alt, 0)).collect();
    for (_, ranking) in profile.rankings() {
        for (pos, alt) in ranking.iter().enumerate() {
            if let Some(s) = scores.get_mut(alt) {
                *s += (num_alternatives - 1 - pos) as u64;
            }
        }
    }
    debug!("borda: scores: {:?}", scores);
    resolve_winners(profile, tie_break, leaders(&scores))
}

/// Harmonic: rank position `i` (0-based) earns `1 / (i + 1)` points.
pub fn harmonic(profile: &Profile, tie_break: TieBreakRule) -> Result<Alternative, VotingError> {
    let mut scores: BTreeMap<Alternative, f64> =
        profile.alternatives().map(|alt| (alt, 0.0)).collect();
    for (_, ranking) in profile.rankings() {
        for (pos, alt) in ranking.iter().enumerate() {
            if let Some(s) = scores.get_mut(alt) {
                *s += 1.0 / (pos as f64 + 1.0);
            }
        }
    }
    debug!("harmonic: scores: {:?}", scores);
    resolve_winners(profile, tie_break, leaders(&scores))
}

/// Single Transferable Vote with batch elimination.
///
/// Each round tallies the first still-active choice of every agent and
/// removes all the alternatives tied at the minimum count in one batch. The
/// loop stops when every remaining alternative attains the minimum
/// (including the case of a single survivor) and the tie-breaker resolves
/// that set against the original, unreduced profile. Every round eliminates
/// at least one alternative, so there are at most `m - 1` rounds.
pub fn stv(profile: &Profile, tie_break: TieBreakRule) -> Result<Alternative, VotingError> {
    // Eliminations are tracked in a shrinking active set; the rankings
    // themselves are never mutated.
    let mut active: BTreeSet<Alternative> = profile.alternatives().collect();
    let mut round: u32 = 1;
    loop {
        let mut frequency: BTreeMap<Alternative, u64> =
            active.iter().map(|&alt| (alt, 0)).collect();
        for (_, ranking) in profile.rankings() {
            if let Some(top) = ranking.iter().find(|alt| active.contains(alt)) {
                if let Some(count) = frequency.get_mut(top) {
                    *count += 1;
                }
            }
        }
        info!("stv: round {}: first-place counts: {:?}", round, frequency);

        let min_count = frequency.values().min().copied().ok_or_else(|| {
            VotingError::InvalidArgument("stv: no alternative left".to_string())
        })?;
        let least: Vec<Alternative> = frequency
            .iter()
            .filter_map(|(&alt, &count)| if count == min_count { Some(alt) } else { None })
            .collect();

        if least.len() == active.len() {
            // Everything still standing is tied at the minimum.
            return resolve_winners(profile, tie_break, least);
        }
        info!("stv: round {}: eliminating {:?}", round, least);
        for alt in least {
            active.remove(&alt);
        }
        round += 1;
    }
}

/// Range voting: sums each alternative's column of the raw valuation matrix.
///
/// A strict maximum wins outright. On a tie, the ordinal profile is derived
/// from the same matrix and the tied set goes to the tie-breaker; this is the
/// only path where an agent-priority tie-break needs a profile at all.
pub fn range_voting(
    matrix: &[Vec<f64>],
    tie_break: TieBreakRule,
) -> Result<Alternative, VotingError> {
    check_matrix(matrix)?;
    let num_alternatives = matrix[0].len() as u32;
    let mut sums: BTreeMap<Alternative, f64> = (1..=num_alternatives)
        .map(|i| (Alternative(i), 0.0))
        .collect();
    for row in matrix {
        for (j, value) in row.iter().enumerate() {
            if let Some(sum) = sums.get_mut(&Alternative((j + 1) as u32)) {
                *sum += *value;
            }
        }
    }
    debug!("range_voting: column sums: {:?}", sums);
    let winners = leaders(&sums);
    if let [single] = winners.as_slice() {
        return Ok(*single);
    }
    let profile = Profile::from_valuations(matrix)?;
    tie_breaking(&profile, tie_break, &winners)
}

/// Dictatorship: the top choice of the designated agent.
pub fn dictatorship(profile: &Profile, agent: Agent) -> Result<Alternative, VotingError> {
    let ranking = profile.ranking(agent).ok_or_else(|| {
        VotingError::NotFound(format!(
            "dictatorship: agent {} is not part of the profile",
            agent.0
        ))
    })?;
    ranking.first().copied().ok_or_else(|| {
        VotingError::InvalidArgument(format!(
            "dictatorship: agent {} has an empty ranking",
            agent.0
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn profile(rankings: &[(u32, &[u32])]) -> Profile {
        let map: BTreeMap<Agent, Vec<Alternative>> = rankings
            .iter()
            .map(|&(agent, ranking)| {
                (
                    Agent(agent),
                    ranking.iter().map(|&a| Alternative(a)).collect(),
                )
            })
            .collect();
        Profile::new(map).unwrap()
    }

    // Three agents rotating over three alternatives: every alternative gets
    // exactly one first-place vote and a Borda total of 3.
    fn rotation() -> Profile {
        profile(&[(1, &[1, 2, 3]), (2, &[2, 3, 1]), (3, &[3, 1, 2])])
    }

    #[test]
    fn from_valuations_orders_by_decreasing_value() {
        let p = Profile::from_valuations(&[vec![5.0, 2.0, 1.0], vec![1.0, 5.0, 2.0]]).unwrap();
        assert_eq!(
            p.ranking(Agent(1)),
            Some(&[Alternative(1), Alternative(2), Alternative(3)][..])
        );
        assert_eq!(
            p.ranking(Agent(2)),
            Some(&[Alternative(2), Alternative(3), Alternative(1)][..])
        );
    }

    #[test]
    fn equal_valuations_prefer_the_lower_identifier() {
        let p = Profile::from_valuations(&[vec![1.0, 1.0, 2.0]]).unwrap();
        assert_eq!(
            p.ranking(Agent(1)),
            Some(&[Alternative(3), Alternative(1), Alternative(2)][..])
        );
    }

    #[test]
    fn malformed_matrices_are_rejected() {
        assert!(matches!(
            Profile::from_valuations(&[]),
            Err(VotingError::InvalidArgument(_))
        ));
        assert!(matches!(
            Profile::from_valuations(&[vec![]]),
            Err(VotingError::InvalidArgument(_))
        ));
        assert!(matches!(
            Profile::from_valuations(&[vec![1.0, 2.0], vec![1.0]]),
            Err(VotingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn non_permutations_are_rejected() {
        let mut map: BTreeMap<Agent, Vec<Alternative>> = BTreeMap::new();
        map.insert(Agent(1), vec![Alternative(1), Alternative(1)]);
        assert!(matches!(
            Profile::new(map),
            Err(VotingError::InvalidArgument(_))
        ));

        let mut map2: BTreeMap<Agent, Vec<Alternative>> = BTreeMap::new();
        map2.insert(Agent(1), vec![Alternative(1), Alternative(2)]);
        map2.insert(Agent(2), vec![Alternative(1)]);
        assert!(matches!(
            Profile::new(map2),
            Err(VotingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_agent_identifiers_are_rejected() {
        let mut map: BTreeMap<Agent, Vec<Alternative>> = BTreeMap::new();
        map.insert(Agent(0), vec![Alternative(1), Alternative(2)]);
        map.insert(Agent(1), vec![Alternative(2), Alternative(1)]);
        assert!(matches!(
            Profile::new(map),
            Err(VotingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn plurality_picks_the_most_first_places() {
        init();
        // Alternative 1 has two first places; Max would pick 3 on a tie, so
        // the tie-breaker is provably not consulted.
        let p = profile(&[(1, &[1, 2, 3]), (2, &[1, 3, 2]), (3, &[2, 3, 1])]);
        assert_eq!(plurality(&p, TieBreakRule::Max), Ok(Alternative(1)));
    }

    #[test]
    fn plurality_rotation_ties_resolve_by_rule() {
        init();
        assert_eq!(plurality(&rotation(), TieBreakRule::Max), Ok(Alternative(3)));
        assert_eq!(plurality(&rotation(), TieBreakRule::Min), Ok(Alternative(1)));
        assert_eq!(
            plurality(&rotation(), TieBreakRule::AgentPriority(Agent(2))),
            Ok(Alternative(2))
        );
    }

    #[test]
    fn scoring_rule_with_plurality_vector_matches_plurality() {
        let profiles = [
            rotation(),
            profile(&[(1, &[1, 2, 3]), (2, &[1, 3, 2]), (3, &[2, 3, 1])]),
        ];
        let tie_breaks = [
            TieBreakRule::Max,
            TieBreakRule::Min,
            TieBreakRule::AgentPriority(Agent(2)),
        ];
        for p in profiles.iter() {
            for &tb in tie_breaks.iter() {
                assert_eq!(
                    scoring_rule(p, &[1.0, 0.0, 0.0], tb),
                    plurality(p, tb)
                );
            }
        }
    }

    #[test]
    fn scoring_rule_with_veto_vector_matches_veto() {
        let profiles = [
            rotation(),
            profile(&[(1, &[3, 2, 1]), (2, &[2, 3, 1]), (3, &[2, 1, 3])]),
        ];
        let tie_breaks = [
            TieBreakRule::Max,
            TieBreakRule::Min,
            TieBreakRule::AgentPriority(Agent(1)),
        ];
        for p in profiles.iter() {
            for &tb in tie_breaks.iter() {
                assert_eq!(scoring_rule(p, &[1.0, 1.0, 0.0], tb), veto(p, tb));
            }
        }
    }

    #[test]
    fn scoring_rule_rejects_a_wrong_vector_length() {
        assert!(matches!(
            scoring_rule(&rotation(), &[1.0, 0.0], TieBreakRule::Max),
            Err(VotingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn scoring_rule_sorts_the_vector_before_assigning() {
        // (0, 1, 0) must behave exactly like (1, 0, 0).
        let p = profile(&[(1, &[2, 1, 3]), (2, &[2, 3, 1]), (3, &[1, 3, 2])]);
        assert_eq!(
            scoring_rule(&p, &[0.0, 1.0, 0.0], TieBreakRule::Min),
            Ok(Alternative(2))
        );
    }

    #[test]
    fn borda_rotation_ties_at_three() {
        init();
        assert_eq!(borda(&rotation(), TieBreakRule::Min), Ok(Alternative(1)));
        assert_eq!(borda(&rotation(), TieBreakRule::Max), Ok(Alternative(3)));
    }

    #[test]
    fn borda_totals_sum_to_the_invariant() {
        // The Borda totals over any profile add up to n * m * (m - 1) / 2.
        for p in [
            rotation(),
            profile(&[(1, &[4, 1, 3, 2]), (2, &[2, 3, 4, 1])]),
        ] {
            let m = p.num_alternatives();
            let scores: Vec<f64> = (0..m).map(|i| (m - 1 - i) as f64).collect();
            let totals = positional_totals(&p, &scores);
            let sum: f64 = totals.values().sum();
            let expected = (p.num_agents() * m * (m - 1)) as f64 / 2.0;
            assert_eq!(sum, expected);
        }
    }

    #[test]
    fn harmonic_weights_the_positions() {
        // Alternative 1 collects 1 + 1 + 1/2 = 2.5, ahead of everyone.
        let p = profile(&[(1, &[1, 2, 3]), (2, &[1, 3, 2]), (3, &[2, 1, 3])]);
        assert_eq!(harmonic(&p, TieBreakRule::Max), Ok(Alternative(1)));
        // And the generic evaluator agrees.
        assert_eq!(
            scoring_rule(&p, &[1.0, 1.0 / 2.0, 1.0 / 3.0], TieBreakRule::Max),
            Ok(Alternative(1))
        );
    }

    #[test]
    fn stv_eliminates_in_batches() {
        init();
        // First-place counts are [1: 2, 2: 1, 3: 2]: alternative 2 leaves
        // alone in round 1, then 3 in round 2, leaving 1 as the winner.
        let p = profile(&[
            (1, &[1, 2, 3]),
            (2, &[1, 3, 2]),
            (3, &[2, 1, 3]),
            (4, &[3, 1, 2]),
            (5, &[3, 2, 1]),
        ]);
        assert_eq!(stv(&p, TieBreakRule::Max), Ok(Alternative(1)));
    }

    #[test]
    fn stv_removes_all_minimum_alternatives_in_one_batch() {
        init();
        // First-place counts are [1: 3, 2: 1, 3: 1, 4: 2]: alternatives 2
        // and 3 share the minimum and leave together in round 1. Their votes
        // transfer to 4, which then beats 1 by 4 counts to 3. The winner
        // differs from the Min tie-break pick, so the outcome is decided by
        // the eliminations alone.
        let p = profile(&[
            (1, &[1, 2, 3, 4]),
            (2, &[1, 3, 2, 4]),
            (3, &[1, 4, 2, 3]),
            (4, &[2, 4, 1, 3]),
            (5, &[3, 4, 1, 2]),
            (6, &[4, 1, 2, 3]),
            (7, &[4, 2, 1, 3]),
        ]);
        assert_eq!(stv(&p, TieBreakRule::Min), Ok(Alternative(4)));
    }

    #[test]
    fn stv_resolves_a_full_tie_on_the_original_profile() {
        init();
        // All three alternatives tie at one first-place vote in round 1.
        assert_eq!(stv(&rotation(), TieBreakRule::Max), Ok(Alternative(3)));
        assert_eq!(stv(&rotation(), TieBreakRule::Min), Ok(Alternative(1)));
        assert_eq!(
            stv(&rotation(), TieBreakRule::AgentPriority(Agent(2))),
            Ok(Alternative(2))
        );
    }

    #[test]
    fn stv_with_an_unknown_priority_agent_fails() {
        assert!(matches!(
            stv(&rotation(), TieBreakRule::AgentPriority(Agent(9))),
            Err(VotingError::NotFound(_))
        ));
    }

    #[test]
    fn tie_breaking_is_deterministic_and_stays_in_the_set() {
        let candidates = [Alternative(2), Alternative(5), Alternative(3)];
        for rule in [
            TieBreakRule::Max,
            TieBreakRule::Min,
            TieBreakRule::AgentPriority(Agent(1)),
        ] {
            let p = profile(&[(1, &[5, 4, 3, 2, 1]), (2, &[1, 2, 3, 4, 5])]);
            let first = tie_breaking(&p, rule, &candidates).unwrap();
            let second = tie_breaking(&p, rule, &candidates).unwrap();
            assert_eq!(first, second);
            assert!(candidates.contains(&first));
        }
    }

    #[test]
    fn tie_breaking_max_and_min_pick_the_extremes() {
        let p = rotation();
        let candidates = [Alternative(1), Alternative(3)];
        assert_eq!(
            tie_breaking(&p, TieBreakRule::Max, &candidates),
            Ok(Alternative(3))
        );
        assert_eq!(
            tie_breaking(&p, TieBreakRule::Min, &candidates),
            Ok(Alternative(1))
        );
    }

    #[test]
    fn tie_breaking_rejects_bad_inputs() {
        let p = rotation();
        assert!(matches!(
            tie_breaking(&p, TieBreakRule::Max, &[]),
            Err(VotingError::InvalidArgument(_))
        ));
        assert!(matches!(
            tie_breaking(&p, TieBreakRule::AgentPriority(Agent(7)), &[Alternative(1)]),
            Err(VotingError::NotFound(_))
        ));
        // A candidate set disjoint from the ranking is an explicit error,
        // not an empty result.
        assert!(matches!(
            tie_breaking(&p, TieBreakRule::AgentPriority(Agent(1)), &[Alternative(9)]),
            Err(VotingError::NotFound(_))
        ));
    }

    #[test]
    fn range_voting_strict_maximum_wins_outright() {
        init();
        let matrix = vec![vec![5.0, 1.0, 1.0], vec![0.0, 1.0, 0.0]];
        // No tie: an unknown priority agent must not matter.
        assert_eq!(
            range_voting(&matrix, TieBreakRule::AgentPriority(Agent(42))),
            Ok(Alternative(1))
        );
    }

    #[test]
    fn range_voting_ties_fall_back_to_the_derived_profile() {
        init();
        // Column sums are [8, 8, 8].
        let matrix = vec![
            vec![5.0, 2.0, 1.0],
            vec![1.0, 5.0, 2.0],
            vec![2.0, 1.0, 5.0],
        ];
        assert_eq!(range_voting(&matrix, TieBreakRule::Max), Ok(Alternative(3)));
        assert_eq!(range_voting(&matrix, TieBreakRule::Min), Ok(Alternative(1)));
        // Agent 2 values alternative 2 the most.
        assert_eq!(
            range_voting(&matrix, TieBreakRule::AgentPriority(Agent(2))),
            Ok(Alternative(2))
        );
    }

    #[test]
    fn range_voting_rejects_malformed_matrices() {
        assert!(matches!(
            range_voting(&[], TieBreakRule::Max),
            Err(VotingError::InvalidArgument(_))
        ));
        assert!(matches!(
            range_voting(&[vec![1.0], vec![1.0, 2.0]], TieBreakRule::Max),
            Err(VotingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn dictatorship_returns_the_top_choice() {
        let p = rotation();
        assert_eq!(dictatorship(&p, Agent(2)), Ok(Alternative(2)));
        assert!(matches!(
            dictatorship(&p, Agent(4)),
            Err(VotingError::NotFound(_))
        ));
    }
}
