/*!

# Quick start

This library determines the winning alternative of an election, given the
valuations that each voter (agent) assigns to each candidate option
(alternative). Agents and alternatives are referred to by 1-based integer
identifiers.

Start from a value matrix with one row per agent and one column per
alternative, derive a preference profile from it and run one of the rules:

```
use social_choice::*;

let matrix = vec![
    vec![5.0, 2.0, 1.0],
    vec![1.0, 5.0, 2.0],
    vec![2.0, 1.0, 5.0],
];

let profile = Profile::from_valuations(&matrix)?;

// Every alternative gets one first-place vote here, so the tie-break
// rule decides.
assert_eq!(plurality(&profile, TieBreakRule::Max)?, Alternative(3));
assert_eq!(borda(&profile, TieBreakRule::Min)?, Alternative(1));
assert_eq!(stv(&profile, TieBreakRule::AgentPriority(Agent(2)))?, Alternative(2));

// Range voting works on the raw matrix, without the ordinal detour.
assert_eq!(range_voting(&matrix, TieBreakRule::Min)?, Alternative(1));

# Ok::<(), VotingError>(())
```

The available rules are [`plurality`](crate::plurality), [`veto`](crate::veto),
[`borda`](crate::borda), [`harmonic`](crate::harmonic), the generic
[`scoring_rule`](crate::scoring_rule) evaluator, [`stv`](crate::stv),
[`range_voting`](crate::range_voting) and the trivial
[`dictatorship`](crate::dictatorship) selector. All of them resolve residual
ties with the same deterministic [`TieBreakRule`](crate::TieBreakRule)
protocol.

If the valuations arrive row by row, use the
[`ProfileBuilder`](crate::builder::ProfileBuilder) instead of assembling the
matrix yourself. For a command-line workflow starting from an Excel
spreadsheet, see the `tallywin` binary of this repository.

*/
