mod config;
use log::{debug, info, warn};

use std::{
    collections::HashMap,
    iter::Sum,
    ops::{Add, AddAssign},
};

pub use crate::config::*;

pub mod builder;
pub mod manual;
pub mod quick_start;
pub mod random;

// **** Private structures ****

/// Running point total for one option.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
struct Points(u64);

impl Points {
    const ZERO: Points = Points(0);
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Points(iter.map(|p| p.0).sum())
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        self.0 += rhs.0;
    }
}

impl Add for Points {
    type Output = Points;
    fn add(self: Points, rhs: Points) -> Points {
        Points(self.0 + rhs.0)
    }
}

/// Tabulates raw ballots against the option set and the point-weight scheme.
///
/// Arguments:
/// * `options` the registered options of the room, in declaration order
/// * `weights` the points awarded per rank position: index 0 is the award
///   for a first-ranked choice, index 1 for a second-ranked choice, etc.
/// * `ballots` the submitted rankings
///
/// The number of weights must equal the number of options, otherwise the
/// whole tabulation fails. Individual ballots are treated leniently: an
/// entry naming an unknown option, or ranked beyond the weight scheme, is
/// dropped and the rest of the ballot still counts. One corrupt ballot must
/// never blank out a room's results.
pub fn tally_ballots(
    options: &[String],
    weights: &[u64],
    ballots: &[Ballot],
) -> Result<Vec<ResultRow>, VotingError> {
    check_scheme(options, weights)?;
    info!(
        "tally_ballots: processing {} ballots over {} options",
        ballots.len(),
        options.len()
    );

    let index: HashMap<&str, usize> = options
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let mut totals: Vec<Points> = vec![Points::ZERO; options.len()];
    for ballot in ballots.iter() {
        if ballot.choices.len() != options.len() {
            warn!(
                "tally_ballots: ballot ranks {} entries for {} options, scoring the known positions",
                ballot.choices.len(),
                options.len()
            );
        }
        for (position, choice) in ballot.choices.iter().enumerate() {
            let weight = match weights.get(position) {
                Some(w) => *w,
                None => {
                    warn!(
                        "tally_ballots: no weight for rank position {}, ignoring trailing entries",
                        position + 1
                    );
                    break;
                }
            };
            match index.get(choice.as_str()) {
                Some(idx) => totals[*idx] += Points(weight * ballot.count),
                None => {
                    warn!(
                        "tally_ballots: unknown option {:?} in a ballot, dropping this entry",
                        choice
                    );
                }
            }
        }
    }
    debug!("tally_ballots: totals: {:?}", totals);

    let pairs: Vec<(String, Points)> = options.iter().cloned().zip(totals).collect();
    Ok(rank_rows(pairs))
}

/// Tabulates pre-aggregated score rows, the alternate input shape used when
/// the ballot store keeps running totals instead of full rankings.
///
/// Points are summed per option. Rows naming an option outside the
/// registered set are dropped, and options without any row still appear in
/// the result with zero points. The sort, rank and tie logic is shared with
/// [`tally_ballots`].
pub fn tally_scores(
    options: &[String],
    rows: &[ScoredRow],
) -> Result<Vec<ResultRow>, VotingError> {
    info!(
        "tally_scores: processing {} score rows over {} options",
        rows.len(),
        options.len()
    );

    let index: HashMap<&str, usize> = options
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.as_str(), idx))
        .collect();

    let mut totals: Vec<Points> = vec![Points::ZERO; options.len()];
    for row in rows.iter() {
        match index.get(row.option.as_str()) {
            Some(idx) => totals[*idx] += Points(row.points),
            None => {
                warn!(
                    "tally_scores: unknown option {:?} in a score row, dropping it",
                    row.option
                );
            }
        }
    }
    debug!("tally_scores: totals: {:?}", totals);

    let pairs: Vec<(String, Points)> = options.iter().cloned().zip(totals).collect();
    Ok(rank_rows(pairs))
}

/// Recovers the number of ballots cast from aggregated point totals.
///
/// Valid only when every recorded ballot scored every option, so that each
/// ballot contributed exactly `weight_sum` points. This is an approximation:
/// if the option set or the weight scheme changed after ballots were
/// recorded, the estimate silently drifts. Callers that hold the raw
/// ballots should count those instead.
pub fn estimate_ballot_count(total_points: u64, weight_sum: u64) -> u64 {
    if weight_sum == 0 {
        return 0;
    }
    ((total_points as f64) / (weight_sum as f64)).round() as u64
}

fn check_scheme(options: &[String], weights: &[u64]) -> Result<(), VotingError> {
    if options.len() != weights.len() {
        return Err(VotingError::MismatchedWeights {
            options: options.len(),
            weights: weights.len(),
        });
    }
    Ok(())
}

// The shared leaderboard core. Both input shapes funnel through here so the
// tie-break and rank laws cannot drift apart.
fn rank_rows(totals: Vec<(String, Points)>) -> Vec<ResultRow> {
    let mut sorted = totals;
    // Descending by points; equal points ordered by the option string
    // (case-sensitive ordinal compare). This keeps the leaderboard fully
    // deterministic even among tied options.
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let mut rows: Vec<ResultRow> = Vec::with_capacity(sorted.len());
    for (idx, (option, points)) in sorted.into_iter().enumerate() {
        let rank = match rows.last() {
            Some(prev) if prev.points == points.0 => prev.rank,
            _ => (idx + 1) as u32,
        };
        rows.push(ResultRow {
            option,
            points: points.0,
            rank,
            tied: false,
        });
    }

    // A tie marks the whole equal-points block, not just adjacent pairs.
    for idx in 0..rows.len() {
        let tied_above = idx > 0 && rows[idx - 1].points == rows[idx].points;
        let tied_below = idx + 1 < rows.len() && rows[idx + 1].points == rows[idx].points;
        rows[idx].tied = tied_above || tied_below;
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn ballot(choices: &[&str]) -> Ballot {
        Ballot {
            choices: choices.iter().map(|s| s.to_string()).collect(),
            count: 1,
        }
    }

    #[test]
    fn zero_ballots_keep_every_option() {
        let rows = tally_ballots(&opts(&["A", "B", "C"]), &[6, 4, 2], &[]).unwrap();
        assert_eq!(rows.len(), 3);
        for row in rows.iter() {
            assert_eq!(row.points, 0);
            assert_eq!(row.rank, 1);
            assert!(row.tied);
        }
    }

    #[test]
    fn weighted_two_option_example() {
        let rows = tally_ballots(
            &opts(&["A", "B"]),
            &[4, 2],
            &[ballot(&["A", "B"]), ballot(&["B", "A"])],
        )
        .unwrap();
        assert_eq!(rows[0].option, "A");
        assert_eq!(rows[0].points, 6);
        assert_eq!(rows[1].option, "B");
        assert_eq!(rows[1].points, 6);
        assert_eq!((rows[0].rank, rows[1].rank), (1, 1));
        assert!(rows[0].tied && rows[1].tied);
    }

    #[test]
    fn ranks_follow_the_competition_walk() {
        // Points 10, 10, 8, 8, 8, 5 must rank 1, 1, 3, 3, 3, 6.
        let rows = tally_scores(
            &opts(&["A", "B", "C", "D", "E", "F"]),
            &[
                ScoredRow {
                    option: "A".to_string(),
                    points: 10,
                },
                ScoredRow {
                    option: "B".to_string(),
                    points: 10,
                },
                ScoredRow {
                    option: "C".to_string(),
                    points: 8,
                },
                ScoredRow {
                    option: "D".to_string(),
                    points: 8,
                },
                ScoredRow {
                    option: "E".to_string(),
                    points: 8,
                },
                ScoredRow {
                    option: "F".to_string(),
                    points: 5,
                },
            ],
        )
        .unwrap();
        let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 1, 3, 3, 3, 6]);
        let tied: Vec<bool> = rows.iter().map(|r| r.tied).collect();
        assert_eq!(tied, vec![true, true, true, true, true, false]);
    }

    #[test]
    fn equal_points_sort_by_option_name() {
        let rows = tally_ballots(&opts(&["Banana", "Apple"]), &[4, 2], &[]).unwrap();
        assert_eq!(rows[0].option, "Apple");
        assert_eq!(rows[1].option, "Banana");
    }

    #[test]
    fn unknown_option_is_dropped_not_fatal() {
        let rows = tally_ballots(
            &opts(&["A", "B"]),
            &[4, 2],
            &[ballot(&["A", "Zed"]), ballot(&["B", "A"])],
        )
        .unwrap();
        // "Zed" contributes nothing; the rest of both ballots still counts.
        let a = rows.iter().find(|r| r.option == "A").unwrap();
        let b = rows.iter().find(|r| r.option == "B").unwrap();
        assert_eq!(a.points, 4 + 2);
        assert_eq!(b.points, 4);
    }

    #[test]
    fn oversized_ballot_ignores_trailing_entries() {
        let rows = tally_ballots(
            &opts(&["A", "B"]),
            &[4, 2],
            &[ballot(&["A", "B", "A", "B"])],
        )
        .unwrap();
        let a = rows.iter().find(|r| r.option == "A").unwrap();
        assert_eq!(a.points, 4);
    }

    #[test]
    fn ballot_count_scales_the_award() {
        let rows = tally_ballots(
            &opts(&["A", "B"]),
            &[4, 2],
            &[Ballot {
                choices: vec!["A".to_string(), "B".to_string()],
                count: 3,
            }],
        )
        .unwrap();
        let a = rows.iter().find(|r| r.option == "A").unwrap();
        assert_eq!(a.points, 12);
    }

    #[test]
    fn mismatched_weights_fail_fast() {
        let res = tally_ballots(&opts(&["A", "B"]), &[4], &[]);
        assert_eq!(
            res,
            Err(VotingError::MismatchedWeights {
                options: 2,
                weights: 1
            })
        );
        // Weights without options are a setup defect too.
        let res = tally_ballots(&[], &[4, 2], &[]);
        assert!(res.is_err());
    }

    #[test]
    fn empty_room_yields_empty_rows() {
        let rows = tally_ballots(&[], &[], &[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn scored_rows_group_by_option() {
        let rows = tally_scores(
            &opts(&["A", "B"]),
            &[
                ScoredRow {
                    option: "A".to_string(),
                    points: 3,
                },
                ScoredRow {
                    option: "A".to_string(),
                    points: 2,
                },
                ScoredRow {
                    option: "Ghost".to_string(),
                    points: 99,
                },
            ],
        )
        .unwrap();
        let a = rows.iter().find(|r| r.option == "A").unwrap();
        assert_eq!(a.points, 5);
        assert!(rows.iter().all(|r| r.option != "Ghost"));
    }

    #[test]
    fn ballot_count_recovery() {
        // Weights [4, 2] sum to 6; 18 points across the room means 3 ballots.
        assert_eq!(estimate_ballot_count(18, 6), 3);
        assert_eq!(estimate_ballot_count(19, 6), 3);
        assert_eq!(estimate_ballot_count(0, 6), 0);
        assert_eq!(estimate_ballot_count(10, 0), 0);
    }

    #[test]
    fn default_scheme_is_two_n_down_to_two() {
        assert_eq!(default_weights(4), vec![8, 6, 4, 2]);
        assert_eq!(default_weights(1), vec![2]);
        assert!(default_weights(0).is_empty());
    }
}
