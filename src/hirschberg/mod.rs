use crate::algorithm::EditDistanceAlgorithm;
use crate::config::{CancellationFlag, Config, CostModel, TieBreak};
use crate::container::{EditDistanceContainer, Move};
use crate::error::Result;
use crate::NestedSequence;
use crate::wagner_fischer;
use std::iter::repeat;

/// Linear-space exact edit distance.
///
/// Splits `from` in half, finds where the optimal path crosses the middle
/// row from one forward and one backward cost row, and recurses on both
/// halves. Only two rows over the shorter input are alive at any time.
///
/// The distance always equals [`WagnerFischer`](crate::WagnerFischer)'s
/// under the same cost model. When several optimal scripts exist the one
/// returned may differ, since the tie-break is only applied inside the
/// single-line base case.
#[derive(Debug, Clone, Default)]
pub struct Hirschberg {
    config: Config,
    cancellation: CancellationFlag,
}

impl Hirschberg {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Hirschberg {
            config,
            cancellation: CancellationFlag::new(),
        })
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T: Eq + Clone> EditDistanceAlgorithm<T> for Hirschberg {
    fn calculate(&self, from: &NestedSequence<T>, to: &NestedSequence<T>) -> Result<EditDistanceContainer<T>> {
        let shorter = from.len().min(to.len()) as u64;
        self.config.check_cells(2 * (shorter + 1))?;
        tracing::debug!(
            strategy = "hirschberg",
            from_len = from.len(),
            to_len = to.len(),
            "calculating edit distance"
        );

        // Keep the rows over the shorter side by solving the mirrored problem.
        let moves = if to.len() > from.len() {
            let solver = Solver {
                cost: mirror_cost(&self.config.cost),
                tie_break: mirror_tie_break(self.config.tie_break),
                cancellation: &self.cancellation,
            };
            let mut moves = Vec::with_capacity(to.len());
            solver.solve(to, from, &mut moves)?;
            moves.into_iter().map(mirror_move).collect()
        } else {
            let solver = Solver {
                cost: self.config.cost,
                tie_break: self.config.tie_break,
                cancellation: &self.cancellation,
            };
            let mut moves = Vec::with_capacity(from.len());
            solver.solve(from, to, &mut moves)?;
            moves
        };

        let result = EditDistanceContainer::from_moves(from, to, moves, &self.config.cost);
        tracing::debug!(strategy = "hirschberg", distance = result.distance(), "edit distance calculated");
        Ok(result)
    }
}

struct Solver<'a> {
    cost: CostModel,
    tie_break: TieBreak,
    cancellation: &'a CancellationFlag,
}

impl Solver<'_> {
    fn solve<T: Eq>(&self, from: &[Vec<T>], to: &[Vec<T>], moves: &mut Vec<Move>) -> Result<()> {
        self.cancellation.check()?;
        if from.is_empty() {
            moves.extend(repeat(Move::Insert).take(to.len()));
            return Ok(());
        }
        if to.is_empty() {
            moves.extend(repeat(Move::Delete).take(from.len()));
            return Ok(());
        }
        if from.len() == 1 {
            moves.extend(wagner_fischer::moves(from, to, &self.cost, self.tie_break, self.cancellation)?);
            return Ok(());
        }

        let mid = from.len() / 2;
        let upper = last_row(from[..mid].iter(), to.iter(), &self.cost);
        let mut lower = last_row(from[mid..].iter().rev(), to.iter().rev(), &self.cost);
        lower.reverse();

        // leftmost column on an optimal path through the middle row
        let split = (0..=to.len())
            .min_by_key(|&j| upper[j] + lower[j])
            .unwrap_or(0);
        tracing::trace!(from_len = from.len(), to_len = to.len(), mid, split, "split");

        self.solve(&from[..mid], &to[..split], moves)?;
        self.solve(&from[mid..], &to[split..], moves)
    }
}

/// Last row of the cost table of `from` against every prefix of `to`,
/// kept in two rows.
fn last_row<'a, T, I, J>(from: I, to: J, cost: &CostModel) -> Vec<u64>
where
    T: Eq + 'a,
    I: Iterator<Item = &'a Vec<T>>,
    J: Iterator<Item = &'a Vec<T>> + Clone,
{
    let (insert, delete, substitute) = (cost.insert as u64, cost.delete as u64, cost.substitute as u64);
    let mut prev: Vec<u64> = (0..=to.clone().count() as u64).map(|j| j * insert).collect();
    let mut curr = vec![0; prev.len()];

    for line in from {
        curr[0] = prev[0] + delete;
        for (j, other) in to.clone().enumerate() {
            let diagonal = if line == other { prev[j] } else { prev[j] + substitute };
            curr[j + 1] = diagonal.min(prev[j + 1] + delete).min(curr[j] + insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}

fn mirror_cost(cost: &CostModel) -> CostModel {
    CostModel::new(cost.delete, cost.insert, cost.substitute)
}

fn mirror_tie_break(tie_break: TieBreak) -> TieBreak {
    match tie_break {
        TieBreak::SubstituteFirst => TieBreak::SubstituteFirst,
        TieBreak::DeleteFirst => TieBreak::InsertFirst,
        TieBreak::InsertFirst => TieBreak::DeleteFirst,
    }
}

fn mirror_move(step: Move) -> Move {
    match step {
        Move::Delete => Move::Insert,
        Move::Insert => Move::Delete,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::EditOperation;
    use crate::error::EditDistanceError;
    use crate::wagner_fischer::WagnerFischer;
    use proptest::prelude::*;

    fn lines(items: &[&'static str]) -> Vec<Vec<&'static str>> {
        items.iter().map(|s| vec![*s]).collect()
    }

    fn nested() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(prop::collection::vec(0u8..3, 0..2), 0..12)
    }

    proptest! {
        #[test]
        fn test_same_distance_as_full_table(
            old in nested(),
            new in nested(),
            insert in 1u32..4,
            delete in 1u32..4,
            substitute in 1u32..8,
        ) {
            let config = Config::default().with_cost(CostModel::new(insert, delete, substitute));
            let expected = WagnerFischer::new(config).unwrap().calculate(&old, &new).unwrap();
            let result = Hirschberg::new(config).unwrap().calculate(&old, &new).unwrap();
            prop_assert_eq!(result.distance(), expected.distance());
        }

        #[test]
        fn test_reconstruction(old in nested(), new in nested()) {
            let result = Hirschberg::default().calculate(&old, &new).unwrap();
            prop_assert_eq!(result.apply(&old), Ok(new));
        }

        #[test]
        fn test_identity(els in nested()) {
            let result = Hirschberg::default().calculate(&els, &els).unwrap();
            prop_assert_eq!(result.distance(), 0);
            prop_assert!(result.is_identity());
        }
    }

    #[test]
    fn test_last_row() {
        let from = lines(&["a", "b"]);
        let to = lines(&["a", "x", "b"]);
        let row = last_row(from.iter(), to.iter(), &CostModel::UNIT);
        assert_eq!(row, vec![2, 1, 1, 1]);
    }

    #[test]
    fn test_substitution_in_middle() {
        let from = lines(&["a", "b", "c"]);
        let to = lines(&["a", "x", "c"]);
        let result = Hirschberg::default().calculate(&from, &to).unwrap();
        assert_eq!(result.distance(), 1);
        assert_eq!(
            result.operations()[1],
            EditOperation::Substitute {
                from_index: 1,
                to_index: 1,
                from: vec!["b"],
                to: vec!["x"]
            }
        );
    }

    #[test]
    fn test_longer_destination() {
        let from = lines(&["a", "b"]);
        let to = lines(&["b", "a", "c", "d", "a"]);
        let result = Hirschberg::default().calculate(&from, &to).unwrap();
        let expected = WagnerFischer::default().calculate(&from, &to).unwrap();
        assert_eq!(result.distance(), expected.distance());
        assert_eq!(result.apply(&from), Ok(to));
    }

    #[test]
    fn test_asymmetric_costs_when_mirrored() {
        let from = lines(&["a"]);
        let to = lines(&["b", "c", "a", "d"]);
        let config = Config::default().with_cost(CostModel::new(2, 7, 3));
        let result = Hirschberg::new(config).unwrap().calculate(&from, &to).unwrap();
        assert_eq!(result.distance(), 6);
        assert_eq!(result.counts().insertions, 3);
        assert_eq!(result.counts().matches, 1);
    }

    #[test]
    fn test_boundaries() {
        let empty: Vec<Vec<&str>> = vec![];
        let some = lines(&["a", "b", "c"]);
        assert_eq!(Hirschberg::default().calculate(&empty, &some).unwrap().distance(), 3);
        assert_eq!(Hirschberg::default().calculate(&some, &empty).unwrap().distance(), 3);
        assert!(Hirschberg::default().calculate(&empty, &empty).unwrap().is_empty());
    }

    #[test]
    fn test_ceiling_counts_rows_not_table() {
        let from: Vec<Vec<u32>> = (0..100).map(|i| vec![i]).collect();
        let to: Vec<Vec<u32>> = (0..50).map(|i| vec![i * 2]).collect();
        let config = Config::default().with_max_cells(102);
        assert!(Hirschberg::new(config).unwrap().calculate(&from, &to).is_ok());
        assert!(WagnerFischer::new(config).unwrap().calculate(&from, &to).is_err());

        let config = Config::default().with_max_cells(101);
        assert_eq!(
            Hirschberg::new(config).unwrap().calculate(&from, &to),
            Err(EditDistanceError::ResourceExceeded {
                cells: 102,
                max_cells: 101
            })
        );
    }

    #[test]
    fn test_cancelled() {
        let flag = CancellationFlag::new();
        flag.cancel();
        let algorithm = Hirschberg::default().with_cancellation(flag);
        let result = algorithm.calculate(&lines(&["a", "b"]), &lines(&["b"]));
        assert_eq!(result, Err(EditDistanceError::Cancelled));
    }
}
