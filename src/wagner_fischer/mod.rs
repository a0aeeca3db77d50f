use crate::algorithm::EditDistanceAlgorithm;
use crate::config::{table_cells, CancellationFlag, Config, CostModel, Step, TieBreak};
use crate::container::{EditDistanceContainer, Move};
use crate::error::Result;
use crate::NestedSequence;

/// Row-major `(n + 1) x (m + 1)` cost table.
struct Table {
    data: Vec<u64>,
    width: usize,
}

impl Table {
    fn new(n: usize, m: usize) -> Self {
        Table {
            data: vec![0; (n + 1) * (m + 1)],
            width: m + 1,
        }
    }

    fn get(&self, i: usize, j: usize) -> u64 {
        self.data[i * self.width + j]
    }

    fn set(&mut self, i: usize, j: usize, val: u64) {
        self.data[i * self.width + j] = val;
    }
}

/// Classic full-table dynamic programming.
///
/// Always returns a minimal script under the configured cost model. Among
/// minimal scripts the one picked is fixed by the configured [`TieBreak`],
/// a match always being preferred when two lines are equal.
///
/// # Examples
///
/// ```
/// use seqdist::{EditDistanceAlgorithm, EditOperation, WagnerFischer};
///
/// let from = vec![vec!["a"], vec!["b"], vec!["c"]];
/// let to = vec![vec!["a"], vec!["x"], vec!["c"]];
/// let result = WagnerFischer::default().calculate(&from, &to).unwrap();
/// assert_eq!(result.distance(), 1);
/// assert_eq!(
///     result.operations()[1],
///     EditOperation::Substitute { from_index: 1, to_index: 1, from: vec!["b"], to: vec!["x"] }
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct WagnerFischer {
    config: Config,
    cancellation: CancellationFlag,
}

impl WagnerFischer {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(WagnerFischer {
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

impl<T: Eq + Clone> EditDistanceAlgorithm<T> for WagnerFischer {
    fn calculate(&self, from: &NestedSequence<T>, to: &NestedSequence<T>) -> Result<EditDistanceContainer<T>> {
        self.config.check_cells(table_cells(from.len(), to.len()))?;
        tracing::debug!(
            strategy = "wagner_fischer",
            from_len = from.len(),
            to_len = to.len(),
            "calculating edit distance"
        );
        let moves = moves(
            from,
            to,
            &self.config.cost,
            self.config.tie_break,
            &self.cancellation,
        )?;
        let result = EditDistanceContainer::from_moves(from, to, moves, &self.config.cost);
        tracing::debug!(strategy = "wagner_fischer", distance = result.distance(), "edit distance calculated");
        Ok(result)
    }
}

/// Fills the table and walks it back into a forward-ordered list of moves.
pub(crate) fn moves<T: Eq>(
    from: &[Vec<T>],
    to: &[Vec<T>],
    cost: &CostModel,
    tie_break: TieBreak,
    cancellation: &CancellationFlag,
) -> Result<Vec<Move>> {
    let table = fill(from, to, cost, cancellation)?;
    Ok(traceback(from, to, &table, cost, tie_break))
}

fn fill<T: Eq>(from: &[Vec<T>], to: &[Vec<T>], cost: &CostModel, cancellation: &CancellationFlag) -> Result<Table> {
    let n = from.len();
    let m = to.len();
    let (insert, delete, substitute) = (cost.insert as u64, cost.delete as u64, cost.substitute as u64);
    let mut table = Table::new(n, m);

    for j in 1..=m {
        table.set(0, j, j as u64 * insert);
    }
    for i in 1..=n {
        cancellation.check()?;
        table.set(i, 0, i as u64 * delete);
        for j in 1..=m {
            let diagonal = if from[i - 1] == to[j - 1] {
                table.get(i - 1, j - 1)
            } else {
                table.get(i - 1, j - 1) + substitute
            };
            let best = diagonal
                .min(table.get(i - 1, j) + delete)
                .min(table.get(i, j - 1) + insert);
            table.set(i, j, best);
        }
    }
    Ok(table)
}

fn traceback<T: Eq>(from: &[Vec<T>], to: &[Vec<T>], table: &Table, cost: &CostModel, tie_break: TieBreak) -> Vec<Move> {
    let (insert, delete, substitute) = (cost.insert as u64, cost.delete as u64, cost.substitute as u64);
    let mut moves = Vec::with_capacity(from.len().max(to.len()));
    let mut i = from.len();
    let mut j = to.len();

    while i > 0 || j > 0 {
        let here = table.get(i, j);
        if i > 0 && j > 0 && from[i - 1] == to[j - 1] && here == table.get(i - 1, j - 1) {
            moves.push(Move::Match);
            i -= 1;
            j -= 1;
            continue;
        }
        let step = tie_break.order().into_iter().find(|step| match step {
            Step::Substitute => {
                i > 0 && j > 0 && from[i - 1] != to[j - 1] && here == table.get(i - 1, j - 1) + substitute
            }
            Step::Delete => i > 0 && here == table.get(i - 1, j) + delete,
            Step::Insert => j > 0 && here == table.get(i, j - 1) + insert,
        });
        match step {
            Some(Step::Substitute) => {
                moves.push(Move::Substitute);
                i -= 1;
                j -= 1;
            }
            Some(Step::Delete) => {
                moves.push(Move::Delete);
                i -= 1;
            }
            Some(Step::Insert) => {
                moves.push(Move::Insert);
                j -= 1;
            }
            None => unreachable!("cell ({}, {}) has no predecessor", i, j),
        }
    }

    moves.reverse();
    moves
}
