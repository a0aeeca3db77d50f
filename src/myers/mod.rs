use crate::algorithm::EditDistanceAlgorithm;
use crate::config::{CancellationFlag, Config, CostModel, Strategy};
use crate::container::{EditDistanceContainer, Move};
use crate::error::Result;
use crate::NestedSequence;
use std::cmp::max;
use std::iter::repeat;

#[derive(Clone)]
struct V {
    data: Vec<usize>,
    offset: isize,
}

impl V {
    fn new(size: usize) -> Self {
        V {
            data: vec![0; 2 * size + 1],
            offset: size as isize,
        }
    }

    fn get(&self, k: isize) -> usize {
        self.data[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, val: usize) {
        self.data[(k + self.offset) as usize] = val;
    }
}

/// Greedy O(ND) diff, fast on near-identical inputs.
///
/// Myers finds a shortest script of inserts and deletes. With substitution
/// pairing enabled, each changed region then has its deletes and inserts
/// zipped into substitutions. The reported distance is the cost of the
/// returned script, which is an upper bound of the optimal one and is not
/// guaranteed minimal. Building one from a [`Config`] therefore requires
/// `allow_approximate`.
///
/// # Examples
///
/// ```
/// use seqdist::{EditDistanceAlgorithm, Myers};
///
/// let from = vec![vec![1], vec![2], vec![3]];
/// let to = vec![vec![1], vec![3], vec![4]];
/// let result = Myers::default().calculate(&from, &to).unwrap();
/// assert_eq!(result.distance(), 2);
/// assert_eq!(result.apply(&from), Ok(to));
/// ```
#[derive(Debug, Clone)]
pub struct Myers {
    config: Config,
    cancellation: CancellationFlag,
    pair_substitutions: bool,
}

impl Default for Myers {
    fn default() -> Self {
        Myers {
            config: Config::default().allow_approximate(true),
            cancellation: CancellationFlag::new(),
            pair_substitutions: true,
        }
    }
}

impl Myers {
    pub fn new(config: Config) -> Result<Self> {
        config.validate_for(Strategy::Myers)?;
        Ok(Myers {
            config,
            ..Myers::default()
        })
    }

    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// Reports plain inserts and deletes instead of substitutions.
    pub fn without_substitutions(mut self) -> Self {
        self.pair_substitutions = false;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<T: Eq + Clone> EditDistanceAlgorithm<T> for Myers {
    fn calculate(&self, from: &NestedSequence<T>, to: &NestedSequence<T>) -> Result<EditDistanceContainer<T>> {
        self.config.check_cells(trace_cells(from.len(), to.len()))?;
        tracing::debug!(
            strategy = "myers",
            from_len = from.len(),
            to_len = to.len(),
            pair_substitutions = self.pair_substitutions,
            "calculating edit distance"
        );
        let mut moves = diff(from, to, &self.cancellation)?;
        if self.pair_substitutions && pairing_pays_off(&self.config.cost) {
            moves = pair_substitutions(moves);
        }
        let result = EditDistanceContainer::from_moves(from, to, moves, &self.config.cost);
        tracing::debug!(strategy = "myers", distance = result.distance(), "edit distance calculated");
        Ok(result)
    }
}

/// Upper bound of the cells the search keeps alive: one `V` of
/// `2(n + m) + 1` cells per round, for at most `n + m + 1` rounds.
fn trace_cells(n: usize, m: usize) -> u64 {
    let maxi = (n as u64).saturating_add(m as u64);
    maxi
        .saturating_add(1)
        .saturating_mul(maxi.saturating_mul(2).saturating_add(1))
}

fn diff<T: Eq>(old: &[T], new: &[T], cancellation: &CancellationFlag) -> Result<Vec<Move>> {
    if old.is_empty() {
        return Ok(vec![Move::Insert; new.len()]);
    }
    if new.is_empty() {
        return Ok(vec![Move::Delete; old.len()]);
    }
    let (trace, end_x, end_y) = search(old, new, cancellation)?;
    Ok(traceback(old, new, trace, end_x, end_y))
}

/// Greedy forward search, returning the `V` of every round and the end point.
fn search<T: Eq>(old: &[T], new: &[T], cancellation: &CancellationFlag) -> Result<(Vec<V>, usize, usize)> {
    let n = old.len();
    let m = new.len();
    let maxi = n + m;
    let mut v = V::new(maxi);
    let mut trace: Vec<V> = Vec::new();
    let mut end_x = n;
    let mut end_y = m;
    'edits: for d in 0..=maxi as isize {
        cancellation.check()?;
        for k in (-d..=d).step_by(2) {
            let mut x = if k == -d {
                v.get(k + 1)
            } else if k == d {
                v.get(k - 1) + 1
            } else {
                max(v.get(k + 1), v.get(k - 1) + 1)
            };
            let mut y = (x as isize - k) as usize;
            while x < n && y < m && old[x] == new[y] {
                x += 1;
                y += 1;
            }
            v.set(k, x);
            if x >= n && y >= m {
                end_x = x;
                end_y = y;
                trace.push(v.clone());
                break 'edits;
            }
        }
        trace.push(v.clone());
    }
    Ok((trace, end_x, end_y))
}

fn traceback<T: Eq>(old: &[T], new: &[T], trace: Vec<V>, mut x: usize, mut y: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    for d in (0..trace.len()).rev() {
        let d = d as isize;
        let k = x as isize - y as isize;
        let prev_k = if k == -d {
            k + 1
        } else if k == d || trace[d as usize].get(k - 1) + 1 >= trace[d as usize].get(k + 1) {
            k - 1
        } else {
            k + 1
        };
        let prev_x = trace[d as usize].get(prev_k);
        let prev_y = prev_x as isize - prev_k;
        while x as isize > prev_x as isize && y as isize > prev_y && old[x - 1] == new[y - 1] {
            moves.push(Move::Match);
            x -= 1;
            y -= 1;
        }
        if d > 0 {
            if prev_k == k - 1 {
                moves.push(Move::Delete);
            } else {
                moves.push(Move::Insert);
            }
        }
        x = prev_x;
        y = prev_y as usize;
    }
    while x > 0 && y > 0 {
        moves.push(Move::Match);
        x -= 1;
        y -= 1;
    }

    moves.reverse();
    moves
}

/// A substitution only helps when it is no dearer than the delete and insert it replaces.
fn pairing_pays_off(cost: &CostModel) -> bool {
    cost.substitute as u64 <= cost.insert as u64 + cost.delete as u64
}

/// Rewrites every run of deletes and inserts between two matches as
/// substitutions first, then the leftover deletes or inserts.
fn pair_substitutions(moves: Vec<Move>) -> Vec<Move> {
    let mut paired = Vec::with_capacity(moves.len());
    let mut deletes = 0;
    let mut inserts = 0;

    for step in moves {
        match step {
            Move::Delete => deletes += 1,
            Move::Insert => inserts += 1,
            other => {
                flush(&mut paired, &mut deletes, &mut inserts);
                paired.push(other);
            }
        }
    }
    flush(&mut paired, &mut deletes, &mut inserts);
    paired
}

fn flush(paired: &mut Vec<Move>, deletes: &mut usize, inserts: &mut usize) {
    let substitutions = (*deletes).min(*inserts);
    paired.extend(repeat(Move::Substitute).take(substitutions));
    paired.extend(repeat(Move::Delete).take(*deletes - substitutions));
    paired.extend(repeat(Move::Insert).take(*inserts - substitutions));
    *deletes = 0;
    *inserts = 0;
}
