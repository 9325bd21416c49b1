//! Exact 0/1 knapsack by dynamic programming.
//!
//! Since every item's value is also its weight, `dp[i][w]` is the largest
//! subset sum of the first `i` items that fits in capacity `w`. The table is
//! filled bottom-up and the chosen items are recovered by backtracking from
//! `dp[n][target]`.
//!
//! Time and memory are `O(n · target)`, so the table size is checked against
//! [`MAX_TABLE_CELLS`] before allocating.

use crate::error::{Result, SearchError};
use crate::problems::knapsack::KnapsackInstance;

/// Upper bound on `(n + 1) · (target + 1)` (512 MiB of `u32`).
pub const MAX_TABLE_CELLS: u128 = 1 << 27;

/// The filled `(n + 1) × (target + 1)` DP table, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackTable {
    items: usize,
    capacity: u32,
    cells: Vec<u32>,
}

impl KnapsackTable {
    /// Number of items (the table has one more row).
    pub fn items(&self) -> usize {
        self.items
    }

    /// Target capacity (the table has one more column).
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Best sum using the first `i` items within capacity `w`.
    pub fn get(&self, i: usize, w: u32) -> u32 {
        self.cells[self.index(i, w)]
    }

    /// The optimum, `dp[n][target]`.
    pub fn best(&self) -> u32 {
        self.get(self.items, self.capacity)
    }

    fn index(&self, i: usize, w: u32) -> usize {
        i * (self.capacity as usize + 1) + w as usize
    }
}

/// An optimal selection and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnapsackSolution {
    /// Inclusion flag per item, in instance order.
    pub included: Vec<bool>,
    /// Sum of the included values.
    pub total_value: u32,
}

/// Fills the DP table for `instance`.
///
/// # Errors
/// [`SearchError::TableTooLarge`] if the table would exceed
/// [`MAX_TABLE_CELLS`].
pub fn build_table(instance: &KnapsackInstance) -> Result<KnapsackTable> {
    let values = instance.values();
    let capacity = instance.target();
    let cells = (values.len() as u128 + 1) * (u128::from(capacity) + 1);
    if cells > MAX_TABLE_CELLS {
        return Err(SearchError::TableTooLarge { cells });
    }

    let width = capacity as usize + 1;
    let mut table = KnapsackTable {
        items: values.len(),
        capacity,
        cells: vec![0; cells as usize],
    };
    log::debug!("dp: filling {} x {width} table", values.len() + 1);

    for (i, &value) in values.iter().enumerate() {
        let (prev, rest) = table.cells.split_at_mut((i + 1) * width);
        let prev = &prev[i * width..];
        let row = &mut rest[..width];
        for w in 0..width {
            let skip = prev[w];
            row[w] = match (w as u32).checked_sub(value) {
                Some(room) => skip.max(prev[room as usize] + value),
                None => skip,
            };
        }
    }

    Ok(table)
}

/// Solves `instance` exactly.
///
/// Backtracks from `(n, target)`, taking item `i - 1` whenever
/// `dp[i][w] != dp[i - 1][w]`. The returned `total_value` equals
/// [`KnapsackTable::best`] and never exceeds the target.
///
/// # Examples
///
/// ```
/// use np_search::dp::solve_knapsack;
/// use np_search::problems::knapsack::KnapsackInstance;
///
/// let instance = KnapsackInstance::new(vec![60, 100, 120], 220).unwrap();
/// let solution = solve_knapsack(&instance).unwrap();
/// assert_eq!(solution.included, vec![false, true, true]);
/// assert_eq!(solution.total_value, 220);
/// ```
pub fn solve_knapsack(instance: &KnapsackInstance) -> Result<KnapsackSolution> {
    let table = build_table(instance)?;
    let values = instance.values();

    let mut included = vec![false; values.len()];
    let mut w = table.capacity();
    for i in (1..=values.len()).rev() {
        if table.get(i, w) != table.get(i - 1, w) {
            included[i - 1] = true;
            w -= values[i - 1];
        }
    }

    let total_value = table.best();
    debug_assert_eq!(
        included
            .iter()
            .zip(values)
            .filter_map(|(&inc, &v)| inc.then_some(u64::from(v)))
            .sum::<u64>(),
        u64::from(total_value)
    );
    log::info!(
        "dp: optimum {total_value} of target {} with {} items",
        table.capacity(),
        included.iter().filter(|&&inc| inc).count()
    );

    Ok(KnapsackSolution {
        included,
        total_value,
    })
}
