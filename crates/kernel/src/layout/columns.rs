//! Column balancing for multi-column panels.
//!
//! Children are dealt into columns in their original order. The current
//! column advances once it holds `items_per_column` entries, except that the
//! last column absorbs whatever remains, so nothing is ever dropped.

/// Clamp a requested column count to `[1, max]`.
pub fn clamp_columns(requested: usize, max: usize) -> usize {
    requested.clamp(1, max.max(1))
}

/// Items allowed in each column before advancing to the next.
pub fn items_per_column(count: usize, columns: usize, balance: bool, min_items: usize) -> usize {
    if balance {
        count.div_ceil(columns.max(1))
    } else {
        min_items.max(1)
    }
}

/// How one panel's children are split into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPlan {
    /// Number of columns emitted, at least one.
    pub columns: usize,
    /// Fill threshold of every column but the last.
    pub per_column: usize,
}

impl ColumnPlan {
    pub fn new(count: usize, columns: usize, balance: bool, min_items: usize) -> Self {
        let columns = columns.max(1);
        Self {
            columns,
            per_column: items_per_column(count, columns, balance, min_items),
        }
    }

    /// Column index of every item, in input order.
    pub fn assign(&self, count: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(count);
        let (mut current, mut filled) = (0, 0);
        for _ in 0..count {
            if filled >= self.per_column && current + 1 < self.columns {
                current += 1;
                filled = 0;
            }
            out.push(current);
            filled += 1;
        }
        out
    }

    /// Deal `items` into exactly [`columns`](Self::columns) columns.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<Vec<T>> {
        let mut out: Vec<Vec<T>> = (0..self.columns).map(|_| Vec::new()).collect();
        for (column, item) in self.assign(items.len()).into_iter().zip(items) {
            out[column].push(item);
        }
        out
    }
}

/// Distribute `items` into exactly `columns` columns (at least one).
///
/// Order is preserved within and across columns; trailing columns may be
/// empty when there are fewer items than columns.
pub fn distribute<T>(items: Vec<T>, columns: usize, balance: bool, min_items: usize) -> Vec<Vec<T>> {
    ColumnPlan::new(items.len(), columns, balance, min_items).apply(items)
}
