//! Step-by-step record of resident frames produced by a page replacement run.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

use crate::constants::GRID_CELL_WIDTH;

/// Resident pages at one step, in the order the policy keeps them.
///
/// Each snapshot owns its pages, so later steps never alias earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FrameSnapshot(Vec<i64>);

impl FrameSnapshot {
    pub fn pages(&self) -> &[i64] {
        &self.0
    }

    pub fn contains(&self, page: i64) -> bool {
        self.0.contains(&page)
    }
}

impl Deref for FrameSnapshot {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        &self.0
    }
}

impl From<Vec<i64>> for FrameSnapshot {
    fn from(pages: Vec<i64>) -> Self {
        FrameSnapshot(pages)
    }
}

impl FromIterator<i64> for FrameSnapshot {
    fn from_iter<I: IntoIterator<Item = i64>>(pages: I) -> Self {
        FrameSnapshot(pages.into_iter().collect())
    }
}

/// One snapshot per access of the reference string, oldest first.
///
/// Only the simulator appends to a history; callers get it read-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct History {
    snapshots: Vec<FrameSnapshot>,
}

impl History {
    pub(crate) fn with_capacity(steps: usize) -> Self {
        History { snapshots: Vec::with_capacity(steps) }
    }

    pub(crate) fn record(&mut self, snapshot: FrameSnapshot) {
        self.snapshots.push(snapshot);
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot taken after access `step` (zero-based).
    pub fn get(&self, step: usize) -> Option<&FrameSnapshot> {
        self.snapshots.get(step)
    }

    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameSnapshot> {
        self.snapshots.iter()
    }

    /// Largest number of resident pages seen at any step.
    pub fn max_occupancy(&self) -> usize {
        self.snapshots.iter().map(|s| s.len()).max().unwrap_or(0)
    }

    /// Frame occupancy over time as a text grid: one row per frame slot, one
    /// column per step. Empty slots are left blank.
    pub fn grid<'a>(&'a self, title: &'a str) -> Grid<'a> {
        Grid { history: self, title }
    }
}

/// Text rendering of a [`History`], see [`History::grid`].
pub struct Grid<'a> {
    history: &'a History,
    title: &'a str,
}

impl fmt::Display for Grid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memory Allocation ({})", self.title)?;
        let history = self.history;
        if history.is_empty() {
            return writeln!(f, "  (no accesses)");
        }

        let widest_page = history
            .iter()
            .flat_map(|s| s.iter())
            .map(|page| page.to_string().len())
            .max()
            .unwrap_or(0);
        let step_digits = (history.len() - 1).to_string().len();
        let width = GRID_CELL_WIDTH.max(widest_page + 1).max(step_digits + 1);

        write!(f, "{:<6}|", "step")?;
        for step in 0..history.len() {
            write!(f, "{:>width$}", step, width = width)?;
        }
        writeln!(f)?;

        for slot in 0..history.max_occupancy() {
            write!(f, "{:<6}|", format!("f{}", slot))?;
            for snapshot in history {
                match snapshot.get(slot) {
                    Some(page) => write!(f, "{:>width$}", page, width = width)?,
                    None => write!(f, "{:>width$}", "", width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a FrameSnapshot;
    type IntoIter = std::slice::Iter<'a, FrameSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
