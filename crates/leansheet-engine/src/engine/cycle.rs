//! Circular reference handling.
//!
//! A formula may reference a cell that (directly or through other cells)
//! references it back. Evaluation tolerates this: [`CycleGuard`] tracks the
//! cells currently being evaluated, and re-entering one of them yields an
//! empty value instead of recursing.
//!
//! [`detect_cycle`] is a separate, static check that reports the reference
//! path of a cycle so a host can point the user at it.

use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

use super::{CellRef, GridView, extract_references};

/// Cells on the current evaluation stack.
#[derive(Debug, Default)]
pub struct CycleGuard {
    resolving: HashSet<CellRef>,
}

/// Membership of one cell in a [`CycleGuard`], released on drop.
pub struct Resolving<'a> {
    guard: &'a mut CycleGuard,
    cell: CellRef,
}

impl CycleGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `cell` as being evaluated. None if it already is.
    pub fn enter(&mut self, cell: &CellRef) -> Option<Resolving<'_>> {
        if !self.resolving.insert(cell.clone()) {
            return None;
        }
        Some(Resolving {
            guard: self,
            cell: cell.clone(),
        })
    }

    pub fn is_resolving(&self, cell: &CellRef) -> bool {
        self.resolving.contains(cell)
    }

    pub fn depth(&self) -> usize {
        self.resolving.len()
    }
}

impl Resolving<'_> {
    pub fn cell(&self) -> &CellRef {
        &self.cell
    }
}

impl Deref for Resolving<'_> {
    type Target = CycleGuard;

    fn deref(&self) -> &CycleGuard {
        &*self.guard
    }
}

impl DerefMut for Resolving<'_> {
    fn deref_mut(&mut self) -> &mut CycleGuard {
        &mut *self.guard
    }
}

impl Drop for Resolving<'_> {
    fn drop(&mut self) {
        self.guard.resolving.remove(&self.cell);
    }
}

/// Find a reference cycle reachable from `start`.
///
/// Returns the path from `start` around the loop, ending with the repeated
/// cell, e.g. `A1 B1 C1 A1`.
pub fn detect_cycle(start: &CellRef, grid: &dyn GridView) -> Option<Vec<CellRef>> {
    let mut search = CycleSearch {
        grid,
        on_path: HashSet::new(),
        cleared: HashSet::new(),
        path: Vec::new(),
    };
    search.visit(start).then_some(search.path)
}

/// Depth-first walk over reference edges.
struct CycleSearch<'g> {
    grid: &'g dyn GridView,
    on_path: HashSet<CellRef>,
    /// Cells whose references are fully explored and lead to no cycle.
    cleared: HashSet<CellRef>,
    path: Vec<CellRef>,
}

impl CycleSearch<'_> {
    fn visit(&mut self, current: &CellRef) -> bool {
        if self.on_path.contains(current) {
            self.path.push(current.clone());
            return true;
        }
        if self.cleared.contains(current) {
            return false;
        }
        let Some(raw) = self.grid.cell_text(current) else {
            return false;
        };

        self.on_path.insert(current.clone());
        self.path.push(current.clone());
        for dep in extract_references(&raw, current, self.grid) {
            if self.visit(&dep) {
                return true;
            }
        }
        self.path.pop();
        self.on_path.remove(current);
        self.cleared.insert(current.clone());
        false
    }
}
