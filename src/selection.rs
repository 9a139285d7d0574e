//! Drag-gesture tracking.
//!
//! A gesture starts on `pointer_down`. The first `pointer_enter` onto a different
//! cell locks the gesture to the direction of that move (each axis contributes the
//! sign of its offset). From then on, every enter event rebuilds the path from
//! the start cell: `max(|Δrow|, |Δcol|)` steps along the locked direction, cut
//! short at the first cell outside the grid. Rebuilding on each move keeps the
//! path a contiguous straight run when the pointer overshoots or backs up.

use crate::grid::{Cell, Direction};

/// Where a gesture stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Dragging {
        start: Cell,
        direction: Option<Direction>,
        path: Vec<Cell>,
    },
}

#[derive(Debug, Clone)]
pub struct SelectionTracker {
    size: usize,
    state: SelectionState,
}

impl SelectionTracker {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self { size, state: SelectionState::Idle }
    }

    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SelectionState::Dragging { .. })
    }

    /// The in-progress path; empty while idle.
    #[must_use]
    pub fn current_path(&self) -> &[Cell] {
        match &self.state {
            SelectionState::Idle => &[],
            SelectionState::Dragging { path, .. } => path,
        }
    }

    /// Start a gesture on `cell`. Returns whether a gesture was started.
    ///
    /// A cell outside the grid is ignored. Pressing again mid-drag restarts the
    /// gesture from the new cell, as happens when a release event was lost.
    pub fn pointer_down(&mut self, cell: Cell) -> bool {
        if !cell.in_bounds(self.size) {
            log::trace!("ignoring pointer down outside the grid at {cell}");
            return false;
        }
        self.state = SelectionState::Dragging { start: cell, direction: None, path: vec![cell] };
        true
    }

    /// Extend the gesture toward `cell`. Returns whether the path changed.
    pub fn pointer_enter(&mut self, cell: Cell) -> bool {
        let size = self.size;
        let SelectionState::Dragging { start, direction, path } = &mut self.state else {
            return false;
        };
        let start = *start;

        let locked = match *direction {
            Some(d) => d,
            None => match Direction::toward(start, cell) {
                Some(d) => {
                    *direction = Some(d);
                    d
                }
                // still on the start cell; path stays [start]
                None => return false,
            },
        };

        let steps = start.row.abs_diff(cell.row).max(start.col.abs_diff(cell.col));
        let next: Vec<Cell> = (0..=steps).map_while(|i| start.step(locked, i, size)).collect();
        if *path == next {
            return false;
        }
        *path = next;
        true
    }

    /// End the gesture and hand back its path. `None` while idle, so a duplicate
    /// release is a no-op.
    pub fn pointer_up(&mut self) -> Option<Vec<Cell>> {
        match std::mem::take(&mut self.state) {
            SelectionState::Idle => None,
            SelectionState::Dragging { path, .. } => Some(path),
        }
    }

    /// The pointer left the puzzle area; treated exactly like a release.
    pub fn pointer_leave(&mut self) -> Option<Vec<Cell>> {
        self.pointer_up()
    }

    /// Drop any gesture in progress without producing a path.
    pub fn reset(&mut self, size: usize) {
        self.size = size;
        self.state = SelectionState::Idle;
    }
}
