//! Single-source reachability over passable cells
//!
//! Breadth-first search from one agent's position across the 8-connected
//! grid, recording distance and the step taken from each cell's BFS
//! predecessor. Rebuilt fresh for every agent every turn. The frontier is an
//! explicit FIFO queue, keeping stack usage flat on arbitrarily large grids.

use std::collections::VecDeque;

use crate::core::types::StepOffset;
use crate::strategy::view::AgentView;

/// One cell of the reachability graph
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphCell {
    /// BFS distance from the origin, in single-cell steps
    pub dist: u32,
    /// Displacement from this cell's BFS predecessor to this cell
    pub step: StepOffset,
    /// False means the cell was never reached
    pub visited: bool,
}

/// BFS distance/first-step map from an agent's position to every passable cell
#[derive(Debug, Clone)]
pub struct ReachabilityGraph {
    size_x: i32,
    size_y: i32,
    cells: Vec<GraphCell>,
}

impl ReachabilityGraph {
    /// Build the graph from the acting player's position in the view
    pub fn new(view: &AgentView) -> Self {
        let size_x = view.size_x();
        let size_y = view.size_y();
        let mut graph = Self {
            size_x,
            size_y,
            cells: vec![GraphCell::default(); (size_x * size_y) as usize],
        };

        let origin = view.player();
        graph.set(
            origin.x,
            origin.y,
            GraphCell {
                dist: 0,
                step: StepOffset::ZERO,
                visited: true,
            },
        );

        let mut frontier = VecDeque::new();
        frontier.push_back((origin.x, origin.y, 0u32));
        while let Some((x, y, dist)) = frontier.pop_front() {
            for step in StepOffset::NEIGHBORS {
                let (nx, ny) = (x + step.dx(), y + step.dy());
                if view.is_passable(nx, ny) && !graph.cell(nx, ny).visited {
                    graph.set(
                        nx,
                        ny,
                        GraphCell {
                            dist: dist + 1,
                            step,
                            visited: true,
                        },
                    );
                    frontier.push_back((nx, ny, dist + 1));
                }
            }
        }

        graph
    }

    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(x >= 0 && y >= 0 && x < self.size_x && y < self.size_y);
        (y * self.size_x + x) as usize
    }

    fn set(&mut self, x: i32, y: i32, cell: GraphCell) {
        let idx = self.index(x, y);
        self.cells[idx] = cell;
    }

    /// Graph cell at (x, y)
    ///
    /// # Panics
    ///
    /// Panics when (x, y) is outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> &GraphCell {
        &self.cells[self.index(x, y)]
    }

    /// True iff (x, y) is on the grid and was reached by the search
    pub fn is_reachable(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.size_x && y < self.size_y && self.cell(x, y).visited
    }

    /// First step a mover at the origin should take toward (x, y)
    ///
    /// Walks backward through stored predecessor offsets until one step
    /// remains. The origin itself yields the stationary offset.
    ///
    /// # Panics
    ///
    /// Panics when (x, y) was never visited; callers check
    /// [`is_reachable`](Self::is_reachable) first.
    pub fn get_direction_to(&self, x: i32, y: i32) -> StepOffset {
        let mut cell = self.cell(x, y);
        assert!(cell.visited, "direction to unvisited cell ({x}, {y})");

        let (mut x, mut y) = (x, y);
        while cell.dist > 1 {
            x -= cell.step.dx();
            y -= cell.step.dy();
            cell = self.cell(x, y);
        }
        cell.step
    }
}
