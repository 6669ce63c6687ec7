#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic A* search over the 8-connected room grid.

use std::collections::{HashMap, HashSet};

use isoroom_core::{AgentId, Cell, CellValidity};

/// Cost of a horizontal or vertical step, in tenths of a cell.
pub const CARDINAL_STEP_COST: u32 = 10;

/// Cost of a diagonal step, in tenths of a cell.
pub const DIAGONAL_STEP_COST: u32 = 14;

/// Neighbour offsets in expansion order.
const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Path planner parameterized by a walkability predicate.
///
/// The heuristic is the Manhattan distance scaled to step costs. It
/// overestimates on an 8-connected grid, so returned paths are not always the
/// cheapest; they are, however, fully deterministic.
#[derive(Debug)]
pub struct Pathfinder<V> {
    validity: V,
}

impl<V> Pathfinder<V>
where
    V: CellValidity,
{
    /// Creates a planner that consults `validity` for every candidate cell.
    #[must_use]
    pub const fn new(validity: V) -> Self {
        Self { validity }
    }

    /// Computes the steps leading from `start` to `goal`.
    ///
    /// The returned path excludes `start` and ends with `goal`. It is empty
    /// when the goal is not walkable, when `start == goal`, or when no route
    /// exists. `exclude` names the avatar whose own cell should not block it.
    #[must_use]
    pub fn find_path(&self, start: Cell, goal: Cell, exclude: Option<AgentId>) -> Vec<Cell> {
        if !self.validity.is_valid(goal, exclude) || start == goal {
            return Vec::new();
        }

        let mut open = vec![start];
        let mut closed = HashSet::new();
        let mut came_from = HashMap::new();
        let mut scores = HashMap::new();
        let _ = scores.insert(start, Score::new(0, heuristic(start, goal)));

        while let Some(best_index) = pick_best_open_index(&open, &scores) {
            let current = open.remove(best_index);
            if current == goal {
                return reconstruct_path(&came_from, goal);
            }
            let _ = closed.insert(current);

            let current_g = scores.get(&current).map_or(0, |score| score.g);
            for (dx, dy) in NEIGHBOUR_OFFSETS {
                let neighbour = current.offset(dx, dy);
                if closed.contains(&neighbour) || !self.validity.is_valid(neighbour, exclude) {
                    continue;
                }

                let step = if dx != 0 && dy != 0 {
                    DIAGONAL_STEP_COST
                } else {
                    CARDINAL_STEP_COST
                };
                let tentative_g = current_g.saturating_add(step);

                // Scored cells that are not closed are still open and keep their slot.
                match scores.get(&neighbour) {
                    Some(score) if tentative_g >= score.g => continue,
                    Some(_) => {}
                    None => open.push(neighbour),
                }

                let _ = came_from.insert(neighbour, current);
                let _ = scores.insert(
                    neighbour,
                    Score::new(tentative_g, heuristic(neighbour, goal)),
                );
            }
        }

        Vec::new()
    }

    /// Borrows the walkability predicate.
    #[must_use]
    pub const fn validity(&self) -> &V {
        &self.validity
    }
}

#[derive(Clone, Copy, Debug)]
struct Score {
    g: u32,
    f: u32,
}

impl Score {
    fn new(g: u32, h: u32) -> Self {
        Self {
            g,
            f: g.saturating_add(h),
        }
    }
}

fn heuristic(from: Cell, to: Cell) -> u32 {
    from.manhattan_distance(to).saturating_mul(CARDINAL_STEP_COST)
}

/// Lowest f wins; the earliest inserted node wins ties.
fn pick_best_open_index(open: &[Cell], scores: &HashMap<Cell, Score>) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (index, cell) in open.iter().enumerate() {
        let f = scores.get(cell).map_or(u32::MAX, |score| score.f);
        match best {
            Some((_, best_f)) if f >= best_f => {}
            _ => best = Some((index, f)),
        }
    }
    best.map(|(index, _)| index)
}

fn reconstruct_path(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut cursor = goal;
    while let Some(&previous) = came_from.get(&cursor) {
        path.push(previous);
        cursor = previous;
    }
    let _ = path.pop();
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_resolve_to_earliest_inserted_node() {
        let open = vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)];
        let mut scores = HashMap::new();
        let _ = scores.insert(Cell::new(0, 0), Score::new(10, 30));
        let _ = scores.insert(Cell::new(1, 0), Score::new(0, 20));
        let _ = scores.insert(Cell::new(2, 0), Score::new(5, 15));

        assert_eq!(pick_best_open_index(&open, &scores), Some(1));
        assert_eq!(pick_best_open_index(&[], &scores), None);
    }

    #[test]
    fn reconstruction_drops_the_start_cell() {
        let mut came_from = HashMap::new();
        let _ = came_from.insert(Cell::new(1, 1), Cell::new(0, 0));
        let _ = came_from.insert(Cell::new(2, 2), Cell::new(1, 1));

        assert_eq!(
            reconstruct_path(&came_from, Cell::new(2, 2)),
            vec![Cell::new(1, 1), Cell::new(2, 2)]
        );
    }
}
