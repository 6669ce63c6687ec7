use std::collections::BTreeSet;

use isoroom_core::{AgentId, Cell};
use isoroom_system_pathfinding::Pathfinder;

fn open_room(width: i32, height: i32) -> impl Fn(Cell, Option<AgentId>) -> bool {
    move |cell: Cell, _exclude: Option<AgentId>| {
        cell.x() >= 0 && cell.y() >= 0 && cell.x() < width && cell.y() < height
    }
}

fn assert_connected(start: Cell, path: &[Cell]) {
    let mut previous = start;
    for &step in path {
        assert!(
            previous.is_adjacent_to(step),
            "step from {previous:?} to {step:?} is not an 8-neighbour move"
        );
        previous = step;
    }
}

#[test]
fn open_room_diagonal_path_has_five_steps() {
    let pathfinder = Pathfinder::new(open_room(10, 10));
    let start = Cell::new(0, 0);
    let goal = Cell::new(5, 5);

    let path = pathfinder.find_path(start, goal, None);

    assert_eq!(path.len(), 5, "expected five diagonal steps, got {path:?}");
    assert_eq!(path.first(), Some(&Cell::new(1, 1)));
    assert_eq!(path.last(), Some(&goal));
    assert!(!path.contains(&start), "path must not include the start cell");
    assert_connected(start, &path);
}

#[test]
fn goal_that_is_not_walkable_yields_empty_path() {
    let pathfinder = Pathfinder::new(open_room(6, 6));

    assert!(pathfinder
        .find_path(Cell::new(0, 0), Cell::new(8, 2), None)
        .is_empty());
}

#[test]
fn start_equal_to_goal_yields_empty_path() {
    let pathfinder = Pathfinder::new(open_room(6, 6));

    assert!(pathfinder
        .find_path(Cell::new(2, 2), Cell::new(2, 2), None)
        .is_empty());
}

#[test]
fn routes_around_a_wall_with_a_gap() {
    let blocked: BTreeSet<Cell> = (0..5).map(|y| Cell::new(3, y)).collect();
    let validity = move |cell: Cell, _exclude: Option<AgentId>| {
        cell.x() >= 0 && cell.y() >= 0 && cell.x() < 7 && cell.y() < 7 && !blocked.contains(&cell)
    };
    let pathfinder = Pathfinder::new(validity);
    let start = Cell::new(0, 0);
    let goal = Cell::new(6, 0);

    let path = pathfinder.find_path(start, goal, None);

    assert_eq!(path.last(), Some(&goal));
    assert_connected(start, &path);
    assert!(
        path.iter().all(|cell| pathfinder.validity()(*cell, None)),
        "path stepped onto a blocked cell: {path:?}"
    );
    assert!(
        path.iter().any(|cell| cell.y() >= 5),
        "path should pass through the gap below the wall"
    );
}

#[test]
fn enclosed_goal_yields_empty_path() {
    let ring: BTreeSet<Cell> = [
        (3, 3),
        (4, 3),
        (5, 3),
        (3, 4),
        (5, 4),
        (3, 5),
        (4, 5),
        (5, 5),
    ]
    .into_iter()
    .map(|(x, y)| Cell::new(x, y))
    .collect();
    let validity = move |cell: Cell, _exclude: Option<AgentId>| {
        cell.x() >= 0 && cell.y() >= 0 && cell.x() < 9 && cell.y() < 9 && !ring.contains(&cell)
    };
    let pathfinder = Pathfinder::new(validity);

    assert!(pathfinder
        .find_path(Cell::new(0, 0), Cell::new(4, 4), None)
        .is_empty());
}

#[test]
fn diagonal_moves_may_cut_corners() {
    let validity = |cell: Cell, _exclude: Option<AgentId>| {
        matches!((cell.x(), cell.y()), (0, 0) | (1, 1))
    };
    let pathfinder = Pathfinder::new(validity);

    assert_eq!(
        pathfinder.find_path(Cell::new(0, 0), Cell::new(1, 1), None),
        vec![Cell::new(1, 1)]
    );
}

#[test]
fn excluded_agent_does_not_block_itself() {
    let mover = AgentId::new(1);
    let occupied = Cell::new(2, 0);
    let validity = move |cell: Cell, exclude: Option<AgentId>| {
        let in_bounds = cell.x() >= 0 && cell.y() == 0 && cell.x() < 4;
        in_bounds && (cell != occupied || exclude == Some(AgentId::new(2)))
    };
    let pathfinder = Pathfinder::new(validity);

    assert!(pathfinder
        .find_path(Cell::new(0, 0), Cell::new(3, 0), Some(mover))
        .is_empty());
    assert_eq!(
        pathfinder.find_path(Cell::new(0, 0), Cell::new(3, 0), Some(AgentId::new(2))),
        vec![Cell::new(1, 0), occupied, Cell::new(3, 0)]
    );
}

#[test]
fn repeated_searches_are_identical() {
    let pathfinder = Pathfinder::new(open_room(12, 9));
    let start = Cell::new(1, 7);
    let goal = Cell::new(10, 2);

    let first = pathfinder.find_path(start, goal, None);
    for _ in 0..5 {
        assert_eq!(pathfinder.find_path(start, goal, None), first);
    }
    assert_connected(start, &first);
}
