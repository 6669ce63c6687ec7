//! Occupancy rules for avatars, furniture and floor edits.

use isoroom_core::{AgentId, Cell, CellRect, CellRectSize, CellValidity, PlacementError};

use crate::layout::RoomLayout;

/// Read-only validator over a room layout and the avatars standing in it.
#[derive(Clone, Debug)]
pub struct PlacementValidator<'a> {
    layout: &'a RoomLayout,
    agents: Vec<(AgentId, Cell)>,
}

impl<'a> PlacementValidator<'a> {
    /// Creates a validator; `agents` pairs each avatar with its rounded cell.
    #[must_use]
    pub fn new(layout: &'a RoomLayout, agents: Vec<(AgentId, Cell)>) -> Self {
        Self { layout, agents }
    }

    /// Layout the validator inspects.
    #[must_use]
    pub fn layout(&self) -> &'a RoomLayout {
        self.layout
    }

    /// Reports whether an avatar other than `exclude` may stand on the cell.
    ///
    /// The doorway cell is always walkable so avatars can enter and leave.
    #[must_use]
    pub fn is_valid_agent_position(&self, cell: Cell, exclude: Option<AgentId>) -> bool {
        if self
            .layout
            .doorway()
            .is_some_and(|doorway| doorway.cell == cell)
        {
            return true;
        }

        self.layout.contains(cell)
            && self.layout.is_floor(cell)
            && !self.layout.is_wall(cell)
            && self.layout.furniture_at(cell).is_none()
            && !self
                .agents
                .iter()
                .any(|(agent, agent_cell)| Some(*agent) != exclude && *agent_cell == cell)
    }

    /// Explains why a footprint anchored at `origin` cannot be placed.
    pub fn check_furniture_position(
        &self,
        origin: Cell,
        size: CellRectSize,
    ) -> Result<(), PlacementError> {
        check_footprint(
            CellRect::from_origin_and_size(origin, size),
            self.layout,
            self.agents.iter().map(|(_, cell)| *cell),
        )
    }

    /// Reports whether a footprint anchored at `origin` can be placed.
    #[must_use]
    pub fn is_valid_furniture_position(&self, origin: Cell, size: CellRectSize) -> bool {
        self.check_furniture_position(origin, size).is_ok()
    }

    /// Reports whether the room tool may flip the cell's floor tile.
    #[must_use]
    pub fn can_toggle_floor_tile(&self, cell: Cell) -> bool {
        if !self.layout.contains(cell) {
            return false;
        }
        if !self.layout.is_floor(cell) {
            return true;
        }
        let agent_cells: Vec<Cell> = self.agents.iter().map(|(_, cell)| *cell).collect();
        !self.layout.protected_cells(&agent_cells).contains(&cell)
    }
}

impl CellValidity for PlacementValidator<'_> {
    fn is_valid(&self, cell: Cell, exclude: Option<AgentId>) -> bool {
        self.is_valid_agent_position(cell, exclude)
    }
}

/// Checks that `region` fits the room, sits on floor and is unoccupied.
pub fn check_footprint(
    region: CellRect,
    layout: &RoomLayout,
    agent_cells: impl IntoIterator<Item = Cell>,
) -> Result<(), PlacementError> {
    if !region.is_within(layout.width(), layout.height()) {
        return Err(PlacementError::OutOfBounds);
    }
    if !region.cells().all(|cell| layout.is_floor(cell)) {
        return Err(PlacementError::MissingFloor);
    }
    if layout
        .furniture()
        .iter()
        .any(|item| item.region().overlaps(&region))
    {
        return Err(PlacementError::Occupied);
    }
    if agent_cells.into_iter().any(|cell| region.contains(cell)) {
        return Err(PlacementError::OccupiedByAgent);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use isoroom_core::{Furniture, FurnitureId, FurnitureKind};

    fn room() -> RoomLayout {
        RoomLayout::new(&WorldConfig::default(), 8, 8)
    }

    #[test]
    fn sofa_requires_both_cells_on_free_floor() {
        let mut layout = room();
        let sofa = FurnitureKind::ClubSofa.footprint();

        {
            let validator = PlacementValidator::new(&layout, Vec::new());
            assert_eq!(validator.check_furniture_position(Cell::new(2, 2), sofa), Ok(()));
            assert_eq!(
                validator.check_furniture_position(Cell::new(7, 2), sofa),
                Err(PlacementError::OutOfBounds)
            );
        }

        let _ = layout.toggle_floor_tile(Cell::new(3, 2), &[]);
        {
            let validator = PlacementValidator::new(&layout, Vec::new());
            assert_eq!(
                validator.check_furniture_position(Cell::new(2, 2), sofa),
                Err(PlacementError::MissingFloor)
            );
        }
        let _ = layout.toggle_floor_tile(Cell::new(3, 2), &[]);

        layout.push_furniture(Furniture::new(
            FurnitureId::new(0),
            FurnitureKind::Plant,
            Cell::new(3, 2),
        ));
        let validator = PlacementValidator::new(&layout, vec![(AgentId::new(0), Cell::new(5, 5))]);
        assert_eq!(
            validator.check_furniture_position(Cell::new(2, 2), sofa),
            Err(PlacementError::Occupied)
        );
        assert_eq!(
            validator.check_furniture_position(Cell::new(4, 5), sofa),
            Err(PlacementError::OccupiedByAgent)
        );
        assert!(validator.is_valid_furniture_position(Cell::new(0, 6), sofa));
    }

    #[test]
    fn doorway_cell_is_always_walkable() {
        let layout = room();
        let validator = PlacementValidator::new(&layout, Vec::new());
        let doorway = layout.doorway().expect("new rooms have a doorway");

        assert!(validator.is_valid_agent_position(doorway.cell, None));
        assert!(!validator.is_valid_agent_position(Cell::new(0, -1), None));
        assert!(!validator.is_valid_agent_position(Cell::new(8, 0), None));
    }

    #[test]
    fn other_agents_block_but_the_excluded_agent_does_not() {
        let layout = room();
        let me = AgentId::new(0);
        let other = AgentId::new(1);
        let validator = PlacementValidator::new(
            &layout,
            vec![(me, Cell::new(2, 2)), (other, Cell::new(3, 3))],
        );

        assert!(validator.is_valid_agent_position(Cell::new(2, 2), Some(me)));
        assert!(!validator.is_valid_agent_position(Cell::new(3, 3), Some(me)));
        assert!(!validator.is_valid_agent_position(Cell::new(2, 2), None));
        assert!(validator.is_valid(Cell::new(4, 4), Some(me)));
    }

    #[test]
    fn furniture_blocks_avatars() {
        let mut layout = room();
        layout.push_furniture(Furniture::new(
            FurnitureId::new(0),
            FurnitureKind::Table,
            Cell::new(1, 1),
        ));
        let validator = PlacementValidator::new(&layout, Vec::new());

        assert!(!validator.is_valid_agent_position(Cell::new(2, 2), None));
        assert!(validator.is_valid_agent_position(Cell::new(3, 3), None));
    }

    #[test]
    fn toggle_hover_respects_protection() {
        let mut layout = room();
        let _ = layout.toggle_floor_tile(Cell::new(6, 6), &[]);
        let validator = PlacementValidator::new(&layout, vec![(AgentId::new(0), Cell::new(1, 1))]);

        assert!(validator.can_toggle_floor_tile(Cell::new(6, 6)), "holes can be filled");
        assert!(validator.can_toggle_floor_tile(Cell::new(5, 5)));
        assert!(!validator.can_toggle_floor_tile(Cell::new(1, 1)), "agent cell");
        assert!(!validator.can_toggle_floor_tile(Cell::new(4, 0)), "spawn point");
        assert!(!validator.can_toggle_floor_tile(Cell::new(-1, 0)));
    }
}
