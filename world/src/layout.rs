//! Floor-derived room geometry.
//!
//! The explicit floor set is the single source of truth. Walls, the doorway
//! position and the spawn point are re-derived from it after every mutation.

use std::collections::BTreeSet;

use isoroom_core::{Cell, Doorway, Furniture, WallEdge, WallSegment};

use crate::config::WorldConfig;

/// Geometry and furnishing of a single room.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomLayout {
    width: u32,
    height: u32,
    floor: BTreeSet<Cell>,
    walls: Vec<WallSegment>,
    doorway: Option<Doorway>,
    spawn_point: Option<Cell>,
    furniture: Vec<Furniture>,
}

impl RoomLayout {
    /// Creates a fully floored room with a centred north-east doorway.
    #[must_use]
    pub fn new(config: &WorldConfig, width: u32, height: u32) -> Self {
        let width = config.clamp_dimension(width);
        let height = config.clamp_dimension(height);
        let mut layout = Self {
            width,
            height,
            floor: full_rectangle(width, height),
            walls: Vec::new(),
            doorway: None,
            spawn_point: None,
            furniture: Vec::new(),
        };

        let doorway = normalize_doorway(
            Doorway::new(Cell::new((width / 2) as i32, -1), WallEdge::NorthEast),
            width,
            height,
        );
        layout.doorway = Some(doorway);
        layout.reclamp_doorway();
        layout.spawn_point = Some(layout.clamp_cell(spawn_for_doorway(
            layout.doorway,
            width,
            height,
        )));
        layout.rebuild_walls();
        layout
    }

    /// Number of columns in the room rectangle.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the room rectangle.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Cells carrying a floor tile, in ascending order.
    #[must_use]
    pub fn floor(&self) -> &BTreeSet<Cell> {
        &self.floor
    }

    /// Reports whether the cell carries a floor tile.
    #[must_use]
    pub fn is_floor(&self, cell: Cell) -> bool {
        self.floor.contains(&cell)
    }

    /// Reports whether the cell lies inside the room rectangle.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.is_within(self.width, self.height)
    }

    /// Wall segments derived from the floor boundary.
    #[must_use]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// Reports whether any wall segment sits on the cell.
    #[must_use]
    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.iter().any(|segment| segment.cell == cell)
    }

    /// Opening cut into the wall, if one survives the current floor plan.
    #[must_use]
    pub const fn doorway(&self) -> Option<Doorway> {
        self.doorway
    }

    /// Cell new avatars appear on.
    #[must_use]
    pub const fn spawn_point(&self) -> Option<Cell> {
        self.spawn_point
    }

    /// Furniture placed in the room.
    #[must_use]
    pub fn furniture(&self) -> &[Furniture] {
        &self.furniture
    }

    /// Returns the furniture item whose footprint covers the cell.
    #[must_use]
    pub fn furniture_at(&self, cell: Cell) -> Option<&Furniture> {
        self.furniture
            .iter()
            .find(|item| item.region().contains(cell))
    }

    /// Cells that floor edits must never remove.
    ///
    /// Covers furniture footprints, the in-bounds cells of `agent_cells` and the
    /// spawn point.
    #[must_use]
    pub fn protected_cells(&self, agent_cells: &[Cell]) -> BTreeSet<Cell> {
        let mut protected: BTreeSet<Cell> = self
            .furniture
            .iter()
            .flat_map(|item| item.region().cells())
            .collect();
        protected.extend(agent_cells.iter().copied().filter(|cell| self.contains(*cell)));
        protected.extend(self.spawn_point);
        protected
    }

    /// Flips floor presence on an unprotected in-bounds cell.
    ///
    /// Returns the new presence when the floor changed.
    pub fn toggle_floor_tile(&mut self, cell: Cell, agent_cells: &[Cell]) -> Option<bool> {
        if !self.contains(cell) || self.protected_cells(agent_cells).contains(&cell) {
            return None;
        }

        let present = if self.floor.remove(&cell) {
            false
        } else {
            let _ = self.floor.insert(cell);
            true
        };
        self.reclamp_doorway();
        self.rebuild_walls();
        Some(present)
    }

    /// Covers the whole rectangle with floor.
    pub fn fill_floor(&mut self) {
        self.floor = full_rectangle(self.width, self.height);
        self.reclamp_doorway();
        self.rebuild_walls();
    }

    /// Removes every floor tile that is not protected.
    pub fn clear_floor(&mut self, agent_cells: &[Cell]) {
        self.floor = self.protected_cells(agent_cells);
        self.reclamp_doorway();
        self.rebuild_walls();
    }

    /// Resizes the room and re-derives doorway, spawn point and walls.
    ///
    /// Growing exposes new floor tiles; shrinking drops floor and furniture that
    /// no longer fit. Absent requests keep the current doorway and spawn point.
    pub fn update_layout(
        &mut self,
        config: &WorldConfig,
        width: u32,
        height: u32,
        doorway: Option<Doorway>,
        spawn_point: Option<Cell>,
    ) {
        let width = config.clamp_dimension(width);
        let height = config.clamp_dimension(height);
        let (old_width, old_height) = (self.width, self.height);
        self.width = width;
        self.height = height;

        self.floor.retain(|cell| cell.is_within(width, height));
        if width > old_width || height > old_height {
            let exposed = full_rectangle(width, height)
                .into_iter()
                .filter(|cell| !cell.is_within(old_width, old_height));
            self.floor.extend(exposed);
        }

        self.settle(
            doorway.or(self.doorway),
            spawn_point.or(self.spawn_point),
            true,
        );
    }

    /// Replaces the floor plan with externally authored cells.
    ///
    /// Unlike [`RoomLayout::update_layout`], the doorway's inside cell is not
    /// forced to floor, so holes under a slid doorway survive.
    pub fn import(
        &mut self,
        config: &WorldConfig,
        width: u32,
        height: u32,
        floor: impl IntoIterator<Item = Cell>,
        doorway: Option<Doorway>,
        spawn_point: Option<Cell>,
    ) {
        self.width = config.clamp_dimension(width);
        self.height = config.clamp_dimension(height);
        let (width, height) = (self.width, self.height);
        self.floor = floor
            .into_iter()
            .filter(|cell| cell.is_within(width, height))
            .collect();

        self.settle(doorway, spawn_point, false);
    }

    pub(crate) fn push_furniture(&mut self, furniture: Furniture) {
        self.furniture.push(furniture);
    }

    fn settle(
        &mut self,
        doorway: Option<Doorway>,
        spawn_point: Option<Cell>,
        open_doorway: bool,
    ) {
        let (width, height) = (self.width, self.height);
        self.furniture
            .retain(|item| item.region().is_within(width, height));

        self.doorway = doorway.map(|doorway| normalize_doorway(doorway, width, height));
        if let Some(doorway) = self.doorway.filter(|_| open_doorway) {
            let _ = self.floor.insert(doorway.inner_cell());
        }

        let spawn = spawn_point.unwrap_or_else(|| spawn_for_doorway(self.doorway, width, height));
        let spawn = self.clamp_cell(spawn);
        self.spawn_point = Some(spawn);
        let _ = self.floor.insert(spawn);

        let footprints: Vec<Cell> = self
            .furniture
            .iter()
            .flat_map(|item| item.region().cells())
            .collect();
        self.floor.extend(footprints);

        self.reclamp_doorway();
        self.rebuild_walls();
    }

    /// Slides the doorway along its edge so that it touches the first floor tile
    /// of its column (north-east) or row (north-west).
    fn reclamp_doorway(&mut self) {
        let Some(doorway) = self.doorway else {
            return;
        };
        let anchor = doorway.cell;
        self.doorway = match doorway.edge {
            WallEdge::NorthEast => self
                .floor
                .iter()
                .filter(|cell| cell.x() == anchor.x())
                .map(|cell| cell.y())
                .min()
                .map(|y| Doorway::new(Cell::new(anchor.x(), y - 1), WallEdge::NorthEast)),
            WallEdge::NorthWest => self
                .floor
                .iter()
                .filter(|cell| cell.y() == anchor.y())
                .map(|cell| cell.x())
                .min()
                .map(|x| Doorway::new(Cell::new(x - 1, anchor.y()), WallEdge::NorthWest)),
        };
    }

    fn rebuild_walls(&mut self) {
        let mut walls = Vec::new();
        for cell in &self.floor {
            let candidates = [
                WallSegment::new(cell.offset(0, -1), WallEdge::NorthEast),
                WallSegment::new(cell.offset(-1, 0), WallEdge::NorthWest),
            ];
            for segment in candidates {
                if self.floor.contains(&segment.cell) {
                    continue;
                }
                if self.doorway.is_some_and(|doorway| doorway.opens(&segment)) {
                    continue;
                }
                walls.push(segment);
            }
        }
        self.walls = walls;
    }

    fn clamp_cell(&self, cell: Cell) -> Cell {
        Cell::new(
            cell.x().clamp(0, self.width as i32 - 1),
            cell.y().clamp(0, self.height as i32 - 1),
        )
    }
}

fn full_rectangle(width: u32, height: u32) -> BTreeSet<Cell> {
    (0..width as i32)
        .flat_map(|x| (0..height as i32).map(move |y| Cell::new(x, y)))
        .collect()
}

/// Pins a doorway to the outer edge it belongs to.
fn normalize_doorway(doorway: Doorway, width: u32, height: u32) -> Doorway {
    match doorway.edge {
        WallEdge::NorthEast => Doorway::new(
            Cell::new(doorway.cell.x().clamp(0, width as i32 - 1), -1),
            WallEdge::NorthEast,
        ),
        WallEdge::NorthWest => Doorway::new(
            Cell::new(-1, doorway.cell.y().clamp(0, height as i32 - 1)),
            WallEdge::NorthWest,
        ),
    }
}

fn spawn_for_doorway(doorway: Option<Doorway>, width: u32, height: u32) -> Cell {
    match doorway {
        Some(Doorway {
            cell,
            edge: WallEdge::NorthEast,
        }) => Cell::new(cell.x(), 0),
        Some(Doorway {
            cell,
            edge: WallEdge::NorthWest,
        }) => Cell::new(0, cell.y()),
        None => Cell::new((width / 2) as i32, (height / 2) as i32),
    }
}
