#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the isometric room engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the Isoroom lobby.";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Creates a new room with full floor coverage.
    CreateRoom {
        /// Human readable room name.
        name: String,
        /// Requested number of columns.
        width: u32,
        /// Requested number of rows.
        height: u32,
    },
    /// Makes the provided room the active editing target.
    SelectRoom {
        /// Room that should become current.
        room: RoomId,
    },
    /// Renames an existing room.
    RenameRoom {
        /// Room being renamed.
        room: RoomId,
        /// Replacement name.
        name: String,
    },
    /// Deletes a room, falling back to another room when it was current.
    DeleteRoom {
        /// Room scheduled for removal.
        room: RoomId,
    },
    /// Resizes a room and re-normalizes its doorway and spawn point.
    UpdateLayout {
        /// Room whose layout changes.
        room: RoomId,
        /// Requested number of columns, clamped by the world.
        width: u32,
        /// Requested number of rows, clamped by the world.
        height: u32,
        /// Requested doorway; the existing doorway is kept when absent.
        doorway: Option<Doorway>,
        /// Requested spawn point; the existing spawn point is kept when absent.
        spawn_point: Option<Cell>,
    },
    /// Replaces a room's floor plan with an externally authored layout.
    ImportLayout {
        /// Room receiving the imported plan.
        room: RoomId,
        /// Number of columns described by the plan.
        width: u32,
        /// Number of rows described by the plan.
        height: u32,
        /// Floor tiles contained in the plan.
        floor: Vec<Cell>,
        /// Doorway carved into the plan, if any.
        doorway: Option<Doorway>,
        /// Spawn point marked in the plan, if any.
        spawn_point: Option<Cell>,
    },
    /// Flips floor presence on a cell of the current room.
    ToggleFloorTile {
        /// Cell whose floor tile should flip.
        cell: Cell,
    },
    /// Covers the current room's full rectangle with floor tiles.
    FillFloor,
    /// Removes every unprotected floor tile from the current room.
    ClearFloor,
    /// Places a furniture item in the current room.
    PlaceFurniture {
        /// Catalog entry describing the item.
        kind: FurnitureKind,
        /// Cell anchoring the footprint.
        origin: Cell,
    },
    /// Adds an avatar to the world.
    SpawnAgent {
        /// Display name of the avatar.
        name: String,
        /// Cell the avatar starts on.
        cell: Cell,
    },
    /// Hands a previously computed path to an avatar.
    AssignPath {
        /// Avatar that should follow the path.
        agent: AgentId,
        /// Commanded destination, equal to the final path cell.
        target: Cell,
        /// Steps to walk, excluding the avatar's current cell.
        path: Vec<Cell>,
    },
    /// Starts an emote on an avatar.
    SetAgentAction {
        /// Avatar performing the action.
        agent: AgentId,
        /// Action to perform.
        action: AgentAction,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
}

/// Events broadcast by the world after processing commands.
///
/// Only successful state changes are reported; rejected commands leave no trace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a room was created.
    RoomCreated {
        /// Identifier assigned to the room.
        room: RoomId,
        /// Spawn point chosen for the room.
        spawn_point: Option<Cell>,
    },
    /// Announces that the current room changed.
    RoomSelected {
        /// Room that became current, if any remain.
        room: Option<RoomId>,
    },
    /// Confirms that a room was renamed.
    RoomRenamed {
        /// Room that changed name.
        room: RoomId,
    },
    /// Confirms that a room was deleted.
    RoomDeleted {
        /// Room that no longer exists.
        room: RoomId,
    },
    /// Reports that a room's dimensions, floor, doorway or spawn point changed.
    LayoutChanged {
        /// Room whose layout was rebuilt.
        room: RoomId,
    },
    /// Confirms that a floor tile flipped.
    FloorTileToggled {
        /// Cell that changed.
        cell: Cell,
        /// Whether the cell now carries a floor tile.
        present: bool,
    },
    /// Confirms that furniture was placed.
    FurniturePlaced {
        /// Identifier assigned to the item.
        furniture: FurnitureId,
        /// Catalog entry that was placed.
        kind: FurnitureKind,
        /// Region of cells occupied by the item.
        region: CellRect,
    },
    /// Confirms that an avatar entered the world.
    AgentSpawned {
        /// Identifier assigned to the avatar.
        agent: AgentId,
        /// Cell the avatar occupies.
        cell: Cell,
    },
    /// Confirms that an avatar started following a path.
    AgentPathAssigned {
        /// Avatar that started moving.
        agent: AgentId,
        /// Commanded destination.
        target: Cell,
        /// Number of steps in the assigned path.
        steps: usize,
    },
    /// Reports that an avatar finished its path.
    AgentArrived {
        /// Avatar that arrived.
        agent: AgentId,
        /// Cell the avatar snapped to.
        cell: Cell,
    },
    /// Reports that an avatar's action changed.
    AgentActionChanged {
        /// Avatar whose action changed.
        agent: AgentId,
        /// Action now active.
        action: AgentAction,
    },
}

/// Location of a single grid cell.
///
/// Coordinates are signed because doorways sit one cell outside the floor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column of the cell, growing toward the south-east on screen.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row of the cell, growing toward the south-west on screen.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell displaced by the provided offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Snaps a continuous world position to the nearest cell, rounding ties up.
    #[must_use]
    pub fn from_world(x: f32, y: f32) -> Self {
        Self::new(round_half_up(x), round_half_up(y))
    }

    /// Signed displacement from `self` to `other`.
    #[must_use]
    pub const fn delta_to(self, other: Cell) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Reports whether `other` is one of the eight cells surrounding `self`.
    #[must_use]
    pub fn is_adjacent_to(self, other: Cell) -> bool {
        let dx = self.x.abs_diff(other.x);
        let dy = self.y.abs_diff(other.y);
        dx.max(dy) == 1
    }

    /// Reports whether the cell lies inside a `width × height` grid anchored at the origin.
    #[must_use]
    pub fn is_within(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }
}

fn round_half_up(value: f32) -> i32 {
    (value + 0.5).floor() as i32
}

/// Axis-aligned rectangle expressed in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRect {
    origin: Cell,
    size: CellRectSize,
}

impl CellRect {
    /// Constructs a rectangle from an origin cell and size.
    #[must_use]
    pub const fn from_origin_and_size(origin: Cell, size: CellRectSize) -> Self {
        Self { origin, size }
    }

    /// Upper-left cell that anchors the rectangle.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Dimensions of the rectangle measured in whole cells.
    #[must_use]
    pub const fn size(&self) -> CellRectSize {
        self.size
    }

    /// Reports whether the cell falls inside the rectangle.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        let (dx, dy) = self.origin.delta_to(cell);
        dx >= 0 && dy >= 0 && (dx as u32) < self.size.width && (dy as u32) < self.size.height
    }

    /// Reports whether two rectangles share at least one cell.
    #[must_use]
    pub fn overlaps(&self, other: &CellRect) -> bool {
        let (left, top) = (i64::from(self.origin.x), i64::from(self.origin.y));
        let (right, bottom) = (
            left + i64::from(self.size.width),
            top + i64::from(self.size.height),
        );
        let (other_left, other_top) = (i64::from(other.origin.x), i64::from(other.origin.y));
        let (other_right, other_bottom) = (
            other_left + i64::from(other.size.width),
            other_top + i64::from(other.size.height),
        );

        left < other_right && other_left < right && top < other_bottom && other_top < bottom
    }

    /// Reports whether every cell of the rectangle lies inside a `width × height` grid.
    #[must_use]
    pub fn is_within(&self, width: u32, height: u32) -> bool {
        if self.origin.x < 0 || self.origin.y < 0 {
            return false;
        }
        let right = u64::from(self.origin.x as u32) + u64::from(self.size.width);
        let bottom = u64::from(self.origin.y as u32) + u64::from(self.size.height);
        right <= u64::from(width) && bottom <= u64::from(height)
    }

    /// Iterates over the cells covered by the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let origin = self.origin;
        let width = self.size.width as i32;
        let height = self.size.height as i32;
        (0..height).flat_map(move |dy| (0..width).map(move |dx| origin.offset(dx, dy)))
    }
}

/// Size of a [`CellRect`] measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRectSize {
    width: u32,
    height: u32,
}

impl CellRectSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the rectangle in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rectangle in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }
}

/// Orientation of a wall segment or doorway.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallEdge {
    /// Boundary running along increasing `x` on the row above a floor cell.
    NorthEast,
    /// Boundary running along increasing `y` on the column left of a floor cell.
    NorthWest,
}

/// Derived wall marker sitting on the non-floor side of a floor boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WallSegment {
    /// Non-floor cell that carries the wall.
    pub cell: Cell,
    /// Orientation of the wall.
    pub edge: WallEdge,
}

impl WallSegment {
    /// Creates a new wall segment descriptor.
    #[must_use]
    pub const fn new(cell: Cell, edge: WallEdge) -> Self {
        Self { cell, edge }
    }
}

/// Opening cut into exactly one wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Doorway {
    /// Cell just outside the floor where the opening sits.
    pub cell: Cell,
    /// Wall orientation the opening is cut into.
    pub edge: WallEdge,
}

impl Doorway {
    /// Creates a new doorway descriptor.
    #[must_use]
    pub const fn new(cell: Cell, edge: WallEdge) -> Self {
        Self { cell, edge }
    }

    /// Floor cell directly inside the opening.
    #[must_use]
    pub const fn inner_cell(&self) -> Cell {
        match self.edge {
            WallEdge::NorthEast => self.cell.offset(0, 1),
            WallEdge::NorthWest => self.cell.offset(1, 0),
        }
    }

    /// Reports whether the doorway replaces the provided wall segment.
    #[must_use]
    pub fn opens(&self, segment: &WallSegment) -> bool {
        self.cell == segment.cell && self.edge == segment.edge
    }
}

/// Unique identifier assigned to a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(u32);

impl RoomId {
    /// Creates a new room identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a furniture item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FurnitureId(u32);

impl FurnitureId {
    /// Creates a new furniture identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to an avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new avatar identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Catalog of furniture that can be placed in a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureKind {
    /// Two-seat sofa.
    ClubSofa,
    /// Single chair.
    WoodenChair,
    /// Single bed.
    Bed,
    /// Square dining table.
    Table,
    /// Floor rug.
    Rug,
    /// Potted plant.
    Plant,
    /// Standing lamp.
    Lamp,
    /// Wall bookshelf.
    Bookshelf,
}

impl FurnitureKind {
    /// Every catalog entry in display order.
    pub const ALL: [FurnitureKind; 8] = [
        Self::ClubSofa,
        Self::WoodenChair,
        Self::Bed,
        Self::Table,
        Self::Rug,
        Self::Plant,
        Self::Lamp,
        Self::Bookshelf,
    ];

    /// Cells covered by the item, anchored at its origin.
    #[must_use]
    pub const fn footprint(self) -> CellRectSize {
        match self {
            Self::ClubSofa | Self::Bed => CellRectSize::new(2, 1),
            Self::Table => CellRectSize::new(2, 2),
            Self::Rug => CellRectSize::new(3, 2),
            Self::WoodenChair | Self::Plant | Self::Lamp | Self::Bookshelf => {
                CellRectSize::new(1, 1)
            }
        }
    }

    /// Name shown in catalog listings.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ClubSofa => "Club Sofa",
            Self::WoodenChair => "Wooden Chair",
            Self::Bed => "Bed",
            Self::Table => "Table",
            Self::Rug => "Rug",
            Self::Plant => "Plant",
            Self::Lamp => "Lamp",
            Self::Bookshelf => "Bookshelf",
        }
    }

    /// Catalog section the item is listed under.
    #[must_use]
    pub const fn category(self) -> FurnitureCategory {
        match self {
            Self::ClubSofa | Self::WoodenChair | Self::Bed => FurnitureCategory::Seating,
            Self::Table | Self::Lamp => FurnitureCategory::Functional,
            Self::Rug => FurnitureCategory::Flooring,
            Self::Plant => FurnitureCategory::Decoration,
            Self::Bookshelf => FurnitureCategory::Wall,
        }
    }
}

/// Catalog sections used to group furniture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnitureCategory {
    /// Items avatars can sit or lie on.
    Seating,
    /// Tables, lamps and similar utility items.
    Functional,
    /// Items lying flat on the floor.
    Flooring,
    /// Purely decorative items.
    Decoration,
    /// Items placed against walls.
    Wall,
}

/// Furniture item placed inside a room.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Furniture {
    /// Identifier allocated by the world.
    pub id: FurnitureId,
    /// Catalog entry describing the item.
    pub kind: FurnitureKind,
    /// Cell anchoring the footprint.
    pub origin: Cell,
}

impl Furniture {
    /// Creates a new furniture descriptor.
    #[must_use]
    pub const fn new(id: FurnitureId, kind: FurnitureKind, origin: Cell) -> Self {
        Self { id, kind, origin }
    }

    /// Region of cells occupied by the item.
    #[must_use]
    pub const fn region(&self) -> CellRect {
        CellRect::from_origin_and_size(self.origin, self.kind.footprint())
    }
}

/// On-screen compass direction an avatar faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Facing {
    /// Up the screen.
    North,
    /// Up and to the right.
    NorthEast,
    /// Right.
    East,
    /// Down and to the right.
    SouthEast,
    /// Down the screen.
    #[default]
    South,
    /// Down and to the left.
    SouthWest,
    /// Left.
    West,
    /// Up and to the left.
    NorthWest,
}

impl Facing {
    /// Maps a unit grid step onto the direction it appears to travel on screen.
    ///
    /// The isometric projection rotates the grid axes by 45 degrees, so a step
    /// of `(-1, -1)` travels straight up the screen. Returns `None` for any delta
    /// that is not a single 8-neighbour step.
    #[must_use]
    pub const fn from_grid_step(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (-1, -1) => Some(Self::North),
            (-1, 0) => Some(Self::NorthWest),
            (-1, 1) => Some(Self::West),
            (0, -1) => Some(Self::NorthEast),
            (0, 1) => Some(Self::SouthWest),
            (1, -1) => Some(Self::East),
            (1, 0) => Some(Self::SouthEast),
            (1, 1) => Some(Self::South),
            _ => None,
        }
    }

    /// Sprite key fragment used by asset manifests.
    #[must_use]
    pub const fn sprite_key(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "north-east",
            Self::East => "east",
            Self::SouthEast => "south-east",
            Self::South => "south",
            Self::SouthWest => "south-west",
            Self::West => "west",
            Self::NorthWest => "north-west",
        }
    }
}

/// Emote an avatar may perform while standing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentAction {
    /// No emote.
    #[default]
    Idle,
    /// Seated pose.
    Sitting,
    /// Dance loop.
    Dancing,
    /// Waving hand.
    Waving,
}

/// Reasons a furniture placement request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// No room is currently selected.
    NoRoom,
    /// The requested footprint extends beyond the room bounds.
    OutOfBounds,
    /// A footprint cell is a hole in the floor.
    MissingFloor,
    /// The requested footprint overlaps another furniture item.
    Occupied,
    /// An avatar stands inside the requested footprint.
    OccupiedByAgent,
}

/// Predicate deciding whether an avatar may stand on a cell.
///
/// The pathfinder is parameterized by this seam so that callers decide what
/// walkable means; `exclude` names the avatar whose own position should not
/// count as an obstacle.
pub trait CellValidity {
    /// Reports whether the cell is walkable for avatars other than `exclude`.
    fn is_valid(&self, cell: Cell, exclude: Option<AgentId>) -> bool;
}

impl<F> CellValidity for F
where
    F: Fn(Cell, Option<AgentId>) -> bool,
{
    fn is_valid(&self, cell: Cell, exclude: Option<AgentId>) -> bool {
        self(cell, exclude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn manhattan_distance_matches_expectation() {
        let origin = Cell::new(1, 1);
        let destination = Cell::new(4, -1);
        assert_eq!(origin.manhattan_distance(destination), 5);
        assert_eq!(destination.manhattan_distance(origin), 5);
    }

    #[test]
    fn world_positions_round_to_nearest_cell_with_ties_up() {
        assert_eq!(Cell::from_world(2.4, 3.6), Cell::new(2, 4));
        assert_eq!(Cell::from_world(0.5, -0.5), Cell::new(1, 0));
        assert_eq!(Cell::from_world(-1.2, -0.8), Cell::new(-1, -1));
    }

    #[test]
    fn adjacency_covers_all_eight_neighbours() {
        let origin = Cell::new(3, 3);
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if origin.is_adjacent_to(origin.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        assert_eq!(count, 8);
        assert!(!origin.is_adjacent_to(Cell::new(5, 3)));
    }

    #[test]
    fn rect_overlap_is_axis_aligned() {
        let sofa = CellRect::from_origin_and_size(Cell::new(2, 2), CellRectSize::new(2, 1));
        let touching = CellRect::from_origin_and_size(Cell::new(4, 2), CellRectSize::new(1, 1));
        let crossing = CellRect::from_origin_and_size(Cell::new(3, 1), CellRectSize::new(1, 2));

        assert!(!sofa.overlaps(&touching));
        assert!(sofa.overlaps(&crossing));
        assert!(crossing.overlaps(&sofa));
    }

    #[test]
    fn rect_cells_follow_row_major_order() {
        let rect = CellRect::from_origin_and_size(Cell::new(1, 1), CellRectSize::new(2, 2));
        let cells: Vec<_> = rect.cells().collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(1, 1),
                Cell::new(2, 1),
                Cell::new(1, 2),
                Cell::new(2, 2)
            ]
        );
        assert!(rect.is_within(3, 3));
        assert!(!rect.is_within(2, 3));
    }

    #[test]
    fn doorway_inner_cell_points_into_the_room() {
        let north_east = Doorway::new(Cell::new(4, -1), WallEdge::NorthEast);
        let north_west = Doorway::new(Cell::new(-1, 2), WallEdge::NorthWest);
        assert_eq!(north_east.inner_cell(), Cell::new(4, 0));
        assert_eq!(north_west.inner_cell(), Cell::new(0, 2));
    }

    #[test]
    fn facing_maps_diagonal_grid_steps_to_vertical_screen_motion() {
        assert_eq!(Facing::from_grid_step(-1, -1), Some(Facing::North));
        assert_eq!(Facing::from_grid_step(1, 1), Some(Facing::South));
        assert_eq!(Facing::from_grid_step(1, -1), Some(Facing::East));
        assert_eq!(Facing::from_grid_step(-1, 1), Some(Facing::West));
        assert_eq!(Facing::from_grid_step(-1, 0), Some(Facing::NorthWest));
        assert_eq!(Facing::from_grid_step(0, -1), Some(Facing::NorthEast));
        assert_eq!(Facing::from_grid_step(1, 0), Some(Facing::SouthEast));
        assert_eq!(Facing::from_grid_step(0, 1), Some(Facing::SouthWest));
        assert_eq!(Facing::default(), Facing::South);
        assert_eq!(Facing::from_grid_step(0, 0), None);
        assert_eq!(Facing::from_grid_step(2, 0), None);
    }

    #[test]
    fn sofa_footprint_is_two_by_one() {
        let footprint = FurnitureKind::ClubSofa.footprint();
        assert_eq!(footprint.width(), 2);
        assert_eq!(footprint.height(), 1);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn furniture_round_trips_through_bincode() {
        let furniture = Furniture::new(FurnitureId::new(7), FurnitureKind::Rug, Cell::new(3, 4));
        assert_round_trip(&furniture);
    }

    #[test]
    fn wall_edge_uses_kebab_case_in_json() {
        let json = serde_json::to_string(&WallEdge::NorthEast).expect("serialize");
        assert_eq!(json, "\"north-east\"");
    }
}
