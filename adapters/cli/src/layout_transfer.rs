#![allow(clippy::missing_errors_doc)]

use isoroom_core::{Cell, Command, Doorway, RoomId, WallEdge};
use isoroom_world::{Room, RoomLayout};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format version written into every exported document.
pub(crate) const LAYOUT_VERSION: u32 = 1;

const FLOOR: char = 'o';
const EMPTY: char = 'x';
const DOORWAY: char = 'd';
const SPAWN: char = 's';

/// Human-editable description of a room's floor plan.
///
/// `rows` holds one string per `y` in `-1..height`, each with one code per `x`
/// in `-1..width`. The leading row and column are reserved for the doorway.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LayoutDocument {
    /// Format version of the document.
    pub(crate) version: u32,
    /// Display name of the room.
    pub(crate) name: String,
    /// Number of columns in the room.
    pub(crate) width: u32,
    /// Number of rows in the room.
    pub(crate) height: u32,
    /// Wall the doorway is cut into, required when a `d` code is present.
    pub(crate) doorway_edge: Option<WallEdge>,
    /// Tile codes, back row first.
    pub(crate) rows: Vec<String>,
}

impl LayoutDocument {
    /// Captures the floor plan of a room.
    #[must_use]
    pub(crate) fn capture(room: &Room) -> Self {
        let layout = room.layout();
        let (width, height) = (layout.width() as i32, layout.height() as i32);
        let rows = (-1..height)
            .map(|y| {
                (-1..width)
                    .map(|x| code_for(layout, Cell::new(x, y)))
                    .collect()
            })
            .collect();

        Self {
            version: LAYOUT_VERSION,
            name: room.name().to_owned(),
            width: layout.width(),
            height: layout.height(),
            doorway_edge: layout.doorway().map(|doorway| doorway.edge),
            rows,
        }
    }

    /// Serialises the document as pretty-printed JSON.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        serde_json::to_string_pretty(self).map_err(LayoutTransferError::InvalidPayload)
    }

    /// Parses a document from JSON without validating its contents.
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(LayoutTransferError::EmptyPayload);
        }
        serde_json::from_str(trimmed).map_err(LayoutTransferError::InvalidPayload)
    }

    /// Validates the document and converts it into an import command for `room`.
    pub(crate) fn to_command(&self, room: RoomId) -> Result<Command, LayoutTransferError> {
        if self.version != LAYOUT_VERSION {
            return Err(LayoutTransferError::UnsupportedVersion(self.version));
        }
        if self.width == 0 || self.height == 0 {
            return Err(LayoutTransferError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let expected_rows = self.height as usize + 1;
        if self.rows.len() != expected_rows {
            return Err(LayoutTransferError::RowCount {
                expected: expected_rows,
                found: self.rows.len(),
            });
        }

        let expected_columns = self.width as usize + 1;
        let mut floor = Vec::new();
        let mut doorway_cell = None;
        let mut spawn_point = None;

        for (y, row) in (-1..).zip(&self.rows) {
            let found = row.chars().count();
            if found != expected_columns {
                return Err(LayoutTransferError::RowLength {
                    y,
                    expected: expected_columns,
                    found,
                });
            }

            for (x, code) in (-1..).zip(row.chars()) {
                let cell = Cell::new(x, y);
                let inside = x >= 0 && y >= 0;
                match code {
                    EMPTY => {}
                    FLOOR | SPAWN if !inside => {
                        return Err(LayoutTransferError::FloorOutsideRoom { x, y });
                    }
                    FLOOR => floor.push(cell),
                    SPAWN => {
                        if spawn_point.replace(cell).is_some() {
                            return Err(LayoutTransferError::DuplicateSpawn);
                        }
                        floor.push(cell);
                    }
                    DOORWAY => {
                        if doorway_cell.replace(cell).is_some() {
                            return Err(LayoutTransferError::DuplicateDoorway);
                        }
                    }
                    other => {
                        return Err(LayoutTransferError::UnknownCode { x, y, code: other });
                    }
                }
            }
        }

        let doorway = match (doorway_cell, self.doorway_edge) {
            (None, None) => None,
            (Some(_), None) => return Err(LayoutTransferError::MissingDoorwayEdge),
            (None, Some(_)) => return Err(LayoutTransferError::DoorwayEdgeWithoutDoorway),
            (Some(cell), Some(edge)) => {
                let doorway = Doorway::new(cell, edge);
                if !doorway.inner_cell().is_within(self.width, self.height) {
                    return Err(LayoutTransferError::MisplacedDoorway {
                        x: cell.x(),
                        y: cell.y(),
                        edge,
                    });
                }
                Some(doorway)
            }
        };

        Ok(Command::ImportLayout {
            room,
            width: self.width,
            height: self.height,
            floor,
            doorway,
            spawn_point,
        })
    }
}

fn code_for(layout: &RoomLayout, cell: Cell) -> char {
    if layout.doorway().is_some_and(|doorway| doorway.cell == cell) {
        DOORWAY
    } else if layout.spawn_point() == Some(cell) {
        SPAWN
    } else if layout.is_floor(cell) {
        FLOOR
    } else {
        EMPTY
    }
}

/// Errors that can occur while decoding layout documents.
#[derive(Debug, Error)]
pub(crate) enum LayoutTransferError {
    /// The provided text was empty or contained only whitespace.
    #[error("layout document was empty")]
    EmptyPayload,
    /// The JSON could not be (de)serialised.
    #[error("could not parse layout document: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The document uses an unsupported version.
    #[error("layout version {0} is not supported")]
    UnsupportedVersion(u32),
    /// Rooms need at least one row and column.
    #[error("layout dimensions {width}x{height} are invalid")]
    InvalidDimensions {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
    /// The number of rows does not match `height + 1`.
    #[error("expected {expected} rows but found {found}")]
    RowCount {
        /// Rows required by the declared height.
        expected: usize,
        /// Rows present in the document.
        found: usize,
    },
    /// A row does not match `width + 1` codes.
    #[error("row {y} should hold {expected} codes but holds {found}")]
    RowLength {
        /// Grid row of the offending string.
        y: i32,
        /// Codes required by the declared width.
        expected: usize,
        /// Codes present in the row.
        found: usize,
    },
    /// A character outside the code alphabet was found.
    #[error("unknown tile code '{code}' at ({x}, {y})")]
    UnknownCode {
        /// Column of the code.
        x: i32,
        /// Row of the code.
        y: i32,
        /// Offending character.
        code: char,
    },
    /// Floor or spawn codes were found in the doorway border.
    #[error("floor at ({x}, {y}) lies outside the room")]
    FloorOutsideRoom {
        /// Column of the code.
        x: i32,
        /// Row of the code.
        y: i32,
    },
    /// More than one `d` code was present.
    #[error("layout declares more than one doorway")]
    DuplicateDoorway,
    /// More than one `s` code was present.
    #[error("layout declares more than one spawn point")]
    DuplicateSpawn,
    /// A doorway code was present without `doorway_edge`.
    #[error("doorway is missing its wall edge")]
    MissingDoorwayEdge,
    /// `doorway_edge` was set but no doorway code was present.
    #[error("doorway edge given without a doorway tile")]
    DoorwayEdgeWithoutDoorway,
    /// The doorway would not open onto a cell of the room.
    #[error("doorway at ({x}, {y}) on the {edge:?} wall does not open into the room")]
    MisplacedDoorway {
        /// Column of the doorway.
        x: i32,
        /// Row of the doorway.
        y: i32,
        /// Declared wall edge.
        edge: WallEdge,
    },
}
