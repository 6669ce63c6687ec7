#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure editor system that turns pointer input into room and avatar commands.

use isoroom_core::{AgentId, Cell, CellRect, CellValidity, Command, Event, FurnitureKind};
use isoroom_system_pathfinding::Pathfinder;

/// Interaction mode selected in the editor toolbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorTool {
    /// Clicking a cell walks the controlled avatar there.
    #[default]
    Move,
    /// Clicking a cell places the selected furniture item.
    Furniture,
    /// Clicking a cell flips its floor tile.
    Room,
}

/// Declarative placement preview describing a potential furniture placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementPreview {
    /// Kind of furniture proposed for placement.
    pub kind: FurnitureKind,
    /// Origin cell anchoring the proposed footprint.
    pub origin: Cell,
    /// Region of cells that would be occupied if placed.
    pub region: CellRect,
    /// Indicates whether the preview represents a valid placement location.
    pub placeable: bool,
}

impl PlacementPreview {
    /// Creates a new placement preview descriptor.
    #[must_use]
    pub const fn new(kind: FurnitureKind, origin: Cell, region: CellRect, placeable: bool) -> Self {
        Self {
            kind,
            origin,
            region,
            placeable,
        }
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EditorInput {
    /// Indicates whether the pointer was clicked on this frame.
    pub confirm_action: bool,
    /// Cell currently hovered by the cursor.
    pub cursor_cell: Option<Cell>,
}

impl EditorInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(confirm_action: bool, cursor_cell: Option<Cell>) -> Self {
        Self {
            confirm_action,
            cursor_cell,
        }
    }
}

/// Editor system that translates tool state and input into world commands.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    tool: EditorTool,
    selected_furniture: Option<FurnitureKind>,
    controlled_agent: Option<AgentId>,
}

impl Editor {
    /// Creates a new editor with the move tool active.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tool: EditorTool::Move,
            selected_furniture: None,
            controlled_agent: None,
        }
    }

    /// Active tool.
    #[must_use]
    pub const fn tool(&self) -> EditorTool {
        self.tool
    }

    /// Switches tools. Leaving the furniture tool drops the selection.
    pub fn set_tool(&mut self, tool: EditorTool) {
        if tool != EditorTool::Furniture {
            self.selected_furniture = None;
        }
        self.tool = tool;
    }

    /// Picks a catalog entry and activates the furniture tool.
    pub fn select_furniture(&mut self, kind: FurnitureKind) {
        self.tool = EditorTool::Furniture;
        self.selected_furniture = Some(kind);
    }

    /// Catalog entry awaiting placement.
    #[must_use]
    pub const fn selected_furniture(&self) -> Option<FurnitureKind> {
        self.selected_furniture
    }

    /// Avatar driven by the move tool.
    #[must_use]
    pub const fn controlled_agent(&self) -> Option<AgentId> {
        self.controlled_agent
    }

    /// Hands control to a specific avatar.
    pub fn control(&mut self, agent: AgentId) {
        self.controlled_agent = Some(agent);
    }

    /// Builds the hover preview for the selected furniture item.
    ///
    /// `is_placeable` should mirror the world's placement validator.
    pub fn furniture_preview<F>(
        &self,
        cursor_cell: Option<Cell>,
        is_placeable: F,
    ) -> Option<PlacementPreview>
    where
        F: FnOnce(CellRect) -> bool,
    {
        if self.tool != EditorTool::Furniture {
            return None;
        }
        let kind = self.selected_furniture?;
        let origin = cursor_cell?;
        let region = CellRect::from_origin_and_size(origin, kind.footprint());
        Some(PlacementPreview::new(kind, origin, region, is_placeable(region)))
    }

    /// Path the controlled avatar would walk to reach the hovered cell.
    pub fn preview_path<V>(
        &self,
        cursor_cell: Option<Cell>,
        agent_cell: Option<Cell>,
        validity: V,
    ) -> Vec<Cell>
    where
        V: CellValidity,
    {
        if self.tool != EditorTool::Move {
            return Vec::new();
        }
        match (cursor_cell, agent_cell) {
            (Some(goal), Some(start)) => {
                Pathfinder::new(validity).find_path(start, goal, self.controlled_agent)
            }
            _ => Vec::new(),
        }
    }

    /// Consumes world events and adapter-derived input to emit editor commands.
    ///
    /// `agent_cell` is the rounded cell of the controlled avatar and `validity`
    /// should mirror the world's placement validator.
    pub fn handle<V>(
        &mut self,
        events: &[Event],
        input: EditorInput,
        agent_cell: Option<Cell>,
        validity: V,
        preview: Option<PlacementPreview>,
        out: &mut Vec<Command>,
    ) where
        V: CellValidity,
    {
        for event in events {
            if let Event::AgentSpawned { agent, .. } = event {
                if self.controlled_agent.is_none() {
                    self.controlled_agent = Some(*agent);
                }
            }
        }

        if !input.confirm_action {
            return;
        }

        match self.tool {
            EditorTool::Move => {
                let Some(agent) = self.controlled_agent else {
                    return;
                };
                let path = self.preview_path(input.cursor_cell, agent_cell, validity);
                if let Some(&target) = path.last() {
                    out.push(Command::AssignPath {
                        agent,
                        target,
                        path,
                    });
                }
            }
            EditorTool::Furniture => {
                let Some(preview) = preview else {
                    return;
                };
                if preview.placeable && Some(preview.kind) == self.selected_furniture {
                    out.push(Command::PlaceFurniture {
                        kind: preview.kind,
                        origin: preview.origin,
                    });
                    self.selected_furniture = None;
                }
            }
            EditorTool::Room => {
                if let Some(cell) = input.cursor_cell {
                    out.push(Command::ToggleFloorTile { cell });
                }
            }
        }
    }
}
