//! Draw instructions captured from a world snapshot.

use glam::DVec2;
use isoroom_core::{
    AgentAction, AgentId, Cell, CellRect, Doorway, Facing, FurnitureId, FurnitureKind, WallSegment,
};
use isoroom_world::{query, World};

use crate::projection::IsoProjection;

/// Frames in a single walk cycle when the overlay does not specify one.
pub const DEFAULT_WALK_FRAMES: u32 = 4;

/// Adapter-side state layered on top of the world when drawing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneOverlay {
    /// Cell under the pointer and whether the active tool may act on it.
    pub hover: Option<HoverMarker>,
    /// Furniture ghost following the pointer.
    pub furniture_preview: Option<FurniturePreview>,
    /// Path the controlled avatar would walk to the hovered cell.
    pub path_preview: Vec<Cell>,
    /// Avatar drawn with a highlight ring.
    pub highlighted_agent: Option<AgentId>,
    /// Frames in the walk cycle of avatar sprites.
    pub walk_frames: u32,
}

impl Default for SceneOverlay {
    fn default() -> Self {
        Self {
            hover: None,
            furniture_preview: None,
            path_preview: Vec::new(),
            highlighted_agent: None,
            walk_frames: DEFAULT_WALK_FRAMES,
        }
    }
}

/// Pointer marker drawn on the hovered cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverMarker {
    /// Hovered cell.
    pub cell: Cell,
    /// Whether the active tool accepts the cell.
    pub valid: bool,
}

/// Translucent furniture drawn where it would be placed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FurniturePreview {
    /// Catalog entry being previewed.
    pub kind: FurnitureKind,
    /// Cells the item would cover.
    pub region: CellRect,
    /// Whether placement would succeed.
    pub placeable: bool,
}

/// Floor tile diamond centred on `anchor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloorSprite {
    /// Cell the tile covers.
    pub cell: Cell,
    /// Screen position of the tile centre.
    pub anchor: DVec2,
    /// Whether the tile carries the spawn marker.
    pub spawn: bool,
}

/// Wall panel standing on the non-floor side of a boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSprite {
    /// Segment being drawn.
    pub segment: WallSegment,
    /// Screen position of the segment's cell centre.
    pub anchor: DVec2,
}

/// Opening drawn in place of a wall panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorwaySprite {
    /// Doorway being drawn.
    pub doorway: Doorway,
    /// Screen position of the doorway cell centre.
    pub anchor: DVec2,
}

/// Furniture item anchored at the centre of its footprint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FurnitureSprite {
    /// Identifier of the placed item, absent for previews.
    pub id: Option<FurnitureId>,
    /// Catalog entry being drawn.
    pub kind: FurnitureKind,
    /// Cells covered by the item.
    pub region: CellRect,
    /// Screen position of the footprint centre.
    pub anchor: DVec2,
    /// Whether the sprite should be tinted as blocked.
    pub blocked: bool,
}

/// Avatar sprite with animation state.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentSprite {
    /// Avatar being drawn.
    pub id: AgentId,
    /// Label drawn above the avatar.
    pub name: String,
    /// Screen position of the avatar's feet.
    pub anchor: DVec2,
    /// Sprite direction.
    pub facing: Facing,
    /// Emote being performed.
    pub action: AgentAction,
    /// Walk cycle frame, zero while standing.
    pub walk_frame: u32,
    /// Whether the avatar is the controlled one.
    pub highlighted: bool,
    /// Screen position of the walk destination, if walking.
    pub target_anchor: Option<DVec2>,
}

/// Complete set of draw instructions for one frame, in painter's order.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Projection the anchors were computed with.
    pub projection: IsoProjection,
    /// Floor tiles.
    pub floor: Vec<FloorSprite>,
    /// Wall panels.
    pub walls: Vec<WallSprite>,
    /// Doorway opening.
    pub doorway: Option<DoorwaySprite>,
    /// Placed furniture, back to front.
    pub furniture: Vec<FurnitureSprite>,
    /// Furniture ghost following the pointer.
    pub furniture_preview: Option<FurnitureSprite>,
    /// Hover marker and its screen anchor.
    pub hover: Option<(HoverMarker, DVec2)>,
    /// Screen positions of the previewed path, in walking order.
    pub path_preview: Vec<DVec2>,
    /// Avatars, back to front.
    pub agents: Vec<AgentSprite>,
}

impl Scene {
    /// Scene without a room.
    #[must_use]
    pub fn empty(projection: IsoProjection) -> Self {
        Self {
            projection,
            floor: Vec::new(),
            walls: Vec::new(),
            doorway: None,
            furniture: Vec::new(),
            furniture_preview: None,
            hover: None,
            path_preview: Vec::new(),
            agents: Vec::new(),
        }
    }

    /// Captures draw instructions for the current room.
    ///
    /// The projection is re-centred on the current room before any anchor is
    /// computed.
    #[must_use]
    pub fn capture(world: &World, projection: IsoProjection, overlay: &SceneOverlay) -> Self {
        let Some(room) = query::current_room(world) else {
            return Self::empty(projection);
        };
        let layout = room.layout();
        let projection = projection.with_room_size(layout.width(), layout.height());
        let spawn = layout.spawn_point();

        let floor = layout
            .floor()
            .iter()
            .map(|&cell| FloorSprite {
                cell,
                anchor: projection.cell_to_screen(cell),
                spawn: spawn == Some(cell),
            })
            .collect();

        let walls = layout
            .walls()
            .iter()
            .map(|&segment| WallSprite {
                segment,
                anchor: projection.cell_to_screen(segment.cell),
            })
            .collect();

        let doorway = layout.doorway().map(|doorway| DoorwaySprite {
            doorway,
            anchor: projection.cell_to_screen(doorway.cell),
        });

        let mut furniture: Vec<FurnitureSprite> = layout
            .furniture()
            .iter()
            .map(|item| FurnitureSprite {
                id: Some(item.id),
                kind: item.kind,
                region: item.region(),
                anchor: region_anchor(&projection, item.region()),
                blocked: false,
            })
            .collect();
        furniture.sort_by(|a, b| a.anchor.y.total_cmp(&b.anchor.y));

        let furniture_preview = overlay.furniture_preview.map(|preview| FurnitureSprite {
            id: None,
            kind: preview.kind,
            region: preview.region,
            anchor: region_anchor(&projection, preview.region),
            blocked: !preview.placeable,
        });

        let hover = overlay
            .hover
            .map(|marker| (marker, projection.cell_to_screen(marker.cell)));

        let path_preview = overlay
            .path_preview
            .iter()
            .map(|&cell| projection.cell_to_screen(cell))
            .collect();

        let mut agents: Vec<AgentSprite> = query::agent_view(world)
            .into_iter()
            .map(|agent| AgentSprite {
                anchor: projection.world_to_screen(agent.position.as_dvec2()),
                facing: agent.motion.facing(),
                action: agent.motion.action(),
                walk_frame: agent.motion.walk_frame(overlay.walk_frames),
                highlighted: overlay.highlighted_agent == Some(agent.id),
                target_anchor: agent
                    .motion
                    .target()
                    .map(|target| projection.cell_to_screen(target)),
                id: agent.id,
                name: agent.name,
            })
            .collect();
        agents.sort_by(|a, b| a.anchor.y.total_cmp(&b.anchor.y));

        Self {
            projection,
            floor,
            walls,
            doorway,
            furniture,
            furniture_preview,
            hover,
            path_preview,
            agents,
        }
    }
}

fn region_anchor(projection: &IsoProjection, region: CellRect) -> DVec2 {
    let origin = region.origin();
    let size = region.size();
    let centre = DVec2::new(
        f64::from(origin.x()) + (f64::from(size.width()) - 1.0) * 0.5,
        f64::from(origin.y()) + (f64::from(size.height()) - 1.0) * 0.5,
    );
    projection.world_to_screen(centre)
}
