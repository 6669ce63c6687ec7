#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the isometric room engine.

mod config;
mod layout;
mod placement;

use std::time::Duration;

use glam::Vec2;
use isoroom_core::{
    AgentAction, AgentId, Cell, Command, Event, Furniture, FurnitureId, PlacementError, RoomId,
    WELCOME_BANNER,
};
use isoroom_system_motion::AgentMotion;
use tracing::{debug, info};

pub use config::WorldConfig;
pub use layout::RoomLayout;
pub use placement::{check_footprint, PlacementValidator};

/// Named room owned by the world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    name: String,
    layout: RoomLayout,
}

impl Room {
    /// Identifier allocated by the world.
    #[must_use]
    pub const fn id(&self) -> RoomId {
        self.id
    }

    /// Display name of the room.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Geometry and furnishing of the room.
    #[must_use]
    pub const fn layout(&self) -> &RoomLayout {
        &self.layout
    }
}

/// Represents the authoritative room editor world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: WorldConfig,
    rooms: Vec<Room>,
    current_room: Option<RoomId>,
    agents: Vec<Agent>,
    next_room_id: RoomId,
    next_furniture_id: FurnitureId,
    next_agent_id: AgentId,
    tick_index: u64,
}

impl World {
    /// Creates an empty world governed by the provided configuration.
    #[must_use]
    pub fn new(config: WorldConfig) -> Self {
        Self {
            banner: WELCOME_BANNER,
            config,
            rooms: Vec::new(),
            current_room: None,
            agents: Vec::new(),
            next_room_id: RoomId::new(0),
            next_furniture_id: FurnitureId::new(0),
            next_agent_id: AgentId::new(0),
            tick_index: 0,
        }
    }

    fn room_mut(&mut self, room: RoomId) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|candidate| candidate.id == room)
    }

    fn current_room_mut(&mut self) -> Option<&mut Room> {
        let current = self.current_room?;
        self.room_mut(current)
    }

    fn agent_mut(&mut self, agent: AgentId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|candidate| candidate.id == agent)
    }

    fn agent_cells(&self) -> Vec<Cell> {
        self.agents.iter().map(Agent::cell).collect()
    }

    fn allocate_room_id(&mut self) -> RoomId {
        let id = self.next_room_id;
        self.next_room_id = RoomId::new(id.get().saturating_add(1));
        id
    }

    fn allocate_furniture_id(&mut self) -> FurnitureId {
        let id = self.next_furniture_id;
        self.next_furniture_id = FurnitureId::new(id.get().saturating_add(1));
        id
    }

    fn allocate_agent_id(&mut self) -> AgentId {
        let id = self.next_agent_id;
        self.next_agent_id = AgentId::new(id.get().saturating_add(1));
        id
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(WorldConfig::default())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands that cannot be honoured leave the world untouched and emit no events.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::CreateRoom {
            name,
            width,
            height,
        } => {
            let id = world.allocate_room_id();
            let layout = RoomLayout::new(&world.config, width, height);
            let spawn_point = layout.spawn_point();
            info!(
                room = id.get(),
                width = layout.width(),
                height = layout.height(),
                "room created"
            );
            world.rooms.push(Room { id, name, layout });
            out_events.push(Event::RoomCreated {
                room: id,
                spawn_point,
            });

            if world.current_room.is_none() {
                world.current_room = Some(id);
                out_events.push(Event::RoomSelected { room: Some(id) });
            }
        }
        Command::SelectRoom { room } => {
            if world.current_room == Some(room) {
                return;
            }
            if world.rooms.iter().all(|candidate| candidate.id != room) {
                debug!(room = room.get(), "ignoring selection of unknown room");
                return;
            }
            world.current_room = Some(room);
            out_events.push(Event::RoomSelected { room: Some(room) });
        }
        Command::RenameRoom { room, name } => {
            let name = name.trim();
            if name.is_empty() {
                debug!(room = room.get(), "ignoring empty room name");
                return;
            }
            let Some(target) = world.room_mut(room) else {
                debug!(room = room.get(), "ignoring rename of unknown room");
                return;
            };
            target.name = name.to_owned();
            out_events.push(Event::RoomRenamed { room });
        }
        Command::DeleteRoom { room } => {
            let Some(index) = world.rooms.iter().position(|candidate| candidate.id == room) else {
                debug!(room = room.get(), "ignoring deletion of unknown room");
                return;
            };
            let _ = world.rooms.remove(index);
            info!(room = room.get(), "room deleted");
            out_events.push(Event::RoomDeleted { room });

            if world.current_room == Some(room) {
                world.current_room = world.rooms.first().map(Room::id);
                out_events.push(Event::RoomSelected {
                    room: world.current_room,
                });
            }
        }
        Command::UpdateLayout {
            room,
            width,
            height,
            doorway,
            spawn_point,
        } => {
            let config = world.config;
            let Some(target) = world.room_mut(room) else {
                debug!(room = room.get(), "ignoring layout update of unknown room");
                return;
            };
            target
                .layout
                .update_layout(&config, width, height, doorway, spawn_point);
            out_events.push(Event::LayoutChanged { room });
        }
        Command::ImportLayout {
            room,
            width,
            height,
            floor,
            doorway,
            spawn_point,
        } => {
            let config = world.config;
            let Some(target) = world.room_mut(room) else {
                debug!(room = room.get(), "ignoring import into unknown room");
                return;
            };
            target
                .layout
                .import(&config, width, height, floor, doorway, spawn_point);
            out_events.push(Event::LayoutChanged { room });
        }
        Command::ToggleFloorTile { cell } => {
            let agent_cells = world.agent_cells();
            let Some(room) = world.current_room_mut() else {
                debug!("ignoring floor toggle without a current room");
                return;
            };
            match room.layout.toggle_floor_tile(cell, &agent_cells) {
                Some(present) => out_events.push(Event::FloorTileToggled { cell, present }),
                None => debug!(x = cell.x(), y = cell.y(), "floor tile is locked"),
            }
        }
        Command::FillFloor => {
            let Some(room) = world.current_room_mut() else {
                debug!("ignoring floor fill without a current room");
                return;
            };
            room.layout.fill_floor();
            let id = room.id;
            out_events.push(Event::LayoutChanged { room: id });
        }
        Command::ClearFloor => {
            let agent_cells = world.agent_cells();
            let Some(room) = world.current_room_mut() else {
                debug!("ignoring floor clear without a current room");
                return;
            };
            room.layout.clear_floor(&agent_cells);
            let id = room.id;
            out_events.push(Event::LayoutChanged { room: id });
        }
        Command::PlaceFurniture { kind, origin } => {
            let verdict = match query::placement_validator(world) {
                Some(validator) => validator.check_furniture_position(origin, kind.footprint()),
                None => Err(PlacementError::NoRoom),
            };
            if let Err(error) = verdict {
                debug!(?error, ?kind, x = origin.x(), y = origin.y(), "furniture rejected");
                return;
            }

            let id = world.allocate_furniture_id();
            let furniture = Furniture::new(id, kind, origin);
            if let Some(room) = world.current_room_mut() {
                room.layout.push_furniture(furniture);
                out_events.push(Event::FurniturePlaced {
                    furniture: id,
                    kind,
                    region: furniture.region(),
                });
            }
        }
        Command::SpawnAgent { name, cell } => {
            let walkable = query::placement_validator(world)
                .is_some_and(|validator| validator.is_valid_agent_position(cell, None));
            if !walkable {
                debug!(x = cell.x(), y = cell.y(), "ignoring spawn on blocked cell");
                return;
            }

            let id = world.allocate_agent_id();
            let motion = AgentMotion::new(world.config.move_delay(), world.config.action_duration());
            world.agents.push(Agent {
                id,
                name,
                position: Vec2::new(cell.x() as f32, cell.y() as f32),
                motion,
            });
            out_events.push(Event::AgentSpawned { agent: id, cell });
        }
        Command::AssignPath {
            agent,
            target,
            path,
        } => {
            let Some(entry) = world.agent_mut(agent) else {
                debug!(agent = agent.get(), "ignoring path for unknown agent");
                return;
            };
            if !is_continuous(entry.cell(), target, &path) {
                debug!(agent = agent.get(), steps = path.len(), "ignoring discontinuous path");
                return;
            }

            let previous_action = entry.motion.action();
            let steps = path.len();
            let _ = entry.motion.assign(entry.position, target, path);
            out_events.push(Event::AgentPathAssigned {
                agent,
                target,
                steps,
            });
            if previous_action != entry.motion.action() {
                out_events.push(Event::AgentActionChanged {
                    agent,
                    action: entry.motion.action(),
                });
            }
        }
        Command::SetAgentAction { agent, action } => {
            let Some(entry) = world.agent_mut(agent) else {
                debug!(agent = agent.get(), "ignoring action for unknown agent");
                return;
            };
            if action != AgentAction::Idle && entry.motion.is_moving() {
                debug!(agent = agent.get(), ?action, "ignoring action while walking");
                return;
            }
            entry.motion.set_action(action);
            out_events.push(Event::AgentActionChanged { agent, action });
        }
        Command::Tick { dt } => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced { dt });
            advance_agents(world, dt, out_events);
        }
    }
}

fn advance_agents(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    for agent in &mut world.agents {
        let update = agent.motion.advance(dt, &mut agent.position);
        if let Some(cell) = update.arrived {
            out_events.push(Event::AgentArrived {
                agent: agent.id,
                cell,
            });
        }
        if update.action_expired {
            out_events.push(Event::AgentActionChanged {
                agent: agent.id,
                action: AgentAction::Idle,
            });
        }
    }
}

/// Non-empty, each step an 8-neighbour of the previous one, ending on `target`.
fn is_continuous(start: Cell, target: Cell, path: &[Cell]) -> bool {
    if path.last() != Some(&target) {
        return false;
    }
    let mut previous = start;
    for &step in path {
        if !previous.is_adjacent_to(step) {
            return false;
        }
        previous = step;
    }
    true
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use glam::Vec2;
    use isoroom_core::{AgentId, Cell};
    use isoroom_system_motion::AgentMotion;

    use super::{PlacementValidator, Room, World, WorldConfig};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Configuration the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &WorldConfig {
        &world.config
    }

    /// Number of ticks processed so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Every room in creation order.
    #[must_use]
    pub fn rooms(world: &World) -> &[Room] {
        &world.rooms
    }

    /// Looks up a room by identifier.
    #[must_use]
    pub fn room(world: &World, room: isoroom_core::RoomId) -> Option<&Room> {
        world.rooms.iter().find(|candidate| candidate.id() == room)
    }

    /// Room currently being edited, if any.
    #[must_use]
    pub fn current_room(world: &World) -> Option<&Room> {
        room(world, world.current_room?)
    }

    /// Rounded cell occupied by an avatar.
    #[must_use]
    pub fn agent_cell(world: &World, agent: AgentId) -> Option<Cell> {
        world
            .agents
            .iter()
            .find(|candidate| candidate.id == agent)
            .map(super::Agent::cell)
    }

    /// Captures snapshots of every avatar in spawn order.
    #[must_use]
    pub fn agent_view(world: &World) -> Vec<AgentSnapshot> {
        world
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                name: agent.name.clone(),
                position: agent.position,
                cell: agent.cell(),
                motion: agent.motion.clone(),
            })
            .collect()
    }

    /// Builds a validator over the current room and every avatar.
    #[must_use]
    pub fn placement_validator(world: &World) -> Option<PlacementValidator<'_>> {
        let room = current_room(world)?;
        let agents = world
            .agents
            .iter()
            .map(|agent| (agent.id, agent.cell()))
            .collect();
        Some(PlacementValidator::new(room.layout(), agents))
    }

    /// Immutable representation of a single avatar.
    #[derive(Clone, Debug, PartialEq)]
    pub struct AgentSnapshot {
        /// Unique identifier assigned to the avatar.
        pub id: AgentId,
        /// Display name of the avatar.
        pub name: String,
        /// Continuous position in grid space.
        pub position: Vec2,
        /// Rounded cell the avatar occupies.
        pub cell: Cell,
        /// Motion and emote state.
        pub motion: AgentMotion,
    }
}

#[derive(Clone, Debug)]
struct Agent {
    id: AgentId,
    name: String,
    position: Vec2,
    motion: AgentMotion,
}

impl Agent {
    fn cell(&self) -> Cell {
        Cell::from_world(self.position.x, self.position.y)
    }
}
