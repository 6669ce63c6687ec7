#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the initial lobby.

use isoroom_core::{Command, Event};
use isoroom_world::{query, World};

/// Name of the room created on start-up.
pub const LOBBY_NAME: &str = "Main Room";

/// Dimensions of the room created on start-up.
pub const LOBBY_SIZE: (u32, u32) = (20, 15);

/// Number of avatars placed in the lobby.
pub const LOBBY_AGENTS: i32 = 4;

/// Seeds the world with a lobby room and its first avatars.
#[derive(Debug, Default)]
pub struct Bootstrap {
    seeded: bool,
}

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Requests creation of the lobby room.
    pub fn start(&self, out: &mut Vec<Command>) {
        let (width, height) = LOBBY_SIZE;
        out.push(Command::CreateRoom {
            name: LOBBY_NAME.to_owned(),
            width,
            height,
        });
    }

    /// Populates the first created room with avatars lined up from its spawn point.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        if self.seeded {
            return;
        }

        for event in events {
            let Event::RoomCreated {
                spawn_point: Some(spawn),
                ..
            } = event
            else {
                continue;
            };

            self.seeded = true;
            for index in 0..LOBBY_AGENTS {
                out.push(Command::SpawnAgent {
                    name: format!("Player{}", index + 1),
                    cell: spawn.offset(index, index),
                });
            }
            return;
        }
    }
}
