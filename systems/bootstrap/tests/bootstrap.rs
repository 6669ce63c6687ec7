use isoroom_core::{Cell, Command, Event, WELCOME_BANNER};
use isoroom_system_bootstrap::Bootstrap;
use isoroom_world::{self as world, query, World};

fn run(world: &mut World, commands: Vec<Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn start_creates_the_lobby_and_seeds_four_agents() {
    let mut world = World::default();
    let mut bootstrap = Bootstrap::default();
    let mut commands = Vec::new();

    bootstrap.start(&mut commands);
    let events = run(&mut world, commands);

    let mut commands = Vec::new();
    bootstrap.handle(&events, &mut commands);
    let events = run(&mut world, commands);

    let spawned: Vec<Cell> = events
        .iter()
        .filter_map(|event| match event {
            Event::AgentSpawned { cell, .. } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawned,
        vec![
            Cell::new(10, 0),
            Cell::new(11, 1),
            Cell::new(12, 2),
            Cell::new(13, 3)
        ],
        "agents should line up diagonally from the spawn point"
    );

    let room = query::current_room(&world).expect("lobby is current");
    assert_eq!(room.name(), "Main Room");
    assert_eq!((room.layout().width(), room.layout().height()), (20, 15));
    assert_eq!(bootstrap.welcome_banner(&world), WELCOME_BANNER);
}

#[test]
fn later_rooms_are_not_seeded() {
    let mut bootstrap = Bootstrap::default();
    let created = Event::RoomCreated {
        room: isoroom_core::RoomId::new(0),
        spawn_point: Some(Cell::new(2, 0)),
    };
    let mut commands = Vec::new();

    bootstrap.handle(std::slice::from_ref(&created), &mut commands);
    assert_eq!(commands.len(), 4);

    commands.clear();
    bootstrap.handle(&[created], &mut commands);
    assert!(commands.is_empty(), "only the first room receives avatars");
}
