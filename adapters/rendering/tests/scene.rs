use std::time::Duration;

use glam::DVec2;
use isoroom_core::{AgentId, Cell, CellRect, Command, FurnitureKind};
use isoroom_rendering::{FurniturePreview, HoverMarker, IsoProjection, Scene, SceneOverlay};
use isoroom_world::{self as world, World};

fn projection() -> IsoProjection {
    IsoProjection::new(DVec2::new(64.0, 32.0), 1.0, DVec2::new(1280.0, 720.0))
        .expect("valid projection")
}

fn furnished_world() -> World {
    let mut world = World::default();
    let mut events = Vec::new();
    for command in [
        Command::CreateRoom {
            name: "Gallery".to_owned(),
            width: 6,
            height: 5,
        },
        Command::PlaceFurniture {
            kind: FurnitureKind::Table,
            origin: Cell::new(3, 2),
        },
        Command::PlaceFurniture {
            kind: FurnitureKind::Plant,
            origin: Cell::new(0, 0),
        },
        Command::SpawnAgent {
            name: "Player1".to_owned(),
            cell: Cell::new(1, 3),
        },
        Command::SpawnAgent {
            name: "Player2".to_owned(),
            cell: Cell::new(5, 4),
        },
    ] {
        world::apply(&mut world, command, &mut events);
    }
    world
}

#[test]
fn screen_round_trip_is_exact_for_any_room() {
    let rooms = [(4, 4), (20, 15), (50, 7), (13, 50)];
    let zooms = [0.5, 1.0, 1.75];
    for (width, height) in rooms {
        for zoom in zooms {
            let projection = IsoProjection::new(DVec2::new(64.0, 32.0), zoom, DVec2::new(1024.0, 768.0))
                .expect("valid projection")
                .with_room_size(width, height);
            for step in 0..40 {
                let world = DVec2::new(
                    f64::from(step) * 0.37 - 2.0,
                    f64::from(step % 7) * 1.9 - 1.0,
                );
                let restored = projection.screen_to_world(projection.world_to_screen(world));
                assert!(
                    (restored - world).length() < 1e-6,
                    "round trip drifted for {world:?} in {width}x{height} at zoom {zoom}"
                );
            }
        }
    }
}

#[test]
fn canvas_resize_keeps_the_room_centred() {
    let projection = projection()
        .with_room_size(8, 8)
        .with_canvas_size(DVec2::new(800.0, 600.0));
    let centre = projection.world_to_screen(DVec2::new(4.0, 4.0));
    assert!((centre - DVec2::new(400.0, 300.0)).length() < 1e-9);
    assert_eq!(projection.screen_to_cell(centre), Cell::new(4, 4));
}

#[test]
fn capture_without_room_is_empty() {
    let world = World::default();
    let scene = Scene::capture(&world, projection(), &SceneOverlay::default());
    assert!(scene.floor.is_empty());
    assert!(scene.agents.is_empty());
    assert!(scene.doorway.is_none());
}

#[test]
fn capture_describes_room_furniture_and_agents() {
    let world = furnished_world();
    let scene = Scene::capture(&world, projection(), &SceneOverlay::default());

    assert_eq!(scene.floor.len(), 30);
    assert_eq!(scene.floor.iter().filter(|tile| tile.spawn).count(), 1);
    assert_eq!(scene.walls.len(), 6 + 5 - 1);
    assert_eq!(
        scene.doorway.map(|sprite| sprite.doorway.cell),
        Some(Cell::new(3, -1))
    );

    let kinds: Vec<_> = scene.furniture.iter().map(|sprite| sprite.kind).collect();
    assert_eq!(
        kinds,
        vec![FurnitureKind::Plant, FurnitureKind::Table],
        "furniture is ordered back to front"
    );

    let names: Vec<_> = scene.agents.iter().map(|sprite| sprite.name.as_str()).collect();
    assert_eq!(names, vec!["Player1", "Player2"]);
    assert!(scene.agents.iter().all(|sprite| sprite.walk_frame == 0));
    assert_eq!(
        scene.agents[0].anchor,
        scene.projection.cell_to_screen(Cell::new(1, 3))
    );
}

#[test]
fn overlay_is_projected_into_the_scene() {
    let mut world = furnished_world();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::AssignPath {
            agent: AgentId::new(0),
            target: Cell::new(2, 4),
            path: vec![Cell::new(2, 4)],
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(200),
        },
        &mut events,
    );

    let preview_region = CellRect::from_origin_and_size(Cell::new(4, 0), FurnitureKind::ClubSofa.footprint());
    let overlay = SceneOverlay {
        hover: Some(HoverMarker {
            cell: Cell::new(4, 0),
            valid: true,
        }),
        furniture_preview: Some(FurniturePreview {
            kind: FurnitureKind::ClubSofa,
            region: preview_region,
            placeable: false,
        }),
        path_preview: vec![Cell::new(2, 2), Cell::new(3, 1)],
        highlighted_agent: Some(AgentId::new(0)),
        ..SceneOverlay::default()
    };

    let scene = Scene::capture(&world, projection(), &overlay);

    let walker = scene
        .agents
        .iter()
        .find(|sprite| sprite.id == AgentId::new(0))
        .expect("walker is drawn");
    assert!(walker.highlighted);
    assert_eq!(walker.walk_frame, 2);
    assert_eq!(
        walker.target_anchor,
        Some(scene.projection.cell_to_screen(Cell::new(2, 4)))
    );
    assert!(scene.furniture_preview.is_some_and(|sprite| sprite.blocked));
    assert_eq!(scene.path_preview.len(), 2);
    assert_eq!(
        scene.hover.map(|(marker, _)| marker.cell),
        Some(Cell::new(4, 0))
    );
}
