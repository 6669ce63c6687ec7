#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the isometric room lobby headlessly.

mod config;
mod headless;
mod layout_transfer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use isoroom_core::{AgentId, Cell, Command, Event};
use isoroom_rendering::{Color, Presentation, RenderingBackend, Scene, SceneOverlay};
use isoroom_system_bootstrap::Bootstrap;
use isoroom_system_editor::{Editor, EditorInput};
use isoroom_world::{self as world, query, Room, World};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{config::AppConfig, headless::HeadlessBackend, layout_transfer::LayoutDocument};

const WINDOW_TITLE: &str = "Isoroom";

#[derive(Debug, Parser)]
#[command(name = "isoroom", about = "Headless harness for the isometric room builder")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Writes the lobby layout as a JSON document.
    Export {
        /// File to write instead of standard output.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Loads a JSON layout into the lobby and prints the normalized result.
    Import {
        /// Layout document to load.
        path: PathBuf,
    },
    /// Walks the first avatar to a cell and reports how long it took.
    Walk {
        /// Destination column.
        x: i32,
        /// Destination row.
        y: i32,
        /// Layout document applied to the lobby before walking.
        #[arg(long)]
        layout: Option<PathBuf>,
    },
}

/// Entry point for the isoroom command-line interface.
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = config::load(cli.config.as_deref())?;

    match cli.command {
        None => {
            let world = World::new(config.world);
            println!("{}", Bootstrap::default().welcome_banner(&world));
        }
        Some(CliCommand::Export { output }) => {
            let (world, _) = boot_lobby(&config);
            export(&world, output.as_deref())?;
        }
        Some(CliCommand::Import { path }) => {
            let (mut world, _) = boot_lobby(&config);
            import_layout(&mut world, &path)?;
            export(&world, None)?;
        }
        Some(CliCommand::Walk { x, y, layout }) => {
            let (mut world, editor) = boot_lobby(&config);
            if let Some(path) = layout {
                import_layout(&mut world, &path)?;
            }
            walk(&config, world, editor, Cell::new(x, y))?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Runs the bootstrap handshake until the lobby and its avatars exist.
fn boot_lobby(config: &AppConfig) -> (World, Editor) {
    let mut world = World::new(config.world);
    let mut bootstrap = Bootstrap::default();
    let mut editor = Editor::new();

    let mut commands = Vec::new();
    let mut events = Vec::new();
    bootstrap.start(&mut commands);
    while !commands.is_empty() {
        events.clear();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }
        bootstrap.handle(&events, &mut commands);
        editor.handle(
            &events,
            EditorInput::default(),
            None,
            |_: Cell, _: Option<AgentId>| false,
            None,
            &mut commands,
        );
    }

    (world, editor)
}

fn current_room(world: &World) -> Result<&Room> {
    query::current_room(world).context("the lobby has no current room")
}

fn export(world: &World, output: Option<&Path>) -> Result<()> {
    let document = LayoutDocument::capture(current_room(world)?);
    let encoded = document.encode()?;
    match output {
        Some(path) => {
            fs::write(path, encoded)
                .with_context(|| format!("failed to write layout to {}", path.display()))?;
            info!(path = %path.display(), room = %document.name, "exported layout");
        }
        None => println!("{encoded}"),
    }
    Ok(())
}

fn import_layout(world: &mut World, path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout from {}", path.display()))?;
    let document = LayoutDocument::decode(&contents)
        .with_context(|| format!("failed to decode layout {}", path.display()))?;
    let room = current_room(world)?.id();
    let command = document
        .to_command(room)
        .with_context(|| format!("layout {} is invalid", path.display()))?;

    let mut events = Vec::new();
    world::apply(world, command, &mut events);
    if !document.name.trim().is_empty() {
        world::apply(
            world,
            Command::RenameRoom {
                room,
                name: document.name.clone(),
            },
            &mut events,
        );
    }

    let layout = current_room(world)?.layout();
    info!(
        path = %path.display(),
        floor = layout.floor().len(),
        walls = layout.walls().len(),
        "imported layout"
    );
    Ok(())
}

fn walk(config: &AppConfig, mut world: World, mut editor: Editor, target: Cell) -> Result<()> {
    let agent = editor
        .controlled_agent()
        .context("the lobby has no avatars")?;
    let start = query::agent_cell(&world, agent).context("the controlled avatar is missing")?;
    if start == target {
        println!("Already standing at ({}, {})", target.x(), target.y());
        return Ok(());
    }

    let mut commands = Vec::new();
    {
        let validator = query::placement_validator(&world).context("the lobby has no current room")?;
        editor.handle(
            &[],
            EditorInput::new(true, Some(target)),
            Some(start),
            validator,
            None,
            &mut commands,
        );
    }
    if commands.is_empty() {
        bail!(
            "no walkable path from ({}, {}) to ({}, {})",
            start.x(),
            start.y(),
            target.x(),
            target.y()
        );
    }

    let mut events = Vec::new();
    for command in commands {
        world::apply(&mut world, command, &mut events);
    }
    for event in &events {
        if let Event::AgentPathAssigned { steps, .. } = event {
            info!(steps, x = target.x(), y = target.y(), "walking");
        }
    }

    let projection = config.projection.projection()?;
    let overlay = SceneOverlay {
        highlighted_agent: Some(agent),
        ..SceneOverlay::default()
    };
    let presentation = Presentation::new(
        WINDOW_TITLE,
        Color::from_rgb_u8(24, 26, 33),
        Scene::capture(&world, projection, &overlay),
    );

    let mut ticks = 0_u64;
    let mut arrived = None;
    HeadlessBackend::new(config.simulation.tick(), config.simulation.max_ticks)
        .run(presentation, |dt, _input, scene| {
            let mut events = Vec::new();
            world::apply(&mut world, Command::Tick { dt }, &mut events);
            ticks += 1;
            *scene = Scene::capture(&world, projection, &overlay);
            arrived = events.iter().find_map(|event| match event {
                Event::AgentArrived {
                    agent: arriving,
                    cell,
                } if *arriving == agent => Some(*cell),
                _ => None,
            });
            arrived.is_none()
        })
        .context("the avatar never arrived")?;

    let cell = arrived.context("the avatar never arrived")?;
    let name = query::agent_view(&world)
        .into_iter()
        .find(|snapshot| snapshot.id == agent)
        .map_or_else(|| format!("agent {}", agent.get()), |snapshot| snapshot.name);
    println!(
        "{name} reached ({}, {}) after {ticks} ticks",
        cell.x(),
        cell.y()
    );
    Ok(())
}
