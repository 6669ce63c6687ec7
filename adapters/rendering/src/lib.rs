#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for isometric room adapters.
//!
//! Adapters turn world snapshots into a [`Scene`] of plain draw instructions
//! and hand it to a [`RenderingBackend`]; nothing here depends on a drawing API.

mod projection;
mod scene;

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::DVec2;
use thiserror::Error;

pub use projection::IsoProjection;
pub use scene::{
    AgentSprite, DoorwaySprite, FloorSprite, FurniturePreview, FurnitureSprite, HoverMarker,
    Scene, SceneOverlay, WallSprite, DEFAULT_WALK_FRAMES,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Pointer position in canvas pixels.
    pub cursor_screen_space: Option<DVec2>,
    /// Whether the pointer was clicked on this frame.
    pub confirm_action: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting room scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may replace the scene before
    /// it is rendered. Returning `false` asks the backend to stop.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Tile dimensions must be positive and finite.
    #[error("tile size must be positive and finite (received {width}x{height})")]
    InvalidTileSize {
        /// Provided tile width.
        width: f64,
        /// Provided tile height.
        height: f64,
    },
    /// Zoom must be positive and finite.
    #[error("zoom must be positive and finite (received {zoom})")]
    InvalidZoom {
        /// Provided zoom factor.
        zoom: f64,
    },
}
