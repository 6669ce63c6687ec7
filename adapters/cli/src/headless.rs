//! Rendering backend that steps scenes without opening a window.

use std::time::Duration;

use anyhow::{bail, Result as AnyResult};
use isoroom_rendering::{FrameInput, Presentation, RenderingBackend, Scene};
use tracing::{debug, info};

/// Drives the update loop at a fixed step until the scene asks to stop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct HeadlessBackend {
    frame_time: Duration,
    max_frames: u64,
}

impl HeadlessBackend {
    /// Creates a backend that advances `frame_time` per frame for at most `max_frames`.
    pub(crate) const fn new(frame_time: Duration, max_frames: u64) -> Self {
        Self {
            frame_time,
            max_frames,
        }
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> bool,
    {
        let Presentation {
            window_title,
            mut scene,
            ..
        } = presentation;
        info!(title = %window_title, "starting headless presentation");

        for frame in 1..=self.max_frames {
            if !update_scene(self.frame_time, FrameInput::default(), &mut scene) {
                debug!(frame, agents = scene.agents.len(), "presentation finished");
                return Ok(());
            }
        }

        bail!(
            "presentation did not finish within {} frames",
            self.max_frames
        )
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;
    use isoroom_rendering::{Color, IsoProjection};

    use super::*;

    fn presentation() -> Presentation {
        let projection =
            IsoProjection::new(DVec2::new(64.0, 32.0), 1.0, DVec2::new(640.0, 480.0))
                .expect("valid projection");
        Presentation::new("test", Color::from_rgb_u8(0, 0, 0), Scene::empty(projection))
    }

    #[test]
    fn stops_when_the_scene_asks() {
        let mut frames = 0;
        let mut elapsed = Duration::ZERO;
        HeadlessBackend::new(Duration::from_millis(16), 100)
            .run(presentation(), |dt, input, _| {
                assert_eq!(input, FrameInput::default());
                frames += 1;
                elapsed += dt;
                frames < 5
            })
            .expect("finishes before the frame limit");

        assert_eq!(frames, 5);
        assert_eq!(elapsed, Duration::from_millis(80));
    }

    #[test]
    fn frame_limit_is_an_error() {
        let mut frames = 0;
        let result =
            HeadlessBackend::new(Duration::from_millis(16), 3).run(presentation(), |_, _, _| {
                frames += 1;
                true
            });

        assert!(result.is_err());
        assert_eq!(frames, 3);
    }
}
