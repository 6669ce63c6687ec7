//! Isometric projection between grid space and canvas pixels.

use glam::DVec2;
use isoroom_core::Cell;

use crate::RenderingError;

/// Maps continuous grid coordinates onto a canvas, centring the room.
///
/// Grid `x` grows toward the lower right of the screen and grid `y` toward the
/// lower left. The room centre always lands on the canvas centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsoProjection {
    tile_size: DVec2,
    zoom: f64,
    canvas_size: DVec2,
    room_size: DVec2,
}

impl IsoProjection {
    /// Creates a projection for an empty room.
    ///
    /// Returns an error when the tile size or zoom is not a positive finite
    /// number.
    pub fn new(tile_size: DVec2, zoom: f64, canvas_size: DVec2) -> Result<Self, RenderingError> {
        if !(tile_size.is_finite() && tile_size.x > 0.0 && tile_size.y > 0.0) {
            return Err(RenderingError::InvalidTileSize {
                width: tile_size.x,
                height: tile_size.y,
            });
        }
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(RenderingError::InvalidZoom { zoom });
        }

        Ok(Self {
            tile_size,
            zoom,
            canvas_size,
            room_size: DVec2::ZERO,
        })
    }

    /// Returns a copy centred on a room of the provided dimensions.
    #[must_use]
    pub fn with_room_size(self, width: u32, height: u32) -> Self {
        Self {
            room_size: DVec2::new(f64::from(width), f64::from(height)),
            ..self
        }
    }

    /// Returns a copy targeting a canvas of the provided size.
    #[must_use]
    pub fn with_canvas_size(self, canvas_size: DVec2) -> Self {
        Self {
            canvas_size,
            ..self
        }
    }

    /// Tile size after zoom is applied.
    #[must_use]
    pub fn effective_tile_size(&self) -> DVec2 {
        self.tile_size * self.zoom
    }

    /// Canvas dimensions in pixels.
    #[must_use]
    pub const fn canvas_size(&self) -> DVec2 {
        self.canvas_size
    }

    /// Zoom factor applied to the tile size.
    #[must_use]
    pub const fn zoom(&self) -> f64 {
        self.zoom
    }

    fn half_tile(&self) -> DVec2 {
        self.effective_tile_size() * 0.5
    }

    fn offset(&self) -> DVec2 {
        let half = self.half_tile();
        let centre = self.room_size * 0.5;
        let centre_on_screen = DVec2::new(
            (centre.x - centre.y) * half.x,
            (centre.x + centre.y) * half.y,
        );
        self.canvas_size * 0.5 - centre_on_screen
    }

    /// Projects a grid position onto the canvas.
    #[must_use]
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        let half = self.half_tile();
        DVec2::new((world.x - world.y) * half.x, (world.x + world.y) * half.y) + self.offset()
    }

    /// Inverse of [`IsoProjection::world_to_screen`].
    #[must_use]
    pub fn screen_to_world(&self, screen: DVec2) -> DVec2 {
        let half = self.half_tile();
        let relative = screen - self.offset();
        let across = relative.x / half.x;
        let down = relative.y / half.y;
        DVec2::new((across + down) * 0.5, (down - across) * 0.5)
    }

    /// Cell under a canvas pixel, rounding to the nearest cell with ties up.
    #[must_use]
    pub fn screen_to_cell(&self, screen: DVec2) -> Cell {
        let world = self.screen_to_world(screen);
        Cell::new(
            (world.x + 0.5).floor() as i32,
            (world.y + 0.5).floor() as i32,
        )
    }

    /// Canvas pixel at the centre of a cell.
    #[must_use]
    pub fn cell_to_screen(&self, cell: Cell) -> DVec2 {
        self.world_to_screen(DVec2::new(f64::from(cell.x()), f64::from(cell.y())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> IsoProjection {
        IsoProjection::new(DVec2::new(64.0, 32.0), 1.0, DVec2::new(1280.0, 720.0))
            .expect("valid projection")
            .with_room_size(20, 15)
    }

    #[test]
    fn room_centre_maps_to_canvas_centre() {
        let projection = projection();
        let centre = projection.world_to_screen(DVec2::new(10.0, 7.5));
        assert!((centre - DVec2::new(640.0, 360.0)).length() < 1e-9);
    }

    #[test]
    fn origin_follows_reference_formula() {
        let projection = projection();
        let offset_x = 640.0 - (10.0 - 7.5) * 32.0;
        let offset_y = 360.0 - (10.0 + 7.5) * 16.0;
        let screen = projection.world_to_screen(DVec2::new(3.0, 1.0));

        assert!((screen.x - ((3.0 - 1.0) * 32.0 + offset_x)).abs() < 1e-9);
        assert!((screen.y - ((3.0 + 1.0) * 16.0 + offset_y)).abs() < 1e-9);
    }

    #[test]
    fn zoom_scales_the_tile_size() {
        let projection = projection();
        let zoomed = IsoProjection::new(DVec2::new(64.0, 32.0), 2.0, DVec2::new(1280.0, 720.0))
            .expect("valid projection")
            .with_room_size(20, 15);

        assert_eq!(zoomed.effective_tile_size(), DVec2::new(128.0, 64.0));
        let step = zoomed.world_to_screen(DVec2::new(1.0, 0.0)) - zoomed.world_to_screen(DVec2::ZERO);
        let base = projection.world_to_screen(DVec2::new(1.0, 0.0)) - projection.world_to_screen(DVec2::ZERO);
        assert!((step - base * 2.0).length() < 1e-9);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        let canvas = DVec2::new(100.0, 100.0);
        assert_eq!(
            IsoProjection::new(DVec2::new(0.0, 32.0), 1.0, canvas),
            Err(RenderingError::InvalidTileSize {
                width: 0.0,
                height: 32.0
            })
        );
        assert!(IsoProjection::new(DVec2::new(64.0, f64::NAN), 1.0, canvas).is_err());
        assert_eq!(
            IsoProjection::new(DVec2::new(64.0, 32.0), -1.0, canvas),
            Err(RenderingError::InvalidZoom { zoom: -1.0 })
        );
    }

    #[test]
    fn screen_to_cell_rounds_to_the_nearest_cell() {
        let projection = projection();
        let target = Cell::new(4, 9);
        let nudged = projection.cell_to_screen(target) + DVec2::new(5.0, 3.0);
        assert_eq!(projection.screen_to_cell(nudged), target);
    }
}
