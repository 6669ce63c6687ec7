#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-avatar motion state machine that walks precomputed paths over time.
//!
//! An avatar walks one path cell per `move_delay`, interpolating its
//! continuous grid position between cells. Emotes run on a separate timer and
//! fall back to idle once their duration elapses.

use std::time::Duration;

use glam::Vec2;
use isoroom_core::{AgentAction, Cell, Facing};

/// Time an avatar spends crossing a single cell.
pub const DEFAULT_MOVE_DELAY: Duration = Duration::from_millis(400);

/// Time an emote stays active before reverting to idle.
pub const DEFAULT_ACTION_DURATION: Duration = Duration::from_millis(3_000);

/// Locomotion state of an avatar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing still.
    #[default]
    Idle,
    /// Walking along an assigned path.
    Moving,
}

/// Observable outcomes of a single [`AgentMotion::advance`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotionUpdate {
    /// Final path cell reached during the advance, if the path completed.
    pub arrived: Option<Cell>,
    /// Whether an emote expired and the avatar returned to idle.
    pub action_expired: bool,
}

/// Motion bookkeeping for a single avatar.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentMotion {
    state: MotionState,
    path: Vec<Cell>,
    path_index: usize,
    origin: Cell,
    target: Option<Cell>,
    move_timer: Duration,
    move_delay: Duration,
    facing: Facing,
    action: AgentAction,
    action_timer: Duration,
    action_duration: Duration,
}

impl AgentMotion {
    /// Creates an idle motion state using the provided timings.
    #[must_use]
    pub fn new(move_delay: Duration, action_duration: Duration) -> Self {
        Self {
            state: MotionState::Idle,
            path: Vec::new(),
            path_index: 0,
            origin: Cell::new(0, 0),
            target: None,
            move_timer: Duration::ZERO,
            move_delay,
            facing: Facing::default(),
            action: AgentAction::Idle,
            action_timer: Duration::ZERO,
            action_duration,
        }
    }

    /// Replaces any in-flight motion with a new path.
    ///
    /// `path` excludes the avatar's current cell. An empty path cancels the
    /// current walk and leaves the avatar idle. Returns whether a walk started.
    pub fn assign(&mut self, position: Vec2, target: Cell, path: Vec<Cell>) -> bool {
        self.cancel();
        if path.is_empty() {
            return false;
        }

        self.origin = Cell::from_world(position.x, position.y);
        self.path = path;
        self.target = Some(target);
        self.state = MotionState::Moving;
        self.action = AgentAction::Idle;
        self.action_timer = Duration::ZERO;
        self.refresh_facing();
        true
    }

    /// Stops walking without moving the avatar.
    pub fn cancel(&mut self) {
        self.state = MotionState::Idle;
        self.path.clear();
        self.path_index = 0;
        self.target = None;
        self.move_timer = Duration::ZERO;
    }

    /// Starts an emote, restarting its timer.
    pub fn set_action(&mut self, action: AgentAction) {
        self.action = action;
        self.action_timer = Duration::ZERO;
    }

    /// Advances timers by `dt` and moves `position` along the current path.
    pub fn advance(&mut self, dt: Duration, position: &mut Vec2) -> MotionUpdate {
        let mut update = MotionUpdate {
            action_expired: self.advance_action(dt),
            ..MotionUpdate::default()
        };

        if self.state != MotionState::Moving {
            return update;
        }
        let Some(&next) = self.path.get(self.path_index) else {
            self.cancel();
            return update;
        };

        self.move_timer = self.move_timer.saturating_add(dt);
        let start = cell_position(self.segment_start());
        let end = cell_position(next);
        *position = start.lerp(end, self.progress());

        if self.move_timer < self.move_delay {
            return update;
        }

        *position = end;
        self.move_timer = Duration::ZERO;
        self.path_index += 1;
        if self.path_index >= self.path.len() {
            let arrived = self.target.unwrap_or(next);
            *position = cell_position(arrived);
            self.cancel();
            update.arrived = Some(arrived);
        } else {
            self.refresh_facing();
        }

        update
    }

    fn advance_action(&mut self, dt: Duration) -> bool {
        if self.action == AgentAction::Idle {
            return false;
        }
        self.action_timer = self.action_timer.saturating_add(dt);
        if self.action_timer < self.action_duration {
            return false;
        }
        self.action = AgentAction::Idle;
        self.action_timer = Duration::ZERO;
        true
    }

    fn segment_start(&self) -> Cell {
        match self.path_index.checked_sub(1) {
            Some(previous) => self.path[previous],
            None => self.origin,
        }
    }

    fn refresh_facing(&mut self) {
        let Some(&next) = self.path.get(self.path_index) else {
            return;
        };
        let (dx, dy) = self.segment_start().delta_to(next);
        if let Some(facing) = Facing::from_grid_step(dx, dy) {
            self.facing = facing;
        }
    }

    /// Fraction of the current step that has elapsed, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.move_delay.is_zero() {
            return 1.0;
        }
        (self.move_timer.as_secs_f32() / self.move_delay.as_secs_f32()).min(1.0)
    }

    /// Animation frame to show for a walk cycle with `frames` frames.
    #[must_use]
    pub fn walk_frame(&self, frames: u32) -> u32 {
        if self.state != MotionState::Moving || frames == 0 {
            return 0;
        }
        let frame = (self.progress() * frames as f32).floor() as u32;
        frame.min(frames - 1)
    }

    /// Current locomotion state.
    #[must_use]
    pub const fn state(&self) -> MotionState {
        self.state
    }

    /// Reports whether the avatar is walking.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    /// Remaining and completed path cells, excluding the starting cell.
    #[must_use]
    pub fn path(&self) -> &[Cell] {
        &self.path
    }

    /// Index of the path cell currently being approached.
    #[must_use]
    pub const fn path_index(&self) -> usize {
        self.path_index
    }

    /// Cell the avatar stood on when the current path was assigned.
    #[must_use]
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Destination of the current walk, if any.
    #[must_use]
    pub const fn target(&self) -> Option<Cell> {
        self.target
    }

    /// Direction the avatar faces on screen.
    #[must_use]
    pub const fn facing(&self) -> Facing {
        self.facing
    }

    /// Emote currently being performed.
    #[must_use]
    pub const fn action(&self) -> AgentAction {
        self.action
    }

    /// Time spent crossing a single cell.
    #[must_use]
    pub const fn move_delay(&self) -> Duration {
        self.move_delay
    }
}

impl Default for AgentMotion {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_DELAY, DEFAULT_ACTION_DURATION)
    }
}

fn cell_position(cell: Cell) -> Vec2 {
    Vec2::new(cell.x() as f32, cell.y() as f32)
}
