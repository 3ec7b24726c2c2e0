//! Presentation-side collaborators notified by the simulation
//!
//! The step function never draws or updates widgets itself. It reports scalar
//! changes through `HudObserver` and hands a read-only view of the finished
//! frame to a `RenderSink`.

use super::planes::PlaneId;
use super::state::{RunState, RunStatus};

/// Receives HUD-relevant values whenever they change
///
/// All methods default to no-ops so observers implement only what they show.
pub trait HudObserver {
    fn score_changed(&mut self, _score: u32) {}
    fn level_changed(&mut self, _level: u32) {}
    fn energy_changed(&mut self, _energy: u32) {}
    fn health_changed(&mut self, _health: f32, _max_health: f32) {}
    fn status_changed(&mut self, _status: RunStatus) {}
    fn active_plane_changed(&mut self, _plane: PlaneId) {}
}

/// Observer that ignores every notification
impl HudObserver for () {}

/// Draws a completed frame
pub trait RenderSink {
    fn render(&mut self, state: &RunState);
}

impl<F: FnMut(&RunState)> RenderSink for F {
    fn render(&mut self, state: &RunState) {
        self(state)
    }
}
