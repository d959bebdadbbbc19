use cgmath::{Vector2, vec2};

/// Where the pointer last was and whether it is still considered moving.
///
/// Only the simulation loop clears the moving flag (see [`PointerState::expire`]);
/// input only ever sets it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub position: Option<Vector2<f32>>,
    pub is_moving: bool,
    /// Milliseconds on the loop's clock.
    pub last_move_ms: f64,
}

impl PointerState {
    pub fn record_move(&mut self, x: f32, y: f32, now_ms: f64) {
        self.position = Some(vec2(x, y));
        self.is_moving = true;
        self.last_move_ms = now_ms;
    }

    /// Position to repel from, if the pointer is moving right now.
    pub fn repulsor(&self) -> Option<Vector2<f32>> {
        if self.is_moving { self.position } else { None }
    }

    /// Drop the moving flag and position once more than `timeout_ms` passed
    /// since the last move. Returns true if the state was cleared.
    pub fn expire(&mut self, now_ms: f64, timeout_ms: f64) -> bool {
        if self.is_moving && now_ms - self.last_move_ms > timeout_ms {
            self.is_moving = false;
            self.position = None;
            return true;
        }
        false
    }
}
