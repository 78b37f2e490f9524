pub const MIN_HEALTH: f64 = 0.0;
pub const MAX_HEALTH: f64 = 100.0;
pub const INITIAL_HEALTH: f64 = 50.0;

/// Bounded plant health. The only way to change it is [`HealthState::adjust`],
/// which saturates at the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthState {
    value: f64,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            value: INITIAL_HEALTH,
        }
    }
}

impl HealthState {
    pub fn current(&self) -> f64 {
        self.value
    }

    pub fn adjust(&mut self, delta: f64) -> f64 {
        if delta.is_nan() {
            return self.value;
        }
        self.value = (self.value + delta).clamp(MIN_HEALTH, MAX_HEALTH);
        self.value
    }
}
