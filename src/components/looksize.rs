use bevy_ecs::prelude::Component;

/// Display size of a sprite in percent of its costume size.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct LookSize {
    pub percent: f64,
}
impl LookSize {
    pub fn new(percent: f64) -> Self {
        Self {
            percent: percent.max(0.0),
        }
    }
    /// Size as a uniform scale factor (100% = 1.0).
    pub fn scale_factor(&self) -> f64 {
        self.percent / 100.0
    }
}
impl Default for LookSize {
    fn default() -> Self {
        Self::new(100.0)
    }
}
