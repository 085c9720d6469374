use crate::{canvas::Surface, config::SimConfig};

use ultraviolet::Vec2;

/// Strength and reach of the fields particles react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Forces {
    pub interaction_radius: f32,
    pub repulsion: f32,
    pub attraction: f32,
}

impl From<&SimConfig> for Forces {
    fn from(config: &SimConfig) -> Self {
        Self {
            interaction_radius: config.interaction_radius,
            repulsion: config.repulsion,
            attraction: config.attraction,
        }
    }
}

/// Everything an entity needs from the outside world for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    pub surface: Surface,
    /// Pointer position in surface coordinates, if the pointer has been seen.
    pub pointer: Option<Vec2>,
    pub forces: Forces,
}
