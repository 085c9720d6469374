pub mod black_hole;
pub mod c_api;
pub mod canvas;
pub mod cluster;
pub mod color;
pub mod comet;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod links;
pub mod nebula;
pub mod particle;
pub mod planet;
pub mod simulation;
pub mod utils;
pub mod vector;

pub use black_hole::BlackHole;
pub use canvas::{Canvas, CommandBuffer, DrawCommand, Paint, Path, Stroke, Surface};
pub use cluster::StarCluster;
pub use color::Color;
pub use comet::Comet;
pub use config::{LinkFieldConfig, Palette, SimConfig};
pub use context::{Forces, FrameContext};
pub use driver::{Animation, Scene, StopHandle};
pub use error::{ColorParseError, ConfigError};
pub use links::LinkField;
pub use nebula::Nebula;
pub use particle::{Lifespan, Particle, Shape};
pub use planet::{Moon, Planet};
pub use simulation::SpaceSimulation;
pub use vector::{Vector, VectorExt};
