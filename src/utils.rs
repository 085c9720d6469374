//! Randomized construction of scene entities.
//!
//! Every generator draws from the caller's `fastrand::Rng` so a seeded
//! simulation produces the same scene every time.

use crate::{
    black_hole::BlackHole,
    canvas::Surface,
    cluster::{ClusterStar, StarCluster},
    color::Color,
    comet::Comet,
    config::SimConfig,
    nebula::Nebula,
    particle::{Lifespan, Particle, Shape},
    planet::{Moon, Planet},
    vector::VectorExt,
};

use ultraviolet::Vec2;

use std::f32::consts::TAU;

/// Uniform sample in `[min, max)`.
#[inline]
pub fn range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    rng.f32() * (max - min) + min
}

/// Uniform point inside the surface.
pub fn point_in(rng: &mut fastrand::Rng, surface: Surface) -> Vec2 {
    Vec2::new(rng.f32() * surface.width, rng.f32() * surface.height)
}

/// Uniform pick from a non-empty palette.
pub fn pick(rng: &mut fastrand::Rng, palette: &[Color]) -> Color {
    palette[rng.usize(..palette.len())]
}

fn random_velocity(rng: &mut fastrand::Rng, max: f32) -> Vec2 {
    Vec2::new(range(rng, -max, max), range(rng, -max, max))
}

/// Star or asteroid at `pos` with shape-specific size, color and drift.
pub fn particle(
    rng: &mut fastrand::Rng,
    config: &SimConfig,
    pos: Vec2,
    shape: Shape,
    lifespan: Lifespan,
) -> Particle {
    match shape {
        Shape::Star => {
            let radius = rng.f32() * 2.0;
            let color = pick(rng, &config.palette.stars);
            let vel = random_velocity(rng, 0.1);
            Particle::new(pos, vel, radius, color, shape, lifespan)
        }
        Shape::Asteroid => {
            let radius = 2.0 + rng.f32() * 3.0;
            let mut channel = || (100.0 + rng.f32() * 155.0) as u8;
            let color = Color::rgb(channel(), channel(), channel());
            let vel = random_velocity(rng, 0.5);
            Particle::new(pos, vel, radius, color, shape, lifespan)
        }
    }
}

/// The `index`-th planet: orbits widen by 80 px per planet.
pub fn planet(rng: &mut fastrand::Rng, config: &SimConfig, index: usize, surface: Surface) -> Planet {
    let radius = 5.0 + rng.f32() * 20.0;
    let color = config.palette.planets[index % config.palette.planets.len()];
    let orbit_radius = 150.0 + index as f32 * 80.0;
    let orbit_speed = 0.001 + rng.f32() * 0.002;
    let angle = rng.f32() * TAU;
    let rings = rng.f32() < 0.3;

    let moons = (0..rng.usize(0..4))
        .map(|i| Moon {
            radius: radius * 0.2,
            orbit_radius: radius * 2.0 + i as f32 * 15.0,
            orbit_speed: 0.02 + rng.f32() * 0.03,
            angle: rng.f32() * TAU,
        })
        .collect();

    Planet::new(radius, color, orbit_radius, orbit_speed, angle, rings, moons, surface)
}

pub fn nebula(rng: &mut fastrand::Rng, config: &SimConfig, surface: Surface) -> Nebula {
    let pos = point_in(rng, surface);
    let radius = range(rng, 150.0, 300.0);
    let color = pick(rng, &config.palette.nebulas);
    let jitter: Vec<f32> = (0..Nebula::OUTLINE_POINTS)
        .map(|_| 0.8 + rng.f32() * 0.4)
        .collect();
    Nebula::new(pos, radius, color, jitter)
}

pub fn black_hole(rng: &mut fastrand::Rng, config: &SimConfig, surface: Surface) -> BlackHole {
    BlackHole::new(
        point_in(rng, surface),
        config.black_hole_radius,
        config.event_horizon,
        config.black_hole_spin,
    )
}

pub fn comet(rng: &mut fastrand::Rng, config: &SimConfig, surface: Surface) -> Comet {
    let pos = point_in(rng, surface);
    let vel = random_velocity(rng, 2.0);
    Comet::new(pos, vel, 3.0, config.comet_tail_length)
}

pub fn star_cluster(rng: &mut fastrand::Rng, config: &SimConfig, surface: Surface) -> StarCluster {
    let center = point_in(rng, surface);
    let count = rng.usize(StarCluster::MIN_STARS..StarCluster::MAX_STARS);
    let stars = (0..count)
        .map(|_| {
            let distance = rng.f32() * StarCluster::SPREAD;
            let angle = rng.f32() * TAU;
            ClusterStar {
                pos: center + Vec2::from_angle(angle) * distance,
                radius: rng.f32() * 1.5,
                color: pick(rng, &config.palette.stars),
            }
        })
        .collect();
    StarCluster::new(center, stars)
}
