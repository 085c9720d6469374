use crate::{
    black_hole::BlackHole,
    canvas::{Canvas, Paint, Surface},
    cluster::StarCluster,
    color::Color,
    comet::Comet,
    config::SimConfig,
    context::{Forces, FrameContext},
    driver::Scene,
    error::{ConfigError, ConfigResult},
    nebula::Nebula,
    particle::{Lifespan, Particle, Shape},
    planet::Planet,
    utils,
};

use rayon::prelude::*;
use ultraviolet::Vec2;

/// Owns every body in the space scene and advances them one frame at a time.
#[derive(Debug)]
pub struct SpaceSimulation {
    pub config: SimConfig,
    pub surface: Surface,
    /// Last known pointer position, `None` until the pointer has been seen.
    pub pointer: Option<Vec2>,
    /// Frames simulated since construction or the last reset.
    pub frame: usize,
    /// Stars and asteroids; the only collection whose membership changes.
    pub particles: Vec<Particle>,
    pub planets: Vec<Planet>,
    pub nebulas: Vec<Nebula>,
    pub black_holes: Vec<BlackHole>,
    pub comets: Vec<Comet>,
    pub star_clusters: Vec<StarCluster>,
    /// Update particles on the rayon pool instead of the calling thread.
    pub parallel: bool,
    rng: fastrand::Rng,
}

impl SpaceSimulation {
    const BACKGROUND: [(f32, Color); 3] = [
        (0.0, Color::rgb(0x0b, 0x0b, 0x2a)),
        (0.5, Color::rgb(0x1b, 0x1b, 0x3a)),
        (1.0, Color::rgb(0x2d, 0x0b, 0x2a)),
    ];

    /// Populated scene with default settings and an entropy-seeded generator.
    pub fn new(surface: Surface) -> Self {
        let mut sim = Self::empty(SimConfig::default(), surface, fastrand::Rng::new());
        sim.init_objects();
        sim
    }

    /// Populated scene with custom settings and a fixed seed.
    pub fn with_config(config: SimConfig, surface: Surface, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        if !surface.is_valid() {
            return Err(ConfigError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }

        let mut sim = Self::empty(config, surface, fastrand::Rng::with_seed(seed));
        sim.init_objects();
        Ok(sim)
    }

    fn empty(config: SimConfig, surface: Surface, rng: fastrand::Rng) -> Self {
        Self {
            config,
            surface,
            pointer: None,
            frame: 0,
            particles: Vec::new(),
            planets: Vec::new(),
            nebulas: Vec::new(),
            black_holes: Vec::new(),
            comets: Vec::new(),
            star_clusters: Vec::new(),
            parallel: false,
            rng,
        }
    }

    /// Fills every collection up to its configured count.
    pub fn init_objects(&mut self) {
        let Self {
            config,
            surface,
            rng,
            particles,
            planets,
            nebulas,
            black_holes,
            comets,
            star_clusters,
            ..
        } = self;
        let surface = *surface;

        for _ in 0..config.star_count {
            let pos = utils::point_in(rng, surface);
            particles.push(utils::particle(rng, config, pos, Shape::Star, Lifespan::Infinite));
        }
        for _ in 0..config.asteroid_count {
            let pos = utils::point_in(rng, surface);
            particles.push(utils::particle(rng, config, pos, Shape::Asteroid, Lifespan::Infinite));
        }

        planets.extend((0..config.planet_count).map(|i| utils::planet(rng, config, i, surface)));
        nebulas.extend((0..config.nebula_count).map(|_| utils::nebula(rng, config, surface)));
        black_holes.extend((0..config.black_hole_count).map(|_| utils::black_hole(rng, config, surface)));
        comets.extend((0..config.comet_count).map(|_| utils::comet(rng, config, surface)));
        star_clusters.extend((0..config.star_cluster_count).map(|_| utils::star_cluster(rng, config, surface)));

        log::debug!(
            "populated scene: {} particles, {} planets, {} nebulas, {} black holes, {} comets, {} clusters",
            particles.len(),
            planets.len(),
            nebulas.len(),
            black_holes.len(),
            comets.len(),
            star_clusters.len(),
        );
    }

    /// Discards every body and generates a fresh scene.
    pub fn reset(&mut self) {
        self.particles.clear();
        self.planets.clear();
        self.nebulas.clear();
        self.black_holes.clear();
        self.comets.clear();
        self.star_clusters.clear();
        self.frame = 0;
        log::debug!("resetting scene");
        self.init_objects();
    }

    pub fn context(&self) -> FrameContext {
        FrameContext {
            surface: self.surface,
            pointer: self.pointer,
            forces: Forces::from(&self.config),
        }
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Applies a new surface size; bodies pick it up on the next update.
    pub fn resize(&mut self, surface: Surface) {
        log::info!("surface resized to {}x{}", surface.width, surface.height);
        self.surface = surface;
    }

    /// Advances the scene by one frame.
    /// Particles see this frame's black holes; expired particles are dropped last.
    pub fn update(&mut self) {
        let ctx = self.context();
        let black_holes = &self.black_holes;

        if self.parallel {
            self.particles
                .par_iter_mut()
                .for_each(|particle| particle.update(&ctx, black_holes));
        } else {
            self.particles
                .iter_mut()
                .for_each(|particle| particle.update(&ctx, black_holes));
        }

        for planet in &mut self.planets {
            planet.update(ctx.surface);
        }
        for hole in &mut self.black_holes {
            hole.update();
        }
        for comet in &mut self.comets {
            comet.update(ctx.surface);
        }

        self.particles.retain(|particle| !particle.is_expired());
        self.frame += 1;
    }

    /// Paints the scene back to front.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let surface = self.surface;
        canvas.clear(surface);
        let background = Paint::linear(Vec2::zero(), surface.size(), &Self::BACKGROUND);
        canvas.fill_rect(Vec2::zero(), surface.size(), &background);

        for cluster in &self.star_clusters {
            cluster.draw(canvas);
        }
        for nebula in &self.nebulas {
            nebula.draw(canvas);
        }
        for particle in &self.particles {
            particle.draw(canvas);
        }
        for planet in &self.planets {
            planet.draw(canvas, surface);
        }
        for hole in &self.black_holes {
            hole.draw(canvas);
        }
        for comet in &self.comets {
            comet.draw(canvas);
        }
    }

    /// Spawns a finite-lifespan particle at `(x, y)`.
    /// Returns `false` without changing anything when the scene is at capacity.
    pub fn add_particle(&mut self, x: f32, y: f32, shape: Shape) -> bool {
        if self.particles.len() >= self.config.max_particles {
            log::trace!("particle cap {} reached, ignoring spawn", self.config.max_particles);
            return false;
        }

        let lifespan = Lifespan::Frames(self.config.particle_lifespan);
        let particle = utils::particle(&mut self.rng, &self.config, Vec2::new(x, y), shape, lifespan);
        self.particles.push(particle);
        true
    }

    /// Click handler: spawns a star or an asteroid with equal odds.
    pub fn click(&mut self, x: f32, y: f32) -> bool {
        let shape = if self.rng.bool() { Shape::Star } else { Shape::Asteroid };
        self.add_particle(x, y, shape)
    }
}

impl Scene for SpaceSimulation {
    fn update(&mut self) {
        SpaceSimulation::update(self);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        SpaceSimulation::draw(self, canvas);
    }
}
