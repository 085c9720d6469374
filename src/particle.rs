use crate::{
    black_hole::BlackHole,
    canvas::{Canvas, Paint, Path},
    color::Color,
    context::FrameContext,
    vector::VectorExt,
};

use ultraviolet::Vec2;

use std::f32::consts::{FRAC_PI_2, PI};

/// How a particle is rendered.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Filled disc.
    Star = 0,
    /// Five-point star polygon.
    Asteroid = 1,
}

impl Shape {
    pub fn from_u8(kind: u8) -> Option<Self> {
        match kind {
            0 => Some(Shape::Star),
            1 => Some(Shape::Asteroid),
            _ => None,
        }
    }

    fn draw<C: Canvas + ?Sized>(self, canvas: &mut C, pos: Vec2, radius: f32, paint: &Paint) {
        match self {
            Shape::Star => canvas.fill_circle(pos, radius, paint),
            Shape::Asteroid => canvas.fill_path(&star_polygon(pos, radius), paint),
        }
    }
}

/// Vertices visited in star order (every second point of a pentagon), starting at the top.
fn star_polygon(center: Vec2, radius: f32) -> Path {
    let mut path = Path::new().move_to(center - Vec2::new(0.0, radius));
    for i in 0..5 {
        let angle = i as f32 * 4.0 * PI / 5.0 - FRAC_PI_2;
        path = path.line_to(center + Vec2::from_angle(angle) * radius);
    }
    path.close()
}

/// Number of updates a particle survives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifespan {
    Infinite,
    Frames(u32),
}

/// A point-mass that drifts, bounces off the surface edges and reacts to the
/// pointer and to black holes.
#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Color,
    pub shape: Shape,
    pub lifespan: Lifespan,
    /// Updates applied so far.
    pub age: u32,
    opacity: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, color: Color, shape: Shape, lifespan: Lifespan) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
            shape,
            lifespan,
            age: 0,
            opacity: 1.0,
        }
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Advances one frame.
    ///
    /// Movement happens first, using last frame's velocity. The bounce and the
    /// pointer/black-hole impulses then shape the velocity for the next frame.
    pub fn update(&mut self, ctx: &FrameContext, black_holes: &[BlackHole]) {
        self.pos += self.vel;
        ctx.surface.bounce(self.pos, &mut self.vel);

        if let Some(pointer) = ctx.pointer {
            let to_pointer = pointer - self.pos;
            if to_pointer.mag() < ctx.forces.interaction_radius {
                self.vel -= to_pointer.normalize_or_zero() * ctx.forces.repulsion;
            }
        }

        for hole in black_holes {
            let to_hole = hole.pos - self.pos;
            if to_hole.mag() < hole.event_horizon {
                self.vel += to_hole.normalize_or_zero() * ctx.forces.attraction;
            }
        }

        self.age = self.age.saturating_add(1);
        self.opacity = match self.lifespan {
            Lifespan::Infinite => 1.0,
            Lifespan::Frames(frames) => (1.0 - self.age as f32 / frames as f32).max(0.0),
        };
    }

    pub fn is_expired(&self) -> bool {
        match self.lifespan {
            Lifespan::Infinite => false,
            Lifespan::Frames(frames) => self.age >= frames,
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.set_alpha(self.opacity);
        self.shape.draw(canvas, self.pos, self.radius, &Paint::Solid(self.color));
        canvas.set_alpha(1.0);
    }
}
