use crate::{
    canvas::{Canvas, Ellipse, Paint},
    color::Color,
};

use ultraviolet::Vec2;

/// Stationary attractor with a spinning accretion disk.
#[derive(Clone, Debug)]
pub struct BlackHole {
    pub pos: Vec2,
    /// Radius of the opaque core.
    pub radius: f32,
    /// Particles closer than this are pulled in.
    pub event_horizon: f32,
    /// Accretion disk angle, purely visual.
    pub rotation: f32,
    /// Radians added to `rotation` per frame.
    pub spin: f32,
}

impl BlackHole {
    /// Vertical squash of the accretion disk relative to its width.
    const DISK_FLATTENING: f32 = 0.3;

    pub fn new(pos: Vec2, radius: f32, event_horizon: f32, spin: f32) -> Self {
        Self {
            pos,
            radius,
            event_horizon,
            rotation: 0.0,
            spin,
        }
    }

    pub fn update(&mut self) {
        self.rotation += self.spin;
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let halo = Paint::radial(
            self.pos,
            0.0,
            self.event_horizon,
            &[
                (0.0, Color::BLACK),
                (0.7, Color::rgba(20, 20, 20, 0.8)),
                (1.0, Color::TRANSPARENT),
            ],
        );
        canvas.fill_circle(self.pos, self.event_horizon, &halo);

        let disk = Paint::radial(
            self.pos,
            self.radius,
            self.event_horizon,
            &[
                (0.0, Color::rgba(255, 100, 0, 0.0)),
                (0.3, Color::rgba(255, 100, 0, 0.8)),
                (0.7, Color::rgba(255, 200, 0, 0.3)),
                (1.0, Color::rgba(255, 200, 0, 0.0)),
            ],
        );
        let ellipse = Ellipse {
            center: self.pos,
            radius_x: self.event_horizon,
            radius_y: self.event_horizon * Self::DISK_FLATTENING,
            rotation: self.rotation,
        };
        canvas.fill_ellipse(ellipse, &disk);

        canvas.fill_circle(self.pos, self.radius, &Paint::Solid(Color::BLACK));
    }
}
