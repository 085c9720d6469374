use crate::{
    canvas::{Canvas, Ellipse, Paint, Stroke, Surface},
    color::Color,
    vector::VectorExt,
};

use ultraviolet::Vec2;

/// Small body circling its planet.
#[derive(Clone, Debug, PartialEq)]
pub struct Moon {
    pub radius: f32,
    /// Distance from the planet center.
    pub orbit_radius: f32,
    /// Radians per frame.
    pub orbit_speed: f32,
    pub angle: f32,
}

impl Moon {
    pub fn offset(&self) -> Vec2 {
        Vec2::from_angle(self.angle) * self.orbit_radius
    }
}

/// Body on a circular orbit around the surface center.
#[derive(Clone, Debug)]
pub struct Planet {
    pub radius: f32,
    pub color: Color,
    pub orbit_radius: f32,
    /// Radians per frame.
    pub orbit_speed: f32,
    pub angle: f32,
    /// Derived from `angle` and the surface center on every update.
    pub pos: Vec2,
    pub rings: bool,
    pub moons: Vec<Moon>,
}

impl Planet {
    const ORBIT_COLOR: Color = Color::rgba(255, 255, 255, 0.1);
    const RING_COLOR: Color = Color::rgba(255, 255, 255, 0.3);
    const MOON_COLOR: Color = Color::rgba(200, 200, 200, 0.8);

    pub fn new(
        radius: f32,
        color: Color,
        orbit_radius: f32,
        orbit_speed: f32,
        angle: f32,
        rings: bool,
        moons: Vec<Moon>,
        surface: Surface,
    ) -> Self {
        let mut planet = Self {
            radius,
            color,
            orbit_radius,
            orbit_speed,
            angle,
            pos: Vec2::zero(),
            rings,
            moons,
        };
        planet.place(surface);
        planet
    }

    fn place(&mut self, surface: Surface) {
        self.pos = surface.center() + Vec2::from_angle(self.angle) * self.orbit_radius;
    }

    pub fn update(&mut self, surface: Surface) {
        self.angle += self.orbit_speed;
        self.place(surface);

        for moon in &mut self.moons {
            moon.angle += moon.orbit_speed;
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, surface: Surface) {
        canvas.stroke_circle(surface.center(), self.orbit_radius, &Stroke::new(Self::ORBIT_COLOR, 1.0));

        let body = Paint::radial(
            self.pos,
            0.0,
            self.radius,
            &[(0.0, self.color), (1.0, Color::rgba(0, 0, 0, 0.5))],
        );
        canvas.fill_circle(self.pos, self.radius, &body);

        if self.rings {
            let ring = Ellipse {
                center: self.pos,
                radius_x: self.radius * 1.8,
                radius_y: self.radius * 0.3,
                rotation: 0.0,
            };
            canvas.stroke_ellipse(ring, &Stroke::new(Self::RING_COLOR, 3.0));
        }

        let moon_paint = Paint::Solid(Self::MOON_COLOR);
        for moon in &self.moons {
            canvas.fill_circle(self.pos + moon.offset(), moon.radius, &moon_paint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandBuffer, DrawCommand};
    use approx::assert_abs_diff_eq;

    fn planet(rings: bool, moons: Vec<Moon>) -> Planet {
        Planet::new(10.0, Color::WHITE, 150.0, 0.002, 0.3, rings, moons, Surface::new(800.0, 600.0))
    }

    #[test]
    fn placed_on_orbit_at_construction() {
        let p = planet(false, Vec::new());
        assert_abs_diff_eq!((p.pos - Vec2::new(400.0, 300.0)).mag(), 150.0, epsilon = 1e-3);
    }

    #[test]
    fn moons_advance_independently() {
        let moons = vec![
            Moon { radius: 2.0, orbit_radius: 20.0, orbit_speed: 0.02, angle: 0.0 },
            Moon { radius: 2.0, orbit_radius: 35.0, orbit_speed: 0.05, angle: 1.0 },
        ];
        let mut p = planet(false, moons);
        for _ in 0..10 {
            p.update(Surface::new(800.0, 600.0));
        }
        assert_abs_diff_eq!(p.moons[0].angle, 0.2, epsilon = 1e-5);
        assert_abs_diff_eq!(p.moons[1].angle, 1.5, epsilon = 1e-5);
    }

    #[test]
    fn orbit_follows_resized_surface() {
        let mut p = planet(false, Vec::new());
        p.update(Surface::new(1000.0, 1000.0));
        assert_abs_diff_eq!((p.pos - Vec2::new(500.0, 500.0)).mag(), 150.0, epsilon = 1e-3);
    }

    #[test]
    fn draw_layers_orbit_body_ring_and_moons() {
        let moons = vec![Moon { radius: 2.0, orbit_radius: 20.0, orbit_speed: 0.02, angle: 0.0 }];
        let p = planet(true, moons);
        let mut canvas = CommandBuffer::new();
        p.draw(&mut canvas, Surface::new(800.0, 600.0));

        assert_eq!(canvas.commands.len(), 4);
        assert!(matches!(canvas.commands[0], DrawCommand::StrokeCircle { radius, .. } if radius == 150.0));
        assert!(matches!(canvas.commands[1], DrawCommand::FillCircle { paint: Paint::Radial { .. }, .. }));
        assert!(matches!(canvas.commands[2], DrawCommand::StrokeEllipse { .. }));
        match &canvas.commands[3] {
            DrawCommand::FillCircle { center, .. } => {
                assert_abs_diff_eq!(center.x, p.pos.x + 20.0, epsilon = 1e-4);
                assert_abs_diff_eq!(center.y, p.pos.y, epsilon = 1e-4);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn ringless_planet_skips_ellipse() {
        let p = planet(false, Vec::new());
        let mut canvas = CommandBuffer::new();
        p.draw(&mut canvas, Surface::new(800.0, 600.0));
        assert!(!canvas.commands.iter().any(|c| matches!(c, DrawCommand::StrokeEllipse { .. })));
    }
}
