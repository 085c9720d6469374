use crate::{
    canvas::{Canvas, Paint, Path, Stroke, Surface},
    color::Color,
};

use ultraviolet::Vec2;

use std::collections::VecDeque;

/// Bouncing head trailed by a fixed-length history of its past positions.
#[derive(Clone, Debug)]
pub struct Comet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tail_length: usize,
    /// Past positions, newest first.
    pub tail: VecDeque<Vec2>,
}

impl Comet {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, tail_length: usize) -> Self {
        Self {
            pos,
            vel,
            radius,
            tail_length,
            tail: VecDeque::with_capacity(tail_length + 1),
        }
    }

    pub fn update(&mut self, surface: Surface) {
        self.pos += self.vel;
        surface.bounce(self.pos, &mut self.vel);

        self.tail.push_front(self.pos);
        self.tail.truncate(self.tail_length);
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        if let Some(&end) = self.tail.back() {
            let path = self
                .tail
                .iter()
                .fold(Path::new().move_to(self.pos), |path, &point| path.line_to(point));
            let fade = Paint::linear(
                self.pos,
                end,
                &[(0.0, Color::WHITE), (1.0, Color::WHITE.with_alpha(0.0))],
            );
            canvas.stroke_path(&path, &Stroke::new(fade, 2.0));
        }

        let head = Paint::radial(
            self.pos,
            0.0,
            self.radius,
            &[(0.0, Color::WHITE), (1.0, Color::rgba(255, 200, 100, 0.8))],
        );
        canvas.fill_circle(self.pos, self.radius, &head);
    }
}
