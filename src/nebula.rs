use crate::{
    canvas::{Canvas, Paint, Path},
    color::Color,
    vector::VectorExt,
};

use ultraviolet::Vec2;

use std::f32::consts::TAU;

/// Soft translucent cloud. Its outline is fixed at construction.
#[derive(Clone, Debug)]
pub struct Nebula {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub outline: Vec<Vec2>,
}

impl Nebula {
    pub const OUTLINE_POINTS: usize = 10;

    /// Builds the outline from per-point distance factors, one per
    /// evenly spaced angle around `pos`.
    pub fn new(pos: Vec2, radius: f32, color: Color, jitter: impl IntoIterator<Item = f32>) -> Self {
        let outline = jitter
            .into_iter()
            .take(Self::OUTLINE_POINTS)
            .enumerate()
            .map(|(i, factor)| {
                let angle = i as f32 / Self::OUTLINE_POINTS as f32 * TAU;
                pos + Vec2::from_angle(angle) * (radius * factor)
            })
            .collect();

        Self {
            pos,
            radius,
            color,
            outline,
        }
    }

    /// Closed blob smoothed through the outline midpoints.
    pub fn path(&self) -> Path {
        let Some(&first) = self.outline.first() else {
            return Path::new();
        };
        self.outline
            .windows(2)
            .fold(Path::new().move_to(first), |path, pair| {
                path.quad_to(pair[0], (pair[0] + pair[1]) * 0.5)
            })
            .close()
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let glow = Paint::radial(
            self.pos,
            0.0,
            self.radius,
            &[(0.0, self.color), (1.0, Color::TRANSPARENT)],
        );
        canvas.fill_path(&self.path(), &glow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PathSegment;
    use approx::assert_abs_diff_eq;

    #[test]
    fn outline_respects_jitter() {
        let nebula = Nebula::new(Vec2::new(100.0, 100.0), 200.0, Color::WHITE, [0.8, 1.2].into_iter().cycle());
        assert_eq!(nebula.outline.len(), Nebula::OUTLINE_POINTS);
        for (i, point) in nebula.outline.iter().enumerate() {
            let expected = if i % 2 == 0 { 160.0 } else { 240.0 };
            assert_abs_diff_eq!((*point - nebula.pos).mag(), expected, epsilon = 1e-3);
        }
    }

    #[test]
    fn path_is_closed_quadratic_blob() {
        let nebula = Nebula::new(Vec2::zero(), 150.0, Color::WHITE, std::iter::repeat(1.0));
        let path = nebula.path();
        assert!(path.is_closed());
        assert_eq!(path.segments.len(), 1 + (Nebula::OUTLINE_POINTS - 1) + 1);
        assert!(matches!(path.segments[1], PathSegment::QuadTo { .. }));
    }
}
