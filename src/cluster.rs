use crate::{
    canvas::{Canvas, Paint},
    color::Color,
};

use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterStar {
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// Static scatter of point stars around a center.
#[derive(Clone, Debug)]
pub struct StarCluster {
    pub pos: Vec2,
    pub stars: Vec<ClusterStar>,
}

impl StarCluster {
    pub const MIN_STARS: usize = 50;
    pub const MAX_STARS: usize = 150;
    /// Farthest a star sits from the cluster center.
    pub const SPREAD: f32 = 100.0;

    pub fn new(pos: Vec2, stars: Vec<ClusterStar>) -> Self {
        Self { pos, stars }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        for star in &self.stars {
            canvas.fill_circle(star.pos, star.radius, &Paint::Solid(star.color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandBuffer, DrawCommand};

    #[test]
    fn draws_each_star_as_solid_disc() {
        let stars = vec![
            ClusterStar { pos: Vec2::new(10.0, 20.0), radius: 1.5, color: Color::WHITE },
            ClusterStar { pos: Vec2::new(-30.0, 5.0), radius: 0.5, color: Color::rgb(255, 233, 196) },
            ClusterStar { pos: Vec2::new(60.0, -40.0), radius: 2.0, color: Color::rgba(170, 191, 255, 0.8) },
        ];
        let cluster = StarCluster::new(Vec2::zero(), stars.clone());
        let mut canvas = CommandBuffer::new();
        cluster.draw(&mut canvas);

        assert_eq!(canvas.commands.len(), stars.len());
        for (command, star) in canvas.commands.iter().zip(&stars) {
            assert_eq!(
                *command,
                DrawCommand::FillCircle {
                    center: star.pos,
                    radius: star.radius,
                    paint: Paint::Solid(star.color),
                    alpha: 1.0,
                }
            );
        }
    }
}
