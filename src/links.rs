//! Particle-link background.
//!
//! Dots drift across the surface and wrap at the edges. The pointer pushes
//! them away and clicks add new ones. Any two dots closer than the link
//! distance are joined by a line that fades with distance.

use crate::{
    canvas::{Canvas, Paint, Path, Stroke, Surface},
    config::LinkFieldConfig,
    driver::Scene,
    error::{ConfigError, ConfigResult},
    utils,
};

use broccoli::aabb::Rect;
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkDot {
    pub pos: Vec2,
    /// Direction scaled to `[-0.5, 0.5)` per axis; multiplied by half the
    /// configured speed each frame.
    pub vel: Vec2,
    pub radius: f32,
}

/// Line between dots `a` and `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

#[derive(Debug)]
pub struct LinkField {
    pub config: LinkFieldConfig,
    pub surface: Surface,
    pub pointer: Option<Vec2>,
    pub dots: Vec<LinkDot>,
    /// Links found during the last update.
    pub links: Vec<Link>,
    rng: fastrand::Rng,
}

impl LinkField {
    /// Pointer repulsion speed at zero distance, before clamping.
    const REPULSE_VELOCITY: f32 = 100.0;
    /// Largest displacement a single frame of repulsion applies.
    const MAX_REPULSE_STEP: f32 = 50.0;

    pub fn new(config: LinkFieldConfig, surface: Surface, seed: u64) -> ConfigResult<Self> {
        config.validate()?;
        if !surface.is_valid() {
            return Err(ConfigError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }

        let mut field = Self {
            config,
            surface,
            pointer: None,
            dots: Vec::new(),
            links: Vec::new(),
            rng: fastrand::Rng::with_seed(seed),
        };
        let count = field.target_count();
        for _ in 0..count {
            let pos = utils::point_in(&mut field.rng, surface);
            field.spawn(pos);
        }
        field.find_links();
        log::debug!("link field populated with {} dots", field.dots.len());
        Ok(field)
    }

    /// Dots for the current surface, scaled by area when density is on.
    pub fn target_count(&self) -> usize {
        if !self.config.density {
            return self.config.count;
        }
        let area = self.surface.width * self.surface.height / 1000.0;
        (area * self.config.count as f32 / self.config.density_area).round() as usize
    }

    fn spawn(&mut self, pos: Vec2) {
        let vel = Vec2::new(self.rng.f32() - 0.5, self.rng.f32() - 0.5);
        // Never zero, so every dot stays visible.
        let radius = (1.0 - self.rng.f32()) * self.config.size;
        self.dots.push(LinkDot { pos, vel, radius });
    }

    /// Click handler: adds `push_count` dots at `pos`.
    pub fn push(&mut self, pos: Vec2) {
        for _ in 0..self.config.push_count {
            self.spawn(pos);
        }
    }

    pub fn set_pointer(&mut self, pointer: Option<Vec2>) {
        self.pointer = pointer;
    }

    /// Applies a new surface size. In density mode the dot count follows
    /// the new area: missing dots spawn at random spots, extras are dropped
    /// from the end (newest first, so pushed dots go before the originals).
    pub fn resize(&mut self, surface: Surface) {
        log::info!("link field resized to {}x{}", surface.width, surface.height);
        self.surface = surface;
        if self.config.density {
            self.fit_density();
        }
    }

    fn fit_density(&mut self) {
        let target = self.target_count();
        if self.dots.len() > target {
            self.dots.truncate(target);
        } else {
            while self.dots.len() < target {
                let pos = utils::point_in(&mut self.rng, self.surface);
                self.spawn(pos);
            }
        }
        self.find_links();
        log::debug!("link field holds {} dots after resize", self.dots.len());
    }

    /// Moves, wraps, then applies pointer repulsion. Repulsion runs after the
    /// wrap, so a dot near an edge can end a frame up to `MAX_REPULSE_STEP`
    /// past it; the next update wraps it to the opposite side.
    pub fn update(&mut self) {
        let step = self.config.speed * 0.5;

        for i in 0..self.dots.len() {
            let mut dot = self.dots[i];
            dot.pos += dot.vel * step;
            self.wrap(&mut dot);

            if let Some(pointer) = self.pointer {
                dot.pos += self.repulsion(dot.pos, pointer);
            }
            self.dots[i] = dot;
        }

        self.find_links();
    }

    /// Re-enters a dot that fully left one side at the opposite side, at a
    /// random spot along the other axis.
    fn wrap(&mut self, dot: &mut LinkDot) {
        let (w, h, r) = (self.surface.width, self.surface.height, dot.radius);
        if dot.pos.x - r > w {
            dot.pos.x = -r;
            dot.pos.y = self.rng.f32() * h;
        } else if dot.pos.x + r < 0.0 {
            dot.pos.x = w + r;
            dot.pos.y = self.rng.f32() * h;
        }
        if dot.pos.y - r > h {
            dot.pos.y = -r;
            dot.pos.x = self.rng.f32() * w;
        } else if dot.pos.y + r < 0.0 {
            dot.pos.y = h + r;
            dot.pos.x = self.rng.f32() * w;
        }
    }

    /// Displacement pushing `pos` away from the pointer, strongest up close.
    fn repulsion(&self, pos: Vec2, pointer: Vec2) -> Vec2 {
        let away = pos - pointer;
        let dist = away.mag();
        let reach = self.config.repulse_distance;
        if dist == 0.0 || dist > reach {
            return Vec2::zero();
        }
        let falloff = 1.0 - (dist / reach) * (dist / reach);
        let factor = (falloff * Self::REPULSE_VELOCITY).clamp(0.0, Self::MAX_REPULSE_STEP);
        away / dist * factor
    }

    /// Broad phase with `broccoli` over boxes half the link distance wide,
    /// then an exact distance check per candidate pair.
    fn find_links(&mut self) {
        self.links.clear();
        let reach = self.config.link_distance;
        let half = Vec2::broadcast(reach * 0.5);

        let mut rects = self
            .dots
            .iter()
            .enumerate()
            .map(|(index, dot)| {
                let min = dot.pos - half;
                let max = dot.pos + half;
                (Rect::new(min.x, max.x, min.y, max.y), index)
            })
            .collect::<Vec<_>>();

        let mut tree = broccoli::Tree::new(&mut rects);
        let dots = &self.dots;
        let links = &mut self.links;
        let opacity = self.config.link_opacity;

        tree.find_colliding_pairs(|i, j| {
            let i = *i.unpack_inner();
            let j = *j.unpack_inner();

            let dist = (dots[i].pos - dots[j].pos).mag();
            if dist < reach {
                let (a, b) = if i < j { (i, j) } else { (j, i) };
                links.push(Link {
                    a,
                    b,
                    opacity: opacity * (1.0 - dist / reach),
                });
            }
        });

        self.links.sort_unstable_by_key(|link| (link.a, link.b));
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        let color = self.config.color;

        for link in &self.links {
            let path = Path::new()
                .move_to(self.dots[link.a].pos)
                .line_to(self.dots[link.b].pos);
            let stroke = Stroke::new(color.with_alpha(link.opacity), self.config.link_width);
            canvas.stroke_path(&path, &stroke);
        }

        let paint = Paint::Solid(color.with_alpha(self.config.opacity));
        for dot in &self.dots {
            canvas.fill_circle(dot.pos, dot.radius, &paint);
        }
    }
}

impl Scene for LinkField {
    fn update(&mut self) {
        LinkField::update(self);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        LinkField::draw(self, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{CommandBuffer, DrawCommand};
    use approx::assert_abs_diff_eq;

    fn field(config: LinkFieldConfig) -> LinkField {
        LinkField::new(config, Surface::new(1000.0, 800.0), 9).unwrap()
    }

    fn brute_force_pairs(field: &LinkField) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for a in 0..field.dots.len() {
            for b in a + 1..field.dots.len() {
                if (field.dots[a].pos - field.dots[b].pos).mag() < field.config.link_distance {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    #[test]
    fn count_scales_with_area() {
        let f = field(LinkFieldConfig::default());
        assert_eq!(f.dots.len(), 100);

        let fixed = field(LinkFieldConfig {
            density: false,
            count: 30,
            ..LinkFieldConfig::default()
        });
        assert_eq!(fixed.dots.len(), 30);
    }

    #[test]
    fn links_match_brute_force() {
        let mut f = field(LinkFieldConfig::default());
        for _ in 0..5 {
            let found: Vec<(usize, usize)> = f.links.iter().map(|l| (l.a, l.b)).collect();
            assert_eq!(found, brute_force_pairs(&f));
            f.update();
        }
    }

    #[test]
    fn link_opacity_fades_with_distance() {
        let mut f = field(LinkFieldConfig {
            density: false,
            count: 0,
            ..LinkFieldConfig::default()
        });
        f.dots = vec![
            LinkDot { pos: Vec2::new(100.0, 100.0), vel: Vec2::zero(), radius: 1.0 },
            LinkDot { pos: Vec2::new(175.0, 100.0), vel: Vec2::zero(), radius: 1.0 },
            LinkDot { pos: Vec2::new(400.0, 100.0), vel: Vec2::zero(), radius: 1.0 },
        ];
        f.update();
        assert_eq!(f.links.len(), 1);
        assert_eq!((f.links[0].a, f.links[0].b), (0, 1));
        assert_abs_diff_eq!(f.links[0].opacity, 0.2, epsilon = 1e-5);
    }

    #[test]
    fn dots_wrap_around_edges() {
        let mut f = field(LinkFieldConfig {
            density: false,
            count: 0,
            ..LinkFieldConfig::default()
        });
        f.dots = vec![LinkDot { pos: Vec2::new(1000.5, 400.0), vel: Vec2::new(0.5, 0.0), radius: 1.0 }];
        f.update();
        assert_eq!(f.dots[0].pos.x, -1.0);
        assert!((0.0..800.0).contains(&f.dots[0].pos.y));
    }

    #[test]
    fn pointer_repels_nearby_dots() {
        let mut f = field(LinkFieldConfig {
            density: false,
            count: 0,
            speed: 1e-6,
            ..LinkFieldConfig::default()
        });
        f.dots = vec![LinkDot { pos: Vec2::new(500.0, 400.0), vel: Vec2::zero(), radius: 1.0 }];
        f.set_pointer(Some(Vec2::new(400.0, 400.0)));
        f.update();
        // (1 - (100/200)^2) * 100 = 75, clamped to 50
        assert_abs_diff_eq!(f.dots[0].pos.x, 550.0, epsilon = 1e-3);
    }

    #[test]
    fn resize_follows_area_in_density_mode() {
        let mut f = field(LinkFieldConfig::default());
        assert_eq!(f.dots.len(), 100);

        f.resize(Surface::new(2000.0, 1600.0));
        assert_eq!(f.dots.len(), 400);
        assert_eq!(f.dots.len(), f.target_count());
        assert!(f.dots.iter().all(|d| (0.0..2000.0).contains(&d.pos.x) && (0.0..1600.0).contains(&d.pos.y)));

        f.push(Vec2::new(10.0, 10.0));
        f.resize(Surface::new(500.0, 400.0));
        assert_eq!(f.dots.len(), 25);
        let found: Vec<(usize, usize)> = f.links.iter().map(|l| (l.a, l.b)).collect();
        assert_eq!(found, brute_force_pairs(&f));
    }

    #[test]
    fn resize_keeps_fixed_count() {
        let mut f = field(LinkFieldConfig {
            density: false,
            count: 30,
            ..LinkFieldConfig::default()
        });
        f.resize(Surface::new(3000.0, 3000.0));
        assert_eq!(f.dots.len(), 30);
    }

    #[test]
    fn dots_stay_within_wrapped_bounds_without_pointer() {
        let mut f = field(LinkFieldConfig::default());
        let (w, h) = (f.surface.width, f.surface.height);
        for _ in 0..500 {
            f.update();
            for d in &f.dots {
                assert!(d.pos.x >= -d.radius && d.pos.x <= w + d.radius);
                assert!(d.pos.y >= -d.radius && d.pos.y <= h + d.radius);
            }
        }
    }

    #[test]
    fn repulsion_overshoot_wraps_on_next_update() {
        let mut f = field(LinkFieldConfig {
            density: false,
            count: 0,
            ..LinkFieldConfig::default()
        });
        f.dots = vec![LinkDot { pos: Vec2::new(1.0, 400.0), vel: Vec2::zero(), radius: 1.0 }];
        f.set_pointer(Some(Vec2::new(10.0, 400.0)));
        f.update();
        let x = f.dots[0].pos.x;
        assert!(x < -1.0);
        assert!(x >= -1.0 - LinkField::MAX_REPULSE_STEP);

        f.set_pointer(None);
        f.update();
        assert_eq!(f.dots[0].pos.x, 1001.0);
        assert!((0.0..800.0).contains(&f.dots[0].pos.y));
    }

    #[test]
    fn click_pushes_dots() {
        let mut f = field(LinkFieldConfig::default());
        let before = f.dots.len();
        f.push(Vec2::new(10.0, 10.0));
        assert_eq!(f.dots.len(), before + 4);
        assert!(f.dots[before..].iter().all(|d| d.pos == Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn draws_links_below_dots() {
        let f = field(LinkFieldConfig::default());
        let mut canvas = CommandBuffer::new();
        f.draw(&mut canvas);
        let first_dot = canvas
            .commands
            .iter()
            .position(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .unwrap();
        assert_eq!(first_dot, f.links.len());
        assert_eq!(canvas.commands.len(), f.links.len() + f.dots.len());
    }
}
