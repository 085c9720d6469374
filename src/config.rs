//! Tunable constants for the space scene and the link field.
//!
//! Defaults reproduce the stock look. Both configs can be loaded from YAML,
//! with missing keys falling back to their defaults:
//!
//! ```yaml
//! star_count: 500
//! max_particles: 800
//! palette:
//!   stars: ["#ffffff", "#d4fbff"]
//! ```

use crate::{
    color::Color,
    error::{ConfigError, ConfigResult},
};

use serde::{Deserialize, Serialize};

/// Colors entities draw from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub stars: Vec<Color>,
    /// Indexed by planet number, cycled when there are more planets than colors.
    pub planets: Vec<Color>,
    pub nebulas: Vec<Color>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            stars: vec![
                Color::rgb(0xff, 0xff, 0xff),
                Color::rgb(0xff, 0xe9, 0xc4),
                Color::rgb(0xd4, 0xfb, 0xff),
                Color::rgb(0xff, 0xd7, 0x00),
                Color::rgb(0xff, 0x8c, 0x00),
            ],
            planets: vec![
                Color::rgb(0xff, 0x6b, 0x6b),
                Color::rgb(0x4e, 0xcd, 0xc4),
                Color::rgb(0x45, 0xb7, 0xd1),
                Color::rgb(0xff, 0xa0, 0x7a),
                Color::rgb(0x9b, 0x59, 0xb6),
                Color::rgb(0x1a, 0xbc, 0x9c),
                Color::rgb(0xf3, 0x9c, 0x12),
                Color::rgb(0x7f, 0x8c, 0x8d),
            ],
            nebulas: vec![
                Color::rgba(255, 0, 255, 0.1),
                Color::rgba(0, 255, 255, 0.1),
                Color::rgba(255, 255, 0, 0.1),
                Color::rgba(0, 255, 0, 0.1),
                Color::rgba(255, 165, 0, 0.1),
            ],
        }
    }
}

/// Space scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Background stars (infinite lifespan).
    pub star_count: usize,
    /// Background asteroids (infinite lifespan).
    pub asteroid_count: usize,
    pub planet_count: usize,
    /// Particle cap enforced on insertion.
    pub max_particles: usize,
    pub nebula_count: usize,
    pub black_hole_count: usize,
    pub comet_count: usize,
    pub star_cluster_count: usize,
    /// Pointer distance under which particles get pushed away.
    pub interaction_radius: f32,
    /// Frames a click-spawned particle lives.
    pub particle_lifespan: u32,
    /// Per-frame impulse away from the pointer.
    pub repulsion: f32,
    /// Per-frame impulse toward a black hole inside its event horizon.
    pub attraction: f32,
    pub event_horizon: f32,
    pub black_hole_radius: f32,
    /// Accretion disk rotation per frame, in radians.
    pub black_hole_spin: f32,
    pub comet_tail_length: usize,
    pub palette: Palette,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            star_count: 300,
            asteroid_count: 50,
            planet_count: 8,
            max_particles: 500,
            nebula_count: 5,
            black_hole_count: 1,
            comet_count: 3,
            star_cluster_count: 2,
            interaction_radius: 200.0,
            particle_lifespan: 300,
            repulsion: 0.5,
            attraction: 0.1,
            event_horizon: 100.0,
            black_hole_radius: 20.0,
            black_hole_spin: 0.05,
            comet_tail_length: 50,
            palette: Palette::default(),
        }
    }
}

impl SimConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.particle_lifespan == 0 {
            return Err(ConfigError::ZeroLifespan);
        }
        if self.comet_count > 0 && self.comet_tail_length == 0 {
            return Err(ConfigError::ZeroTailLength);
        }

        positive("interaction_radius", self.interaction_radius)?;
        positive("repulsion", self.repulsion)?;
        positive("attraction", self.attraction)?;
        positive("event_horizon", self.event_horizon)?;
        positive("black_hole_radius", self.black_hole_radius)?;
        if !self.black_hole_spin.is_finite() {
            return Err(ConfigError::NonPositive {
                name: "black_hole_spin",
                value: self.black_hole_spin,
            });
        }

        let needs_stars = self.star_count + self.star_cluster_count > 0 || self.max_particles > 0;
        if needs_stars && self.palette.stars.is_empty() {
            return Err(ConfigError::EmptyPalette("stars"));
        }
        if self.planet_count > 0 && self.palette.planets.is_empty() {
            return Err(ConfigError::EmptyPalette("planets"));
        }
        if self.nebula_count > 0 && self.palette.nebulas.is_empty() {
            return Err(ConfigError::EmptyPalette("nebulas"));
        }

        Ok(())
    }
}

/// Particle-link background configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkFieldConfig {
    /// Dot count, or dots per `density_area` when `density` is on.
    pub count: usize,
    pub density: bool,
    /// Thousands of square pixels that hold `count` dots.
    pub density_area: f32,
    pub color: Color,
    pub opacity: f32,
    /// Upper bound of the random dot radius.
    pub size: f32,
    pub speed: f32,
    pub link_distance: f32,
    pub link_opacity: f32,
    pub link_width: f32,
    pub repulse_distance: f32,
    /// Dots added per click.
    pub push_count: usize,
}

impl Default for LinkFieldConfig {
    fn default() -> Self {
        Self {
            count: 100,
            density: true,
            density_area: 800.0,
            color: Color::WHITE,
            opacity: 0.5,
            size: 3.0,
            speed: 6.0,
            link_distance: 150.0,
            link_opacity: 0.4,
            link_width: 1.0,
            repulse_distance: 200.0,
            push_count: 4,
        }
    }
}

impl LinkFieldConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.density {
            positive("density_area", self.density_area)?;
        }
        positive("size", self.size)?;
        positive("speed", self.speed)?;
        positive("link_distance", self.link_distance)?;
        positive("link_width", self.link_width)?;
        positive("repulse_distance", self.repulse_distance)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SimConfig::default().validate().unwrap();
        LinkFieldConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SimConfig::from_yaml_str("star_count: 10\nmax_particles: 20\n").unwrap();
        assert_eq!(config.star_count, 10);
        assert_eq!(config.max_particles, 20);
        assert_eq!(config.asteroid_count, 50);
        assert_eq!(config.palette, Palette::default());
    }

    #[test]
    fn palette_reads_hex_strings() {
        let yaml = "palette:\n  stars: [\"#ffffff\", \"#00ff0080\"]\n";
        let config = SimConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.palette.stars.len(), 2);
        assert_eq!(config.palette.stars[1].g, 255);
        assert!(config.palette.stars[1].a < 1.0);
    }

    #[test]
    fn default_config_survives_yaml() {
        let yaml = serde_yaml::to_string(&LinkFieldConfig::default()).unwrap();
        let back = LinkFieldConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(back, LinkFieldConfig::default());
    }

    #[test]
    fn rejects_bad_values() {
        let config = SimConfig {
            particle_lifespan: 0,
            ..SimConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroLifespan)));

        let config = SimConfig {
            interaction_radius: -1.0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "interaction_radius", .. })
        ));

        let mut config = SimConfig::default();
        config.palette.planets.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette("planets"))));
    }

    #[test]
    fn rejects_malformed_yaml() {
        assert!(matches!(
            SimConfig::from_yaml_str("palette:\n  stars: [\"nope\"]\n"),
            Err(ConfigError::Parse(_))
        ));
    }
}
