//! Scenario definitions: immutable parameters plus closed-form initial state
//!
//! A [`Scenario`] knows how to
//! - validate its parameters (before any step runs),
//! - produce the initial particle set (re-used verbatim by `reset`),
//! - build its force model (`AccelSet`),
//! - describe per-particle radius/colour for whatever host draws it.
//!
//! Two presets reproduce the classic demos: a sun/planet/moon three-body
//! system and a 200-segment rope hanging from a fixed head.

use crate::error::ConfigError;
use crate::simulation::forces::{AccelSet, FixedHeadChain, NBodyGravity, Softening};
use crate::simulation::params::Parameters;
use crate::simulation::states::{NVec2, Particle, ParticleState};

/// Rendering metadata, the only thing the core tells a host about looks
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub radii: Vec<f32>, // per-particle radius in screen pixels
    pub colors: Vec<u32>, // per-particle 0xRRGGBB
    pub links: Option<u32>, // colour of segments between consecutive particles
}

/// One gravitating body
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub x: NVec2,
    pub v: NVec2,
    pub m: f64,
    pub radius: f32,
    pub color: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NBodyScenario {
    pub g: f64, // gravitational constant
    pub softening: Softening,
    pub bodies: Vec<BodySpec>,
}

/// Closed-form sun / planet / moon layout
#[derive(Debug, Clone, PartialEq)]
pub struct ThreeBodySetup {
    pub center: NVec2,
    pub galaxy_size: f64,
    pub init_vel: f64,
    pub sun_mass_factor: f64, // sun mass relative to the planet
}

impl Default for ThreeBodySetup {
    fn default() -> Self {
        Self {
            center: NVec2::new(0.5, 0.5),
            galaxy_size: 0.4,
            init_vel: 100.0,
            sun_mass_factor: 10.0,
        }
    }
}

impl ThreeBodySetup {
    pub fn bodies(&self) -> Vec<BodySpec> {
        let k = self.sun_mass_factor;
        let v = self.init_vel;

        // Sun drifts slightly so the whole system stays on screen
        let sun_v = NVec2::new(-v * 0.3 * 0.2 / k, -v * 0.4 * 0.85 / k);
        let planet_v = NVec2::new(0.0, v * 0.4);
        let moon_v = planet_v + NVec2::new(v * 0.8, 0.0);

        let sun_x = self.center;
        let planet_x = sun_x + NVec2::new(0.8 * self.galaxy_size, 0.0);
        let moon_x = planet_x + NVec2::new(0.0, (0.8 / 20.0) * self.galaxy_size);

        vec![
            BodySpec { x: sun_x, v: sun_v, m: k * 81.0, radius: 54.0, color: 0xea5a3e },
            BodySpec { x: planet_x, v: planet_v, m: 81.0, radius: 6.0, color: 0x00ecff },
            BodySpec { x: moon_x, v: moon_v, m: 1.0, radius: 2.0, color: 0xffffff },
        ]
    }
}

/// Rope of `n` segments hanging from a fixed anchor
#[derive(Debug, Clone, PartialEq)]
pub struct ChainScenario {
    pub n: usize, // segments, so n + 1 particles including the anchor
    pub anchor: NVec2,
    pub chain_length: f64,
    pub total_mass: f64,
    pub gravity: f64, // downward acceleration
    pub drag: f64, // quadratic drag coefficient
    pub min_distance: Option<f64>, // spring distance floor, None = unprotected
}

impl Default for ChainScenario {
    fn default() -> Self {
        Self {
            n: 200,
            anchor: NVec2::new(0.5, 0.8),
            chain_length: 0.4,
            total_mass: 100.0,
            gravity: 0.001,
            drag: 0.001,
            min_distance: None,
        }
    }
}

impl ChainScenario {
    /// Uniform particle mass, `total_mass / n^2`
    pub fn particle_mass(&self) -> f64 {
        self.total_mass / (self.n as f64 * self.n as f64)
    }

    /// Rest length of one segment, `chain_length / n`
    pub fn rest_length(&self) -> f64 {
        self.chain_length / self.n as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    NBody(NBodyScenario),
    FixedHeadChain(ChainScenario),
}

impl Scenario {
    /// Sun, planet and moon with G = 1 and a 1e-5 distance floor
    pub fn three_body() -> Self {
        Scenario::NBody(NBodyScenario {
            g: 1.0,
            softening: Softening::Floor(1e-5),
            bodies: ThreeBodySetup::default().bodies(),
        })
    }

    /// 200-segment rope anchored at (0.5, 0.8)
    pub fn elastic_rope() -> Self {
        Scenario::FixedHeadChain(ChainScenario::default())
    }

    /// Step settings the presets were tuned for
    pub fn preset_parameters(&self) -> Parameters {
        match self {
            Scenario::NBody(_) => Parameters::new(1e-5, 10),
            Scenario::FixedHeadChain(_) => Parameters::new(1e-1, 10),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::NBody(_) => "n-body gravity",
            Scenario::FixedHeadChain(_) => "fixed-head chain",
        }
    }

    /// Number of particles, anchor included
    pub fn particle_count(&self) -> usize {
        match self {
            Scenario::NBody(s) => s.bodies.len(),
            Scenario::FixedHeadChain(c) => c.n + 1,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Scenario::NBody(s) => {
                if s.bodies.is_empty() {
                    return Err(ConfigError::NoParticles);
                }
                for (index, b) in s.bodies.iter().enumerate() {
                    if !(b.m > 0.0 && b.m.is_finite()) {
                        return Err(ConfigError::InvalidMass { index, mass: b.m });
                    }
                }
                check_finite("g", s.g)?;
                check_positive("softening", s.softening.epsilon())?;
            }
            Scenario::FixedHeadChain(c) => {
                if c.n == 0 {
                    return Err(ConfigError::NoParticles);
                }
                check_positive("total_mass", c.total_mass)?;
                check_positive("chain_length", c.chain_length)?;
                check_finite("gravity", c.gravity)?;
                if !(c.drag >= 0.0 && c.drag.is_finite()) {
                    return Err(ConfigError::InvalidParameter { name: "drag", value: c.drag });
                }
                if let Some(d) = c.min_distance {
                    check_positive("min_distance", d)?;
                }
            }
        }
        Ok(())
    }

    pub fn initial_particles(&self) -> Vec<Particle> {
        match self {
            Scenario::NBody(s) => s.bodies.iter().map(|b| Particle::new(b.x, b.v, b.m)).collect(),
            Scenario::FixedHeadChain(c) => {
                let m = c.particle_mass();
                (0..=c.n)
                    .map(|i| {
                        let x = NVec2::new(c.anchor.x + i as f64 * c.chain_length / c.n as f64, c.anchor.y);
                        if i == 0 {
                            Particle::anchor(c.anchor, m)
                        } else {
                            Particle::new(x, NVec2::zeros(), m)
                        }
                    })
                    .collect()
            }
        }
    }

    pub fn initial_state(&self) -> ParticleState {
        ParticleState::from_particles(&self.initial_particles())
    }

    pub fn force_model(&self) -> AccelSet {
        match self {
            Scenario::NBody(s) => AccelSet::new().with(NBodyGravity {
                g: s.g,
                softening: s.softening,
            }),
            Scenario::FixedHeadChain(c) => AccelSet::new().with(FixedHeadChain {
                gravity: c.gravity,
                rest_length: c.rest_length(),
                drag: c.drag,
                min_distance: c.min_distance,
            }),
        }
    }

    pub fn appearance(&self) -> Appearance {
        match self {
            Scenario::NBody(s) => Appearance {
                radii: s.bodies.iter().map(|b| b.radius).collect(),
                colors: s.bodies.iter().map(|b| b.color).collect(),
                links: None,
            },
            Scenario::FixedHeadChain(c) => Appearance {
                radii: vec![2.0; c.n + 1],
                colors: vec![0xffffff; c.n + 1],
                links: Some(0xff66cc),
            },
        }
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
