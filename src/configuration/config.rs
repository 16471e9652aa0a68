//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`] – step size, substep count and finite checking
//! - [`ModelConfig`]  – which force model to run and its parameters
//! - [`ScenarioConfig`] – top-level wrapper used to load a scenario from YAML
//!
//! Every optional field falls back to the matching preset value.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   h: 1.0e-5             # frame step
//!   substeps: 10          # dt = h / substeps
//!   finite_check: strict  # or "permissive" (default)
//!
//! model:
//!   kind: n_body          # or "three_body", "fixed_head_chain"
//!   G: 1.0
//!   softening: 1.0e-5
//!   softening_mode: floor # or "plummer"
//!   bodies:
//!     - x: [ 0.3, 0.5 ]
//!       v: [ 0.0, -1.0 ]
//!       m: 1.0
//!     - x: [ 0.7, 0.5 ]
//!       v: [ 0.0, 1.0 ]
//!       m: 1.0
//!       radius: 4.0
//!       color: 0x00ecff
//! ```

use std::io::Read;

use serde::Deserialize;

use crate::simulation::forces::Softening;
use crate::simulation::params::{FiniteCheck, Parameters};
use crate::simulation::scenario::{BodySpec, ChainScenario, NBodyScenario, Scenario, ThreeBodySetup};
use crate::simulation::states::NVec2;

/// Finite-value policy
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FiniteCheckConfig {
    #[default]
    Permissive, // never inspect, divergence shows up in the output
    Strict, // stop on the first non-finite particle
}

/// How pair distances are softened in the gravity model
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SofteningMode {
    #[default]
    Floor, // max(|d|, eps)
    Plummer, // sqrt(|d|^2 + eps)
}

/// Time-stepping configuration, missing values use the model preset
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    pub h: Option<f64>, // frame step
    pub substeps: Option<u32>, // substeps per frame
    #[serde(default)]
    pub finite_check: FiniteCheckConfig,
}

/// Sun / planet / moon preset
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ThreeBodyConfig {
    pub center: Option<[f64; 2]>,
    pub galaxy_size: Option<f64>,
    pub init_vel: Option<f64>,
    pub sun_mass_factor: Option<f64>,
    #[serde(rename = "G")]
    pub g: Option<f64>,
    pub softening: Option<f64>,
    #[serde(default)]
    pub softening_mode: SofteningMode,
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass
    pub radius: Option<f32>, // drawing radius in pixels
    pub color: Option<u32>, // 0xRRGGBB
}

/// Explicit body list under all-pairs gravity
#[derive(Deserialize, Debug, Clone)]
pub struct NBodyConfig {
    #[serde(rename = "G")]
    pub g: Option<f64>,
    pub softening: Option<f64>,
    #[serde(default)]
    pub softening_mode: SofteningMode,
    pub bodies: Vec<BodyConfig>,
}

/// Fixed-head elastic chain
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ChainConfig {
    pub n: Option<usize>, // segments (particles = n + 1)
    pub anchor: Option<[f64; 2]>,
    pub chain_length: Option<f64>,
    pub total_mass: Option<f64>,
    pub gravity: Option<f64>,
    pub drag: Option<f64>,
    pub min_distance: Option<f64>, // spring distance floor, absent = unprotected
}

#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelConfig {
    ThreeBody(ThreeBodyConfig),
    NBody(NBodyConfig),
    FixedHeadChain(ChainConfig),
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    pub model: ModelConfig,
}

const DEFAULT_G: f64 = 1.0;
const DEFAULT_SOFTENING: f64 = 1e-5;
const DEFAULT_BODY_RADIUS: f32 = 4.0;
const DEFAULT_BODY_COLOR: u32 = 0xffffff;

fn vec2(v: [f64; 2]) -> NVec2 {
    NVec2::new(v[0], v[1])
}

fn softening(mode: SofteningMode, eps: Option<f64>) -> Softening {
    let eps = eps.unwrap_or(DEFAULT_SOFTENING);
    match mode {
        SofteningMode::Floor => Softening::Floor(eps),
        SofteningMode::Plummer => Softening::Plummer(eps),
    }
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_reader(reader)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Map the YAML-facing types onto the runtime scenario and parameters.
    /// Values are not validated here; `SimulationLoop::new` does that.
    pub fn build_scenario(self) -> (Scenario, Parameters) {
        let scenario = match self.model {
            ModelConfig::ThreeBody(c) => {
                let preset = ThreeBodySetup::default();
                let setup = ThreeBodySetup {
                    center: c.center.map(vec2).unwrap_or(preset.center),
                    galaxy_size: c.galaxy_size.unwrap_or(preset.galaxy_size),
                    init_vel: c.init_vel.unwrap_or(preset.init_vel),
                    sun_mass_factor: c.sun_mass_factor.unwrap_or(preset.sun_mass_factor),
                };
                Scenario::NBody(NBodyScenario {
                    g: c.g.unwrap_or(DEFAULT_G),
                    softening: softening(c.softening_mode, c.softening),
                    bodies: setup.bodies(),
                })
            }
            ModelConfig::NBody(c) => Scenario::NBody(NBodyScenario {
                g: c.g.unwrap_or(DEFAULT_G),
                softening: softening(c.softening_mode, c.softening),
                bodies: c
                    .bodies
                    .iter()
                    .map(|bc| BodySpec {
                        x: vec2(bc.x),
                        v: vec2(bc.v),
                        m: bc.m,
                        radius: bc.radius.unwrap_or(DEFAULT_BODY_RADIUS),
                        color: bc.color.unwrap_or(DEFAULT_BODY_COLOR),
                    })
                    .collect(),
            }),
            ModelConfig::FixedHeadChain(c) => {
                let preset = ChainScenario::default();
                Scenario::FixedHeadChain(ChainScenario {
                    n: c.n.unwrap_or(preset.n),
                    anchor: c.anchor.map(vec2).unwrap_or(preset.anchor),
                    chain_length: c.chain_length.unwrap_or(preset.chain_length),
                    total_mass: c.total_mass.unwrap_or(preset.total_mass),
                    gravity: c.gravity.unwrap_or(preset.gravity),
                    drag: c.drag.unwrap_or(preset.drag),
                    min_distance: c.min_distance,
                })
            }
        };

        let preset = scenario.preset_parameters();
        let finite_check = match self.engine.finite_check {
            FiniteCheckConfig::Permissive => FiniteCheck::Permissive,
            FiniteCheckConfig::Strict => FiniteCheck::Strict,
        };
        let parameters = Parameters::new(
            self.engine.h.unwrap_or(preset.h),
            self.engine.substeps.unwrap_or(preset.substeps),
        )
        .with_finite_check(finite_check);

        (scenario, parameters)
    }
}
