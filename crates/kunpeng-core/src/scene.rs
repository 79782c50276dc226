//! Fixed composition: camera, fog, environment, ocean and the two birds.

use glam::Mat4;
use rand::prelude::*;

use crate::analysis::{FrequencyAnalyzer, SpectrumSource};
use crate::camera::{CameraConfig, Fog, OrbitCamera, ViewUniforms};
use crate::environment::{Environment, EnvironmentConfig, SpriteInstance, SpriteUniforms};
use crate::error::FieldError;
use crate::kunpeng::{FieldRole, KunpengConfig, KunpengField, KunpengUniforms, ParticleSet};
use crate::ocean::{OceanConfig, OceanSurface, OceanUniforms};

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub seed: u64,
    pub camera: CameraConfig,
    pub fog: Fog,
    pub environment: EnvironmentConfig,
    pub ocean: OceanConfig,
    pub kunpeng: KunpengConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            camera: CameraConfig::default(),
            fog: Fog::default(),
            environment: EnvironmentConfig::default(),
            ocean: OceanConfig::default(),
            kunpeng: KunpengConfig::default(),
        }
    }
}

/// Everything the renderer needs for one frame, produced in one piece.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub view: ViewUniforms,
    pub stars: SpriteUniforms,
    pub clouds: SpriteUniforms,
    pub cloud_sprites: Vec<SpriteInstance>,
    pub ocean: OceanUniforms,
    pub primary: KunpengUniforms,
    pub reflection: KunpengUniforms,
}

pub struct SceneComposer {
    analyzer: FrequencyAnalyzer,
    camera: OrbitCamera,
    fog: Fog,
    environment: Environment,
    ocean: OceanSurface,
    primary: KunpengField,
    reflection: KunpengField,
}

impl SceneComposer {
    pub fn new(config: SceneConfig) -> Result<Self, FieldError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        // Each bird gets its own silhouette and its own smoothing
        let primary = ParticleSet::generate(config.kunpeng.count, &mut rng);
        let reflection = ParticleSet::generate(config.kunpeng.count, &mut rng);
        Self::with_particles(config, primary, reflection, &mut rng)
    }

    pub fn with_particles(
        config: SceneConfig,
        primary: ParticleSet,
        reflection: ParticleSet,
        rng: &mut impl Rng,
    ) -> Result<Self, FieldError> {
        let primary = KunpengField::new(config.kunpeng.clone(), FieldRole::Primary, primary)?;
        let reflection =
            KunpengField::new(config.kunpeng.clone(), FieldRole::Reflection, reflection)?;
        let environment = Environment::new(config.environment.clone(), rng);
        log::info!(
            "[scene] composed: {} particles x2, {} stars, {} cloud puffs",
            primary.particles().len(),
            environment.stars().len(),
            environment.cloud_sprite_count()
        );
        Ok(Self {
            analyzer: FrequencyAnalyzer::new(),
            camera: OrbitCamera::new(config.camera),
            fog: config.fog,
            environment,
            ocean: OceanSurface::new(config.ocean),
            primary,
            reflection,
        })
    }

    /// One frame: snapshot once, update every component in order, return a
    /// complete uniform set.
    pub fn tick(
        &mut self,
        elapsed: f32,
        dt_sec: f32,
        spectrum: Option<&dyn SpectrumSource>,
        viewport: [f32; 2],
    ) -> FrameOutput {
        self.camera.auto_rotate(dt_sec);
        self.camera
            .set_aspect(viewport[0].max(1.0) as u32, viewport[1].max(1.0) as u32);

        let frame = self.analyzer.snapshot(spectrum);
        let ocean = self.ocean.update(elapsed, frame);
        let primary = self.primary.update(elapsed, frame);
        let reflection = self.reflection.update(elapsed, frame);

        let camera = self.camera.camera();
        FrameOutput {
            view: ViewUniforms::new(&camera, &self.fog, viewport),
            stars: SpriteUniforms {
                model: self.environment.star_model(elapsed).to_cols_array_2d(),
                time: elapsed,
                fog: 0.0,
                twinkle: 1.0,
                _pad: 0.0,
            },
            clouds: SpriteUniforms {
                model: Mat4::IDENTITY.to_cols_array_2d(),
                time: elapsed,
                fog: 1.0,
                twinkle: 0.0,
                _pad: 0.0,
            },
            cloud_sprites: self.environment.cloud_sprites(elapsed),
            ocean,
            primary,
            reflection,
        }
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn ocean(&self) -> &OceanSurface {
        &self.ocean
    }

    pub fn primary(&self) -> &KunpengField {
        &self.primary
    }

    pub fn reflection(&self) -> &KunpengField {
        &self.reflection
    }

    pub fn fog(&self) -> &Fog {
        &self.fog
    }
}
