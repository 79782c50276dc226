mod helpers;
mod ocean;
mod particles;
mod sprites;

use crate::constants::CLEAR_COLOR;
use kunpeng_core::{
    FrameOutput, ParticleSet, SceneComposer, SpriteInstance, SurfaceMesh, ViewUniforms,
};
use ocean::OceanPass;
use particles::ParticlePass;
use sprites::SpritePass;
use web_sys as web;

/// Static geometry copied out of the scene before GPU setup awaits.
pub struct SceneAssets {
    stars: Vec<SpriteInstance>,
    cloud_capacity: usize,
    ocean_mesh: SurfaceMesh,
    primary_particles: ParticleSet,
    reflection_particles: ParticleSet,
}

impl SceneAssets {
    pub fn from_scene(scene: &SceneComposer) -> Self {
        let environment = scene.environment();
        Self {
            stars: environment.stars().to_vec(),
            cloud_capacity: environment.cloud_sprite_count(),
            ocean_mesh: scene.ocean().build_mesh(),
            primary_particles: scene.primary().particles().clone(),
            reflection_particles: scene.reflection().particles().clone(),
        }
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,

    depth_tex: wgpu::Texture,
    depth_view: wgpu::TextureView,
    view: helpers::UniformSlot,

    sprites: SpritePass,
    ocean: OceanPass,
    particles: ParticlePass,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        assets: SceneAssets,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (depth_tex, depth_view) = helpers::create_depth_texture(&device, width, height);
        let view_bgl = helpers::uniform_bgl(&device, "view_bgl");
        let view = helpers::UniformSlot::new::<ViewUniforms>(&device, &view_bgl, "view_uniforms");

        let sprites = SpritePass::new(
            &device,
            format,
            &view_bgl,
            &assets.stars,
            assets.cloud_capacity,
        );
        let ocean = OceanPass::new(&device, format, &view_bgl, &assets.ocean_mesh);
        let particles = ParticlePass::new(
            &device,
            format,
            &view_bgl,
            &assets.primary_particles,
            &assets.reflection_particles,
        );

        log::info!(
            "[render] WebGPU ready: {}x{} {:?}",
            width,
            height,
            format
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            width,
            height,
            depth_tex,
            depth_view,
            view,
            sprites,
            ocean,
            particles,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            let (tex, view) = helpers::create_depth_texture(&self.device, width, height);
            self.depth_tex.destroy();
            self.depth_tex = tex;
            self.depth_view = view;
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload the frame's uniforms and draw, back to front:
    /// stars, clouds, reflection, ocean, primary bird.
    pub fn render(&mut self, out: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        self.view.write(&self.queue, &out.view);
        self.sprites
            .write(&self.queue, &out.stars, &out.clouds, &out.cloud_sprites);
        self.ocean.write(&self.queue, &out.ocean);
        self.particles
            .write(&self.queue, &out.primary, &out.reflection);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.view.bind_group, &[]);
            self.sprites.draw_stars(&mut rpass);
            self.sprites.draw_clouds(&mut rpass);
            self.particles.draw_reflection(&mut rpass);
            self.ocean.draw(&mut rpass);
            self.particles.draw_primary(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
