use super::helpers::{
    make_scene_pipeline, quad_corner_buffer, uniform_bgl, PipelineDesc, UniformSlot,
    ADDITIVE_BLEND, QUAD_CORNER_LAYOUT,
};
use kunpeng_core::{SpriteInstance, SpriteUniforms};
use wgpu::util::DeviceExt;

/// Stars (static instances, additive) and clouds (rewritten every frame, alpha).
pub(crate) struct SpritePass {
    star_pipeline: wgpu::RenderPipeline,
    cloud_pipeline: wgpu::RenderPipeline,
    corners: wgpu::Buffer,
    star_instances: wgpu::Buffer,
    star_count: u32,
    cloud_instances: wgpu::Buffer,
    cloud_capacity: u32,
    cloud_count: u32,
    stars: UniformSlot,
    clouds: UniformSlot,
}

impl SpritePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        view_bgl: &wgpu::BindGroupLayout,
        stars: &[SpriteInstance],
        cloud_capacity: usize,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sprites_shader"),
            source: wgpu::ShaderSource::Wgsl(kunpeng_core::SPRITES_WGSL.into()),
        });
        let bgl = uniform_bgl(device, "sprites_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sprites_pl"),
            bind_group_layouts: &[view_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                1 => Float32x3,
                2 => Float32,
                3 => Float32x4
            ],
        };
        let buffers = [QUAD_CORNER_LAYOUT, instance_layout];
        let star_pipeline = make_scene_pipeline(
            device,
            PipelineDesc {
                label: "stars_pipeline",
                shader: &shader,
                layout: &pl,
                buffers: &buffers,
                color_format,
                blend: ADDITIVE_BLEND,
                depth_write: false,
            },
        );
        let cloud_pipeline = make_scene_pipeline(
            device,
            PipelineDesc {
                label: "clouds_pipeline",
                shader: &shader,
                layout: &pl,
                buffers: &buffers,
                color_format,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: false,
            },
        );
        let star_instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("star_instances"),
            contents: bytemuck::cast_slice(stars),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let cloud_capacity = cloud_capacity.max(1);
        let cloud_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cloud_instances"),
            size: (cloud_capacity * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            star_pipeline,
            cloud_pipeline,
            corners: quad_corner_buffer(device),
            star_instances,
            star_count: stars.len() as u32,
            cloud_instances,
            cloud_capacity: cloud_capacity as u32,
            cloud_count: 0,
            stars: UniformSlot::new::<SpriteUniforms>(device, &bgl, "star_uniforms"),
            clouds: UniformSlot::new::<SpriteUniforms>(device, &bgl, "cloud_uniforms"),
        }
    }

    pub(crate) fn write(
        &mut self,
        queue: &wgpu::Queue,
        stars: &SpriteUniforms,
        clouds: &SpriteUniforms,
        cloud_sprites: &[SpriteInstance],
    ) {
        self.stars.write(queue, stars);
        self.clouds.write(queue, clouds);
        let n = cloud_sprites.len().min(self.cloud_capacity as usize);
        if n > 0 {
            queue.write_buffer(
                &self.cloud_instances,
                0,
                bytemuck::cast_slice(&cloud_sprites[..n]),
            );
        }
        self.cloud_count = n as u32;
    }

    pub(crate) fn draw_stars<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_pipeline(&self.star_pipeline);
        rpass.set_bind_group(1, &self.stars.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.corners.slice(..));
        rpass.set_vertex_buffer(1, self.star_instances.slice(..));
        rpass.draw(0..6, 0..self.star_count);
    }

    pub(crate) fn draw_clouds<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        if self.cloud_count == 0 {
            return;
        }
        rpass.set_pipeline(&self.cloud_pipeline);
        rpass.set_bind_group(1, &self.clouds.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.corners.slice(..));
        rpass.set_vertex_buffer(1, self.cloud_instances.slice(..));
        rpass.draw(0..6, 0..self.cloud_count);
    }
}
