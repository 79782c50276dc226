use super::helpers::{
    make_scene_pipeline, quad_corner_buffer, uniform_bgl, PipelineDesc, UniformSlot,
    ADDITIVE_BLEND, QUAD_CORNER_LAYOUT,
};
use kunpeng_core::{KunpengUniforms, ParticleInstance, ParticleSet};
use wgpu::util::DeviceExt;

/// Immutable instances plus the per-frame uniform block of one bird.
struct FieldBuffers {
    instances: wgpu::Buffer,
    instance_count: u32,
    uniforms: UniformSlot,
}

impl FieldBuffers {
    fn new(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
        particles: &ParticleSet,
        label: &str,
    ) -> Self {
        let data = particles.instances();
        let instances = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&data),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            instances,
            instance_count: data.len() as u32,
            uniforms: UniformSlot::new::<KunpengUniforms>(device, bgl, label),
        }
    }
}

/// Both birds share a pipeline; each field has its own buffers.
pub(crate) struct ParticlePass {
    pipeline: wgpu::RenderPipeline,
    corners: wgpu::Buffer,
    primary: FieldBuffers,
    reflection: FieldBuffers,
}

impl ParticlePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        view_bgl: &wgpu::BindGroupLayout,
        primary: &ParticleSet,
        reflection: &ParticleSet,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("kunpeng_shader"),
            source: wgpu::ShaderSource::Wgsl(kunpeng_core::KUNPENG_WGSL.into()),
        });
        let bgl = uniform_bgl(device, "kunpeng_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("kunpeng_pl"),
            bind_group_layouts: &[view_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ParticleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                1 => Float32x3,
                2 => Float32,
                3 => Float32x3
            ],
        };
        let pipeline = make_scene_pipeline(
            device,
            PipelineDesc {
                label: "kunpeng_pipeline",
                shader: &shader,
                layout: &pl,
                buffers: &[QUAD_CORNER_LAYOUT, instance_layout],
                color_format,
                blend: ADDITIVE_BLEND,
                depth_write: false,
            },
        );
        Self {
            pipeline,
            corners: quad_corner_buffer(device),
            primary: FieldBuffers::new(device, &bgl, primary, "kunpeng_primary"),
            reflection: FieldBuffers::new(device, &bgl, reflection, "kunpeng_reflection"),
        }
    }

    pub(crate) fn write(
        &self,
        queue: &wgpu::Queue,
        primary: &KunpengUniforms,
        reflection: &KunpengUniforms,
    ) {
        self.primary.uniforms.write(queue, primary);
        self.reflection.uniforms.write(queue, reflection);
    }

    fn draw_field<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>, field: &'p FieldBuffers) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &field.uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.corners.slice(..));
        rpass.set_vertex_buffer(1, field.instances.slice(..));
        rpass.draw(0..6, 0..field.instance_count);
    }

    pub(crate) fn draw_primary<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        self.draw_field(rpass, &self.primary);
    }

    pub(crate) fn draw_reflection<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        self.draw_field(rpass, &self.reflection);
    }
}
