use super::helpers::{make_scene_pipeline, uniform_bgl, PipelineDesc, UniformSlot};
use kunpeng_core::{OceanUniforms, SurfaceMesh, SurfaceVertex};
use wgpu::util::DeviceExt;

pub(crate) struct OceanPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    uniforms: UniformSlot,
}

impl OceanPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        view_bgl: &wgpu::BindGroupLayout,
        mesh: &SurfaceMesh,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("ocean_shader"),
            source: wgpu::ShaderSource::Wgsl(kunpeng_core::OCEAN_WGSL.into()),
        });
        let bgl = uniform_bgl(device, "ocean_bgl");
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("ocean_pl"),
            bind_group_layouts: &[view_bgl, &bgl],
            push_constant_ranges: &[],
        });
        let vertex_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SurfaceVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2],
        };
        // Alpha-blended but depth-writing so the primary bird is hidden below it
        let pipeline = make_scene_pipeline(
            device,
            PipelineDesc {
                label: "ocean_pipeline",
                shader: &shader,
                layout: &pl,
                buffers: &[vertex_layout],
                color_format,
                blend: wgpu::BlendState::ALPHA_BLENDING,
                depth_write: true,
            },
        );
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ocean_vertices"),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ocean_indices"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        log::info!(
            "[render] ocean grid: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.indices.len() / 3
        );
        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            uniforms: UniformSlot::new::<OceanUniforms>(device, &bgl, "ocean_uniforms"),
        }
    }

    pub(crate) fn write(&self, queue: &wgpu::Queue, uniforms: &OceanUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    pub(crate) fn draw<'p>(&'p self, rpass: &mut wgpu::RenderPass<'p>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(1, &self.uniforms.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}
