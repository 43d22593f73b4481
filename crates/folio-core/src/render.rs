//! wgpu implementation of [`RenderBackend`]: toon-shaded meshes and
//! additive point sprites over a transparent clear.

mod helpers;

use crate::generate::PointBuffer;
use crate::geometry::{MeshData, MeshVertex};
use crate::scene::{RenderBackend, RenderList};
use glam::Mat4;
use helpers::{
    create_depth_view, init_buffer, make_pipeline, uniform_bind_group, uniform_layout,
    PipelineDesc, ADDITIVE,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view: [[f32; 4]; 4],
    proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    // x, y: output size in pixels
    viewport: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ObjectUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    // x: point size in world units
    params: [f32; 4],
}

const MESH_ATTRIBS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const POSITION_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const COLOR_ATTRIBS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x3];

const POINT_STRIDE: usize = 3 * std::mem::size_of::<f32>();

pub struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct GpuPoints {
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    capacity: usize,
    count: u32,
    uniforms: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl GpuPoints {
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    mesh_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_bgl: wgpu::BindGroupLayout,
    depth_view: wgpu::TextureView,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(
        target: impl Into<wgpu::SurfaceTarget<'a>>,
        width: u32,
        height: u32,
    ) -> anyhow::Result<Self> {
        let width = width.max(1);
        let height = height.max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(target)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No GPU adapter"))?;
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
            // colors are authored in display space, so skip the sRGB encode
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::CompositeAlphaMode::PreMultiplied)
            .or_else(|| caps.alpha_modes.first().copied())
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
        log::info!("[gpu] surface {}x{} {:?} {:?}", width, height, format, alpha_mode);

        let globals_bgl = uniform_layout(
            &device,
            "globals_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let object_bgl = uniform_layout(
            &device,
            "object_bgl",
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group =
            uniform_bind_group(&device, "globals_bg", &globals_bgl, &globals_buffer);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl, &object_bgl],
            push_constant_ranges: &[],
        });

        let mesh_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("mesh_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::MESH_WGSL.into()),
        });
        let mesh_pipeline = make_pipeline(
            &device,
            &layout,
            format,
            &PipelineDesc {
                label: "mesh_pipeline",
                shader: &mesh_shader,
                vs_entry: "vs_mesh",
                fs_entry: "fs_mesh",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &MESH_ATTRIBS,
                }],
                topology: wgpu::PrimitiveTopology::TriangleList,
                depth_write: true,
                blend: Some(wgpu::BlendState::REPLACE),
            },
        );

        let points_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("points_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::POINTS_WGSL.into()),
        });
        let points_pipeline = make_pipeline(
            &device,
            &layout,
            format,
            &PipelineDesc {
                label: "points_pipeline",
                shader: &points_shader,
                vs_entry: "vs_points",
                fs_entry: "fs_points",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: POINT_STRIDE as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &POSITION_ATTRIBS,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: POINT_STRIDE as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &COLOR_ATTRIBS,
                    },
                ],
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                depth_write: false,
                blend: Some(ADDITIVE),
            },
        );

        let depth_view = create_depth_view(&device, width, height);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            mesh_pipeline,
            points_pipeline,
            globals_buffer,
            globals_bind_group,
            object_bgl,
            depth_view,
            width,
            height,
            clear_color: wgpu::Color::TRANSPARENT,
        })
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Reapply the current configuration after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn object_uniforms(&self, label: &str, value: &ObjectUniforms) -> (wgpu::Buffer, wgpu::BindGroup) {
        let buffer = init_buffer(
            &self.device,
            label,
            bytemuck::bytes_of(value),
            0,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        );
        let bind_group = uniform_bind_group(&self.device, label, &self.object_bgl, &buffer);
        (buffer, bind_group)
    }

    fn point_buffers(&self, buffer: &PointBuffer, capacity: usize) -> (wgpu::Buffer, wgpu::Buffer) {
        let min_size = capacity.max(1) * POINT_STRIDE;
        let usage = wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST;
        let positions = init_buffer(
            &self.device,
            "point_positions",
            bytemuck::cast_slice(&buffer.positions),
            min_size,
            usage,
        );
        let white;
        let color_data: &[f32] = match &buffer.colors {
            Some(c) => c,
            None => {
                white = vec![1.0f32; buffer.len() * 3];
                &white
            }
        };
        let colors = init_buffer(
            &self.device,
            "point_colors",
            bytemuck::cast_slice(color_data),
            min_size,
            usage,
        );
        (positions, colors)
    }
}

fn mat(m: Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

impl<'a> RenderBackend for GpuState<'a> {
    type Mesh = GpuMesh;
    type Points = GpuPoints;
    type Error = wgpu::SurfaceError;

    fn create_mesh(&mut self, mesh: &MeshData) -> GpuMesh {
        let vertices = init_buffer(
            &self.device,
            "mesh_vertices",
            bytemuck::cast_slice(&mesh.vertices),
            0,
            wgpu::BufferUsages::VERTEX,
        );
        let indices = init_buffer(
            &self.device,
            "mesh_indices",
            bytemuck::cast_slice(&mesh.indices),
            0,
            wgpu::BufferUsages::INDEX,
        );
        let (uniforms, bind_group) = self.object_uniforms(
            "mesh_object",
            &ObjectUniforms {
                model: mat(Mat4::IDENTITY),
                color: [1.0; 4],
                params: [0.0; 4],
            },
        );
        GpuMesh {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
            uniforms,
            bind_group,
        }
    }

    fn release_mesh(&mut self, mesh: GpuMesh) {
        mesh.vertices.destroy();
        mesh.indices.destroy();
        mesh.uniforms.destroy();
    }

    fn create_points(&mut self, buffer: &PointBuffer) -> GpuPoints {
        let capacity = buffer.len();
        let (positions, colors) = self.point_buffers(buffer, capacity);
        let (uniforms, bind_group) = self.object_uniforms(
            "points_object",
            &ObjectUniforms {
                model: mat(Mat4::IDENTITY),
                color: [1.0; 4],
                params: [0.0; 4],
            },
        );
        GpuPoints {
            positions,
            colors,
            capacity,
            count: buffer.len() as u32,
            uniforms,
            bind_group,
        }
    }

    fn update_points(&mut self, points: &mut GpuPoints, buffer: &PointBuffer) {
        if buffer.len() > points.capacity {
            let (positions, colors) = self.point_buffers(buffer, buffer.len());
            points.positions.destroy();
            points.colors.destroy();
            points.positions = positions;
            points.colors = colors;
            points.capacity = buffer.len();
        } else {
            self.queue
                .write_buffer(&points.positions, 0, bytemuck::cast_slice(&buffer.positions));
            if let Some(c) = &buffer.colors {
                self.queue.write_buffer(&points.colors, 0, bytemuck::cast_slice(c));
            }
        }
        points.count = buffer.len() as u32;
    }

    fn release_points(&mut self, points: GpuPoints) {
        points.positions.destroy();
        points.colors.destroy();
        points.uniforms.destroy();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    fn render(&mut self, list: &RenderList<'_, GpuMesh, GpuPoints>) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            view: mat(list.view),
            proj: mat(list.projection),
            light_dir: list.light_direction.normalize_or_zero().extend(0.0).to_array(),
            viewport: [self.width as f32, self.height as f32, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
        for draw in &list.meshes {
            let [r, g, b] = draw.color.to_array();
            let u = ObjectUniforms {
                model: mat(draw.model),
                color: [r, g, b, 1.0],
                params: [0.0; 4],
            };
            self.queue
                .write_buffer(&draw.mesh.uniforms, 0, bytemuck::bytes_of(&u));
        }
        for draw in &list.points {
            let [r, g, b] = draw.material.color.to_array();
            let u = ObjectUniforms {
                model: mat(draw.model),
                color: [r, g, b, 1.0],
                params: [draw.material.size, 0.0, 0.0, 0.0],
            };
            self.queue
                .write_buffer(&draw.points.uniforms, 0, bytemuck::bytes_of(&u));
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
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
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
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
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);

            rpass.set_pipeline(&self.mesh_pipeline);
            for draw in list.meshes.iter().filter(|d| d.mesh.index_count > 0) {
                rpass.set_bind_group(1, &draw.mesh.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.mesh.vertices.slice(..));
                rpass.set_index_buffer(draw.mesh.indices.slice(..), wgpu::IndexFormat::Uint32);
                rpass.draw_indexed(0..draw.mesh.index_count, 0, 0..1);
            }

            rpass.set_pipeline(&self.points_pipeline);
            for draw in list.points.iter().filter(|d| d.points.count > 0) {
                rpass.set_bind_group(1, &draw.points.bind_group, &[]);
                rpass.set_vertex_buffer(0, draw.points.positions.slice(..));
                rpass.set_vertex_buffer(1, draw.points.colors.slice(..));
                rpass.draw(0..4, 0..draw.points.count);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
