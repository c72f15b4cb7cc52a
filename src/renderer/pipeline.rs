//! WebGPU render pipeline setup and the per-frame draw
//!
//! Two pipelines against one square surface: a full-viewport quad whose
//! fragment stage rasterizes the gradient disc by distance test, and a
//! flat-color quad for the segment. Setup is one-shot; any failure here
//! is fatal and reported to the caller.

use std::fmt;
use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::consts::WINDOW_SIZE;
use crate::sim::SimState;

use super::shapes;
use super::vertex::{Vertex, colors};

/// Uniforms for the circle pass (must match circle.wgsl)
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    resolution: [f32; 2],        // offset 0
    center: [f32; 2],            // offset 8
    radius: f32,                 // offset 16
    window: f32,                 // offset 20
    _pad: [f32; 2],              // offset 24 - align colors to 16 bytes
    center_color: [f32; 4],      // offset 32
    border_color: [f32; 4],      // offset 48
    background_color: [f32; 4],  // offset 64
}

/// One-shot setup failure. Reported with the underlying diagnostic and
/// the process exits without entering the frame loop.
#[derive(Debug)]
pub enum InitError {
    Surface(wgpu::CreateSurfaceError),
    Adapter(wgpu::RequestAdapterError),
    Device(wgpu::RequestDeviceError),
    /// Shader compile or pipeline validation failure
    Pipeline(String),
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::Surface(err) => write!(f, "failed to create surface: {err}"),
            InitError::Adapter(err) => write!(f, "no suitable adapter: {err}"),
            InitError::Device(err) => write!(f, "failed to create device: {err}"),
            InitError::Pipeline(msg) => write!(f, "pipeline setup failed: {msg}"),
        }
    }
}

impl std::error::Error for InitError {}

impl From<wgpu::CreateSurfaceError> for InitError {
    fn from(err: wgpu::CreateSurfaceError) -> Self {
        InitError::Surface(err)
    }
}

impl From<wgpu::RequestAdapterError> for InitError {
    fn from(err: wgpu::RequestAdapterError) -> Self {
        InitError::Adapter(err)
    }
}

impl From<wgpu::RequestDeviceError> for InitError {
    fn from(err: wgpu::RequestDeviceError) -> Self {
        InitError::Device(err)
    }
}

/// Main render state
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    circle_pipeline: wgpu::RenderPipeline,
    segment_pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,
    /// Segment geometry, rebuilt every frame
    segment_buffer: wgpu::Buffer,
}

impl RenderState {
    pub async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bouncing-circle-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);
        log::info!("Surface present modes: {:?}", surface_caps.present_modes);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Shader compile and pipeline validation errors are collected in
        // an error scope so they surface as a reportable failure.
        let error_scope = device.push_error_scope(wgpu::ErrorFilter::Validation);

        let circle_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("circle_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("circle.wgsl").into()),
        });
        let segment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("segment_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("segment.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                center: [WINDOW_SIZE / 2.0, WINDOW_SIZE / 2.0],
                radius: 0.0,
                window: WINDOW_SIZE,
                _pad: [0.0; 2],
                center_color: colors::CIRCLE_CENTER,
                border_color: colors::CIRCLE_BORDER,
                background_color: colors::BACKGROUND,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("circle_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("circle_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let circle_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("circle_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });
        let circle_pipeline = make_pipeline(
            &device,
            "circle_pipeline",
            &circle_layout,
            &circle_shader,
            wgpu::PrimitiveTopology::TriangleList,
            config.format,
        );

        let segment_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("segment_pipeline_layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });
        let segment_pipeline = make_pipeline(
            &device,
            "segment_pipeline",
            &segment_layout,
            &segment_shader,
            wgpu::PrimitiveTopology::TriangleStrip,
            config.format,
        );

        if let Some(err) = error_scope.pop().await {
            return Err(InitError::Pipeline(err.to_string()));
        }

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen_quad"),
            contents: bytemuck::cast_slice(&shapes::FULLSCREEN_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("fullscreen_quad_indices"),
            contents: bytemuck::cast_slice(&shapes::QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let segment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("segment_vertices"),
            contents: bytemuck::cast_slice(&shapes::segment_quad(WINDOW_SIZE / 2.0)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            circle_pipeline,
            segment_pipeline,
            globals_buffer,
            bind_group,
            quad_vertex_buffer,
            quad_index_buffer,
            segment_buffer,
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Upload the frame's parameters and issue the two draws
    pub fn render(&mut self, state: &SimState) -> Result<(), wgpu::SurfaceError> {
        let globals = Globals {
            resolution: [self.config.width as f32, self.config.height as f32],
            center: [state.circle.pos.x, state.circle.pos.y],
            radius: state.circle.radius,
            window: WINDOW_SIZE,
            _pad: [0.0; 2],
            center_color: colors::CIRCLE_CENTER,
            border_color: colors::CIRCLE_BORDER,
            background_color: colors::BACKGROUND,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        // Recreate the segment buffer each frame (simple approach; a
        // persistent buffer updated in place would avoid the churn)
        self.segment_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("segment_vertices"),
                contents: bytemuck::cast_slice(&shapes::segment_quad(state.segment.y)),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame_encoder"),
            });

        {
            let [r, g, b, a] = colors::BACKGROUND;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("frame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.circle_pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.quad_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..shapes::QUAD_INDICES.len() as u32, 0, 0..1);

            render_pass.set_pipeline(&self.segment_pipeline);
            render_pass.set_vertex_buffer(0, self.segment_buffer.slice(..));
            render_pass.draw(0..4, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn make_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
