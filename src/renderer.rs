use crate::constants::{
    ALIVE_COLOR, BACKGROUND_COLOR, CANVAS_COLOR, FOOD_COLOR, GRID_LINE_COLOR, GRID_LINE_WIDTH,
};
use crate::grid::Grid;
use crate::view::Viewport;
use bytemuck::{Pod, Zeroable};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

// --- GPU Data Structures ---

// Layout must match `ViewUniforms` in shader.wgsl.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct ViewUniforms {
    screen_resolution: [f32; 2],
    canvas_origin: [f32; 2],
    grid_size: [u32; 2],
    cell_size: f32,
    line_width: f32,
    background_color: [f32; 4],
    canvas_color: [f32; 4],
    alive_color: [f32; 4],
    food_color: [f32; 4],
    line_color: [f32; 4],
}

impl ViewUniforms {
    fn new(size: PhysicalSize<u32>, viewport: &Viewport, grid: &Grid) -> Self {
        Self {
            screen_resolution: [size.width as f32, size.height as f32],
            canvas_origin: viewport.canvas_origin().into(),
            grid_size: [grid.width() as u32, grid.height() as u32],
            cell_size: viewport.cell_size() as f32,
            line_width: GRID_LINE_WIDTH,
            background_color: BACKGROUND_COLOR.into(),
            canvas_color: CANVAS_COLOR.into(),
            alive_color: ALIVE_COLOR.into(),
            food_color: FOOD_COLOR.into(),
            line_color: GRID_LINE_COLOR.into(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct FullscreenVertex {
    position: [f32; 2], // @location(0)
}

impl FullscreenVertex {
    fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<FullscreenVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        }
    }
}

const FULLSCREEN_VERTICES: [FullscreenVertex; 6] = [
    FullscreenVertex {
        position: [-1.0, -1.0],
    },
    FullscreenVertex {
        position: [1.0, -1.0],
    },
    FullscreenVertex {
        position: [-1.0, 1.0],
    },
    FullscreenVertex {
        position: [-1.0, 1.0],
    },
    FullscreenVertex {
        position: [1.0, -1.0],
    },
    FullscreenVertex {
        position: [1.0, 1.0],
    },
];

fn clear_color() -> wgpu::Color {
    wgpu::Color {
        r: BACKGROUND_COLOR.x as f64,
        g: BACKGROUND_COLOR.y as f64,
        b: BACKGROUND_COLOR.z as f64,
        a: BACKGROUND_COLOR.w as f64,
    }
}

// --- Renderer ---
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    render_pipeline: wgpu::RenderPipeline,
    fullscreen_vertex_buffer: wgpu::Buffer,
    view_uniform_buffer: wgpu::Buffer,
    cell_storage_buffer: wgpu::Buffer,
    bind_group_view: wgpu::BindGroup,
    bind_group_cells: wgpu::BindGroup,
    // Reused staging vector for the cell upload.
    cell_data: Vec<u32>,
}

impl Renderer {
    /// Creates the surface and GPU resources for a grid of fixed dimensions.
    pub async fn new(
        window: Arc<Window>,
        grid_width: usize,
        grid_height: usize,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let size = window.inner_size();
        let size = PhysicalSize::new(size.width.max(1), size.height.max(1));

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find an appropriate adapter")?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Grid Shader Module"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        // --- Create Buffers ---
        let fullscreen_vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Fullscreen Quad Vertex Buffer"),
                contents: bytemuck::cast_slice(&FULLSCREEN_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let view_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("View Uniform Buffer"),
            size: std::mem::size_of::<ViewUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Grid dimensions are fixed for the session, so the storage buffer never grows.
        let cell_count = (grid_width * grid_height).max(1);
        let cell_storage_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Cell Storage Buffer"),
            size: (cell_count * std::mem::size_of::<u32>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // --- Bind Group Layouts ---
        let bind_group_layout_view =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("View Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ViewUniforms>() as _,
                        ),
                    },
                    count: None,
                }],
            });

        let bind_group_layout_cells =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cell Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<u32>() as _),
                    },
                    count: None,
                }],
            });

        let bind_group_view = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("View Bind Group"),
            layout: &bind_group_layout_view,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_uniform_buffer.as_entire_binding(),
            }],
        });

        let bind_group_cells = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cell Bind Group"),
            layout: &bind_group_layout_cells,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: cell_storage_buffer.as_entire_binding(),
            }],
        });

        // --- Render Pipeline ---
        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Grid Render Pipeline Layout"),
                bind_group_layouts: &[
                    &bind_group_layout_view,  // Group 0
                    &bind_group_layout_cells, // Group 1
                ],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Grid Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[FullscreenVertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            render_pipeline,
            fullscreen_vertex_buffer,
            view_uniform_buffer,
            cell_storage_buffer,
            bind_group_view,
            bind_group_cells,
            cell_data: Vec::with_capacity(cell_count),
        })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        let new_size = PhysicalSize::new(new_size.width.max(1), new_size.height.max(1));
        if new_size != self.size {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    /// Reconfigures the surface at its current size, after it was lost or outdated.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Uploads the grid and view parameters, then draws one frame.
    pub fn render(&mut self, grid: &Grid, viewport: &Viewport) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;
        let view = output_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Grid Render Encoder"),
            });

        // --- Update Buffers ---
        let uniforms = ViewUniforms::new(self.size, viewport, grid);
        self.queue
            .write_buffer(&self.view_uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        grid.write_gpu_data(&mut self.cell_data);
        self.queue.write_buffer(
            &self.cell_storage_buffer,
            0,
            bytemuck::cast_slice(&self.cell_data),
        );

        // --- Render Pass ---
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Grid Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_vertex_buffer(0, self.fullscreen_vertex_buffer.slice(..));
            render_pass.set_bind_group(0, &self.bind_group_view, &[]);
            render_pass.set_bind_group(1, &self.bind_group_cells, &[]);
            render_pass.draw(0..6, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();

        Ok(())
    }
}
