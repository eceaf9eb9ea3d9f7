use anyhow::Result;

use crate::render::shader::{ShaderModulePackage, ShaderTemplateConfiguration};
use crate::render::texture::ImageTexture;

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct ViewportUniform {
    scale: [f32; 2],
    _padding: [f32; 2],
}

/// Draws a single image as a quad that keeps its aspect ratio inside the view.
pub struct PreviewRenderer {
    queue: std::rc::Rc<wgpu::Queue>,
    gpu_pipeline: wgpu::RenderPipeline,
    gpu_vertex_buffer: wgpu::Buffer,
    gpu_viewport_uniform_buffer: wgpu::Buffer,
    gpu_bind_group: wgpu::BindGroup,
    texture: ImageTexture,
}

impl PreviewRenderer {
    pub fn from_texture(
        device: &wgpu::Device,
        queue: std::rc::Rc<wgpu::Queue>,
        format: wgpu::TextureFormat,
        tera: &tera::Tera,
        texture: ImageTexture,
    ) -> Result<Self> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("PREVIEW_BIND_GROUP_LAYOUT"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("PREVIEW_RENDER_PIPELINE_LAYOUT"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        let shader_module_package = ShaderModulePackage::from_templates(
            "preview/preview.vert",
            "preview/preview.frag",
            "PREVIEW",
            device,
            tera,
            &ShaderTemplateConfiguration {
                grayscale: texture.grayscale,
                linearize: format.is_srgb(),
            },
        )?;

        let gpu_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("PREVIEW_RENDER_PIPELINE"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module_package.vertex_shader_module,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (4 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                        wgpu::VertexAttribute {
                            offset: (2 * std::mem::size_of::<f32>()) as wgpu::BufferAddress,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module_package.fragment_shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent::REPLACE,
                        alpha: wgpu::BlendComponent::REPLACE,
                    }),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        // x, y, u, v
        let quad_vertices: &[f32] = &[
            -1.0, 1.0, 0.0, 0.0, -1.0, -1.0, 0.0, 1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, 0.0, 0.0,
            1.0, -1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0,
        ];

        let gpu_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("PREVIEW_VERTEX_BUFFER"),
            size: std::mem::size_of_val(quad_vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        queue.write_buffer(&gpu_vertex_buffer, 0, bytemuck::cast_slice(quad_vertices));

        let gpu_viewport_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("PREVIEW_VIEWPORT_UNIFORM_BUFFER"),
            size: std::mem::size_of::<ViewportUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let gpu_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("PREVIEW_BIND_GROUP"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: gpu_viewport_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.gpu_texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&texture.gpu_sampler),
                },
            ],
        });

        Ok(Self {
            queue,
            gpu_pipeline,
            gpu_vertex_buffer,
            gpu_viewport_uniform_buffer,
            gpu_bind_group,
            texture,
        })
    }

    pub fn set_view_dimensions(&self, view_dimensions: (u32, u32)) {
        let uniform = ViewportUniform {
            scale: fit_scale(self.texture.dimensions, view_dimensions),
            _padding: [0.0; 2],
        };

        self.queue.write_buffer(
            &self.gpu_viewport_uniform_buffer,
            0,
            bytemuck::cast_slice(&[uniform]),
        );
    }

    pub fn render_preview(&self, render_pass: &mut wgpu::RenderPass) {
        render_pass.set_pipeline(&self.gpu_pipeline);
        render_pass.set_vertex_buffer(0, self.gpu_vertex_buffer.slice(..));
        render_pass.set_bind_group(0, &self.gpu_bind_group, &[]);
        render_pass.draw(0..6, 0..1);
    }
}

/// Scale applied to the unit quad so that an image of `image_dimensions` fills
/// as much of `view_dimensions` as possible without distortion.
pub fn fit_scale(image_dimensions: (u32, u32), view_dimensions: (u32, u32)) -> [f32; 2] {
    if image_dimensions.0 == 0
        || image_dimensions.1 == 0
        || view_dimensions.0 == 0
        || view_dimensions.1 == 0
    {
        return [1.0, 1.0];
    }

    let image_aspect = image_dimensions.0 as f32 / image_dimensions.1 as f32;
    let view_aspect = view_dimensions.0 as f32 / view_dimensions.1 as f32;

    if view_aspect > image_aspect {
        [image_aspect / view_aspect, 1.0]
    } else {
        [1.0, view_aspect / image_aspect]
    }
}
