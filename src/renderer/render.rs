use super::camera::fit_projection;
use super::line_vertex::LineVertex;
use super::renderer::Renderer;
use super::sprite_vertex::SpriteVertex;
use crate::loader::AssetBundle;
use crate::render_loop::{DrawList, DrawSink};
use log::{error, warn};
use nalgebra_glm as glm;
use wgpu::util::DeviceExt;

const BONE_COLOR: [f32; 4] = [1.0, 0.6, 0.1, 1.0];
const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Consecutive quads on the same page, drawn with one call.
struct Batch {
    page: usize,
    indices: std::ops::Range<u32>,
}

impl Renderer {
    pub fn render(&mut self, list: &DrawList) -> Result<(), wgpu::SurfaceError> {
        if self.config.width == 0 || self.config.height == 0 {
            return Ok(());
        }

        if let Some(bounds) = list.bounds {
            self.view_bounds = Some(match self.view_bounds {
                Some(mut view) => {
                    view.include([bounds.min_x, bounds.min_y]);
                    view.include([bounds.max_x, bounds.max_y]);
                    view
                }
                None => bounds,
            });
        }
        let view_proj = match &self.view_bounds {
            Some(bounds) => fit_projection(
                bounds,
                self.config.width,
                self.config.height,
                self.display.fit_mode,
                self.display.padding,
            ),
            None => glm::Mat4::identity(),
        };
        self.queue
            .write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(view_proj.as_slice()));

        let mut vertices = Vec::with_capacity(list.quads.len() * 4);
        let mut indices = Vec::with_capacity(list.quads.len() * 6);
        let mut batches: Vec<Batch> = Vec::new();
        for quad in &list.quads {
            let pma = self.pages.get(quad.page).is_some_and(|p| p.pma);
            let [r, g, b, a] = quad.color;
            let color = if pma { [r * a, g * a, b * a, a] } else { quad.color };

            let base = vertices.len() as u32;
            for (position, uv) in quad.positions.iter().zip(quad.uvs.iter()) {
                vertices.push(SpriteVertex {
                    position: *position,
                    uv: *uv,
                    color,
                });
            }
            let start = indices.len() as u32;
            indices.extend(QUAD_INDICES.iter().map(|i| base + i));
            let end = indices.len() as u32;

            match batches.last_mut() {
                Some(batch) if batch.page == quad.page => batch.indices.end = end,
                _ => batches.push(Batch {
                    page: quad.page,
                    indices: start..end,
                }),
            }
        }

        let line_vertices: Vec<LineVertex> = list
            .bones
            .iter()
            .flat_map(|bone| {
                [
                    LineVertex {
                        position: bone.from,
                        color: BONE_COLOR,
                    },
                    LineVertex {
                        position: bone.to,
                        color: BONE_COLOR,
                    },
                ]
            })
            .collect();

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Preview Encoder"),
            });

        let vertex_buffer = (!vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Vertex Buffer"),
                    contents: bytemuck::cast_slice(&vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });
        let index_buffer = (!indices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Sprite Index Buffer"),
                    contents: bytemuck::cast_slice(&indices),
                    usage: wgpu::BufferUsages::INDEX,
                })
        });
        let line_buffer = (!line_vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Bone Line Buffer"),
                    contents: bytemuck::cast_slice(&line_vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let [r, g, b, a] = self.display.clear_color;
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Preview Pass"),
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
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_bind_group(0, &self.camera_bind_group, &[]);

            if let (Some(vertex_buffer), Some(index_buffer)) = (&vertex_buffer, &index_buffer) {
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                for batch in &batches {
                    let page = self.pages.get(batch.page).unwrap_or(&self.white_page);
                    let pipeline = if page.pma {
                        &self.sprite_pma_pipeline
                    } else {
                        &self.sprite_pipeline
                    };
                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(1, &page.bind_group, &[]);
                    render_pass.draw_indexed(batch.indices.clone(), 0, 0..1);
                }
            }

            if let Some(line_buffer) = &line_buffer {
                render_pass.set_pipeline(&self.line_pipeline);
                render_pass.set_vertex_buffer(0, line_buffer.slice(..));
                render_pass.draw(0..line_vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl DrawSink for Renderer {
    fn prepare(&mut self, bundle: &AssetBundle) {
        self.load_atlas(&bundle.atlas);
    }

    fn submit(&mut self, list: &DrawList) {
        match self.render(list) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => self.reconfigure(),
            Err(wgpu::SurfaceError::OutOfMemory) => error!("Surface out of memory"),
            Err(e) => warn!("Frame skipped: {}", e),
        }
    }
}
