mod camera;
mod line_vertex;
mod render;
mod renderer;
mod sprite_vertex;

pub use camera::fit_projection;
pub use renderer::Renderer;
