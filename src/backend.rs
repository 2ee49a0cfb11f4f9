use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use math::{
    mat::Mat4,
    vec::{Vec2, Vec3, Vec4},
};
use scene::{Image, Texture, TextureHandle};

/// Fixed-function state for the draws that follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Colour and depth writes off; every fragment sets the stencil to 1.
    StencilWrite,
    /// Draws only where the stencil is 1, culling front faces.
    Mirrored,
    /// Stencil off, back faces culled.
    Normal,
    /// Culling off, for flat overlays.
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    Strip,
    Fan,
}

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
    pub colour: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawBatch {
    pub topology: Topology,
    pub transform: Mat4,
    pub texture: TextureHandle,
    pub vertices: Vec<Vertex>,
}

pub trait Backend {
    fn upload_texture(&mut self, image: &Image) -> Texture;

    fn release_texture(&mut self, texture: &Texture);

    fn set_pass(&mut self, pass: Pass);

    fn draw(&mut self, batch: &DrawBatch);
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pass(Pass),
    Draw(DrawBatch),
}

/// Keeps everything it is asked to do in memory.
///
/// Textures are padded to power-of-two sizes the way older GL drivers
/// require, so uploaded textures report a `wrap_scale` below 1 for odd
/// image sizes.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    commands: Vec<Command>,
    textures: HashMap<TextureHandle, (u32, u32)>,
    next_handle: u32,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn draws(&self) -> impl Iterator<Item = &DrawBatch> {
        self.commands.iter().filter_map(|c| match c {
            Command::Draw(b) => Some(b),
            Command::Pass(_) => None,
        })
    }

    pub fn passes(&self) -> Vec<Pass> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Pass(p) => Some(*p),
                Command::Draw(_) => None,
            })
            .collect()
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn is_live(&self, handle: TextureHandle) -> bool {
        self.textures.contains_key(&handle)
    }

    /// Bytes of vertex data submitted since the last `take_commands`.
    pub fn vertex_bytes(&self) -> usize {
        self.draws()
            .map(|b| bytemuck::cast_slice::<Vertex, u8>(&b.vertices).len())
            .sum()
    }
}

impl Backend for RecordingBackend {
    fn upload_texture(&mut self, image: &Image) -> Texture {
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;

        let padded_w = image.width.max(1).next_power_of_two();
        let padded_h = image.height.max(1).next_power_of_two();
        self.textures.insert(handle, (padded_w, padded_h));

        Texture {
            handle,
            width: image.width,
            height: image.height,
            wrap_scale: Vec2::new(
                image.width as f32 / padded_w as f32,
                image.height as f32 / padded_h as f32,
            ),
        }
    }

    fn release_texture(&mut self, texture: &Texture) {
        self.textures.remove(&texture.handle);
    }

    fn set_pass(&mut self, pass: Pass) {
        self.commands.push(Command::Pass(pass));
    }

    fn draw(&mut self, batch: &DrawBatch) {
        self.commands.push(Command::Draw(batch.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(width: u32, height: u32) -> Image {
        Image { width, height, data: vec![0; (width * height * 4) as usize] }
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 12 * 4);
    }

    #[test]
    fn upload_pads_to_power_of_two() {
        let mut backend = RecordingBackend::new();
        let t = backend.upload_texture(&image(48, 64));
        assert_eq!(t.wrap_scale, Vec2::new(0.75, 1.0));
        assert_eq!((t.width, t.height), (48, 64));
    }

    #[test]
    fn release_forgets_texture() {
        let mut backend = RecordingBackend::new();
        let a = backend.upload_texture(&image(2, 2));
        let b = backend.upload_texture(&image(2, 2));
        assert_ne!(a.handle, b.handle);
        assert_eq!(backend.live_textures(), 2);

        backend.release_texture(&a);
        assert!(!backend.is_live(a.handle));
        assert!(backend.is_live(b.handle));
    }

    #[test]
    fn records_in_order() {
        let mut backend = RecordingBackend::new();
        backend.set_pass(Pass::Normal);
        backend.draw(&DrawBatch {
            topology: Topology::Fan,
            transform: Mat4::identity(),
            texture: TextureHandle(0),
            vertices: vec![Vertex::default(); 4],
        });
        backend.set_pass(Pass::Overlay);

        assert_eq!(backend.passes(), vec![Pass::Normal, Pass::Overlay]);
        assert_eq!(backend.draws().count(), 1);
        assert_eq!(backend.vertex_bytes(), 4 * 48);
        assert_eq!(backend.take_commands().len(), 3);
        assert!(backend.commands().is_empty());
    }
}
