use std::path::Path;
use std::rc::Rc;

use asset::{DcmFormat, PieceSetManifest, PIECE_MODELS};
use scene::{Mesh, Model, Texture};
use tracing::debug;

use crate::backend::Backend;
use crate::cache::ResourceCache;
use crate::error::Result;

/// Meshes and textures loaded for one theme. Loading a file a second time
/// hands back the cached copy.
#[derive(Default)]
pub struct Resources {
    meshes: ResourceCache<Mesh>,
    textures: ResourceCache<Texture>,
}

impl Resources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    pub fn load_mesh(&mut self, path: &Path) -> Result<Rc<Mesh>> {
        let mesh = self
            .meshes
            .get_or_try_insert_with(path, || asset::load_mesh_from_file(path, DcmFormat::Static))?;
        Ok(mesh)
    }

    /// Loads a mesh of either DCM revision.
    pub fn load_any_mesh(&mut self, path: &Path) -> Result<Rc<Mesh>> {
        let mesh = self
            .meshes
            .get_or_try_insert_with(path, || asset::load_any_mesh_from_file(path))?;
        Ok(mesh)
    }

    pub fn load_texture(&mut self, backend: &mut dyn Backend, path: &Path) -> Result<Rc<Texture>> {
        let texture = self.textures.get_or_try_insert_with(path, || {
            let image = asset::load_image_from_file(path)?;
            Ok::<_, asset::LoadError>(backend.upload_texture(&image))
        })?;
        Ok(texture)
    }

    pub fn load_model(&mut self, backend: &mut dyn Backend, mesh: &Path, texture: &Path) -> Result<Model> {
        Ok(Model {
            mesh: self.load_any_mesh(mesh)?,
            texture: self.load_texture(backend, texture)?,
        })
    }

    /// The twelve piece models listed in a `set.cfg`, in model order.
    pub fn load_piece_set(&mut self, backend: &mut dyn Backend, manifest: &Path) -> Result<Vec<Model>> {
        debug!("loading piece set: {}", manifest.display());

        let manifest = PieceSetManifest::load(manifest)?;
        let mut models = Vec::with_capacity(PIECE_MODELS);
        for piece in &manifest.pieces {
            models.push(self.load_model(backend, &piece.mesh, &piece.texture)?);
        }
        Ok(models)
    }

    /// Drops every mesh and hands every texture back to the backend.
    pub fn release(&mut self, backend: &mut dyn Backend) {
        self.meshes.clear(|_| {});
        self.textures.clear(|t| backend.release_texture(t));
    }
}
