use std::path::Path;
use std::rc::Rc;

use math::{
    mat::Mat4,
    vec::{Vec2, Vec3, Vec4},
};
use scene::{Camera, Light, Model, Texture};
use tracing::{info, warn};

use crate::animation::PieceMove;
use crate::backend::{Backend, Pass};
use crate::board::{square_coords, Board};
use crate::draw;
use crate::error::{Error, Result};
use crate::resources::Resources;
use crate::selector::{Direction, Selector};
use crate::theme::ThemeConfig;

/// Lift of resting pieces off the board surface.
const PIECE_HEIGHT: f32 = 0.02;
/// Sprites in flight are drawn above their neighbours.
const MOVING_SPRITE_HEIGHT: f32 = 0.04;
const SELECTOR_HEIGHT: f32 = 0.01;

const SELECTED_ALPHA: f32 = 0.5;
const REFLECTED_BOARD_ALPHA: f32 = 0.8;
const BOARD_CENTRE_ALPHA: f32 = 0.75;

/// Everything one theme loads. Models share the cached meshes and textures.
#[derive(Default)]
struct Assets {
    resources: Resources,
    pieces: Vec<Model>,
    board: Option<Model>,
    selector: Option<Rc<Texture>>,
}

impl Assets {
    /// Board and pieces are enough to draw; the selector overlay is optional.
    fn is_drawable(&self) -> bool {
        !self.pieces.is_empty() && self.board.is_some()
    }

    /// Sprite sets are a single quad per piece.
    fn is_flat(&self) -> bool {
        self.pieces.first().is_some_and(|m| m.mesh.is_flat_sprite())
    }

    fn load_theme(&mut self, backend: &mut dyn Backend, theme: &ThemeConfig, data_dir: &Path) -> Result<()> {
        self.pieces = self.resources.load_piece_set(backend, &theme.piece_set_manifest(data_dir))?;
        self.selector = Some(self.resources.load_texture(backend, &theme.selector_texture(data_dir))?);
        self.board = Some(Model {
            mesh: self.resources.load_mesh(&theme.board_mesh(data_dir))?,
            texture: self.resources.load_texture(backend, &theme.board_texture(data_dir))?,
        });
        Ok(())
    }

    fn release(&mut self, backend: &mut dyn Backend) {
        self.pieces.clear();
        self.board = None;
        self.selector = None;
        self.resources.release(backend);
    }
}

/// Camera, selector and piece animation state plus the models they are
/// drawn with.
pub struct Scene {
    assets: Assets,
    theme: ThemeConfig,
    camera: Camera,
    selector: Selector,
    piece_move: Option<PieceMove>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            assets: Assets::default(),
            theme: ThemeConfig::default(),
            camera: Camera::default(),
            selector: Selector::new(),
            piece_move: None,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn theme(&self) -> &ThemeConfig {
        &self.theme
    }

    pub fn resources(&self) -> &Resources {
        &self.assets.resources
    }

    pub fn pieces(&self) -> &[Model] {
        &self.assets.pieces
    }

    pub fn board_model(&self) -> Option<&Model> {
        self.assets.board.as_ref()
    }

    pub fn piece_move(&self) -> Option<&PieceMove> {
        self.piece_move.as_ref()
    }

    pub fn is_flat(&self) -> bool {
        self.assets.is_flat()
    }

    /// Replaces the rendering settings without reloading any files.
    pub fn set_theme_config(&mut self, theme: ThemeConfig) {
        self.theme = theme;
    }

    pub fn load_piece_set(&mut self, backend: &mut dyn Backend, manifest: &Path) -> Result<()> {
        self.assets.pieces = self.assets.resources.load_piece_set(backend, manifest)?;
        Ok(())
    }

    pub fn load_board(&mut self, backend: &mut dyn Backend, mesh: &Path, texture: &Path) -> Result<()> {
        let board = Model {
            mesh: self.assets.resources.load_mesh(mesh)?,
            texture: self.assets.resources.load_texture(backend, texture)?,
        };
        self.assets.board = Some(board);
        Ok(())
    }

    pub fn load_selector_texture(&mut self, backend: &mut dyn Backend, path: &Path) -> Result<()> {
        self.assets.selector = Some(self.assets.resources.load_texture(backend, path)?);
        Ok(())
    }

    /// Loads everything `theme` names from `data_dir` and switches to it.
    /// If any file fails to load, whatever was loaded for the new theme is
    /// released and the current theme stays on screen.
    pub fn load_theme(&mut self, backend: &mut dyn Backend, theme: &ThemeConfig, data_dir: &Path) -> Result<()> {
        let mut next = Assets::default();
        if let Err(e) = next.load_theme(backend, theme, data_dir) {
            warn!("couldn't load theme {:?}, keeping {:?}: {e}", theme.name, self.theme.name);
            next.release(backend);
            return Err(e);
        }

        self.assets.release(backend);
        self.assets = next;
        self.theme = theme.clone();
        self.reset_view();

        info!(
            "theme {:?}: {} meshes, {} textures{}",
            theme.name,
            self.assets.resources.mesh_count(),
            self.assets.resources.texture_count(),
            if self.is_flat() { ", 2D" } else { "" },
        );
        Ok(())
    }

    pub fn unload_resources(&mut self, backend: &mut dyn Backend) {
        self.assets.release(backend);
    }

    pub fn start_piece_move(&mut self, source: usize, dest: usize, now_ms: u64) -> Result<()> {
        if !self.is_piece_move_done() {
            return Err(Error::MoveInProgress);
        }
        self.piece_move = Some(PieceMove::start(source, dest, now_ms)?);
        Ok(())
    }

    pub fn is_piece_move_done(&self) -> bool {
        self.piece_move.as_ref().map_or(true, PieceMove::is_done)
    }

    pub fn move_camera(&mut self, delta_pitch: f32, delta_yaw: f32) {
        self.camera.rotate(delta_pitch, delta_yaw);
    }

    pub fn move_selector(&mut self, direction: Direction) {
        self.selector.move_in(direction, self.camera.quarter_turns());
    }

    pub fn select_square(&mut self, square: Option<usize>) -> Result<()> {
        self.selector.select(square)
    }

    pub fn reset_view(&mut self) {
        self.selector.reset();
        self.camera = Camera::reset(self.is_flat());
    }

    /// Draws one frame at time `now_ms`. The piece move and selector
    /// animation advance once per call.
    pub fn render_frame(&mut self, backend: &mut dyn Backend, board: &Board, reflections: bool, now_ms: u64) {
        if let Some(m) = self.piece_move.as_mut() {
            m.advance(now_ms);
        }

        if !self.assets.is_drawable() {
            warn!("frame rendered with no theme loaded");
            return;
        }

        let view = self.camera.view();

        if reflections {
            backend.set_pass(Pass::StencilWrite);
            self.draw_board_centre(backend, view, Vec4::new(0.0, 0.0, 0.0, 1.0));

            backend.set_pass(Pass::Mirrored);
            self.draw_pieces(backend, board, view, now_ms, true);

            backend.set_pass(Pass::Normal);
            self.draw_board_centre(backend, view, Vec4::new(1.0, 1.0, 1.0, BOARD_CENTRE_ALPHA));
            self.draw_board(backend, view, REFLECTED_BOARD_ALPHA);
            self.draw_pieces(backend, board, view, now_ms, false);
        } else {
            backend.set_pass(Pass::Normal);
            self.draw_board(backend, view, 1.0);
            self.draw_pieces(backend, board, view, now_ms, false);
        }

        self.draw_selector(backend, view);
    }

    fn draw_board_centre(&self, backend: &mut dyn Backend, view: Mat4, colour: Vec4) {
        if let Some(board) = &self.assets.board {
            backend.draw(&draw::board_centre(&board.texture, view, colour));
        }
    }

    fn draw_board(&self, backend: &mut dyn Backend, view: Mat4, alpha: f32) {
        let Some(board) = &self.assets.board else { return };
        let light = self.theme.lighting.then_some(Light::OVERHEAD);

        for batch in draw::model_batches(board, view, alpha, light, 0.0) {
            backend.draw(&batch);
        }
    }

    fn draw_pieces(&self, backend: &mut dyn Backend, board: &Board, view: Mat4, now_ms: u64, flip: bool) {
        let flat = self.is_flat();
        let light = (self.theme.lighting && !flat).then(|| self.camera.light());
        let tex_offset = self.theme.tex_spin_offset(now_ms);

        // Back rows first so nearer pieces blend over farther ones.
        for row in (0..8).rev() {
            for col in 0..8 {
                let square = row * 8 + col;
                let Some(piece) = board.get(square) else { continue };
                let Some(model) = self.assets.pieces.get(piece.model_index()) else { continue };

                let moving = self.piece_move.as_ref().filter(|m| m.dest() == square);
                let (pos, height) = match moving {
                    Some(m) if flat => (m.position(), MOVING_SPRITE_HEIGHT),
                    Some(m) => (m.position(), PIECE_HEIGHT),
                    None => (square_coords(square), PIECE_HEIGHT),
                };

                let mut transform = view * Mat4::translation(Vec3::new(-3.5 + pos.x, -3.5 + pos.y, height));
                let mut piece_light = light;

                if flat {
                    let steps = self.camera.quarter_turns() as f32;
                    transform = transform * Mat4::rotation_z(-steps * 90.0);
                } else if piece.is_black() {
                    transform = transform * Mat4::rotation_z(180.0);
                    piece_light = light.map(Light::mirrored);
                }

                if flip && !flat {
                    transform = transform * Mat4::scale(Vec3::new(1.0, 1.0, -1.0));
                }

                let alpha = if self.selector.selected() == Some(square) { SELECTED_ALPHA } else { 1.0 };

                for batch in draw::model_batches(model, transform, alpha, piece_light, tex_offset) {
                    backend.draw(&batch);
                }
            }
        }
    }

    fn draw_selector(&mut self, backend: &mut dyn Backend, view: Mat4) {
        let config = &self.theme.selector;
        self.selector.animate(config.spin_speed, config.bounce_speed);

        let Some(texture) = &self.assets.selector else { return };
        backend.set_pass(Pass::Overlay);

        let at: Vec2 = square_coords(self.selector.highlight());
        let transform = view
            * Mat4::translation(Vec3::new(-3.5 + at.x, -3.5 + at.y, SELECTOR_HEIGHT))
            * Mat4::rotation_z(self.selector.rotation());

        let [c0, c1, c2, c3] = config.colour;
        for batch in draw::selector(texture, transform, config.size, self.selector.bounce(), Vec4::new(c0, c1, c2, c3)) {
            backend.draw(&batch);
        }
    }
}
