//! Theme configuration.
//!
//! A theme file is TOML with one `[[theme]]` table per theme. Every field is
//! optional:
//!
//! ```toml
//! [[theme]]
//! name = "Marble"
//! pieces = "marble"
//! board = "marble"
//! tex_spin = true
//! tex_spin_speed = 2
//!
//! [theme.selector]
//! colour = [0.2, 0.4, 1.0, 0.5]
//! spin_speed = 1.5
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Look of the square selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Fill colour, RGBA (default: translucent yellow)
    #[serde(default = "default_selector_colour")]
    pub colour: [f32; 4],
    /// Half the width of the selector quad, in squares (default: 0.5)
    #[serde(default = "default_selector_size")]
    pub size: f32,
    /// Degrees of spin per frame (default: 0)
    #[serde(default)]
    pub spin_speed: f32,
    /// Height change per frame while bouncing (default: 0)
    #[serde(default)]
    pub bounce_speed: f32,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            colour: default_selector_colour(),
            size: default_selector_size(),
            spin_speed: 0.0,
            bounce_speed: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "default_name")]
    pub name: String,
    /// 2D interface style (default: "default")
    #[serde(default = "default_style")]
    pub style: String,
    /// Directory under `pieces/` (default: "classiclow")
    #[serde(default = "default_pieces")]
    pub pieces: String,
    /// Directory under `boards/` (default: "classic")
    #[serde(default = "default_board")]
    pub board: String,
    #[serde(default = "default_white_name")]
    pub white_name: String,
    #[serde(default = "default_black_name")]
    pub black_name: String,
    /// Per-vertex shading of 3D pieces (default: true)
    #[serde(default = "default_true")]
    pub lighting: bool,
    /// Scroll piece textures horizontally (default: false)
    #[serde(default)]
    pub tex_spin: bool,
    /// Texture scroll speed; 0 leaves textures still (default: 0)
    #[serde(default)]
    pub tex_spin_speed: u32,
    #[serde(default)]
    pub selector: SelectorConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            style: default_style(),
            pieces: default_pieces(),
            board: default_board(),
            white_name: default_white_name(),
            black_name: default_black_name(),
            lighting: true,
            tex_spin: false,
            tex_spin_speed: 0,
            selector: SelectorConfig::default(),
        }
    }
}

impl ThemeConfig {
    pub fn piece_set_manifest(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("pieces").join(&self.pieces).join("set.cfg")
    }

    pub fn selector_texture(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("pieces").join(&self.pieces).join("selector.png")
    }

    pub fn board_mesh(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("boards").join(&self.board).join("board.dcm")
    }

    pub fn board_texture(&self, data_dir: &Path) -> PathBuf {
        data_dir.join("boards").join(&self.board).join("board.png")
    }

    /// Horizontal texture offset at `now_ms`, or 0 when spinning is off.
    pub fn tex_spin_offset(&self, now_ms: u64) -> f32 {
        if !self.tex_spin || self.tex_spin_speed == 0 {
            return 0.0;
        }
        now_ms as f32 / (1000.0 * (1000.0 / self.tex_spin_speed as f32))
    }
}

/// Every theme in a theme file, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Themes {
    #[serde(default, rename = "theme")]
    pub themes: Vec<ThemeConfig>,
}

impl Themes {
    pub fn from_toml(text: &str, path: &Path) -> Result<Themes> {
        toml::from_str(text).map_err(|source| Error::ThemeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Themes> {
        debug!("loading themes: {}", path.display());

        let text = std::fs::read_to_string(path).map_err(|source| Error::ThemeRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text, path)
    }

    pub fn find(&self, name: &str) -> Result<&ThemeConfig> {
        self.themes
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| Error::UnknownTheme(name.to_string()))
    }
}

fn default_true() -> bool {
    true
}
fn default_name() -> String {
    "Un named".to_string()
}
fn default_style() -> String {
    "default".to_string()
}
fn default_pieces() -> String {
    "classiclow".to_string()
}
fn default_board() -> String {
    "classic".to_string()
}
fn default_white_name() -> String {
    "White".to_string()
}
fn default_black_name() -> String {
    "Black".to_string()
}
fn default_selector_colour() -> [f32; 4] {
    [1.0, 1.0, 0.0, 0.25]
}
fn default_selector_size() -> f32 {
    0.5
}
