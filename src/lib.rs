pub mod animation;
pub mod backend;
pub mod board;
pub mod cache;
pub mod draw;
pub mod error;
pub mod render;
pub mod resources;
pub mod selector;
pub mod theme;

pub use animation::{PieceMove, PIECE_MOVE_SPEED};
pub use backend::{Backend, Command, DrawBatch, Pass, RecordingBackend, Topology, Vertex};
pub use board::{square_at, Board, Piece, PieceKind, Side};
pub use cache::ResourceCache;
pub use error::{Error, Result};
pub use render::Scene;
pub use resources::Resources;
pub use selector::{Direction, Selector};
pub use theme::{SelectorConfig, ThemeConfig, Themes};
