//! Piece-set manifests (`set.cfg`).
//!
//! Twelve mesh/texture path pairs, one path per line, in model order: white
//! pawn, black pawn, white knight, black knight, bishops, rooks, queens and
//! kings. Paths are relative to the manifest.

use std::path::{Path, PathBuf};

use crate::dcm::{FileFormatError, FormatErrorKind};
use crate::{load_text_from_disk, LoadError};

pub const PIECE_MODELS: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct PieceAssets {
    pub mesh: PathBuf,
    pub texture: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceSetManifest {
    pub pieces: Vec<PieceAssets>,
}

impl PieceSetManifest {
    pub fn parse(text: &str, base: &Path) -> Result<Self, FileFormatError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(n, l)| (n + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let mut last_line = 0;
        let mut next = |field: &'static str| -> Result<PathBuf, FileFormatError> {
            match lines.next() {
                Some((n, l)) => {
                    last_line = n;
                    Ok(base.join(l))
                }
                None => Err(FileFormatError {
                    line: last_line,
                    field,
                    kind: FormatErrorKind::Truncated,
                }),
            }
        };

        let mut pieces = Vec::with_capacity(PIECE_MODELS);
        for _ in 0..PIECE_MODELS {
            let mesh = next("piece mesh")?;
            let texture = next("piece texture")?;
            pieces.push(PieceAssets { mesh, texture });
        }

        Ok(Self { pieces })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = load_text_from_disk(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::parse(&text, base).map_err(|source| LoadError::Format {
            path: path.to_path_buf(),
            source,
        })
    }
}
