use std::path::PathBuf;

use asset::LoadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("couldn't read theme file {}: {source}", path.display())]
    ThemeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid theme file {}: {source}", path.display())]
    ThemeParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no theme named {0:?}")]
    UnknownTheme(String),

    #[error("square {0} is off the board")]
    InvalidSquare(usize),

    #[error("a piece move is already in progress")]
    MoveInProgress,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
