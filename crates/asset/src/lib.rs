use std::io::Read;
use std::path::{Path, PathBuf};

use image::io::Reader as ImageReader;
use scene::{Image, Mesh};
use thiserror::Error;
use tracing::debug;

pub mod dcm;
pub mod manifest;

pub use dcm::{DcmFormat, FileFormatError, FormatErrorKind};
pub use manifest::{PieceAssets, PieceSetManifest, PIECE_MODELS};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("couldn't open {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FileFormatError,
    },

    #[error("couldn't decode image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path, .. }
            | LoadError::Read { path, .. }
            | LoadError::Format { path, .. }
            | LoadError::Image { path, .. } => path,
        }
    }
}

pub(crate) fn load_text_from_disk(path: &Path) -> Result<String, LoadError> {
    let mut file = std::fs::File::open(path).map_err(|source| LoadError::NotFound {
        path: path.to_path_buf(),
        source,
    })?;

    let mut data: Vec<u8> = Vec::new();
    file.read_to_end(&mut data).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // Asset files are ASCII; anything else will fail to tokenize anyway.
    Ok(String::from_utf8_lossy(&data).into_owned())
}

pub fn load_mesh_from_file(path: &Path, format: DcmFormat) -> Result<Mesh, LoadError> {
    debug!("loading mesh: {}", path.display());

    let text = load_text_from_disk(path)?;
    dcm::parse(&text, format).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads a DCM mesh of whichever revision the header names.
pub fn load_any_mesh_from_file(path: &Path) -> Result<Mesh, LoadError> {
    debug!("loading mesh: {}", path.display());

    let text = load_text_from_disk(path)?;
    dcm::parse_any(&text).map_err(|source| LoadError::Format {
        path: path.to_path_buf(),
        source,
    })
}

/// Decodes an image to RGBA8 without flipping it.
pub fn load_image_from_file(path: &Path) -> Result<Image, LoadError> {
    debug!("loading texture: {}", path.display());

    let reader = ImageReader::open(path)
        .map_err(|source| LoadError::NotFound { path: path.to_path_buf(), source })?
        .with_guessed_format()
        .map_err(|source| LoadError::Read { path: path.to_path_buf(), source })?;

    let img = reader
        .decode()
        .map_err(|source| LoadError::Image { path: path.to_path_buf(), source })?
        .to_rgba8();

    Ok(Image {
        width: img.width(),
        height: img.height(),
        data: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_mesh_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.dcm");
        let e = load_mesh_from_file(&path, DcmFormat::Static).unwrap_err();
        assert!(matches!(e, LoadError::NotFound { .. }));
        assert_eq!(e.path(), path.as_path());
    }

    #[test]
    fn malformed_mesh_is_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.dcm");
        std::fs::write(&path, "DCM 100\n1\n0 0 zero\n").unwrap();

        match load_mesh_from_file(&path, DcmFormat::Static) {
            Err(LoadError::Format { source, .. }) => {
                assert_eq!(source.field, "vertex position");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn image_round_trips_pixels() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");

        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, image::Rgba([0, 0, 255, 128]));
        img.save(&path).unwrap();

        let loaded = load_image_from_file(&path).unwrap();
        assert_eq!((loaded.width, loaded.height), (2, 1));
        assert_eq!(loaded.data, vec![255, 0, 0, 255, 0, 0, 255, 128]);
    }

    #[test]
    fn garbage_image_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        std::fs::write(&path, b"\x89PNG\r\n\x1a\nnot really").unwrap();
        assert!(matches!(load_image_from_file(&path), Err(LoadError::Image { .. })));
    }
}
