//! Error types for the logo generator.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse SVG: {0}")]
    Svg(#[from] usvg::Error),

    #[error("image operation failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to parse font {path}: {source}")]
    Font {
        path: PathBuf,
        #[source]
        source: ttf_parser::FaceParsingError,
    },

    #[error("no suitable font found, tried: {}", display_paths(.tried))]
    FontNotFound { tried: Vec<PathBuf> },

    #[error("cannot allocate a {width}x{height} canvas")]
    Canvas { width: u32, height: u32 },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
