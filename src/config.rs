use crate::vector::Color;
use std::path::{Path, PathBuf};

/// Generator configuration. Every value is fixed at compile time.
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory holding the source glyph and receiving every output file
    pub asset_dir: PathBuf,
    pub background: BackgroundConfig,
    pub icon: IconConfig,
    pub banner: BannerConfig,
}

/// Rounded-rectangle background behind the glyph
#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    pub color: Color,
    /// Corner radius as a fraction of the shorter side
    pub corner_radius_ratio: f32,
}

/// Icon container and standalone PNG settings
#[derive(Clone, Debug)]
pub struct IconConfig {
    /// Frame sizes, in container order
    pub sizes: Vec<u32>,
    /// Sizes additionally written as standalone PNG files
    pub png_sizes: Vec<u32>,
    /// Share of the icon edge occupied by the glyph
    pub glyph_ratio: f32,
    /// Oversampling factor for glyph and PNG renders
    pub supersample: u32,
}

/// Banner (glyph followed by text) settings
#[derive(Clone, Debug)]
pub struct BannerConfig {
    /// Height of the glyph in pixels
    pub logo_height: u32,
    /// Font size in pixels per em
    pub font_size: f32,
    /// Padding around the content on every side
    pub padding: u32,
    pub text: String,
    pub text_color: Color,
    /// Font files tried in order; the first existing one wins
    pub font_candidates: Vec<PathBuf>,
    /// Oversampling factor for the background and glyph renders
    pub supersample: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            asset_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("logo"),
            background: BackgroundConfig {
                color: Color::rgb(0, 132, 190),
                // 202.899 / 2000 in the hand-drawn logo
                corner_radius_ratio: 0.1014,
            },
            icon: IconConfig {
                sizes: vec![256, 128, 64, 48, 32, 16],
                png_sizes: vec![32, 64],
                glyph_ratio: 0.78,
                supersample: 4,
            },
            banner: BannerConfig {
                logo_height: 72,
                font_size: 72.0,
                padding: 16,
                text: "loom".to_string(),
                text_color: Color::rgb(255, 255, 255),
                font_candidates: vec![
                    // Windows: Segoe UI Bold
                    PathBuf::from("C:/Windows/Fonts/segoeuib.ttf"),
                    // Linux
                    PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
                    // macOS
                    PathBuf::from("/System/Library/Fonts/Helvetica.ttc"),
                ],
                supersample: 4,
            },
        }
    }
}

impl Config {
    /// Same settings with every file read from and written to `dir`
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    pub fn svg_path(&self) -> PathBuf {
        self.asset_dir.join("bloom.svg")
    }

    pub fn ico_path(&self) -> PathBuf {
        self.asset_dir.join("bloom.ico")
    }

    pub fn png_path(&self, size: u32) -> PathBuf {
        self.asset_dir.join(format!("bloom{}.png", size))
    }

    pub fn banner_path(&self) -> PathBuf {
        self.asset_dir.join("banner.png")
    }
}
