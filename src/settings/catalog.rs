use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ProjectorError, ProjectorResult};

/// Fixed catalog of projector resolutions.
///
/// Serialized as the `WxH` key, e.g. `"1920x1080"`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Resolution {
    /// WXGA, 16:10.
    #[serde(rename = "1280x800")]
    Wxga,
    /// WXGA+, 16:10.
    #[serde(rename = "1440x900")]
    WxgaPlus,
    /// WUXGA, 16:10.
    #[serde(rename = "1920x1200")]
    Wuxga,
    /// 720p, 16:9.
    #[serde(rename = "1280x720")]
    Hd720,
    /// 1080p, 16:9.
    #[serde(rename = "1920x1080")]
    #[default]
    FullHd,
    /// 4K Ultra HD, 16:9.
    #[serde(rename = "3840x2160")]
    UltraHd,
    /// SVGA, 4:3.
    #[serde(rename = "800x600")]
    Svga,
    /// XGA, 4:3.
    #[serde(rename = "1024x768")]
    Xga,
    /// SXGA+, 4:3.
    #[serde(rename = "1400x1050")]
    SxgaPlus,
    /// UXGA, 4:3.
    #[serde(rename = "1600x1200")]
    Uxga,
    /// Native 4K, 17:9.
    #[serde(rename = "4096x2160")]
    Native4k,
    /// Square, 1:1.
    #[serde(rename = "1000x1000")]
    Square,
}

impl Resolution {
    /// Every catalog entry in menu order.
    pub const ALL: [Resolution; 12] = [
        Resolution::Wxga,
        Resolution::WxgaPlus,
        Resolution::Wuxga,
        Resolution::Hd720,
        Resolution::FullHd,
        Resolution::UltraHd,
        Resolution::Svga,
        Resolution::Xga,
        Resolution::SxgaPlus,
        Resolution::Uxga,
        Resolution::Native4k,
        Resolution::Square,
    ];

    /// Catalog key, `WxH`.
    pub fn key(self) -> &'static str {
        match self {
            Resolution::Wxga => "1280x800",
            Resolution::WxgaPlus => "1440x900",
            Resolution::Wuxga => "1920x1200",
            Resolution::Hd720 => "1280x720",
            Resolution::FullHd => "1920x1080",
            Resolution::UltraHd => "3840x2160",
            Resolution::Svga => "800x600",
            Resolution::Xga => "1024x768",
            Resolution::SxgaPlus => "1400x1050",
            Resolution::Uxga => "1600x1200",
            Resolution::Native4k => "4096x2160",
            Resolution::Square => "1000x1000",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Resolution::Wxga => "WXGA (1280x800) 16:10",
            Resolution::WxgaPlus => "WXGA+ (1440x900) 16:10",
            Resolution::Wuxga => "WUXGA (1920x1200) 16:10",
            Resolution::Hd720 => "720p (1280x720) 16:9",
            Resolution::FullHd => "1080p (1920x1080) 16:9",
            Resolution::UltraHd => "4K Ultra HD (3840x2160) 16:9",
            Resolution::Svga => "SVGA (800x600) 4:3",
            Resolution::Xga => "XGA (1024x768) 4:3",
            Resolution::SxgaPlus => "SXGA+ (1400x1050) 4:3",
            Resolution::Uxga => "UXGA (1600x1200) 4:3",
            Resolution::Native4k => "Native 4K (4096x2160) 17:9",
            Resolution::Square => "Square (1000x1000) 1:1",
        }
    }

    /// Pixel dimensions.
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Resolution::Wxga => (1280, 800),
            Resolution::WxgaPlus => (1440, 900),
            Resolution::Wuxga => (1920, 1200),
            Resolution::Hd720 => (1280, 720),
            Resolution::FullHd => (1920, 1080),
            Resolution::UltraHd => (3840, 2160),
            Resolution::Svga => (800, 600),
            Resolution::Xga => (1024, 768),
            Resolution::SxgaPlus => (1400, 1050),
            Resolution::Uxga => (1600, 1200),
            Resolution::Native4k => (4096, 2160),
            Resolution::Square => (1000, 1000),
        }
    }

    /// Name of the shared placeholder image for this resolution.
    pub fn catalog_image_name(self) -> String {
        format!("_proj.tex.{}", self.key())
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Resolution {
    type Err = ProjectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dims = parse_dimensions(s)?;
        Resolution::ALL
            .into_iter()
            .find(|r| r.dimensions() == dims)
            .ok_or_else(|| ProjectorError::validation(format!("unknown resolution '{s}'")))
    }
}

/// Parse a `WxH` string into pixel dimensions.
pub fn parse_dimensions(s: &str) -> ProjectorResult<(u32, u32)> {
    let (w, h) = s
        .trim()
        .split_once('x')
        .ok_or_else(|| ProjectorError::validation(format!("expected WxH, got '{s}'")))?;
    let w: u32 = w
        .parse()
        .map_err(|_| ProjectorError::validation(format!("bad width in '{s}'")))?;
    let h: u32 = h
        .parse()
        .map_err(|_| ProjectorError::validation(format!("bad height in '{s}'")))?;
    if w == 0 || h == 0 {
        return Err(ProjectorError::validation(format!(
            "dimensions must be non-zero, got '{s}'"
        )));
    }
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/settings/catalog.rs"]
mod tests;
