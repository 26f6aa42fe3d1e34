use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgb;
use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::settings::catalog::Resolution;
use crate::settings::fields::SettingField;

/// Image source feeding the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectedTexture {
    /// Generated checker pattern, clipped to the catalog image.
    #[default]
    #[serde(rename = "checker_texture")]
    Checker,
    /// Shared catalog color-grid image.
    #[serde(rename = "color_grid_texture")]
    ColorGrid,
    /// Image bound by the user.
    #[serde(rename = "custom_texture")]
    BoundImage,
}

impl ProjectedTexture {
    /// All variants in menu order.
    pub const ALL: [ProjectedTexture; 3] = [
        ProjectedTexture::Checker,
        ProjectedTexture::ColorGrid,
        ProjectedTexture::BoundImage,
    ];

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            ProjectedTexture::Checker => "Checker",
            ProjectedTexture::ColorGrid => "Color Grid",
            ProjectedTexture::BoundImage => "Custom Texture",
        }
    }
}

/// User-facing settings stored on a projector's controller.
///
/// Missing fields deserialize to the defaults a freshly created projector gets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorSettings {
    /// Distance to image width ratio.
    pub throw_ratio: f64,
    /// Emitter power in watts.
    pub power: f64,
    /// Catalog resolution.
    pub resolution: Resolution,
    /// Let the bound image define the resolution when it is the projected source.
    pub use_custom_texture_res: bool,
    /// Horizontal lens shift in percent.
    pub h_shift: f64,
    /// Vertical lens shift in percent.
    pub v_shift: f64,
    /// Horizontal keystone amount. Stored only.
    pub h_keystone: f64,
    /// Vertical keystone amount. Stored only.
    pub v_keystone: f64,
    /// Secondary checker color.
    pub projected_color: Rgb,
    /// Active image source.
    pub projected_texture: ProjectedTexture,
    /// Overlay a grid at pixel boundaries.
    pub show_pixel_grid: bool,
}

impl Default for ProjectorSettings {
    fn default() -> Self {
        Self {
            throw_ratio: 0.8,
            power: 1000.0,
            resolution: Resolution::FullHd,
            use_custom_texture_res: true,
            h_shift: 0.0,
            v_shift: 0.0,
            h_keystone: 0.0,
            v_keystone: 0.0,
            projected_color: Rgb::new(1.0, 1.0, 1.0),
            projected_texture: ProjectedTexture::Checker,
            show_pixel_grid: false,
        }
    }
}

impl ProjectorSettings {
    /// Reject values outside their hard domain. Soft ranges are not enforced.
    pub fn validate(&self) -> ProjectorResult<()> {
        for field in SettingField::ALL {
            if let Some(v) = self.scalar(field) {
                field.spec().domain.check(field, v)?;
            }
        }
        self.projected_color.validate()
    }

    /// Numeric value of a scalar field.
    pub fn scalar(&self, field: SettingField) -> Option<f64> {
        match field {
            SettingField::ThrowRatio => Some(self.throw_ratio),
            SettingField::Power => Some(self.power),
            SettingField::HShift => Some(self.h_shift),
            SettingField::VShift => Some(self.v_shift),
            SettingField::HKeystone => Some(self.h_keystone),
            SettingField::VKeystone => Some(self.v_keystone),
            SettingField::Resolution
            | SettingField::UseCustomTextureRes
            | SettingField::ProjectedColor
            | SettingField::ProjectedTexture
            | SettingField::ShowPixelGrid => None,
        }
    }

    /// Parse settings from JSON and validate them.
    pub fn from_json(s: &str) -> ProjectorResult<Self> {
        let settings: Self = serde_json::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Every change needed to turn `self` into `other`, in field order.
    pub fn diff(&self, other: &Self) -> Vec<SettingChange> {
        SettingField::ALL
            .into_iter()
            .map(|f| SettingChange::read(other, f))
            .filter(|c| SettingChange::read(self, c.field()) != *c)
            .collect()
    }
}

/// One UI event: a field name and its new value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum SettingChange {
    /// New throw ratio.
    ThrowRatio(f64),
    /// New power.
    Power(f64),
    /// New catalog resolution.
    Resolution(Resolution),
    /// New custom-resolution flag.
    UseCustomTextureRes(bool),
    /// New horizontal shift.
    HShift(f64),
    /// New vertical shift.
    VShift(f64),
    /// New horizontal keystone.
    HKeystone(f64),
    /// New vertical keystone.
    VKeystone(f64),
    /// New checker color.
    ProjectedColor(Rgb),
    /// New projected source.
    ProjectedTexture(ProjectedTexture),
    /// New pixel-grid visibility.
    ShowPixelGrid(bool),
}

impl SettingChange {
    /// Field this change targets.
    pub fn field(&self) -> SettingField {
        match self {
            SettingChange::ThrowRatio(_) => SettingField::ThrowRatio,
            SettingChange::Power(_) => SettingField::Power,
            SettingChange::Resolution(_) => SettingField::Resolution,
            SettingChange::UseCustomTextureRes(_) => SettingField::UseCustomTextureRes,
            SettingChange::HShift(_) => SettingField::HShift,
            SettingChange::VShift(_) => SettingField::VShift,
            SettingChange::HKeystone(_) => SettingField::HKeystone,
            SettingChange::VKeystone(_) => SettingField::VKeystone,
            SettingChange::ProjectedColor(_) => SettingField::ProjectedColor,
            SettingChange::ProjectedTexture(_) => SettingField::ProjectedTexture,
            SettingChange::ShowPixelGrid(_) => SettingField::ShowPixelGrid,
        }
    }

    /// Current value of `field` in `settings`, as a change.
    pub fn read(settings: &ProjectorSettings, field: SettingField) -> Self {
        match field {
            SettingField::ThrowRatio => SettingChange::ThrowRatio(settings.throw_ratio),
            SettingField::Power => SettingChange::Power(settings.power),
            SettingField::Resolution => SettingChange::Resolution(settings.resolution),
            SettingField::UseCustomTextureRes => {
                SettingChange::UseCustomTextureRes(settings.use_custom_texture_res)
            }
            SettingField::HShift => SettingChange::HShift(settings.h_shift),
            SettingField::VShift => SettingChange::VShift(settings.v_shift),
            SettingField::HKeystone => SettingChange::HKeystone(settings.h_keystone),
            SettingField::VKeystone => SettingChange::VKeystone(settings.v_keystone),
            SettingField::ProjectedColor => SettingChange::ProjectedColor(settings.projected_color),
            SettingField::ProjectedTexture => {
                SettingChange::ProjectedTexture(settings.projected_texture)
            }
            SettingField::ShowPixelGrid => SettingChange::ShowPixelGrid(settings.show_pixel_grid),
        }
    }

    /// Write the new value into `settings`.
    pub fn apply_to(&self, settings: &mut ProjectorSettings) {
        match *self {
            SettingChange::ThrowRatio(v) => settings.throw_ratio = v,
            SettingChange::Power(v) => settings.power = v,
            SettingChange::Resolution(v) => settings.resolution = v,
            SettingChange::UseCustomTextureRes(v) => settings.use_custom_texture_res = v,
            SettingChange::HShift(v) => settings.h_shift = v,
            SettingChange::VShift(v) => settings.v_shift = v,
            SettingChange::HKeystone(v) => settings.h_keystone = v,
            SettingChange::VKeystone(v) => settings.v_keystone = v,
            SettingChange::ProjectedColor(v) => settings.projected_color = v,
            SettingChange::ProjectedTexture(v) => settings.projected_texture = v,
            SettingChange::ShowPixelGrid(v) => settings.show_pixel_grid = v,
        }
    }

    /// Parse a JSON list of changes.
    pub fn list_from_json(s: &str) -> ProjectorResult<Vec<Self>> {
        serde_json::from_str(s).map_err(|e| ProjectorError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/model.rs"]
mod tests;
