use serde::Serialize;

use crate::foundation::error::{ProjectorError, ProjectorResult};

/// Names of the settings fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    /// `throw_ratio`
    ThrowRatio,
    /// `power`
    Power,
    /// `resolution`
    Resolution,
    /// `use_custom_texture_res`
    UseCustomTextureRes,
    /// `h_shift`
    HShift,
    /// `v_shift`
    VShift,
    /// `h_keystone`
    HKeystone,
    /// `v_keystone`
    VKeystone,
    /// `projected_color`
    ProjectedColor,
    /// `projected_texture`
    ProjectedTexture,
    /// `show_pixel_grid`
    ShowPixelGrid,
}

/// Recompute routine a field change fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// Field of view, lens scale and source selection.
    ThrowRatio,
    /// Controller shift and lens translation.
    LensShift,
    /// Catalog rebinding, then throw ratio and pixel grid.
    Resolution,
    /// Checker secondary color.
    CheckerColor,
    /// Source selection and everything that depends on the resolved resolution.
    ProjectedTexture,
    /// Emitter intensity.
    Power,
    /// Pixel-grid resolution and visibility.
    PixelGrid,
    /// Keystone placeholder; has no effect.
    Keystone,
}

/// Hard domain of a field. Values outside it are rejected by validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Finite and `> 0`.
    Positive,
    /// Finite and `>= 0`.
    NonNegative,
    /// Any finite number.
    Finite,
    /// Not a number: enum, flag or color.
    Discrete,
}

impl Domain {
    /// Check `v` against the domain.
    pub fn check(self, field: SettingField, v: f64) -> ProjectorResult<()> {
        let ok = match self {
            Domain::Positive => v.is_finite() && v > 0.0,
            Domain::NonNegative => v.is_finite() && v >= 0.0,
            Domain::Finite => v.is_finite(),
            Domain::Discrete => true,
        };
        if ok {
            Ok(())
        } else {
            Err(ProjectorError::validation(format!(
                "{} must be {}, got {v}",
                field.name(),
                self.describe()
            )))
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Domain::Positive => "finite and > 0",
            Domain::NonNegative => "finite and >= 0",
            Domain::Finite => "finite",
            Domain::Discrete => "one of its variants",
        }
    }
}

/// Declaration of one settings field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FieldSpec {
    /// Field name as used in settings files and events.
    pub name: &'static str,
    /// UI label.
    pub label: &'static str,
    /// Advisory slider range.
    pub soft_range: Option<(f64, f64)>,
    /// Hard domain.
    pub domain: Domain,
    /// Routine fired on change.
    pub trigger: Trigger,
}

impl SettingField {
    /// All fields in declaration order.
    pub const ALL: [SettingField; 11] = [
        SettingField::ThrowRatio,
        SettingField::Power,
        SettingField::Resolution,
        SettingField::UseCustomTextureRes,
        SettingField::HShift,
        SettingField::VShift,
        SettingField::HKeystone,
        SettingField::VKeystone,
        SettingField::ProjectedColor,
        SettingField::ProjectedTexture,
        SettingField::ShowPixelGrid,
    ];

    /// Field name.
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Declaration of this field.
    pub fn spec(self) -> FieldSpec {
        let (name, label, soft_range, domain, trigger) = match self {
            SettingField::ThrowRatio => (
                "throw_ratio",
                "Throw Ratio",
                Some((0.4, 3.0)),
                Domain::Positive,
                Trigger::ThrowRatio,
            ),
            SettingField::Power => (
                "power",
                "Projector Power",
                Some((0.0, 999_999.0)),
                Domain::NonNegative,
                Trigger::Power,
            ),
            SettingField::Resolution => (
                "resolution",
                "Resolution",
                None,
                Domain::Discrete,
                Trigger::Resolution,
            ),
            SettingField::UseCustomTextureRes => (
                "use_custom_texture_res",
                "Let Image Define Projector Resolution",
                None,
                Domain::Discrete,
                Trigger::Resolution,
            ),
            SettingField::HShift => (
                "h_shift",
                "Horizontal Shift",
                Some((-20.0, 20.0)),
                Domain::Finite,
                Trigger::LensShift,
            ),
            SettingField::VShift => (
                "v_shift",
                "Vertical Shift",
                Some((-20.0, 20.0)),
                Domain::Finite,
                Trigger::LensShift,
            ),
            SettingField::HKeystone => (
                "h_keystone",
                "Horizontal KeyStone",
                Some((-1.0, 1.0)),
                Domain::Finite,
                Trigger::Keystone,
            ),
            SettingField::VKeystone => (
                "v_keystone",
                "Vertical KeyStone",
                Some((-1.0, 1.0)),
                Domain::Finite,
                Trigger::Keystone,
            ),
            SettingField::ProjectedColor => (
                "projected_color",
                "Projected Color",
                None,
                Domain::Discrete,
                Trigger::CheckerColor,
            ),
            SettingField::ProjectedTexture => (
                "projected_texture",
                "Projected Texture",
                None,
                Domain::Discrete,
                Trigger::ProjectedTexture,
            ),
            SettingField::ShowPixelGrid => (
                "show_pixel_grid",
                "Show Pixel Grid",
                None,
                Domain::Discrete,
                Trigger::PixelGrid,
            ),
        };
        FieldSpec {
            name,
            label,
            soft_range,
            domain,
            trigger,
        }
    }

    /// Whether `v` lies inside the advisory range. Fields without one always pass.
    pub fn in_soft_range(self, v: f64) -> bool {
        self.spec()
            .soft_range
            .is_none_or(|(lo, hi)| (lo..=hi).contains(&v))
    }
}

impl std::fmt::Display for SettingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
