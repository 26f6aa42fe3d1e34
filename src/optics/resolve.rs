use serde::Serialize;

use crate::assets::store::ImageStore;
use crate::foundation::ids::ImageId;
use crate::settings::model::{ProjectedTexture, ProjectorSettings};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
/// Effective projector resolution in pixels.
pub struct ResolvedResolution {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ResolvedResolution {
    /// Used when the bound image should define the resolution but none is usable.
    pub const FALLBACK: Self = Self {
        width: 300.0,
        height: 300.0,
    };

    /// `height / width`.
    pub fn aspect(self) -> f64 {
        self.height / self.width
    }
}

/// Whether the bound image, rather than the catalog, defines the resolution.
pub fn uses_bound_image_resolution(settings: &ProjectorSettings) -> bool {
    settings.use_custom_texture_res && settings.projected_texture == ProjectedTexture::BoundImage
}

/// Resolution the propagator should use for `settings`. Never cached.
pub fn resolve<S: ImageStore + ?Sized>(
    settings: &ProjectorSettings,
    bound: Option<ImageId>,
    store: &S,
) -> ResolvedResolution {
    if uses_bound_image_resolution(settings) {
        return bound
            .and_then(|id| store.native_size(id))
            .filter(|&(w, h)| w > 0 && h > 0)
            .map(|(w, h)| ResolvedResolution {
                width: f64::from(w),
                height: f64::from(h),
            })
            .unwrap_or(ResolvedResolution::FALLBACK);
    }
    let (w, h) = settings.resolution.dimensions();
    ResolvedResolution {
        width: f64::from(w),
        height: f64::from(h),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/optics/resolve.rs"]
mod tests;
