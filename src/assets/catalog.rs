use crate::assets::store::{ImageDesc, ImageStore};
use crate::foundation::error::ProjectorResult;
use crate::foundation::ids::ImageId;
use crate::settings::catalog::Resolution;

/// Shared placeholder image for one catalog resolution, created on first use.
pub fn catalog_image<S: ImageStore + ?Sized>(
    store: &mut S,
    resolution: Resolution,
) -> ProjectorResult<ImageId> {
    let name = resolution.catalog_image_name();
    if let Some(id) = store.find(&name) {
        return Ok(id);
    }
    let (w, h) = resolution.dimensions();
    let id = store.create(ImageDesc::color_grid(name, w, h))?;
    store.set_persistent(id, true)?;
    Ok(id)
}

/// Make sure every catalog resolution has its shared image. Idempotent.
#[tracing::instrument(skip(store))]
pub fn ensure_catalog_images<S: ImageStore + ?Sized>(store: &mut S) -> ProjectorResult<()> {
    for resolution in Resolution::ALL {
        catalog_image(store, resolution)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
