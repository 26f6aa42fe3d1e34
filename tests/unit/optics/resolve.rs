use super::*;

use crate::assets::store::{ImageDesc, MemoryImageStore};
use crate::settings::catalog::Resolution;

fn bound_settings() -> ProjectorSettings {
    ProjectorSettings {
        projected_texture: ProjectedTexture::BoundImage,
        use_custom_texture_res: true,
        ..Default::default()
    }
}

#[test]
fn catalog_entry_by_default() {
    let store = MemoryImageStore::new();
    let s = ProjectorSettings {
        resolution: Resolution::Xga,
        ..Default::default()
    };
    let r = resolve(&s, None, &store);
    assert_eq!((r.width, r.height), (1024.0, 768.0));
    assert_eq!(r.aspect(), 0.75);
}

#[test]
fn bound_image_defines_resolution() {
    let mut store = MemoryImageStore::new();
    let id = store.create(ImageDesc::color_grid("img", 500, 250)).unwrap();
    let r = resolve(&bound_settings(), Some(id), &store);
    assert_eq!((r.width, r.height), (500.0, 250.0));
}

#[test]
fn unbound_falls_back() {
    let store = MemoryImageStore::new();
    assert_eq!(
        resolve(&bound_settings(), None, &store),
        ResolvedResolution::FALLBACK
    );
    assert_eq!(
        resolve(&bound_settings(), Some(ImageId(42)), &store),
        ResolvedResolution::FALLBACK
    );
}

#[test]
fn bound_image_ignored_without_flag_or_source() {
    let mut store = MemoryImageStore::new();
    let id = store.create(ImageDesc::color_grid("img", 500, 250)).unwrap();

    let no_flag = ProjectorSettings {
        use_custom_texture_res: false,
        ..bound_settings()
    };
    assert_eq!(resolve(&no_flag, Some(id), &store).width, 1920.0);

    let checker = ProjectorSettings {
        projected_texture: ProjectedTexture::Checker,
        ..bound_settings()
    };
    assert_eq!(resolve(&checker, Some(id), &store).width, 1920.0);
    assert!(!uses_bound_image_resolution(&checker));
}
