use super::*;

use crate::assets::store::{ImageSource, MemoryImageStore};

#[test]
fn ensure_creates_one_persistent_image_per_resolution() {
    let mut store = MemoryImageStore::new();
    ensure_catalog_images(&mut store).unwrap();
    assert_eq!(store.len(), Resolution::ALL.len());
    for r in Resolution::ALL {
        let id = store.find(&r.catalog_image_name()).unwrap();
        let entry = store.get(id).unwrap();
        assert!(entry.persistent);
        assert_eq!((entry.desc.width, entry.desc.height), r.dimensions());
        assert!(matches!(entry.desc.source, ImageSource::Generated { alpha: true, .. }));
    }
}

#[test]
fn ensure_is_idempotent() {
    let mut store = MemoryImageStore::new();
    ensure_catalog_images(&mut store).unwrap();
    ensure_catalog_images(&mut store).unwrap();
    assert_eq!(store.len(), Resolution::ALL.len());
}

#[test]
fn catalog_image_creates_lazily() {
    let mut store = MemoryImageStore::new();
    let a = catalog_image(&mut store, Resolution::Xga).unwrap();
    let b = catalog_image(&mut store, Resolution::Xga).unwrap();
    assert_eq!(a, b);
    assert_eq!(store.len(), 1);
    assert_eq!(store.native_size(a), Some((1024, 768)));
}
