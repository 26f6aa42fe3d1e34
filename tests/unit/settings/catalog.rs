use super::*;

#[test]
fn every_key_parses_to_its_dimensions() {
    for r in Resolution::ALL {
        let (w, h) = r.dimensions();
        assert!(w > 0 && h > 0, "{r}");
        assert_eq!(format!("{w}x{h}"), r.key());
        assert_eq!(r.key().parse::<Resolution>().unwrap(), r);
    }
}

#[test]
fn keys_are_unique() {
    let mut keys: Vec<_> = Resolution::ALL.iter().map(|r| r.key()).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), Resolution::ALL.len());
}

#[test]
fn default_is_full_hd() {
    assert_eq!(Resolution::default(), Resolution::FullHd);
    assert_eq!(Resolution::default().dimensions(), (1920, 1080));
}

#[test]
fn labels_carry_the_aspect_group() {
    assert_eq!(Resolution::Xga.label(), "XGA (1024x768) 4:3");
    assert!(Resolution::Native4k.label().ends_with("17:9"));
    assert!(Resolution::Square.label().ends_with("1:1"));
}

#[test]
fn catalog_image_name_uses_key() {
    assert_eq!(Resolution::Xga.catalog_image_name(), "_proj.tex.1024x768");
}

#[test]
fn serde_uses_key() {
    let s = serde_json::to_string(&Resolution::Xga).unwrap();
    assert_eq!(s, r#""1024x768""#);
    let r: Resolution = serde_json::from_str(r#""800x600""#).unwrap();
    assert_eq!(r, Resolution::Svga);
    assert!(serde_json::from_str::<Resolution>(r#""123x45""#).is_err());
}

#[test]
fn parse_dimensions_rejects_garbage() {
    assert_eq!(parse_dimensions(" 640x480 ").unwrap(), (640, 480));
    assert!(parse_dimensions("640").is_err());
    assert!(parse_dimensions("0x480").is_err());
    assert!(parse_dimensions("ax480").is_err());
    assert!("1x1".parse::<Resolution>().is_err());
}

#[test]
fn dimensions_are_fixed_per_entry() {
    assert_eq!(Resolution::Xga.dimensions(), (1024, 768));
    assert_eq!(Resolution::Native4k.dimensions(), (4096, 2160));
    assert_eq!(Resolution::Square.dimensions(), (1000, 1000));
    assert_eq!(" 1280x720".parse::<Resolution>().unwrap(), Resolution::Hd720);
    assert!(Resolution::ALL.iter().all(|r| r.dimensions().0 > 0 && r.dimensions().1 > 0));
}
