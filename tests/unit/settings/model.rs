use super::*;

use crate::settings::fields::{Domain, Trigger};

#[test]
fn defaults_match_a_new_projector() {
    let s = ProjectorSettings::default();
    assert_eq!(s.throw_ratio, 0.8);
    assert_eq!(s.power, 1000.0);
    assert_eq!(s.resolution, Resolution::FullHd);
    assert!(s.use_custom_texture_res);
    assert_eq!(s.projected_texture, ProjectedTexture::Checker);
    assert!(!s.show_pixel_grid);
    assert!(s.validate().is_ok());
}

#[test]
fn missing_fields_take_defaults() {
    let s = ProjectorSettings::from_json(
        r#"{"throw_ratio": 1.5, "projected_texture": "color_grid_texture"}"#,
    )
    .unwrap();
    assert_eq!(s.throw_ratio, 1.5);
    assert_eq!(s.projected_texture, ProjectedTexture::ColorGrid);
    assert_eq!(s.power, 1000.0);
}

#[test]
fn soft_range_is_advisory_hard_domain_is_not() {
    let wide = ProjectorSettings {
        throw_ratio: 10.0,
        h_shift: 80.0,
        ..Default::default()
    };
    assert!(wide.validate().is_ok());
    assert!(!SettingField::ThrowRatio.in_soft_range(10.0));

    for bad in [
        ProjectorSettings {
            throw_ratio: 0.0,
            ..Default::default()
        },
        ProjectorSettings {
            power: -1.0,
            ..Default::default()
        },
        ProjectorSettings {
            v_shift: f64::INFINITY,
            ..Default::default()
        },
        ProjectorSettings {
            projected_color: Rgb::new(2.0, 0.0, 0.0),
            ..Default::default()
        },
    ] {
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, ProjectorError::Validation(_)), "{bad:?}");
    }
}

#[test]
fn change_json_uses_field_and_value() {
    let c: SettingChange =
        serde_json::from_str(r#"{"field": "resolution", "value": "1024x768"}"#).unwrap();
    assert_eq!(c, SettingChange::Resolution(Resolution::Xga));
    assert_eq!(c.field(), SettingField::Resolution);

    let s = serde_json::to_string(&SettingChange::ShowPixelGrid(true)).unwrap();
    assert_eq!(s, r#"{"field":"show_pixel_grid","value":true}"#);
}

#[test]
fn change_list_parses() {
    let list = SettingChange::list_from_json(
        r#"[{"field": "throw_ratio", "value": 1.0}, {"field": "h_shift", "value": -5}]"#,
    )
    .unwrap();
    assert_eq!(
        list,
        [SettingChange::ThrowRatio(1.0), SettingChange::HShift(-5.0)]
    );
    assert!(SettingChange::list_from_json(r#"[{"field": "nope", "value": 1}]"#).is_err());
}

#[test]
fn read_then_apply_is_identity() {
    let src = ProjectorSettings {
        throw_ratio: 1.2,
        projected_color: Rgb::new(0.1, 0.2, 0.3),
        show_pixel_grid: true,
        ..Default::default()
    };
    let mut dst = ProjectorSettings::default();
    for f in SettingField::ALL {
        let c = SettingChange::read(&src, f);
        assert_eq!(c.field(), f);
        c.apply_to(&mut dst);
    }
    assert_eq!(dst, src);
}

#[test]
fn diff_lists_only_changed_fields() {
    let a = ProjectorSettings::default();
    let b = ProjectorSettings {
        power: 50.0,
        resolution: Resolution::Svga,
        ..a
    };
    assert_eq!(
        a.diff(&b),
        [
            SettingChange::Power(50.0),
            SettingChange::Resolution(Resolution::Svga)
        ]
    );
    assert!(a.diff(&a).is_empty());
}

#[test]
fn field_table_is_consistent() {
    for f in SettingField::ALL {
        let spec = f.spec();
        assert_eq!(f.to_string(), spec.name);
        let numeric = ProjectorSettings::default().scalar(f).is_some();
        assert_eq!(numeric, spec.domain != Domain::Discrete, "{f}");
    }
    assert_eq!(SettingField::HKeystone.spec().trigger, Trigger::Keystone);
    assert_eq!(
        SettingField::UseCustomTextureRes.spec().trigger,
        Trigger::Resolution
    );
}
