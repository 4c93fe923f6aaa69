use super::*;
use image::Rgba;

fn png_bytes(color: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(24, 16, color);
    let mut bytes = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut bytes),
        image::ImageFormat::Png,
    )
    .unwrap();
    bytes
}

struct Fixture {
    _dir: tempfile::TempDir,
    composer: Composer,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let logos_root = dir.path().join("logos");
    let fonts_root = dir.path().join("fonts");
    std::fs::create_dir_all(logos_root.join("acme")).unwrap();
    std::fs::create_dir_all(&fonts_root).unwrap();
    std::fs::write(
        logos_root.join("acme/white.png"),
        png_bytes(Rgba([255, 255, 255, 255])),
    )
    .unwrap();
    std::fs::write(
        logos_root.join("acme/dark.png"),
        png_bytes(Rgba([20, 20, 20, 255])),
    )
    .unwrap();

    let catalog = FormatCatalog::from_json(
        r#"{
        "formats": [
            {"name": "SLOT1_WEB", "width": 400, "height": 300, "rules": {
                "type": "standard",
                "margin": {"x": 20, "y": 20},
                "logo_area": {"width": 100, "height": 60},
                "composition_area": {}
            }},
            {"name": "SHOWROOM_MOBILE", "width": 200, "height": 350, "rules": {"type": "full_bleed"}},
            {"name": "HOME_PRIVATE", "width": 500, "height": 300, "rules": {
                "type": "split_left_white",
                "split_width": 150,
                "logo_area": {"width": 100, "height": 60}
            }},
            {"name": "BRAND_LOGO", "width": 200, "height": 200, "rules": {
                "type": "logo_only_centered_white_bg",
                "logo_area": {"width": 120, "height": 120}
            }}
        ]
    }"#,
    )
    .unwrap();

    Fixture {
        composer: Composer::new(catalog, AssetStore::new(logos_root, fonts_root)),
        _dir: dir,
    }
}

fn sources() -> BatchSources {
    let bright = SourceImage {
        image: RgbaImage::from_pixel(400, 400, Rgba([230, 230, 230, 255])),
        analysis: AnalysisResult::centered(400, 400),
    };
    let dark = SourceImage {
        image: RgbaImage::from_pixel(400, 400, Rgba([15, 15, 15, 255])),
        analysis: AnalysisResult::centered(400, 400),
    };
    BatchSources {
        image_a: bright,
        image_b: dark,
    }
}

fn full_assignments() -> Assignments {
    [
        ("SLOT1_WEB.jpg", SourceId::A),
        ("SHOWROOM_MOBILE.jpg", SourceId::B),
        ("HOME_PRIVATE.jpg", SourceId::A),
        ("BRAND_LOGO.jpg", SourceId::A),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

fn request(assignments: Assignments) -> BatchRequest {
    BatchRequest {
        assignments,
        logo_folder: "acme".to_string(),
        logo_filenames: vec!["dark.png".to_string()],
        overrides: OverrideMap::new(),
    }
}

#[test]
fn full_batch_includes_the_delivery_sheet() {
    let f = fixture();
    let outputs = f
        .composer
        .compose_batch(&sources(), &request(full_assignments()))
        .unwrap();

    for name in [
        "SLOT1_WEB.jpg",
        "SHOWROOM_MOBILE.jpg",
        "HOME_PRIVATE.jpg",
        "BRAND_LOGO.jpg",
        DELIVERY_SHEET_NAME,
    ] {
        assert!(outputs.contains_key(name), "missing {name}");
    }

    // every payload is a JPEG stream
    for output in outputs.values() {
        assert!(output.image_bytes.starts_with(&[0xFF, 0xD8]));
    }

    // logo-only and composite formats carry no composition metadata
    assert!(outputs["BRAND_LOGO.jpg"].composition_data.is_none());
    assert!(outputs[DELIVERY_SHEET_NAME].composition_data.is_none());
    assert!(outputs["SLOT1_WEB.jpg"].composition_data.is_some());
}

#[test]
fn missing_prerequisite_drops_only_the_sheet() {
    let f = fixture();
    let mut assignments = full_assignments();
    assignments.remove("SHOWROOM_MOBILE.jpg");

    let outputs = f
        .composer
        .compose_batch(&sources(), &request(assignments))
        .unwrap();

    assert!(!outputs.contains_key(DELIVERY_SHEET_NAME));
    assert!(!outputs.contains_key("SHOWROOM_MOBILE.jpg"));
    assert!(outputs.contains_key("SLOT1_WEB.jpg"));
    assert!(outputs.contains_key("HOME_PRIVATE.jpg"));
    assert!(outputs.contains_key("BRAND_LOGO.jpg"));
}

#[test]
fn unknown_logo_file_is_skipped_not_fatal() {
    let f = fixture();
    let mut req = request(full_assignments());
    req.logo_filenames = vec!["ghost.png".to_string(), "dark.png".to_string()];

    let outputs = f
        .composer
        .compose_batch(&sources(), &req)
        .unwrap();
    assert!(outputs.contains_key("SLOT1_WEB.jpg"));
}

#[test]
fn empty_selection_auto_picks_by_zone_brightness() {
    let f = fixture();
    let mut req = request(full_assignments());
    req.logo_filenames.clear();

    // bright source zone -> dark candidate exists -> composes fine
    let outputs = f
        .composer
        .compose_batch(&sources(), &req)
        .unwrap();
    assert!(outputs.contains_key("SLOT1_WEB.jpg"));
    assert!(outputs.contains_key(DELIVERY_SHEET_NAME));
}

#[test]
fn unreadable_logo_folder_fails_the_batch() {
    let f = fixture();
    let mut req = request(full_assignments());
    req.logo_folder = "missing-brand".to_string();
    assert!(f.composer.compose_batch(&sources(), &req).is_err());
}

#[test]
fn unassigned_formats_are_not_composed() {
    let f = fixture();
    let outputs = f
        .composer
        .compose_batch(&sources(), &request(Assignments::new()))
        .unwrap();
    assert!(outputs.is_empty());
}

#[test]
fn compose_one_renders_a_known_format() {
    let f = fixture();
    let logos = f
        .composer
        .load_logos("acme", &["dark.png".to_string()]);
    assert_eq!(logos.len(), 1);

    let output = f
        .composer
        .compose_one(
            "SLOT1_WEB",
            &sources().image_a,
            &logos,
            &FormatOverride::default(),
        )
        .unwrap();
    assert!(output.image_bytes.starts_with(&[0xFF, 0xD8]));
    assert!(output.composition_data.is_some());

    assert!(
        f.composer
            .compose_one(
                "NOPE",
                &sources().image_a,
                &logos,
                &FormatOverride::default()
            )
            .is_err()
    );
}
