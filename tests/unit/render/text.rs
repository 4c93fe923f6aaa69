use super::*;

fn tagline(text: &str) -> TaglineOverride {
    TaglineOverride {
        text: text.to_string(),
        font_filename: None,
        font_size: None,
        color: None,
        x: None,
        y: None,
        offset_y: None,
    }
}

fn anchor() -> PlacedLogo {
    PlacedLogo {
        x: 30,
        y: 50,
        width: 120,
        height: 60,
    }
}

#[test]
fn explicit_coordinates_win() {
    let mut t = tagline("Hello");
    t.x = Some(7);
    t.y = Some(9);
    assert_eq!(
        resolve_position(&t, "SLOT1_WEB", Some(anchor()), 80, 400),
        (7, 9)
    );
}

#[test]
fn partial_explicit_coordinates_fall_back_to_anchor() {
    let mut t = tagline("Hello");
    t.x = Some(7);
    assert_eq!(
        resolve_position(&t, "SLOT1_WEB", Some(anchor()), 80, 400),
        (30, 115)
    );
}

#[test]
fn anchored_caption_hangs_below_logo() {
    // y = 50 + 60 + 5, x = logo x
    assert_eq!(
        resolve_position(&tagline("Hi"), "SLOT1_WEB", Some(anchor()), 80, 400),
        (30, 115)
    );
}

#[test]
fn offset_y_override_is_honored() {
    let mut t = tagline("Hi");
    t.offset_y = Some(12);
    assert_eq!(
        resolve_position(&t, "SLOT1_WEB", Some(anchor()), 80, 400),
        (30, 122)
    );
}

#[test]
fn exception_formats_center_under_logo() {
    // x = 30 + (120 - 80) / 2 = 50
    assert_eq!(
        resolve_position(&tagline("Hi"), "SLOT1_NEXT_WEB", Some(anchor()), 80, 400),
        (50, 115)
    );
    assert_eq!(
        resolve_position(&tagline("Hi"), "SLOT1_NEXT_WEB_PRE", Some(anchor()), 80, 400),
        (50, 115)
    );
}

#[test]
fn no_anchor_uses_canvas_fallback() {
    assert_eq!(
        resolve_position(&tagline("Hi"), "SLOT1_WEB", None, 80, 400),
        (20, 360)
    );
}

#[test]
fn missing_font_leaves_canvas_untouched() {
    let store = AssetStore::new("/nonexistent/logos", "/nonexistent/fonts");
    let mut canvas = RgbaImage::from_pixel(60, 60, Rgba([9, 9, 9, 255]));
    let before = canvas.clone();
    draw_tagline(&mut canvas, &tagline("Hello"), &store, "SLOT1_WEB", None);
    assert_eq!(canvas.as_raw(), before.as_raw());
}

#[test]
fn empty_text_is_a_no_op() {
    let store = AssetStore::new("/nonexistent/logos", "/nonexistent/fonts");
    let mut canvas = RgbaImage::from_pixel(10, 10, Rgba([1, 2, 3, 255]));
    let before = canvas.clone();
    draw_tagline(&mut canvas, &tagline(""), &store, "SLOT1_WEB", None);
    assert_eq!(canvas.as_raw(), before.as_raw());
}

#[test]
fn blend_is_opaque_over_opaque() {
    let out = blend_pixel(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 255]));
    assert_eq!(out, Rgba([255, 255, 255, 255]));
    let half = blend_pixel(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
    assert!(half[0] > 100 && half[0] < 160);
    assert_eq!(half[3], 255);
}
