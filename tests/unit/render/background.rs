use super::*;

#[test]
fn solid_override_fills_with_parsed_color() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Solid,
        color: "rgba(10, 20, 30, 1)".to_string(),
    };
    let canvas = render_background(&bg, 4, 3);
    assert_eq!(canvas.dimensions(), (4, 3));
    assert_eq!(canvas.get_pixel(2, 1), &image::Rgba([10, 20, 30, 255]));
}

#[test]
fn unparsable_solid_color_falls_back_to_white() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Solid,
        color: "chartreuse-ish".to_string(),
    };
    let canvas = render_background(&bg, 2, 2);
    assert_eq!(canvas.get_pixel(0, 0), &image::Rgba([255, 255, 255, 255]));
}

#[test]
fn horizontal_gradient_spans_first_to_last_stop() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Gradient,
        color: "linear-gradient(90deg, #000000, #FFFFFF)".to_string(),
    };
    let canvas = render_background(&bg, 64, 8);
    // 90deg runs left to right
    assert_eq!(canvas.get_pixel(0, 0), &image::Rgba([0, 0, 0, 255]));
    assert_eq!(canvas.get_pixel(63, 7), &image::Rgba([255, 255, 255, 255]));
    // monotonic along x
    let mid = canvas.get_pixel(32, 4)[0];
    assert!(mid > 0 && mid < 255);
}

#[test]
fn intermediate_stops_are_ignored() {
    let with_mid = render_background(
        &BackgroundOverride {
            kind: BackgroundKind::Gradient,
            color: "linear-gradient(90deg, #000000, #FF0000, #FFFFFF)".to_string(),
        },
        16,
        4,
    );
    let without_mid = render_background(
        &BackgroundOverride {
            kind: BackgroundKind::Gradient,
            color: "linear-gradient(90deg, #000000, #FFFFFF)".to_string(),
        },
        16,
        4,
    );
    assert_eq!(with_mid.as_raw(), without_mid.as_raw());
}

#[test]
fn single_stop_degrades_to_solid() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Gradient,
        color: "linear-gradient(45deg, #102030)".to_string(),
    };
    let canvas = render_background(&bg, 3, 3);
    for px in canvas.pixels() {
        assert_eq!(px, &image::Rgba([0x10, 0x20, 0x30, 255]));
    }
}

#[test]
fn no_stops_degrade_to_white() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Gradient,
        color: "linear-gradient()".to_string(),
    };
    let canvas = render_background(&bg, 2, 2);
    assert_eq!(canvas.get_pixel(1, 1), &image::Rgba([255, 255, 255, 255]));
}

#[test]
fn zero_degrees_runs_first_stop_top_to_last_stop_bottom() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Gradient,
        color: "linear-gradient(0deg, #000000, #FFFFFF)".to_string(),
    };
    let canvas = render_background(&bg, 4, 32);
    let top = canvas.get_pixel(2, 0)[0];
    let bottom = canvas.get_pixel(2, 31)[0];
    assert!(top < bottom);
}

#[test]
fn one_pixel_canvas_does_not_divide_by_zero() {
    let bg = BackgroundOverride {
        kind: BackgroundKind::Gradient,
        color: "linear-gradient(90deg, #000000, #FFFFFF)".to_string(),
    };
    let canvas = render_background(&bg, 1, 1);
    assert_eq!(canvas.dimensions(), (1, 1));
}
