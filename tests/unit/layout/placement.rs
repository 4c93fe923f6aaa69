use super::*;
use crate::catalog::rules::{CompositionArea, LogoArea, Margin, RuleSet};
use kurbo::{Point, Rect};

fn framing_rules() -> RuleSet {
    RuleSet {
        rule_type: RuleType::Standard,
        margin: Some(Margin { x: 20, y: 20 }),
        logo_area: Some(LogoArea {
            width: 200,
            height: 100,
        }),
        composition_area: Some(CompositionArea {}),
        ..RuleSet::default()
    }
}

fn analysis_with_box() -> AnalysisResult {
    AnalysisResult {
        focus_point: Point::new(500.0, 420.0),
        main_box: Some(Rect::new(300.0, 100.0, 700.0, 900.0)),
        subject_top_y: 100.0,
        image_width: 1200,
        image_height: 1600,
    }
}

#[test]
fn subject_framing_scenario_matches_documented_candidates() {
    let analysis = analysis_with_box();
    let p = place(1200, 1600, &analysis, 800, 800, &framing_rules());

    // target_x = (20 + 200 + 20 + 780) / 2 = 510
    let scale_centering = (510.0f64 / 500.0).max(290.0 / 700.0);
    let scale_framing = 760.0 / 800.0;
    let scale_cover = (800.0f64 / 1200.0).max(800.0 / 1600.0);
    assert_eq!(p.scale, scale_centering.max(scale_framing).max(scale_cover));

    // focus lands on target_x: paste_x = 510 - trunc(500 * 1.02) = 0
    assert_eq!(p.paste_x, 0);
    // paste_y = trunc(20 - 100 * scale) = -82, already within clamp bounds
    assert_eq!(p.paste_y, -82);
    assert_eq!(p.scaled_width, 1224);
    assert_eq!(p.scaled_height, 1632);
}

#[test]
fn cover_mode_centers_focus_on_canvas() {
    let analysis = AnalysisResult {
        focus_point: Point::new(100.0, 100.0),
        main_box: None,
        subject_top_y: 0.0,
        image_width: 400,
        image_height: 400,
    };
    let p = place(400, 400, &analysis, 800, 800, &RuleSet::default());
    assert_eq!(p.scale, 2.0);
    assert_eq!((p.scaled_width, p.scaled_height), (800, 800));
    // ideal paste (200, 200) clamps into [0, 0]
    assert_eq!(p.paste_x, 0);
    assert_eq!(p.paste_y, 0);
}

#[test]
fn downscale_offsets_clamp_to_zero_bounds() {
    let analysis = AnalysisResult {
        focus_point: Point::new(300.0, 200.0),
        main_box: None,
        subject_top_y: 0.0,
        image_width: 400,
        image_height: 400,
    };
    let p = place(400, 400, &analysis, 200, 200, &RuleSet::default());
    // scale 0.5, scaled 200x200; ideal paste_x = 100 - 150 = -50 -> bounds [0, 0]
    assert_eq!(p.paste_x, 0);
    assert_eq!(p.paste_y, 0);
}

#[test]
fn clamp_invariant_holds_for_many_inputs() {
    let rules = framing_rules();
    for (iw, ih) in [(500u32, 700u32), (1200, 800), (2000, 2000), (64, 64)] {
        for fx in [0.0, 1.0, f64::from(iw) / 2.0, f64::from(iw)] {
            let analysis = AnalysisResult {
                focus_point: Point::new(fx, f64::from(ih) / 3.0),
                main_box: Some(Rect::new(
                    f64::from(iw) * 0.25,
                    f64::from(ih) * 0.1,
                    f64::from(iw) * 0.75,
                    f64::from(ih) * 0.9,
                )),
                subject_top_y: f64::from(ih) * 0.1,
                image_width: iw,
                image_height: ih,
            };
            for (cw, ch) in [(300u32, 250u32), (800, 800), (160, 600)] {
                let p = place(iw, ih, &analysis, cw, ch, &rules);
                let left = i64::from(cw) - i64::from(p.scaled_width);
                let top = i64::from(ch) - i64::from(p.scaled_height);
                if left <= 0 {
                    assert!(p.paste_x >= left && p.paste_x <= 0);
                } else {
                    assert_eq!(p.paste_x, left);
                }
                if top <= 0 {
                    assert!(p.paste_y >= top && p.paste_y <= 0);
                } else {
                    assert_eq!(p.paste_y, top);
                }
                // the cover candidate keeps the scaled image within one
                // truncated pixel of covering the canvas
                assert!(i64::from(p.scaled_width) >= i64::from(cw) - 1);
                assert!(i64::from(p.scaled_height) >= i64::from(ch) - 1);
            }
        }
    }
}

#[test]
fn zero_focus_guards_avoid_division() {
    let mut analysis = analysis_with_box();
    analysis.focus_point = Point::new(0.0, 0.0);
    let p = place(1200, 1600, &analysis, 800, 800, &framing_rules());
    assert!(p.scale.is_finite());

    analysis.focus_point = Point::new(1200.0, 0.0);
    let p = place(1200, 1600, &analysis, 800, 800, &framing_rules());
    assert!(p.scale.is_finite());
}

#[test]
fn missing_box_falls_back_to_subject_top() {
    let analysis = AnalysisResult {
        focus_point: Point::new(600.0, 400.0),
        main_box: None,
        subject_top_y: 250.0,
        image_width: 1200,
        image_height: 1600,
    };
    let p = place(1200, 1600, &analysis, 800, 800, &framing_rules());
    // horizontal candidates stay below 1.0, framing candidate defaults to 1.0
    assert_eq!(p.scale, 1.0);
    // paste_y = trunc(20 - 250), clamped against [800 - 1600, 0]
    assert_eq!(p.paste_y, -230);
}

#[test]
fn centered_logo_ignores_composition_area() {
    let rules = RuleSet {
        rule_type: RuleType::CenteredLogo,
        ..framing_rules()
    };
    let analysis = AnalysisResult {
        focus_point: Point::new(200.0, 200.0),
        main_box: None,
        subject_top_y: 0.0,
        image_width: 400,
        image_height: 400,
    };
    let p = place(400, 400, &analysis, 800, 800, &rules);
    // cover mode despite the declared composition area
    assert_eq!(p.scale, 2.0);
    assert_eq!(p.paste_x, 0);
    assert_eq!(p.paste_y, 0);
}
