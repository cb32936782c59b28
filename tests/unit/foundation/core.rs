use super::*;

fn display(cw: f64, ch: f64) -> Display {
    Display {
        design_width: 800.0,
        design_height: 600.0,
        canvas_width: cw,
        canvas_height: ch,
        scale_method: ScaleMethod::FitBest,
    }
}

#[test]
fn fit_policies_pick_expected_axis() {
    let d = display(1600.0, 900.0);
    assert_eq!(d.fit_scale(ScaleMethod::None), 1.0);
    assert_eq!(d.fit_scale(ScaleMethod::FitX), 2.0);
    assert_eq!(d.fit_scale(ScaleMethod::FitY), 1.5);
    assert_eq!(d.fit_scale(ScaleMethod::FitBest), 1.5);
    assert_eq!(d.fit_scale(ScaleMethod::FitWorst), 2.0);
    assert_eq!(d.fit_scale(ScaleMethod::FitAverage), 1.75);
    assert_eq!(d.fit_scale(ScaleMethod::FitGreatest), 2.0);
    assert_eq!(d.fit_scale(ScaleMethod::FitSmallest), 1.5);
    assert_eq!(d.fit_scale(ScaleMethod::PixelPerfect), 1.0);
}

#[test]
fn pixel_perfect_never_drops_below_one() {
    let d = display(400.0, 300.0);
    assert_eq!(d.fit_scale(ScaleMethod::PixelPerfect), 1.0);
    let d = display(2400.0, 1800.0);
    assert_eq!(d.fit_scale(ScaleMethod::PixelPerfect), 3.0);
}

#[test]
fn display_transform_centres_scene_origin() {
    let d = display(1600.0, 1200.0);
    let p = d.transform() * Point::new(0.0, 0.0);
    assert_eq!(p, Point::new(800.0, 600.0));
    let p = d.transform() * Point::new(10.0, 0.0);
    assert_eq!(p, Point::new(820.0, 600.0));
    assert_eq!(d.visible_size(), Size::new(800.0, 600.0));
}

#[test]
fn margins_from_array_are_left_right_top_bottom() {
    let m = Margins::from([10.0, 1.0, 2.0, 3.0]);
    assert_eq!(m, Margins::new(10.0, 1.0, 2.0, 3.0));
}
