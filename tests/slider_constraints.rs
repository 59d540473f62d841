use pharma_dash::gui::dual_slider::DualHandleSlider;
use pharma_dash::gui::single_slider::SingleHandleSlider;
use pharma_dash::settings::{HIGHLIGHT_MAX, HIGHLIGHT_MIN, HIGHLIGHT_STEP, RUNWAY_MAX, RUNWAY_MIN};

#[test]
fn low_handle_stops_one_unit_under_high() {
    let mut slider = DualHandleSlider::new(1, 3);
    let changed = slider.drag_low_to(5.0);
    assert!(changed);
    assert_eq!(slider.low(), 2);
    assert_eq!(slider.high(), 3);
}

#[test]
fn high_handle_stops_one_unit_over_low() {
    let mut slider = DualHandleSlider::new(2, 3);
    let changed = slider.drag_high_to(1.0);
    assert!(!changed, "3 already equals low + 1");
    assert_eq!(slider.high(), 3);
    assert_eq!(slider.low(), 2);
}

#[test]
fn handles_clamp_to_the_runway_band() {
    let mut slider = DualHandleSlider::new(3, 5);
    slider.drag_low_to(-10.0);
    assert_eq!(slider.low(), RUNWAY_MIN);
    slider.drag_high_to(99.0);
    assert_eq!(slider.high(), RUNWAY_MAX);
}

#[test]
fn ordering_holds_through_arbitrary_drag_sequences() {
    let mut slider = DualHandleSlider::new(1, 7);
    // deterministic pseudo-random raw values in roughly [-1, 8], alternating
    // between the two handles
    let mut x: u64 = 0x2545_f491_4f6c_dd1d;
    for i in 0..500 {
        x = x
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let raw = ((x >> 33) % 900) as f32 / 100.0 - 1.0;
        if i % 2 == 0 {
            slider.drag_low_to(raw);
        } else {
            slider.drag_high_to(raw);
        }
        assert!(
            RUNWAY_MIN <= slider.low() && slider.low() < slider.high()
                && slider.high() <= RUNWAY_MAX,
            "ordering broken after move {i}: low={} high={}",
            slider.low(),
            slider.high()
        );
    }
}

#[test]
fn segment_fractions_are_proportional_and_repeatable() {
    let mut slider = DualHandleSlider::new(2, 5);
    slider.set_range(2, 5);
    let first = slider.segment_fractions();
    slider.set_range(2, 5);
    let second = slider.segment_fractions();
    assert_eq!(first, second);

    let span = RUNWAY_MAX as f32;
    assert!((first[0] - 2.0 / span).abs() < 1e-6);
    assert!((first[1] - 3.0 / span).abs() < 1e-6);
    assert!((first[2] - 2.0 / span).abs() < 1e-6);
    assert!((first.iter().sum::<f32>() - 1.0).abs() < 1e-6);
}

#[test]
fn highlight_slider_snaps_to_half_months() {
    let mut slider = SingleHandleSlider::new(1.0);
    // a pointer position mapping to raw 3.24 snaps down to 3.0
    let percent = (3.24 - HIGHLIGHT_MIN) / (HIGHLIGHT_MAX - HIGHLIGHT_MIN);
    slider.drag_to_percent(percent);
    assert!((slider.value() - 3.0).abs() < 1e-5);
}

#[test]
fn highlight_slider_stays_on_step_across_the_track() {
    let mut slider = SingleHandleSlider::new(HIGHLIGHT_MIN);
    for i in 0..=100 {
        slider.drag_to_percent(i as f32 / 100.0);
        let value = slider.value();
        assert!(
            (HIGHLIGHT_MIN..=HIGHLIGHT_MAX).contains(&value),
            "value {value} escaped the domain"
        );
        let steps = (value - HIGHLIGHT_MIN) / HIGHLIGHT_STEP;
        assert!(
            (steps - steps.round()).abs() < 1e-4,
            "value {value} is not on the half-month grid"
        );
    }
}

#[test]
fn boundary_rounding_never_escapes_the_domain() {
    let mut slider = SingleHandleSlider::new(3.0);
    slider.drag_to_percent(1.0);
    assert!((slider.value() - HIGHLIGHT_MAX).abs() < 1e-5);
    slider.drag_to_percent(0.0);
    assert!((slider.value() - HIGHLIGHT_MIN).abs() < 1e-5);
}
