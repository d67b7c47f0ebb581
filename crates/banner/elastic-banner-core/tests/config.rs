use std::rc::Rc;

use approx::assert_abs_diff_eq;
use elastic_banner_core::mock::{MockScrollView, RecordingTarget};
use elastic_banner_core::{
    BannerConfig, BannerController, BannerError, Curve, ManualTime, TransitionKind, ViewId,
};
use elastic_test_fixtures::configs;

#[test]
fn defaults_match_documented_values() {
    let cfg = BannerConfig::default();
    assert_eq!(cfg.open.duration, 0.3);
    assert_eq!(cfg.close.curve, Curve::EaseInEaseOut);
    assert!(cfg.suppress_bounce);
    assert_eq!(BannerConfig::from_json("{}").unwrap(), cfg);
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let cfg = BannerConfig::from_json(&configs::json("slow-linear").unwrap()).unwrap();
    assert_eq!(cfg.open.duration, 0.5);
    assert_eq!(cfg.open.curve, Curve::Linear);
    assert_eq!(cfg.close.duration, 0.25);
    assert_eq!(cfg.close.curve, Curve::EaseInEaseOut);
    assert!(cfg.suppress_bounce);

    let kept = BannerConfig::from_json(&configs::json("bounce-kept").unwrap()).unwrap();
    assert!(!kept.suppress_bounce);
}

#[test]
fn invalid_duration_is_rejected() {
    let err = BannerConfig::from_json(r#"{ "close": { "duration": 0.0 } }"#).unwrap_err();
    match err {
        BannerError::InvalidTransition { transition, .. } => {
            assert_eq!(transition, TransitionKind::Close)
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn non_monotonic_custom_curve_is_rejected() {
    let json = r#"{
        "open": {
            "curve": { "custom": { "control_points": [
                { "x": 0.0, "y": 0.0 }, { "x": 1.5, "y": 0.0 },
                { "x": 0.5, "y": 1.0 }, { "x": 1.0, "y": 1.0 }
            ] } }
        }
    }"#;
    let err = BannerConfig::from_json(json).unwrap_err();
    assert!(err.to_string().starts_with("invalid open transition"));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = BannerConfig::from_json("{ open: 1 }").unwrap_err();
    assert!(matches!(err, BannerError::ConfigParse(_)));
}

#[test]
fn configured_duration_and_curve_drive_the_open_transition() {
    let cfg = BannerConfig::from_json(&configs::json("slow-linear").unwrap()).unwrap();
    let time = ManualTime::new();
    let view = MockScrollView::new();
    let mut controller = BannerController::new(cfg, Rc::new(time.clone()))
        .with_target(RecordingTarget::new(ViewId(1), 100.0));
    controller.install(view.clone());

    assert!(controller.begin_refreshing());
    // Half of the 0.5s linear transition.
    time.advance(0.25);
    controller.frame();
    assert_abs_diff_eq!(controller.header_frame().height, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(view.content_inset(), 50.0, epsilon = 1e-9);

    time.advance(0.25);
    controller.frame();
    assert!(controller.transition_in_flight().is_none());
    assert_abs_diff_eq!(controller.header_frame().height, 100.0);
}
