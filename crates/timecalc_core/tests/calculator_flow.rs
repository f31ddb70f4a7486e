use timecalc_core::{CalculatorMode, CalculatorService, CalculatorView, Key, TimeUnit, ERROR_DISPLAY};

fn press_labels(service: &mut CalculatorService, labels: &[&str]) {
    for label in labels {
        service.press(Key::from_label(label).unwrap());
    }
}

#[test]
fn keypad_expression_adds_running_total() {
    let mut service = CalculatorService::new();
    press_labels(&mut service, &["2", "d", "3", "h", "4", "5", "m"]);
    assert_eq!(service.view().display, "2d3h45m");

    service.plus();
    assert_eq!(service.view().display, "0");
    assert_eq!(service.view().secondary, "2d 3h 45m");

    press_labels(&mut service, &["1", "h"]);
    let view = service.equals().clone();
    assert_eq!(view.display, "2d 4h 45m");
    assert_eq!(view.secondary, "");
    assert_eq!(service.mode(), CalculatorMode::Idle);
}

#[test]
fn overflowing_units_are_normalized_in_results() {
    let mut service = CalculatorService::new();
    press_labels(&mut service, &["2", "3", "h", "+", "9", "0", "m", "="]);
    assert_eq!(service.view().display, "1d 30m");
}

#[test]
fn error_then_recovery_keeps_running_total() {
    let mut service = CalculatorService::new();
    press_labels(&mut service, &["3", "h", "+"]);
    press_labels(&mut service, &["7", "+"]);
    assert_eq!(service.view().display, ERROR_DISPLAY);
    assert_eq!(service.view().secondary, "3h");
    assert_eq!(service.mode(), CalculatorMode::Accumulating);

    service.digit(2);
    service.unit(TimeUnit::Hour);
    service.equals();
    assert_eq!(service.view().display, "5h");
}

#[test]
fn clear_after_error_resets_display() {
    let mut service = CalculatorService::new();
    press_labels(&mut service, &["4", "="]);
    assert_eq!(service.view().display, ERROR_DISPLAY);
    service.clear();
    assert_eq!(service.view().display, "0");
    assert_eq!(service.mode(), CalculatorMode::Idle);
}

#[test]
fn view_serialization_uses_expected_wire_fields() {
    let mut service = CalculatorService::new();
    press_labels(&mut service, &["1", "h", "+", "3"]);

    let json = serde_json::to_value(service.view()).unwrap();
    assert_eq!(json, serde_json::json!({"display": "3", "secondary": "1h"}));

    let decoded: CalculatorView = serde_json::from_value(json).unwrap();
    assert_eq!(&decoded, service.view());
}
