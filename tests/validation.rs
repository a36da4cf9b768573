//! 입력 검증 회귀 테스트.
use mosfet_engineering_toolbox::mosfet::{
    compute_selection, DriveInput, InputField, SelectionError, SelectionParams,
};

fn valid_input() -> DriveInput {
    DriveInput {
        max_power_w: 2700.0,
        motor_kv_rpm_per_v: 190.0,
        max_current_a: 75.0,
        v_max_v: 60.0,
        foc: true,
    }
}

#[test]
fn zero_or_negative_fields_name_the_field() {
    let params = SelectionParams::default();
    let cases: [(fn(&mut DriveInput), InputField); 4] = [
        (|i| i.max_power_w = 0.0, InputField::MaxPower),
        (|i| i.motor_kv_rpm_per_v = -190.0, InputField::MotorKv),
        (|i| i.max_current_a = 0.0, InputField::MaxCurrent),
        (|i| i.v_max_v = -1.0, InputField::VMax),
    ];
    for (mutate, expected) in cases {
        let mut input = valid_input();
        mutate(&mut input);
        match compute_selection(&input, &params) {
            Err(SelectionError::InvalidInput(field)) => assert_eq!(field, expected),
            other => panic!("expected InvalidInput({expected:?}), got {other:?}"),
        }
    }
}

#[test]
fn first_offending_field_wins() {
    let params = SelectionParams::default();
    let mut input = valid_input();
    input.max_power_w = -1.0;
    input.v_max_v = 0.0;
    match compute_selection(&input, &params) {
        Err(SelectionError::InvalidInput(field)) => assert_eq!(field, InputField::MaxPower),
        other => panic!("expected InvalidInput(MaxPower), got {other:?}"),
    }
}

#[test]
fn all_positive_inputs_never_error() {
    let params = SelectionParams::default();
    assert!(compute_selection(&valid_input(), &params).is_ok());

    // 상한이나 물리적 타당성 검사는 하지 않는다.
    let absurd = DriveInput {
        max_power_w: 1e15,
        motor_kv_rpm_per_v: 1e9,
        max_current_a: 1e12,
        v_max_v: 1e9,
        foc: false,
    };
    assert!(compute_selection(&absurd, &params).is_ok());
}

#[test]
fn misconfigured_params_are_rejected() {
    let input = valid_input();
    assert!(input.validate().is_ok());

    let mut params = SelectionParams::default();
    params.n_parallel = 0;
    match compute_selection(&input, &params) {
        Err(SelectionError::ParamOutOfRange(_)) => {}
        other => panic!("expected ParamOutOfRange, got {other:?}"),
    }

    let mut params = SelectionParams::default();
    params.duty_cycle = 0.0;
    match compute_selection(&input, &params) {
        Err(SelectionError::ParamOutOfRange(_)) => {}
        other => panic!("expected ParamOutOfRange, got {other:?}"),
    }
}
