//! 참조 시나리오 및 도출 엔진 성질 회귀 테스트.
use mosfet_engineering_toolbox::mosfet::{
    compute_selection, CoolingClass, ControlMode, DriveInput, SelectionParams,
};

fn reference_input() -> DriveInput {
    DriveInput {
        max_power_w: 2700.0,
        motor_kv_rpm_per_v: 190.0,
        max_current_a: 75.0,
        v_max_v: 60.0,
        foc: true,
    }
}

#[test]
fn reference_scenario_matches_formula_set() {
    let params = SelectionParams::default();
    let res = compute_selection(&reference_input(), &params).expect("selection");

    assert_eq!(res.eta, 0.95);
    assert_eq!(res.control, ControlMode::Foc);
    assert_eq!(res.i_mos_rms_a, 37.5);
    assert!((res.max_rpm - 11400.0).abs() < 1e-9);
    assert!((res.bemf_voltage_v - 54.0).abs() < 1e-9);
    // max(60, 54) * 1.5
    assert!((res.vds_min_v - 90.0).abs() < 1e-9);

    let expected_i_cont = 75.0 * 3.0_f64.sqrt() / (2.0_f64.sqrt() * 0.95);
    assert!((res.i_cont_a - expected_i_cont).abs() < 1e-9);
    let expected_i_cont_power = 2700.0 / (60.0 * 0.95);
    assert!((res.i_cont_power_a - expected_i_cont_power).abs() < 1e-9);
    let expected_peak = 75.0 * 2.0_f64.sqrt() / 2.0;
    assert!((res.i_mos_peak_a - expected_peak).abs() < 1e-9);
    assert!((res.i_mos_min_a - 48.75).abs() < 1e-9);

    let expected_rds = 50.0 / (37.5 * 37.5 * 0.8) * 1000.0;
    assert!(
        ((res.rds_on_max_mohm - expected_rds) / expected_rds).abs() < 1e-6,
        "rds_on_max={} expected={}",
        res.rds_on_max_mohm,
        expected_rds
    );
    assert!((expected_rds - 44.444444).abs() < 1e-3);

    let expected_p_cond = 37.5 * 37.5 * 0.0015 * 0.8;
    let expected_p_sw = 60.0 * expected_peak * 100e-9 * 30_000.0 / 2.0 + 100e-9 * 10.0 * 30_000.0;
    let expected_p_total = expected_p_cond + expected_p_sw;
    assert!(((res.p_cond_w - expected_p_cond) / expected_p_cond).abs() < 1e-6);
    assert!(((res.p_sw_w - expected_p_sw) / expected_p_sw).abs() < 1e-6);
    assert!(((res.p_total_w - expected_p_total) / expected_p_total).abs() < 1e-6);
    let expected_total_heat = expected_p_total * 12.0;
    assert!(((res.total_heat_w - expected_total_heat) / expected_total_heat).abs() < 1e-6);

    // 참조 시나리오의 소자당 총 손실은 약 6.49 W 로 30 W 미만이다.
    assert!(res.p_total_w < 30.0);
    assert_eq!(res.cooling, CoolingClass::StandardHeatsink);
}

#[test]
fn valid_inputs_yield_finite_fields() {
    let params = SelectionParams::default();
    let inputs = [
        reference_input(),
        DriveInput {
            max_power_w: 0.001,
            motor_kv_rpm_per_v: 0.5,
            max_current_a: 0.01,
            v_max_v: 0.1,
            foc: false,
        },
        // 상한 검사가 없으므로 매우 큰 값도 그대로 계산된다.
        DriveInput {
            max_power_w: 1e12,
            motor_kv_rpm_per_v: 1e6,
            max_current_a: 1e9,
            v_max_v: 1e6,
            foc: true,
        },
    ];
    for input in inputs {
        let res = compute_selection(&input, &params).expect("selection");
        let fields = [
            res.eta,
            res.i_cont_a,
            res.i_cont_power_a,
            res.i_phase_rms_a,
            res.i_mos_rms_a,
            res.i_mos_peak_a,
            res.i_mos_min_a,
            res.max_rpm,
            res.bemf_voltage_v,
            res.vds_min_v,
            res.rds_on_max_mohm,
            res.p_cond_w,
            res.p_sw_w,
            res.p_total_w,
            res.total_heat_w,
        ];
        for v in fields {
            assert!(v.is_finite(), "non-finite field for input {input:?}");
        }
    }
}

#[test]
fn identical_inputs_yield_bit_identical_results() {
    let params = SelectionParams::default();
    let input = reference_input();
    let first = compute_selection(&input, &params).expect("selection");
    let second = compute_selection(&input, &params).expect("selection");
    assert_eq!(first, second);
}

#[test]
fn raising_phase_current_moves_device_criteria() {
    let params = SelectionParams::default();
    let mut low = reference_input();
    low.max_current_a = 50.0;
    let mut high = reference_input();
    high.max_current_a = 80.0;

    let res_low = compute_selection(&low, &params).expect("selection");
    let res_high = compute_selection(&high, &params).expect("selection");

    assert!(res_high.i_mos_rms_a > res_low.i_mos_rms_a);
    assert!(res_high.i_mos_peak_a > res_low.i_mos_peak_a);
    assert!(res_high.i_mos_min_a > res_low.i_mos_min_a);
    assert!(res_high.rds_on_max_mohm < res_low.rds_on_max_mohm);
}

#[test]
fn foc_flag_selects_efficiency() {
    let params = SelectionParams::default();
    let foc_input = reference_input();
    let mut bldc_input = reference_input();
    bldc_input.foc = false;

    let foc_res = compute_selection(&foc_input, &params).expect("selection");
    let bldc_res = compute_selection(&bldc_input, &params).expect("selection");

    assert_eq!(foc_res.eta, 0.95);
    assert_eq!(bldc_res.eta, 0.90);
    assert_eq!(bldc_res.control, ControlMode::Bldc);

    // 배터리 전류 추정은 효율에 반비례한다.
    assert!((bldc_res.i_cont_a / foc_res.i_cont_a - 0.95 / 0.90).abs() < 1e-9);
    assert!((bldc_res.i_cont_power_a / foc_res.i_cont_power_a - 0.95 / 0.90).abs() < 1e-9);
}
