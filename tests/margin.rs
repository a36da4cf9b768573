//! 엔지니어링 마진 뷰와 냉각 권고 경계 테스트.
use mosfet_engineering_toolbox::mosfet::{
    compute_selection, engineering_margin, recommend_cooling, CoolingClass, DriveInput,
    SelectionParams, MARGIN_DERATE, MARGIN_UPRATE,
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
fn margin_factors_are_applied() {
    let params = SelectionParams::default();
    let res = compute_selection(&reference_input(), &params).expect("selection");
    let margin = engineering_margin(&res, &params);

    assert!((margin.vds_min_v - res.vds_min_v * MARGIN_UPRATE).abs() < 1e-9);
    assert!((margin.rds_on_max_mohm - res.rds_on_max_mohm * MARGIN_DERATE).abs() < 1e-9);
    // Id 기준은 RMS 전류에서 다시 디레이팅하지만 i_mos_min * 1.2 와 수치가 같다.
    assert!((margin.id_min_a - res.i_mos_rms_a * params.k_derate * MARGIN_UPRATE).abs() < 1e-12);
    assert!((margin.id_min_a - res.i_mos_min_a * MARGIN_UPRATE).abs() < 1e-9);
}

#[test]
fn margin_is_pure_presentation() {
    let params = SelectionParams::default();
    let res = compute_selection(&reference_input(), &params).expect("selection");
    let first = engineering_margin(&res, &params);
    let second = engineering_margin(&res, &params);
    assert_eq!(first, second);
}

#[test]
fn cooling_boundary_is_strict() {
    assert_eq!(recommend_cooling(29.999), CoolingClass::StandardHeatsink);
    assert_eq!(recommend_cooling(29.999999), CoolingClass::StandardHeatsink);
    assert_eq!(recommend_cooling(30.0), CoolingClass::ForcedAir);
    assert_eq!(recommend_cooling(30.000001), CoolingClass::ForcedAir);
}

#[test]
fn high_loss_setup_recommends_forced_air() {
    let params = SelectionParams::default();
    let input = DriveInput {
        max_power_w: 5000.0,
        motor_kv_rpm_per_v: 190.0,
        max_current_a: 300.0,
        v_max_v: 100.0,
        foc: true,
    };
    let res = compute_selection(&input, &params).expect("selection");
    assert!(res.p_total_w >= 30.0, "p_total={}", res.p_total_w);
    assert_eq!(res.cooling, CoolingClass::ForcedAir);
}
