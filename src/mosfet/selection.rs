//! MOSFET 선정 기준 도출 모듈.

use crate::mosfet::params::SelectionParams;

/// 검증 대상 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    MaxPower,
    MotorKv,
    MaxCurrent,
    VMax,
}

impl InputField {
    /// 오류 메시지와 i18n 키 조회에 쓰는 필드 이름.
    pub fn name(&self) -> &'static str {
        match self {
            InputField::MaxPower => "max_power",
            InputField::MotorKv => "motor_kv",
            InputField::MaxCurrent => "max_current",
            InputField::VMax => "v_max",
        }
    }
}

/// 선정 계산 오류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// 0 이하 입력값. 순서상 가장 먼저 걸린 필드를 담는다.
    InvalidInput(InputField),
    /// 고정 파라미터 구성 오류
    ParamOutOfRange(&'static str),
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::InvalidInput(field) => {
                write!(f, "입력 오류: {}은(는) 0보다 커야 합니다.", field.name())
            }
            SelectionError::ParamOutOfRange(msg) => write!(f, "파라미터 구성 오류: {msg}"),
        }
    }
}

impl std::error::Error for SelectionError {}

/// 사용자 입력 레코드.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveInput {
    /// 모터 최대 출력 [W]
    pub max_power_w: f64,
    /// KV 값 [RPM/V]
    pub motor_kv_rpm_per_v: f64,
    /// 상 RMS 전류 [A]
    pub max_current_a: f64,
    /// 최대 동작 전압 [V]
    pub v_max_v: f64,
    /// FOC 제어 여부
    pub foc: bool,
}

impl DriveInput {
    /// 네 필드를 순서대로 검사해 0 이하인 첫 필드를 보고한다. 상한 검사는 없다.
    pub fn validate(&self) -> Result<(), SelectionError> {
        let checks = [
            (self.max_power_w, InputField::MaxPower),
            (self.motor_kv_rpm_per_v, InputField::MotorKv),
            (self.max_current_a, InputField::MaxCurrent),
            (self.v_max_v, InputField::VMax),
        ];
        for (value, field) in checks {
            if value <= 0.0 {
                return Err(SelectionError::InvalidInput(field));
            }
        }
        Ok(())
    }
}

/// 제어 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    Foc,
    Bldc,
}

impl ControlMode {
    pub fn from_foc(foc: bool) -> Self {
        if foc {
            ControlMode::Foc
        } else {
            ControlMode::Bldc
        }
    }

    /// 제어 방식별 가정 시스템 효율. FOC 0.95, BLDC 0.90.
    pub fn efficiency(&self) -> f64 {
        match self {
            ControlMode::Foc => 0.95,
            ControlMode::Bldc => 0.90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ControlMode::Foc => "FOC",
            ControlMode::Bldc => "BLDC",
        }
    }
}

/// 냉각 권고 경계값 [W]. 소자당 총 손실 기준.
pub const COOLING_THRESHOLD_W: f64 = 30.0;

/// 냉각 권고 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoolingClass {
    StandardHeatsink,
    ForcedAir,
}

impl CoolingClass {
    pub fn label(&self) -> &'static str {
        match self {
            CoolingClass::StandardHeatsink => "Standard heatsink",
            CoolingClass::ForcedAir => "Forced air cooling",
        }
    }
}

/// 소자당 총 손실에 따른 냉각 권고. 경계값 30 W부터 강제 풍냉으로 분류한다(엄격한 < 비교).
pub fn recommend_cooling(p_total_w: f64) -> CoolingClass {
    if p_total_w < COOLING_THRESHOLD_W {
        CoolingClass::StandardHeatsink
    } else {
        CoolingClass::ForcedAir
    }
}

/// 도출 결과 레코드. 렌더링 후 폐기되는 불변 값이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionResult {
    /// 가정 시스템 효율 (0~1)
    pub eta: f64,
    /// 배터리 연속 전류, 상전류 기반 [A]
    pub i_cont_a: f64,
    /// 배터리 연속 전류, 출력 기반 교차 추정 [A]
    pub i_cont_power_a: f64,
    /// 상 RMS 전류 [A]
    pub i_phase_rms_a: f64,
    /// 소자당 RMS 전류 [A]
    pub i_mos_rms_a: f64,
    /// 소자당 피크 전류 [A]
    pub i_mos_peak_a: f64,
    /// 소자당 최소 정격 전류, 디레이팅 적용 [A]
    pub i_mos_min_a: f64,
    /// 최대 회전수 [RPM]
    pub max_rpm: f64,
    /// 역기전력 [V]
    pub bemf_voltage_v: f64,
    /// 최소 Vds 정격 [V]
    pub vds_min_v: f64,
    /// 최대 허용 Rds(on) [mΩ]
    pub rds_on_max_mohm: f64,
    /// 도통 손실 [W]
    pub p_cond_w: f64,
    /// 스위칭 손실 [W]
    pub p_sw_w: f64,
    /// 소자당 총 손실 [W]
    pub p_total_w: f64,
    /// 전체 소자 발열 [W]
    pub total_heat_w: f64,
    /// 냉각 권고
    pub cooling: CoolingClass,
    /// 제어 방식
    pub control: ControlMode,
}

/// 입력과 고정 파라미터로부터 선정 기준을 도출한다.
/// 숨은 상태가 없는 순수 계산이므로 동일 입력은 항상 동일 결과를 낸다.
pub fn compute_selection(
    input: &DriveInput,
    params: &SelectionParams,
) -> Result<SelectionResult, SelectionError> {
    input.validate()?;
    if params.n_parallel == 0 {
        return Err(SelectionError::ParamOutOfRange(
            "n_parallel은 1 이상이어야 합니다.",
        ));
    }
    if params.duty_cycle <= 0.0 {
        return Err(SelectionError::ParamOutOfRange(
            "duty_cycle은 0보다 커야 합니다.",
        ));
    }

    let control = ControlMode::from_foc(input.foc);
    let eta = control.efficiency();
    let n_parallel = f64::from(params.n_parallel);

    // 배터리 측 DC 전류
    let i_phase_rms = input.max_current_a;
    let i_cont = i_phase_rms * 3.0_f64.sqrt() / (2.0_f64.sqrt() * eta);
    let i_cont_power = input.max_power_w / (input.v_max_v * eta);

    // 소자당 전류
    let i_mos_rms = i_phase_rms / n_parallel;
    let i_mos_peak = i_phase_rms * 2.0_f64.sqrt() / n_parallel;
    let i_mos_min = i_mos_rms * params.k_derate;

    // 전압 요구 (BEMF 고려). bemf 식은 kv가 약분되지만 원 설계 그대로 유지한다.
    let max_rpm = input.motor_kv_rpm_per_v * input.v_max_v;
    let bemf_voltage = max_rpm / input.motor_kv_rpm_per_v * 0.9;
    let vds_min = input.v_max_v.max(bemf_voltage) * params.k_margin;

    // 최대 Rds(on) [mΩ]
    let rds_on_max_mohm =
        params.pd_max_w / (i_mos_rms * i_mos_rms * params.duty_cycle) * 1000.0;

    // 손실
    let p_cond = i_mos_rms * i_mos_rms * params.rds_on_assumed_ohm * params.duty_cycle;
    let p_sw = input.v_max_v * i_mos_peak * params.rise_fall_time_s * params.switching_freq_hz
        / 2.0
        + params.gate_charge_c * params.gate_source_voltage_v * params.switching_freq_hz;
    let p_total = p_cond + p_sw;
    let total_heat = p_total * f64::from(params.device_count());

    Ok(SelectionResult {
        eta,
        i_cont_a: i_cont,
        i_cont_power_a: i_cont_power,
        i_phase_rms_a: i_phase_rms,
        i_mos_rms_a: i_mos_rms,
        i_mos_peak_a: i_mos_peak,
        i_mos_min_a: i_mos_min,
        max_rpm,
        bemf_voltage_v: bemf_voltage,
        vds_min_v: vds_min,
        rds_on_max_mohm,
        p_cond_w: p_cond,
        p_sw_w: p_sw,
        p_total_w: p_total,
        total_heat_w: total_heat,
        cooling: recommend_cooling(p_total),
        control,
    })
}
