/// VESC 계열 모터 컨트롤러를 가정한 고정 선정 파라미터.
///
/// 사용자 입력이 아니며 컴파일 타임 기본값으로 고정된다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionParams {
    /// 병렬 MOSFET 수
    pub n_parallel: u32,
    /// 전압 마진 계수
    pub k_margin: f64,
    /// 전류 디레이팅 계수
    pub k_derate: f64,
    /// 듀티 사이클 (0~1)
    pub duty_cycle: f64,
    /// 스위칭 주파수 [Hz]
    pub switching_freq_hz: f64,
    /// 상승/하강 시간 [s]
    pub rise_fall_time_s: f64,
    /// 게이트 전하 [C]
    pub gate_charge_c: f64,
    /// 게이트-소스 전압 [V]
    pub gate_source_voltage_v: f64,
    /// 가정 Rds(on) [Ω]
    pub rds_on_assumed_ohm: f64,
    /// 소자당 최대 허용 손실 [W]
    pub pd_max_w: f64,
}

impl Default for SelectionParams {
    fn default() -> Self {
        Self {
            n_parallel: 2,
            k_margin: 1.5,
            k_derate: 1.3,
            duty_cycle: 0.8,
            switching_freq_hz: 30_000.0,
            rise_fall_time_s: 100e-9,
            gate_charge_c: 100e-9,
            gate_source_voltage_v: 10.0,
            rds_on_assumed_ohm: 0.0015,
            pd_max_w: 50.0,
        }
    }
}

impl SelectionParams {
    /// 전체 소자 수. 3상 하프브리지 상/하단 6개 × 병렬 수.
    pub fn device_count(&self) -> u32 {
        6 * self.n_parallel
    }
}
