//! 20% 엔지니어링 마진 변환 모듈.

use crate::mosfet::params::SelectionParams;
use crate::mosfet::selection::SelectionResult;

/// Vds/Id 상향 계수.
pub const MARGIN_UPRATE: f64 = 1.2;
/// Rds(on) 하향 계수.
pub const MARGIN_DERATE: f64 = 0.8;

/// 20% 마진을 적용한 보수적 선정 기준.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeringMargin {
    /// 마진 적용 Vds 정격 [V]
    pub vds_min_v: f64,
    /// 마진 적용 Id 최소 정격 [A]
    pub id_min_a: f64,
    /// 마진 적용 최대 Rds(on) [mΩ]
    pub rds_on_max_mohm: f64,
}

/// 도출 결과에 마진 계수를 곱해 표시용 기준을 만든다. 새 물리량은 없다.
/// Id는 i_mos_min을 재사용하지 않고 RMS 전류에서 다시 디레이팅한다(수치상 동일).
pub fn engineering_margin(
    result: &SelectionResult,
    params: &SelectionParams,
) -> EngineeringMargin {
    EngineeringMargin {
        vds_min_v: result.vds_min_v * MARGIN_UPRATE,
        id_min_a: result.i_mos_rms_a * params.k_derate * MARGIN_UPRATE,
        rds_on_max_mohm: result.rds_on_max_mohm * MARGIN_DERATE,
    }
}
