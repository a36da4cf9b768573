//! 도출 결과를 카드 섹션 형태의 텍스트로 렌더링한다. CLI 출력과 GUI 보고서 저장이 공유한다.

use crate::i18n::{keys, Translator};
use crate::mosfet::{DriveInput, EngineeringMargin, SelectionParams, SelectionResult};

/// 카드 한 장. 제목과 본문 줄로 구성된다.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// `{name}` 꼴 자리표시자를 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// 냉각 권고 라벨을 번역해 반환한다.
pub fn cooling_label(result: &SelectionResult, tr: &Translator) -> String {
    match result.cooling {
        crate::mosfet::CoolingClass::StandardHeatsink => tr.t(keys::COOLING_STANDARD).to_string(),
        crate::mosfet::CoolingClass::ForcedAir => tr.t(keys::COOLING_FORCED).to_string(),
    }
}

/// 원본 도구의 카드 순서대로 결과 섹션을 만든다.
/// 반올림 자릿수는 표시 규칙(전류/전압 1자리, 손실/Rds 2자리, RPM 0자리)을 따른다.
pub fn render_sections(
    input: &DriveInput,
    result: &SelectionResult,
    params: &SelectionParams,
    tr: &Translator,
) -> Vec<ReportSection> {
    let mut sections = Vec::new();

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_INPUT_HEADING).to_string(),
        lines: vec![
            format!("{}: {} W", tr.t(keys::LABEL_MAX_POWER), input.max_power_w),
            format!("{}: {} RPM/V", tr.t(keys::LABEL_MOTOR_KV), input.motor_kv_rpm_per_v),
            format!("{}: {} A", tr.t(keys::LABEL_MAX_CURRENT), input.max_current_a),
            format!("{}: {} V", tr.t(keys::LABEL_V_MAX), input.v_max_v),
            format!("{}: {}", tr.t(keys::LABEL_CONTROL_MODE), result.control.label()),
        ],
    });

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_CURRENT_HEADING).to_string(),
        lines: vec![
            format!("{}: {:.1} A", tr.t(keys::LABEL_BATTERY_CURRENT), result.i_cont_a),
            format!(
                "{}: {:.1} A",
                tr.t(keys::LABEL_POWER_DERIVED_CURRENT),
                result.i_cont_power_a
            ),
            format!("{}: {:.1} A", tr.t(keys::LABEL_PHASE_RMS_CURRENT), result.i_phase_rms_a),
            format!("{}: {:.1} A", tr.t(keys::LABEL_MOS_RMS_CURRENT), result.i_mos_rms_a),
        ],
    });

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_EXTRA_CURRENT_HEADING).to_string(),
        lines: vec![
            format!("{}: {:.1} A", tr.t(keys::LABEL_MOS_PEAK_CURRENT), result.i_mos_peak_a),
            format!("{}: {:.1} A", tr.t(keys::LABEL_MOS_MIN_CURRENT), result.i_mos_min_a),
            format!("{}: {:.1} %", tr.t(keys::LABEL_EFFICIENCY), result.eta * 100.0),
        ],
    });

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_BEMF_HEADING).to_string(),
        lines: vec![
            format!("{}: {:.0} RPM", tr.t(keys::LABEL_MAX_RPM), result.max_rpm),
            format!("{}: {:.1} V", tr.t(keys::LABEL_BEMF_VOLTAGE), result.bemf_voltage_v),
        ],
    });

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_SPEC_HEADING).to_string(),
        lines: vec![
            format!("{} > {:.1} V", tr.t(keys::LABEL_VDS_RATING), result.vds_min_v),
            format!("{} > {:.1} A", tr.t(keys::LABEL_ID_CURRENT), result.i_mos_min_a),
            format!("{} < {:.2} mΩ", tr.t(keys::LABEL_RDS_ON), result.rds_on_max_mohm),
        ],
    });

    sections.push(ReportSection {
        title: tr.t(keys::REPORT_LOSS_HEADING).to_string(),
        lines: vec![
            format!("{}: {:.2} W", tr.t(keys::LABEL_P_TOTAL), result.p_total_w),
            format!(
                "{} ({} MOSFET): {:.2} W",
                tr.t(keys::LABEL_TOTAL_HEAT),
                params.device_count(),
                result.total_heat_w
            ),
            format!("{}: {:.2} W", tr.t(keys::LABEL_P_COND), result.p_cond_w),
            format!("{}: {:.2} W", tr.t(keys::LABEL_P_SW), result.p_sw_w),
            format!("{}: {}", tr.t(keys::LABEL_COOLING), cooling_label(result, tr)),
        ],
    });

    sections
}

/// 20% 마진 카드. 보수 설계 규격 + 냉각 권장 + 참고 사항으로 구성된다.
pub fn render_engineering_section(
    result: &SelectionResult,
    margin: &EngineeringMargin,
    tr: &Translator,
) -> ReportSection {
    let mut lines = vec![
        tr.t(keys::ENGINEERING_SPEC_HEADING).to_string(),
        format!("{} > {:.1} V", tr.t(keys::LABEL_VDS_RATING), margin.vds_min_v),
        format!("{} > {:.1} A", tr.t(keys::LABEL_ID_CURRENT), margin.id_min_a),
        format!("{} < {:.2} mΩ", tr.t(keys::LABEL_RDS_ON), margin.rds_on_max_mohm),
        String::new(),
        tr.t(keys::ENGINEERING_COOLING_HEADING).to_string(),
        tr.t(keys::ENGINEERING_TIP_THERMAL_RESISTANCE).to_string(),
        tr.t(keys::ENGINEERING_TIP_SIZE).to_string(),
        tr.t(keys::ENGINEERING_TIP_PADS).to_string(),
        tr.t(keys::ENGINEERING_TIP_AIRFLOW).to_string(),
        String::new(),
        tr.t(keys::ENGINEERING_NOTES_HEADING).to_string(),
        tr.t(keys::ENGINEERING_NOTE_MARGIN).to_string(),
    ];
    lines.push(fill_template(
        tr.t(keys::ENGINEERING_NOTE_MODE),
        &[("mode", result.control.label().to_string())],
    ));
    lines.push(tr.t(keys::ENGINEERING_NOTE_THERMAL_TEST).to_string());

    ReportSection {
        title: tr.t(keys::REPORT_ENGINEERING_HEADING).to_string(),
        lines,
    }
}

/// 보고서 전문을 일반 텍스트로 만든다. GUI의 파일 저장에 쓰인다.
pub fn render_report_text(
    input: &DriveInput,
    result: &SelectionResult,
    params: &SelectionParams,
    margin: Option<&EngineeringMargin>,
    tr: &Translator,
) -> String {
    let mut out = String::from("=== MOSFET Engineering Toolbox ===\n");
    for section in render_sections(input, result, params, tr) {
        out.push('\n');
        out.push_str(&section.title);
        out.push('\n');
        for line in &section.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    if let Some(margin) = margin {
        let section = render_engineering_section(result, margin, tr);
        out.push('\n');
        out.push_str(&section.title);
        out.push('\n');
        for line in &section.lines {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
