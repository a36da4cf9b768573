use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SELECTION: &str = "main_menu.selection";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const SELECTION_HEADING: &str = "selection.heading";
    pub const SELECTION_NOTE_DEFAULTS: &str = "selection.note_defaults";
    pub const PROMPT_MAX_POWER: &str = "prompt.max_power";
    pub const PROMPT_MOTOR_KV: &str = "prompt.motor_kv";
    pub const PROMPT_MAX_CURRENT: &str = "prompt.max_current";
    pub const PROMPT_V_MAX: &str = "prompt.v_max";
    pub const PROMPT_FOC: &str = "prompt.foc";
    pub const PROMPT_SHOW_ENGINEERING: &str = "prompt.show_engineering";

    pub const REPORT_INPUT_HEADING: &str = "report.input_heading";
    pub const REPORT_CURRENT_HEADING: &str = "report.current_heading";
    pub const REPORT_EXTRA_CURRENT_HEADING: &str = "report.extra_current_heading";
    pub const REPORT_BEMF_HEADING: &str = "report.bemf_heading";
    pub const REPORT_SPEC_HEADING: &str = "report.spec_heading";
    pub const REPORT_LOSS_HEADING: &str = "report.loss_heading";
    pub const REPORT_ENGINEERING_HEADING: &str = "report.engineering_heading";

    pub const LABEL_MAX_POWER: &str = "label.max_power";
    pub const LABEL_MOTOR_KV: &str = "label.motor_kv";
    pub const LABEL_MAX_CURRENT: &str = "label.max_current";
    pub const LABEL_V_MAX: &str = "label.v_max";
    pub const LABEL_CONTROL_MODE: &str = "label.control_mode";
    pub const LABEL_BATTERY_CURRENT: &str = "label.battery_current";
    pub const LABEL_POWER_DERIVED_CURRENT: &str = "label.power_derived_current";
    pub const LABEL_PHASE_RMS_CURRENT: &str = "label.phase_rms_current";
    pub const LABEL_MOS_RMS_CURRENT: &str = "label.mos_rms_current";
    pub const LABEL_MOS_PEAK_CURRENT: &str = "label.mos_peak_current";
    pub const LABEL_MOS_MIN_CURRENT: &str = "label.mos_min_current";
    pub const LABEL_EFFICIENCY: &str = "label.efficiency";
    pub const LABEL_MAX_RPM: &str = "label.max_rpm";
    pub const LABEL_BEMF_VOLTAGE: &str = "label.bemf_voltage";
    pub const LABEL_VDS_RATING: &str = "label.vds_rating";
    pub const LABEL_ID_CURRENT: &str = "label.id_current";
    pub const LABEL_RDS_ON: &str = "label.rds_on";
    pub const LABEL_P_TOTAL: &str = "label.p_total";
    pub const LABEL_TOTAL_HEAT: &str = "label.total_heat";
    pub const LABEL_P_COND: &str = "label.p_cond";
    pub const LABEL_P_SW: &str = "label.p_sw";
    pub const LABEL_COOLING: &str = "label.cooling";

    pub const COOLING_STANDARD: &str = "cooling.standard";
    pub const COOLING_FORCED: &str = "cooling.forced";

    pub const ENGINEERING_SPEC_HEADING: &str = "engineering.spec_heading";
    pub const ENGINEERING_COOLING_HEADING: &str = "engineering.cooling_heading";
    pub const ENGINEERING_TIP_THERMAL_RESISTANCE: &str = "engineering.tip_thermal_resistance";
    pub const ENGINEERING_TIP_SIZE: &str = "engineering.tip_size";
    pub const ENGINEERING_TIP_PADS: &str = "engineering.tip_pads";
    pub const ENGINEERING_TIP_AIRFLOW: &str = "engineering.tip_airflow";
    pub const ENGINEERING_NOTES_HEADING: &str = "engineering.notes_heading";
    pub const ENGINEERING_NOTE_MARGIN: &str = "engineering.note_margin";
    pub const ENGINEERING_NOTE_MODE: &str = "engineering.note_mode";
    pub const ENGINEERING_NOTE_THERMAL_TEST: &str = "engineering.note_thermal_test";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const HELP_SELECTION: &str = "help.selection";
    pub const HELP_ENGINEERING: &str = "help.engineering";
    pub const HELP_SETTINGS: &str = "help.settings";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== MOSFET Engineering Toolbox ===",
        MAIN_MENU_SELECTION => "1) MOSFET 선정 계산",
        MAIN_MENU_SETTINGS => "2) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        SELECTION_HEADING => "\n-- MOSFET 선정 계산 --",
        SELECTION_NOTE_DEFAULTS => "참고: 값 없이 엔터를 누르면 괄호 안 기본값을 사용합니다.",
        PROMPT_MAX_POWER => "모터 출력 [W]",
        PROMPT_MOTOR_KV => "KV 값 [RPM/V]",
        PROMPT_MAX_CURRENT => "상 RMS 전류 [A]",
        PROMPT_V_MAX => "최대 전압 [V]",
        PROMPT_FOC => "FOC 제어 사용",
        PROMPT_SHOW_ENGINEERING => "엔지니어링 마진 데이터를 표시할까요?",
        REPORT_INPUT_HEADING => "[입력 파라미터]",
        REPORT_CURRENT_HEADING => "[전류 분석]",
        REPORT_EXTRA_CURRENT_HEADING => "[추가 전류 계산]",
        REPORT_BEMF_HEADING => "[BEMF 분석]",
        REPORT_SPEC_HEADING => "[MOSFET 규격 요구]",
        REPORT_LOSS_HEADING => "[손실 분석]",
        REPORT_ENGINEERING_HEADING => "[엔지니어링 데이터 (20% 마진)]",
        LABEL_MAX_POWER => "모터 출력",
        LABEL_MOTOR_KV => "KV 값",
        LABEL_MAX_CURRENT => "상 RMS 전류",
        LABEL_V_MAX => "최대 전압",
        LABEL_CONTROL_MODE => "제어 모드",
        LABEL_BATTERY_CURRENT => "배터리 전류",
        LABEL_POWER_DERIVED_CURRENT => "출력 기반 추정 전류",
        LABEL_PHASE_RMS_CURRENT => "상 RMS 전류",
        LABEL_MOS_RMS_CURRENT => "소자당 RMS 전류",
        LABEL_MOS_PEAK_CURRENT => "소자당 피크 전류",
        LABEL_MOS_MIN_CURRENT => "소자당 최소 정격 전류(디레이팅)",
        LABEL_EFFICIENCY => "시스템 효율",
        LABEL_MAX_RPM => "최대 회전수",
        LABEL_BEMF_VOLTAGE => "역기전력",
        LABEL_VDS_RATING => "Vds 정격",
        LABEL_ID_CURRENT => "Id 전류",
        LABEL_RDS_ON => "Rds(on) 저항",
        LABEL_P_TOTAL => "소자당 손실",
        LABEL_TOTAL_HEAT => "전체 소자 발열",
        LABEL_P_COND => "도통 손실",
        LABEL_P_SW => "스위칭 손실",
        LABEL_COOLING => "냉각 권고",
        COOLING_STANDARD => "표준 히트싱크",
        COOLING_FORCED => "강제 풍냉",
        ENGINEERING_SPEC_HEADING => "보수 설계 규격:",
        ENGINEERING_COOLING_HEADING => "냉각 설계 권장:",
        ENGINEERING_TIP_THERMAL_RESISTANCE => "- 열저항 0.5°C/W 미만의 히트싱크 선정",
        ENGINEERING_TIP_SIZE => "- 권장 크기 약 20cm × 10cm × 5cm",
        ENGINEERING_TIP_PADS => "- 서멀 패드 또는 서멀 컴파운드 적용 검토",
        ENGINEERING_TIP_AIRFLOW => "- 충분한 공기 유동 확보",
        ENGINEERING_NOTES_HEADING => "참고:",
        ENGINEERING_NOTE_MARGIN => "- 위 수치는 20% 안전 마진을 포함합니다.",
        ENGINEERING_NOTE_MODE => "- VESC {mode} 제어 모드 기준입니다.",
        ENGINEERING_NOTE_THERMAL_TEST => "- 실제 적용 전 열 시험을 권장합니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) auto  2) en-us  3) ko-kr",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 변경되었습니다:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        HELP_SELECTION => {
            "도움말: 출력[W], KV[RPM/V], 상 RMS 전류[A], 최대 전압[V], FOC 여부 순으로 입력하면 선정 기준을 계산합니다."
        }
        HELP_ENGINEERING => {
            "도움말: 마진 데이터는 Vds/Id 20% 상향, Rds(on) 20% 하향을 적용한 보수 기준입니다."
        }
        HELP_SETTINGS => "도움말: 언어 설정(auto/en-us/ko-kr)은 config.toml에 저장됩니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== MOSFET Engineering Toolbox ===",
        MAIN_MENU_SELECTION => "1) MOSFET selection",
        MAIN_MENU_SETTINGS => "2) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        SELECTION_HEADING => "\n-- MOSFET Selection --",
        SELECTION_NOTE_DEFAULTS => "Note: press Enter to keep the default shown in parentheses.",
        PROMPT_MAX_POWER => "Motor power [W]",
        PROMPT_MOTOR_KV => "KV [RPM/V]",
        PROMPT_MAX_CURRENT => "Phase RMS current [A]",
        PROMPT_V_MAX => "Maximum voltage [V]",
        PROMPT_FOC => "Use FOC control",
        PROMPT_SHOW_ENGINEERING => "Show engineering-margin data?",
        REPORT_INPUT_HEADING => "[Input Parameters]",
        REPORT_CURRENT_HEADING => "[Current Analysis]",
        REPORT_EXTRA_CURRENT_HEADING => "[Additional Current Calculations]",
        REPORT_BEMF_HEADING => "[BEMF Analysis]",
        REPORT_SPEC_HEADING => "[MOSFET Specifications]",
        REPORT_LOSS_HEADING => "[Power Dissipation]",
        REPORT_ENGINEERING_HEADING => "[Engineering Data (20% Margin)]",
        LABEL_MAX_POWER => "Motor power",
        LABEL_MOTOR_KV => "KV value",
        LABEL_MAX_CURRENT => "Phase RMS current",
        LABEL_V_MAX => "Maximum voltage",
        LABEL_CONTROL_MODE => "Control mode",
        LABEL_BATTERY_CURRENT => "Battery current",
        LABEL_POWER_DERIVED_CURRENT => "Power-derived current",
        LABEL_PHASE_RMS_CURRENT => "Phase RMS current",
        LABEL_MOS_RMS_CURRENT => "Per-MOSFET RMS current",
        LABEL_MOS_PEAK_CURRENT => "Per-MOSFET peak current",
        LABEL_MOS_MIN_CURRENT => "Per-MOSFET minimum current (derated)",
        LABEL_EFFICIENCY => "System efficiency",
        LABEL_MAX_RPM => "Maximum RPM",
        LABEL_BEMF_VOLTAGE => "Back EMF",
        LABEL_VDS_RATING => "Vds rating",
        LABEL_ID_CURRENT => "Id current",
        LABEL_RDS_ON => "Rds(on) resistance",
        LABEL_P_TOTAL => "Single MOSFET power",
        LABEL_TOTAL_HEAT => "Total heat",
        LABEL_P_COND => "Conduction loss",
        LABEL_P_SW => "Switching loss",
        LABEL_COOLING => "Cooling recommendation",
        COOLING_STANDARD => "Standard heatsink",
        COOLING_FORCED => "Forced air cooling",
        ENGINEERING_SPEC_HEADING => "Conservative design specifications:",
        ENGINEERING_COOLING_HEADING => "Cooling design recommendations:",
        ENGINEERING_TIP_THERMAL_RESISTANCE => {
            "- Select a heatsink with thermal resistance < 0.5°C/W"
        }
        ENGINEERING_TIP_SIZE => "- Recommended size: ~20cm × 10cm × 5cm",
        ENGINEERING_TIP_PADS => "- Consider thermal adhesive or pads",
        ENGINEERING_TIP_AIRFLOW => "- Ensure adequate airflow",
        ENGINEERING_NOTES_HEADING => "Notes:",
        ENGINEERING_NOTE_MARGIN => "- Data includes a 20% safety margin.",
        ENGINEERING_NOTE_MODE => "- Suitable for VESC {mode} mode.",
        ENGINEERING_NOTE_THERMAL_TEST => "- Perform thermal testing before deployment.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) auto  2) en-us  3) ko-kr",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        HELP_SELECTION => {
            "Help: enter power [W], KV [RPM/V], phase RMS current [A], maximum voltage [V] and the FOC flag to compute selection criteria."
        }
        HELP_ENGINEERING => {
            "Help: engineering data uprates Vds/Id by 20% and derates Rds(on) by 20% for conservative designs."
        }
        HELP_SETTINGS => "Help: the language setting (auto/en-us/ko-kr) is stored in config.toml.",
        _ => return None,
    })
}
