use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::mosfet::{compute_selection, engineering_margin, DriveInput, SelectionParams};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Selection,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SELECTION));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Selection),
            "2" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// MOSFET 선정 계산 메뉴를 처리한다.
pub fn handle_selection(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SELECTION_HEADING));
    println!("{}", tr.t(keys::HELP_SELECTION));
    println!("{}", tr.t(keys::SELECTION_NOTE_DEFAULTS));

    let defaults = cfg.defaults;
    let max_power_w = read_f64_or_default(tr, tr.t(keys::PROMPT_MAX_POWER), defaults.max_power_w)?;
    let motor_kv_rpm_per_v =
        read_f64_or_default(tr, tr.t(keys::PROMPT_MOTOR_KV), defaults.motor_kv_rpm_per_v)?;
    let max_current_a =
        read_f64_or_default(tr, tr.t(keys::PROMPT_MAX_CURRENT), defaults.max_current_a)?;
    let v_max_v = read_f64_or_default(tr, tr.t(keys::PROMPT_V_MAX), defaults.v_max_v)?;
    let foc = read_yes_no(tr, tr.t(keys::PROMPT_FOC), defaults.foc)?;

    let input = DriveInput {
        max_power_w,
        motor_kv_rpm_per_v,
        max_current_a,
        v_max_v,
        foc,
    };
    let params = SelectionParams::default();
    let result = match compute_selection(&input, &params) {
        Ok(result) => result,
        Err(e) => {
            println!("{}: {e}", tr.t(keys::ERROR_PREFIX));
            return Ok(());
        }
    };

    for section in report::render_sections(&input, &result, &params, tr) {
        println!("\n{}", section.title);
        for line in &section.lines {
            println!("{line}");
        }
    }

    // 마진 카드 표시 여부는 호출마다 새로 묻는 세션 상태다.
    if read_yes_no(tr, tr.t(keys::PROMPT_SHOW_ENGINEERING), false)? {
        println!("{}", tr.t(keys::HELP_ENGINEERING));
        let margin = engineering_margin(&result, &params);
        let section = report::render_engineering_section(&result, &margin, tr);
        println!("\n{}", section.title);
        for line in &section.lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::HELP_SETTINGS));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    cfg.language = match sel.trim() {
        "1" => "auto".into(),
        "2" => "en-us".into(),
        "3" => "ko-kr".into(),
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            cfg.language.clone()
        }
    };
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 숫자를 읽는다. 빈 입력은 기본값, 파싱 실패는 재입력이다.
fn read_f64_or_default(tr: &Translator, label: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{label} ({default}): "))?;
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(default);
        }
        match trimmed.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// y/n 응답을 읽는다. 빈 입력은 기본값이다.
fn read_yes_no(tr: &Translator, label: &str, default: bool) -> Result<bool, AppError> {
    let hint = if default { "y" } else { "n" };
    loop {
        let s = read_line(&format!("{label} (y/n, {hint}): "))?;
        match s.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}
