#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use mosfet_engineering_toolbox::{
    config, i18n,
    mosfet::{
        compute_selection, engineering_margin, DriveInput, SelectionParams, SelectionResult,
    },
    report,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "MOSFET Engineering Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 라벨을 표시하기 위해 기본 폰트를 우선 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림/바탕 등)
/// 3) 모두 실패 시 Err를 반환해 기본 폰트로 동작한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = [
            "malgun.ttf",
            "malgunsl.ttf",
            "malgunbd.ttf",
            "gulim.ttc",
            "batang.ttc",
        ];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Font not found; falling back to the default egui font.".into())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    params: SelectionParams,
    lang_input: String,
    lang_save_status: Option<String>,
    ui_scale: f32,
    window_alpha: f32,
    always_on_top: bool,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
    apply_initial_view_size: bool,
    // 입력 폼
    max_power_w: f64,
    motor_kv_rpm_per_v: f64,
    max_current_a: f64,
    v_max_v: f64,
    foc: bool,
    // 세션 상태
    result: Option<(DriveInput, SelectionResult)>,
    error_line: Option<String>,
    /// 마진 카드 표시 여부. 프로세스 전역이 아니라 세션 상태로만 유지한다.
    show_engineering: bool,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        eprintln!("GUI language resolved: {lang_code}");
        let lang_input = config.language.clone();
        let defaults = config.defaults;
        Self {
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            params: SelectionParams::default(),
            lang_input,
            lang_save_status: None,
            ui_scale: 1.0,
            always_on_top: false,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            apply_initial_view_size: true,
            max_power_w: defaults.max_power_w,
            motor_kv_rpm_per_v: defaults.motor_kv_rpm_per_v,
            max_current_a: defaults.max_current_a,
            v_max_v: defaults.v_max_v,
            foc: defaults.foc,
            result: None,
            error_line: None,
            show_engineering: false,
            save_status: None,
        }
    }

    fn current_input(&self) -> DriveInput {
        DriveInput {
            max_power_w: self.max_power_w,
            motor_kv_rpm_per_v: self.motor_kv_rpm_per_v,
            max_current_a: self.max_current_a,
            v_max_v: self.v_max_v,
            foc: self.foc,
        }
    }

    fn run_selection(&mut self) {
        let input = self.current_input();
        match compute_selection(&input, &self.params) {
            Ok(result) => {
                self.result = Some((input, result));
                self.error_line = None;
            }
            Err(e) => {
                self.result = None;
                self.error_line = Some(e.to_string());
            }
        }
        self.save_status = None;
    }

    fn reset_to_defaults(&mut self) {
        let defaults = self.config.defaults;
        self.max_power_w = defaults.max_power_w;
        self.motor_kv_rpm_per_v = defaults.motor_kv_rpm_per_v;
        self.max_current_a = defaults.max_current_a;
        self.v_max_v = defaults.v_max_v;
        self.foc = defaults.foc;
        self.clear_results();
    }

    fn clear_results(&mut self) {
        self.result = None;
        self.error_line = None;
        self.show_engineering = false;
        self.save_status = None;
    }

    /// 현재 결과를 일반 텍스트 보고서로 저장한다.
    fn save_report(&mut self) {
        let Some((input, result)) = self.result else {
            return;
        };
        let margin = self
            .show_engineering
            .then(|| engineering_margin(&result, &self.params));
        let text =
            report::render_report_text(&input, &result, &self.params, margin.as_ref(), &self.tr);
        let Some(path) = FileDialog::new()
            .set_file_name("mosfet_report.txt")
            .add_filter("Text", &["txt"])
            .save_file()
        else {
            return;
        };
        self.save_status = Some(match fs::write(&path, text) {
            Ok(()) => format!("Saved: {}", path.display()),
            Err(e) => format!("Save error: {e}"),
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 최초 1회 화면 크기 조정
        if self.apply_initial_view_size {
            if let Some(screen) = ctx.input(|i| {
                let r = i.screen_rect();
                if r.is_positive() {
                    Some(r.size())
                } else {
                    None
                }
            }) {
                let target = egui::vec2((screen.x * 0.5).max(900.0), (screen.y * 0.6).max(760.0));
                ctx.send_viewport_cmd(egui::ViewportCommand::InnerSize(target));
                self.apply_initial_view_size = false;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        let tr = self.tr.clone();
        let txt = move |key: &str, default: &str| {
            tr.lookup(key).unwrap_or_else(|| default.to_string())
        };

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(txt("gui.nav.app_title", "MOSFET Engineering Toolbox"));
                ui.label(" | Desktop GUI");
                ui.separator();
                if ui
                    .button(txt("gui.formula.button", "Formula reference"))
                    .clicked()
                {
                    self.show_formula_modal = true;
                }
                if ui.button(txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(txt("gui.about.title", "Help / About")).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        // 설정 모달
        if self.show_settings_modal {
            egui::Window::new(txt("gui.settings.title", "Settings"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.heading(txt("gui.settings.general", "General"));
                    ui.separator();
                    ui.label(txt("gui.settings.ui_scale", "UI scale"));
                    let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                    if ui.add(scale_slider).changed() {
                        ctx.set_pixels_per_point(self.ui_scale);
                    }
                    ui.separator();
                    ui.checkbox(
                        &mut self.always_on_top,
                        txt("gui.settings.always_on_top", "Always on top"),
                    );
                    ui.separator();
                    ui.label(txt("gui.settings.alpha", "Window transparency"));
                    ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));

                    ui.separator();
                    ui.label(txt("gui.settings.lang", "Language"));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                txt("gui.settings.lang_auto", "System"),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                        self.config.language = self.lang_input.clone();
                        self.config.window_alpha = self.window_alpha;
                        // 즉시 번역기 반영
                        let resolved = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &resolved,
                            self.config.language_pack_dir.as_deref(),
                        );
                        if let Err(e) = self.config.save() {
                            self.lang_save_status = Some(format!("Save error: {e}"));
                        } else {
                            self.lang_save_status = Some(txt("gui.settings.saved", "Saved."));
                        }
                    }
                    if let Some(msg) = &self.lang_save_status {
                        ui.label(msg);
                    }
                });
        }

        // 도움말 모달
        if self.show_help_modal {
            egui::Window::new(txt("gui.about.title", "Help / About"))
                .collapsible(false)
                .resizable(true)
                .open(&mut self.show_help_modal)
                .show(ctx, |ui| {
                    ui.heading(txt(
                        "gui.about.app",
                        "Offline MOSFET selection tool for motor controllers (VESC FOC/BLDC)",
                    ));
                    ui.label(txt("gui.about.version", "Version: 0.3.0"));
                    ui.separator();
                    ui.label(txt(
                        "gui.about.inputs",
                        "- Inputs: motor power [W], KV [RPM/V], phase RMS current [A], max voltage [V], FOC flag",
                    ));
                    ui.label(txt(
                        "gui.about.margin",
                        "- Engineering data applies a 20% margin for conservative designs",
                    ));
                    ui.label(txt(
                        "gui.about.hint",
                        "Adjust language/font in settings if labels look wrong.",
                    ));
                });
        }

        // 수식 참조 모달
        if self.show_formula_modal {
            egui::Window::new(txt("gui.formula.title", "Formula reference"))
                .collapsible(true)
                .resizable(true)
                .open(&mut self.show_formula_modal)
                .show(ctx, |ui| {
                    ui.style_mut().wrap = Some(true);
                    ui.heading(txt(
                        "gui.formula.currents",
                        "Currents: I_cont = I_phase·√3/(√2·η); I_cont(power) = P/(V·η); per device: I_rms = I_phase/n, I_peak = I_phase·√2/n, I_min = I_rms·k_derate.",
                    ));
                    ui.separator();
                    ui.heading(txt(
                        "gui.formula.voltage",
                        "Voltage: RPM_max = KV·V; BEMF = RPM_max/KV·0.9; Vds_min = max(V, BEMF)·k_margin.",
                    ));
                    ui.label(txt(
                        "gui.formula.rds",
                        "Rds(on)_max = Pd_max/(I_rms²·D)·1000 [mΩ].",
                    ));
                    ui.separator();
                    ui.heading(txt(
                        "gui.formula.losses",
                        "Losses: P_cond = I_rms²·Rds(on)·D; P_sw = V·I_peak·t_rf·f_sw/2 + Qg·Vgs·f_sw; P_total = P_cond + P_sw.",
                    ));
                    ui.label(txt(
                        "gui.formula.cooling",
                        "Cooling: per-device P_total < 30 W → standard heatsink, otherwise forced air.",
                    ));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.heading(txt("gui.form.heading", "MOSFET Selection (VESC FOC)"));
                    ui.small(txt(
                        "gui.form.subtitle",
                        "Professional MOSFET selection tool for motor controller design",
                    ));
                    ui.add_space(8.0);

                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        egui::Grid::new("input_form")
                            .num_columns(2)
                            .spacing([12.0, 6.0])
                            .show(ui, |ui| {
                                label_with_tip(
                                    ui,
                                    &txt("gui.form.max_power", "Motor power [W]"),
                                    &txt("gui.form.max_power_tip", "Maximum motor power output"),
                                );
                                ui.add(egui::DragValue::new(&mut self.max_power_w).speed(10.0));
                                ui.end_row();
                                label_with_tip(
                                    ui,
                                    &txt("gui.form.motor_kv", "KV [RPM/V]"),
                                    &txt("gui.form.motor_kv_tip", "Motor KV value, RPM per volt"),
                                );
                                ui.add(
                                    egui::DragValue::new(&mut self.motor_kv_rpm_per_v).speed(1.0),
                                );
                                ui.end_row();
                                label_with_tip(
                                    ui,
                                    &txt("gui.form.max_current", "Phase RMS current [A]"),
                                    &txt(
                                        "gui.form.max_current_tip",
                                        "Effective RMS current per motor phase",
                                    ),
                                );
                                ui.add(egui::DragValue::new(&mut self.max_current_a).speed(1.0));
                                ui.end_row();
                                label_with_tip(
                                    ui,
                                    &txt("gui.form.v_max", "Maximum voltage [V]"),
                                    &txt("gui.form.v_max_tip", "Maximum system operating voltage"),
                                );
                                ui.add(egui::DragValue::new(&mut self.v_max_v).speed(1.0));
                                ui.end_row();
                                label_with_tip(
                                    ui,
                                    &txt("gui.form.foc", "Use FOC control"),
                                    &txt(
                                        "gui.form.foc_tip",
                                        "FOC control offers higher efficiency and lower noise",
                                    ),
                                );
                                ui.checkbox(&mut self.foc, "");
                                ui.end_row();
                            });
                        if ui.button(txt("gui.form.run", "Calculate")).clicked() {
                            self.run_selection();
                        }
                    });

                    if let Some(err) = &self.error_line {
                        ui.add_space(6.0);
                        ui.label(format!("{} {err}", txt("gui.form.error_prefix", "Error:")));
                    }

                    if let Some((input, result)) = self.result {
                        for section in
                            report::render_sections(&input, &result, &self.params, &self.tr)
                        {
                            ui.add_space(8.0);
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.strong(section.title.as_str());
                                ui.separator();
                                for line in &section.lines {
                                    ui.label(line);
                                }
                            });
                        }

                        // 동작 버튼
                        ui.add_space(10.0);
                        ui.horizontal(|ui| {
                            let eng_label = if self.show_engineering {
                                txt("gui.action.engineering_hide", "Hide engineering data")
                            } else {
                                txt("gui.action.engineering", "Engineering data")
                            };
                            if ui.button(eng_label).clicked() {
                                self.show_engineering = !self.show_engineering;
                            }
                            if ui.button(txt("gui.action.recalc", "Recalculate")).clicked() {
                                self.reset_to_defaults();
                            }
                            if ui.button(txt("gui.action.clear", "Clear")).clicked() {
                                self.clear_results();
                            }
                            if ui
                                .button(txt("gui.action.save_report", "Save report"))
                                .clicked()
                            {
                                self.save_report();
                            }
                        });
                        if let Some(status) = &self.save_status {
                            ui.small(status.as_str());
                        }

                        if self.show_engineering {
                            let margin = engineering_margin(&result, &self.params);
                            let section =
                                report::render_engineering_section(&result, &margin, &self.tr);
                            ui.add_space(8.0);
                            egui::Frame::group(ui.style()).show(ui, |ui| {
                                ui.strong(section.title.as_str());
                                ui.separator();
                                for line in &section.lines {
                                    if line.is_empty() {
                                        ui.add_space(4.0);
                                    } else {
                                        ui.label(line);
                                    }
                                }
                            });
                        }
                    }

                    ui.add_space(16.0);
                    ui.separator();
                    ui.small(txt(
                        "gui.footer",
                        "MOSFET Engineering Toolbox | Motor controller design tool",
                    ));
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosfet_engineering_toolbox::mosfet::MARGIN_UPRATE;

    #[test]
    fn new_uses_config_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.max_power_w, 2700.0);
        assert_eq!(app.motor_kv_rpm_per_v, 190.0);
        assert_eq!(app.max_current_a, 75.0);
        assert_eq!(app.v_max_v, 60.0);
        assert!(app.foc);
        assert!(app.result.is_none());
        assert!(!app.show_engineering);
    }

    #[test]
    fn run_selection_reports_invalid_input() {
        let mut app = GuiApp::new(config::Config::default());
        app.v_max_v = 0.0;
        app.run_selection();
        assert!(app.result.is_none());
        assert!(app.error_line.is_some());
    }

    #[test]
    fn run_selection_keeps_margin_consistent() {
        let mut app = GuiApp::new(config::Config::default());
        app.run_selection();
        let (_, result) = app.result.expect("selection result");
        let margin = engineering_margin(&result, &app.params);
        assert!((margin.vds_min_v - result.vds_min_v * MARGIN_UPRATE).abs() < 1e-9);
        assert!((margin.id_min_a - result.i_mos_min_a * MARGIN_UPRATE).abs() < 1e-9);
    }
}
