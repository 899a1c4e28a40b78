#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::collections::HashMap;
use std::{fs, path::Path};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use eframe::{egui, App, Frame};
use egui_plot::{HLine, Legend, Line, LineStyle, Plot, PlotPoints};
use image::GenericImageView;
use tracing::warn;
use workshop_roi_calculator::{
    config,
    finance::{compute_derived_results, DerivedResults, InputParameters, Timeframe},
    format::{format_currency, format_plain},
    i18n::{self, keys},
    input::{InputField, InputGroup},
    report::{self, ReportSection},
};

#[derive(Parser)]
#[command(name = "workshop_roi_calculator")]
#[command(about = "Metal workshop ROI calculator (desktop)")]
struct GuiArgs {
    /// Display language (auto/en/fr)
    #[arg(long, short = 'L')]
    lang: Option<String>,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    let args = GuiArgs::parse();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 880.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "falling back to default config");
        config::Config::default()
    });
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Metal Workshop ROI Calculator",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn section_card(ui: &mut egui::Ui, section: &ReportSection) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.heading(&section.title);
        ui.separator();
        egui::Grid::new(("section", section.title.as_str()))
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for row in &section.rows {
                    ui.label(&row.label);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(&row.value);
                    });
                    ui.end_row();
                }
            });
    });
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    settings_status: Option<String>,
    window_alpha: f32,
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
    // 입력 상태
    inputs: InputParameters,
    field_text: HashMap<InputField, String>,
    currency_text: String,
    // 마지막 평가 결과
    results: DerivedResults,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let resolved = i18n::resolve_language(&config.language, None);
        let tr = i18n::Translator::new_with_pack(&resolved, config.language_pack_dir.as_deref());
        let inputs = config.initial_inputs();
        let results = compute_derived_results(&inputs);
        let mut app = Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            config,
            tr,
            settings_status: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            inputs,
            field_text: HashMap::new(),
            currency_text: String::new(),
            results,
        };
        app.sync_text_from_inputs();
        app
    }

    /// 입력 칸의 문자열을 현재 입력값으로 다시 채운다.
    fn sync_text_from_inputs(&mut self) {
        self.field_text = InputField::ALL
            .iter()
            .map(|&f| (f, format_plain(f.value(&self.inputs))))
            .collect();
        self.currency_text = self.inputs.currency.clone();
    }

    /// 새 입력값으로 교체하고, 달라졌으면 다시 계산한다.
    fn set_inputs(&mut self, next: InputParameters) {
        if next != self.inputs {
            self.results = compute_derived_results(&next);
            self.inputs = next;
        }
    }

    fn reset(&mut self) {
        self.set_inputs(self.config.initial_inputs());
        self.sync_text_from_inputs();
    }

    fn ui_timeframe_tabs(&mut self, ui: &mut egui::Ui) {
        let mut timeframe = self.inputs.timeframe;
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut timeframe,
                Timeframe::Monthly,
                self.tr.t(keys::TIMEFRAME_MONTHLY),
            );
            ui.selectable_value(
                &mut timeframe,
                Timeframe::Yearly,
                self.tr.t(keys::TIMEFRAME_YEARLY),
            );
        });
        if timeframe != self.inputs.timeframe {
            self.set_inputs(self.inputs.with_timeframe(timeframe));
        }
    }

    fn ui_input_card(&mut self, ui: &mut egui::Ui, group: InputGroup) {
        let tr = self.tr.clone();
        let mut next = self.inputs.clone();
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.heading(tr.t(group.title_key()));
            ui.separator();
            egui::Grid::new(("inputs", group.title_key()))
                .num_columns(2)
                .spacing([12.0, 6.0])
                .show(ui, |ui| {
                    if group == InputGroup::Revenue {
                        ui.label(tr.t(keys::FIELD_CURRENCY));
                        let resp = ui.add(
                            egui::TextEdit::singleline(&mut self.currency_text).desired_width(80.0),
                        );
                        if resp.changed() {
                            next = next.with_currency(&self.currency_text);
                        }
                        ui.end_row();
                    }
                    for field in group.fields() {
                        if field == InputField::Utilization {
                            ui.label(format!(
                                "{}: {}%",
                                tr.t(field.label_key()),
                                format_plain(next.utilization_pct)
                            ));
                            let mut util = next.utilization_pct;
                            let slider = egui::Slider::new(&mut util, 10.0..=100.0).step_by(1.0);
                            if ui.add(slider).changed() {
                                next = next.with_value(field, util);
                            }
                            ui.end_row();
                            continue;
                        }
                        if field == InputField::DownPaymentPct {
                            ui.label(tr.t(keys::FINANCE_LABEL));
                            let state = if next.use_finance {
                                keys::FINANCE_ENABLED
                            } else {
                                keys::FINANCE_DISABLED
                            };
                            if ui.button(tr.t(state)).clicked() {
                                next = next.with_finance(!next.use_finance);
                            }
                            ui.end_row();
                        }
                        let enabled = !field.requires_finance() || next.use_finance;
                        ui.label(tr.t(field.label_key()));
                        let buf = self.field_text.entry(field).or_default();
                        let resp = ui.add_enabled(
                            enabled,
                            egui::TextEdit::singleline(buf).desired_width(140.0),
                        );
                        if resp.changed() {
                            next = next.with_text(field, buf);
                        }
                        ui.end_row();
                    }
                });
        });
        self.set_inputs(next);
    }

    fn ui_kpis(&self, ui: &mut egui::Ui) {
        let rep = report::build_report(&self.inputs, &self.results, &self.tr);
        let rows = &rep.kpis.rows;
        ui.columns(rows.len(), |cols| {
            for (col, row) in cols.iter_mut().zip(rows) {
                col.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new(&row.label).small().weak());
                    ui.label(egui::RichText::new(&row.value).strong().size(18.0));
                });
            }
        });
    }

    fn ui_chart(&self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.group(|ui| {
            ui.heading(report::chart_title(self.inputs.timeframe, tr));
            ui.separator();
            let points: Vec<[f64; 2]> = self
                .results
                .chart_data
                .iter()
                .map(|p| [p.index as f64, p.cumulative_cash])
                .collect();
            let currency = self.inputs.currency.clone();
            let yearly = self.inputs.timeframe == Timeframe::Yearly;
            Plot::new("cumulative_cash")
                .height(320.0)
                .legend(Legend::default())
                .x_axis_label(tr.t(keys::CHART_X_AXIS))
                .label_formatter(move |name, value| {
                    let period = if yearly {
                        format!("Y{}", (value.x / 12.0).round())
                    } else {
                        format!("M{}", value.x.round())
                    };
                    format!("{name}\n{period}: {}", format_currency(value.y, &currency))
                })
                .show(ui, |plot_ui| {
                    plot_ui.hline(
                        HLine::new(0.0)
                            .color(egui::Color32::GRAY)
                            .style(LineStyle::dashed_loose()),
                    );
                    plot_ui.line(Line::new(PlotPoints::from(points)).name(tr.t(keys::CHART_SERIES)));
                });
        });
    }

    fn ui_details(&self, ui: &mut egui::Ui) {
        let rep = report::build_report(&self.inputs, &self.results, &self.tr);
        ui.columns(3, |cols| {
            section_card(&mut cols[0], &rep.hours_and_costs);
            section_card(&mut cols[1], &rep.capex_and_finance);
            cols[2].group(|ui| {
                ui.set_min_width(ui.available_width());
                ui.heading(self.tr.t(keys::NOTES_TITLE));
                ui.separator();
                for note in report::notes(&self.tr) {
                    ui.add(egui::Label::new(egui::RichText::new(note).small()).wrap(true));
                }
            });
        });
    }

    fn ui_settings_modal(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let mut save_clicked = false;
        egui::Window::new(tr.t(keys::GUI_SETTINGS_TITLE))
            .collapsible(false)
            .resizable(true)
            .open(&mut self.show_settings_modal)
            .show(ctx, |ui| {
                ui.label(tr.t(keys::GUI_SETTINGS_LANG));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.clone())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            tr.t(keys::GUI_SETTINGS_LANG_AUTO),
                        );
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                        ui.selectable_value(&mut self.lang_input, "fr-fr".into(), "Français");
                    });
                ui.separator();
                ui.label(tr.t(keys::GUI_SETTINGS_ALPHA));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                if ui.button(tr.t(keys::GUI_SETTINGS_SAVE)).clicked() {
                    save_clicked = true;
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });
        if save_clicked {
            self.config.language = self.lang_input.clone();
            self.config.window_alpha = self.window_alpha;
            let resolved = i18n::resolve_language(&self.config.language, None);
            self.tr =
                i18n::Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
            self.settings_status = Some(match self.config.save() {
                Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
                Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
            });
        }
    }

    fn ui_text_modals(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        egui::Window::new(tr.t(keys::GUI_ABOUT_TITLE))
            .collapsible(false)
            .open(&mut self.show_help_modal)
            .show(ctx, |ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.label(tr.t(keys::GUI_ABOUT_BODY));
                ui.separator();
                ui.label(tr.t(keys::GUI_TIP));
            });
        egui::Window::new(tr.t(keys::GUI_FORMULA_TITLE))
            .collapsible(true)
            .open(&mut self.show_formula_modal)
            .show(ctx, |ui| {
                ui.style_mut().wrap = Some(true);
                for line in tr.t(keys::GUI_FORMULA_BODY).lines() {
                    ui.monospace(line);
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut visuals = egui::Visuals::light();
        visuals.window_fill = visuals.window_fill.linear_multiply(self.window_alpha);
        visuals.panel_fill = visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_visuals(visuals);

        // 상단 바
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_RESET)).clicked() {
                    self.reset();
                }
                if ui.button(self.tr.t(keys::GUI_FORMULA_TITLE)).clicked() {
                    self.show_formula_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_SETTINGS_TITLE)).clicked() {
                    self.show_settings_modal = true;
                }
                if ui.button(self.tr.t(keys::GUI_ABOUT_TITLE)).clicked() {
                    self.show_help_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings_modal(ctx);
        }
        self.ui_text_modals(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_timeframe_tabs(ui);
                    ui.add_space(8.0);
                    ui.columns(3, |cols| {
                        for (col, group) in cols.iter_mut().zip(InputGroup::ALL) {
                            self.ui_input_card(col, group);
                        }
                    });
                    ui.add_space(8.0);
                    self.ui_kpis(ui);
                    ui.add_space(8.0);
                    self.ui_chart(ui);
                    ui.add_space(8.0);
                    self.ui_details(ui);
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(self.tr.t(keys::GUI_TIP)).small().weak());
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_evaluates_configured_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert!((app.results.ebitda_annual - 83_760.0).abs() < 1e-6);
        assert_eq!(app.field_text[&InputField::HourlyRate], "120");
        assert_eq!(app.field_text[&InputField::KwhRate], "0.12");
        assert_eq!(app.currency_text, "USD");
    }

    #[test]
    fn text_edit_recomputes_with_coercion() {
        let mut app = GuiApp::new(config::Config::default());
        let next = app.inputs.with_text(InputField::PurchaseCost, "free");
        app.set_inputs(next);
        assert_eq!(app.inputs.purchase_cost, 0.0);
        assert!((app.results.capex - 18_000.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_inputs_and_text() {
        let mut app = GuiApp::new(config::Config::default());
        app.set_inputs(app.inputs.with_finance(false).with_value(InputField::HorizonYears, 10.0));
        app.field_text.insert(InputField::HorizonYears, "10".into());
        app.reset();
        assert_eq!(app.inputs, InputParameters::default());
        assert_eq!(app.field_text[&InputField::HorizonYears], "5");
        assert_eq!(app.results.chart_data.len(), 60);
    }

    #[test]
    fn yearly_timeframe_switches_chart_buckets() {
        let mut app = GuiApp::new(config::Config::default());
        app.set_inputs(app.inputs.with_timeframe(Timeframe::Yearly));
        assert_eq!(app.results.chart_data.len(), 5);
        assert_eq!(app.results.chart_data[4].label, "Y5");
    }
}
