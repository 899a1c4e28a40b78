use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};

use crate::app::AppError;
use crate::config::Config;
use crate::finance::{DerivedResults, InputParameters, Timeframe};
use crate::format::format_plain;
use crate::i18n::{self, keys, Translator};
use crate::input::InputField;
use crate::report;

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "workshop_roi_cli")]
#[command(about = "Metal workshop ROI calculator: payback, NPV and IRR for a cutting machine")]
pub struct Cli {
    /// Display language (auto/en/fr)
    #[arg(long, short = 'L', global = true)]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate one set of inputs and print the results
    Report(ReportArgs),
    /// Edit inputs from a menu and re-evaluate after each change
    Interactive,
}

impl Default for Command {
    fn default() -> Self {
        Command::Report(ReportArgs::default())
    }
}

/// 입력값 덮어쓰기. 숫자는 텍스트로 받아 읽을 수 없으면 0으로 본다.
#[derive(Debug, Default, Args)]
pub struct ReportArgs {
    /// Currency label (display only)
    #[arg(long)]
    pub currency: Option<String>,
    /// Chart aggregation: monthly or yearly
    #[arg(long)]
    pub timeframe: Option<Timeframe>,
    /// Pay the full CAPEX up front
    #[arg(long)]
    pub no_finance: bool,
    /// Also print the cash-flow table
    #[arg(long)]
    pub chart: bool,

    #[arg(long, value_name = "TEXT")]
    pub hourly_rate: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub annual_days: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub hours_per_day: Option<String>,
    /// Utilization in percent
    #[arg(long, value_name = "TEXT")]
    pub utilization: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub base_annual_opex: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub power_kw: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub kwh_rate: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub gas_cost_per_hour: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub maintenance_per_year: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub purchase_cost: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub freight_and_import: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub down_payment_pct: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub loan_years: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub annual_interest_pct: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub discount_rate_pct: Option<String>,
    #[arg(long, value_name = "TEXT")]
    pub horizon_years: Option<String>,
}

impl ReportArgs {
    fn field_text(&self, field: InputField) -> Option<&str> {
        use InputField::*;
        let text = match field {
            HourlyRate => &self.hourly_rate,
            AnnualDays => &self.annual_days,
            HoursPerDay => &self.hours_per_day,
            Utilization => &self.utilization,
            BaseAnnualOpex => &self.base_annual_opex,
            PowerKw => &self.power_kw,
            KwhRate => &self.kwh_rate,
            GasCostPerHour => &self.gas_cost_per_hour,
            MaintenancePerYear => &self.maintenance_per_year,
            PurchaseCost => &self.purchase_cost,
            FreightAndImport => &self.freight_and_import,
            DownPaymentPct => &self.down_payment_pct,
            LoanYears => &self.loan_years,
            AnnualInterestPct => &self.annual_interest_pct,
            DiscountRatePct => &self.discount_rate_pct,
            HorizonYears => &self.horizon_years,
        };
        text.as_deref()
    }

    /// 주어진 입력값 위에 명령행 값을 덮어쓴다.
    pub fn apply(&self, base: &InputParameters) -> InputParameters {
        let mut inputs = InputField::ALL
            .into_iter()
            .fold(base.clone(), |acc, field| match self.field_text(field) {
                Some(text) => acc.with_text(field, text),
                None => acc,
            });
        if let Some(currency) = &self.currency {
            inputs = inputs.with_currency(currency);
        }
        if let Some(timeframe) = self.timeframe {
            inputs = inputs.with_timeframe(timeframe);
        }
        if self.no_finance {
            inputs = inputs.with_finance(false);
        }
        inputs
    }
}

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EditField,
    ToggleFinance,
    ToggleTimeframe,
    ShowReport,
    ShowChart,
    Reset,
    Settings,
    Exit,
}

/// 대화형 입출력. 입력이 끝나면(EOF) 종료로 처리한다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. EOF면 `None`.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_EDIT_FIELD,
        keys::MAIN_MENU_TOGGLE_FINANCE,
        keys::MAIN_MENU_TOGGLE_TIMEFRAME,
        keys::MAIN_MENU_SHOW_REPORT,
        keys::MAIN_MENU_SHOW_CHART,
        keys::MAIN_MENU_RESET,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        console.say(tr.t(key))?;
    }
    loop {
        let Some(sel) = console.read_line(tr.t(keys::PROMPT_MENU_SELECT))? else {
            return Ok(MenuChoice::Exit);
        };
        match sel.as_str() {
            "1" => return Ok(MenuChoice::EditField),
            "2" => return Ok(MenuChoice::ToggleFinance),
            "3" => return Ok(MenuChoice::ToggleTimeframe),
            "4" => return Ok(MenuChoice::ShowReport),
            "5" => return Ok(MenuChoice::ShowChart),
            "6" => return Ok(MenuChoice::Reset),
            "7" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => console.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 항목 목록을 보여주고 하나를 골라 새 값으로 바꾼 입력값을 돌려준다.
pub fn handle_edit_field<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
    inputs: &InputParameters,
) -> Result<InputParameters, AppError> {
    console.say(tr.t(keys::EDIT_HEADING))?;
    for (i, field) in InputField::ALL.iter().enumerate() {
        console.say(&format!(
            "{:>2}) {} = {}",
            i + 1,
            tr.t(field.label_key()),
            format_plain(field.value(inputs))
        ))?;
    }
    let Some(sel) = console.read_line(tr.t(keys::EDIT_PROMPT_FIELD))? else {
        return Ok(inputs.clone());
    };
    let field = match sel.parse::<usize>() {
        Ok(n) if (1..=InputField::ALL.len()).contains(&n) => InputField::ALL[n - 1],
        _ => {
            console.say(tr.t(keys::EDIT_UNSUPPORTED))?;
            return Ok(inputs.clone());
        }
    };
    let Some(text) = console.read_line(tr.t(keys::EDIT_PROMPT_VALUE))? else {
        return Ok(inputs.clone());
    };
    let next = inputs.with_text(field, &text);
    console.say(&tr.fill(
        keys::EDIT_UPDATED,
        &[
            ("field", tr.t(field.label_key()).to_string()),
            ("value", format_plain(field.value(&next))),
        ],
    ))?;
    if field.requires_finance() && !next.use_finance {
        console.say(tr.t(keys::EDIT_FINANCE_OFF_NOTE))?;
    }
    Ok(next)
}

/// 언어와 통화 라벨을 바꾼다. 바뀐 통화 코드를 돌려준다.
pub fn handle_settings<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &mut Translator,
    cfg: &mut Config,
) -> Result<Option<String>, AppError> {
    console.say(tr.t(keys::SETTINGS_HEADING))?;
    console.say(&tr.fill(
        keys::SETTINGS_CURRENT_LANGUAGE,
        &[("lang", cfg.language.clone())],
    ))?;
    if let Some(lang) = console.read_line(tr.t(keys::SETTINGS_PROMPT_LANGUAGE))? {
        if !lang.is_empty() {
            cfg.language = lang;
            let resolved = i18n::resolve_language(&cfg.language, None);
            *tr = Translator::new_with_pack(&resolved, cfg.language_pack_dir.as_deref());
        }
    }
    console.say(&tr.fill(
        keys::SETTINGS_CURRENT_CURRENCY,
        &[("currency", cfg.default_currency.clone())],
    ))?;
    let mut changed_currency = None;
    if let Some(code) = console.read_line(tr.t(keys::SETTINGS_PROMPT_CURRENCY))? {
        if !code.is_empty() {
            cfg.default_currency = code.to_uppercase();
            changed_currency = Some(cfg.default_currency.clone());
        }
    }
    Ok(changed_currency)
}

/// 결과 요약을 출력한다.
pub fn print_report<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
    inputs: &InputParameters,
    results: &DerivedResults,
) -> Result<(), AppError> {
    let rep = report::build_report(inputs, results, tr);
    console.say(&report::render_text(&rep))?;
    console.say(&format!("[{}]", tr.t(keys::NOTES_TITLE)))?;
    for note in report::notes(tr) {
        console.say(&format!("  {note}"))?;
    }
    Ok(())
}

pub fn print_chart<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tr: &Translator,
    inputs: &InputParameters,
    results: &DerivedResults,
) -> Result<(), AppError> {
    console.say(&report::render_chart_table(inputs, results, tr))
}
