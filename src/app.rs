use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::config::{Config, ConfigError};
use crate::finance::compute_derived_results;
use crate::i18n::{keys, Translator};
use crate::ui_cli::{self, Command, Console, MenuChoice, ReportArgs};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// 명령을 실행한다.
pub fn run(command: Command, config: &mut Config, tr: &mut Translator) -> Result<(), AppError> {
    let mut console = Console::stdio();
    match command {
        Command::Report(args) => run_report(&args, config, tr, &mut console),
        Command::Interactive => {
            run_interactive(config, tr, &mut console)?;
            config.save()?;
            Ok(())
        }
    }
}

/// 한 번 계산하고 결과를 출력한다.
pub fn run_report<R: BufRead, W: Write>(
    args: &ReportArgs,
    config: &Config,
    tr: &Translator,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    let inputs = args.apply(&config.initial_inputs());
    let results = compute_derived_results(&inputs);
    console.say(tr.t(keys::APP_TITLE))?;
    ui_cli::print_report(console, tr, &inputs, &results)?;
    if args.chart {
        ui_cli::print_chart(console, tr, &inputs, &results)?;
    }
    Ok(())
}

/// 메뉴 기반 대화형 세션. 입력을 바꿀 때마다 새 입력값으로 다시 계산한다.
pub fn run_interactive<R: BufRead, W: Write>(
    config: &mut Config,
    tr: &mut Translator,
    console: &mut Console<R, W>,
) -> Result<(), AppError> {
    let mut inputs = config.initial_inputs();
    let mut results = compute_derived_results(&inputs);
    loop {
        let next = match ui_cli::main_menu(console, tr)? {
            MenuChoice::EditField => ui_cli::handle_edit_field(console, tr, &inputs)?,
            MenuChoice::ToggleFinance => {
                let next = inputs.with_finance(!inputs.use_finance);
                let state = if next.use_finance {
                    keys::FINANCE_ENABLED
                } else {
                    keys::FINANCE_DISABLED
                };
                console.say(&tr.fill(
                    keys::STATE_UPDATED,
                    &[
                        ("label", tr.t(keys::FINANCE_LABEL).to_string()),
                        ("value", tr.t(state).to_string()),
                    ],
                ))?;
                next
            }
            MenuChoice::ToggleTimeframe => {
                let next = inputs.with_timeframe(inputs.timeframe.toggled());
                console.say(crate::report::chart_title(next.timeframe, tr))?;
                next
            }
            MenuChoice::ShowReport => {
                ui_cli::print_report(console, tr, &inputs, &results)?;
                continue;
            }
            MenuChoice::ShowChart => {
                ui_cli::print_chart(console, tr, &inputs, &results)?;
                continue;
            }
            MenuChoice::Reset => config.initial_inputs(),
            MenuChoice::Settings => {
                let currency = ui_cli::handle_settings(console, tr, config)?;
                if let Err(e) = config.save() {
                    warn!(error = %e, "could not save settings");
                } else {
                    console.say(tr.t(keys::SETTINGS_SAVED))?;
                }
                match currency {
                    Some(code) => inputs.with_currency(&code),
                    None => continue,
                }
            }
            MenuChoice::Exit => {
                console.say(tr.t(keys::APP_EXIT))?;
                break;
            }
        };
        if next != inputs {
            debug!("inputs changed, re-evaluating");
            inputs = next;
            results = compute_derived_results(&inputs);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(script: &str) -> String {
        let mut console = Console::new(script.as_bytes(), Vec::new());
        let mut cfg = Config::default();
        let mut tr = Translator::new("en");
        run_interactive(&mut cfg, &mut tr, &mut console).unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn report_command_prints_kpis() {
        let mut console = Console::new("".as_bytes(), Vec::new());
        let args = ReportArgs {
            chart: true,
            ..ReportArgs::default()
        };
        run_report(&args, &Config::default(), &Translator::new("en"), &mut console).unwrap();
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Metal Workshop ROI Calculator"));
        assert!(out.contains("$83,760.00"));
        assert!(out.contains("2.42 yrs"));
        assert!(out.contains("M60"));
    }

    #[test]
    fn edit_then_report_uses_new_inputs() {
        // 시간당 매출을 10으로 낮추면 회수 불가
        let out = session("1\n1\n10\n4\n0\n");
        assert!(out.contains("Updated Hourly Rate = 10"));
        assert!(out.contains("> Horizon"));
        assert!(out.contains("Exiting application."));
    }

    #[test]
    fn toggling_finance_removes_debt() {
        let out = session("2\n4\n0\n");
        assert!(out.contains("Use Financing: Disabled"));
        assert!(out.contains("Monthly Debt"));
        assert!(out.contains("$0.00"));
    }

    #[test]
    fn yearly_toggle_changes_chart_rows() {
        let out = session("3\n5\n0\n");
        assert!(out.contains("Cumulative Cash Flow (Yearly)"));
        assert!(out.contains("Y5"));
        assert!(!out.contains("M60"));
    }

    #[test]
    fn eof_ends_session() {
        let out = session("");
        assert!(out.contains("Exiting application."));
    }
}
