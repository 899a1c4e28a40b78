//! CLI와 GUI가 함께 쓰는 결과 표.

use crate::finance::{DerivedResults, InputParameters, Timeframe};
use crate::format::{format_currency, format_irr, format_payback, format_plain};
use crate::i18n::{keys, Translator};

/// 라벨/값 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

impl ReportRow {
    fn new(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// 제목이 붙은 결과 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub kpis: ReportSection,
    pub hours_and_costs: ReportSection,
    pub capex_and_finance: ReportSection,
}

impl Report {
    pub fn sections(&self) -> [&ReportSection; 3] {
        [&self.kpis, &self.hours_and_costs, &self.capex_and_finance]
    }
}

/// 평가 결과를 표시용 문자열로 정리한다.
pub fn build_report(input: &InputParameters, results: &DerivedResults, tr: &Translator) -> Report {
    let money = |v: f64| format_currency(v, &input.currency);
    let kpis = ReportSection {
        title: tr.t(keys::KPI_HEADING).to_string(),
        rows: vec![
            ReportRow::new(tr.t(keys::KPI_REVENUE), money(results.revenue_annual)),
            ReportRow::new(tr.t(keys::KPI_OPEX), money(results.opex_annual)),
            ReportRow::new(tr.t(keys::KPI_EBITDA), money(results.ebitda_annual)),
            ReportRow::new(tr.t(keys::KPI_MONTHLY_DEBT), money(results.monthly_debt)),
            ReportRow::new(
                tr.t(keys::KPI_PAYBACK),
                format_payback(results.payback_years, tr),
            ),
        ],
    };
    let hours_and_costs = ReportSection {
        title: tr.t(keys::DETAIL_HOURS_COSTS).to_string(),
        rows: vec![
            ReportRow::new(
                tr.t(keys::DETAIL_BILLABLE_HOURS),
                format!("{:.0}", results.hours_per_year),
            ),
            ReportRow::new(tr.t(keys::DETAIL_ENERGY), money(results.energy_annual)),
            ReportRow::new(tr.t(keys::DETAIL_GAS), money(results.gas_annual)),
            ReportRow::new(
                tr.t(keys::DETAIL_MAINTENANCE),
                money(input.maintenance_per_year),
            ),
        ],
    };
    let capex_and_finance = ReportSection {
        title: tr.t(keys::DETAIL_CAPEX_FINANCE).to_string(),
        rows: vec![
            ReportRow::new(tr.t(keys::DETAIL_TOTAL_CAPEX), money(results.capex)),
            ReportRow::new(tr.t(keys::DETAIL_DOWN_PAYMENT), money(results.down_payment)),
            ReportRow::new(
                tr.t(keys::DETAIL_LOAN_PRINCIPAL),
                money(results.loan_principal),
            ),
            ReportRow::new(
                tr.fill(
                    keys::DETAIL_NPV,
                    &[("rate", format_plain(input.discount_rate_pct))],
                ),
                money(results.npv),
            ),
            ReportRow::new(tr.t(keys::DETAIL_IRR), format_irr(results.irr_approx, tr)),
        ],
    };
    Report {
        kpis,
        hours_and_costs,
        capex_and_finance,
    }
}

/// 결과 묶음을 텍스트로 출력한다.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    for section in report.sections() {
        out.push_str(&format!("\n[{}]\n", section.title));
        let width = section
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .max()
            .unwrap_or(0);
        for row in &section.rows {
            let pad = width - row.label.chars().count();
            out.push_str(&format!("  {}{}  {}\n", row.label, " ".repeat(pad), row.value));
        }
    }
    out
}

pub fn chart_title(timeframe: Timeframe, tr: &Translator) -> &str {
    match timeframe {
        Timeframe::Monthly => tr.t(keys::CHART_TITLE_MONTHLY),
        Timeframe::Yearly => tr.t(keys::CHART_TITLE_YEARLY),
    }
}

/// 차트 데이터를 표 형태로 출력한다.
pub fn render_chart_table(
    input: &InputParameters,
    results: &DerivedResults,
    tr: &Translator,
) -> String {
    let mut out = format!("\n[{}]\n", chart_title(input.timeframe, tr));
    if results.chart_data.is_empty() {
        out.push_str(tr.t(keys::CHART_EMPTY));
        out.push('\n');
        return out;
    }
    out.push_str(&format!(
        "{:>7} {:>18} {:>18} {:>18}\n",
        tr.t(keys::CHART_COL_PERIOD),
        tr.t(keys::CHART_COL_CASH),
        tr.t(keys::CHART_COL_CUMULATIVE),
        tr.t(keys::CHART_COL_NPV),
    ));
    for point in &results.chart_data {
        out.push_str(&format!(
            "{:>7} {:>18} {:>18} {:>18}\n",
            point.label,
            format_currency(point.period_cash, &input.currency),
            format_currency(point.cumulative_cash, &input.currency),
            format_currency(point.cumulative_npv, &input.currency),
        ));
    }
    out
}

/// 안내 문구.
pub fn notes(tr: &Translator) -> [&str; 3] {
    [
        tr.t(keys::NOTES_UTILIZATION),
        tr.t(keys::NOTES_CURRENCY),
        tr.t(keys::NOTES_FREIGHT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::compute_derived_results;

    #[test]
    fn default_report_values() {
        let input = InputParameters::default();
        let results = compute_derived_results(&input);
        let tr = Translator::new("en");
        let report = build_report(&input, &results, &tr);
        let values: Vec<_> = report.kpis.rows.iter().map(|r| r.value.as_str()).collect();
        assert_eq!(
            values,
            ["$168,000.00", "$84,240.00", "$83,760.00", "$5,424.92", "2.42 yrs"]
        );
        let finance = &report.capex_and_finance.rows;
        assert_eq!(finance[0].value, "$218,000.00");
        assert_eq!(finance[3].label, "NPV (12%/yr)");
        assert_eq!(finance[4].value, "41.6%");
        assert_eq!(report.hours_and_costs.rows[0].value, "1400");
    }

    #[test]
    fn text_render_contains_every_row() {
        let input = InputParameters::default().with_currency("mad");
        let results = compute_derived_results(&input);
        let tr = Translator::new("en");
        let text = render_text(&build_report(&input, &results, &tr));
        assert!(text.contains("[Key figures]"));
        assert!(text.contains("MAD 168,000.00"));
        assert!(text.contains("IRR (approx)"));
    }

    #[test]
    fn chart_table_has_one_line_per_period() {
        let input = InputParameters::default().with_timeframe(Timeframe::Yearly);
        let results = compute_derived_results(&input);
        let table = render_chart_table(&input, &results, &Translator::new("en"));
        assert!(table.contains("Cumulative Cash Flow (Yearly)"));
        assert_eq!(table.lines().filter(|l| l.trim_start().starts_with('Y')).count(), 5);
    }

    #[test]
    fn empty_horizon_chart_table() {
        let input = InputParameters {
            horizon_years: 0.0,
            ..InputParameters::default()
        };
        let results = compute_derived_results(&input);
        let table = render_chart_table(&input, &results, &Translator::new("en"));
        assert!(table.contains("No periods within the horizon."));
    }
}
