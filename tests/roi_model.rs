use workshop_roi_calculator::{
    finance::{
        amortized_monthly_payment, annualized_irr, compute_derived_results, InputParameters,
        LoanTerms, MonthlyTimeline, Timeframe,
    },
    format::format_currency,
    i18n::Translator,
    input::{parse_number, InputField},
    report,
};

fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

#[test]
fn reference_scenario_regression() {
    let r = compute_derived_results(&InputParameters::default());
    assert!(close(r.hours_per_year, 1400.0, 1e-9));
    assert!(close(r.revenue_annual, 168_000.0, 1e-6));
    assert!(close(r.energy_annual, 5_040.0, 1e-6));
    assert!(close(r.gas_annual, 11_200.0, 1e-6));
    assert!(close(r.opex_annual, 84_240.0, 1e-6));
    assert!(close(r.ebitda_annual, 83_760.0, 1e-6));
    assert!(close(r.capex, 218_000.0, 1e-9));
    assert!(close(r.down_payment, 43_600.0, 1e-9));
    assert!(close(r.loan_principal, 174_400.0, 1e-9));
    assert!(close(r.monthly_debt, 5_424.92, 1e-2), "debt={}", r.monthly_debt);
    assert_eq!(r.payback_month, Some(29));
    assert!(close(r.npv, 27_292.47, 1e-1), "npv={}", r.npv);
    let irr = r.irr_approx.expect("irr converges for reference scenario");
    assert!(close(irr, 0.4158, 1e-3), "irr={irr}");
}

#[test]
fn amortization_standard_annuity() {
    let pmt = amortized_monthly_payment(LoanTerms {
        principal: 100_000.0,
        annual_rate: 0.06,
        years: 5.0,
    });
    assert!(close(pmt, 1933.28, 1e-2), "pmt={pmt}");
    let zero = amortized_monthly_payment(LoanTerms {
        principal: 0.0,
        annual_rate: 0.25,
        years: 30.0,
    });
    assert_eq!(zero, 0.0);
}

#[test]
fn irr_recovers_known_monthly_rate() {
    // 월 1% 연금을 현재가치로 맞춘 흐름
    let r: f64 = 0.01;
    let n = 36;
    let payment = 1_000.0;
    let pv: f64 = (1..=n).map(|k| payment / (1.0 + r).powi(k)).sum();
    let mut flows = vec![-pv];
    flows.extend(std::iter::repeat(payment).take(n as usize));
    let irr = annualized_irr(&flows).expect("converges");
    assert!(close(irr, (1.0 + r).powi(12) - 1.0, 1e-3), "irr={irr}");
}

#[test]
fn payback_is_first_crossing() {
    let t = MonthlyTimeline::build(&[60.0, 60.0, -200.0, 300.0], 100.0, 0.0);
    assert_eq!(t.payback_month, Some(2));
    assert!(t.months[2].cumulative_cash < 0.0);
}

#[test]
fn yearly_view_matches_monthly_totals() {
    let base = InputParameters {
        horizon_years: 3.5,
        ..InputParameters::default()
    };
    let monthly = compute_derived_results(&base);
    let yearly = compute_derived_results(&base.with_timeframe(Timeframe::Yearly));
    assert_eq!(monthly.chart_data.len(), 42);
    assert_eq!(yearly.chart_data.len(), 4);
    let m_sum: f64 = monthly.chart_data.iter().map(|p| p.period_cash).sum();
    let y_sum: f64 = yearly.chart_data.iter().map(|p| p.period_cash).sum();
    assert!(close(m_sum, y_sum, 1e-6));
    let m_last = monthly.chart_data.last().map(|p| p.cumulative_cash);
    let y_last = yearly.chart_data.last().map(|p| p.cumulative_cash);
    assert_eq!(m_last, y_last);
    assert!(close(monthly.npv, yearly.npv, 1e-9));
}

#[test]
fn garbage_text_coerces_to_zero() {
    assert_eq!(parse_number("abc"), 0.0);
    assert_eq!(parse_number("12.5kg"), 12.5);
    let input = InputParameters::default().with_text(InputField::HourlyRate, "");
    let r = compute_derived_results(&input);
    assert_eq!(r.revenue_annual, 0.0);
    assert_eq!(r.payback_month, None);
}

#[test]
fn report_uses_currency_label_without_conversion() {
    let tr = Translator::new("en");
    let input = InputParameters::default().with_currency("eur");
    let r = compute_derived_results(&input);
    let rep = report::build_report(&input, &r, &tr);
    assert_eq!(rep.kpis.rows[2].value, format_currency(83_760.0, "EUR"));
    assert_eq!(rep.kpis.rows[2].value, "€83,760.00");
}
