use proptest::prelude::*;
use workshop_roi_calculator::finance::{
    amortized_monthly_payment, compute_derived_results, DerivedResults, InputParameters, LoanTerms,
    Timeframe,
};

fn scenario() -> impl Strategy<Value = InputParameters> {
    (
        (0.0..500_000.0f64, 0.0..50_000.0f64, 0.0..365.0f64, 0.0..24.0f64),
        (10.0..=100.0f64, 0.0..400.0f64, 0.0..200_000.0f64, 0.0..100.0f64),
        (0.0..1.0f64, 0.0..50.0f64, 0.0..30_000.0f64, any::<bool>()),
        (0.0..=100.0f64, 0.0..10.0f64, 0.0..25.0f64, 0.0..30.0f64, 0.0..15.0f64),
    )
        .prop_map(
            |(
                (purchase_cost, freight_and_import, annual_days, hours_per_day),
                (utilization_pct, hourly_rate, base_annual_opex, power_kw),
                (kwh_rate, gas_cost_per_hour, maintenance_per_year, use_finance),
                (down_payment_pct, loan_years, annual_interest_pct, discount_rate_pct, horizon_years),
            )| InputParameters {
                currency: "USD".to_string(),
                timeframe: Timeframe::Monthly,
                purchase_cost,
                freight_and_import,
                annual_days,
                hours_per_day,
                utilization_pct,
                hourly_rate,
                base_annual_opex,
                power_kw,
                kwh_rate,
                gas_cost_per_hour,
                maintenance_per_year,
                use_finance,
                down_payment_pct,
                loan_years,
                annual_interest_pct,
                discount_rate_pct,
                horizon_years,
            },
        )
}

/// 합산 오차 허용 기준: 선납금과 월 현금 절대값의 합.
fn magnitude(r: &DerivedResults) -> f64 {
    1.0 + r.down_payment.abs() + r.chart_data.iter().map(|p| p.period_cash.abs()).sum::<f64>()
}

proptest! {
    #[test]
    fn cash_purchase_has_no_debt(input in scenario()) {
        let r = compute_derived_results(&input.with_finance(false));
        prop_assert_eq!(r.down_payment, r.capex);
        prop_assert_eq!(r.loan_principal, 0.0);
        prop_assert_eq!(r.monthly_debt, 0.0);
    }

    #[test]
    fn zero_principal_never_pays(rate in 0.0..1.0f64, years in 0.0..40.0f64) {
        let pmt = amortized_monthly_payment(LoanTerms { principal: 0.0, annual_rate: rate, years });
        prop_assert_eq!(pmt, 0.0);
    }

    #[test]
    fn payback_is_first_non_negative_month(input in scenario()) {
        let r = compute_derived_results(&input);
        match r.payback_month {
            Some(m) => {
                prop_assert!(m >= 1);
                prop_assert!(r.chart_data[m - 1].cumulative_cash >= 0.0);
                prop_assert!(r.chart_data[..m - 1].iter().all(|p| p.cumulative_cash < 0.0));
            }
            None => prop_assert!(r.chart_data.iter().all(|p| p.cumulative_cash < 0.0)),
        }
    }

    #[test]
    fn undiscounted_npv_is_final_cumulative_cash(input in scenario()) {
        let input = InputParameters { discount_rate_pct: 0.0, ..input };
        let r = compute_derived_results(&input);
        let expected = -r.down_payment + r.chart_data.iter().map(|p| p.period_cash).sum::<f64>();
        prop_assert!(
            (r.npv - expected).abs() <= 1e-9 * magnitude(&r),
            "npv={} expected={}",
            r.npv,
            expected
        );
    }

    #[test]
    fn yearly_buckets_agree_with_months(input in scenario()) {
        let monthly = compute_derived_results(&input);
        let yearly = compute_derived_results(&input.with_timeframe(Timeframe::Yearly));
        let m_sum: f64 = monthly.chart_data.iter().map(|p| p.period_cash).sum();
        let y_sum: f64 = yearly.chart_data.iter().map(|p| p.period_cash).sum();
        let scale = magnitude(&monthly);
        prop_assert!((m_sum - y_sum).abs() <= 1e-9 * scale);
        prop_assert_eq!(
            monthly.chart_data.last().map(|p| p.cumulative_cash),
            yearly.chart_data.last().map(|p| p.cumulative_cash)
        );
        if !yearly.chart_data.is_empty() {
            let y_npv: f64 = yearly.chart_data.iter().map(|p| p.cumulative_npv).sum();
            prop_assert!((y_npv - monthly.npv).abs() <= 1e-9 * scale);
        }
        prop_assert_eq!(yearly.chart_data.len(), (monthly.chart_data.len() + 11) / 12);
    }
}
