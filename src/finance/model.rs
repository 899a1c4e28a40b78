use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::amortization::{amortized_monthly_payment, LoanTerms};
use super::irr::annualized_irr;
use super::timeline::{horizon_months, monthly_discount_rate, ChartPoint, MonthlyTimeline};

/// 차트 집계 단위. 계산 자체에는 영향을 주지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    #[default]
    Monthly,
    Yearly,
}

impl Timeframe {
    pub fn toggled(self) -> Self {
        match self {
            Timeframe::Monthly => Timeframe::Yearly,
            Timeframe::Yearly => Timeframe::Monthly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::Monthly => "monthly",
            Timeframe::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown timeframe '{0}' (expected monthly or yearly)")]
pub struct ParseTimeframeError(String);

impl FromStr for Timeframe {
    type Err = ParseTimeframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Timeframe::Monthly),
            "yearly" | "year" | "y" => Ok(Timeframe::Yearly),
            other => Err(ParseTimeframeError(other.to_string())),
        }
    }
}

/// 한 번의 평가에 쓰이는 입력값 전체.
///
/// 필드를 직접 고치지 않고 [`InputParameters::with_value`] 등으로 새 값을 만들어 다시 평가한다.
#[derive(Debug, Clone, PartialEq)]
pub struct InputParameters {
    /// 통화 표시 라벨 (환산 없음)
    pub currency: String,
    pub timeframe: Timeframe,
    /// 장비 구매가
    pub purchase_cost: f64,
    /// 운송/수입 비용 (일회성)
    pub freight_and_import: f64,
    /// 연간 가동일 [일]
    pub annual_days: f64,
    /// 일일 가동시간 [h]
    pub hours_per_day: f64,
    /// 가동률 [%]
    pub utilization_pct: f64,
    /// 청구 시간당 매출
    pub hourly_rate: f64,
    /// 기본 연간 운영비 (에너지/가스/정비 제외)
    pub base_annual_opex: f64,
    /// 평균 전력 [kW]
    pub power_kw: f64,
    /// 전력 단가 [/kWh]
    pub kwh_rate: f64,
    /// 보조가스 비용 [/h]
    pub gas_cost_per_hour: f64,
    /// 연간 정비비
    pub maintenance_per_year: f64,
    pub use_finance: bool,
    /// 선납 비율 [%]
    pub down_payment_pct: f64,
    /// 대출 기간 [년]
    pub loan_years: f64,
    /// 대출 금리 APR [%]
    pub annual_interest_pct: f64,
    /// 연 할인율 [%]
    pub discount_rate_pct: f64,
    /// 분석 기간 [년]
    pub horizon_years: f64,
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            timeframe: Timeframe::Monthly,
            purchase_cost: 200_000.0,
            freight_and_import: 18_000.0,
            annual_days: 250.0,
            hours_per_day: 8.0,
            utilization_pct: 70.0,
            hourly_rate: 120.0,
            base_annual_opex: 60_000.0,
            power_kw: 30.0,
            kwh_rate: 0.12,
            gas_cost_per_hour: 8.0,
            maintenance_per_year: 8_000.0,
            use_finance: true,
            down_payment_pct: 20.0,
            loan_years: 3.0,
            annual_interest_pct: 7.5,
            discount_rate_pct: 12.0,
            horizon_years: 5.0,
        }
    }
}

/// 평가 결과. 매 평가마다 새로 만들어진다.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedResults {
    pub hours_per_year: f64,
    pub energy_annual: f64,
    pub gas_annual: f64,
    pub opex_annual: f64,
    pub revenue_annual: f64,
    pub ebitda_annual: f64,
    pub capex: f64,
    pub down_payment: f64,
    pub loan_principal: f64,
    pub monthly_debt: f64,
    /// 월 현금흐름 (매출 − 운영비 − 원리금)
    pub monthly_cash: f64,
    /// 기간 끝의 할인 누적 현금흐름
    pub npv: f64,
    /// 연율 IRR. 계산 불가면 `None`
    pub irr_approx: Option<f64>,
    /// 회수 월(1부터). 기간 안에 회수하지 못하면 `None`
    pub payback_month: Option<usize>,
    /// 회수 기간 [년]
    pub payback_years: Option<f64>,
    pub chart_data: Vec<ChartPoint>,
}

/// 입력값에서 연간 집계, 자본/금융 내역, 회수기간, NPV, IRR, 차트 데이터를 계산한다.
///
/// 어떤 숫자 입력에도 실패하지 않는다.
pub fn compute_derived_results(input: &InputParameters) -> DerivedResults {
    let hours_per_year = input.annual_days * input.hours_per_day * (input.utilization_pct / 100.0);
    let energy_annual = input.power_kw * input.kwh_rate * hours_per_year;
    let gas_annual = input.gas_cost_per_hour * hours_per_year;
    let opex_annual =
        input.base_annual_opex + energy_annual + gas_annual + input.maintenance_per_year;
    let revenue_annual = input.hourly_rate * hours_per_year;
    let ebitda_annual = revenue_annual - opex_annual;

    let capex = input.purchase_cost + input.freight_and_import;
    let (down_payment, loan_principal, monthly_debt) = if input.use_finance {
        let down_payment = (input.down_payment_pct / 100.0) * capex;
        let loan_principal = capex - down_payment;
        let monthly_debt = amortized_monthly_payment(LoanTerms {
            principal: loan_principal,
            annual_rate: input.annual_interest_pct / 100.0,
            years: input.loan_years,
        });
        (down_payment, loan_principal, monthly_debt)
    } else {
        (capex, 0.0, 0.0)
    };

    let months = horizon_months(input.horizon_years);
    let monthly_cash = revenue_annual / 12.0 - opex_annual / 12.0 - monthly_debt;
    let timeline = MonthlyTimeline::build(
        &vec![monthly_cash; months],
        down_payment,
        monthly_discount_rate(input.discount_rate_pct),
    );

    let npv = timeline.npv();
    let irr_approx = annualized_irr(&timeline.irr_flows());
    let payback_month = timeline.payback_month;
    let payback_years = payback_month.map(|m| m as f64 / 12.0);
    let chart_data = match input.timeframe {
        Timeframe::Monthly => timeline.monthly_chart(),
        Timeframe::Yearly => timeline.yearly_chart(),
    };

    debug!(
        months,
        ebitda_annual,
        monthly_cash,
        npv,
        ?irr_approx,
        ?payback_month,
        "evaluated ROI model"
    );

    DerivedResults {
        hours_per_year,
        energy_annual,
        gas_annual,
        opex_annual,
        revenue_annual,
        ebitda_annual,
        capex,
        down_payment,
        loan_principal,
        monthly_debt,
        monthly_cash,
        npv,
        irr_approx,
        payback_month,
        payback_years,
        chart_data,
    }
}
