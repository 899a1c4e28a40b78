//! 월간 현금흐름 타임라인과 차트용 집계.

/// 평가 기간 상한 [개월]. 어떤 입력에서도 계산량을 유한하게 유지한다.
pub const MAX_HORIZON_MONTHS: usize = 1200;

/// 차트 한 구간(월 또는 연)의 값.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    /// 구간 끝의 월 번호(1부터). 연간 집계에서는 `연도 × 12`.
    pub index: usize,
    /// 표시 라벨 (`M7`, `Y2` 등)
    pub label: String,
    /// 구간 현금흐름
    pub period_cash: f64,
    /// 구간 끝 누적 현금
    pub cumulative_cash: f64,
    /// 월간: 누적 할인 현금(NPV). 연간: 해당 연도의 할인 기여분
    /// (1년차는 선납금 유출 포함). 연간 값의 합은 월간 NPV와 같다.
    pub cumulative_npv: f64,
}

/// 한 달의 현금흐름 기록.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthRecord {
    /// 월 번호(1부터)
    pub month: usize,
    pub cash: f64,
    pub cumulative_cash: f64,
    pub cumulative_npv: f64,
}

/// 선납금 유출 이후의 월간 현금흐름.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTimeline {
    pub down_payment: f64,
    pub monthly_discount: f64,
    pub months: Vec<MonthRecord>,
    /// 누적 현금이 처음으로 0 이상이 된 월
    pub payback_month: Option<usize>,
}

/// 분석 기간(년)을 개월 수로 바꾼다. 음수/NaN은 0, 상한은 [`MAX_HORIZON_MONTHS`].
pub fn horizon_months(horizon_years: f64) -> usize {
    let months = (horizon_years * 12.0).floor();
    if months.is_nan() || months <= 0.0 {
        0
    } else {
        (months as usize).min(MAX_HORIZON_MONTHS)
    }
}

/// 연 할인율(%)을 월 할인율로 바꾼다: `(1 + p/100)^(1/12) − 1`.
pub fn monthly_discount_rate(discount_rate_pct: f64) -> f64 {
    (1.0 + discount_rate_pct / 100.0).powf(1.0 / 12.0) - 1.0
}

impl MonthlyTimeline {
    /// 월별 현금흐름을 누적한다. 시점 0에 `-down_payment`가 할인 없이 잡힌다.
    pub fn build(cash_flows: &[f64], down_payment: f64, monthly_discount: f64) -> Self {
        let mut cumulative_cash = -down_payment;
        let mut cumulative_npv = -down_payment;
        let mut payback_month = None;
        let months: Vec<MonthRecord> = cash_flows
            .iter()
            .enumerate()
            .map(|(i, &cash)| {
                let month = i + 1;
                cumulative_cash += cash;
                cumulative_npv += cash / (1.0 + monthly_discount).powi(month as i32);
                if payback_month.is_none() && cumulative_cash >= 0.0 {
                    payback_month = Some(month);
                }
                MonthRecord {
                    month,
                    cash,
                    cumulative_cash,
                    cumulative_npv,
                }
            })
            .collect();
        Self {
            down_payment,
            monthly_discount,
            months,
            payback_month,
        }
    }

    /// 기간 끝의 NPV. 기간이 0이면 `-down_payment`.
    pub fn npv(&self) -> f64 {
        self.months
            .last()
            .map_or(-self.down_payment, |m| m.cumulative_npv)
    }

    /// IRR 계산용 흐름 `[-down_payment, cash_1, …, cash_N]`.
    pub fn irr_flows(&self) -> Vec<f64> {
        std::iter::once(-self.down_payment)
            .chain(self.months.iter().map(|m| m.cash))
            .collect()
    }

    /// 월간 차트 데이터.
    pub fn monthly_chart(&self) -> Vec<ChartPoint> {
        self.months
            .iter()
            .map(|m| ChartPoint {
                index: m.month,
                label: format!("M{}", m.month),
                period_cash: m.cash,
                cumulative_cash: m.cumulative_cash,
                cumulative_npv: m.cumulative_npv,
            })
            .collect()
    }

    /// 연간 차트 데이터. 마지막 해가 12개월 미만이면 그 자체로 한 구간이 된다.
    ///
    /// NPV 칸은 연간 합계를 할인하지 않고, 구간 안의 각 월을 원래 월 번호로 다시 할인해 더한다.
    pub fn yearly_chart(&self) -> Vec<ChartPoint> {
        self.months
            .chunks(12)
            .enumerate()
            .map(|(y, slice)| {
                let year = y + 1;
                let period_cash: f64 = slice.iter().map(|m| m.cash).sum();
                let cumulative_cash = slice.last().map_or(0.0, |m| m.cumulative_cash);
                let discounted: f64 = slice
                    .iter()
                    .enumerate()
                    .map(|(i, m)| {
                        m.cash / (1.0 + self.monthly_discount).powi((y * 12 + i + 1) as i32)
                    })
                    .sum();
                let upfront = if y == 0 { -self.down_payment } else { 0.0 };
                ChartPoint {
                    index: year * 12,
                    label: format!("Y{year}"),
                    period_cash,
                    cumulative_cash,
                    cumulative_npv: discounted + upfront,
                }
            })
            .collect()
    }
}
