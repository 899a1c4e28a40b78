use tracing::debug;

const SEED_LOW: f64 = 0.01;
const SEED_HIGH: f64 = 0.03;
const MAX_ITERATIONS: usize = 40;
const TOLERANCE: f64 = 1e-6;
const DENOMINATOR_EPS: f64 = 1e-9;

/// 할선법 IRR 풀이 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    /// 기간(월) 수익률
    pub monthly_rate: f64,
    /// 수행한 반복 횟수
    pub iterations: usize,
    /// `|f(r)| < 1e-6` 에 도달했는지 여부
    pub converged: bool,
}

/// 기간별 현금흐름을 주어진 기간 수익률로 할인한 현재가치. `flows[0]`은 할인하지 않는다.
pub fn present_value(flows: &[f64], rate: f64) -> f64 {
    flows
        .iter()
        .enumerate()
        .map(|(k, cf)| cf / (1.0 + rate).powi(k as i32))
        .sum()
}

/// 현재가치가 0이 되는 기간 수익률을 할선법으로 찾는다.
///
/// 0.01, 0.03에서 시작해 최대 40회 반복한다. 구간 탐색(bracketing)이 없으므로
/// 발산할 수 있으며, 그 경우 마지막 추정치를 그대로 돌려준다.
pub fn solve_irr(flows: &[f64]) -> IrrSolution {
    let (mut r0, mut r1) = (SEED_LOW, SEED_HIGH);
    let (mut y0, mut y1) = (present_value(flows, r0), present_value(flows, r1));
    let mut iterations = 0;
    let mut converged = false;
    for _ in 0..MAX_ITERATIONS {
        let r2 = r1 - y1 * (r1 - r0) / (y1 - y0 + DENOMINATOR_EPS);
        let y2 = present_value(flows, r2);
        r0 = r1;
        y0 = y1;
        r1 = r2;
        y1 = y2;
        iterations += 1;
        if y2.abs() < TOLERANCE {
            converged = true;
            break;
        }
    }
    IrrSolution {
        monthly_rate: r1,
        iterations,
        converged,
    }
}

/// 월간 현금흐름의 IRR을 연율 `(1+r)^12 − 1`로 환산한다. 유한하지 않으면 `None`.
pub fn annualized_irr(flows: &[f64]) -> Option<f64> {
    let solution = solve_irr(flows);
    if !solution.converged {
        debug!(
            monthly_rate = solution.monthly_rate,
            iterations = solution.iterations,
            "IRR secant iteration hit the iteration cap"
        );
    }
    let annual = (1.0 + solution.monthly_rate).powi(12) - 1.0;
    if annual.is_finite() {
        Some(annual)
    } else {
        debug!(monthly_rate = solution.monthly_rate, "IRR is not finite");
        None
    }
}
