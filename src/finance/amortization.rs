/// 대출 상환 조건.
#[derive(Debug, Clone, Copy)]
pub struct LoanTerms {
    /// 대출 원금
    pub principal: f64,
    /// 연 이자율(소수, 0.075 = 7.5 %)
    pub annual_rate: f64,
    /// 상환 기간 [년]
    pub years: f64,
}

/// 원리금 균등 상환 방식의 월 납입액을 계산한다.
///
/// `payment = P·r / (1 − (1+r)^−n)`, `r = 연이율/12`, `n = 기간×12`.
/// 원금이 0 이하이거나 금리 또는 기간이 0이면 `principal / max(n, 1)`을 돌려준다.
pub fn amortized_monthly_payment(terms: LoanTerms) -> f64 {
    let r = terms.annual_rate / 12.0;
    let n = terms.years * 12.0;
    if terms.principal <= 0.0 || terms.annual_rate == 0.0 || n == 0.0 {
        return terms.principal / n.max(1.0);
    }
    terms.principal * r / (1.0 - (1.0 + r).powf(-n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_annuity_payment() {
        let pmt = amortized_monthly_payment(LoanTerms {
            principal: 100_000.0,
            annual_rate: 0.06,
            years: 5.0,
        });
        assert!((pmt - 1933.28).abs() < 0.01, "pmt={pmt}");
    }

    #[test]
    fn zero_principal_pays_nothing() {
        for (rate, years) in [(0.0, 0.0), (0.05, 3.0), (0.2, 30.0)] {
            let pmt = amortized_monthly_payment(LoanTerms {
                principal: 0.0,
                annual_rate: rate,
                years,
            });
            assert_eq!(pmt, 0.0);
        }
    }

    #[test]
    fn zero_rate_is_straight_line() {
        let pmt = amortized_monthly_payment(LoanTerms {
            principal: 36_000.0,
            annual_rate: 0.0,
            years: 3.0,
        });
        assert!((pmt - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn zero_term_returns_whole_principal() {
        let pmt = amortized_monthly_payment(LoanTerms {
            principal: 5_000.0,
            annual_rate: 0.07,
            years: 0.0,
        });
        assert!((pmt - 5_000.0).abs() < 1e-9);
    }

    #[test]
    fn reference_loan_payment() {
        // 218000 CAPEX, 20 % 선납, 7.5 % APR, 3년
        let pmt = amortized_monthly_payment(LoanTerms {
            principal: 174_400.0,
            annual_rate: 0.075,
            years: 3.0,
        });
        assert!((pmt - 5424.9244).abs() < 1e-3, "pmt={pmt}");
    }
}
