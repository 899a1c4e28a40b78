//! 장비 투자 수익성 계산 엔진. 입력값에 대한 순수 함수로만 구성된다.

pub mod amortization;
pub mod irr;
pub mod model;
pub mod timeline;

pub use amortization::{amortized_monthly_payment, LoanTerms};
pub use irr::{annualized_irr, present_value, solve_irr, IrrSolution};
pub use model::{compute_derived_results, DerivedResults, InputParameters, Timeframe};
pub use timeline::{ChartPoint, MonthlyTimeline};
