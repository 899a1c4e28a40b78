//! 화면/명령행에서 들어온 문자열을 입력값으로 바꾸는 규칙.

use crate::finance::{InputParameters, Timeframe};
use crate::i18n::keys;

/// 문자열 앞부분의 숫자를 읽는다. 읽을 수 없거나 유한하지 않으면 0.
///
/// `"12abc"`는 12, `" 3.5"`는 3.5, `""`/`"abc"`/`"-"`는 0이 된다.
pub fn parse_number(text: &str) -> f64 {
    let s = text.trim_start();
    let end = numeric_prefix_len(s);
    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_end = digits_from(i);
    let mut digits = int_end - i;
    i = int_end;
    if bytes.get(i) == Some(&b'.') {
        let frac_end = digits_from(i + 1);
        digits += frac_end - (i + 1);
        if digits > 0 {
            i = frac_end;
        }
    }
    if digits == 0 {
        return 0;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_end = digits_from(j);
        if exp_end > j {
            i = exp_end;
        }
    }
    i
}

/// 입력 카드 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputGroup {
    Revenue,
    OperatingCosts,
    CapexFinance,
}

impl InputGroup {
    pub const ALL: [InputGroup; 3] = [
        InputGroup::Revenue,
        InputGroup::OperatingCosts,
        InputGroup::CapexFinance,
    ];

    pub fn title_key(self) -> &'static str {
        match self {
            InputGroup::Revenue => keys::GROUP_REVENUE,
            InputGroup::OperatingCosts => keys::GROUP_OPERATING,
            InputGroup::CapexFinance => keys::GROUP_CAPEX,
        }
    }

    pub fn fields(self) -> impl Iterator<Item = InputField> {
        InputField::ALL.into_iter().filter(move |f| f.group() == self)
    }
}

/// 숫자 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    HourlyRate,
    AnnualDays,
    HoursPerDay,
    Utilization,
    BaseAnnualOpex,
    PowerKw,
    KwhRate,
    GasCostPerHour,
    MaintenancePerYear,
    PurchaseCost,
    FreightAndImport,
    DownPaymentPct,
    LoanYears,
    AnnualInterestPct,
    DiscountRatePct,
    HorizonYears,
}

impl InputField {
    pub const ALL: [InputField; 16] = [
        InputField::HourlyRate,
        InputField::AnnualDays,
        InputField::HoursPerDay,
        InputField::Utilization,
        InputField::BaseAnnualOpex,
        InputField::PowerKw,
        InputField::KwhRate,
        InputField::GasCostPerHour,
        InputField::MaintenancePerYear,
        InputField::PurchaseCost,
        InputField::FreightAndImport,
        InputField::DownPaymentPct,
        InputField::LoanYears,
        InputField::AnnualInterestPct,
        InputField::DiscountRatePct,
        InputField::HorizonYears,
    ];

    pub fn group(self) -> InputGroup {
        use InputField::*;
        match self {
            HourlyRate | AnnualDays | HoursPerDay | Utilization => InputGroup::Revenue,
            BaseAnnualOpex | PowerKw | KwhRate | GasCostPerHour | MaintenancePerYear => {
                InputGroup::OperatingCosts
            }
            PurchaseCost | FreightAndImport | DownPaymentPct | LoanYears | AnnualInterestPct
            | DiscountRatePct | HorizonYears => InputGroup::CapexFinance,
        }
    }

    /// 금융 사용이 꺼져 있으면 계산에 쓰이지 않는 항목.
    pub fn requires_finance(self) -> bool {
        matches!(
            self,
            InputField::DownPaymentPct | InputField::LoanYears | InputField::AnnualInterestPct
        )
    }

    pub fn label_key(self) -> &'static str {
        use InputField::*;
        match self {
            HourlyRate => keys::FIELD_HOURLY_RATE,
            AnnualDays => keys::FIELD_ANNUAL_DAYS,
            HoursPerDay => keys::FIELD_HOURS_PER_DAY,
            Utilization => keys::FIELD_UTILIZATION,
            BaseAnnualOpex => keys::FIELD_BASE_OPEX,
            PowerKw => keys::FIELD_POWER_KW,
            KwhRate => keys::FIELD_KWH_RATE,
            GasCostPerHour => keys::FIELD_GAS_COST,
            MaintenancePerYear => keys::FIELD_MAINTENANCE,
            PurchaseCost => keys::FIELD_PURCHASE_COST,
            FreightAndImport => keys::FIELD_FREIGHT,
            DownPaymentPct => keys::FIELD_DOWN_PAYMENT,
            LoanYears => keys::FIELD_LOAN_YEARS,
            AnnualInterestPct => keys::FIELD_INTEREST,
            DiscountRatePct => keys::FIELD_DISCOUNT_RATE,
            HorizonYears => keys::FIELD_HORIZON,
        }
    }

    pub fn value(self, p: &InputParameters) -> f64 {
        use InputField::*;
        match self {
            HourlyRate => p.hourly_rate,
            AnnualDays => p.annual_days,
            HoursPerDay => p.hours_per_day,
            Utilization => p.utilization_pct,
            BaseAnnualOpex => p.base_annual_opex,
            PowerKw => p.power_kw,
            KwhRate => p.kwh_rate,
            GasCostPerHour => p.gas_cost_per_hour,
            MaintenancePerYear => p.maintenance_per_year,
            PurchaseCost => p.purchase_cost,
            FreightAndImport => p.freight_and_import,
            DownPaymentPct => p.down_payment_pct,
            LoanYears => p.loan_years,
            AnnualInterestPct => p.annual_interest_pct,
            DiscountRatePct => p.discount_rate_pct,
            HorizonYears => p.horizon_years,
        }
    }
}

impl InputParameters {
    /// 한 항목만 바꾼 새 입력값.
    pub fn with_value(&self, field: InputField, value: f64) -> Self {
        use InputField::*;
        let mut next = self.clone();
        let slot = match field {
            HourlyRate => &mut next.hourly_rate,
            AnnualDays => &mut next.annual_days,
            HoursPerDay => &mut next.hours_per_day,
            Utilization => &mut next.utilization_pct,
            BaseAnnualOpex => &mut next.base_annual_opex,
            PowerKw => &mut next.power_kw,
            KwhRate => &mut next.kwh_rate,
            GasCostPerHour => &mut next.gas_cost_per_hour,
            MaintenancePerYear => &mut next.maintenance_per_year,
            PurchaseCost => &mut next.purchase_cost,
            FreightAndImport => &mut next.freight_and_import,
            DownPaymentPct => &mut next.down_payment_pct,
            LoanYears => &mut next.loan_years,
            AnnualInterestPct => &mut next.annual_interest_pct,
            DiscountRatePct => &mut next.discount_rate_pct,
            HorizonYears => &mut next.horizon_years,
        };
        *slot = value;
        next
    }

    /// 문자열을 [`parse_number`]로 읽어 한 항목을 바꾼다.
    pub fn with_text(&self, field: InputField, text: &str) -> Self {
        self.with_value(field, parse_number(text))
    }

    pub fn with_finance(&self, use_finance: bool) -> Self {
        Self {
            use_finance,
            ..self.clone()
        }
    }

    pub fn with_timeframe(&self, timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ..self.clone()
        }
    }

    /// 통화 코드는 대문자로 저장한다.
    pub fn with_currency(&self, currency: &str) -> Self {
        Self {
            currency: currency.trim().to_uppercase(),
            ..self.clone()
        }
    }
}
