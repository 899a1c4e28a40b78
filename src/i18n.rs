use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EDIT_FIELD: &str = "main_menu.edit_field";
    pub const MAIN_MENU_TOGGLE_FINANCE: &str = "main_menu.toggle_finance";
    pub const MAIN_MENU_TOGGLE_TIMEFRAME: &str = "main_menu.toggle_timeframe";
    pub const MAIN_MENU_SHOW_REPORT: &str = "main_menu.show_report";
    pub const MAIN_MENU_SHOW_CHART: &str = "main_menu.show_chart";
    pub const MAIN_MENU_RESET: &str = "main_menu.reset";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const EDIT_HEADING: &str = "edit.heading";
    pub const EDIT_PROMPT_FIELD: &str = "edit.prompt_field";
    pub const EDIT_PROMPT_VALUE: &str = "edit.prompt_value";
    pub const EDIT_UNSUPPORTED: &str = "edit.unsupported";
    pub const EDIT_FINANCE_OFF_NOTE: &str = "edit.finance_off_note";
    pub const EDIT_UPDATED: &str = "edit.updated";
    pub const STATE_UPDATED: &str = "state.updated";

    pub const FINANCE_LABEL: &str = "finance.label";
    pub const FINANCE_ENABLED: &str = "finance.enabled";
    pub const FINANCE_DISABLED: &str = "finance.disabled";
    pub const TIMEFRAME_MONTHLY: &str = "timeframe.monthly";
    pub const TIMEFRAME_YEARLY: &str = "timeframe.yearly";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_CURRENT_CURRENCY: &str = "settings.current_currency";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const FIELD_CURRENCY: &str = "field.currency";
    pub const FIELD_HOURLY_RATE: &str = "field.hourly_rate";
    pub const FIELD_ANNUAL_DAYS: &str = "field.annual_days";
    pub const FIELD_HOURS_PER_DAY: &str = "field.hours_per_day";
    pub const FIELD_UTILIZATION: &str = "field.utilization";
    pub const FIELD_BASE_OPEX: &str = "field.base_annual_opex";
    pub const FIELD_POWER_KW: &str = "field.power_kw";
    pub const FIELD_KWH_RATE: &str = "field.kwh_rate";
    pub const FIELD_GAS_COST: &str = "field.gas_cost_per_hour";
    pub const FIELD_MAINTENANCE: &str = "field.maintenance_per_year";
    pub const FIELD_PURCHASE_COST: &str = "field.purchase_cost";
    pub const FIELD_FREIGHT: &str = "field.freight_and_import";
    pub const FIELD_DOWN_PAYMENT: &str = "field.down_payment_pct";
    pub const FIELD_LOAN_YEARS: &str = "field.loan_years";
    pub const FIELD_INTEREST: &str = "field.annual_interest_pct";
    pub const FIELD_DISCOUNT_RATE: &str = "field.discount_rate_pct";
    pub const FIELD_HORIZON: &str = "field.horizon_years";

    pub const GROUP_REVENUE: &str = "group.revenue";
    pub const GROUP_OPERATING: &str = "group.operating";
    pub const GROUP_CAPEX: &str = "group.capex";

    pub const KPI_REVENUE: &str = "kpi.revenue";
    pub const KPI_OPEX: &str = "kpi.opex";
    pub const KPI_EBITDA: &str = "kpi.ebitda";
    pub const KPI_MONTHLY_DEBT: &str = "kpi.monthly_debt";
    pub const KPI_PAYBACK: &str = "kpi.payback";

    pub const DETAIL_HOURS_COSTS: &str = "detail.hours_costs";
    pub const DETAIL_BILLABLE_HOURS: &str = "detail.billable_hours";
    pub const DETAIL_ENERGY: &str = "detail.energy";
    pub const DETAIL_GAS: &str = "detail.gas";
    pub const DETAIL_MAINTENANCE: &str = "detail.maintenance";
    pub const DETAIL_CAPEX_FINANCE: &str = "detail.capex_finance";
    pub const DETAIL_TOTAL_CAPEX: &str = "detail.total_capex";
    pub const DETAIL_DOWN_PAYMENT: &str = "detail.down_payment";
    pub const DETAIL_LOAN_PRINCIPAL: &str = "detail.loan_principal";
    pub const DETAIL_NPV: &str = "detail.npv";
    pub const DETAIL_IRR: &str = "detail.irr";
    pub const KPI_HEADING: &str = "detail.kpi_heading";

    pub const NOTES_TITLE: &str = "notes.title";
    pub const NOTES_UTILIZATION: &str = "notes.utilization";
    pub const NOTES_CURRENCY: &str = "notes.currency";
    pub const NOTES_FREIGHT: &str = "notes.freight";

    pub const VALUE_BEYOND_HORIZON: &str = "value.beyond_horizon";
    pub const VALUE_UNAVAILABLE: &str = "value.unavailable";
    pub const VALUE_YEARS_SUFFIX: &str = "value.years_suffix";

    pub const CHART_TITLE_MONTHLY: &str = "chart.title_monthly";
    pub const CHART_TITLE_YEARLY: &str = "chart.title_yearly";
    pub const CHART_COL_PERIOD: &str = "chart.col_period";
    pub const CHART_COL_CASH: &str = "chart.col_cash";
    pub const CHART_COL_CUMULATIVE: &str = "chart.col_cumulative";
    pub const CHART_COL_NPV: &str = "chart.col_npv";
    pub const CHART_EMPTY: &str = "chart.empty";
    pub const CHART_X_AXIS: &str = "chart.x_axis";
    pub const CHART_SERIES: &str = "chart.series";

    pub const GUI_RESET: &str = "gui.reset";
    pub const GUI_TIP: &str = "gui.tip";
    pub const GUI_SETTINGS_TITLE: &str = "gui.settings.title";
    pub const GUI_SETTINGS_LANG: &str = "gui.settings.lang";
    pub const GUI_SETTINGS_LANG_AUTO: &str = "gui.settings.lang_auto";
    pub const GUI_SETTINGS_ALPHA: &str = "gui.settings.alpha";
    pub const GUI_SETTINGS_SAVE: &str = "gui.settings.save";
    pub const GUI_ABOUT_TITLE: &str = "gui.about.title";
    pub const GUI_ABOUT_BODY: &str = "gui.about.body";
    pub const GUI_FORMULA_TITLE: &str = "gui.formula.title";
    pub const GUI_FORMULA_BODY: &str = "gui.formula.body";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Fr,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("fr") {
            Language::Fr
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(en/fr)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 언어팩에만 있는 문자열을 조회한다.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key).map(String::as_str))
    }

    /// 언어팩 → 내장 번역 → 영어 순으로 문자열을 찾는다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::Fr => fr(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// `{name}` 자리표시자를 채운 번역 문자열.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "fr" | "fr-fr" => Some("fr-fr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("fr") => Some("fr-fr".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "en" => Some("en-us".into()),
        "fr" => Some("fr-fr".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|lang| normalize_locale_string(&lang))
}

/// TOML 기반 언어팩을 로드한다. 중첩 테이블은 `a.b` 형태의 키로 펼친다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., fr-fr)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., fr)
    let (base, _) = lang.split_once(['-', '_'])?;
    try_load(base)
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        APP_TITLE => "Metal Workshop ROI Calculator",
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Metal Workshop ROI Calculator ===",
        MAIN_MENU_EDIT_FIELD => "1) Edit an input",
        MAIN_MENU_TOGGLE_FINANCE => "2) Toggle financing",
        MAIN_MENU_TOGGLE_TIMEFRAME => "3) Switch monthly/yearly view",
        MAIN_MENU_SHOW_REPORT => "4) Show results",
        MAIN_MENU_SHOW_CHART => "5) Show cash-flow table",
        MAIN_MENU_RESET => "6) Reset inputs",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        EDIT_HEADING => "\n-- Inputs --",
        EDIT_PROMPT_FIELD => "Field number: ",
        EDIT_PROMPT_VALUE => "New value (unreadable text counts as 0): ",
        EDIT_UNSUPPORTED => "Unsupported selection.",
        EDIT_FINANCE_OFF_NOTE => "(financing disabled; value is kept but not used)",
        EDIT_UPDATED => "Updated {field} = {value}",
        STATE_UPDATED => "{label}: {value}",
        FINANCE_LABEL => "Use Financing",
        FINANCE_ENABLED => "Enabled",
        FINANCE_DISABLED => "Disabled",
        TIMEFRAME_MONTHLY => "Monthly View",
        TIMEFRAME_YEARLY => "Yearly View",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language: {lang}",
        SETTINGS_PROMPT_LANGUAGE => "Language (auto/en/fr, enter to keep): ",
        SETTINGS_CURRENT_CURRENCY => "Current currency: {currency}",
        SETTINGS_PROMPT_CURRENCY => "Currency code (e.g. USD, EUR, MAD; enter to keep): ",
        SETTINGS_SAVED => "Settings saved.",
        FIELD_CURRENCY => "Currency",
        FIELD_HOURLY_RATE => "Hourly Rate",
        FIELD_ANNUAL_DAYS => "Annual Operating Days",
        FIELD_HOURS_PER_DAY => "Hours per Day",
        FIELD_UTILIZATION => "Utilization (%)",
        FIELD_BASE_OPEX => "Base Annual OPEX",
        FIELD_POWER_KW => "Avg Power Draw (kW)",
        FIELD_KWH_RATE => "Electricity Rate (/kWh)",
        FIELD_GAS_COST => "Assist Gas Cost (/hour)",
        FIELD_MAINTENANCE => "Maintenance per Year",
        FIELD_PURCHASE_COST => "Machine Purchase Cost",
        FIELD_FREIGHT => "Freight & Import (once)",
        FIELD_DOWN_PAYMENT => "Down Payment (%)",
        FIELD_LOAN_YEARS => "Loan Term (years)",
        FIELD_INTEREST => "Interest (APR %)",
        FIELD_DISCOUNT_RATE => "Discount Rate (%/yr)",
        FIELD_HORIZON => "Horizon (years)",
        GROUP_REVENUE => "Revenue & Utilization",
        GROUP_OPERATING => "Operating Costs",
        GROUP_CAPEX => "CAPEX, Import & Finance",
        KPI_REVENUE => "Annual Revenue",
        KPI_OPEX => "Annual OPEX",
        KPI_EBITDA => "EBITDA (Annual)",
        KPI_MONTHLY_DEBT => "Monthly Debt",
        KPI_PAYBACK => "Payback",
        KPI_HEADING => "Key figures",
        DETAIL_HOURS_COSTS => "Annual Hours & Costs",
        DETAIL_BILLABLE_HOURS => "Billable Hours/Year",
        DETAIL_ENERGY => "Energy Cost/Year",
        DETAIL_GAS => "Assist Gas/Year",
        DETAIL_MAINTENANCE => "Maintenance/Year",
        DETAIL_CAPEX_FINANCE => "CAPEX & Finance",
        DETAIL_TOTAL_CAPEX => "Total CAPEX",
        DETAIL_DOWN_PAYMENT => "Down Payment",
        DETAIL_LOAN_PRINCIPAL => "Loan Principal",
        DETAIL_NPV => "NPV ({rate}%/yr)",
        DETAIL_IRR => "IRR (approx)",
        NOTES_TITLE => "Notes",
        NOTES_UTILIZATION => "• Utilization applies to billable cutting hours only. Base OPEX excludes finance cost and is separate from energy/gas.",
        NOTES_CURRENCY => "• Change Currency code (e.g., MAD, USD, EUR). Display only, no FX conversion applied.",
        NOTES_FREIGHT => "• Freight & Import should include duties, VAT (if capitalized), port/brokerage, and installation where applicable.",
        VALUE_BEYOND_HORIZON => "> Horizon",
        VALUE_UNAVAILABLE => "N/A",
        VALUE_YEARS_SUFFIX => "yrs",
        CHART_TITLE_MONTHLY => "Cumulative Cash Flow (Monthly)",
        CHART_TITLE_YEARLY => "Cumulative Cash Flow (Yearly)",
        CHART_COL_PERIOD => "Period",
        CHART_COL_CASH => "Cash",
        CHART_COL_CUMULATIVE => "Cumulative",
        CHART_COL_NPV => "NPV",
        CHART_EMPTY => "No periods within the horizon.",
        CHART_X_AXIS => "Month",
        CHART_SERIES => "Cumulative",
        GUI_RESET => "Reset",
        GUI_TIP => "Tip: Toggle Monthly/Yearly to change the chart aggregation. All metrics update instantly as you change inputs.",
        GUI_SETTINGS_TITLE => "Settings",
        GUI_SETTINGS_LANG => "Language",
        GUI_SETTINGS_LANG_AUTO => "System",
        GUI_SETTINGS_ALPHA => "Window transparency",
        GUI_SETTINGS_SAVE => "Save settings",
        GUI_ABOUT_TITLE => "Help / About",
        GUI_ABOUT_BODY => "Offline ROI calculator for cutting machines. Results are recomputed from the current inputs only; nothing is stored.",
        GUI_FORMULA_TITLE => "Formula reference",
        GUI_FORMULA_BODY => "Hours = days × h/day × util.\nPayment = P·r / (1 − (1+r)^−n), r = APR/12, n = years×12.\nMonthly cash = (revenue − OPEX)/12 − payment.\nNPV = −down + Σ cash/(1+d)^m, d = (1+rate)^(1/12) − 1.\nIRR: secant solve of NPV(r) = 0, annualized (1+r)^12 − 1.",
        _ => "[missing translation]",
    }
}

fn fr(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Calculateur de ROI pour atelier de métallerie",
        ERROR_PREFIX => "Erreur",
        APP_EXIT => "Fermeture de l'application.",
        MAIN_MENU_TITLE => "\n=== Calculateur de ROI atelier ===",
        MAIN_MENU_EDIT_FIELD => "1) Modifier une saisie",
        MAIN_MENU_TOGGLE_FINANCE => "2) Activer/désactiver le financement",
        MAIN_MENU_TOGGLE_TIMEFRAME => "3) Vue mensuelle/annuelle",
        MAIN_MENU_SHOW_REPORT => "4) Afficher les résultats",
        MAIN_MENU_SHOW_CHART => "5) Afficher le tableau de trésorerie",
        MAIN_MENU_RESET => "6) Réinitialiser",
        MAIN_MENU_SETTINGS => "7) Paramètres",
        MAIN_MENU_EXIT => "0) Quitter",
        PROMPT_MENU_SELECT => "Choix : ",
        INVALID_SELECTION_RETRY => "Saisie invalide. Réessayez.",
        EDIT_HEADING => "\n-- Saisies --",
        EDIT_PROMPT_FIELD => "Numéro du champ : ",
        EDIT_PROMPT_VALUE => "Nouvelle valeur (texte illisible = 0) : ",
        EDIT_UNSUPPORTED => "Choix non pris en charge.",
        EDIT_FINANCE_OFF_NOTE => "(financement désactivé ; valeur conservée mais inutilisée)",
        EDIT_UPDATED => "{field} = {value}",
        FINANCE_LABEL => "Financement",
        FINANCE_ENABLED => "Activé",
        FINANCE_DISABLED => "Désactivé",
        TIMEFRAME_MONTHLY => "Vue mensuelle",
        TIMEFRAME_YEARLY => "Vue annuelle",
        SETTINGS_HEADING => "\n-- Paramètres --",
        SETTINGS_CURRENT_LANGUAGE => "Langue actuelle : {lang}",
        SETTINGS_PROMPT_LANGUAGE => "Langue (auto/en/fr, entrée pour garder) : ",
        SETTINGS_CURRENT_CURRENCY => "Devise actuelle : {currency}",
        SETTINGS_PROMPT_CURRENCY => "Code devise (ex. EUR, USD, MAD ; entrée pour garder) : ",
        SETTINGS_SAVED => "Paramètres enregistrés.",
        FIELD_CURRENCY => "Devise",
        FIELD_HOURLY_RATE => "Taux horaire",
        FIELD_ANNUAL_DAYS => "Jours d'exploitation par an",
        FIELD_HOURS_PER_DAY => "Heures par jour",
        FIELD_UTILIZATION => "Taux d'utilisation (%)",
        FIELD_BASE_OPEX => "OPEX annuel de base",
        FIELD_POWER_KW => "Puissance moyenne (kW)",
        FIELD_KWH_RATE => "Prix de l'électricité (/kWh)",
        FIELD_GAS_COST => "Gaz d'assistance (/heure)",
        FIELD_MAINTENANCE => "Maintenance annuelle",
        FIELD_PURCHASE_COST => "Prix d'achat de la machine",
        FIELD_FREIGHT => "Transport et import (unique)",
        FIELD_DOWN_PAYMENT => "Apport (%)",
        FIELD_LOAN_YEARS => "Durée du prêt (années)",
        FIELD_INTEREST => "Taux d'intérêt (TAEG %)",
        FIELD_DISCOUNT_RATE => "Taux d'actualisation (%/an)",
        FIELD_HORIZON => "Horizon (années)",
        GROUP_REVENUE => "Chiffre d'affaires et utilisation",
        GROUP_OPERATING => "Coûts d'exploitation",
        GROUP_CAPEX => "CAPEX, import et financement",
        KPI_REVENUE => "CA annuel",
        KPI_OPEX => "OPEX annuel",
        KPI_EBITDA => "EBITDA (annuel)",
        KPI_MONTHLY_DEBT => "Mensualité",
        KPI_PAYBACK => "Retour sur investissement",
        KPI_HEADING => "Indicateurs clés",
        DETAIL_HOURS_COSTS => "Heures et coûts annuels",
        DETAIL_BILLABLE_HOURS => "Heures facturables/an",
        DETAIL_ENERGY => "Énergie/an",
        DETAIL_GAS => "Gaz d'assistance/an",
        DETAIL_MAINTENANCE => "Maintenance/an",
        DETAIL_CAPEX_FINANCE => "CAPEX et financement",
        DETAIL_TOTAL_CAPEX => "CAPEX total",
        DETAIL_DOWN_PAYMENT => "Apport",
        DETAIL_LOAN_PRINCIPAL => "Capital emprunté",
        DETAIL_NPV => "VAN ({rate} %/an)",
        DETAIL_IRR => "TRI (approx.)",
        NOTES_TITLE => "Remarques",
        VALUE_BEYOND_HORIZON => "> Horizon",
        VALUE_UNAVAILABLE => "N/D",
        VALUE_YEARS_SUFFIX => "ans",
        CHART_TITLE_MONTHLY => "Trésorerie cumulée (mensuelle)",
        CHART_TITLE_YEARLY => "Trésorerie cumulée (annuelle)",
        CHART_COL_PERIOD => "Période",
        CHART_COL_CASH => "Flux",
        CHART_COL_CUMULATIVE => "Cumul",
        CHART_COL_NPV => "VAN",
        CHART_EMPTY => "Aucune période dans l'horizon.",
        CHART_X_AXIS => "Mois",
        CHART_SERIES => "Cumul",
        GUI_RESET => "Réinitialiser",
        GUI_SETTINGS_TITLE => "Paramètres",
        GUI_SETTINGS_LANG => "Langue",
        GUI_SETTINGS_LANG_AUTO => "Système",
        GUI_SETTINGS_ALPHA => "Transparence de la fenêtre",
        GUI_SETTINGS_SAVE => "Enregistrer",
        GUI_ABOUT_TITLE => "Aide / À propos",
        GUI_FORMULA_TITLE => "Formules",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn french_falls_back_to_english() {
        let tr = Translator::new("fr-fr");
        assert_eq!(tr.language(), Language::Fr);
        assert_eq!(tr.t(keys::KPI_OPEX), "OPEX annuel");
        assert_eq!(tr.t(keys::NOTES_CURRENCY), en(keys::NOTES_CURRENCY));
    }

    #[test]
    fn unknown_code_is_english() {
        let tr = Translator::new("xx");
        assert_eq!(tr.language_code(), "en");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language("fr", Some("en")), "fr-fr");
        assert_eq!(resolve_language("auto", Some("en-gb")), "en-us");
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        assert_eq!(
            tr.fill(keys::DETAIL_NPV, &[("rate", "12".to_string())]),
            "NPV (12%/yr)"
        );
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[kpi]\nopex = \"Costs\"\n[gui.settings]\nsave = \"Keep\"\n")
            .expect("pack");
        assert_eq!(map.get("kpi.opex").map(String::as_str), Some("Costs"));
        assert_eq!(map.get("gui.settings.save").map(String::as_str), Some("Keep"));
    }

    #[test]
    fn pack_directory_overrides_builtin() {
        let dir = std::env::temp_dir().join(format!("roi_i18n_pack_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("fr.toml"), "[kpi]\nrevenue = \"Recettes\"\n").unwrap();
        let tr = Translator::new_with_pack("fr-fr", dir.to_str());
        assert_eq!(tr.t(keys::KPI_REVENUE), "Recettes");
        assert_eq!(tr.t(keys::KPI_OPEX), "OPEX annuel");
        std::fs::remove_dir_all(&dir).ok();
    }
}
