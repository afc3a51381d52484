//! English/Telugu localization.
//!
//! UI strings are looked up by [`UiKey`]. Data values coming from the backend
//! (department names, services, risk labels, roles) go through a separate
//! dictionary that falls back to the input when a value is unknown.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Language {
    #[default]
    English,
    Telugu,
}

impl Language {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "te" | "tel" | "telugu" => Some(Self::Telugu),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Telugu,
            Self::Telugu => Self::English,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiKey {
    Title,
    TotalApplications,
    HighRisk,
    NormalRisk,
    Department,
    ServiceName,
    RiskLevel,
    DelayedRoles,
    Action,
    ViewDetails,
    NoData,
    LoadFailed,
    Loading,
    Summary,
    Details,
    WhatIf,
    RiskBreakdown,
    Showing,
}

pub const ALL_UI_KEYS: [UiKey; 18] = [
    UiKey::Title,
    UiKey::TotalApplications,
    UiKey::HighRisk,
    UiKey::NormalRisk,
    UiKey::Department,
    UiKey::ServiceName,
    UiKey::RiskLevel,
    UiKey::DelayedRoles,
    UiKey::Action,
    UiKey::ViewDetails,
    UiKey::NoData,
    UiKey::LoadFailed,
    UiKey::Loading,
    UiKey::Summary,
    UiKey::Details,
    UiKey::WhatIf,
    UiKey::RiskBreakdown,
    UiKey::Showing,
];

impl UiKey {
    /// Stable identifier used by the HTML report's `data-i18n` attributes.
    pub fn id(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::TotalApplications => "total",
            Self::HighRisk => "high",
            Self::NormalRisk => "normal",
            Self::Department => "department",
            Self::ServiceName => "service",
            Self::RiskLevel => "risk",
            Self::DelayedRoles => "roles",
            Self::Action => "action",
            Self::ViewDetails => "view_details",
            Self::NoData => "no_data",
            Self::LoadFailed => "load_failed",
            Self::Loading => "loading",
            Self::Summary => "summary",
            Self::Details => "details",
            Self::WhatIf => "what_if",
            Self::RiskBreakdown => "breakdown",
            Self::Showing => "showing",
        }
    }
}

fn english(key: UiKey) -> &'static str {
    match key {
        UiKey::Title => "GovPulse - SLA Workflow Risk",
        UiKey::TotalApplications => "Total Applications",
        UiKey::HighRisk => "High Risk",
        UiKey::NormalRisk => "Normal",
        UiKey::Department => "Department",
        UiKey::ServiceName => "Service Name",
        UiKey::RiskLevel => "Risk Level",
        UiKey::DelayedRoles => "Delayed Roles",
        UiKey::Action => "Action",
        UiKey::ViewDetails => "View Details →",
        UiKey::NoData => "No data found",
        UiKey::LoadFailed => "Failed to load data",
        UiKey::Loading => "Loading services...",
        UiKey::Summary => "Summary",
        UiKey::Details => "Details",
        UiKey::WhatIf => "What if",
        UiKey::RiskBreakdown => "Risk breakdown",
        UiKey::Showing => "Showing",
    }
}

fn telugu(key: UiKey) -> &'static str {
    match key {
        UiKey::Title => "గవ్‌పల్స్ - SLA వర్క్‌ఫ్లో ప్రమాదం",
        UiKey::TotalApplications => "మొత్తం దరఖాస్తులు",
        UiKey::HighRisk => "అధిక ప్రమాదం",
        UiKey::NormalRisk => "సాధారణం",
        UiKey::Department => "శాఖ",
        UiKey::ServiceName => "సేవ పేరు",
        UiKey::RiskLevel => "ప్రమాద స్థాయి",
        UiKey::DelayedRoles => "ఆలస్యమైన పాత్రలు",
        UiKey::Action => "చర్య",
        UiKey::ViewDetails => "వివరాలు చూడండి →",
        UiKey::NoData => "డేటా కనుగొనబడలేదు",
        UiKey::LoadFailed => "డేటా లోడ్ చేయడంలో విఫలమైంది",
        UiKey::Loading => "సేవలు లోడ్ అవుతున్నాయి...",
        UiKey::Summary => "సారాంశం",
        UiKey::Details => "వివరాలు",
        UiKey::WhatIf => "ఒకవేళ",
        UiKey::RiskBreakdown => "ప్రమాద విభజన",
        UiKey::Showing => "చూపిస్తోంది",
    }
}

// known backend literals; anything missing passes through untouched
const DATA_TE: &[(&str, &str)] = &[
    ("Revenue", "రెవెన్యూ"),
    ("Civil Supplies", "పౌర సరఫరాలు"),
    ("PR&RD & MAUD", "పంచాయతీ రాజ్ & పురపాలక శాఖ"),
    ("Unknown Department", "తెలియని శాఖ"),
    ("Income Certificate", "ఆదాయ ధృవీకరణ పత్రం"),
    ("New Rice Card", "కొత్త రైస్ కార్డు"),
    ("Marriage Certificate", "వివాహ ధృవీకరణ పత్రం"),
    ("No Property Application Service", "ఆస్తి లేని ధృవీకరణ దరఖాస్తు సేవ"),
    ("High", "అధికం"),
    ("Normal", "సాధారణం"),
    ("High Delay Risk", "అధిక ఆలస్య ప్రమాదం"),
    ("VRO", "వీఆర్వో"),
    ("Clerk", "గుమస్తా"),
    ("Tahsildar", "తహసీల్దార్"),
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Locale {
    pub language: Language,
}

impl Locale {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn ui(&self, key: UiKey) -> &'static str {
        match self.language {
            Language::English => english(key),
            Language::Telugu => telugu(key),
        }
    }

    pub fn data<'a>(&self, value: &'a str) -> &'a str {
        match self.language {
            Language::English => value,
            Language::Telugu => DATA_TE
                .iter()
                .find(|(en, _)| *en == value)
                .map(|(_, te)| *te)
                .unwrap_or(value),
        }
    }

    pub fn data_list(&self, values: &[String]) -> Vec<String> {
        values.iter().map(|v| self.data(v).to_string()).collect()
    }
}

/// The data dictionary as `(english, telugu)` pairs, for embedding in reports.
pub fn data_dictionary() -> &'static [(&'static str, &'static str)] {
    DATA_TE
}

pub fn ui_table(language: Language) -> Vec<(&'static str, &'static str)> {
    let locale = Locale::new(language);
    ALL_UI_KEYS
        .iter()
        .map(|k| (k.id(), locale.ui(*k)))
        .collect()
}
