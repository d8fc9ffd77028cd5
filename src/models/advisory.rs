use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryCategory {
    Rain,
    Temperature,
    Moisture,
    General,
    Crop,
}

impl AdvisoryCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryCategory::Rain => "Rain",
            AdvisoryCategory::Temperature => "Temperature",
            AdvisoryCategory::Moisture => "Moisture",
            AdvisoryCategory::General => "General",
            AdvisoryCategory::Crop => "Crop",
        }
    }
}

impl std::fmt::Display for AdvisoryCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvisoryKind {
    Warning,
    Danger,
    Success,
    Info,
}

impl AdvisoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdvisoryKind::Warning => "Warning",
            AdvisoryKind::Danger => "Danger",
            AdvisoryKind::Success => "Success",
            AdvisoryKind::Info => "Info",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AdvisoryKind::Warning => "⚠",
            AdvisoryKind::Danger => "!",
            AdvisoryKind::Success => "✓",
            AdvisoryKind::Info => "ℹ",
        }
    }
}

impl std::fmt::Display for AdvisoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    /// Position within one generation batch, starting at 1.
    pub id: u32,
    /// Key of the rule that produced this advisory. Stable across batches.
    pub rule: String,
    pub kind: AdvisoryKind,
    pub severity: Severity,
    pub category: AdvisoryCategory,
    pub title: String,
    pub message: String,
    pub suggested_action: String,
    pub read: bool,
}

impl Advisory {
    pub fn new(
        rule: impl Into<String>,
        kind: AdvisoryKind,
        severity: Severity,
        category: AdvisoryCategory,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            rule: rule.into(),
            kind,
            severity,
            category,
            title: title.into(),
            message: message.into(),
            suggested_action: String::new(),
            read: false,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.suggested_action = action.into();
        self
    }

    pub fn is_high_priority(&self) -> bool {
        self.severity == Severity::High
    }
}
