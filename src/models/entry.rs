use serde::{Deserialize, Serialize};

/// Direction of a single recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryType {
    Income,
    Outcome,
}

/// Entry type selection of the history filter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Outcome,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Income => "INCOME",
            Self::Outcome => "OUTCOME",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ALL" => Some(Self::All),
            "INCOME" => Some(Self::Income),
            "OUTCOME" => Some(Self::Outcome),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedRef {
    pub name: String,
}

/// One income or outcome record as listed by the history backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub cost: f64,
    pub date: String,
    #[serde(default)]
    pub category_dto: Option<NamedRef>,
    #[serde(default)]
    pub account_dto: Option<NamedRef>,
}

/// Filtered history listing with the backend's total for the whole selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPage {
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub total_cost: f64,
}
