use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// UI preferences shared by every view of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub sidebar_open: bool,
    pub theme: Theme,
    pub currency_symbol: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            theme: Theme::System,
            currency_symbol: "$".into(),
        }
    }
}

impl Preferences {
    /// Amount prefixed with the configured currency symbol, two decimals.
    pub fn format_amount(&self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.currency_symbol, amount.abs())
        } else {
            format!("{}{:.2}", self.currency_symbol, amount)
        }
    }

    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(open) = patch.sidebar_open {
            self.sidebar_open = open;
        }
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(symbol) = patch.currency_symbol {
            self.currency_symbol = symbol;
        }
    }
}

/// Partial update of [`Preferences`]; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPatch {
    pub sidebar_open: Option<bool>,
    pub theme: Option<Theme>,
    pub currency_symbol: Option<String>,
}
