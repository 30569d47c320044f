use serde::{Deserialize, Serialize};

/// Pattern ids handed to the theme service when a composition is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecipe {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_pattern_ids: Option<Vec<String>>,
    pub pattern_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_pattern_ids: Option<Vec<String>>,
}

/// Global style variations (colour palette, font pairing) applied alongside
/// the patterns. Opaque to this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOverrides {
    pub variations: Vec<String>,
}
