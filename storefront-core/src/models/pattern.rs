use serde::{Deserialize, Serialize};

/// A reusable content block, referenced by its numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: u32,
    pub name: String,
    pub category: String,
}

impl Pattern {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
        }
    }
}

/// The slot a pattern occupies in a composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSlot {
    Header,
    Footer,
    Section,
}

impl PatternSlot {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Section => "section",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "header" => Some(Self::Header),
            "footer" => Some(Self::Footer),
            "section" => Some(Self::Section),
            _ => None,
        }
    }
}

/// A section pattern together with the instance key minted when it was added.
///
/// The key survives replacements so the preview keeps its identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    pub key: String,
    pub pattern: Pattern,
}
