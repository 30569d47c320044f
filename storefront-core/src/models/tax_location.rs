use serde::{Deserialize, Serialize};

/// Raw tax location as edited in the checkout contact step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxLocation {
    /// ISO-3166 alpha-2, uppercase. Empty until a country is picked.
    pub country_code: String,
    pub postal_code: Option<String>,
    pub subdivision_code: Option<String>,

    /// The "Add Business Tax ID details" opt-in.
    pub vat_enabled: bool,
    pub vat_id: String,
    pub organization: Option<String>,
    pub address: Option<String>,

    /// Only meaningful when `country_code` is `GB`.
    pub is_northern_ireland: bool,
}

/// Business tax details as stored on the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VatDetails {
    pub country: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Tax block attached to the shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTaxLocation {
    pub country_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subdivision_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vat_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
