//! Collaborator implementations that record request bodies instead of
//! calling a remote API. The CLI prints them so they can be piped into
//! whatever actually talks to the platform.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use storefront_core::services::{CartService, ServiceError, ThemeService, VatService};
use storefront_core::{CartTaxLocation, DesignRecipe, StyleOverrides, VatDetails};

/// One request that would have been sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboxEntry {
    pub service: &'static str,
    pub body: Value,
}

#[derive(Debug, Default)]
pub struct JsonOutbox {
    entries: Mutex<Vec<OutboxEntry>>,
}

impl JsonOutbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<OutboxEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(
        &self,
        service: &'static str,
        body: Value,
    ) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(OutboxEntry { service, body });
    }
}

fn to_value(value: &impl Serialize) -> Result<Value, ServiceError> {
    serde_json::to_value(value).map_err(|e| ServiceError::Rejected(e.to_string()))
}

#[async_trait]
impl ThemeService for JsonOutbox {
    async fn apply_theme_with_patterns(
        &self,
        site: &str,
        design: &DesignRecipe,
        styles: &StyleOverrides,
    ) -> Result<(), ServiceError> {
        let body = json!({
            "site": site,
            "recipe": to_value(design)?,
            "styles": to_value(styles)?,
        });
        self.push("theme", body);
        Ok(())
    }
}

#[async_trait]
impl CartService for JsonOutbox {
    async fn set_tax_location(
        &self,
        location: &CartTaxLocation,
    ) -> Result<(), ServiceError> {
        let body = json!({
            "tax": {
                "display_taxes": true,
                "location": to_value(location)?,
            }
        });
        self.push("cart", body);
        Ok(())
    }
}

#[async_trait]
impl VatService for JsonOutbox {
    async fn set_vat_details(
        &self,
        details: &VatDetails,
    ) -> Result<(), ServiceError> {
        self.push("vat-info", to_value(details)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn records_theme_request() {
        let outbox = JsonOutbox::new();
        let design = DesignRecipe {
            header_pattern_ids: None,
            pattern_ids: vec!["7-1".to_string()],
            footer_pattern_ids: None,
        };

        outbox
            .apply_theme_with_patterns("example.com", &design, &StyleOverrides::default())
            .await
            .unwrap();

        assert_eq!(
            outbox.entries(),
            vec![OutboxEntry {
                service: "theme",
                body: json!({
                    "site": "example.com",
                    "recipe": { "pattern_ids": ["7-1"] },
                    "styles": { "variations": [] },
                }),
            }]
        );
    }

    #[tokio::test]
    async fn cart_request_omits_missing_vat_fields() {
        let outbox = JsonOutbox::new();
        let location = CartTaxLocation {
            country_code: "US".to_string(),
            postal_code: Some("10001".to_string()),
            ..Default::default()
        };

        outbox.set_tax_location(&location).await.unwrap();

        assert_eq!(
            outbox.entries()[0].body,
            json!({
                "tax": {
                    "display_taxes": true,
                    "location": { "country_code": "US", "postal_code": "10001" },
                }
            })
        );
    }
}
