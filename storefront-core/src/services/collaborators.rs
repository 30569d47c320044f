use async_trait::async_trait;
use thiserror::Error;

use crate::models::{CartTaxLocation, DesignRecipe, StyleOverrides, VatDetails};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Applies an assembled composition to a site.
#[async_trait]
pub trait ThemeService: Send + Sync {
    async fn apply_theme_with_patterns(
        &self,
        site: &str,
        design: &DesignRecipe,
        styles: &StyleOverrides,
    ) -> Result<(), ServiceError>;
}

/// Shopping cart owned by the checkout.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn set_tax_location(
        &self,
        location: &CartTaxLocation,
    ) -> Result<(), ServiceError>;
}

/// Business tax details stored on the account.
#[async_trait]
pub trait VatService: Send + Sync {
    async fn set_vat_details(
        &self,
        details: &VatDetails,
    ) -> Result<(), ServiceError>;
}
