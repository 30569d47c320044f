use tracing::{info, warn};

use crate::models::CartTaxLocation;
use crate::services::{CartService, ServiceError, VatService};
use crate::tax::TaxLocationForm;

/// The tax part of the checkout contact step.
///
/// Edits go through [`CheckoutTaxStep::form_mut`]; [`CheckoutTaxStep::complete`]
/// flushes the result to the account and the cart.
#[derive(Debug, Clone, Default)]
pub struct CheckoutTaxStep {
    form: TaxLocationForm,
}

impl CheckoutTaxStep {
    pub fn new(form: TaxLocationForm) -> Self {
        Self { form }
    }

    pub fn form(&self) -> &TaxLocationForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaxLocationForm {
        &mut self.form
    }

    /// Save the business tax details (when the user opted in) and then the
    /// cart tax location.
    ///
    /// The cart is not touched when the VAT service rejects the details.
    /// On any error the form is left exactly as the user left it so it can
    /// be corrected and resubmitted; nothing is retried.
    pub async fn complete(
        &self,
        cart: &dyn CartService,
        vat: &dyn VatService,
    ) -> Result<CartTaxLocation, ServiceError> {
        if let Some(details) = self.form.resolve_submission() {
            vat.set_vat_details(&details).await.inspect_err(|error| {
                warn!(country = %details.country, %error, "vat details rejected");
            })?;
        }

        let location = self.form.cart_location();
        cart.set_tax_location(&location).await.inspect_err(|error| {
            warn!(country = %location.country_code, %error, "cart tax location rejected");
        })?;

        info!(
            country = %location.country_code,
            with_vat = location.vat_id.is_some(),
            "tax location saved"
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::VatDetails;

    // ── stub services ────────────────────────────────────────────────────
    #[derive(Default)]
    struct StubCart {
        locations: Mutex<Vec<CartTaxLocation>>,
    }

    #[async_trait]
    impl CartService for StubCart {
        async fn set_tax_location(
            &self,
            location: &CartTaxLocation,
        ) -> Result<(), ServiceError> {
            self.locations.lock().unwrap().push(location.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubVat {
        reject: bool,
        details: Mutex<Vec<VatDetails>>,
    }

    #[async_trait]
    impl VatService for StubVat {
        async fn set_vat_details(
            &self,
            details: &VatDetails,
        ) -> Result<(), ServiceError> {
            if self.reject {
                return Err(ServiceError::Rejected("invalid tax id".to_string()));
            }
            self.details.lock().unwrap().push(details.clone());
            Ok(())
        }
    }

    fn gb_step() -> CheckoutTaxStep {
        let mut step = CheckoutTaxStep::default();
        let form = step.form_mut();
        form.set_country("GB");
        form.set_postal_code("NW1 4NP");
        form.set_vat_enabled(true);
        form.set_vat_id("GB12345");
        form.set_organization("Test company");
        form.set_address("123 Main Street");
        step
    }

    #[tokio::test]
    async fn complete_sends_vat_then_cart() {
        let step = gb_step();
        let cart = StubCart::default();
        let vat = StubVat::default();

        let location = step.complete(&cart, &vat).await.unwrap();

        assert_eq!(
            vat.details.lock().unwrap().as_slice(),
            &[VatDetails {
                country: "GB".to_string(),
                id: "12345".to_string(),
                name: Some("Test company".to_string()),
                address: Some("123 Main Street".to_string()),
            }]
        );
        assert_eq!(cart.locations.lock().unwrap().as_slice(), &[location.clone()]);
        assert_eq!(location.vat_id.as_deref(), Some("12345"));
    }

    #[tokio::test]
    async fn complete_sends_xi_for_northern_ireland() {
        let mut step = gb_step();
        step.form_mut().set_northern_ireland(true);
        let cart = StubCart::default();
        let vat = StubVat::default();

        step.complete(&cart, &vat).await.unwrap();

        assert_eq!(vat.details.lock().unwrap()[0].country, "XI");
        assert_eq!(cart.locations.lock().unwrap()[0].country_code, "GB");
    }

    #[tokio::test]
    async fn complete_skips_vat_service_when_opted_out() {
        let mut step = gb_step();
        step.form_mut().set_vat_enabled(false);
        let cart = StubCart::default();
        let vat = StubVat::default();

        let location = step.complete(&cart, &vat).await.unwrap();

        assert!(vat.details.lock().unwrap().is_empty());
        assert_eq!(location.vat_id, None);
    }

    #[tokio::test]
    async fn complete_drops_vat_after_switch_to_us() {
        let mut step = gb_step();
        step.form_mut().set_country("US");
        let cart = StubCart::default();
        let vat = StubVat::default();

        let location = step.complete(&cart, &vat).await.unwrap();

        assert!(vat.details.lock().unwrap().is_empty());
        assert_eq!(
            location,
            CartTaxLocation {
                country_code: "US".to_string(),
                postal_code: Some("NW1 4NP".to_string()),
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn rejected_vat_leaves_form_and_cart_untouched() {
        let step = gb_step();
        let before = step.form().clone();
        let cart = StubCart::default();
        let vat = StubVat {
            reject: true,
            ..Default::default()
        };

        let result = step.complete(&cart, &vat).await;

        assert_eq!(
            result,
            Err(ServiceError::Rejected("invalid tax id".to_string()))
        );
        assert!(cart.locations.lock().unwrap().is_empty());
        assert_eq!(step.form(), &before);
    }
}
