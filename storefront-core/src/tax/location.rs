//! Tax location state for the checkout contact step.
//!
//! [`TaxLocationForm`] owns the raw [`TaxLocation`] the user is editing and
//! keeps it consistent on every edit: picking a country without business tax
//! support drops the tax-ID fields, leaving GB drops the Northern Ireland
//! flag. Submission blocks are derived on demand and never mutate the form,
//! so a rejected submission leaves the user's input exactly as it was.

use tracing::debug;

use crate::models::{CartTaxLocation, TaxLocation, VatDetails};

use super::countries::{is_vat_supported, normalize_country_code};
use super::vat_id::normalize_vat_id;

/// Country code used for Northern Ireland trade under the Windsor framework.
pub const NORTHERN_IRELAND_CODE: &str = "XI";

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Build the VAT-details block for `location`.
///
/// Returns `None` when the opt-in is off, the country does not support
/// business tax IDs, or no ID remains after normalization.
pub fn resolve_submission(location: &TaxLocation) -> Option<VatDetails> {
    let country = normalize_country_code(&location.country_code);
    if !location.vat_enabled || !is_vat_supported(&country) {
        return None;
    }

    let id = normalize_vat_id(&location.vat_id, &country);
    if id.is_empty() {
        return None;
    }

    let country = if location.is_northern_ireland && country == "GB" {
        NORTHERN_IRELAND_CODE.to_string()
    } else {
        country
    };

    Some(VatDetails {
        country,
        id,
        name: location.organization.clone(),
        address: location.address.clone(),
    })
}

/// Editable tax location with the business rules applied on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxLocationForm {
    location: TaxLocation,
    /// Set when the tax ID came from saved account details; the opt-in can
    /// then no longer be switched off.
    vat_locked: bool,
}

impl TaxLocationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> &TaxLocation {
        &self.location
    }

    pub fn is_vat_locked(&self) -> bool {
        self.vat_locked
    }

    fn clear_vat_fields(&mut self) {
        self.location.vat_enabled = false;
        self.location.vat_id.clear();
        self.location.organization = None;
        self.location.address = None;
        self.location.is_northern_ireland = false;
        self.vat_locked = false;
    }

    pub fn set_country(
        &mut self,
        code: &str,
    ) {
        let code = normalize_country_code(code);
        debug!(country = %code, "set country");

        if !is_vat_supported(&code) {
            self.clear_vat_fields();
        } else if code != "GB" {
            self.location.is_northern_ireland = false;
        }
        self.location.country_code = code;
    }

    pub fn set_postal_code(
        &mut self,
        postal_code: &str,
    ) {
        self.location.postal_code = non_empty(postal_code);
    }

    pub fn set_subdivision_code(
        &mut self,
        subdivision_code: &str,
    ) {
        self.location.subdivision_code = non_empty(subdivision_code);
    }

    /// Toggle the tax-ID opt-in. Ignored when the country has no business tax
    /// support, and switching off is ignored while the details are locked.
    pub fn set_vat_enabled(
        &mut self,
        enabled: bool,
    ) {
        if enabled && !self.shows_vat_opt_in() {
            debug!(country = %self.location.country_code, "vat opt-in not offered");
            return;
        }
        if !enabled && self.vat_locked {
            debug!("vat details are saved on the account, opt-in stays on");
            return;
        }
        self.location.vat_enabled = enabled;
    }

    /// Store the tax ID as typed; normalization happens on submission.
    pub fn set_vat_id(
        &mut self,
        vat_id: &str,
    ) {
        self.location.vat_id = vat_id.to_string();
    }

    pub fn set_organization(
        &mut self,
        organization: &str,
    ) {
        self.location.organization = non_empty(organization);
    }

    pub fn set_address(
        &mut self,
        address: &str,
    ) {
        self.location.address = non_empty(address);
    }

    /// Only GB locations can be flagged as Northern Ireland.
    pub fn set_northern_ireland(
        &mut self,
        is_northern_ireland: bool,
    ) {
        if is_northern_ireland && self.location.country_code != "GB" {
            debug!(country = %self.location.country_code, "northern ireland flag ignored");
            return;
        }
        self.location.is_northern_ireland = is_northern_ireland;
    }

    /// Fill the tax-ID fields from details saved on the account.
    ///
    /// A country already chosen in the form wins over the saved one. Saved
    /// Northern Ireland details (`XI`) are shown as GB with the flag set.
    pub fn prefill(
        &mut self,
        saved: VatDetails,
    ) {
        let saved_country = normalize_country_code(&saved.country);
        let (saved_country, saved_ni) = if saved_country == NORTHERN_IRELAND_CODE {
            ("GB".to_string(), true)
        } else {
            (saved_country, false)
        };

        if self.location.country_code.is_empty() {
            self.location.country_code = saved_country;
        }
        if !self.shows_vat_opt_in() {
            debug!(country = %self.location.country_code, "saved vat details not applicable");
            return;
        }

        self.location.vat_enabled = true;
        self.location.vat_id = saved.id;
        self.location.organization = saved.name.as_deref().and_then(non_empty);
        self.location.address = saved.address.as_deref().and_then(non_empty);
        self.location.is_northern_ireland = saved_ni && self.location.country_code == "GB";
        self.vat_locked = true;
    }

    // =========================================================================
    // Display predicates
    // =========================================================================

    pub fn shows_vat_opt_in(&self) -> bool {
        is_vat_supported(&self.location.country_code)
    }

    pub fn shows_vat_fields(&self) -> bool {
        self.shows_vat_opt_in() && self.location.vat_enabled
    }

    pub fn shows_northern_ireland_toggle(&self) -> bool {
        self.shows_vat_fields() && self.location.country_code == "GB"
    }

    // =========================================================================
    // Submission blocks
    // =========================================================================

    pub fn resolve_submission(&self) -> Option<VatDetails> {
        resolve_submission(&self.location)
    }

    /// Tax block for the cart. VAT fields are included only when a VAT
    /// block would be submitted; the country stays the selected one (`GB`
    /// rather than `XI`).
    pub fn cart_location(&self) -> CartTaxLocation {
        let vat = self.resolve_submission();

        CartTaxLocation {
            country_code: self.location.country_code.clone(),
            postal_code: self.location.postal_code.clone(),
            subdivision_code: self.location.subdivision_code.clone(),
            vat_id: vat.as_ref().map(|v| v.id.clone()),
            organization: vat.as_ref().and_then(|v| v.name.clone()),
            address: vat.and_then(|v| v.address),
        }
    }
}
