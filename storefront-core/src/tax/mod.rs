//! Business tax (VAT/GST) handling for the checkout contact step.
//!
//! This module decides whether the tax-ID opt-in is offered for a country,
//! cleans up user-entered tax IDs and turns the edited location into the
//! blocks sent to the VAT-details and cart services.

pub mod countries;
pub mod location;
pub mod vat_id;
pub mod vendor;

pub use countries::{is_country_in_eu, is_vat_supported, normalize_country_code, tax_name};
pub use location::{TaxLocationForm, resolve_submission};
pub use vat_id::normalize_vat_id;
pub use vendor::{VatVendorInfo, vat_vendor_info};
