//! Seller tax details printed on receipts.

use chrono::NaiveDate;
use serde::Serialize;

use super::countries::{is_country_in_eu, normalize_country_code, tax_name};

static VENDOR_ADDRESS: [&str; 5] = [
    "Aut O\u{2019}Mattic Ltd.",
    "c/o Noone Casey",
    "Grand Canal Dock, 25 Herbert Pl",
    "Dublin, D02 AY86",
    "Ireland",
];

const EU_VENDOR_TAX_ID: &str = "IE3255131SH";
const GB_VENDOR_TAX_ID: &str = "UK 376 1703 88";
const CA_VENDOR_TAX_ID: &str = "790004303";

/// Vendor block shown on a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VatVendorInfo {
    pub country: String,
    /// "VAT" or "GST".
    pub tax_name: &'static str,
    pub address: &'static [&'static str],
    pub vat_id: &'static str,
}

/// Vendor details for a transaction taxed in `country` on `date`, or `None`
/// when no business tax was collected there.
///
/// EU membership is evaluated at the transaction date, so GB receipts from
/// before 2021 carry the EU registration.
pub fn vat_vendor_info(
    country: &str,
    date: NaiveDate,
) -> Option<VatVendorInfo> {
    let country = normalize_country_code(country);

    let vat_id = if is_country_in_eu(&country, date) {
        EU_VENDOR_TAX_ID
    } else {
        match country.as_str() {
            "GB" => GB_VENDOR_TAX_ID,
            "CA" => CA_VENDOR_TAX_ID,
            _ => return None,
        }
    };

    Some(VatVendorInfo {
        tax_name: tax_name(&country),
        country,
        address: &VENDOR_ADDRESS,
        vat_id,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(
        y: i32,
        m: u32,
        d: u32,
    ) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn eu_transaction_uses_irish_registration() {
        let info = vat_vendor_info("FR", date(2023, 3, 1)).unwrap();

        assert_eq!(info.vat_id, "IE3255131SH");
        assert_eq!(info.tax_name, "VAT");
        assert_eq!(info.address.len(), 5);
    }

    #[test]
    fn gb_transaction_after_brexit_uses_uk_registration() {
        let info = vat_vendor_info("GB", date(2022, 1, 1)).unwrap();

        assert_eq!(info.vat_id, "UK 376 1703 88");
    }

    #[test]
    fn gb_transaction_before_brexit_uses_eu_registration() {
        let info = vat_vendor_info("GB", date(2019, 1, 1)).unwrap();

        assert_eq!(info.vat_id, "IE3255131SH");
    }

    #[test]
    fn canada_is_labelled_gst() {
        let info = vat_vendor_info("ca", date(2023, 3, 1)).unwrap();

        assert_eq!(info.country, "CA");
        assert_eq!(info.tax_name, "GST");
        assert_eq!(info.vat_id, "790004303");
    }

    #[test]
    fn other_countries_have_no_vendor_block() {
        assert_eq!(vat_vendor_info("US", date(2023, 3, 1)), None);
    }
}
