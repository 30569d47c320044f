//! Country rules for business tax collection.
//!
//! | Country            | Tax ID opt-in | Label |
//! |--------------------|---------------|-------|
//! | EU member states   | yes           | VAT   |
//! | GB                 | yes           | VAT   |
//! | CH                 | yes           | VAT   |
//! | CA                 | yes           | GST   |
//! | everything else    | no            |       |

use chrono::{Datelike, NaiveDate};

/// Current EU member states.
const EU_MEMBERS: &[&str] = &[
    "AT", "BE", "BG", "CY", "CZ", "DE", "DK", "EE", "ES", "FI", "FR", "GR", "HR", "HU", "IE",
    "IT", "LT", "LU", "LV", "MT", "NL", "PL", "PT", "RO", "SE", "SI", "SK",
];

/// Non-EU countries where a business tax ID can be collected.
const OTHER_VAT_COUNTRIES: &[&str] = &["GB", "CH", "CA"];

/// Membership changes that matter for receipts still in circulation.
/// Dates are (year, month, day); `joined` is inclusive, `left` exclusive.
struct MembershipChange {
    country: &'static str,
    joined: Option<(i32, u32, u32)>,
    left: Option<(i32, u32, u32)>,
}

const MEMBERSHIP_CHANGES: &[MembershipChange] = &[
    MembershipChange {
        country: "HR",
        joined: Some((2013, 7, 1)),
        left: None,
    },
    // End of the Brexit transition period.
    MembershipChange {
        country: "GB",
        joined: None,
        left: Some((2021, 1, 1)),
    },
];

/// Trims and uppercases a country code.
pub fn normalize_country_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Whether `code` was an EU member state on `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use storefront_core::tax::is_country_in_eu;
///
/// let before = NaiveDate::from_ymd_opt(2020, 6, 1).unwrap();
/// let after = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
///
/// assert!(is_country_in_eu("GB", before));
/// assert!(!is_country_in_eu("GB", after));
/// assert!(is_country_in_eu("es", after));
/// ```
pub fn is_country_in_eu(
    code: &str,
    date: NaiveDate,
) -> bool {
    let code = normalize_country_code(code);
    let day = (date.year(), date.month(), date.day());

    match MEMBERSHIP_CHANGES.iter().find(|c| c.country == code) {
        Some(change) => {
            change.joined.is_none_or(|joined| day >= joined)
                && change.left.is_none_or(|left| day < left)
        }
        None => EU_MEMBERS.contains(&code.as_str()),
    }
}

/// Whether the tax-ID opt-in should be offered for `code`.
///
/// Unknown or empty codes are simply unsupported.
pub fn is_vat_supported(code: &str) -> bool {
    let code = normalize_country_code(code);
    EU_MEMBERS.contains(&code.as_str()) || OTHER_VAT_COUNTRIES.contains(&code.as_str())
}

/// Display name of the business tax for `code`.
pub fn tax_name(code: &str) -> &'static str {
    match normalize_country_code(code).as_str() {
        "CA" => "GST",
        _ => "VAT",
    }
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

    // =========================================================================
    // is_vat_supported tests
    // =========================================================================

    #[test]
    fn vat_supported_for_eu_member() {
        assert!(is_vat_supported("ES"));
        assert!(is_vat_supported("DE"));
    }

    #[test]
    fn vat_supported_for_gb_and_ca() {
        assert!(is_vat_supported("GB"));
        assert!(is_vat_supported("CA"));
    }

    #[test]
    fn vat_supported_for_switzerland() {
        assert!(is_vat_supported("CH"));
    }

    #[test]
    fn vat_not_supported_for_us() {
        assert!(!is_vat_supported("US"));
    }

    #[test]
    fn vat_not_supported_for_empty_or_garbage() {
        assert!(!is_vat_supported(""));
        assert!(!is_vat_supported("ZZZ"));
    }

    #[test]
    fn vat_supported_ignores_case_and_whitespace() {
        assert!(is_vat_supported(" gb "));
    }

    // =========================================================================
    // is_country_in_eu tests
    // =========================================================================

    #[test]
    fn gb_left_eu_at_end_of_transition() {
        assert!(is_country_in_eu("GB", date(2020, 12, 31)));
        assert!(!is_country_in_eu("GB", date(2021, 1, 1)));
    }

    #[test]
    fn croatia_joined_in_2013() {
        assert!(!is_country_in_eu("HR", date(2013, 6, 30)));
        assert!(is_country_in_eu("HR", date(2013, 7, 1)));
    }

    #[test]
    fn non_members_are_never_in_eu() {
        assert!(!is_country_in_eu("CA", date(2015, 1, 1)));
        assert!(!is_country_in_eu("CH", date(2024, 1, 1)));
    }

    // =========================================================================
    // tax_name tests
    // =========================================================================

    #[test]
    fn tax_name_is_gst_for_canada() {
        assert_eq!(tax_name("CA"), "GST");
    }

    #[test]
    fn tax_name_is_vat_elsewhere() {
        assert_eq!(tax_name("GB"), "VAT");
        assert_eq!(tax_name("FR"), "VAT");
    }
}
