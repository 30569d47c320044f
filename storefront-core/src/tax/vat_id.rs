//! Clean-up of user-entered business tax IDs.
//!
//! Users frequently paste their ID with the country prefix used on invoices
//! (`GB123456789`, `CHE-123.456.789`). The services expect the bare number,
//! so exactly one leading prefix is removed:
//!
//! - the selected country code, case-insensitive;
//! - for Switzerland, the business identifier prefix `CHE` or `CHE-`.
//!
//! Everything else, including case, is passed through.

use regex::RegexBuilder;
use tracing::warn;

use super::countries::normalize_country_code;

fn prefix_pattern(country: &str) -> Option<String> {
    match country {
        "" => None,
        // `CHE-?` must be tried before the bare country code or `CHE-1` would
        // lose only its `CH`.
        "CH" => Some(r"^(?:CHE-?|CH)".to_string()),
        code => Some(format!("^{}", regex::escape(code))),
    }
}

/// Strip a leading country prefix from `raw` and trim surrounding whitespace.
///
/// # Examples
///
/// ```
/// use storefront_core::tax::normalize_vat_id;
///
/// assert_eq!(normalize_vat_id("GB12345", "GB"), "12345");
/// assert_eq!(normalize_vat_id("CHE-12345", "CH"), "12345");
/// assert_eq!(normalize_vat_id("che12345", "CH"), "12345");
/// assert_eq!(normalize_vat_id("12345", "GB"), "12345");
/// ```
pub fn normalize_vat_id(
    raw: &str,
    country: &str,
) -> String {
    let trimmed = raw.trim();
    let Some(pattern) = prefix_pattern(&normalize_country_code(country)) else {
        return trimmed.to_string();
    };

    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(prefix) => prefix.replace(trimmed, "").trim().to_string(),
        Err(error) => {
            warn!(country, %error, "cannot build tax id prefix matcher");
            trimmed.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn strips_country_prefix() {
        assert_eq!(normalize_vat_id("GB12345", "GB"), "12345");
    }

    #[test]
    fn strips_lowercase_country_prefix() {
        assert_eq!(normalize_vat_id("gb12345", "GB"), "12345");
    }

    #[test]
    fn leaves_unprefixed_id_alone() {
        assert_eq!(normalize_vat_id("12345", "GB"), "12345");
    }

    #[test]
    fn does_not_strip_other_countries_prefix() {
        assert_eq!(normalize_vat_id("DE12345", "GB"), "DE12345");
    }

    #[test]
    fn strips_only_one_prefix() {
        assert_eq!(normalize_vat_id("GBGB12345", "GB"), "GB12345");
    }

    #[test]
    fn strips_swiss_prefix_with_hyphen() {
        assert_eq!(normalize_vat_id("CHE-12345", "CH"), "12345");
    }

    #[test]
    fn strips_swiss_prefix_without_hyphen() {
        assert_eq!(normalize_vat_id("CHE12345", "CH"), "12345");
    }

    #[test]
    fn strips_lowercase_swiss_prefix() {
        assert_eq!(normalize_vat_id("che12345", "CH"), "12345");
    }

    #[test]
    fn strips_bare_swiss_country_code() {
        assert_eq!(normalize_vat_id("CH12345", "CH"), "12345");
    }

    #[test]
    fn swiss_prefix_only_applies_to_switzerland() {
        assert_eq!(normalize_vat_id("CHE-12345", "GB"), "CHE-12345");
    }

    #[test]
    fn trims_whitespace_and_preserves_case() {
        assert_eq!(normalize_vat_id("  GB 12ab5 ", "gb"), "12ab5");
    }

    #[test]
    fn empty_country_only_trims() {
        assert_eq!(normalize_vat_id(" GB12345 ", ""), "GB12345");
    }
}
