mod design;
mod pattern;
mod tax_location;

pub use design::{DesignRecipe, StyleOverrides};
pub use pattern::{Pattern, PatternSlot, SectionEntry};
pub use tax_location::{CartTaxLocation, TaxLocation, VatDetails};
