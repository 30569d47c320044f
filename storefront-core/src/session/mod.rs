//! View-facing sessions around the state containers.
//!
//! A session is built once by whoever drives the flow and passed to the
//! views by reference; nothing here is global.

pub mod assembler;
pub mod checkout;

pub use assembler::{AssemblerSession, Subscription};
pub use checkout::CheckoutTaxStep;
