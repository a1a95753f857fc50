//! Chart of accounts: natures, the merged catalogue, system codes.
//!
//! Two disjoint account sources exist: a shared system catalogue every tenant
//! sees, and each tenant's own accounts. [`Catalogue::merge`] combines them
//! under an explicit shadowing rule before any code lookup happens; nothing
//! downstream ever consults the two sources separately.

pub mod catalogue;
pub mod nature;
pub mod system;

pub use catalogue::{Account, Catalogue};
pub use nature::AccountNature;
pub use system::{GstAccountSet, system_catalogue};
