//! ## Crate layout
//! - `core`: metadata, schema derivation, classification, stores, and conversion.
//! - `Record`: derive macro generating `Record` and `Storable` for a struct.
//!
//! Everything in `extstore_core` is re-exported at the root, so generated code
//! and downstream crates address it as `extstore::...`.

pub use extstore_core as core;
pub use extstore_core::*;
pub use extstore_derive::Record;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
/// `Record` names both the derive macro and the trait
///

pub mod prelude {
    pub use crate::Record;
    pub use extstore_core::{prelude::*, traits::Record};
}
