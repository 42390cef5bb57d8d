//! Control standard wiring.
//!
//! This module loads the reference standard (NIST SP 800-53 by default) and
//! derives the identifiers used to look controls up in it. Callers use
//! `StandardIndex` for lookups and `ControlIds` to turn a component's control
//! key into catalog and link ids.

pub mod identity;
pub mod index;
pub mod model;

pub use identity::{ControlIds, FamilyCode};
pub use index::StandardIndex;
pub use model::{StandardCatalog, StandardControl, load_standard_from_path};
