//! Card system: templates, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `ProtoId`: Identifier for card templates
//! - `CardTemplate`: Static card data with up to three effect bindings
//! - `CardInstance`: Runtime card state (owner, strength, position, bindings)
//! - `CardCatalog`: Template lookup, part of `GameRules`

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardTemplate, ProtoId};
pub use instance::CardInstance;
pub use registry::{CardCatalog, MAX_EFFECT_AMOUNT, MAX_EFFECT_RADIUS};
