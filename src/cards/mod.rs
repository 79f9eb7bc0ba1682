//! Card catalog: definitions and registry.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for catalog entries
//! - `Subtype`: The mechanical identity of a card (drives cost and effect)
//! - `Element`: Decorative tag, never read by rules code
//! - `CardDefinition`: Static card data
//! - `CardRegistry`: Catalog lookup

pub mod definition;
pub mod registry;

pub use definition::{AttackKind, CardDefinition, CardId, CardType, Element, MinerKind, Subtype};
pub use registry::{CardRegistry, CardStats};
