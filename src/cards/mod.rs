//! Card templates, instances and the template registry.
//!
//! ## Key Types
//!
//! - `CardTemplate`: Static card data (kind, costs, trigger table)
//! - `CardInstance`: Runtime card state (location, owner, durability)
//! - `CardRegistry`: Name-keyed template storage and JSON loading

pub mod definition;
pub mod instance;
pub mod registry;

pub use definition::{CardKind, CardTemplate};
pub use instance::CardInstance;
pub use registry::CardRegistry;
