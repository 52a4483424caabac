//! Card content: immutable card records and their database.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier of a physical card (each exists once per game)
//! - `Age`, `Color`, `Icon`, `IconSlot`: printed card properties
//! - `Card`: Immutable card record
//! - `CardDatabase`: Card lookup, the content provider for the engine

pub mod definition;
pub mod registry;

pub use definition::{Age, Card, CardId, Color, Icon, IconSlot};
pub use registry::CardDatabase;
