pub mod candidate;
pub mod inventory;
pub mod place;
pub mod position;

pub use candidate::{Candidate, InventoryHints};
pub use inventory::{Inventory, InventoryStatus, NewInventory};
pub use place::{Coordinates, NewPlace, Place};
pub use position::RawPosition;
