pub mod inventory;
pub mod register;

pub use inventory::{collapse_styles, extract_inventory, first_inbound_map, CollapsedStyle};
pub use register::extract_register;
