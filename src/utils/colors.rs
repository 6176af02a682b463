/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

use crate::models::inventory::InventoryStatus;

/// Available → green, sold out → red, unknown → grey.
pub fn color_for_status(status: InventoryStatus) -> &'static str {
    match status {
        InventoryStatus::Available => GREEN,
        InventoryStatus::SoldOut => RED,
        InventoryStatus::Unknown => GREY,
    }
}
