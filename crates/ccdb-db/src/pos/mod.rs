//! Database operations for the `pos` table.

mod read;
mod types;
mod write;

pub use read::{get_pos_by_id, list_pos};
pub use types::PosRow;
pub use write::{clear_pos, insert_pos, update_pos};
