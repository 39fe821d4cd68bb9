//! Command implementations, one module per command group.

mod change;
mod review;

pub use change::{run_checkout, run_comment, run_list, run_show};
pub use review::run_review;
