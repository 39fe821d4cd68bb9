//! Review annotation: location parsing and comment grouping.

pub mod annotate;
pub mod location;

pub use annotate::build_comments;
