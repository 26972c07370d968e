//! Pure data structures for the catalog browsing client.

pub mod catalog;
pub mod favorite;

pub use catalog::*;
pub use favorite::*;
