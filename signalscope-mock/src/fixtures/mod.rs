pub mod catalog;
pub mod points;
pub mod summary;
