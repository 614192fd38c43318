pub mod aggregate;
pub mod catalog;
pub mod fetch;
