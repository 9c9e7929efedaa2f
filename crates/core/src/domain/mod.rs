pub mod permit;
pub mod project;
