pub mod lifecycle;
pub mod trash;
