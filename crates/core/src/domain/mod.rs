pub mod product;
pub mod visit;
