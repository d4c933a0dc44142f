pub mod connector;
pub mod shape;
