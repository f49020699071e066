pub mod board;
pub mod element;
pub mod elements;
pub mod events;
pub mod groups;
pub mod picking;
pub mod prefabs;
pub mod query;
pub mod spatial;

pub use board::*;
