pub mod address;
pub mod coords;
pub mod normalize;
pub mod pipeline;
pub mod upsert;
