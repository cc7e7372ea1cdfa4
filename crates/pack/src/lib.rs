pub mod cells;
pub mod extract;
pub mod fetch;
pub mod flatten;
pub mod scene;
pub mod stats;
pub mod tile;

pub use scene::{PackedScene, Scene};
pub use stats::PackStats;
pub use tile::TiledBuffer;
