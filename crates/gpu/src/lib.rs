pub mod volume;

pub use volume::{texture_format, VolumeTextures};
