pub mod cloud;
pub mod config;
pub mod error;
pub mod layout;
pub mod params;
pub mod texel;

pub use cloud::*;
pub use config::*;
pub use error::*;
pub use layout::*;
pub use params::*;
pub use texel::*;
