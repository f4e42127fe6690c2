//! Core scoresheet logic. Keep this crate free of IO and platform concerns.

pub mod category;
pub mod error;
pub mod params;
pub mod player;
pub mod roster;
pub mod rows;
pub mod scoring;
pub mod session;
pub mod variant;
pub mod view;

pub use category::*;
pub use error::*;
pub use params::*;
pub use player::*;
pub use roster::*;
pub use rows::*;
pub use scoring::*;
pub use session::*;
pub use variant::*;
pub use view::*;
