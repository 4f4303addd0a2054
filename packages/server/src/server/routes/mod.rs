// HTTP routes
pub mod contentful;
pub mod health;

pub use contentful::*;
pub use health::*;
