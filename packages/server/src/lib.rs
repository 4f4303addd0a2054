// Resource landing page service
//
// Serves normalized Contentful resource landing pages over HTTP. Fetching and
// normalization live in the contentful-client crate; this crate is the edge.

pub mod config;
pub mod server;

pub use config::*;
