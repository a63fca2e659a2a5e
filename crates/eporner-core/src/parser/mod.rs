//! Response normalization
//!
//! Decodes JSON, XML and plain-text bodies into a canonical [`Node`]
//! and maps it onto the domain model.

pub mod json;
pub mod node;
pub mod response;
pub mod xml;

pub use node::Node;
pub use response::{decode_body, parse_removed, parse_removed_txt, parse_search, parse_video};
