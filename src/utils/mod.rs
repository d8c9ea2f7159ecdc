//! Utility functions for slug handling and URL validation.
//!
//! - [`slug`] - Random slug generation and custom slug validation
//! - [`url_validator`] - Destination URL syntax checks

pub mod slug;
pub mod url_validator;
