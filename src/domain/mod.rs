//! Domain layer containing entities, the store contract and core errors.
//!
//! # Architecture
//!
//! - [`entities`] - Short links, stats records and summaries
//! - [`repositories`] - The [`repositories::LinkStore`] adapter trait
//! - [`errors`] - [`errors::ShortenError`], the error kinds of the core operations
//!
//! # Record Lifecycle
//!
//! Every slug owns two records in the key-value store:
//!
//! 1. `url:<slug>` - the redirect target, expiring after the URL TTL (30 days by default)
//! 2. `stats:<slug>` - click statistics, expiring after the longer stats TTL (90 days)
//!
//! Once the URL record expires the slug is free for reuse, while its old stats
//! record may remain visible in reports until it expires as well.

pub mod entities;
pub mod errors;
pub mod repositories;
