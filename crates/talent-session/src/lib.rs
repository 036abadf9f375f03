//! # talent-session
//!
//! Remembers, per search, which candidates were shown at which rank with
//! which scores, so a later recruiter interaction can be attributed to the
//! exact ranking context that produced it. Entries expire after a bounded
//! TTL; a miss is a normal outcome, not an error.

pub mod cache;
pub mod registry;

pub use cache::{SessionCache, SessionCacheStats, SessionKey};
pub use registry::SessionInfo;
