//! Application-wide constants
//!
//! Centralized location for magic strings and configuration values
//! that are used across multiple modules.

/// Default relay set queried when the caller doesn't supply any
pub const DEFAULT_RELAYS: &[&str] = &[
    "wss://relay.damus.io",
    "wss://nos.lol",
    "wss://relay.primal.net",
];

/// Default per-filter fetch timeout in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

// Display defaults for events missing optional tags
pub const DEFAULT_RESOURCE_TITLE: &str = "Untitled";
pub const DEFAULT_COURSE_NAME: &str = "Untitled Course";

/// Topic tag that marks a resource as a video rather than a document
pub const VIDEO_TOPIC: &str = "video";

/// Millisatoshis per satoshi (bolt11 amounts are carried in msats)
pub const MSATS_PER_SAT: u64 = 1000;

// Nostr event kinds this client consumes
pub mod kinds {
    /// Long-form content (NIP-23), free documents and videos
    pub const DOCUMENT: u16 = 30023;
    /// Classified listing (NIP-99), used for paid resources
    pub const PAID_RESOURCE: u16 = 30402;
    /// Curation set (NIP-51), used as a course whose a-tags list the lessons
    pub const COURSE: u16 = 30004;
    /// Zap receipt (NIP-57)
    pub const ZAP_RECEIPT: u16 = 9735;
}
