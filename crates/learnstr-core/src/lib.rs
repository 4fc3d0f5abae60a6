pub mod bolt11;
pub mod config;
pub mod constants;
pub mod models;
pub mod nostr;
pub mod zaps;

// Re-export the types most callers need at the crate root
pub use config::CoreConfig;
pub use models::{Course, EventAddress, Resource, ResourceType, ZapReceipt};
pub use zaps::{summarize_zaps, total_zapped_sats, ZapSummary, Zappable};
