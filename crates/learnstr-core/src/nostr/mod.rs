pub mod fetch;

pub use fetch::EventFetcher;
