//! Relay access: one-shot fetches of content events and zap receipts.

use std::time::Duration;

use anyhow::{Context, Result};
use nostr_sdk::prelude::*;
use tracing::{debug, info};

use crate::config::CoreConfig;
use crate::constants::kinds;
use crate::models::{Course, EventAddress, Resource, ZapReceipt};

pub struct EventFetcher {
    client: Client,
    timeout: Duration,
}

impl EventFetcher {
    /// Build a client, register the configured relays and connect
    pub async fn connect(config: &CoreConfig) -> Result<Self> {
        let client = Client::default();
        for url in &config.relays {
            client
                .add_relay(url)
                .await
                .with_context(|| format!("failed to add relay {url}"))?;
        }
        client.connect().await;
        info!(relays = config.relays.len(), "connected to relays");

        Ok(Self {
            client,
            timeout: config.fetch_timeout,
        })
    }

    /// Fetch published resources (documents and videos), optionally
    /// restricted to a single author
    pub async fn fetch_resources(&self, author: Option<&str>) -> Result<Vec<Resource>> {
        let mut filter = Filter::new().kinds([
            Kind::Custom(kinds::DOCUMENT),
            Kind::Custom(kinds::PAID_RESOURCE),
        ]);
        if let Some(author) = author {
            let pubkey = PublicKey::parse(author)
                .with_context(|| format!("invalid author public key {author:?}"))?;
            filter = filter.author(pubkey);
        }

        let events = self.client.fetch_events(filter, self.timeout).await?;
        let resources: Vec<Resource> = events
            .into_iter()
            .filter_map(|e| Resource::from_event(&e))
            .collect();
        debug!(count = resources.len(), "fetched resources");
        Ok(resources)
    }

    /// Fetch the resource at an address, if any relay has it
    pub async fn fetch_resource(&self, address: &EventAddress) -> Result<Option<Resource>> {
        let events = self.fetch_addressed(address).await?;
        Ok(events.iter().find_map(Resource::from_event))
    }

    /// Fetch the course at an address, if any relay has it
    pub async fn fetch_course(&self, address: &EventAddress) -> Result<Option<Course>> {
        let events = self.fetch_addressed(address).await?;
        Ok(events.iter().find_map(Course::from_event))
    }

    /// Fetch zap receipts for a target, querying both reference schemes.
    /// The result may contain the same receipt twice (a receipt can match
    /// both filters); aggregation deduplicates by receipt id.
    pub async fn fetch_zap_receipts(
        &self,
        event_id: &str,
        address: &EventAddress,
    ) -> Result<Vec<ZapReceipt>> {
        let id = EventId::from_hex(event_id)
            .with_context(|| format!("invalid event id {event_id:?}"))?;

        let direct = Filter::new().kind(Kind::Custom(kinds::ZAP_RECEIPT)).event(id);
        let addressed = Filter::new()
            .kind(Kind::Custom(kinds::ZAP_RECEIPT))
            .custom_tag(SingleLetterTag::lowercase(Alphabet::A), address.to_string());

        let mut receipts = Vec::new();
        for filter in [direct, addressed] {
            let events = self.client.fetch_events(filter, self.timeout).await?;
            receipts.extend(events.iter().filter_map(ZapReceipt::from_event));
        }
        debug!(count = receipts.len(), target = %address, "fetched zap receipts");
        Ok(receipts)
    }

    async fn fetch_addressed(&self, address: &EventAddress) -> Result<Vec<Event>> {
        let pubkey = PublicKey::parse(&address.pubkey)
            .with_context(|| format!("invalid public key in address {address}"))?;
        let filter = Filter::new()
            .kind(Kind::Custom(address.kind))
            .author(pubkey)
            .identifier(address.identifier.clone());

        let events = self.client.fetch_events(filter, self.timeout).await?;
        Ok(events.into_iter().collect())
    }
}
