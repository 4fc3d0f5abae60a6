use nostr_sdk::Event;
use serde::Serialize;

use crate::constants::{kinds, DEFAULT_RESOURCE_TITLE, VIDEO_TOPIC};
use crate::models::EventAddress;

/// How a resource should be rendered, derived from its topic tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Document,
    Video,
}

/// A publishable content item - kind:30023 (free) or kind:30402 (paid) events
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: String,
    pub pubkey: String,
    pub kind: u16,
    /// Stable identifier from the d-tag; required for addressability
    pub identifier: String,
    pub title: String,
    pub summary: Option<String>,
    pub image: Option<String>,
    /// Author-declared publication time, seconds since epoch
    pub published_at: Option<u64>,
    /// Price in sats; absent means free
    pub price: Option<u64>,
    pub topics: Vec<String>,
    /// External links from r-tags
    pub additional_links: Vec<String>,
    pub content: String,
    pub created_at: u64,
    pub resource_type: ResourceType,
}

impl Resource {
    /// Parse a Resource from a kind:30023 or kind:30402 event.
    /// Events without a d-tag are not addressable and are rejected.
    pub fn from_event(event: &Event) -> Option<Self> {
        let kind = event.kind.as_u16();
        if kind != kinds::DOCUMENT && kind != kinds::PAID_RESOURCE {
            return None;
        }

        let mut identifier: Option<String> = None;
        let mut title: Option<String> = None;
        let mut summary: Option<String> = None;
        let mut image: Option<String> = None;
        let mut published_at: Option<String> = None;
        let mut price: Option<String> = None;
        let mut topics: Vec<String> = Vec::new();
        let mut additional_links: Vec<String> = Vec::new();

        for tag in event.tags.iter() {
            let slice = tag.as_slice();
            let (Some(tag_name), Some(value)) = (slice.first(), slice.get(1)) else {
                continue;
            };
            match tag_name.as_str() {
                "d" => {
                    if identifier.is_none() {
                        identifier = Some(value.clone());
                    }
                }
                "title" => {
                    if title.is_none() {
                        title = Some(value.clone());
                    }
                }
                "summary" => {
                    if summary.is_none() {
                        summary = Some(value.clone());
                    }
                }
                "image" => {
                    if image.is_none() {
                        image = Some(value.clone());
                    }
                }
                "published_at" => {
                    if published_at.is_none() {
                        published_at = Some(value.clone());
                    }
                }
                "price" => {
                    if price.is_none() {
                        price = Some(value.clone());
                    }
                }
                "t" => {
                    if !topics.contains(value) {
                        topics.push(value.clone());
                    }
                }
                "r" => additional_links.push(value.clone()),
                _ => {}
            }
        }

        let identifier = identifier?;
        let resource_type = if topics.iter().any(|t| t == VIDEO_TOPIC) {
            ResourceType::Video
        } else {
            ResourceType::Document
        };

        Some(Resource {
            id: event.id.to_hex(),
            pubkey: event.pubkey.to_hex(),
            kind,
            identifier,
            title: title.unwrap_or_else(|| DEFAULT_RESOURCE_TITLE.to_string()),
            summary,
            image,
            published_at: published_at.and_then(|v| v.parse().ok()),
            price: price.and_then(|v| v.parse().ok()),
            topics,
            additional_links,
            content: event.content.clone(),
            created_at: event.created_at.as_u64(),
            resource_type,
        })
    }

    /// Address of this resource (`kind:pubkey:d`), the value zap receipts
    /// and course lesson lists carry in their a-tags
    pub fn address(&self) -> EventAddress {
        EventAddress::new(self.kind, self.pubkey.clone(), self.identifier.clone())
    }

    pub fn is_paid(&self) -> bool {
        self.kind == kinds::PAID_RESOURCE
    }
}
