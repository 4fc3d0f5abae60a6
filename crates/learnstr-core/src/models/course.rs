use nostr_sdk::Event;
use serde::Serialize;

use crate::constants::{kinds, DEFAULT_COURSE_NAME};
use crate::models::EventAddress;

/// Course - kind:30004 curation set whose a-tags list the lessons in order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    pub id: String,
    pub pubkey: String,
    /// Stable identifier from the d-tag; required for addressability
    pub identifier: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub published_at: Option<u64>,
    /// Price in sats; absent means free
    pub price: Option<u64>,
    pub topics: Vec<String>,
    /// Lesson addresses (`kind:pubkey:d`) in course order, as published
    pub lessons: Vec<String>,
    pub content: String,
    pub created_at: u64,
}

impl Course {
    /// Parse a Course from a kind:30004 event
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind.as_u16() != kinds::COURSE {
            return None;
        }

        let mut identifier: Option<String> = None;
        let mut name: Option<String> = None;
        let mut title: Option<String> = None;
        let mut about: Option<String> = None;
        let mut description: Option<String> = None;
        let mut summary: Option<String> = None;
        let mut image: Option<String> = None;
        let mut picture: Option<String> = None;
        let mut published_at: Option<String> = None;
        let mut price: Option<String> = None;
        let mut topics: Vec<String> = Vec::new();
        let mut lessons: Vec<String> = Vec::new();

        for tag in event.tags.iter() {
            let slice = tag.as_slice();
            let (Some(tag_name), Some(value)) = (slice.first(), slice.get(1)) else {
                continue;
            };
            let set_first = |slot: &mut Option<String>| {
                if slot.is_none() {
                    *slot = Some(value.clone());
                }
            };
            match tag_name.as_str() {
                "d" => set_first(&mut identifier),
                "name" => set_first(&mut name),
                "title" => set_first(&mut title),
                "about" => set_first(&mut about),
                "description" => set_first(&mut description),
                "summary" => set_first(&mut summary),
                "image" => set_first(&mut image),
                "picture" => set_first(&mut picture),
                "published_at" => set_first(&mut published_at),
                "price" => set_first(&mut price),
                "t" => {
                    if !topics.contains(value) {
                        topics.push(value.clone());
                    }
                }
                "a" => lessons.push(value.clone()),
                _ => {}
            }
        }

        let identifier = identifier?;

        Some(Course {
            id: event.id.to_hex(),
            pubkey: event.pubkey.to_hex(),
            identifier,
            name: name
                .or(title)
                .unwrap_or_else(|| DEFAULT_COURSE_NAME.to_string()),
            description: about.or(description).or(summary),
            image: image.or(picture),
            published_at: published_at.and_then(|v| v.parse().ok()),
            price: price.and_then(|v| v.parse().ok()),
            topics,
            lessons,
            content: event.content.clone(),
            created_at: event.created_at.as_u64(),
        })
    }

    /// Address of this course (`30004:pubkey:d`)
    pub fn address(&self) -> EventAddress {
        EventAddress::new(kinds::COURSE, self.pubkey.clone(), self.identifier.clone())
    }

    /// Lesson addresses that parse as valid `kind:pubkey:d` coordinates,
    /// keeping course order and skipping malformed entries
    pub fn lesson_addresses(&self) -> Vec<EventAddress> {
        self.lessons
            .iter()
            .filter_map(|a| a.parse().ok())
            .collect()
    }
}
