use nostr_sdk::Event;
use serde::Serialize;

use crate::bolt11::{self, Bolt11Error};
use crate::constants::kinds;
use crate::models::tag_utils::{all_tag_values, first_tag_value};
use crate::zaps::Zappable;

/// Zap receipt - kind:9735 event published by a Lightning wallet service
/// as proof that an invoice tied to a target event was paid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZapReceipt {
    pub id: String,
    /// Pubkey of the wallet service that issued the receipt
    pub pubkey: String,
    pub created_at: u64,
    /// Direct event references from e-tags
    pub event_refs: Vec<String>,
    /// Address references (`kind:pubkey:d`) from a-tags
    pub address_refs: Vec<String>,
    /// The paid Lightning invoice
    pub bolt11: Option<String>,
    /// JSON of the zap request that triggered the payment
    pub description: Option<String>,
}

impl ZapReceipt {
    /// Parse a ZapReceipt from a kind:9735 event
    pub fn from_event(event: &Event) -> Option<Self> {
        if event.kind.as_u16() != kinds::ZAP_RECEIPT {
            return None;
        }

        Some(ZapReceipt {
            id: event.id.to_hex(),
            pubkey: event.pubkey.to_hex(),
            created_at: event.created_at.as_u64(),
            event_refs: all_tag_values(event, "e"),
            address_refs: all_tag_values(event, "a"),
            bolt11: first_tag_value(event, "bolt11").map(|s| s.to_string()),
            description: first_tag_value(event, "description").map(|s| s.to_string()),
        })
    }

    /// Whether this receipt is linked to the target, either by event id
    /// (e-tag) or by replaceable-event address (a-tag)
    pub fn references<T: Zappable + ?Sized>(&self, target: &T) -> bool {
        if self.event_refs.iter().any(|e| e == target.event_id()) {
            return true;
        }
        let address = target.address().to_string();
        self.address_refs.iter().any(|a| *a == address)
    }

    /// Amount of the embedded invoice in millisatoshis.
    /// `Ok(None)` when the receipt carries no bolt11 tag or the
    /// invoice is amountless.
    pub fn amount_msats(&self) -> Result<Option<u64>, Bolt11Error> {
        match &self.bolt11 {
            Some(invoice) => bolt11::amount_msats(invoice),
            None => Ok(None),
        }
    }

    /// Pubkey of the zap sender, recovered from the embedded zap request
    pub fn sender(&self) -> Option<String> {
        let description = self.description.as_deref()?;
        let request: serde_json::Value = serde_json::from_str(description).ok()?;
        request
            .get("pubkey")
            .and_then(|p| p.as_str())
            .map(|p| p.to_string())
    }
}
