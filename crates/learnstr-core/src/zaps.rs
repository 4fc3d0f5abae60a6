//! Zap receipt aggregation.
//!
//! A receipt counts toward a target if it references it by event id or by
//! replaceable-event address, and its id has not been counted yet. Totals
//! are in whole sats; receipts with unusable invoices still count as
//! receipts but contribute nothing to the total.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::bolt11::msats_to_sats;
use crate::models::{Course, EventAddress, Resource, ZapReceipt};

/// Content that zap receipts can be linked to
pub trait Zappable {
    /// Event id in hex
    fn event_id(&self) -> &str;
    /// Replaceable-event address (`kind:pubkey:d`)
    fn address(&self) -> EventAddress;
}

impl Zappable for Resource {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn address(&self) -> EventAddress {
        Resource::address(self)
    }
}

impl Zappable for Course {
    fn event_id(&self) -> &str {
        &self.id
    }

    fn address(&self) -> EventAddress {
        Course::address(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ZapSummary {
    /// Sum of receipt amounts, each floored to whole sats
    pub total_sats: u64,
    /// Receipts that matched the target once deduplicated
    pub receipt_count: usize,
    /// Distinct zap senders in order of first appearance
    pub senders: Vec<String>,
}

/// Total sats zapped to a target over a set of candidate receipts
pub fn total_zapped_sats<T: Zappable + ?Sized>(target: &T, receipts: &[ZapReceipt]) -> u64 {
    summarize_zaps(target, receipts).total_sats
}

/// Aggregate candidate receipts against a target, deduplicating by
/// receipt id so relays returning the same receipt twice cannot
/// double-count
pub fn summarize_zaps<T: Zappable + ?Sized>(target: &T, receipts: &[ZapReceipt]) -> ZapSummary {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut summary = ZapSummary::default();

    for receipt in receipts {
        if !receipt.references(target) {
            continue;
        }
        if !seen.insert(receipt.id.as_str()) {
            debug!(receipt = %receipt.id, "duplicate zap receipt skipped");
            continue;
        }

        summary.receipt_count += 1;
        match receipt.amount_msats() {
            Ok(Some(msats)) => {
                summary.total_sats = summary.total_sats.saturating_add(msats_to_sats(msats))
            }
            Ok(None) => debug!(receipt = %receipt.id, "zap receipt without amount"),
            Err(e) => {
                debug!(receipt = %receipt.id, error = %e, "undecodable invoice in zap receipt")
            }
        }
        if let Some(sender) = receipt.sender() {
            if !summary.senders.contains(&sender) {
                summary.senders.push(sender);
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use nostr_sdk::prelude::*;
    use std::borrow::Cow;

    fn target_resource() -> Resource {
        let event = EventBuilder::new(Kind::Custom(30023), "lesson body")
            .tag(Tag::identifier("zapped-lesson"))
            .sign_with_keys(&Keys::generate())
            .unwrap();
        Resource::from_event(&event).unwrap()
    }

    fn receipt(tags: Vec<Tag>) -> ZapReceipt {
        let mut builder = EventBuilder::new(Kind::Custom(9735), "");
        for tag in tags {
            builder = builder.tag(tag);
        }
        let event = builder.sign_with_keys(&Keys::generate()).unwrap();
        ZapReceipt::from_event(&event).unwrap()
    }

    fn e_tag(value: &str) -> Tag {
        Tag::custom(
            TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::E)),
            vec![value.to_string()],
        )
    }

    fn a_tag(value: &str) -> Tag {
        Tag::custom(
            TagKind::SingleLetter(SingleLetterTag::lowercase(Alphabet::A)),
            vec![value.to_string()],
        )
    }

    fn bolt11_tag(invoice: &str) -> Tag {
        Tag::custom(
            TagKind::Custom(Cow::Borrowed("bolt11")),
            vec![invoice.to_string()],
        )
    }

    fn description_tag(sender: &str) -> Tag {
        Tag::custom(
            TagKind::Custom(Cow::Borrowed("description")),
            vec![format!(r#"{{"pubkey":"{sender}","kind":9734}}"#)],
        )
    }

    #[test]
    fn test_empty_receipt_set_totals_zero() {
        let target = target_resource();
        assert_eq!(total_zapped_sats(&target, &[]), 0);
    }

    #[test]
    fn test_mixed_reference_schemes_sum() {
        let target = target_resource();
        // 100n = 10 sats via direct event reference
        let by_id = receipt(vec![
            e_tag(&target.id),
            bolt11_tag("lnbc100n1pvjluezsomedata"),
        ]);
        // 50n = 5 sats via address reference
        let by_address = receipt(vec![
            a_tag(&target.address().to_string()),
            bolt11_tag("lnbc50n1pvjluezsomedata"),
        ]);

        assert_eq!(total_zapped_sats(&target, &[by_id, by_address]), 15);
    }

    #[test]
    fn test_order_does_not_affect_total() {
        let target = target_resource();
        let a = receipt(vec![e_tag(&target.id), bolt11_tag("lnbc100n1pvjluezx")]);
        let b = receipt(vec![e_tag(&target.id), bolt11_tag("lnbc210n1pvjluezx")]);

        let forward = total_zapped_sats(&target, &[a.clone(), b.clone()]);
        let backward = total_zapped_sats(&target, &[b, a]);
        assert_eq!(forward, backward);
        assert_eq!(forward, 31);
    }

    #[test]
    fn test_duplicate_receipt_counts_once() {
        let target = target_resource();
        let zap = receipt(vec![e_tag(&target.id), bolt11_tag("lnbc100n1pvjluezx")]);

        let summary = summarize_zaps(&target, &[zap.clone(), zap]);
        assert_eq!(summary.total_sats, 10);
        assert_eq!(summary.receipt_count, 1);
    }

    #[test]
    fn test_unrelated_receipt_contributes_nothing() {
        let target = target_resource();
        let unrelated = receipt(vec![
            e_tag(&"0".repeat(64)),
            a_tag("30023:someone-else:other-doc"),
            bolt11_tag("lnbc100n1pvjluezx"),
        ]);

        let summary = summarize_zaps(&target, &[unrelated]);
        assert_eq!(summary.total_sats, 0);
        assert_eq!(summary.receipt_count, 0);
    }

    #[test]
    fn test_unusable_invoice_counts_receipt_but_not_sats() {
        let target = target_resource();
        let broken = receipt(vec![e_tag(&target.id), bolt11_tag("garbage")]);
        let amountless = receipt(vec![e_tag(&target.id), bolt11_tag("lnbc1pvjluezx")]);
        let good = receipt(vec![e_tag(&target.id), bolt11_tag("lnbc100n1pvjluezx")]);

        let summary = summarize_zaps(&target, &[broken, amountless, good]);
        assert_eq!(summary.total_sats, 10);
        assert_eq!(summary.receipt_count, 3);
    }

    #[test]
    fn test_senders_deduplicated_in_first_seen_order() {
        let target = target_resource();
        let first = receipt(vec![
            e_tag(&target.id),
            bolt11_tag("lnbc100n1pvjluezx"),
            description_tag("alice"),
        ]);
        let second = receipt(vec![
            e_tag(&target.id),
            bolt11_tag("lnbc50n1pvjluezx"),
            description_tag("bob"),
        ]);
        let third = receipt(vec![
            e_tag(&target.id),
            bolt11_tag("lnbc50n1pvjluezx"),
            description_tag("alice"),
        ]);

        let summary = summarize_zaps(&target, &[first, second, third]);
        assert_eq!(summary.total_sats, 20);
        assert_eq!(summary.receipt_count, 3);
        assert_eq!(summary.senders, vec!["alice", "bob"]);
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let target = target_resource();
        // each invoice carries the largest whole-BTC amount that fits
        // in u64 millisats; enough of them must cap out, not wrap
        let receipts: Vec<ZapReceipt> = (0..1100)
            .map(|i| ZapReceipt {
                id: format!("{i:064x}"),
                pubkey: "0".repeat(64),
                created_at: 0,
                event_refs: vec![target.id.clone()],
                address_refs: vec![],
                bolt11: Some("lnbc1844674401pvjluezx".to_string()),
                description: None,
            })
            .collect();

        assert_eq!(total_zapped_sats(&target, &receipts), u64::MAX);
    }

    #[test]
    fn test_course_is_zappable_by_address() {
        let keys = Keys::generate();
        let event = EventBuilder::new(Kind::Custom(30004), "")
            .tag(Tag::identifier("zapped-course"))
            .sign_with_keys(&keys)
            .unwrap();
        let course = Course::from_event(&event).unwrap();

        let zap = receipt(vec![
            a_tag(&course.address().to_string()),
            bolt11_tag("lnbc1u1pvjluezx"),
        ]);
        // 1 micro-BTC = 100 sats
        assert_eq!(total_zapped_sats(&course, &[zap]), 100);
    }
}
