//! Kind-dispatched decoding of thing payloads.
//!
//! Decoding never fails. A child whose kind has no decoder, or whose `data`
//! does not fit the record shape, yields `None` and is left out of listings,
//! so one corrupt item cannot abort the rest of a page.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::trace;

use super::{Item, Kind, Listing, Thing};
use crate::model::{Account, Comment, Link};

type Decoder = fn(&Value) -> Option<Item>;

/// Supported kinds. Adding a record type means adding one entry here.
static DECODERS: &[(&str, Decoder)] = &[
    ("t1", comment_item),
    ("t2", account_item),
    ("t3", link_item),
];

fn comment_item(data: &Value) -> Option<Item> {
    record::<Comment>(data).map(Item::Comment)
}

fn account_item(data: &Value) -> Option<Item> {
    record::<Account>(data).map(Item::Account)
}

fn link_item(data: &Value) -> Option<Item> {
    record::<Link>(data).map(Item::Link)
}

fn record<T: DeserializeOwned>(data: &Value) -> Option<T> {
    match T::deserialize(data) {
        Ok(value) => Some(value),
        Err(error) => {
            trace!(%error, "dropping malformed thing data");
            None
        }
    }
}

fn typed<T: DeserializeOwned>(thing: &Thing, kind: &Kind) -> Option<T> {
    if &thing.kind == kind {
        record(&thing.data)
    } else {
        None
    }
}

/// Decode a `t1` thing. Any other kind, or malformed data, gives `None`.
pub fn decode_as_comment(thing: &Thing) -> Option<Comment> {
    typed(thing, &Kind::Comment)
}

/// Decode a `t3` thing. Any other kind, or malformed data, gives `None`.
pub fn decode_as_link(thing: &Thing) -> Option<Link> {
    typed(thing, &Kind::Link)
}

/// Decode a `t2` thing. Any other kind, or malformed data, gives `None`.
pub fn decode_as_account(thing: &Thing) -> Option<Account> {
    typed(thing, &Kind::Account)
}

/// Decode any supported kind into an [`Item`].
pub fn decode_any(thing: &Thing) -> Option<Item> {
    let tag = thing.kind.tag();
    match DECODERS.iter().find(|(t, _)| *t == tag) {
        Some((_, decode)) => decode(&thing.data),
        None => {
            trace!(kind = %thing.kind, "skipping unsupported thing kind");
            None
        }
    }
}

/// Decode every child of a listing, keeping input order.
///
/// Undecodable children are omitted without a placeholder, so positions in
/// the result do not line up with positions in `listing.children`.
pub fn decode_listing(listing: &Listing) -> Vec<Item> {
    listing.children.iter().filter_map(decode_any).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn thing(kind: &str, data: Value) -> Thing {
        Thing::new(Kind::from_tag(kind), data)
    }

    #[test]
    fn comment_requires_t1() {
        let data = json!({"name": "t1_a", "body": "hi"});
        assert!(decode_as_comment(&thing("t1", data.clone())).is_some());
        assert!(decode_as_comment(&thing("t3", data)).is_none());
    }

    #[test]
    fn link_requires_t3() {
        let data = json!({"name": "t3_a", "title": "hello"});
        assert_eq!(decode_as_link(&thing("t3", data.clone())).unwrap().title, "hello");
        assert!(decode_as_link(&thing("t1", data)).is_none());
    }

    #[test]
    fn malformed_data_is_dropped() {
        let bad = thing("t1", json!({"score": "not a number"}));
        assert!(decode_as_comment(&bad).is_none());
        assert!(decode_any(&bad).is_none());
    }

    #[test]
    fn unknown_kinds_decode_to_none() {
        for kind in ["t4", "t5", "t6", "t8", "Listing", "more", ""] {
            assert!(decode_any(&thing(kind, json!({}))).is_none(), "{kind}");
        }
    }

    #[test]
    fn account_dispatch() {
        let item = decode_any(&thing("t2", json!({"id": "1w72", "name": "spez"}))).unwrap();
        assert_eq!(item.kind(), Kind::Account);
        assert_eq!(item.as_account().unwrap().name, "spez");
    }

    #[test]
    fn mixed_listing_keeps_supported_children_in_order() {
        let raw = json!({
            "kind": "Listing",
            "data": {
                "after": "t3_c",
                "before": null,
                "children": [
                    {"kind": "t1", "data": {"name": "t1_a"}},
                    {"kind": "t3", "data": {"name": "t3_b"}},
                    {"kind": "t3", "data": {"name": "t3_c"}},
                    {"kind": "t9", "data": {"name": "t9_d"}}
                ]
            }
        });
        let encoded = serde_json::to_string(&raw).unwrap();
        let envelope: Thing = serde_json::from_str(&encoded).unwrap();
        let listing = Listing::try_from(envelope).unwrap();

        let items = decode_listing(&listing);
        let names: Vec<String> = items
            .iter()
            .map(|i| i.fullname().unwrap().to_string())
            .collect();
        assert_eq!(names, ["t1_a", "t3_b", "t3_c"]);
    }

    #[test]
    fn corrupt_child_does_not_abort_listing() {
        let listing = Listing {
            children: vec![
                thing("t3", json!({"name": "t3_a"})),
                thing("t3", json!({"num_comments": []})),
                thing("t3", json!({"name": "t3_c"})),
            ],
            ..Default::default()
        };
        assert_eq!(decode_listing(&listing).len(), 2);
    }

    #[test]
    fn children_with_bad_envelopes_are_dropped() {
        let bad_children = [
            json!({"data": {"name": "t3_b"}}),
            json!({"kind": null, "data": {"name": "t3_b"}}),
            json!({"kind": 3, "data": {}}),
            json!({"kind": "t3", "name": null, "id": 7, "data": {"name": "t3_b"}}),
            json!(42),
        ];

        for bad in bad_children {
            let raw = json!({
                "kind": "Listing",
                "data": {
                    "children": [
                        {"kind": "t3", "data": {"name": "t3_a"}},
                        bad.clone(),
                        {"kind": "t3", "data": {"name": "t3_c"}}
                    ]
                }
            });
            let envelope: Thing = serde_json::from_value(raw).unwrap();
            let listing = Listing::try_from(envelope).unwrap();

            let items = decode_listing(&listing);
            let valid = if bad.get("kind") == Some(&json!("t3")) { 3 } else { 2 };
            assert_eq!(items.len(), valid, "{bad}");
            assert_eq!(items[0].fullname().unwrap().as_str(), "t3_a", "{bad}");
            assert_eq!(items[valid - 1].fullname().unwrap().as_str(), "t3_c", "{bad}");
        }
    }

    #[test]
    fn null_children_is_an_empty_page() {
        let envelope: Thing =
            serde_json::from_value(json!({"kind": "Listing", "data": {"children": null}})).unwrap();
        assert!(Listing::try_from(envelope).unwrap().children.is_empty());
    }

    #[test]
    fn envelope_without_kind_is_a_kind_mismatch() {
        let envelope: Thing = serde_json::from_value(json!({"data": {"name": "spez"}})).unwrap();
        assert_eq!(envelope.kind, Kind::Unknown(String::new()));
        assert!(Listing::try_from(envelope).is_err());
    }
}
