//! Lookup tables and link resolution for one API response.
//!
//! A dangling link (missing id, or an id absent from the response) resolves to
//! `None`. Callers drop the referencing item rather than failing.

use serde_json::Value;

use crate::types::{EntriesResponse, Link, LookupTables, RawEntry};

/// Index `items` and `includes.Entry` (in that order) plus `includes.Asset` by id.
///
/// Later duplicates overwrite earlier ones. Elements without an id are skipped.
pub fn build_lookup_tables(response: &EntriesResponse) -> LookupTables {
    let mut lookup = LookupTables::default();

    let included_entries = response.includes.iter().flat_map(|inc| inc.entry.iter());
    for entry in response.items.iter().chain(included_entries) {
        if let Some(id) = entry.id() {
            lookup.entries.insert(id.to_string(), entry.clone());
        }
    }

    for asset in response.includes.iter().flat_map(|inc| inc.asset.iter()) {
        if let Some(id) = asset.id() {
            lookup.assets.insert(id.to_string(), asset.clone());
        }
    }

    lookup
}

pub fn resolve_entry<'a>(link: Option<&Link>, lookup: &'a LookupTables) -> Option<&'a RawEntry> {
    let id = link?.id()?;
    lookup.entries.get(id)
}

/// Resolve an asset link to an absolute file url.
///
/// Protocol-relative urls (`//images...`) are qualified with `https:`.
pub fn resolve_asset_url(link: Option<&Link>, lookup: &LookupTables) -> Option<String> {
    let id = link?.id()?;
    let url = lookup.assets.get(id)?.file_url()?;
    if url.is_empty() {
        return None;
    }

    if url.starts_with("http") {
        Some(url.to_string())
    } else {
        Some(format!("https:{url}"))
    }
}

/// Read a field value as a link. Only JSON objects qualify.
pub fn link_from_value(value: Option<&Value>) -> Option<Link> {
    match value {
        Some(v @ Value::Object(_)) => serde_json::from_value(v.clone()).ok(),
        _ => None,
    }
}

/// Read a field value as an array of links, skipping elements that are not links.
pub fn links_from_value(value: Option<&Value>) -> Vec<Link> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| link_from_value(Some(item)))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: Value) -> EntriesResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_lookup_counts_distinct_ids_across_items_and_includes() {
        let lookup = build_lookup_tables(&response(json!({
            "items": [{ "sys": { "id": "a" } }, { "sys": { "id": "b" } }],
            "includes": {
                "Entry": [{ "sys": { "id": "c" } }],
                "Asset": [{ "sys": { "id": "logo" }, "fields": { "file": { "url": "//x.png" } } }]
            }
        })));

        assert_eq!(lookup.entries.len(), 3);
        assert_eq!(lookup.assets.len(), 1);
    }

    #[test]
    fn test_lookup_skips_missing_ids_and_last_write_wins() {
        let lookup = build_lookup_tables(&response(json!({
            "items": [
                { "fields": { "slug": "orphan" } },
                { "sys": { "id": "a" }, "fields": { "slug": "first" } }
            ],
            "includes": { "Entry": [{ "sys": { "id": "a" }, "fields": { "slug": "second" } }] }
        })));

        assert_eq!(lookup.entries.len(), 1);
        assert_eq!(lookup.entries["a"].field("slug"), Some(&json!("second")));
    }

    #[test]
    fn test_resolve_entry_absent_links() {
        let lookup = build_lookup_tables(&response(json!({
            "items": [{ "sys": { "id": "a" } }]
        })));

        assert!(resolve_entry(None, &lookup).is_none());
        assert!(resolve_entry(Some(&Link::default()), &lookup).is_none());
        let empty_sys: Link = serde_json::from_value(json!({ "sys": {} })).unwrap();
        assert!(resolve_entry(Some(&empty_sys), &lookup).is_none());
        assert!(resolve_entry(Some(&Link::entry("missing")), &lookup).is_none());
        assert!(resolve_entry(Some(&Link::entry("a")), &lookup).is_some());
    }

    #[test]
    fn test_resolve_asset_url_qualifies_protocol_relative() {
        let lookup = build_lookup_tables(&response(json!({
            "items": [],
            "includes": { "Asset": [
                { "sys": { "id": "rel" }, "fields": { "file": { "url": "//images.ctfassets.net/x.png" } } },
                { "sys": { "id": "abs" }, "fields": { "file": { "url": "http://cdn.example.com/y.png" } } },
                { "sys": { "id": "nofile" }, "fields": {} }
            ] }
        })));

        let link = |id: &str| link_from_value(Some(&json!({ "sys": { "id": id, "linkType": "Asset" } })));

        assert_eq!(
            resolve_asset_url(link("rel").as_ref(), &lookup).as_deref(),
            Some("https://images.ctfassets.net/x.png")
        );
        assert_eq!(
            resolve_asset_url(link("abs").as_ref(), &lookup).as_deref(),
            Some("http://cdn.example.com/y.png")
        );
        assert_eq!(resolve_asset_url(link("nofile").as_ref(), &lookup), None);
        assert_eq!(resolve_asset_url(link("gone").as_ref(), &lookup), None);
    }

    #[test]
    fn test_links_from_value_skips_non_objects() {
        let links = links_from_value(Some(&json!([
            { "sys": { "id": "a" } },
            "b",
            null,
            { "sys": { "id": "c" } }
        ])));
        let ids: Vec<_> = links.iter().filter_map(Link::id).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(links_from_value(Some(&json!({ "sys": { "id": "a" } }))).is_empty());
    }
}
