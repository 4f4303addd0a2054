//! Normalizers from raw entries to typed view-model entities.

use serde_json::Value;

use crate::fields::{first_string, get_bool, get_number, get_object, get_string, get_string_array};
use crate::lookup::{link_from_value, resolve_asset_url};
use crate::types::{
    CategoryCache, LookupTables, RawEntry, ResourceCategory, ResourceItem, ResourceMetric,
};

const DEFAULT_CATEGORY_TITLE: &str = "Category";
const DEFAULT_RESOURCE_NAME: &str = "Resource";
const DEFAULT_RESOURCE_TYPE: &str = "tool";
const DEFAULT_METRIC_LABEL: &str = "Metric";

/// Normalize a `resourceCategory` entry. `None` only when the entry or its id is absent.
pub fn to_category(entry: Option<&RawEntry>) -> Option<ResourceCategory> {
    let entry = entry?;
    let id = entry.id()?.to_string();
    let fields = &entry.fields;

    let slug = get_string(fields.get("slug"));
    Some(ResourceCategory {
        title: get_string(fields.get("internalName"))
            .or_else(|| slug.clone())
            .unwrap_or_else(|| DEFAULT_CATEGORY_TITLE.to_string()),
        slug: slug.unwrap_or_else(|| id.clone()),
        summary: get_string(fields.get("summary")),
        icon: get_string(fields.get("icon")),
        theme_color: get_string(fields.get("themeColor")),
        weight: get_number(fields.get("weight")),
        id,
    })
}

/// Normalize the free-form `metrics` object.
pub fn normalize_metric(raw: Option<&Value>) -> Option<ResourceMetric> {
    let metric = get_object(raw)?;
    let label = get_string(metric.get("label"));
    let value = get_string(metric.get("value"));

    let blank = |s: &Option<String>| s.as_deref().map_or(true, str::is_empty);
    if blank(&label) && blank(&value) {
        return None;
    }

    Some(ResourceMetric {
        label: label.unwrap_or_else(|| DEFAULT_METRIC_LABEL.to_string()),
        value: value.unwrap_or_default(),
        helper: first_string(metric, &["helper", "description"]),
    })
}

/// Normalize a `resourceEntry` entry, resolving its category and logo.
///
/// The category is looked up in `cache` first. On a miss it is resolved from
/// `lookup`, normalized, and stored in `cache`.
pub fn to_resource(
    entry: Option<&RawEntry>,
    lookup: &LookupTables,
    cache: &mut CategoryCache,
) -> Option<ResourceItem> {
    let entry = entry?;
    let id = entry.id()?.to_string();
    let fields = &entry.fields;

    let category_id = link_from_value(fields.get("category"))
        .and_then(|link| link.id().map(str::to_owned));
    let category = category_id
        .as_deref()
        .and_then(|category_id| resolve_category(category_id, lookup, cache));

    let logo = link_from_value(fields.get("logo"));
    let slug = get_string(fields.get("slug"));

    Some(ResourceItem {
        name: first_string(fields, &["internalName", "slug"])
            .unwrap_or_else(|| DEFAULT_RESOURCE_NAME.to_string()),
        slug: slug.unwrap_or_else(|| id.clone()),
        summary: get_string(fields.get("summary")),
        url: get_string(fields.get("url")).unwrap_or_default(),
        resource_type: get_string(fields.get("resourceType"))
            .unwrap_or_else(|| DEFAULT_RESOURCE_TYPE.to_string()),
        difficulty: get_string(fields.get("difficulty")),
        tags: get_string_array(fields.get("tags")),
        cta_label: get_string(fields.get("ctaLabel")),
        cta_url: get_string(fields.get("ctaUrl")),
        highlighted: get_bool(fields.get("highlighted")).unwrap_or(false),
        last_reviewed: get_string(fields.get("lastReviewed")),
        metrics: normalize_metric(fields.get("metrics")),
        logo_url: resolve_asset_url(logo.as_ref(), lookup),
        category_id,
        category,
        id,
    })
}

fn resolve_category(
    category_id: &str,
    lookup: &LookupTables,
    cache: &mut CategoryCache,
) -> Option<ResourceCategory> {
    if let Some(cached) = cache.get(category_id) {
        return Some(cached.clone());
    }

    let category = to_category(lookup.entries.get(category_id))?;
    cache.insert(category_id.to_string(), category.clone());
    Some(category)
}
