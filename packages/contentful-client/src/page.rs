//! Resource landing page assembly.
//!
//! Two sequential requests per page: the landing entry (with its linked
//! categories and featured resources), then the resource set for the
//! resolved categories. Either failure aborts the whole page.

use std::cmp::Ordering;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ContentfulError, Result};
use crate::fields::get_string;
use crate::filters::{extract_filter_groups, normalize_filter_groups};
use crate::lookup::{build_lookup_tables, links_from_value, resolve_entry};
use crate::source::{EntriesQuery, EntrySource};
use crate::transform::{to_category, to_resource};
use crate::types::{
    CategoryCache, FetchOptions, LookupTables, ResourceCategory, ResourceItem,
    ResourceLandingPage,
};

pub const LANDING_PAGE_CONTENT_TYPE: &str = "resourceLandingPage";
pub const RESOURCE_CONTENT_TYPE: &str = "resourceEntry";
pub const LANDING_INCLUDE_DEPTH: u8 = 3;
pub const RESOURCE_INCLUDE_DEPTH: u8 = 2;
pub const RESOURCE_LIMIT: u32 = 1000;
const DEFAULT_PAGE_TITLE: &str = "Resources";

/// Landing page query for `slug`.
pub fn landing_query(slug: &str) -> EntriesQuery {
    EntriesQuery::new(LANDING_PAGE_CONTENT_TYPE)
        .slug(slug)
        .include(LANDING_INCLUDE_DEPTH)
        .limit(1)
}

/// Resource set query. With no category ids the query is unfiltered and
/// returns every resource entry.
pub fn resources_query(categories: &[ResourceCategory]) -> EntriesQuery {
    EntriesQuery::new(RESOURCE_CONTENT_TYPE)
        .include(RESOURCE_INCLUDE_DEPTH)
        .limit(RESOURCE_LIMIT)
        .category_ids(categories.iter().map(|c| c.id.clone()).collect())
}

/// Order by `weight` (missing counts as 0), then by `title` ignoring case.
/// Titles equal under case folding fall back to byte order.
pub fn sort_categories(categories: &mut [ResourceCategory]) {
    categories.sort_by(compare_categories);
}

fn compare_categories(a: &ResourceCategory, b: &ResourceCategory) -> Ordering {
    // partial_cmp treats -0.0 and 0.0 as equal; NaN weights tie
    a.weight
        .unwrap_or(0.0)
        .partial_cmp(&b.weight.unwrap_or(0.0))
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
}

/// Resolve the landing entry's `categories` links into sorted categories.
pub fn resolve_categories(fields: &Map<String, Value>, lookup: &LookupTables) -> Vec<ResourceCategory> {
    let mut categories: Vec<_> = links_from_value(fields.get("categories"))
        .iter()
        .filter_map(|link| to_category(resolve_entry(Some(link), lookup)))
        .collect();
    sort_categories(&mut categories);
    categories
}

/// Resolve the landing entry's `featuredResources` links, dropping undisplayable ones.
pub fn resolve_featured_resources(
    fields: &Map<String, Value>,
    lookup: &LookupTables,
    cache: &mut CategoryCache,
) -> Vec<ResourceItem> {
    links_from_value(fields.get("featuredResources"))
        .iter()
        .filter_map(|link| to_resource(resolve_entry(Some(link), lookup), lookup, cache))
        .filter(ResourceItem::is_displayable)
        .collect()
}

/// Fetch and normalize the landing page for `slug`.
pub async fn assemble_resource_page<S>(
    source: &S,
    slug: &str,
    options: FetchOptions,
) -> Result<ResourceLandingPage>
where
    S: EntrySource + ?Sized,
{
    let landing_response = source.fetch_entries(&landing_query(slug), options).await?;

    let landing_entry = landing_response
        .items
        .first()
        .ok_or_else(|| ContentfulError::NotFound {
            slug: slug.to_string(),
        })?;
    let landing_id = landing_entry
        .id()
        .ok_or_else(|| {
            ContentfulError::MalformedResponse("Landing page entry is missing a sys.id".into())
        })?
        .to_string();

    let landing_lookup = build_lookup_tables(&landing_response);
    let fields = &landing_entry.fields;

    let categories = resolve_categories(fields, &landing_lookup);
    let mut category_cache: CategoryCache = categories
        .iter()
        .map(|category| (category.id.clone(), category.clone()))
        .collect();

    let featured_resources =
        resolve_featured_resources(fields, &landing_lookup, &mut category_cache);

    debug!(
        landing_id = %landing_id,
        categories = categories.len(),
        featured = featured_resources.len(),
        "Resolved landing page links"
    );

    let resource_response = source
        .fetch_entries(&resources_query(&categories), options)
        .await?;
    let resource_lookup = build_lookup_tables(&resource_response);

    let resources: Vec<ResourceItem> = resource_response
        .items
        .iter()
        .filter_map(|entry| to_resource(Some(entry), &resource_lookup, &mut category_cache))
        .filter(ResourceItem::is_displayable)
        .collect();

    let filter_groups = normalize_filter_groups(&extract_filter_groups(fields.get("filterGroups")));

    info!(
        slug,
        preview = options.preview,
        resources = resources.len(),
        filter_groups = filter_groups.len(),
        "Assembled resource landing page"
    );

    let text = |key: &str| get_string(fields.get(key));
    Ok(ResourceLandingPage {
        id: landing_id,
        slug: text("slug").unwrap_or_else(|| slug.to_string()),
        hero_eyebrow: text("heroEyebrow"),
        title: text("title").unwrap_or_else(|| DEFAULT_PAGE_TITLE.to_string()),
        subtitle: text("subtitle"),
        helper_text: text("helperText"),
        primary_cta_label: text("primaryCtaLabel"),
        primary_cta_url: text("primaryCtaUrl"),
        secondary_cta_label: text("secondaryCtaLabel"),
        secondary_cta_url: text("secondaryCtaUrl"),
        seo_description: text("seoDescription"),
        last_updated: text("lastUpdated"),
        featured_resources,
        resources,
        categories,
        filter_groups,
    })
}
