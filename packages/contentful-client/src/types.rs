//! Contentful wire types and the normalized resource view model.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// =============================================================================
// Wire types (Content Delivery API)
// =============================================================================

/// Deserialize `T`, falling back to its default on `null` or a mismatched shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize an array element by element. Malformed elements become
/// defaults; a non-array yields an empty list.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// `sys` block carried by every entry and asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
}

/// A raw entry: system metadata plus an untyped field bag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub sys: Option<Sys>,
    #[serde(default, deserialize_with = "lenient")]
    pub fields: Map<String, Value>,
}

impl RawEntry {
    /// The entry's system id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        non_empty_id(self.sys.as_ref())
    }

    /// Look up a single field by content-model name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFile {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, deserialize_with = "lenient")]
    pub file: Option<AssetFile>,
}

/// A raw asset. Only the file url is consumed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAsset {
    #[serde(default, deserialize_with = "lenient")]
    pub sys: Option<Sys>,
    #[serde(default, deserialize_with = "lenient")]
    pub fields: Option<AssetFields>,
}

impl RawAsset {
    pub fn id(&self) -> Option<&str> {
        non_empty_id(self.sys.as_ref())
    }

    pub fn file_url(&self) -> Option<&str> {
        self.fields
            .as_ref()
            .and_then(|f| f.file.as_ref())
            .and_then(|f| f.url.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkSys {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, rename = "linkType", deserialize_with = "lenient")]
    pub link_type: Option<String>,
}

/// A typed reference (`{ sys: { id, linkType } }`) to an entry or asset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "lenient")]
    pub sys: Option<LinkSys>,
}

impl Link {
    /// Build an entry link to `id`.
    pub fn entry(id: impl Into<String>) -> Self {
        Self {
            sys: Some(LinkSys {
                id: Some(id.into()),
                link_type: Some("Entry".to_string()),
            }),
        }
    }

    /// The linked id, if present and non-empty.
    pub fn id(&self) -> Option<&str> {
        self.sys
            .as_ref()
            .and_then(|s| s.id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Linked entries and assets returned alongside `items`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Entry", deserialize_with = "lenient_seq")]
    pub entry: Vec<RawEntry>,
    #[serde(default, rename = "Asset", deserialize_with = "lenient_seq")]
    pub asset: Vec<RawAsset>,
}

/// Response body of `GET /entries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntriesResponse {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Vec<RawEntry>,
    #[serde(default, deserialize_with = "lenient")]
    pub includes: Option<Includes>,
}

fn non_empty_id(sys: Option<&Sys>) -> Option<&str> {
    sys.and_then(|s| s.id.as_deref()).filter(|id| !id.is_empty())
}

// =============================================================================
// Lookup tables
// =============================================================================

/// Entries and assets of one response, keyed by system id.
#[derive(Debug, Clone, Default)]
pub struct LookupTables {
    pub entries: HashMap<String, RawEntry>,
    pub assets: HashMap<String, RawAsset>,
}

/// Categories already normalized during one page assembly, keyed by id.
pub type CategoryCache = HashMap<String, ResourceCategory>;

// =============================================================================
// View model
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceCategory {
    pub id: String,
    pub slug: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetric {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper: Option<String>,
}

/// A normalized resource. An empty `url` means the resource is not displayable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceItem {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub url: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(default)]
    pub highlighted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ResourceMetric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ResourceCategory>,
}

impl ResourceItem {
    pub fn is_displayable(&self) -> bool {
        !self.url.is_empty()
    }
}

/// Resource field a filter group narrows on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterField {
    #[default]
    ResourceType,
    Difficulty,
    Tags,
}

impl FilterField {
    /// Parse a content-model field name. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "resourceType" => Some(Self::ResourceType),
            "difficulty" => Some(Self::Difficulty),
            "tags" => Some(Self::Tags),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceType => "resourceType",
            Self::Difficulty => "difficulty",
            Self::Tags => "tags",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub id: String,
    pub title: String,
    pub field: FilterField,
    pub options: Vec<String>,
}

/// The fully resolved landing page handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLandingPage {
    pub id: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_eyebrow: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_cta_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_cta_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub featured_resources: Vec<ResourceItem>,
    pub resources: Vec<ResourceItem>,
    pub categories: Vec<ResourceCategory>,
    pub filter_groups: Vec<FilterGroup>,
}

/// Per-request fetch options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Read draft content from the Preview API.
    pub preview: bool,
}
