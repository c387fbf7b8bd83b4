// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-variant search results.
//!
//! Each search variant returns its own result shape; match ordering within a
//! result follows the service response order with no client-side resort.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::asset::Asset;
use crate::policy::TerritoryPolicy;
use crate::segment::Segment;

/// Server-assigned handle for one pending or completed search sub-job.
/// Opaque; useful for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LookupId(pub String);

impl std::fmt::Display for LookupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LookupId {
    fn from(value: &str) -> Self {
        LookupId(value.to_string())
    }
}

/// Result of a metadata search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSearchResult {
    pub lookup_id: LookupId,
    pub matches: Vec<MetadataSearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataSearchMatch {
    pub asset: Asset,
    pub segments: Vec<Segment>,
}

/// Result of a license search, carrying per-territory policy data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseSearchResult {
    pub lookup_id: LookupId,
    /// Identifies the user-generated content this search was run for.
    pub ugc_id: u64,
    pub matches: Vec<LicenseSearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseSearchMatch {
    pub asset: Asset,
    pub segments: Vec<Segment>,
    /// Keyed by ISO 3166-1 alpha-2 territory code.
    pub policies: HashMap<String, TerritoryPolicy>,
}

/// Result of a search against the caller's private catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateSearchResult {
    pub lookup_id: LookupId,
    pub matches: Vec<PrivateSearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrivateSearchMatch {
    /// The caller-chosen ID supplied at ingestion time.
    pub provided_id: String,
    pub segments: Vec<Segment>,
}

/// Result of an aggregate search against the full reference registry. One
/// submission may fan out into several sub-jobs, one lookup ID each; their
/// results arrive merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySearchResult {
    pub lookup_ids: Vec<LookupId>,
    pub matches: Vec<RegistrySearchMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySearchMatch {
    pub asset: Asset,
    pub segments: Vec<Segment>,
}
