// SPDX-License-Identifier: GPL-3.0-or-later

//! Data model shared by every matchbook client variant.
//!
//! This crate holds pure value objects: matched assets and segments, license
//! policy data, fingerprint type masks, streaming events, catalog entries and
//! pagination cursors, plus the stable status-code taxonomy used by the
//! identification service. No I/O lives here.

pub mod asset;
pub mod catalog;
pub mod event;
pub mod policy;
pub mod search;
pub mod segment;
pub mod status;
pub mod types;

pub use asset::Asset;
pub use catalog::{CatalogEntry, CatalogPage, Cursor};
pub use event::StreamEvent;
pub use policy::{LicensePolicy, PolicyVerdict, Rightsholder, RightsholderPolicy, TerritoryPolicy};
pub use search::{
    LicenseSearchMatch, LicenseSearchResult, LookupId, MetadataSearchMatch, MetadataSearchResult,
    PrivateSearchMatch, PrivateSearchResult, RegistrySearchMatch, RegistrySearchResult,
};
pub use segment::{Segment, SegmentType};
pub use status::{RemoteStatus, StatusCode};
pub use types::FingerprintTypes;
