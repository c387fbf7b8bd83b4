// SPDX-License-Identifier: GPL-3.0-or-later

//! Asynchronous client for the matchbook content-identification service.
//!
//! Callers fingerprint a piece of media (see `matchbook-fingerprint`),
//! submit the fingerprint through one of the client variants, and retrieve
//! matches against the reference registry, license policy data, or their own
//! private catalog. Live media is handled by a pull-based streaming session.
//!
//! Variants: [`MetadataSearchClient`], [`LicenseSearchClient`],
//! [`PrivateSearchClient`] (which also exposes the [`CatalogManager`]) and
//! [`RegistrySearchClient`] (which also starts [`StreamSearchSession`]s).
//! Each variant authenticates once at connect time and reuses the session
//! for its whole lifetime. Operations on one session are serialized;
//! separate sessions proceed fully in parallel.
//!
//! The client never retries on its own: submitting a search is not
//! idempotent, so retry policy belongs to the caller.
//! [`ClientError::is_transient`] says when a retry is the prescribed remedy.

pub mod catalog;
pub mod config;
pub mod decode;
pub mod error;
pub mod fingerprinter;
pub mod future;
pub mod license;
pub mod metadata;
pub mod private;
pub mod registry;
pub mod session;
pub mod stream;

pub use catalog::CatalogManager;
pub use config::{ClientConfig, ClientCredentials};
pub use decode::DecodeCheck;
pub use error::{ClientError, Result};
pub use fingerprinter::Fingerprinter;
pub use future::SearchFuture;
pub use license::LicenseSearchClient;
pub use metadata::MetadataSearchClient;
pub use private::PrivateSearchClient;
pub use registry::RegistrySearchClient;
pub use session::{ClientBuilder, SessionKind};
pub use stream::StreamSearchSession;
