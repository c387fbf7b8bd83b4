// SPDX-License-Identifier: GPL-3.0-or-later

//! Fingerprint handles and the extraction-engine seam.
//!
//! A fingerprint is how the client identifies a piece of digital content. It
//! is produced by an extraction engine from a media file or an in-memory
//! buffer, optionally restricted to a subset of fingerprint types, and can be
//! serialized with [`Fingerprint::dump`] and restored with
//! [`Fingerprint::load`] with full round-trip fidelity.

pub mod engine;
pub mod error;
pub mod fingerprint;

pub use engine::{DigestEngine, FingerprintEngine};
pub use error::{FingerprintError, Result};
pub use fingerprint::Fingerprint;
