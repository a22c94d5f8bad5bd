//! Demographic enrichment for Roster.
//!
//! A [`Lookup`] resolves one attribute (age, gender, nationality) for a given
//! name; [`HttpLookup`] does so against the public inference services. The
//! [`Enricher`] runs the three lookups in a fixed order and stops at the first
//! failure, so a draft is either fully enriched or not enriched at all.

pub mod enricher;
pub mod error;
pub mod http;
pub mod lookup;

pub use enricher::{Enricher, Enrichment};
pub use error::{EnrichError, LookupError};
pub use http::{Endpoints, HttpLookup};
pub use lookup::{AttributeKind, Lookup, LookupValue};
