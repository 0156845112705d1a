//! Type-directed converter registry.
//!
//! Converters are single-argument methods keyed by a [`ConverterSignature`]. A
//! [`Dispatcher`] owns the live [`ConverterRegistry`], registers batches atomically,
//! and resolves a requested `(input, output)` pair to exactly one converter:
//!
//! - [`signature`]: signatures and their compatibility relation
//! - [`entry`]: validated, invokable converters
//! - [`registry`]: signature-keyed storage and staged batches
//! - [`dispatch`]: registration and conversion
//! - [`discover`]: converters from exported methods

pub mod discover;
pub mod dispatch;
pub mod entry;
pub mod error;
pub mod registry;
pub mod signature;

pub use discover::{Exports, Scan, scan};
pub use dispatch::{Dispatcher, DispatcherBuilder, DispatcherState, IntoRegistration, LookupPolicy};
pub use entry::ConverterEntry;
pub use error::{
	DiscoveryError, DispatchError, EntryError, PutError, RegistrationError, RegistrationFailure,
	Side, SignatureError,
};
pub use registry::{ConverterRegistry, InsertAction, StagedRegistry};
pub use signature::ConverterSignature;

#[cfg(test)]
pub(crate) mod test_fixtures;
