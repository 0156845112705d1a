//! The dispatcher: batch registration and type-directed conversion.
//!
//! # Role
//!
//! [`Dispatcher`] owns one live [`ConverterRegistry`]. Registration stages a batch in a
//! [`StagedRegistry`] and commits it only if every item was accepted. Conversion looks
//! up an exact signature first and falls back to a scan for compatible ones.
//!
//! # State
//!
//! A dispatcher is [`DispatcherState::Empty`] until a batch commits at least one
//! entry, and returns to it when the last entry is unregistered.

use morph_primitives::{TypeDescriptor, Value};

use crate::discover::{self, Exports};
use crate::entry::ConverterEntry;
use crate::error::{
	DiscoveryError, DispatchError, RegistrationError, RegistrationFailure, Side, SignatureError,
};
use crate::registry::{ConverterRegistry, StagedRegistry};
use crate::signature::ConverterSignature;

/// How [`Dispatcher::find`] resolves a request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LookupPolicy {
	/// Exact signature first, then a scan for a unique compatible one.
	#[default]
	ExactThenCompatible,
	/// Only signatures equal to the request resolve.
	ExactOnly,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatcherState {
	Empty,
	Populated,
}

/// Something that can be registered: an entry under its own signature, or an
/// explicit `(signature, entry)` pair.
pub trait IntoRegistration {
	fn into_registration(self) -> (ConverterSignature, ConverterEntry);
}

impl IntoRegistration for ConverterEntry {
	fn into_registration(self) -> (ConverterSignature, ConverterEntry) {
		(self.signature().clone(), self)
	}
}

impl IntoRegistration for (ConverterSignature, ConverterEntry) {
	fn into_registration(self) -> (ConverterSignature, ConverterEntry) {
		self
	}
}

/// Builder for [`Dispatcher`].
#[derive(Clone, Debug)]
pub struct DispatcherBuilder {
	label: &'static str,
	lookup: LookupPolicy,
}

impl Default for DispatcherBuilder {
	fn default() -> Self {
		Self {
			label: "converters",
			lookup: LookupPolicy::default(),
		}
	}
}

impl DispatcherBuilder {
	/// Name attached to log events and errors.
	pub fn label(mut self, label: &'static str) -> Self {
		self.label = label;
		self
	}

	pub fn lookup(mut self, policy: LookupPolicy) -> Self {
		self.lookup = policy;
		self
	}

	pub fn build(self) -> Dispatcher {
		Dispatcher {
			label: self.label,
			lookup: self.lookup,
			registry: ConverterRegistry::new(),
		}
	}
}

/// Registers converters and dispatches conversions to them.
#[derive(Debug)]
pub struct Dispatcher {
	label: &'static str,
	lookup: LookupPolicy,
	registry: ConverterRegistry,
}

impl Default for Dispatcher {
	fn default() -> Self {
		Self::builder().build()
	}
}

impl Dispatcher {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn builder() -> DispatcherBuilder {
		DispatcherBuilder::default()
	}

	pub fn label(&self) -> &'static str {
		self.label
	}

	pub fn lookup_policy(&self) -> LookupPolicy {
		self.lookup
	}

	/// Registers a batch atomically.
	///
	/// A rejected candidate ([`DiscoveryError::Entry`]) or a failed insertion is
	/// recorded and the batch continues; a [`DiscoveryError::Source`] is recorded and
	/// ends the batch. If anything was recorded the whole batch is rejected and the
	/// live registry is left untouched. Returns the number of newly inserted entries.
	pub fn register<I, R>(&mut self, items: I) -> Result<usize, RegistrationError>
	where
		I: IntoIterator<Item = Result<R, DiscoveryError>>,
		R: IntoRegistration,
	{
		let mut staged = StagedRegistry::new(&self.registry);
		let mut failures = Vec::new();

		for item in items {
			match item {
				Ok(item) => {
					let (signature, entry) = item.into_registration();
					if let Err(err) = staged.put(signature, entry) {
						failures.push(RegistrationFailure::Put(err));
					}
				}
				Err(err @ DiscoveryError::Source(_)) => {
					failures.push(RegistrationFailure::Discovery(err));
					break;
				}
				Err(err) => failures.push(RegistrationFailure::Discovery(err)),
			}
		}

		if !failures.is_empty() {
			tracing::warn!(
				label = self.label,
				failures = failures.len(),
				"rejected converter batch"
			);
			return Err(RegistrationError {
				label: self.label,
				failures,
			});
		}

		let staged = staged.into_staged();
		let inserted = self.registry.absorb(staged);
		tracing::debug!(
			label = self.label,
			inserted,
			total = self.registry.len(),
			"committed converter batch"
		);
		Ok(inserted)
	}

	/// Registers already built entries under their own signatures.
	pub fn register_entries<I>(&mut self, entries: I) -> Result<usize, RegistrationError>
	where
		I: IntoIterator<Item = ConverterEntry>,
	{
		self.register(entries.into_iter().map(Ok::<_, DiscoveryError>))
	}

	/// Registers every converter method `exports` exposes.
	pub fn register_exports<E: Exports + ?Sized>(
		&mut self,
		exports: &E,
	) -> Result<usize, RegistrationError> {
		self.register(discover::scan(exports))
	}

	/// Removes the entry registered under `signature`.
	pub fn unregister(&mut self, signature: &ConverterSignature) -> Option<ConverterEntry> {
		let removed = self.registry.remove(signature);
		if let Some(entry) = &removed {
			tracing::debug!(
				label = self.label,
				%signature,
				%entry,
				remaining = self.registry.len(),
				"unregistered converter"
			);
		}
		removed
	}

	pub fn is_registered(&self, signature: &ConverterSignature) -> bool {
		self.registry.contains_key(signature)
	}

	pub fn state(&self) -> DispatcherState {
		if self.registry.is_empty() {
			DispatcherState::Empty
		} else {
			DispatcherState::Populated
		}
	}

	pub fn len(&self) -> usize {
		self.registry.len()
	}

	pub fn is_empty(&self) -> bool {
		self.registry.is_empty()
	}

	/// The live registry.
	pub fn registry(&self) -> &ConverterRegistry {
		&self.registry
	}

	/// Resolves the converter that serves `requested`.
	pub fn find(&self, requested: &ConverterSignature) -> Result<&ConverterEntry, DispatchError> {
		if let Some(entry) = self.registry.get(requested) {
			tracing::trace!(label = self.label, %requested, "exact converter hit");
			return Ok(entry);
		}

		let no_match = || DispatchError::NoCompatibleConverter {
			label: self.label,
			requested: requested.clone(),
		};
		if self.lookup == LookupPolicy::ExactOnly {
			return Err(no_match());
		}

		let candidates = self.registry.compatible(requested);
		tracing::trace!(
			label = self.label,
			%requested,
			candidates = candidates.len(),
			"scanned for compatible converters"
		);
		if let [(_, entry)] = candidates[..] {
			return Ok(entry);
		}
		if candidates.is_empty() {
			return Err(no_match());
		}
		Err(DispatchError::TooManyConverters {
			label: self.label,
			requested: requested.clone(),
			candidates: candidates
				.into_iter()
				.map(|(signature, entry)| (signature.clone(), entry.clone()))
				.collect(),
		})
	}

	/// Converts `value` to `to`, taking the input type from the value itself.
	///
	/// `Value::Null` has no runtime type and cannot be converted this way.
	pub fn convert(&self, value: Value, to: &TypeDescriptor) -> Result<Value, DispatchError> {
		let from = value
			.runtime_type()
			.ok_or(SignatureError::Absent { side: Side::Input })?;
		self.convert_from(value, &from, to)
	}

	/// Converts `value`, declared as `from`, to `to`.
	pub fn convert_from(
		&self,
		value: Value,
		from: &TypeDescriptor,
		to: &TypeDescriptor,
	) -> Result<Value, DispatchError> {
		let requested = ConverterSignature::new(from.clone(), to.clone())?;
		let entry = self.find(&requested)?;
		Ok(entry.invoke(value)?)
	}
}
