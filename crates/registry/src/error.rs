use morph_invocation::{BindError, BoxError, InvocationError, Violation};

use crate::entry::ConverterEntry;
use crate::signature::ConverterSignature;

/// Which side of a signature an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
	Input,
	Output,
}

impl core::fmt::Display for Side {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Input => f.write_str("input"),
			Self::Output => f.write_str("output"),
		}
	}
}

/// A signature could not be built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
	#[error("{side} type is missing")]
	Absent { side: Side },
	#[error("{side} type cannot be void")]
	Void { side: Side },
}

/// A converter entry failed validation. Every violation found is listed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(transparent)]
pub struct EntryError(#[from] BindError);

impl EntryError {
	/// Qualified name of the offending method, if one was supplied.
	pub fn method(&self) -> Option<&str> {
		self.0.method.as_deref()
	}

	pub fn violations(&self) -> &[Violation] {
		&self.0.violations
	}
}

/// Fatal errors from [`ConverterRegistry::put`](crate::ConverterRegistry::put).
#[derive(Debug, Clone, thiserror::Error)]
pub enum PutError {
	/// The key does not cover the entry's own signature.
	#[error("{signature} cannot hold a converter for {entry}")]
	Incompatible {
		signature: ConverterSignature,
		entry: ConverterSignature,
	},
	/// A different entry is already registered under an equal signature.
	#[error("{signature} is already served by {existing}, rejected {incoming}")]
	Collision {
		signature: ConverterSignature,
		existing: Box<ConverterEntry>,
		incoming: Box<ConverterEntry>,
	},
}

/// A converter source could not produce an entry.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
	/// One candidate was rejected; the source may continue.
	#[error(transparent)]
	Entry(#[from] EntryError),
	/// The source itself failed; nothing after this point is read.
	#[error("converter source failed: {0}")]
	Source(#[source] BoxError),
}

/// One item of a rejected registration batch.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationFailure {
	#[error(transparent)]
	Put(#[from] PutError),
	#[error(transparent)]
	Discovery(#[from] DiscoveryError),
}

/// A registration batch was rejected as a whole; the live registry is unchanged.
#[derive(Debug, thiserror::Error)]
#[error("{label}: rejected batch with {} failure(s): {}", .failures.len(), join(.failures))]
pub struct RegistrationError {
	pub label: &'static str,
	/// Failures in the order they were encountered.
	pub failures: Vec<RegistrationFailure>,
}

/// Lookup or invocation through a [`Dispatcher`](crate::Dispatcher) failed.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
	#[error(transparent)]
	Signature(#[from] SignatureError),
	#[error("{label}: no converter for {requested}")]
	NoCompatibleConverter {
		label: &'static str,
		requested: ConverterSignature,
	},
	#[error("{label}: {requested} is ambiguous between {}", join_candidates(.candidates))]
	TooManyConverters {
		label: &'static str,
		requested: ConverterSignature,
		/// Every compatible converter with the signature it is registered under, in
		/// registration order.
		candidates: Vec<(ConverterSignature, ConverterEntry)>,
	},
	#[error(transparent)]
	Invocation(#[from] InvocationError),
}

fn join_candidates(candidates: &[(ConverterSignature, ConverterEntry)]) -> String {
	candidates
		.iter()
		.map(|(signature, entry)| format!("{signature} ({entry})"))
		.collect::<Vec<_>>()
		.join("; ")
}

fn join<T: ToString>(items: &[T]) -> String {
	items
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}
