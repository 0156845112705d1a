//! Converter signatures: the `(input, output)` pair a converter is keyed by.
//!
//! Signatures compare by mutual assignability, so `int -> String` and
//! `Integer -> String` are the same key. Hashing follows suit: a side that belongs to
//! a [`ValueKind`] hashes as that kind, any other side hashes as its erasure.
//!
//! [`ValueKind`]: morph_primitives::ValueKind

use std::hash::{Hash, Hasher};

use morph_primitives::TypeDescriptor;

use crate::error::{Side, SignatureError};

/// What a converter consumes and what it produces.
#[derive(Clone)]
pub struct ConverterSignature {
	input: TypeDescriptor,
	output: TypeDescriptor,
}

impl ConverterSignature {
	/// Builds a signature. Neither side may be `void`.
	pub fn new(input: TypeDescriptor, output: TypeDescriptor) -> Result<Self, SignatureError> {
		if input.is_void() {
			return Err(SignatureError::Void { side: Side::Input });
		}
		if output.is_void() {
			return Err(SignatureError::Void { side: Side::Output });
		}
		Ok(Self { input, output })
	}

	/// Builds a signature from sides that may be missing.
	pub fn from_optional(
		input: Option<TypeDescriptor>,
		output: Option<TypeDescriptor>,
	) -> Result<Self, SignatureError> {
		let input = input.ok_or(SignatureError::Absent { side: Side::Input })?;
		let output = output.ok_or(SignatureError::Absent { side: Side::Output })?;
		Self::new(input, output)
	}

	/// Sides already known to be non-void.
	pub(crate) fn from_checked(input: TypeDescriptor, output: TypeDescriptor) -> Self {
		debug_assert!(!input.is_void() && !output.is_void());
		Self { input, output }
	}

	pub fn input(&self) -> &TypeDescriptor {
		&self.input
	}

	pub fn output(&self) -> &TypeDescriptor {
		&self.output
	}

	/// Returns true if a converter registered under `self` may serve a request for
	/// `other`.
	///
	/// Both sides are tested in the same direction: `self.input` must accept
	/// `other.input` and `self.output` must accept `other.output`.
	pub fn is_assignable_from(&self, other: &ConverterSignature) -> bool {
		self.input.is_assignable_from(&other.input) && self.output.is_assignable_from(&other.output)
	}
}

impl PartialEq for ConverterSignature {
	fn eq(&self, other: &Self) -> bool {
		self.is_assignable_from(other) && other.is_assignable_from(self)
	}
}

impl Eq for ConverterSignature {}

impl Hash for ConverterSignature {
	fn hash<H: Hasher>(&self, state: &mut H) {
		hash_side(&self.input, state);
		hash_side(&self.output, state);
	}
}

fn hash_side<H: Hasher>(ty: &TypeDescriptor, state: &mut H) {
	match ty.value_kind() {
		Some(kind) => kind.hash(state),
		None => ty.erasure().hash(state),
	}
}

impl core::fmt::Debug for ConverterSignature {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "ConverterSignature({self})")
	}
}

impl core::fmt::Display for ConverterSignature {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{} -> {}", self.input, self.output)
	}
}
