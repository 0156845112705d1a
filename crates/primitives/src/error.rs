use crate::kind::ValueKind;

/// Errors raised while building type descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
	/// The number of type arguments does not match the declaration.
	#[error("{ty} takes {expected} type argument(s), got {found}")]
	Arity {
		ty: Box<str>,
		expected: usize,
		found: usize,
	},
	/// Type arguments were applied to a primitive.
	#[error("{ty} is not a generic type")]
	NotGeneric { ty: Box<str> },
}

/// A value could not be cast to a [`ValueKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot cast {found} to {target}")]
pub struct CastError {
	/// The requested kind.
	pub target: ValueKind,
	/// Description of the offending value.
	pub found: Box<str>,
}
