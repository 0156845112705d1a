use morph_primitives::CastError;

use crate::method::BoxError;

/// One structural problem found while binding a receiver to a method.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
	/// No method was supplied.
	#[error("no callable supplied")]
	MissingCallable,
	/// The method is not exported.
	#[error("`{method}` is not exported")]
	InaccessibleCallable { method: Box<str> },
	/// An instance method was bound without a receiver.
	#[error("`{method}` needs a receiver")]
	ReceiverRequired { method: Box<str> },
	/// The receiver is not an instance of the declaring type, or the method is static.
	#[error("`{method}` cannot be bound to {found}")]
	ReceiverIncompatible { method: Box<str>, found: Box<str> },
	/// A converter must take exactly one parameter.
	#[error("`{method}` takes {found} parameter(s), expected exactly one")]
	WrongParameterCount { method: Box<str>, found: usize },
	/// The parameter type is void or mentions a type variable.
	#[error("`{method}` has unusable parameter type {ty}")]
	InvalidParameterType { method: Box<str>, ty: Box<str> },
	/// The return type is void or mentions a type variable.
	#[error("`{method}` has unusable return type {ty}")]
	InvalidReturnType { method: Box<str>, ty: Box<str> },
}

/// Binding failed; carries every violation found, in check order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot bind {}: {}", .method.as_deref().unwrap_or("<missing>"), join(.violations))]
pub struct BindError {
	/// Qualified method name, when a method was supplied.
	pub method: Option<Box<str>>,
	pub violations: Vec<Violation>,
}

fn join(violations: &[Violation]) -> String {
	violations
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join("; ")
}

/// Why an invocation failed.
#[derive(Debug, thiserror::Error)]
pub enum InvocationCause {
	#[error("expected {expected} argument(s), got {found}")]
	ArgumentCount { expected: usize, found: usize },
	#[error("argument {index} ({found}) is not assignable to {expected}")]
	ArgumentType {
		index: usize,
		expected: Box<str>,
		found: Box<str>,
	},
	#[error("returned {found}, declared {expected}")]
	ResultType { expected: Box<str>, found: Box<str> },
	#[error(transparent)]
	Cast(#[from] CastError),
	#[error("target is not exported")]
	Inaccessible,
	/// The method body returned an error.
	#[error("{0}")]
	Raised(#[source] BoxError),
}

/// A bound method failed while being invoked. The original cause is kept as `source()`.
#[derive(Debug, thiserror::Error)]
#[error("invoking `{method}` failed: {cause}")]
pub struct InvocationError {
	pub method: Box<str>,
	#[source]
	pub cause: InvocationCause,
}
