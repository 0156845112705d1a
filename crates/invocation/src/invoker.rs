//! Receiver binding and invocation.

use std::sync::Arc;

use morph_primitives::{TypeDescriptor, Value};

use crate::error::{BindError, InvocationCause, InvocationError, Violation};
use crate::method::Method;

/// A method bound to its receiver (if it needs one), validated for invocation.
#[derive(Clone, Debug)]
pub struct Invoker {
	receiver: Option<Value>,
	method: Arc<Method>,
}

impl Invoker {
	/// Binds `receiver` to `method`.
	pub fn new(receiver: Option<Value>, method: Option<Arc<Method>>) -> Result<Self, BindError> {
		Self::with_checks(receiver, method, |_, _| {})
	}

	/// Binds `receiver` to `method`, running `extra` checks on the method as well.
	///
	/// All violations, from the binding checks and from `extra`, are collected before
	/// failing.
	pub fn with_checks<F>(
		receiver: Option<Value>,
		method: Option<Arc<Method>>,
		extra: F,
	) -> Result<Self, BindError>
	where
		F: FnOnce(&Method, &mut Vec<Violation>),
	{
		let mut violations = Vec::new();
		let Some(method) = method else {
			violations.push(Violation::MissingCallable);
			return Err(BindError {
				method: None,
				violations,
			});
		};

		check_binding(receiver.as_ref(), &method, &mut violations);
		extra(&method, &mut violations);

		if violations.is_empty() {
			Ok(Self { receiver, method })
		} else {
			Err(BindError {
				method: Some(method.qualified_name().into()),
				violations,
			})
		}
	}

	pub fn receiver(&self) -> Option<&Value> {
		self.receiver.as_ref()
	}

	pub fn method(&self) -> &Arc<Method> {
		&self.method
	}

	/// Calls the method with `args`.
	///
	/// Arguments are checked against the declared parameters first: primitive
	/// parameters accept their own kind or one that widens into it, reference
	/// parameters accept absence or an assignable runtime type. A primitive-kind result
	/// is cast to the declared kind.
	pub fn invoke(&self, args: Vec<Value>) -> Result<Value, InvocationError> {
		let method = &*self.method;
		let fail = |cause| InvocationError {
			method: method.qualified_name().into(),
			cause,
		};

		if !method.is_exported() {
			return Err(fail(InvocationCause::Inaccessible));
		}
		if args.len() != method.params().len() {
			return Err(fail(InvocationCause::ArgumentCount {
				expected: method.params().len(),
				found: args.len(),
			}));
		}

		let args = args
			.into_iter()
			.zip(method.params())
			.enumerate()
			.map(|(index, (arg, param))| coerce_argument(index, arg, param))
			.collect::<Result<Vec<_>, _>>()
			.map_err(fail)?;

		let result = method
			.call(self.receiver.as_ref(), &args)
			.map_err(|err| fail(InvocationCause::Raised(err)))?;

		coerce_result(result, method.returns()).map_err(fail)
	}
}

/// Receivers compare by value (primitives) or identity (objects).
impl PartialEq for Invoker {
	fn eq(&self, other: &Self) -> bool {
		self.receiver == other.receiver && self.method == other.method
	}
}

fn check_binding(receiver: Option<&Value>, method: &Method, violations: &mut Vec<Violation>) {
	let name = || -> Box<str> { method.qualified_name().into() };

	if !method.is_exported() {
		violations.push(Violation::InaccessibleCallable { method: name() });
	}
	match receiver {
		None if method.requires_receiver() => {
			violations.push(Violation::ReceiverRequired { method: name() });
		}
		None => {}
		Some(receiver) if !method.requires_receiver() || !method.accepts_receiver(receiver) => {
			violations.push(Violation::ReceiverIncompatible {
				method: name(),
				found: receiver.describe().into(),
			});
		}
		Some(_) => {}
	}
}

fn coerce_argument(index: usize, arg: Value, param: &TypeDescriptor) -> Result<Value, InvocationCause> {
	let mismatch = |found: String| InvocationCause::ArgumentType {
		index,
		expected: param.to_string().into(),
		found: found.into(),
	};
	if let Some(kind) = param.value_kind() {
		if arg.is_null() && !param.is_primitive() {
			return Ok(arg);
		}
		return match arg.kind() {
			Some(found) if kind.widens_from(found) => Ok(kind.cast(&arg)?),
			_ => Err(mismatch(arg.describe())),
		};
	}
	match arg.runtime_type() {
		None => Ok(arg),
		Some(found) if param.erasure().is_assignable_from(&found) => Ok(arg),
		Some(found) => Err(mismatch(found.to_string())),
	}
}

fn coerce_result(result: Value, returns: &TypeDescriptor) -> Result<Value, InvocationCause> {
	if let Some(kind) = returns.value_kind() {
		if result.is_null() && !returns.is_primitive() {
			return Ok(result);
		}
		return Ok(kind.cast(&result)?);
	}
	match result.runtime_type() {
		Some(found) if !returns.erasure().is_assignable_from(&found) => {
			Err(InvocationCause::ResultType {
				expected: returns.to_string().into(),
				found: found.to_string().into(),
			})
		}
		_ => Ok(result),
	}
}

#[cfg(test)]
mod tests;
