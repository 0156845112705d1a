//! Validated, invokable converters.

use std::sync::Arc;

use morph_invocation::{BindError, InvocationError, Invoker, Method, Violation};
use morph_primitives::Value;

use crate::error::EntryError;
use crate::signature::ConverterSignature;

/// A single-argument method bound to its receiver, together with the signature it
/// derives.
#[derive(Clone, Debug)]
pub struct ConverterEntry {
	invoker: Invoker,
	signature: ConverterSignature,
}

impl ConverterEntry {
	/// Validates `method` as a converter and binds `receiver` to it.
	///
	/// Binding checks come first, then the converter shape: exactly one parameter, and
	/// neither the parameter nor the return type may be `void` or mention a type
	/// variable. All violations are reported together.
	pub fn new(receiver: Option<Value>, method: Option<Arc<Method>>) -> Result<Self, EntryError> {
		let mut derived = Err(Vec::new());
		let invoker = Invoker::with_checks(receiver, method, |method, violations| {
			derived = signature_of(method);
			if let Err(found) = &derived {
				violations.extend(found.iter().cloned());
			}
		})?;

		// Binding only succeeds when the shape checks found nothing.
		let signature = derived.map_err(|violations| BindError {
			method: Some(invoker.method().qualified_name().into()),
			violations,
		})?;

		Ok(Self { invoker, signature })
	}

	/// The signature derived from the method's parameter and return types.
	pub fn signature(&self) -> &ConverterSignature {
		&self.signature
	}

	pub fn receiver(&self) -> Option<&Value> {
		self.invoker.receiver()
	}

	pub fn method(&self) -> &Arc<Method> {
		self.invoker.method()
	}

	pub fn invoker(&self) -> &Invoker {
		&self.invoker
	}

	/// Converts `argument` by calling the bound method.
	pub fn invoke(&self, argument: Value) -> Result<Value, InvocationError> {
		tracing::trace!(
			method = %self.invoker.method().qualified_name(),
			signature = %self.signature,
			argument = %argument.describe(),
			"invoking converter"
		);
		self.invoker.invoke(vec![argument])
	}
}

/// Same receiver (by value or identity) and same method declaration.
impl PartialEq for ConverterEntry {
	fn eq(&self, other: &Self) -> bool {
		self.invoker == other.invoker
	}
}

impl core::fmt::Display for ConverterEntry {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}", self.invoker.method().qualified_name())?;
		if let Some(receiver) = self.invoker.receiver() {
			write!(f, " on {}", receiver.describe())?;
		}
		Ok(())
	}
}

fn signature_of(method: &Method) -> Result<ConverterSignature, Vec<Violation>> {
	let name = || -> Box<str> { method.qualified_name().into() };
	let mut violations = Vec::new();

	let input = match method.params() {
		[input] => Some(input),
		params => {
			violations.push(Violation::WrongParameterCount {
				method: name(),
				found: params.len(),
			});
			None
		}
	};
	if let Some(input) = input
		&& (input.is_void() || input.contains_variables())
	{
		violations.push(Violation::InvalidParameterType {
			method: name(),
			ty: input.to_string().into(),
		});
	}

	let output = method.returns();
	if output.is_void() || output.contains_variables() {
		violations.push(Violation::InvalidReturnType {
			method: name(),
			ty: output.to_string().into(),
		});
	}

	match input {
		Some(input) if violations.is_empty() => {
			Ok(ConverterSignature::from_checked(input.clone(), output.clone()))
		}
		_ => Err(violations),
	}
}
