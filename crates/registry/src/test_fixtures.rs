use std::sync::Arc;

use morph_invocation::{Method, MethodFlags};
use morph_primitives::{RawType, TypeDescriptor, Value};

use crate::entry::ConverterEntry;
use crate::signature::ConverterSignature;

pub(crate) fn holder() -> RawType {
	RawType::class("Converters").build()
}

/// A static converter method that answers with its own name.
pub(crate) fn make_method(name: &str, input: TypeDescriptor, output: TypeDescriptor) -> Arc<Method> {
	let tag = name.to_string();
	Arc::new(
		Method::builder(holder(), name)
			.param(input)
			.returns(output)
			.with(MethodFlags::STATIC | MethodFlags::CONVERTER)
			.body(move |_, _| Ok(Value::string(tag.clone()))),
	)
}

pub(crate) fn make_entry(name: &str, input: TypeDescriptor, output: TypeDescriptor) -> ConverterEntry {
	ConverterEntry::new(None, Some(make_method(name, input, output))).expect("fixture entry is valid")
}

pub(crate) fn sig(input: TypeDescriptor, output: TypeDescriptor) -> ConverterSignature {
	ConverterSignature::new(input, output).expect("fixture signature is valid")
}
