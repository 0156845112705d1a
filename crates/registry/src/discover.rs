//! Converter discovery from exported methods.
//!
//! A type exposes its methods through [`Exports`]; [`scan`] turns every method
//! flagged [`MethodFlags::CONVERTER`] into a [`ConverterEntry`]. Instance methods are
//! bound to the exporter's receiver, static ones to nothing.
//!
//! [`MethodFlags::CONVERTER`]: morph_invocation::MethodFlags::CONVERTER

use std::sync::Arc;

use morph_invocation::Method;
use morph_primitives::Value;

use crate::entry::ConverterEntry;
use crate::error::DiscoveryError;

/// Something that exposes methods, and optionally a receiver for them.
pub trait Exports {
	/// Receiver for the instance methods, if there is one.
	fn receiver(&self) -> Option<Value>;

	/// Every declared method, in declaration order.
	fn methods(&self) -> Vec<Arc<Method>>;
}

/// Scans `exports` for converter methods.
pub fn scan<E: Exports + ?Sized>(exports: &E) -> Scan {
	Scan {
		receiver: exports.receiver(),
		methods: exports.methods().into_iter(),
	}
}

/// Iterator returned by [`scan`].
#[derive(Debug)]
pub struct Scan {
	receiver: Option<Value>,
	methods: std::vec::IntoIter<Arc<Method>>,
}

impl Iterator for Scan {
	type Item = Result<ConverterEntry, DiscoveryError>;

	fn next(&mut self) -> Option<Self::Item> {
		let method = self.methods.find(|method| method.is_converter())?;
		let receiver = method
			.requires_receiver()
			.then(|| self.receiver.clone())
			.flatten();
		tracing::trace!(method = %method.qualified_name(), "found converter method");
		Some(ConverterEntry::new(receiver, Some(method)).map_err(DiscoveryError::from))
	}
}
