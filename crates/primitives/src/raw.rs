//! Nominal type declarations.
//!
//! A [`RawType`] is the erased identity of a type: its name, what sort of type it
//! is, the names of its type parameters, and its declared supertypes. Supertypes are
//! written as [`TypeDescriptor`]s over the declaring type's own parameters, e.g.
//! `ArrayList<E>` declares `List<E>` where `E` is [`TypeDescriptor::variable`].
//!
//! Raw types are built bottom-up (a supertype must exist before its subtypes), so the
//! hierarchy is acyclic by construction.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::descriptor::TypeDescriptor;

/// What sort of declaration a [`RawType`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeFlavor {
	/// The universal reference supertype.
	Top,
	/// A primitive value type (`int`, `boolean`, ...).
	Primitive,
	/// The absent-value type (`void`).
	Void,
	/// A concrete or abstract class.
	Class,
	/// An interface.
	Interface,
}

struct RawTypeInner {
	name: Box<str>,
	flavor: TypeFlavor,
	params: Box<[Box<str>]>,
	supertypes: Box<[TypeDescriptor]>,
}

/// Nominal identity of a type.
///
/// Cheap to clone. Two raw types are equal iff their names are equal.
#[derive(Clone)]
pub struct RawType(Arc<RawTypeInner>);

impl RawType {
	/// Starts declaring a class.
	pub fn class(name: impl Into<Box<str>>) -> RawTypeBuilder {
		RawTypeBuilder::new(name.into(), TypeFlavor::Class)
	}

	/// Starts declaring an interface.
	pub fn interface(name: impl Into<Box<str>>) -> RawTypeBuilder {
		RawTypeBuilder::new(name.into(), TypeFlavor::Interface)
	}

	pub(crate) fn leaf(name: &str, flavor: TypeFlavor) -> Self {
		RawTypeBuilder::new(name.into(), flavor).build()
	}

	/// Returns the declared name.
	pub fn name(&self) -> &str {
		&self.0.name
	}

	/// Returns the declaration flavor.
	pub fn flavor(&self) -> TypeFlavor {
		self.0.flavor
	}

	/// Returns the names of the declared type parameters, in order.
	pub fn params(&self) -> &[Box<str>] {
		&self.0.params
	}

	/// Returns the declared direct supertypes, in terms of [`Self::params`].
	pub fn supertypes(&self) -> &[TypeDescriptor] {
		&self.0.supertypes
	}

	/// Returns true if this type declares type parameters.
	pub fn is_generic(&self) -> bool {
		!self.0.params.is_empty()
	}

	/// Returns true for primitive and void types.
	pub fn is_primitive(&self) -> bool {
		matches!(self.0.flavor, TypeFlavor::Primitive | TypeFlavor::Void)
	}

	/// Returns true for the universal reference supertype.
	pub fn is_top(&self) -> bool {
		self.0.flavor == TypeFlavor::Top
	}

	/// Returns true if `self` is `other` or one of its (transitive) subtypes.
	///
	/// Every non-primitive type is a subtype of the top type.
	pub fn is_subtype_of(&self, other: &RawType) -> bool {
		if self == other {
			return true;
		}
		if other.is_top() {
			return !self.is_primitive();
		}
		self.supertypes()
			.iter()
			.filter_map(TypeDescriptor::raw_type)
			.any(|sup| sup.is_subtype_of(other))
	}
}

impl PartialEq for RawType {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0) || self.0.name == other.0.name
	}
}

impl Eq for RawType {}

impl Hash for RawType {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.name.hash(state);
	}
}

impl core::fmt::Debug for RawType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_tuple("RawType").field(&self.0.name).finish()
	}
}

impl core::fmt::Display for RawType {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(&self.0.name)
	}
}

/// Builder for [`RawType`] declarations.
pub struct RawTypeBuilder {
	name: Box<str>,
	flavor: TypeFlavor,
	params: Vec<Box<str>>,
	supertypes: Vec<TypeDescriptor>,
}

impl RawTypeBuilder {
	fn new(name: Box<str>, flavor: TypeFlavor) -> Self {
		Self {
			name,
			flavor,
			params: Vec::new(),
			supertypes: Vec::new(),
		}
	}

	/// Declares the next type parameter.
	pub fn param(mut self, name: impl Into<Box<str>>) -> Self {
		self.params.push(name.into());
		self
	}

	/// Declares a direct supertype (superclass or implemented interface).
	pub fn extends(mut self, supertype: TypeDescriptor) -> Self {
		self.supertypes.push(supertype);
		self
	}

	/// Finishes the declaration.
	pub fn build(self) -> RawType {
		RawType(Arc::new(RawTypeInner {
			name: self.name,
			flavor: self.flavor,
			params: self.params.into_boxed_slice(),
			supertypes: self.supertypes.into_boxed_slice(),
		}))
	}
}
