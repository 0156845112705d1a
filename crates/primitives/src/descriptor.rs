//! Structural type descriptors and the assignability relation.
//!
//! # Assignability
//!
//! [`TypeDescriptor::is_assignable_from`] answers "can a value of `other` be used where
//! `self` is expected". The rules, checked in order:
//!
//! 1. Structurally identical descriptors are always assignable.
//! 2. A raw value-kind type (`int`, `Integer`, ...) accepts exactly the descriptors of
//!    its own [`ValueKind`], so `int` and `Integer` are interchangeable.
//! 3. Any other raw type accepts descriptors whose raw identity is one of its subtypes.
//! 4. A parameterized type walks `other`'s supertype chain, substituting type
//!    arguments along the way, until it reaches the same raw type; the arguments must
//!    then be structurally equal (generics are invariant).
//! 5. An array accepts arrays whose erased components are assignable (reference
//!    components only; primitive arrays only match themselves). When both components
//!    carry generic structure the component check of rule 4 must also hold.
//!
//! Type variables are only assignable from themselves.

use std::sync::Arc;

use crate::builtin;
use crate::error::TypeError;
use crate::kind::ValueKind;
use crate::raw::RawType;

/// The structural form of a [`TypeDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shape {
	/// A non-parameterized use of a raw type.
	Raw(RawType),
	/// A generic raw type applied to type arguments.
	Parameterized {
		/// The generic declaration.
		raw: RawType,
		/// One argument per declared parameter.
		args: Box<[TypeDescriptor]>,
	},
	/// An array of the component type.
	Array(TypeDescriptor),
	/// An unresolved type variable.
	Variable(Box<str>),
}

/// Immutable, structurally compared description of a type.
///
/// Cheap to clone; equal descriptors are interchangeable regardless of where they
/// were built.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor(Arc<Shape>);

impl TypeDescriptor {
	pub(crate) fn from_shape(shape: Shape) -> Self {
		Self(Arc::new(shape))
	}

	/// Describes a raw (non-parameterized) use of `raw`.
	pub fn of(raw: RawType) -> Self {
		Self::from_shape(Shape::Raw(raw))
	}

	/// Describes `raw` applied to `args`.
	///
	/// A non-generic `raw` with no arguments yields the raw descriptor.
	pub fn parameterized(
		raw: RawType,
		args: impl IntoIterator<Item = TypeDescriptor>,
	) -> Result<Self, TypeError> {
		let args: Box<[TypeDescriptor]> = args.into_iter().collect();
		if raw.is_primitive() && !args.is_empty() {
			return Err(TypeError::NotGeneric {
				ty: raw.name().into(),
			});
		}
		if args.len() != raw.params().len() {
			return Err(TypeError::Arity {
				ty: raw.name().into(),
				expected: raw.params().len(),
				found: args.len(),
			});
		}
		if args.is_empty() {
			return Ok(Self::of(raw));
		}
		Ok(Self::from_shape(Shape::Parameterized { raw, args }))
	}

	/// Describes an array of `component`.
	pub fn array(component: TypeDescriptor) -> Self {
		Self::from_shape(Shape::Array(component))
	}

	/// Describes the type variable `name`.
	pub fn variable(name: impl Into<Box<str>>) -> Self {
		Self::from_shape(Shape::Variable(name.into()))
	}

	/// Returns the structural form.
	pub fn shape(&self) -> &Shape {
		&self.0
	}

	/// Returns the nominal identity for raw and parameterized descriptors.
	pub fn raw_type(&self) -> Option<&RawType> {
		match self.shape() {
			Shape::Raw(raw) | Shape::Parameterized { raw, .. } => Some(raw),
			Shape::Array(_) | Shape::Variable(_) => None,
		}
	}

	/// Returns the type arguments (empty unless parameterized).
	pub fn args(&self) -> &[TypeDescriptor] {
		match self.shape() {
			Shape::Parameterized { args, .. } => args,
			_ => &[],
		}
	}

	/// Returns the component type of an array descriptor.
	pub fn component(&self) -> Option<&TypeDescriptor> {
		match self.shape() {
			Shape::Array(component) => Some(component),
			_ => None,
		}
	}

	/// Returns true if this descriptor carries no generic structure.
	pub fn is_raw(&self) -> bool {
		match self.shape() {
			Shape::Raw(_) => true,
			Shape::Array(component) => component.is_raw(),
			Shape::Parameterized { .. } | Shape::Variable(_) => false,
		}
	}

	/// Returns true for primitive and void descriptors.
	pub fn is_primitive(&self) -> bool {
		matches!(self.shape(), Shape::Raw(raw) if raw.is_primitive())
	}

	/// Returns true if this describes the absent value, in primitive or boxed form.
	pub fn is_void(&self) -> bool {
		ValueKind::Void.matches(self)
	}

	/// Returns true if any type variable occurs in this descriptor.
	pub fn contains_variables(&self) -> bool {
		match self.shape() {
			Shape::Raw(_) => false,
			Shape::Variable(_) => true,
			Shape::Array(component) => component.contains_variables(),
			Shape::Parameterized { args, .. } => args.iter().any(Self::contains_variables),
		}
	}

	/// Returns the value kind whose primitive or boxed form this is.
	pub fn value_kind(&self) -> Option<ValueKind> {
		ValueKind::of(self)
	}

	/// Returns the descriptor with all generic structure removed.
	///
	/// Type variables erase to the top type.
	pub fn erasure(&self) -> TypeDescriptor {
		match self.shape() {
			Shape::Raw(_) => self.clone(),
			Shape::Parameterized { raw, .. } => Self::of(raw.clone()),
			Shape::Array(component) => Self::array(component.erasure()),
			Shape::Variable(_) => builtin::object(),
		}
	}

	/// Replaces each variable named in `params` with the argument at the same index.
	pub fn substitute(&self, params: &[Box<str>], args: &[TypeDescriptor]) -> TypeDescriptor {
		match self.shape() {
			Shape::Raw(_) => self.clone(),
			Shape::Variable(name) => params
				.iter()
				.position(|p| p == name)
				.and_then(|i| args.get(i))
				.cloned()
				.unwrap_or_else(|| self.clone()),
			Shape::Array(component) => Self::array(component.substitute(params, args)),
			Shape::Parameterized { raw, args: own } => Self::from_shape(Shape::Parameterized {
				raw: raw.clone(),
				args: own.iter().map(|a| a.substitute(params, args)).collect(),
			}),
		}
	}

	/// Returns true if a value of type `other` may be used where `self` is expected.
	pub fn is_assignable_from(&self, other: &TypeDescriptor) -> bool {
		if self == other {
			return true;
		}
		match self.shape() {
			Shape::Raw(raw) => match ValueKind::of(self) {
				Some(kind) => kind.matches(other),
				None => raw_accepts(raw, other),
			},
			Shape::Parameterized { raw, args } => resolves_to(raw, args, other),
			Shape::Array(component) => array_accepts(component, other),
			Shape::Variable(_) => false,
		}
	}
}

fn raw_accepts(raw: &RawType, other: &TypeDescriptor) -> bool {
	match other.shape() {
		Shape::Raw(sub) | Shape::Parameterized { raw: sub, .. } => sub.is_subtype_of(raw),
		Shape::Array(_) | Shape::Variable(_) => raw.is_top(),
	}
}

/// Walks `other`'s ancestors looking for `target<target_args>`.
fn resolves_to(target: &RawType, target_args: &[TypeDescriptor], other: &TypeDescriptor) -> bool {
	match other.shape() {
		Shape::Parameterized { raw, args } => {
			if raw == target {
				return **args == *target_args;
			}
			raw.supertypes()
				.iter()
				.any(|sup| resolves_to(target, target_args, &sup.substitute(raw.params(), args)))
		}
		// A raw use of the target itself has unknown arguments.
		Shape::Raw(raw) => {
			raw != target
				&& raw
					.supertypes()
					.iter()
					.any(|sup| resolves_to(target, target_args, sup))
		}
		Shape::Array(_) | Shape::Variable(_) => false,
	}
}

fn array_accepts(component: &TypeDescriptor, other: &TypeDescriptor) -> bool {
	let Some(other_component) = other.component() else {
		return false;
	};
	if component.is_primitive() || other_component.is_primitive() {
		return component == other_component;
	}
	let raw_ok = component
		.erasure()
		.is_assignable_from(&other_component.erasure());
	raw_ok
		&& (component.is_raw()
			|| other_component.is_raw()
			|| component.is_assignable_from(other_component))
}

impl core::fmt::Display for TypeDescriptor {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self.shape() {
			Shape::Raw(raw) => write!(f, "{raw}"),
			Shape::Parameterized { raw, args } => {
				write!(f, "{raw}<")?;
				for (i, arg) in args.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{arg}")?;
				}
				f.write_str(">")
			}
			Shape::Array(component) => write!(f, "{component}[]"),
			Shape::Variable(name) => f.write_str(name),
		}
	}
}

impl core::fmt::Debug for TypeDescriptor {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "TypeDescriptor({self})")
	}
}

impl From<RawType> for TypeDescriptor {
	fn from(raw: RawType) -> Self {
		Self::of(raw)
	}
}
