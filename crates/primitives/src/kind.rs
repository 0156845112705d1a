//! Primitive/boxed equivalence classes and value casting.

use crate::builtin;
use crate::descriptor::TypeDescriptor;
use crate::error::CastError;
use crate::value::Value;

/// Pairs a primitive type with its boxed counterpart.
///
/// The mapping is fixed: exactly one kind matches any primitive or boxed
/// descriptor, and no other descriptor matches any kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueKind {
	Boolean,
	Byte,
	Char,
	Double,
	Float,
	Int,
	Long,
	Short,
	/// The absent value (`void` / `Void`).
	Void,
}

/// Intermediate for numeric casts.
#[derive(Clone, Copy)]
enum Numeric {
	Integral(i64),
	Floating(f64),
}

impl ValueKind {
	/// Number of kinds.
	pub const COUNT: usize = 9;

	/// Every kind, in declaration order.
	pub const ALL: [ValueKind; Self::COUNT] = [
		Self::Boolean,
		Self::Byte,
		Self::Char,
		Self::Double,
		Self::Float,
		Self::Int,
		Self::Long,
		Self::Short,
		Self::Void,
	];

	/// Name of the primitive form.
	pub const fn primitive_name(self) -> &'static str {
		match self {
			Self::Boolean => "boolean",
			Self::Byte => "byte",
			Self::Char => "char",
			Self::Double => "double",
			Self::Float => "float",
			Self::Int => "int",
			Self::Long => "long",
			Self::Short => "short",
			Self::Void => "void",
		}
	}

	/// Name of the boxed form.
	pub const fn boxed_name(self) -> &'static str {
		match self {
			Self::Boolean => "Boolean",
			Self::Byte => "Byte",
			Self::Char => "Character",
			Self::Double => "Double",
			Self::Float => "Float",
			Self::Int => "Integer",
			Self::Long => "Long",
			Self::Short => "Short",
			Self::Void => "Void",
		}
	}

	/// Returns true for kinds that cast through numeric conversion.
	pub const fn is_numeric(self) -> bool {
		!matches!(self, Self::Boolean | Self::Void)
	}

	/// Returns true if values of `source` reach this kind without loss of magnitude:
	/// the same kind, or a widening step along `byte -> short -> int -> long -> float ->
	/// double` (with `char` entering at `int`).
	pub const fn widens_from(self, source: ValueKind) -> bool {
		if self as u8 == source as u8 {
			return true;
		}
		match (self, self.widening_rank(), source.widening_rank()) {
			(Self::Char, ..) => false,
			(_, Some(target), Some(source)) => target > source,
			_ => false,
		}
	}

	/// Position on the widening chain. Nothing widens into `char`, and `char` and
	/// `short` share a rank so neither widens into the other.
	const fn widening_rank(self) -> Option<u8> {
		Some(match self {
			Self::Byte => 0,
			Self::Short | Self::Char => 1,
			Self::Int => 2,
			Self::Long => 3,
			Self::Float => 4,
			Self::Double => 5,
			Self::Boolean | Self::Void => return None,
		})
	}

	/// Descriptor of the primitive form.
	pub fn primitive(self) -> &'static TypeDescriptor {
		&builtin::types().kind_forms(self).0
	}

	/// Descriptor of the boxed form.
	pub fn boxed(self) -> &'static TypeDescriptor {
		&builtin::types().kind_forms(self).1
	}

	/// Returns true iff `ty` is this kind's primitive or boxed descriptor.
	pub fn matches(self, ty: &TypeDescriptor) -> bool {
		let (primitive, boxed) = builtin::types().kind_forms(self);
		ty == primitive || ty == boxed
	}

	/// Returns the kind whose primitive or boxed form is `ty`.
	pub fn of(ty: &TypeDescriptor) -> Option<ValueKind> {
		ty.raw_type()?;
		Self::ALL.into_iter().find(|kind| kind.matches(ty))
	}

	/// Returns the kind of a primitive value; absence is [`ValueKind::Void`].
	pub fn of_value(value: &Value) -> Option<ValueKind> {
		Some(match value {
			Value::Null => Self::Void,
			Value::Bool(_) => Self::Boolean,
			Value::Byte(_) => Self::Byte,
			Value::Char(_) => Self::Char,
			Value::Double(_) => Self::Double,
			Value::Float(_) => Self::Float,
			Value::Int(_) => Self::Int,
			Value::Long(_) => Self::Long,
			Value::Short(_) => Self::Short,
			Value::Object(_) => return None,
		})
	}

	/// Casts `value` to this kind.
	///
	/// Booleans only cast to [`ValueKind::Boolean`] and absence only to
	/// [`ValueKind::Void`]. Characters cast to numeric kinds through their code point;
	/// numeric kinds narrow and widen with truncation. Objects never cast.
	pub fn cast(self, value: &Value) -> Result<Value, CastError> {
		let fail = || CastError {
			target: self,
			found: value.describe().into(),
		};
		match (self, value) {
			(Self::Boolean, Value::Bool(b)) => Ok(Value::Bool(*b)),
			(Self::Void, Value::Null) => Ok(Value::Null),
			(Self::Boolean | Self::Void, _) => Err(fail()),
			(_, Value::Null | Value::Bool(_) | Value::Object(_)) => Err(fail()),
			(Self::Char, Value::Char(c)) => Ok(Value::Char(*c)),
			(_, _) => {
				let numeric = Numeric::of(value).ok_or_else(fail)?;
				self.narrow(numeric).ok_or_else(fail)
			}
		}
	}

	fn narrow(self, numeric: Numeric) -> Option<Value> {
		// Floating sources saturate to `int` before narrowing further, and to `long` for
		// `long` targets.
		let (int, long) = match numeric {
			Numeric::Integral(i) => (i as i32, i),
			Numeric::Floating(f) => (f as i32, f as i64),
		};
		Some(match self {
			Self::Byte => Value::Byte(int as i8),
			Self::Short => Value::Short(int as i16),
			Self::Char => Value::Char(char::from_u32(u32::from(int as u16))?),
			Self::Int => Value::Int(int),
			Self::Long => Value::Long(long),
			Self::Float => match numeric {
				Numeric::Integral(i) => Value::Float(i as f32),
				Numeric::Floating(f) => Value::Float(f as f32),
			},
			Self::Double => match numeric {
				Numeric::Integral(i) => Value::Double(i as f64),
				Numeric::Floating(f) => Value::Double(f),
			},
			Self::Boolean | Self::Void => return None,
		})
	}
}

impl Numeric {
	fn of(value: &Value) -> Option<Self> {
		Some(match value {
			Value::Byte(v) => Self::Integral(i64::from(*v)),
			Value::Char(c) => Self::Integral(i64::from(u32::from(*c))),
			Value::Short(v) => Self::Integral(i64::from(*v)),
			Value::Int(v) => Self::Integral(i64::from(*v)),
			Value::Long(v) => Self::Integral(*v),
			Value::Float(v) => Self::Floating(f64::from(*v)),
			Value::Double(v) => Self::Floating(*v),
			Value::Null | Value::Bool(_) | Value::Object(_) => return None,
		})
	}
}

impl core::fmt::Display for ValueKind {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.write_str(self.primitive_name())
	}
}

#[cfg(test)]
mod tests;
