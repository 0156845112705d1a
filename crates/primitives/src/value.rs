//! Runtime values passed to and returned from converters.

use std::any::Any;
use std::sync::Arc;

use crate::builtin;
use crate::descriptor::TypeDescriptor;
use crate::kind::ValueKind;
use crate::raw::RawType;

/// A dynamically typed value.
///
/// Primitive variants are the boxed forms of their [`ValueKind`]; everything else is
/// an [`Object`] tagged with its runtime type.
#[derive(Debug, Clone)]
pub enum Value {
	/// Absence of a value.
	Null,
	Bool(bool),
	Byte(i8),
	Char(char),
	Double(f64),
	Float(f32),
	Int(i32),
	Long(i64),
	Short(i16),
	Object(Object),
}

impl Value {
	/// Wraps `data` as an object of runtime type `ty`.
	pub fn object<T: Any + Send + Sync>(ty: RawType, data: T) -> Self {
		Self::Object(Object::new(ty, data))
	}

	/// Wraps `s` as a `String` object.
	pub fn string(s: impl Into<String>) -> Self {
		Self::object(builtin::types().string.clone(), s.into())
	}

	/// Returns true for [`Value::Null`].
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Returns the kind of a primitive value (absence is [`ValueKind::Void`]).
	pub fn kind(&self) -> Option<ValueKind> {
		ValueKind::of_value(self)
	}

	/// Returns the runtime type, erased. Absence has none.
	///
	/// Primitive values report their boxed descriptor.
	pub fn runtime_type(&self) -> Option<TypeDescriptor> {
		match self {
			Self::Null => None,
			Self::Object(obj) => Some(TypeDescriptor::of(obj.ty.clone())),
			_ => self.kind().map(|kind| kind.boxed().clone()),
		}
	}

	/// Returns the object payload as `&T`, if this is an object holding a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		match self {
			Self::Object(obj) => obj.downcast_ref(),
			_ => None,
		}
	}

	/// Returns the payload of a `String` object.
	pub fn as_str(&self) -> Option<&str> {
		self.downcast_ref::<String>().map(String::as_str)
	}

	/// Short description for diagnostics.
	pub fn describe(&self) -> String {
		match self {
			Self::Null => "null".to_string(),
			Self::Bool(v) => format!("boolean {v}"),
			Self::Byte(v) => format!("byte {v}"),
			Self::Char(v) => format!("char {v:?}"),
			Self::Double(v) => format!("double {v}"),
			Self::Float(v) => format!("float {v}"),
			Self::Int(v) => format!("int {v}"),
			Self::Long(v) => format!("long {v}"),
			Self::Short(v) => format!("short {v}"),
			Self::Object(obj) => format!("instance of {}", obj.ty),
		}
	}
}

/// Primitives compare by value; objects compare by identity.
impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Null, Self::Null) => true,
			(Self::Bool(a), Self::Bool(b)) => a == b,
			(Self::Byte(a), Self::Byte(b)) => a == b,
			(Self::Char(a), Self::Char(b)) => a == b,
			(Self::Double(a), Self::Double(b)) => a == b,
			(Self::Float(a), Self::Float(b)) => a == b,
			(Self::Int(a), Self::Int(b)) => a == b,
			(Self::Long(a), Self::Long(b)) => a == b,
			(Self::Short(a), Self::Short(b)) => a == b,
			(Self::Object(a), Self::Object(b)) => a.same(b),
			_ => false,
		}
	}
}

macro_rules! impl_from_primitive {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(v: $ty) -> Self {
					Value::$variant(v)
				}
			}
		)*
	};
}

impl_from_primitive! {
	bool => Bool,
	i8 => Byte,
	char => Char,
	f64 => Double,
	f32 => Float,
	i32 => Int,
	i64 => Long,
	i16 => Short,
}

impl From<Object> for Value {
	fn from(obj: Object) -> Self {
		Self::Object(obj)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Self::string(s)
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Self::string(s)
	}
}

/// A reference value: shared payload plus its runtime type.
#[derive(Clone)]
pub struct Object {
	ty: RawType,
	data: Arc<dyn Any + Send + Sync>,
}

impl Object {
	/// Wraps `data` as an instance of `ty`.
	pub fn new<T: Any + Send + Sync>(ty: RawType, data: T) -> Self {
		Self {
			ty,
			data: Arc::new(data),
		}
	}

	/// Returns the runtime type.
	pub fn ty(&self) -> &RawType {
		&self.ty
	}

	/// Returns the payload as `&T` if it is a `T`.
	pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
		(*self.data).downcast_ref()
	}

	/// Returns true if both handles refer to the same instance.
	pub fn same(&self, other: &Object) -> bool {
		Arc::ptr_eq(&self.data, &other.data)
	}
}

impl core::fmt::Debug for Object {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Object")
			.field("ty", &self.ty.name())
			.field("data", &Arc::as_ptr(&self.data))
			.finish()
	}
}
