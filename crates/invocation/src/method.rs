use std::sync::Arc;

use morph_primitives::{RawType, TypeDescriptor, Value, ValueKind};

/// Boxed error raised by a method body.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Executable part of a [`Method`]: receives the receiver (if bound) and the arguments.
pub type MethodBody = Arc<dyn Fn(Option<&Value>, &[Value]) -> Result<Value, BoxError> + Send + Sync>;

bitflags::bitflags! {
	/// Declaration flags of a [`Method`].
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct MethodFlags: u8 {
		/// Callable from outside its declaring type.
		const EXPORTED = 1 << 0;
		/// Does not take a receiver.
		const STATIC = 1 << 1;
		/// Marked for discovery as a converter.
		const CONVERTER = 1 << 2;
	}
}

impl Default for MethodFlags {
	fn default() -> Self {
		Self::EXPORTED
	}
}

/// Description of a callable: where it is declared, its shape, and its body.
#[derive(Clone)]
pub struct Method {
	declaring: RawType,
	name: Box<str>,
	params: Box<[TypeDescriptor]>,
	returns: TypeDescriptor,
	flags: MethodFlags,
	body: MethodBody,
}

impl Method {
	/// Starts describing method `name` declared on `declaring`.
	pub fn builder(declaring: RawType, name: impl Into<Box<str>>) -> MethodBuilder {
		MethodBuilder {
			declaring,
			name: name.into(),
			params: Vec::new(),
			returns: ValueKind::Void.primitive().clone(),
			flags: MethodFlags::default(),
		}
	}

	pub fn declaring(&self) -> &RawType {
		&self.declaring
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// `Declaring::name`, for diagnostics.
	pub fn qualified_name(&self) -> String {
		format!("{}::{}", self.declaring, self.name)
	}

	pub fn params(&self) -> &[TypeDescriptor] {
		&self.params
	}

	/// Declared return type; `void` when the method returns nothing.
	pub fn returns(&self) -> &TypeDescriptor {
		&self.returns
	}

	pub fn flags(&self) -> MethodFlags {
		self.flags
	}

	pub fn is_exported(&self) -> bool {
		self.flags.contains(MethodFlags::EXPORTED)
	}

	/// Returns true if the method needs a receiver.
	pub fn requires_receiver(&self) -> bool {
		!self.flags.contains(MethodFlags::STATIC)
	}

	pub fn is_converter(&self) -> bool {
		self.flags.contains(MethodFlags::CONVERTER)
	}

	/// Returns true if `receiver`'s runtime type is the declaring type or a subtype.
	pub fn accepts_receiver(&self, receiver: &Value) -> bool {
		receiver
			.runtime_type()
			.is_some_and(|ty| TypeDescriptor::of(self.declaring.clone()).is_assignable_from(&ty))
	}

	pub(crate) fn call(&self, receiver: Option<&Value>, args: &[Value]) -> Result<Value, BoxError> {
		(self.body)(receiver, args)
	}
}

/// Methods compare by declaration (declaring type, name, parameters, return type).
impl PartialEq for Method {
	fn eq(&self, other: &Self) -> bool {
		self.declaring == other.declaring
			&& self.name == other.name
			&& self.params == other.params
			&& self.returns == other.returns
	}
}

impl Eq for Method {}

impl core::fmt::Debug for Method {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("Method")
			.field("name", &self.qualified_name())
			.field("params", &self.params)
			.field("returns", &self.returns)
			.field("flags", &self.flags)
			.finish_non_exhaustive()
	}
}

impl core::fmt::Display for Method {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(f, "{}::{}(", self.declaring, self.name)?;
		for (i, param) in self.params.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{param}")?;
		}
		write!(f, ") -> {}", self.returns)
	}
}

/// Builder for [`Method`]. Defaults: no parameters, `void` return, exported, instance.
pub struct MethodBuilder {
	declaring: RawType,
	name: Box<str>,
	params: Vec<TypeDescriptor>,
	returns: TypeDescriptor,
	flags: MethodFlags,
}

impl MethodBuilder {
	/// Appends a parameter.
	pub fn param(mut self, ty: TypeDescriptor) -> Self {
		self.params.push(ty);
		self
	}

	/// Sets the return type.
	pub fn returns(mut self, ty: TypeDescriptor) -> Self {
		self.returns = ty;
		self
	}

	/// Adds `flags`.
	pub fn with(mut self, flags: MethodFlags) -> Self {
		self.flags.insert(flags);
		self
	}

	/// Removes `flags`.
	pub fn without(mut self, flags: MethodFlags) -> Self {
		self.flags.remove(flags);
		self
	}

	/// Finishes the method with its body.
	pub fn body<F>(self, body: F) -> Method
	where
		F: Fn(Option<&Value>, &[Value]) -> Result<Value, BoxError> + Send + Sync + 'static,
	{
		Method {
			declaring: self.declaring,
			name: self.name,
			params: self.params.into_boxed_slice(),
			returns: self.returns,
			flags: self.flags,
			body: Arc::new(body),
		}
	}
}
