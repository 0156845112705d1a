//! Callable descriptions and receiver binding for converter dispatch.
//!
//! A [`Method`] describes a callable (declaring type, parameter and return types,
//! flags) together with its body. An [`Invoker`] binds a method to a receiver after
//! validating the pairing, and invokes it with argument and result coercion.

mod error;
mod invoker;
mod method;

pub use error::{BindError, InvocationCause, InvocationError, Violation};
pub use invoker::Invoker;
pub use method::{BoxError, Method, MethodBody, MethodBuilder, MethodFlags};
