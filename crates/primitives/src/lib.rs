//! Type model for converter dispatch: raw types, structural descriptors, value kinds,
//! and runtime values.

/// The builtin type universe (`Object`, `String`, boxed kinds, collections).
pub mod builtin;
/// Structural type descriptors and assignability.
pub mod descriptor;
/// Type construction and cast errors.
pub mod error;
/// Primitive/boxed equivalence classes.
pub mod kind;
/// Nominal type declarations.
pub mod raw;
/// Runtime values.
pub mod value;

pub use descriptor::{Shape, TypeDescriptor};
pub use error::{CastError, TypeError};
pub use kind::ValueKind;
pub use raw::{RawType, RawTypeBuilder, TypeFlavor};
pub use value::{Object, Value};
