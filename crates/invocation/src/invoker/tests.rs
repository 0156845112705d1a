use std::error::Error as _;
use std::sync::Arc;

use morph_primitives::{RawType, ValueKind, builtin};
use pretty_assertions::assert_eq;

use super::*;
use crate::method::MethodFlags;

struct Greeting {
	prefix: &'static str,
}

fn greeter_type() -> RawType {
	RawType::class("Greeter").build()
}

fn greeter(prefix: &'static str) -> Value {
	Value::object(greeter_type(), Greeting { prefix })
}

fn greet() -> Arc<Method> {
	Arc::new(
		Method::builder(greeter_type(), "greet")
			.param(builtin::string())
			.returns(builtin::string())
			.body(|receiver, args| {
				let prefix = receiver
					.and_then(|r| r.downcast_ref::<Greeting>())
					.map(|g| g.prefix)
					.ok_or("no greeter")?;
				let name = args[0].as_str().unwrap_or("nobody");
				Ok(Value::string(format!("{prefix}, {name}")))
			}),
	)
}

fn widen() -> Arc<Method> {
	Arc::new(
		Method::builder(greeter_type(), "widen")
			.param(ValueKind::Long.primitive().clone())
			.returns(ValueKind::Long.boxed().clone())
			.with(MethodFlags::STATIC)
			.body(|_, args| match &args[0] {
				Value::Long(v) => Ok(Value::Long(v * 2)),
				other => Err(format!("expected long, got {}", other.describe()).into()),
			}),
	)
}

#[test]
fn test_missing_method_is_the_only_violation() {
	let err = Invoker::new(Some(greeter("hi")), None).unwrap_err();
	assert_eq!(err.method, None);
	assert_eq!(err.violations, vec![Violation::MissingCallable]);
}

/// Verifies that every binding violation is reported, in check order.
#[test]
fn test_violations_accumulate() {
	let hidden = Arc::new(
		Method::builder(greeter_type(), "secret")
			.without(MethodFlags::EXPORTED)
			.body(|_, _| Ok(Value::Null)),
	);
	let err = Invoker::new(None, Some(hidden)).unwrap_err();
	assert_eq!(err.method.as_deref(), Some("Greeter::secret"));
	assert_eq!(
		err.violations,
		vec![
			Violation::InaccessibleCallable {
				method: "Greeter::secret".into()
			},
			Violation::ReceiverRequired {
				method: "Greeter::secret".into()
			},
		]
	);
}

#[test]
fn test_receiver_must_match_declaring_type() {
	let err = Invoker::new(Some(Value::string("not a greeter")), Some(greet())).unwrap_err();
	assert_eq!(
		err.violations,
		vec![Violation::ReceiverIncompatible {
			method: "Greeter::greet".into(),
			found: "instance of String".into(),
		}]
	);
}

#[test]
fn test_subtype_receivers_are_accepted() {
	let loud = RawType::class("LoudGreeter")
		.extends(greeter_type().into())
		.build();
	let receiver = Value::object(loud, Greeting { prefix: "HEY" });
	let invoker = Invoker::new(Some(receiver), Some(greet())).expect("subtype receiver binds");
	let out = invoker.invoke(vec![Value::string("you")]).unwrap();
	assert_eq!(out.as_str(), Some("HEY, you"));
}

/// Verifies that a receiver bound to a static method is incompatible.
#[test]
fn test_static_methods_reject_receivers() {
	let err = Invoker::new(Some(greeter("hi")), Some(widen())).unwrap_err();
	assert!(matches!(err.violations[..], [Violation::ReceiverIncompatible { .. }]));
	assert!(Invoker::new(None, Some(widen())).is_ok());
}

#[test]
fn test_extra_checks_append_after_binding_checks() {
	let err = Invoker::with_checks(None, Some(greet()), |method, violations| {
		violations.push(Violation::WrongParameterCount {
			method: method.qualified_name().into(),
			found: 7,
		});
	})
	.unwrap_err();
	assert_eq!(err.violations.len(), 2);
	assert!(matches!(err.violations[0], Violation::ReceiverRequired { .. }));
	assert!(matches!(err.violations[1], Violation::WrongParameterCount { found: 7, .. }));
	assert_eq!(
		err.to_string(),
		"cannot bind Greeter::greet: `Greeter::greet` needs a receiver; \
		 `Greeter::greet` takes 7 parameter(s), expected exactly one"
	);
}

#[test]
fn test_invoke_passes_receiver_and_argument() {
	let invoker = Invoker::new(Some(greeter("Hello")), Some(greet())).unwrap();
	let out = invoker.invoke(vec![Value::string("world")]).unwrap();
	assert_eq!(out.as_str(), Some("Hello, world"));
}

#[test]
fn test_invoke_checks_argument_count() {
	let invoker = Invoker::new(Some(greeter("Hello")), Some(greet())).unwrap();
	let err = invoker.invoke(vec![]).unwrap_err();
	assert_eq!(&*err.method, "Greeter::greet");
	assert!(matches!(
		err.cause,
		InvocationCause::ArgumentCount {
			expected: 1,
			found: 0
		}
	));
}

#[test]
fn test_invoke_checks_argument_type() {
	let invoker = Invoker::new(Some(greeter("Hello")), Some(greet())).unwrap();
	let err = invoker.invoke(vec![greeter("nested")]).unwrap_err();
	assert!(matches!(err.cause, InvocationCause::ArgumentType { index: 0, .. }));
}

#[test]
fn test_primitive_parameters_are_cast() {
	let invoker = Invoker::new(None, Some(widen())).unwrap();
	assert_eq!(invoker.invoke(vec![Value::Int(21)]).unwrap(), Value::Long(42));

	assert_eq!(invoker.invoke(vec![Value::Char('A')]).unwrap(), Value::Long(130));

	let err = invoker.invoke(vec![Value::Bool(true)]).unwrap_err();
	assert!(matches!(err.cause, InvocationCause::ArgumentType { index: 0, .. }));
}

fn int_to_text() -> Arc<Method> {
	Arc::new(
		Method::builder(greeter_type(), "int_to_text")
			.param(ValueKind::Int.primitive().clone())
			.returns(builtin::string())
			.with(MethodFlags::STATIC)
			.body(|_, args| Ok(Value::string(args[0].describe()))),
	)
}

/// Verifies that primitive parameters never narrow their arguments.
#[test]
fn test_narrowing_arguments_are_rejected() {
	let invoker = Invoker::new(None, Some(int_to_text())).unwrap();
	for arg in [Value::Double(3.7), Value::Long(1 << 40), Value::Float(1.0), Value::Null] {
		let err = invoker.invoke(vec![arg.clone()]).unwrap_err();
		let InvocationCause::ArgumentType { index, expected, found } = &err.cause else {
			panic!("expected an argument type error for {}, got {:?}", arg.describe(), err.cause);
		};
		assert_eq!(*index, 0);
		assert_eq!(&**expected, "int");
		assert_eq!(&**found, arg.describe());
	}
}

#[test]
fn test_widening_arguments_are_accepted() {
	let invoker = Invoker::new(None, Some(int_to_text())).unwrap();
	for (arg, text) in [
		(Value::Int(7), "int 7"),
		(Value::Short(7), "int 7"),
		(Value::Byte(-7), "int -7"),
		(Value::Char('a'), "int 97"),
	] {
		assert_eq!(invoker.invoke(vec![arg]).unwrap().as_str(), Some(text));
	}
}

/// Verifies that an error raised by the body stays reachable through `source()`.
#[test]
fn test_raised_errors_keep_their_source() {
	let failing = Arc::new(
		Method::builder(greeter_type(), "explode")
			.param(builtin::string())
			.returns(builtin::string())
			.with(MethodFlags::STATIC)
			.body(|_, _| Err("boom".into())),
	);
	let invoker = Invoker::new(None, Some(failing)).unwrap();
	let err = invoker.invoke(vec![Value::string("x")]).unwrap_err();
	assert_eq!(err.to_string(), "invoking `Greeter::explode` failed: boom");

	let cause = err.source().expect("cause is the source");
	let raised = cause.source().expect("raised error is preserved");
	assert_eq!(raised.to_string(), "boom");
}

#[test]
fn test_results_are_coerced_to_declared_kind() {
	let narrowing = Arc::new(
		Method::builder(greeter_type(), "count")
			.param(builtin::string())
			.returns(ValueKind::Int.primitive().clone())
			.with(MethodFlags::STATIC)
			.body(|_, _| Ok(Value::Long(5))),
	);
	let invoker = Invoker::new(None, Some(narrowing)).unwrap();
	assert_eq!(invoker.invoke(vec![Value::string("x")]).unwrap(), Value::Int(5));
}

#[test]
fn test_results_must_match_declared_reference_type() {
	let lying = Arc::new(
		Method::builder(greeter_type(), "lie")
			.param(builtin::string())
			.returns(builtin::string())
			.with(MethodFlags::STATIC)
			.body(|_, _| Ok(Value::object(greeter_type(), Greeting { prefix: "" }))),
	);
	let invoker = Invoker::new(None, Some(lying)).unwrap();
	let err = invoker.invoke(vec![Value::string("x")]).unwrap_err();
	assert!(matches!(err.cause, InvocationCause::ResultType { .. }));
}

#[test]
fn test_equality_uses_receiver_identity() {
	let receiver = greeter("Hello");
	let a = Invoker::new(Some(receiver.clone()), Some(greet())).unwrap();
	let b = Invoker::new(Some(receiver), Some(greet())).unwrap();
	let c = Invoker::new(Some(greeter("Hello")), Some(greet())).unwrap();
	assert_eq!(a, b);
	assert!(a != c);
}
