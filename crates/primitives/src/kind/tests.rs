use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::builtin;

/// Verifies that both forms of every kind map back to that kind.
#[test]
fn test_every_kind_maps_back_from_both_forms() {
	for kind in ValueKind::ALL {
		assert_eq!(ValueKind::of(kind.primitive()), Some(kind), "{kind}");
		assert_eq!(ValueKind::of(kind.boxed()), Some(kind), "{kind}");
		assert!(kind.matches(kind.primitive()));
		assert!(kind.matches(kind.boxed()));
	}
}

#[test]
fn test_forms_match_only_their_own_kind() {
	for kind in ValueKind::ALL {
		let matching = ValueKind::ALL
			.into_iter()
			.filter(|other| other.matches(kind.boxed()))
			.count();
		assert_eq!(matching, 1, "{kind}");
	}
}

#[test]
fn test_non_value_types_have_no_kind() {
	assert_eq!(ValueKind::of(&builtin::string()), None);
	assert_eq!(ValueKind::of(&builtin::number()), None);
	assert_eq!(ValueKind::of(&TypeDescriptor::array(ValueKind::Int.primitive().clone())), None);
	assert_eq!(ValueKind::of(&TypeDescriptor::variable("T")), None);
}

#[rstest]
#[case(ValueKind::Byte)]
#[case(ValueKind::Char)]
#[case(ValueKind::Double)]
#[case(ValueKind::Float)]
#[case(ValueKind::Int)]
#[case(ValueKind::Long)]
#[case(ValueKind::Short)]
#[case(ValueKind::Void)]
fn test_boolean_only_casts_to_boolean(#[case] target: ValueKind) {
	let err = target.cast(&Value::Bool(true)).expect_err("boolean must not cast");
	assert_eq!(err.target, target);
	assert_eq!(ValueKind::Boolean.cast(&Value::Bool(false)), Ok(Value::Bool(false)));
}

/// Verifies that absence casts to the void kind and nothing else.
#[test]
fn test_absence_casts_only_to_void() {
	assert_eq!(ValueKind::Void.cast(&Value::Null), Ok(Value::Null));
	for kind in ValueKind::ALL.into_iter().filter(|k| *k != ValueKind::Void) {
		assert!(kind.cast(&Value::Null).is_err(), "{kind}");
	}
	assert!(ValueKind::Void.cast(&Value::Int(0)).is_err());
}

#[test]
fn test_boolean_kind_rejects_numbers() {
	assert!(ValueKind::Boolean.cast(&Value::Int(1)).is_err());
}

#[test]
fn test_objects_never_cast() {
	let s = Value::string("42");
	for kind in ValueKind::ALL {
		assert!(kind.cast(&s).is_err(), "{kind}");
	}
}

/// Verifies narrowing and widening between numeric kinds, including floating sources
/// that saturate to `int` before narrowing to `byte`, `short` or `char`.
#[rstest]
#[case::char_code(ValueKind::Int, Value::Char('A'), Value::Int(65))]
#[case::char_to_double(ValueKind::Double, Value::Char('a'), Value::Double(97.0))]
#[case::narrow_int_to_byte(ValueKind::Byte, Value::Int(300), Value::Byte(44))]
#[case::narrow_long_to_int(ValueKind::Int, Value::Long(0x1_0000_0005), Value::Int(5))]
#[case::narrow_to_short(ValueKind::Short, Value::Int(70_000), Value::Short(4464))]
#[case::truncate_double(ValueKind::Int, Value::Double(3.9), Value::Int(3))]
#[case::truncate_negative(ValueKind::Long, Value::Double(-2.5), Value::Long(-2))]
#[case::saturate_int(ValueKind::Int, Value::Double(1e20), Value::Int(i32::MAX))]
#[case::double_to_byte_through_int(ValueKind::Byte, Value::Double(1e10), Value::Byte(-1))]
#[case::double_to_short_through_int(ValueKind::Short, Value::Double(3e9), Value::Short(-1))]
#[case::double_to_char_through_int(ValueKind::Char, Value::Double(1e10), Value::Char('\u{ffff}'))]
#[case::saturate_long(ValueKind::Long, Value::Double(1e20), Value::Long(i64::MAX))]
#[case::widen_float(ValueKind::Double, Value::Float(1.5), Value::Double(1.5))]
#[case::int_to_float(ValueKind::Float, Value::Int(7), Value::Float(7.0))]
#[case::int_to_char(ValueKind::Char, Value::Int(66), Value::Char('B'))]
#[case::char_identity(ValueKind::Char, Value::Char('😀'), Value::Char('😀'))]
fn test_numeric_casts(#[case] target: ValueKind, #[case] input: Value, #[case] expected: Value) {
	assert_eq!(target.cast(&input), Ok(expected));
}

#[test]
fn test_surrogate_code_units_are_not_chars() {
	assert!(ValueKind::Char.cast(&Value::Int(0xD800)).is_err());
}

#[test]
fn test_cast_error_names_both_sides() {
	let err = ValueKind::Int.cast(&Value::Bool(true)).unwrap_err();
	assert_eq!(err.to_string(), "cannot cast boolean true to int");
}

proptest! {
	#[test]
	fn test_long_to_int_truncates(v in any::<i64>()) {
		prop_assert_eq!(ValueKind::Int.cast(&Value::Long(v)), Ok(Value::Int(v as i32)));
	}

	#[test]
	fn test_widening_is_lossless(v in any::<i32>()) {
		let wide = ValueKind::Long.cast(&Value::Int(v)).unwrap();
		prop_assert_eq!(ValueKind::Int.cast(&wide), Ok(Value::Int(v)));
	}

	#[test]
	fn test_byte_cast_matches_twos_complement(v in any::<i32>()) {
		prop_assert_eq!(ValueKind::Byte.cast(&Value::Int(v)), Ok(Value::Byte(v as i8)));
	}
}

/// Verifies which kinds widen into which.
#[rstest]
#[case::identity(ValueKind::Int, ValueKind::Int, true)]
#[case::byte_to_short(ValueKind::Short, ValueKind::Byte, true)]
#[case::char_to_int(ValueKind::Int, ValueKind::Char, true)]
#[case::int_to_double(ValueKind::Double, ValueKind::Int, true)]
#[case::long_to_float(ValueKind::Float, ValueKind::Long, true)]
#[case::double_to_int(ValueKind::Int, ValueKind::Double, false)]
#[case::long_to_int(ValueKind::Int, ValueKind::Long, false)]
#[case::byte_to_char(ValueKind::Char, ValueKind::Byte, false)]
#[case::char_to_short(ValueKind::Short, ValueKind::Char, false)]
#[case::short_to_char(ValueKind::Char, ValueKind::Short, false)]
#[case::boolean_to_int(ValueKind::Int, ValueKind::Boolean, false)]
#[case::int_to_boolean(ValueKind::Boolean, ValueKind::Int, false)]
fn test_widening(#[case] target: ValueKind, #[case] source: ValueKind, #[case] expected: bool) {
	assert_eq!(target.widens_from(source), expected, "{source} -> {target}");
}
