//! The builtin type universe.
//!
//! Declared once per process on first use. Boxed value types extend `Number` (or
//! implement `Serializable` directly) and `Comparable<Self>`; the collection types
//! form the usual `Iterable <- Collection <- List <- ArrayList` chain.

use std::sync::LazyLock;

use crate::descriptor::{Shape, TypeDescriptor};
use crate::kind::ValueKind;
use crate::raw::{RawType, TypeFlavor};

/// Raw declarations of the builtin types.
pub struct Builtins {
	pub object: RawType,
	pub serializable: RawType,
	pub char_sequence: RawType,
	pub comparable: RawType,
	pub number: RawType,
	pub string: RawType,
	pub iterable: RawType,
	pub collection: RawType,
	pub list: RawType,
	pub array_list: RawType,
	pub map: RawType,
	pub hash_map: RawType,
	/// Primitive and boxed descriptor per [`ValueKind`], indexed by discriminant.
	kinds: [(TypeDescriptor, TypeDescriptor); ValueKind::COUNT],
}

static BUILTINS: LazyLock<Builtins> = LazyLock::new(Builtins::declare);

impl Builtins {
	fn declare() -> Self {
		let object = RawType::leaf("Object", TypeFlavor::Top);
		let serializable = RawType::interface("Serializable").build();
		let char_sequence = RawType::interface("CharSequence").build();
		let comparable = RawType::interface("Comparable").param("T").build();
		let comparable_self = |name: &str| {
			apply(&comparable, [TypeDescriptor::of(RawType::leaf(name, TypeFlavor::Class))])
		};

		let number = RawType::class("Number")
			.extends(serializable.clone().into())
			.build();
		let string = RawType::class("String")
			.extends(serializable.clone().into())
			.extends(char_sequence.clone().into())
			.extends(comparable_self("String"))
			.build();

		let iterable = RawType::interface("Iterable").param("T").build();
		let collection = RawType::interface("Collection")
			.param("E")
			.extends(apply(&iterable, [TypeDescriptor::variable("E")]))
			.build();
		let list = RawType::interface("List")
			.param("E")
			.extends(apply(&collection, [TypeDescriptor::variable("E")]))
			.build();
		let array_list = RawType::class("ArrayList")
			.param("E")
			.extends(apply(&list, [TypeDescriptor::variable("E")]))
			.extends(serializable.clone().into())
			.build();
		let map = RawType::interface("Map").param("K").param("V").build();
		let hash_map = RawType::class("HashMap")
			.param("K")
			.param("V")
			.extends(apply(
				&map,
				[TypeDescriptor::variable("K"), TypeDescriptor::variable("V")],
			))
			.extends(serializable.clone().into())
			.build();

		let kinds = ValueKind::ALL.map(|kind| {
			let primitive = match kind {
				ValueKind::Void => RawType::leaf(kind.primitive_name(), TypeFlavor::Void),
				_ => RawType::leaf(kind.primitive_name(), TypeFlavor::Primitive),
			};
			let boxed_name = kind.boxed_name();
			let boxed = match kind {
				ValueKind::Void => RawType::class(boxed_name).build(),
				ValueKind::Boolean | ValueKind::Char => RawType::class(boxed_name)
					.extends(serializable.clone().into())
					.extends(comparable_self(boxed_name))
					.build(),
				_ => RawType::class(boxed_name)
					.extends(number.clone().into())
					.extends(comparable_self(boxed_name))
					.build(),
			};
			(TypeDescriptor::of(primitive), TypeDescriptor::of(boxed))
		});

		Self {
			object,
			serializable,
			char_sequence,
			comparable,
			number,
			string,
			iterable,
			collection,
			list,
			array_list,
			map,
			hash_map,
			kinds,
		}
	}

	pub(crate) fn kind_forms(&self, kind: ValueKind) -> &(TypeDescriptor, TypeDescriptor) {
		&self.kinds[kind as usize]
	}
}

/// Builtin parameterization; arity is known to match.
fn apply<const N: usize>(raw: &RawType, args: [TypeDescriptor; N]) -> TypeDescriptor {
	debug_assert_eq!(raw.params().len(), N, "builtin arity mismatch for {raw}");
	TypeDescriptor::from_shape(Shape::Parameterized {
		raw: raw.clone(),
		args: args.into(),
	})
}

/// Returns the builtin declarations.
pub fn types() -> &'static Builtins {
	&BUILTINS
}

/// `Object`, the universal reference supertype.
pub fn object() -> TypeDescriptor {
	types().object.clone().into()
}

/// `Serializable`.
pub fn serializable() -> TypeDescriptor {
	types().serializable.clone().into()
}

/// `CharSequence`.
pub fn char_sequence() -> TypeDescriptor {
	types().char_sequence.clone().into()
}

/// `Number`.
pub fn number() -> TypeDescriptor {
	types().number.clone().into()
}

/// `String`.
pub fn string() -> TypeDescriptor {
	types().string.clone().into()
}

/// `Comparable<t>`.
pub fn comparable(t: TypeDescriptor) -> TypeDescriptor {
	apply(&types().comparable, [t])
}

/// `Iterable<t>`.
pub fn iterable(t: TypeDescriptor) -> TypeDescriptor {
	apply(&types().iterable, [t])
}

/// `Collection<e>`.
pub fn collection(e: TypeDescriptor) -> TypeDescriptor {
	apply(&types().collection, [e])
}

/// `List<e>`.
pub fn list(e: TypeDescriptor) -> TypeDescriptor {
	apply(&types().list, [e])
}

/// `ArrayList<e>`.
pub fn array_list(e: TypeDescriptor) -> TypeDescriptor {
	apply(&types().array_list, [e])
}

/// `Map<k, v>`.
pub fn map(k: TypeDescriptor, v: TypeDescriptor) -> TypeDescriptor {
	apply(&types().map, [k, v])
}

/// `HashMap<k, v>`.
pub fn hash_map(k: TypeDescriptor, v: TypeDescriptor) -> TypeDescriptor {
	apply(&types().hash_map, [k, v])
}
