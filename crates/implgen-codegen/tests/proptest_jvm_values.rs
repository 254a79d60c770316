//! Property-based tests for atomic-cell packing and generated equality
//!
//! Mirrors the conversions emitted for the atomic variant and checks that a
//! value always survives a trip through its cell.

use implgen_codegen::jvm_types::{CellWidth, JvmValue, PackedBits};
use proptest::prelude::*;

// Strategy: any primitive value, floats drawn from raw bits so NaN payloads and -0.0 occur
fn arb_jvm_value() -> impl Strategy<Value = JvmValue> {
    prop_oneof![
        any::<bool>().prop_map(JvmValue::Boolean),
        any::<i8>().prop_map(JvmValue::Byte),
        any::<i16>().prop_map(JvmValue::Short),
        any::<i32>().prop_map(JvmValue::Int),
        any::<i64>().prop_map(JvmValue::Long),
        any::<u16>().prop_map(JvmValue::Char),
        any::<u32>().prop_map(|bits| JvmValue::Float(f32::from_bits(bits))),
        any::<u64>().prop_map(|bits| JvmValue::Double(f64::from_bits(bits))),
    ]
}

/// Bit-exact comparison, so NaN payloads must survive too
fn same_bits(a: JvmValue, b: JvmValue) -> bool {
    match (a, b) {
        (JvmValue::Float(x), JvmValue::Float(y)) => x.to_bits() == y.to_bits(),
        (JvmValue::Double(x), JvmValue::Double(y)) => x.to_bits() == y.to_bits(),
        _ => a == b,
    }
}

proptest! {
    /// Property: unpack(pack(v)) restores v exactly for every primitive kind
    #[test]
    fn proptest_pack_unpack_round_trip(value in arb_jvm_value()) {
        let packed = value.pack();
        let restored = JvmValue::unpack(value.kind(), packed);

        prop_assert!(restored.is_some());
        prop_assert!(same_bits(value, restored.unwrap_or(value)));
    }

    /// Property: the packed width always matches the cell chosen for the kind
    #[test]
    fn proptest_packed_width_matches_cell(value in arb_jvm_value()) {
        prop_assert_eq!(value.pack().width(), CellWidth::of(value.kind()));
    }

    /// Property: generated equals is reflexive, NaN included
    #[test]
    fn proptest_generated_equals_is_reflexive(value in arb_jvm_value()) {
        prop_assert!(value.generated_equals(value));
    }

    /// Property: equal values contribute equal hashes
    #[test]
    fn proptest_equal_values_hash_alike(a in arb_jvm_value(), b in arb_jvm_value()) {
        if a.generated_equals(b) {
            prop_assert_eq!(a.hash_contribution(), b.hash_contribution());
        }
    }

    /// Property: any 32-bit cell content unpacks as an int unchanged
    #[test]
    fn proptest_int_cell_is_identity(bits in any::<i32>()) {
        let value = JvmValue::unpack(implgen_core::PrimitiveKind::Int, PackedBits::Bits32(bits));

        prop_assert_eq!(value, Some(JvmValue::Int(bits)));
    }
}

#[test]
fn boundary_values_round_trip() {
    let samples = [
        JvmValue::Boolean(true),
        JvmValue::Byte(i8::MIN),
        JvmValue::Short(i16::MIN),
        JvmValue::Short(i16::MAX),
        JvmValue::Char(u16::MAX),
        JvmValue::Int(i32::MIN),
        JvmValue::Long(i64::MAX),
        JvmValue::Float(f32::NAN),
        JvmValue::Float(-0.0),
        JvmValue::Float(f32::INFINITY),
        JvmValue::Double(f64::NAN),
        JvmValue::Double(f64::MIN_POSITIVE),
    ];

    for value in samples {
        let restored = JvmValue::unpack(value.kind(), value.pack()).unwrap();
        assert!(same_bits(value, restored), "{value:?} became {restored:?}");
    }
}
