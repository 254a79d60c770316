//! JVM type rules used by the generated code.
//!
//! # Atomic Cells
//!
//! | Declared type | Cell | Packed | Pack | Unpack |
//! |---------------|------|--------|------|--------|
//! | `boolean` | `AtomicBoolean` | `boolean` | `v` | `p` |
//! | `int` | `AtomicInteger` | `int` | `v` | `p` |
//! | `short`/`byte`/`char` | `AtomicInteger` | `int` | `(int) v` | `(short) p` ... |
//! | `float` | `AtomicInteger` | `int` | `Float.floatToRawIntBits(v)` | `Float.intBitsToFloat(p)` |
//! | `long` | `AtomicLong` | `long` | `v` | `p` |
//! | `double` | `AtomicLong` | `long` | `Double.doubleToRawLongBits(v)` | `Double.longBitsToDouble(p)` |
//! | reference `T` | `AtomicReference<T>` | `T` | `v` | `p` |
//!
//! [`JvmValue`] and [`PackedBits`] reproduce the same conversions on Rust
//! values, together with the bit-pattern equality and hash contribution the
//! generated `equals`/`hashCode` use.

use implgen_core::{PrimitiveKind, TypeRef};

const ATOMIC_PACKAGE: &str = "java.util.concurrent.atomic";

/// Width of the atomic cell a primitive is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellWidth {
    Boolean,
    Bits32,
    Bits64,
}

impl CellWidth {
    pub fn of(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => CellWidth::Boolean,
            PrimitiveKind::Byte
            | PrimitiveKind::Short
            | PrimitiveKind::Int
            | PrimitiveKind::Char
            | PrimitiveKind::Float => CellWidth::Bits32,
            PrimitiveKind::Long | PrimitiveKind::Double => CellWidth::Bits64,
        }
    }
}

/// Atomic cell holding one generated member
#[derive(Debug, Clone, PartialEq)]
pub enum CellKind {
    Primitive(PrimitiveKind),
    Reference(TypeRef),
}

impl CellKind {
    pub fn for_type(ty: &TypeRef) -> Self {
        match ty.primitive_kind() {
            Some(kind) => CellKind::Primitive(kind),
            None => CellKind::Reference(ty.clone()),
        }
    }

    /// Qualified cell class, with type argument for reference cells
    pub fn cell_type(&self) -> String {
        match self {
            CellKind::Primitive(kind) => match CellWidth::of(*kind) {
                CellWidth::Boolean => format!("{ATOMIC_PACKAGE}.AtomicBoolean"),
                CellWidth::Bits32 => format!("{ATOMIC_PACKAGE}.AtomicInteger"),
                CellWidth::Bits64 => format!("{ATOMIC_PACKAGE}.AtomicLong"),
            },
            CellKind::Reference(ty) => format!("{ATOMIC_PACKAGE}.AtomicReference<{ty}>"),
        }
    }

    /// Type of the value the cell stores
    pub fn packed_type(&self) -> String {
        match self {
            CellKind::Primitive(kind) => match CellWidth::of(*kind) {
                CellWidth::Boolean => "boolean".to_string(),
                CellWidth::Bits32 => "int".to_string(),
                CellWidth::Bits64 => "long".to_string(),
            },
            CellKind::Reference(ty) => ty.to_string(),
        }
    }

    /// `new <cell>()`
    pub fn new_cell(&self) -> String {
        format!("new {}()", self.cell_type())
    }

    /// `new <cell>(<packed>)`
    pub fn new_cell_holding(&self, packed: &str) -> String {
        format!("new {}({packed})", self.cell_type())
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, CellKind::Reference(_))
    }

    /// Expression converting a value of the declared type to the packed type
    pub fn pack(&self, value: &str) -> String {
        match self {
            CellKind::Primitive(PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char) => {
                format!("(int) {value}")
            }
            CellKind::Primitive(PrimitiveKind::Float) => {
                format!("java.lang.Float.floatToRawIntBits({value})")
            }
            CellKind::Primitive(PrimitiveKind::Double) => {
                format!("java.lang.Double.doubleToRawLongBits({value})")
            }
            _ => value.to_string(),
        }
    }

    /// Expression converting a packed value back to the declared type
    pub fn unpack(&self, packed: &str) -> String {
        match self {
            CellKind::Primitive(
                kind @ (PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char),
            ) => format!("({kind}) {packed}"),
            CellKind::Primitive(PrimitiveKind::Float) => {
                format!("java.lang.Float.intBitsToFloat({packed})")
            }
            CellKind::Primitive(PrimitiveKind::Double) => {
                format!("java.lang.Double.longBitsToDouble({packed})")
            }
            _ => packed.to_string(),
        }
    }
}

/// Zero value of a type, usable to initialize a local
pub fn default_value(ty: &TypeRef) -> &'static str {
    ty.primitive_kind()
        .map_or("null", PrimitiveKind::default_literal)
}

/// Condition that is true when `a` and `b` differ, as generated `equals` sees it
///
/// Floating-point values compare by bit pattern so that NaN equals itself and
/// `-0.0` differs from `0.0`.
pub fn differs(ty: &TypeRef, a: &str, b: &str) -> String {
    match ty {
        TypeRef::Primitive(PrimitiveKind::Float) => format!(
            "java.lang.Float.floatToIntBits({a}) != java.lang.Float.floatToIntBits({b})"
        ),
        TypeRef::Primitive(PrimitiveKind::Double) => format!(
            "java.lang.Double.doubleToLongBits({a}) != java.lang.Double.doubleToLongBits({b})"
        ),
        TypeRef::Primitive(_) => format!("{a} != {b}"),
        TypeRef::Array(component) => {
            format!("!java.util.Arrays.{}({a}, {b})", array_helper(component, "equals"))
        }
        _ => format!("{a} != {b} && ({a} == null || !{a}.equals({b}))"),
    }
}

/// Condition that is true when a setter changed the value, for notification
pub fn changed(ty: &TypeRef, old: &str, new: &str) -> String {
    if ty.is_primitive() {
        format!("{old} != {new}")
    } else {
        format!("{old} != {new} && ({old} == null || !{old}.equals({new}))")
    }
}

/// `java.util.Arrays` method for an array with `component` elements
///
/// Arrays of references use the `deep` variants so nested arrays compare by
/// content.
pub fn array_helper(component: &TypeRef, method: &str) -> String {
    if component.is_primitive() {
        method.to_string()
    } else {
        format!("deep{}", crate::naming::capitalize(method))
    }
}

/// Value in a JVM primitive slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JvmValue {
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Char(u16),
    Float(f32),
    Double(f64),
}

/// Content of an atomic cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackedBits {
    Boolean(bool),
    Bits32(i32),
    Bits64(i64),
}

impl PackedBits {
    pub fn width(self) -> CellWidth {
        match self {
            PackedBits::Boolean(_) => CellWidth::Boolean,
            PackedBits::Bits32(_) => CellWidth::Bits32,
            PackedBits::Bits64(_) => CellWidth::Bits64,
        }
    }
}

impl JvmValue {
    pub fn kind(self) -> PrimitiveKind {
        match self {
            JvmValue::Boolean(_) => PrimitiveKind::Boolean,
            JvmValue::Byte(_) => PrimitiveKind::Byte,
            JvmValue::Short(_) => PrimitiveKind::Short,
            JvmValue::Int(_) => PrimitiveKind::Int,
            JvmValue::Long(_) => PrimitiveKind::Long,
            JvmValue::Char(_) => PrimitiveKind::Char,
            JvmValue::Float(_) => PrimitiveKind::Float,
            JvmValue::Double(_) => PrimitiveKind::Double,
        }
    }

    /// Same conversion as [`CellKind::pack`]
    pub fn pack(self) -> PackedBits {
        match self {
            JvmValue::Boolean(v) => PackedBits::Boolean(v),
            JvmValue::Byte(v) => PackedBits::Bits32(i32::from(v)),
            JvmValue::Short(v) => PackedBits::Bits32(i32::from(v)),
            JvmValue::Int(v) => PackedBits::Bits32(v),
            JvmValue::Char(v) => PackedBits::Bits32(i32::from(v)),
            JvmValue::Float(v) => PackedBits::Bits32(v.to_bits() as i32),
            JvmValue::Long(v) => PackedBits::Bits64(v),
            JvmValue::Double(v) => PackedBits::Bits64(v.to_bits() as i64),
        }
    }

    /// Same conversion as [`CellKind::unpack`]; `None` if the cell width does
    /// not belong to `kind`
    pub fn unpack(kind: PrimitiveKind, bits: PackedBits) -> Option<JvmValue> {
        if CellWidth::of(kind) != bits.width() {
            return None;
        }
        Some(match (kind, bits) {
            (_, PackedBits::Boolean(v)) => JvmValue::Boolean(v),
            (PrimitiveKind::Byte, PackedBits::Bits32(v)) => JvmValue::Byte(v as i8),
            (PrimitiveKind::Short, PackedBits::Bits32(v)) => JvmValue::Short(v as i16),
            (PrimitiveKind::Char, PackedBits::Bits32(v)) => JvmValue::Char(v as u16),
            (PrimitiveKind::Float, PackedBits::Bits32(v)) => JvmValue::Float(f32::from_bits(v as u32)),
            (_, PackedBits::Bits32(v)) => JvmValue::Int(v),
            (PrimitiveKind::Double, PackedBits::Bits64(v)) => {
                JvmValue::Double(f64::from_bits(v as u64))
            }
            (_, PackedBits::Bits64(v)) => JvmValue::Long(v),
        })
    }

    /// Bits compared by generated `equals`
    ///
    /// Floats use the canonical NaN like `floatToIntBits`/`doubleToLongBits`.
    pub fn equality_bits(self) -> i64 {
        match self {
            JvmValue::Boolean(v) => i64::from(v),
            JvmValue::Byte(v) => i64::from(v),
            JvmValue::Short(v) => i64::from(v),
            JvmValue::Int(v) => i64::from(v),
            JvmValue::Char(v) => i64::from(v),
            JvmValue::Long(v) => v,
            JvmValue::Float(v) => i64::from(float_to_int_bits(v)),
            JvmValue::Double(v) => double_to_long_bits(v),
        }
    }

    /// Equality as generated `equals` decides it
    pub fn generated_equals(self, other: JvmValue) -> bool {
        self.kind() == other.kind() && self.equality_bits() == other.equality_bits()
    }

    /// Contribution to the running hash of generated `hashCode`
    pub fn hash_contribution(self) -> i32 {
        match self {
            JvmValue::Boolean(v) => i32::from(v),
            JvmValue::Byte(v) => i32::from(v),
            JvmValue::Short(v) => i32::from(v),
            JvmValue::Int(v) => v,
            JvmValue::Char(v) => i32::from(v),
            JvmValue::Long(v) => fold_long(v),
            JvmValue::Float(v) => float_to_int_bits(v),
            JvmValue::Double(v) => fold_long(double_to_long_bits(v)),
        }
    }
}

/// `result = 31 * result + c` over `contributions`, seeded with 17
pub fn running_hash(contributions: impl IntoIterator<Item = i32>) -> i32 {
    contributions
        .into_iter()
        .fold(17i32, |result, c| result.wrapping_mul(31).wrapping_add(c))
}

fn float_to_int_bits(v: f32) -> i32 {
    if v.is_nan() {
        0x7fc0_0000
    } else {
        v.to_bits() as i32
    }
}

fn double_to_long_bits(v: f64) -> i64 {
    if v.is_nan() {
        0x7ff8_0000_0000_0000
    } else {
        v.to_bits() as i64
    }
}

/// `(int) (v ^ (v >>> 32))`
fn fold_long(v: i64) -> i32 {
    (v ^ ((v as u64) >> 32) as i64) as i32
}
