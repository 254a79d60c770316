//! `hashCode`, `equals` and `toString` over every member.
//!
//! Atomic cells are read once into `this<Name>`/`other<Name>` locals so each
//! method works on a single snapshot per cell.

use super::{ClassPlan, Member};
use crate::code_writer::CodeWriter;
use crate::jvm_types::{array_helper, differs};
use crate::naming::capitalize;
use implgen_core::{PrimitiveKind, TypeRef};
use std::fmt::{self, Write as _};

/// Value expression of each member on `receiver`, binding cell reads to locals
fn bind_values<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    members: &[Member<'_>],
    receiver: &str,
) -> Result<Vec<String>, fmt::Error> {
    members
        .iter()
        .map(|member| {
            if member.cell.is_none() {
                return Ok(member.read_from(receiver));
            }
            let local = format!("{receiver}{}", capitalize(member.name()));
            writeln!(w, "final {} {local} = {};", member.ty(), member.read_from(receiver))?;
            Ok(local)
        })
        .collect()
}

pub(super) fn emit_hash_code<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
) -> fmt::Result {
    w.blank_line()?;
    w.writeln("@Override")?;
    w.block("public int hashCode()", |w| {
        plan.guarded_read(w, |w| {
            let values = bind_values(w, &plan.members, "this")?;
            w.writeln("int result = 17;")?;
            for (member, value) in plan.members.iter().zip(&values) {
                let contribution = hash_contribution(w, member, value)?;
                writeln!(w, "result = 31 * result + {contribution};")?;
            }
            if plan.delegates_to_super() {
                w.writeln("result = 31 * result + super.hashCode();")?;
            }
            w.writeln("return result;")
        })
    })
}

/// `int` expression mixed into the running hash for one member
fn hash_contribution<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    value: &str,
) -> Result<String, fmt::Error> {
    Ok(match member.ty() {
        TypeRef::Primitive(PrimitiveKind::Boolean) => format!("({value} ? 1 : 0)"),
        TypeRef::Primitive(PrimitiveKind::Int) => value.to_string(),
        TypeRef::Primitive(PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Char) => {
            format!("(int) {value}")
        }
        TypeRef::Primitive(PrimitiveKind::Float) => {
            format!("java.lang.Float.floatToIntBits({value})")
        }
        TypeRef::Primitive(PrimitiveKind::Long) => {
            let bits = format!("{}Bits", member.field_name);
            writeln!(w, "final long {bits} = {value};")?;
            format!("(int) ({bits} ^ ({bits} >>> 32))")
        }
        TypeRef::Primitive(PrimitiveKind::Double) => {
            let bits = format!("{}Bits", member.field_name);
            writeln!(w, "final long {bits} = java.lang.Double.doubleToLongBits({value});")?;
            format!("(int) ({bits} ^ ({bits} >>> 32))")
        }
        TypeRef::Array(component) => {
            format!("java.util.Arrays.{}({value})", array_helper(component, "hashCode"))
        }
        _ => format!("({value} == null ? 0 : {value}.hashCode())"),
    })
}

pub(super) fn emit_equals<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    let other_type = plan.wildcard_type();

    w.blank_line()?;
    w.writeln("@Override")?;
    w.block("public boolean equals(java.lang.Object obj)", |w| {
        w.block("if (this == obj)", |w| w.writeln("return true;"))?;
        w.block("if (obj == null)", |w| w.writeln("return false;"))?;
        w.block(&format!("if (!(obj instanceof {}))", plan.simple_name), |w| {
            w.writeln("return false;")
        })?;
        if plan.delegates_to_super() {
            w.block("if (!super.equals(obj))", |w| w.writeln("return false;"))?;
        }
        if plan.members.is_empty() {
            return w.writeln("return true;");
        }
        writeln!(w, "final {other_type} other = ({other_type}) obj;")?;
        plan.guarded_read(w, |w| {
            let mine = bind_values(w, &plan.members, "this")?;
            let theirs = bind_values(w, &plan.members, "other")?;
            for ((member, a), b) in plan.members.iter().zip(&mine).zip(&theirs) {
                w.block(&format!("if ({})", differs(member.ty(), a, b)), |w| {
                    w.writeln("return false;")
                })?;
            }
            w.writeln("return true;")
        })
    })
}

pub(super) fn emit_to_string<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
) -> fmt::Result {
    w.blank_line()?;
    w.writeln("@Override")?;
    w.block("public java.lang.String toString()", |w| {
        plan.guarded_read(w, |w| {
            let values = bind_values(w, &plan.members, "this")?;
            let mut parts = vec![format!("\"{}{{\"", plan.simple_name)];
            let mut separator = "";
            for (member, value) in plan.members.iter().zip(values) {
                let rendered = match member.ty() {
                    TypeRef::Array(component) => format!(
                        "java.util.Arrays.{}({value})",
                        array_helper(component, "toString")
                    ),
                    _ => value,
                };
                parts.push(format!("\"{separator}{}=\" + {rendered}", member.name()));
                separator = ", ";
            }
            if plan.delegates_to_super() {
                parts.push(format!("\"{separator}superClass=\" + super.toString()"));
            }
            parts.push("'}'".to_string());
            w.write("return ")?;
            w.write_separated(&parts, " + ", |w, part| w.write(part))?;
            w.writeln(";")
        })
    })
}
