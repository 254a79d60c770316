//! Readers and writers.
//!
//! Writers of an observable type fire `propertySupport.firePropertyChange`
//! only after any lock is released, and only when the stored value changed.

use super::{with_lock, AccessorMethod, ClassPlan, LockMode, Member, Variant, PROPERTY_SUPPORT};
use crate::code_writer::CodeWriter;
use crate::jvm_types::{changed, default_value, CellKind};
use std::fmt::{self, Write as _};

pub(super) fn emit<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    for member in &plan.members {
        if let Some(reader) = &member.reader {
            emit_reader(plan, w, member, reader)?;
        }
        if let Some(writer) = &member.writer {
            emit_writer(plan, w, member, writer)?;
        }
    }
    Ok(())
}

fn signature_prelude<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    accessor: &AccessorMethod,
) -> fmt::Result {
    w.blank_line()?;
    if accessor.is_override {
        w.writeln("@Override")?;
    }
    Ok(())
}

fn emit_reader<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    reader: &AccessorMethod,
) -> fmt::Result {
    signature_prelude(w, reader)?;
    let header = format!(
        "{}{} {}()",
        reader.visibility.prefix(),
        member.ty(),
        reader.name
    );
    w.block(&header, |w| match &member.cell {
        Some(cell) if cell.is_reference() => {
            writeln!(w, "final {} value = this.{}.get();", member.ty(), member.field_name)?;
            writeln!(w, "return {};", member.retained("value"))
        }
        Some(_) => writeln!(w, "return {};", member.read_from("this")),
        None => {
            let value = member.retained(&member.read_from("this"));
            plan.guarded_read(w, |w| writeln!(w, "return {value};"))
        }
    })
}

fn emit_writer<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    writer: &AccessorMethod,
) -> fmt::Result {
    signature_prelude(w, writer)?;
    let parameter = member.setter_parameter();
    let header = format!(
        "{}void {}({} {parameter})",
        writer.visibility.prefix(),
        writer.name,
        member.ty()
    );
    w.block(&header, |w| match &member.cell {
        Some(cell) => atomic_writer(plan, w, member, cell, &parameter),
        None if plan.observable => observable_writer(plan, w, member, &parameter),
        None => {
            let store = member.store("this", &member.retained(&parameter));
            if plan.variant == Variant::Locked {
                with_lock(w, LockMode::Write, |w| w.writeln(&store))
            } else {
                w.writeln(&store)
            }
        }
    })
}

fn observable_writer<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    parameter: &str,
) -> fmt::Result {
    let ty = member.ty();
    let field = &member.field_name;

    if plan.variant != Variant::Locked {
        writeln!(w, "final {ty} oldValue = this.{field};")?;
        writeln!(w, "final {ty} newValue = {};", member.retained(parameter))?;
        writeln!(w, "this.{field} = newValue;")?;
        return w.block(&format!("if ({})", changed(ty, "oldValue", "newValue")), |w| {
            fire(w, member, "oldValue", "newValue")
        });
    }

    let default = default_value(ty);
    writeln!(w, "{ty} oldValue = {default};")?;
    writeln!(w, "{ty} newValue = {default};")?;
    w.writeln("boolean changed = false;")?;
    with_lock(w, LockMode::Write, |w| {
        writeln!(w, "oldValue = this.{field};")?;
        writeln!(w, "newValue = {};", member.retained(parameter))?;
        writeln!(w, "this.{field} = newValue;")?;
        writeln!(w, "changed = {};", changed(ty, "oldValue", "newValue"))
    })?;
    w.block("if (changed)", |w| fire(w, member, "oldValue", "newValue"))
}

fn atomic_writer<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    cell: &CellKind,
    parameter: &str,
) -> fmt::Result {
    let field = &member.field_name;
    if !plan.observable {
        return w.writeln(&member.store("this", &member.retained(parameter)));
    }

    let ty = member.ty();
    writeln!(w, "final {ty} newValue = {};", member.retained(parameter))?;
    if cell.is_reference() {
        writeln!(w, "final {ty} oldValue = this.{field}.getAndSet(newValue);")?;
        return w.block(&format!("if ({})", changed(ty, "oldValue", "newValue")), |w| {
            fire(w, member, "oldValue", "newValue")
        });
    }

    let packed = cell.packed_type();
    writeln!(w, "final {packed} newPacked = {};", cell.pack("newValue"))?;
    writeln!(w, "final {packed} oldPacked = this.{field}.getAndSet(newPacked);")?;
    w.block("if (oldPacked != newPacked)", |w| {
        fire(w, member, &cell.unpack("oldPacked"), "newValue")
    })
}

fn fire<W: fmt::Write>(
    w: &mut CodeWriter<W>,
    member: &Member<'_>,
    old: &str,
    new: &str,
) -> fmt::Result {
    writeln!(
        w,
        "this.{PROPERTY_SUPPORT}.firePropertyChange(\"{}\", {old}, {new});",
        member.name()
    )
}
