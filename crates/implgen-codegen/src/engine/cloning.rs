use super::{
    with_lock, ClassPlan, LockMode, INSTANCE_LOCK, LOCK_IMPL, PROPERTY_SUPPORT, SUPPORT_TYPE,
};
use crate::code_writer::CodeWriter;
use std::fmt::{self, Write as _};

/// `clone()` on top of `super.clone()`, rebinding per-instance state
///
/// The copy gets its own lock, dispatcher and atomic cells; listeners are
/// not carried over.
pub(super) fn emit<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    let self_type = plan.self_type();

    w.blank_line()?;
    w.writeln("@Override")?;
    if plan.is_generic() {
        w.writeln("@SuppressWarnings(\"unchecked\")")?;
    }
    w.block(&format!("public {self_type} clone()"), |w| {
        let copy = |w: &mut CodeWriter<W>| -> fmt::Result {
            if plan.delegates_to_super() {
                copy_body(plan, w, &self_type)
            } else {
                w.try_catch(
                    |w| copy_body(plan, w, &self_type),
                    "java.lang.CloneNotSupportedException ex",
                    |w| w.writeln("throw new java.lang.IllegalStateException(ex);"),
                )
            }
        };
        if plan.uses_lock() {
            with_lock(w, LockMode::Read, copy)
        } else {
            copy(w)
        }
    })
}

fn copy_body<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    self_type: &str,
) -> fmt::Result {
    writeln!(w, "final {self_type} copy = ({self_type}) super.clone();")?;
    if plan.declares_lock {
        writeln!(w, "copy.{INSTANCE_LOCK} = new {LOCK_IMPL}();")?;
    }
    if plan.declares_support {
        writeln!(w, "copy.{PROPERTY_SUPPORT} = new {SUPPORT_TYPE}(copy);")?;
    }
    for member in &plan.members {
        if let Some(cell) = &member.cell {
            let current = format!("this.{}.get()", member.field_name);
            writeln!(
                w,
                "copy.{} = {};",
                member.field_name,
                cell.new_cell_holding(&current)
            )?;
        }
    }
    w.writeln("return copy;")
}
