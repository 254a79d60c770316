use super::{ClassPlan, Member, Storage, PROPERTY_SUPPORT, SUPPORT_TYPE};
use crate::code_writer::CodeWriter;
use std::fmt::{self, Write as _};
use tracing::debug;

/// Full constructor, then the read-only one
///
/// The read-only constructor is emitted only when it takes at least one
/// read-only property and its signature differs from the full one.
pub(super) fn emit<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    let full: Vec<&Member<'_>> = plan.members.iter().filter(|m| m.in_constructor).collect();
    let read_only: Vec<&Member<'_>> = plan
        .members
        .iter()
        .filter(|m| m.in_read_only_constructor)
        .collect();

    emit_constructor(plan, w, &full)?;
    let has_read_only_property = read_only.iter().any(|m| m.storage == Storage::Generated);
    if !has_read_only_property || read_only.len() == full.len() {
        debug!(
            class = %plan.simple_name,
            parameters = read_only.len(),
            "read-only constructor skipped"
        );
        return Ok(());
    }
    emit_constructor(plan, w, &read_only)
}

fn emit_constructor<W: fmt::Write>(
    plan: &ClassPlan<'_>,
    w: &mut CodeWriter<W>,
    parameters: &[&Member<'_>],
) -> fmt::Result {
    w.blank_line()?;
    write!(w, "public {}(", plan.simple_name)?;
    w.write_separated(parameters, ", ", |w, m| write!(w, "{} {}", m.ty(), m.field_name))?;
    w.block(")", |w| {
        for member in parameters {
            w.writeln(&member.store("this", &member.retained(&member.field_name)))?;
        }
        if plan.declares_support {
            writeln!(w, "this.{PROPERTY_SUPPORT} = new {SUPPORT_TYPE}(this);")?;
        }
        Ok(())
    })
}
