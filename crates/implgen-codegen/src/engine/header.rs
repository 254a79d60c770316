use super::{
    ClassPlan, GENERATED_MARKER, INSTANCE_LOCK, LOCK_IMPL, LOCK_TYPE, PROPERTY_SUPPORT,
    SUPPORT_TYPE, Storage,
};
use crate::code_writer::CodeWriter;
use implgen_core::ElementKind;
use std::fmt::{self, Write as _};

pub(super) fn emit_header<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    if !plan.package.is_empty() {
        writeln!(w, "package {};", plan.package)?;
        w.blank_line()?;
    }
    w.writeln(GENERATED_MARKER)?;

    let mut declaration = format!(
        "public {}class {}",
        if plan.is_abstract { "abstract " } else { "" },
        plan.simple_name
    );
    if !plan.model.type_parameters.is_empty() {
        let parameters: Vec<String> = plan
            .model
            .type_parameters
            .iter()
            .map(ToString::to_string)
            .collect();
        write!(declaration, "<{}>", parameters.join(", "))?;
    }

    let root = plan.model.root_type();
    let mut implemented = Vec::new();
    match plan.model.element_kind {
        ElementKind::AbstractClass => write!(declaration, " extends {root}")?,
        ElementKind::Interface | ElementKind::Class => {
            if let Some(super_type) = &plan.config.super_type {
                write!(declaration, " extends {super_type}")?;
            }
            implemented.push(root.to_string());
        }
    }
    if plan.config.serializable {
        implemented.push("java.io.Serializable".to_string());
    }
    if plan.config.cloneable {
        implemented.push("java.lang.Cloneable".to_string());
    }
    if !implemented.is_empty() {
        write!(declaration, " implements {}", implemented.join(", "))?;
    }

    writeln!(w, "{declaration} {{")
}

pub(super) fn emit_fields<W: fmt::Write>(plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    let mut lines = Vec::new();
    if plan.config.serializable {
        lines.push(format!(
            "private static final long serialVersionUID = {}L;",
            plan.config.serial_version
        ));
    }

    let visibility = plan.config.field_visibility.prefix();
    let state = plan.instance_state_modifier();
    for member in plan.members.iter().filter(|m| m.storage == Storage::Generated) {
        lines.push(match &member.cell {
            Some(cell) => format!(
                "{visibility}{state}{} {} = {};",
                cell.cell_type(),
                member.field_name,
                cell.new_cell()
            ),
            None => format!("{visibility}{} {};", member.ty(), member.field_name),
        });
    }

    if plan.declares_lock {
        lines.push(format!(
            "protected {state}{LOCK_TYPE} {INSTANCE_LOCK} = new {LOCK_IMPL}();"
        ));
    }
    if plan.declares_support {
        lines.push(format!("protected {state}{SUPPORT_TYPE} {PROPERTY_SUPPORT};"));
    }

    if lines.is_empty() {
        return Ok(());
    }
    w.blank_line()?;
    for line in &lines {
        w.writeln(line)?;
    }
    Ok(())
}
