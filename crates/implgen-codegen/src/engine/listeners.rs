use super::{ClassPlan, LISTENER_TYPE, PROPERTY_SUPPORT};
use crate::code_writer::CodeWriter;
use std::fmt::{self, Write as _};

/// Listener methods of the observable marker, delegating to the dispatcher
pub(super) fn emit<W: fmt::Write>(_plan: &ClassPlan<'_>, w: &mut CodeWriter<W>) -> fmt::Result {
    for action in ["add", "remove"] {
        registration(w, action, false)?;
        registration(w, action, true)?;
    }

    w.blank_line()?;
    w.writeln("@Override")?;
    w.block(
        &format!("public java.util.List<{LISTENER_TYPE}> getPropertyChangeListeners()"),
        |w| {
            writeln!(
                w,
                "return java.util.Arrays.asList(this.{PROPERTY_SUPPORT}.getPropertyChangeListeners());"
            )
        },
    )?;

    w.blank_line()?;
    w.writeln("@Override")?;
    w.block(
        &format!(
            "public java.util.List<{LISTENER_TYPE}> getPropertyChangeListeners(java.lang.String propertyName)"
        ),
        |w| {
            require_non_null(w, "propertyName")?;
            writeln!(
                w,
                "return java.util.Arrays.asList(this.{PROPERTY_SUPPORT}.getPropertyChangeListeners(propertyName));"
            )
        },
    )?;

    w.blank_line()?;
    w.writeln("@Override")?;
    w.block(
        "public boolean hasListeners(java.lang.String propertyName)",
        |w| {
            require_non_null(w, "propertyName")?;
            writeln!(w, "return this.{PROPERTY_SUPPORT}.hasListeners(propertyName);")
        },
    )
}

/// `<action>PropertyChangeListener([propertyName,] listeners...)`
fn registration<W: fmt::Write>(w: &mut CodeWriter<W>, action: &str, named: bool) -> fmt::Result {
    let parameters = if named {
        format!("java.lang.String propertyName, {LISTENER_TYPE}... listeners")
    } else {
        format!("{LISTENER_TYPE}... listeners")
    };
    let target = if named { "propertyName, listener" } else { "listener" };

    w.blank_line()?;
    w.writeln("@Override")?;
    w.block(
        &format!("public void {action}PropertyChangeListener({parameters})"),
        |w| {
            if named {
                require_non_null(w, "propertyName")?;
            }
            require_non_null(w, "listeners")?;
            w.block(&format!("for ({LISTENER_TYPE} listener : listeners)"), |w| {
                writeln!(w, "this.{PROPERTY_SUPPORT}.{action}PropertyChangeListener({target});")
            })
        },
    )
}

fn require_non_null<W: fmt::Write>(w: &mut CodeWriter<W>, parameter: &str) -> fmt::Result {
    w.block(&format!("if ({parameter} == null)"), |w| {
        writeln!(
            w,
            "throw new java.lang.IllegalArgumentException(\"the argument '{parameter}' should not be null.\");"
        )
    })
}
