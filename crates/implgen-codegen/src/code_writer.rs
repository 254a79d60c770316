//! Indentation-aware writer for generated Java source.
//!
//! Indentation is tracked with an `Rc<Cell<usize>>` so that the guard returned
//! by [`CodeWriter::indent`] does not hold a borrow of the writer. Text passed
//! to [`CodeWriter::write`] may contain newlines; every non-blank line is
//! indented, so `write!`/`writeln!` work directly on a `CodeWriter`.
//!
//! ```
//! use implgen_codegen::code_writer::CodeWriter;
//! use std::fmt::Write as _;
//!
//! let mut output = String::new();
//! let mut w = CodeWriter::new(&mut output);
//!
//! w.block("public int size()", |w| writeln!(w, "return {};", 3)).unwrap();
//!
//! assert_eq!(output, "public int size() {\n    return 3;\n}\n");
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Writer that tracks indentation and knows Java block syntax
pub struct CodeWriter<W> {
    writer: W,
    indent_level: Rc<Cell<usize>>,
    indent_string: String,
    at_line_start: bool,
}

impl<W: fmt::Write> CodeWriter<W> {
    /// Create a writer with 4-space indentation
    pub fn new(writer: W) -> Self {
        Self::with_indent_spaces(writer, 4)
    }

    pub fn with_indent_spaces(writer: W, spaces: usize) -> Self {
        Self {
            writer,
            indent_level: Rc::new(Cell::new(0)),
            indent_string: " ".repeat(spaces),
            at_line_start: true,
        }
    }

    /// Write text, indenting every line that starts with visible content
    pub fn write(&mut self, text: &str) -> fmt::Result {
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.writer.write_char('\n')?;
                self.at_line_start = true;
            }
            if line.is_empty() {
                continue;
            }
            if self.at_line_start && !line.trim().is_empty() {
                for _ in 0..self.indent_level.get() {
                    self.writer.write_str(&self.indent_string)?;
                }
                self.at_line_start = false;
            }
            self.writer.write_str(line)?;
        }
        Ok(())
    }

    pub fn writeln(&mut self, text: &str) -> fmt::Result {
        self.write(text)?;
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    pub fn blank_line(&mut self) -> fmt::Result {
        self.writer.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }

    /// Indentation increases while the guard is alive
    pub fn indent(&mut self) -> IndentGuard {
        self.indent_level.set(self.indent_level.get() + 1);
        IndentGuard {
            indent_level: Rc::clone(&self.indent_level),
        }
    }

    /// `header {`, indented body, `}`
    pub fn block<F>(&mut self, header: &str, body: F) -> fmt::Result
    where
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln(&format!("{header} {{"))?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("}")
    }

    /// `try { .. } finally { .. }`
    pub fn try_finally<B, F>(&mut self, body: B, finally: F) -> fmt::Result
    where
        B: FnOnce(&mut Self) -> fmt::Result,
        F: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln("try {")?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln("} finally {")?;
        {
            let _indent = self.indent();
            finally(self)?;
        }
        self.writeln("}")
    }

    /// `try { .. } catch (<catch_header>) { .. }`
    pub fn try_catch<B, C>(&mut self, body: B, catch_header: &str, handler: C) -> fmt::Result
    where
        B: FnOnce(&mut Self) -> fmt::Result,
        C: FnOnce(&mut Self) -> fmt::Result,
    {
        self.writeln("try {")?;
        {
            let _indent = self.indent();
            body(self)?;
        }
        self.writeln(&format!("}} catch ({catch_header}) {{"))?;
        {
            let _indent = self.indent();
            handler(self)?;
        }
        self.writeln("}")
    }

    /// Parameter lists and `+` chains: `separator` between items, never leading
    pub fn write_separated<I, F>(&mut self, items: I, separator: &str, mut item: F) -> fmt::Result
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item) -> fmt::Result,
    {
        for (index, next) in items.into_iter().enumerate() {
            if index > 0 {
                self.write(separator)?;
            }
            item(self, next)?;
        }
        Ok(())
    }
}

impl<W: fmt::Write> fmt::Write for CodeWriter<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write(s)
    }
}

/// RAII guard that maintains indentation level
pub struct IndentGuard {
    indent_level: Rc<Cell<usize>>,
}

impl Drop for IndentGuard {
    fn drop(&mut self) {
        let current = self.indent_level.get();
        self.indent_level.set(current.saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use std::fmt::Write as _;

    #[test]
    fn CodeWriter___nested_indent___indents_each_level() {
        let mut output = String::new();
        let mut w = CodeWriter::with_indent_spaces(&mut output, 2);

        w.writeln("level 0").unwrap();
        {
            let _indent = w.indent();
            w.writeln("level 1").unwrap();
            {
                let _indent = w.indent();
                w.writeln("level 2").unwrap();
            }
            w.writeln("level 1 again").unwrap();
        }
        w.writeln("level 0 again").unwrap();

        assert_eq!(
            output,
            "level 0\n  level 1\n    level 2\n  level 1 again\nlevel 0 again\n"
        );
    }

    #[test]
    fn CodeWriter___block___wraps_body_in_braces() {
        let mut output = String::new();
        let mut w = CodeWriter::new(&mut output);

        w.block("public class Foo", |w| {
            w.writeln("private int x;")?;
            w.block("public int getX()", |w| w.writeln("return this.x;"))
        })
        .unwrap();

        assert_eq!(
            output,
            "public class Foo {\n    private int x;\n    public int getX() {\n        return this.x;\n    }\n}\n"
        );
    }

    #[test]
    fn CodeWriter___writeln_macro___indents_after_embedded_newline() {
        let mut output = String::new();
        let mut w = CodeWriter::new(&mut output);
        let _indent = w.indent();

        writeln!(w, "a;\nb;").unwrap();

        drop(_indent);
        assert_eq!(output, "    a;\n    b;\n");
    }

    #[test]
    fn CodeWriter___blank_line___is_not_indented() {
        let mut output = String::new();
        let mut w = CodeWriter::new(&mut output);
        let _indent = w.indent();

        w.writeln("a;").unwrap();
        w.blank_line().unwrap();
        w.writeln("b;").unwrap();

        drop(_indent);
        assert_eq!(output, "    a;\n\n    b;\n");
    }

    #[test]
    fn CodeWriter___try_finally___emits_both_clauses() {
        let mut output = String::new();
        let mut w = CodeWriter::with_indent_spaces(&mut output, 2);

        w.try_finally(|w| w.writeln("work();"), |w| w.writeln("unlock();"))
            .unwrap();

        assert_eq!(output, "try {\n  work();\n} finally {\n  unlock();\n}\n");
    }

    #[test]
    fn CodeWriter___try_catch___emits_catch_header() {
        let mut output = String::new();
        let mut w = CodeWriter::with_indent_spaces(&mut output, 2);

        w.try_catch(
            |w| w.writeln("work();"),
            "java.lang.Exception ex",
            |w| w.writeln("throw ex;"),
        )
        .unwrap();

        assert_eq!(
            output,
            "try {\n  work();\n} catch (java.lang.Exception ex) {\n  throw ex;\n}\n"
        );
    }

    #[test]
    fn CodeWriter___write_separated___joins_items() {
        let mut output = String::new();
        let mut w = CodeWriter::new(&mut output);

        w.write("f(").unwrap();
        w.write_separated(["int a", "long b"], ", ", |w, item| w.write(item))
            .unwrap();
        w.write(")").unwrap();

        assert_eq!(output, "f(int a, long b)");
    }

    #[test]
    fn IndentGuard___drop___restores_level() {
        let mut output = String::new();
        let mut w = CodeWriter::new(&mut output);

        {
            let _indent = w.indent();
            w.writeln("inner;").unwrap();
        }
        w.writeln("outer;").unwrap();

        assert_eq!(output, "    inner;\nouter;\n");
    }
}
