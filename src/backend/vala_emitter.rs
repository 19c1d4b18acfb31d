//! Vala code emitter - builds Vala source text with proper indentation.
//!
//! Generated Vala follows the Allman brace convention (opening brace on its
//! own line), so the block helpers here emit headers and braces on separate
//! lines. Everything else is a plain text buffer; no reformatting pass runs
//! over the output.

/// A buffer for building Vala source code with proper indentation.
#[derive(Debug, Default)]
pub struct ValaEmitter {
    buffer: String,
    indent_level: usize,
    indent_str: &'static str,
}

impl ValaEmitter {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            indent_level: 0,
            indent_str: "    ", // 4 spaces, matching hand-written Vala in the runtime
        }
    }

    /// Get the generated code.
    pub fn finish(self) -> String {
        self.buffer
    }

    /// Write a line with current indentation.
    pub fn line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent_str);
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }

    /// Write a blank line.
    pub fn blank_line(&mut self) {
        self.buffer.push('\n');
    }

    /// Increase indent level.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indent level.
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    /// Write `header`, an opening brace on its own line, and indent.
    /// Pair with [`close_block`](Self::close_block).
    pub fn open_block(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.indent();
    }

    /// Dedent and write the closing brace.
    pub fn close_block(&mut self) {
        self.dedent();
        self.line("}");
    }

    /// Write one line of a `///` documentation comment.
    pub fn doc_line(&mut self, text: &str) {
        if text.is_empty() {
            self.line("///");
        } else {
            self.line(&format!("/// {}", text));
        }
    }
}
