//! Styled progress messages on stderr.

use console::{Style, Term};

/// User-facing output. Logging goes through `tracing` instead.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn write(&self, style: Option<Style>, msg: &str) {
        let line = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        // Nothing sensible to do if stderr is gone.
        let _ = self.term.write_line(&line);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.write(None, msg);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.write(Some(Style::new().green()), msg);
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.write(Some(Style::new().yellow()), msg);
    }

    pub(crate) fn error(&self, msg: &str) {
        self.write(Some(Style::new().red().bold()), msg);
    }
}
