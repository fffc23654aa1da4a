//! Colored terminal output for rollback runs
//!
//! Renders [`RollbackEvent`]s and the confirmation prompt with consistent
//! markers. Prompts, dry-run summaries and errors ignore quiet mode.

use crate::rollback::{EventLevel, EventSink, RollbackEvent};
use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Output manager for consistent colored terminal output
pub struct OutputManager {
    bufwtr: BufferWriter,
    quiet: bool,
}

impl std::fmt::Debug for OutputManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputManager")
            .field("quiet", &self.quiet)
            .finish()
    }
}

impl Clone for OutputManager {
    fn clone(&self) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet: self.quiet,
        }
    }
}

impl OutputManager {
    /// Create a new output manager
    pub fn new(quiet: bool) -> Self {
        Self {
            bufwtr: BufferWriter::stdout(ColorChoice::Auto),
            quiet,
        }
    }

    /// Print `message` behind a colored marker
    fn marked(&self, marker: &str, spec: &ColorSpec, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = buffer.set_color(spec);
        let _ = write!(&mut buffer, "{}", marker);
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, " {}", message);
        self.bufwtr.print(&buffer)
    }

    /// Print an info message (normal output)
    pub fn info(&self, message: &str) -> std::io::Result<()> {
        self.marked("ℹ", ColorSpec::new().set_fg(Some(Color::Cyan)), message)
    }

    /// Print a success message
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            "✓",
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            message,
        )
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.marked(
            "⚠",
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            message,
        )
    }

    /// Print a progress message
    pub fn progress(&self, message: &str) -> std::io::Result<()> {
        self.marked("⋯", ColorSpec::new().set_fg(Some(Color::Magenta)), message)
    }

    /// Print an error message (always shown)
    pub fn error(&self, message: &str) {
        let bufwtr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = bufwtr.buffer();

        // Try colored output to stderr
        if buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true)).is_err()
            || write!(&mut buffer, "✗").is_err()
            || buffer.reset().is_err()
            || buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red))).is_err()
            || writeln!(&mut buffer, " {}", message).is_err()
            || buffer.reset().is_err()
            || bufwtr.print(&buffer).is_err()
        {
            // Stderr failed - fallback to stdout as last resort
            println!("[STDERR ERROR] ✗ {}", message);
        }
    }

    /// Print the confirmation text and prompt line (always shown)
    ///
    /// The last line is left without a newline so the cursor waits after it.
    pub fn prompt(&self, text: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        let (body, prompt) = text.rsplit_once('\n').unwrap_or(("", text));

        if !body.is_empty() {
            writeln!(&mut buffer, "{}", body)?;
        }
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
        write!(&mut buffer, "{} ", prompt)?;
        buffer.reset()?;
        self.bufwtr.print(&buffer)?;
        std::io::stdout().flush()
    }

    /// Print indented text (for sub-items)
    pub fn indent(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut buffer = self.bufwtr.buffer();
        let _ = writeln!(&mut buffer, "    {}", message);
        self.bufwtr.print(&buffer)
    }

    /// Print a plain message (respects quiet mode)
    pub fn println(&self, message: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.report(message)
    }

    /// Print a plain message even in quiet mode
    pub fn report(&self, message: &str) -> std::io::Result<()> {
        let mut buffer = self.bufwtr.buffer();
        writeln!(&mut buffer, "{}", message)?;
        self.bufwtr.print(&buffer)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

impl EventSink for OutputManager {
    fn emit(&mut self, event: RollbackEvent) {
        log::debug!("event: {:?}", event);

        let message = event.to_string();
        let result = match (&event, event.level()) {
            // The summary is all a dry run produces
            (RollbackEvent::DryRun { .. }, _) => self.report(&message),
            (_, EventLevel::Progress) => self.progress(&message),
            (_, EventLevel::Info) => self.info(&message),
            (_, EventLevel::Warning) => self.warn(&message),
            (_, EventLevel::Success) => self.success(&message),
        };

        if let Err(e) = result {
            log::warn!("Failed to write to stdout: {}", e);
        }
    }
}
