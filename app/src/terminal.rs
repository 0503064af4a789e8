// In app/src/terminal.rs

use async_trait::async_trait;
use events::{Notification, NotificationSink, Severity};
use panel::{Clipboard, NumberField, Prompt};
use std::io::{self, BufRead, Write};

/// Reads prompt answers from stdin. An empty line cancels.
pub struct StdinPrompt;

#[async_trait]
impl Prompt for StdinPrompt {
    async fn ask_number(&self, field: &NumberField) -> Option<i64> {
        let question = match field.initial {
            Some(initial) => format!("{} [{}] (empty to cancel): ", field.label, initial),
            None => format!("{} (empty to cancel): ", field.label),
        };

        let line = tokio::task::spawn_blocking(move || -> io::Result<String> {
            let mut stdout = io::stdout();
            stdout.write_all(question.as_bytes())?;
            stdout.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            Ok(line)
        })
        .await;

        let line = match line {
            Ok(Ok(line)) => line,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Could not read prompt answer.");
                return None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Prompt task failed.");
                return None;
            }
        };

        let answer = line.trim();
        if answer.is_empty() {
            return None;
        }
        match answer.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                eprintln!("'{}' is not a whole number, nothing was changed.", answer);
                None
            }
        }
    }
}

/// Prints the copied text so it can be piped into a system clipboard tool.
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&self, text: &str) -> panel::Result<()> {
        let mut stdout = io::stdout();
        writeln!(stdout, "{}", text)
            .and_then(|_| stdout.flush())
            .map_err(|e| panel::Error::Clipboard(e.to_string()))
    }
}

/// Shows notifications on stderr, keeping stdout for command output.
pub struct TerminalSink;

impl NotificationSink for TerminalSink {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Success => "ok",
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error => "error",
        };
        eprintln!("[{}] {}: {}", marker, notification.title, notification.message);
    }
}
