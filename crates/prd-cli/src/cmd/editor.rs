use anyhow::{bail, Context};
use prd_core::Editor;
use std::io::Write;
use std::process::Command;

/// Edits markdown in the user's terminal editor via a temporary file.
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Use `$VISUAL`, then `$EDITOR`.
    pub fn from_env() -> anyhow::Result<Self> {
        ["VISUAL", "EDITOR"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|cmd| !cmd.trim().is_empty())
            .map(Self::new)
            .context("no editor configured: set $VISUAL or $EDITOR")
    }
}

impl Editor for ExternalEditor {
    type Error = anyhow::Error;

    fn open(
        &self,
        initial_value: &str,
        on_change: &mut dyn FnMut(String),
    ) -> anyhow::Result<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().context("editor command is empty")?;

        let mut file = tempfile::Builder::new()
            .prefix("prdgen-")
            .suffix(".md")
            .tempfile()?;
        file.write_all(initial_value.as_bytes())?;
        file.flush()?;

        let status = Command::new(program)
            .args(parts)
            .arg(file.path())
            .status()
            .with_context(|| format!("failed to launch editor '{program}'"))?;
        if !status.success() {
            bail!("editor '{program}' exited with {status}");
        }

        let edited = std::fs::read_to_string(file.path())?;
        if edited != initial_value {
            tracing::debug!(bytes = edited.len(), "editor changed the document");
            on_change(edited);
        }
        Ok(())
    }
}
