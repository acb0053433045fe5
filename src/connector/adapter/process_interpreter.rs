use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::CodeInterpreter;
use crate::domain::DomainError;

pub const DEFAULT_INTERPRETER: &str = "/srv/genlang";

/// Runs the genlang interpreter binary on a temporary source file.
///
/// The child inherits this process's environment. Output is stdout followed
/// by stderr; a non-zero exit is reported with that output as the message.
pub struct ProcessInterpreter {
    program: PathBuf,
}

impl ProcessInterpreter {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl CodeInterpreter for ProcessInterpreter {
    async fn run(&self, source: &str) -> Result<String, DomainError> {
        let mut file = tempfile::Builder::new()
            .prefix("genlang-")
            .suffix(".gl")
            .tempfile()?;
        file.write_all(source.as_bytes())?;
        file.flush()?;

        debug!(
            "Running {} on {}",
            self.program.display(),
            file.path().display()
        );

        let output = Command::new(&self.program)
            .arg(file.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                DomainError::execution(format!(
                    "failed to start {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            warn!("Interpreter exited with {}", output.status);
            return Err(DomainError::execution(combined));
        }

        Ok(combined)
    }
}
