use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::CodeInterpreter;
use crate::domain::DomainError;

/// Use case for running submitted genlang code through the interpreter.
pub struct ExecuteCodeUseCase {
    interpreter: Arc<dyn CodeInterpreter>,
}

impl ExecuteCodeUseCase {
    pub fn new(interpreter: Arc<dyn CodeInterpreter>) -> Self {
        Self { interpreter }
    }

    pub async fn execute(&self, code: &str) -> Result<String, DomainError> {
        info!("Executing {} bytes of genlang code", code.len());
        let start_time = Instant::now();

        let result = self.interpreter.run(code).await;

        match &result {
            Ok(output) => info!(
                "Interpreter finished in {:.2}s with {} bytes of output",
                start_time.elapsed().as_secs_f64(),
                output.len()
            ),
            Err(e) => warn!("Interpreter run failed: {}", e),
        }

        result
    }
}
