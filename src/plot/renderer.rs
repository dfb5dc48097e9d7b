use std::path::Path;
use std::process::Command;

use log::{info, warn};

use crate::error::{PlotError, PlotResult};
use crate::persistence::script::write_script;

/// Writes a generated script somewhere and runs it.
pub trait Renderer {
    /// Overwrite `path` with `script`.
    fn persist(&mut self, script: &str, path: &Path) -> PlotResult<()>;

    /// Run `<interpreter> -f <script_path>` and return its standard output.
    fn execute(&mut self, interpreter: &str, script_path: &Path) -> PlotResult<String>;
}

/// Renders through an R interpreter subprocess.
#[derive(Debug, Default, Clone, Copy)]
pub struct RProcess;

impl Renderer for RProcess {
    fn persist(&mut self, script: &str, path: &Path) -> PlotResult<()> {
        write_script(path, script)?;
        info!("wrote script to {}", path.display());
        Ok(())
    }

    fn execute(&mut self, interpreter: &str, script_path: &Path) -> PlotResult<String> {
        info!("running {} -f {}", interpreter, script_path.display());
        let output = Command::new(interpreter)
            .arg("-f")
            .arg(script_path)
            .output()
            .map_err(|source| PlotError::Execute {
                interpreter: interpreter.to_string(),
                source,
            })?;

        // The exit status is reported but not treated as a failure.
        if !output.status.success() {
            warn!(
                "{} exited with {}: {}",
                interpreter,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
