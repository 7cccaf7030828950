//! Native toolchain: compile generated C and run it
//!
//! The source is written into a scratch directory that is removed when the
//! run finishes. Only the program's standard output is returned.

use serde::{Deserialize, Serialize};
use std::fs;
use std::process::Command;
use crate::error::{KannadaError, KannadaResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toolchain {
    /// C compiler executable
    pub cc: String,
    /// Extra arguments passed before the source file
    pub flags: Vec<String>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self { cc: default_cc().to_string(), flags: Vec::new() }
    }
}

fn default_cc() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "clang"
    }
    #[cfg(not(target_os = "macos"))]
    {
        "gcc"
    }
}

impl Toolchain {
    pub fn new(cc: impl Into<String>) -> Self {
        Self { cc: cc.into(), flags: Vec::new() }
    }

    /// Whether the configured compiler can be launched at all.
    pub fn is_available(&self) -> bool {
        Command::new(&self.cc)
            .arg("--version")
            .output()
            .map_or(false, |out| out.status.success())
    }

    /// Compile a complete C translation unit, run it, and return its trimmed stdout.
    pub fn compile_and_run(&self, c_source: &str) -> KannadaResult<String> {
        let scratch = tempfile::Builder::new().prefix("kannada").tempdir()?;
        let source_path = scratch.path().join("output.c");
        let exe_path = scratch.path().join(if cfg!(windows) { "output.exe" } else { "output" });
        fs::write(&source_path, c_source)?;

        log::info!("compiling {} with {} {:?}", source_path.display(), self.cc, self.flags);
        let compiled = Command::new(&self.cc)
            .args(&self.flags)
            .arg(&source_path)
            .arg("-o")
            .arg(&exe_path)
            .output()
            .map_err(|e| KannadaError::toolchain(format!("failed to launch `{}`: {}", self.cc, e)))?;
        if !compiled.status.success() {
            return Err(KannadaError::toolchain(format!(
                "`{}` exited with {}:\n{}",
                self.cc,
                compiled.status,
                String::from_utf8_lossy(&compiled.stderr).trim()
            )));
        }

        log::info!("running {}", exe_path.display());
        let run = Command::new(&exe_path)
            .output()
            .map_err(|e| KannadaError::toolchain(format!("failed to run {}: {}", exe_path.display(), e)))?;
        if !run.status.success() {
            log::warn!("program exited with {}", run.status);
        }

        Ok(String::from_utf8_lossy(&run.stdout).trim().to_string())
    }
}
