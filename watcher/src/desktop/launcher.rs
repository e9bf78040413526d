use carwatch_core::prelude::{BookingLauncher, WatchError, WatchResult};
use tokio::process::Command;

/// Opens URLs with the desktop's default handler.
#[derive(Debug, Clone)]
pub struct XdgOpenLauncher {
    program: String,
}

impl XdgOpenLauncher {
    pub fn new() -> Self {
        Self::with_program("xdg-open")
    }

    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for XdgOpenLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLauncher for XdgOpenLauncher {
    async fn open(&self, url: &str) -> WatchResult<()> {
        let status = Command::new(&self.program)
            .arg(url)
            .status()
            .await
            .map_err(|e| WatchError::Launch(format!("could not run {}: {}", self.program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(WatchError::Launch(format!(
                "{} {} exited with {}",
                self.program, url, status
            )))
        }
    }
}
