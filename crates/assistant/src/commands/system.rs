//! Host system commands

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use sysinfo::System;
use tracing::warn;

use super::{CommandArgs, CommandError, CommandHandler, CommandResult, Launcher};

/// Reports OS name, release and CPU architecture
#[derive(Debug, Default)]
pub struct SystemInfoHandler;

impl SystemInfoHandler {
    pub fn describe(os: &str, release: &str, arch: &str) -> String {
        format!("You are using {} {} on {} architecture.", os, release, arch)
    }
}

impl CommandHandler for SystemInfoHandler {
    fn execute(&self, _args: &CommandArgs) -> CommandResult<String> {
        let os = System::name().unwrap_or_else(|| std::env::consts::OS.to_string());
        let release = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
        Ok(Self::describe(&os, &release, std::env::consts::ARCH))
    }
}

/// Opens the platform file manager at a path (current directory by default)
pub struct OpenExplorerHandler {
    launcher: Arc<dyn Launcher>,
}

impl OpenExplorerHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    fn target(args: &CommandArgs) -> CommandResult<PathBuf> {
        let requested = args.first().or_else(|| args.named("path"));

        let path = match requested {
            Some(raw) => expand_home(raw.trim()),
            None => std::env::current_dir()
                .map_err(|e| CommandError::Failed(format!("No working directory: {}", e)))?,
        };

        // Keep the unresolved path when it does not exist yet
        Ok(std::fs::canonicalize(&path).unwrap_or(path))
    }
}

impl CommandHandler for OpenExplorerHandler {
    fn execute(&self, args: &CommandArgs) -> CommandResult<String> {
        let target = Self::target(args)?;

        match self.launcher.open_path(&target) {
            Ok(()) => Ok(format!("Opening file explorer at {}", target.display())),
            Err(e) => {
                warn!("File explorer launch failed: {}", e);
                Ok("Sorry, I couldn't open the file explorer.".to_string())
            }
        }
    }
}

fn expand_home(raw: &str) -> PathBuf {
    if raw == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(raw));
    }
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    Path::new(raw).to_path_buf()
}
