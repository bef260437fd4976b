use std::fmt::{Display, Formatter};
use std::process::{Command, Stdio};

/// External window-control utility; focusing a window is delegated to it
/// rather than spoken over any window-manager protocol.
pub const ACTIVATE_UTILITY: &str = "wmctrl";

#[derive(Debug)]
pub enum ActivationError {
    Spawn(std::io::Error),
}

impl Display for ActivationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Spawn(error) => write!(f, "spawn failed: {error}"),
        }
    }
}

impl std::error::Error for ActivationError {}

/// The shell form of the focus command, rendered into each result row so
/// hosts that run row actions themselves can use it directly.
pub fn activation_command(id: u64) -> String {
    format!("{ACTIVATE_UTILITY} -ia {id}")
}

pub trait WindowActivator: Send + Sync {
    fn activate(&self, id: u64) -> Result<(), ActivationError>;
}

pub struct CommandActivator;

impl WindowActivator for CommandActivator {
    fn activate(&self, id: u64) -> Result<(), ActivationError> {
        // Fire-and-forget: the utility's exit status and output are not
        // consumed.
        Command::new(ACTIVATE_UTILITY)
            .arg("-ia")
            .arg(id.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(ActivationError::Spawn)
    }
}
