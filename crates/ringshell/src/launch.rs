use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

crate::impl_string_newtype!(ExecCommand);

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Command is empty")]
    Empty,
    #[error("Failed to parse command: {0}")]
    Parse(#[from] shell_words::ParseError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Starts `exec` detached from the menu, without a shell.
pub fn spawn(exec: &ExecCommand) -> Result<(), LaunchError> {
    let args = shell_words::split(exec)?;
    let (program, rest) = args.split_first().ok_or(LaunchError::Empty)?;

    Command::new(program)
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(())
}
