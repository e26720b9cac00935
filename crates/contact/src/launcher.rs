use std::io;
use std::process::{Command, Stdio};

use tracing::info;

/// Hands a `mailto:` URI to the user's mail client.
pub trait MailLauncher: Send + Sync {
    fn open(&self, uri: &str) -> io::Result<()>;
}

/// Opens URIs with the platform's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemMailLauncher;

impl MailLauncher for SystemMailLauncher {
    fn open(&self, uri: &str) -> io::Result<()> {
        let mut command = opener_command(uri);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        info!("mail client launched");
        Ok(())
    }
}

#[cfg(target_os = "macos")]
fn opener_command(uri: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(uri);
    command
}

#[cfg(target_os = "windows")]
fn opener_command(uri: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", uri]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn opener_command(uri: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(uri);
    command
}
