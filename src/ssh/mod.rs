//! SSH access to IOS devices.
//!
//! `ssh2` (libssh2) is blocking, so every session runs inside
//! `tokio::task::spawn_blocking`. Handlers only see the async
//! [`DeviceConnector`] trait.

pub mod prompt;
mod shell;

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::models::Device;

pub use shell::IosShell;

/// libssh2 error code for a timed-out blocking call
const LIBSSH2_ERROR_TIMEOUT: i32 = -9;

/// Why talking to a device failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    Timeout(String),
    Authentication(String),
    Connection(String),
    Enable(String),
    Channel(String),
    Task(String),
}

impl std::fmt::Display for ConnectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectError::Timeout(msg) => write!(f, "Connection timed out: {}", msg),
            ConnectError::Authentication(msg) => write!(f, "Authentication failed: {}", msg),
            ConnectError::Connection(msg) => write!(f, "{}", msg),
            ConnectError::Enable(msg) => write!(f, "Failed to enter enable mode: {}", msg),
            ConnectError::Channel(msg) => write!(f, "SSH channel error: {}", msg),
            ConnectError::Task(msg) => write!(f, "Task join error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectError {}

/// Where and as whom to log in
#[derive(Clone)]
pub struct SshTarget {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub secret: Option<String>,
}

impl SshTarget {
    pub fn for_device(device: &Device, port: u16) -> Self {
        Self {
            host: device.ip.clone(),
            port,
            username: device.username.clone(),
            password: device.password.clone(),
            secret: device.secret.clone(),
        }
    }
}

/// Timeouts applied to every session
#[derive(Debug, Clone, Copy)]
pub struct SshOptions {
    /// TCP connect, handshake and authentication
    pub connect_timeout: Duration,
    /// Wait for the prompt after each line sent
    pub read_timeout: Duration,
}

impl SshOptions {
    pub fn from_config(cfg: &crate::config::Config) -> Self {
        Self {
            connect_timeout: cfg.ssh_connect_timeout(),
            read_timeout: cfg.ssh_read_timeout(),
        }
    }
}

/// Async seam between route handlers and remote device sessions
#[async_trait::async_trait]
pub trait DeviceConnector: Send + Sync {
    /// Log in, wait for the prompt and disconnect
    async fn verify(&self, target: &SshTarget) -> Result<(), ConnectError>;

    /// Log in, enter enable mode, send `commands` as a config set and
    /// return the session transcript
    async fn apply_config(&self, target: &SshTarget, commands: &[String]) -> Result<String, ConnectError>;
}

/// DeviceConnector backed by real SSH sessions
pub struct SshConnector {
    options: SshOptions,
}

impl SshConnector {
    pub fn new(options: SshOptions) -> Self {
        Self { options }
    }
}

#[async_trait::async_trait]
impl DeviceConnector for SshConnector {
    async fn verify(&self, target: &SshTarget) -> Result<(), ConnectError> {
        let target = target.clone();
        let options = self.options;

        tokio::task::spawn_blocking(move || {
            let shell = IosShell::open(&target, &options)?;
            shell.disconnect();
            Ok(())
        })
        .await
        .map_err(|e| ConnectError::Task(e.to_string()))?
    }

    async fn apply_config(&self, target: &SshTarget, commands: &[String]) -> Result<String, ConnectError> {
        let target = target.clone();
        let options = self.options;
        let commands = commands.to_vec();

        tokio::task::spawn_blocking(move || {
            let mut shell = IosShell::open(&target, &options)?;
            shell.enable(target.secret.as_deref())?;
            let output = shell.send_config_set(&commands)?;
            shell.disconnect();
            Ok(output)
        })
        .await
        .map_err(|e| ConnectError::Task(e.to_string()))?
    }
}

/// Keyboard-interactive prompt handler that always responds with the password
struct PasswordPrompt {
    password: String,
}

impl ssh2::KeyboardInteractivePrompt for PasswordPrompt {
    fn prompt<'a>(
        &mut self,
        _username: &str,
        _instructions: &str,
        prompts: &[ssh2::Prompt<'a>],
    ) -> Vec<String> {
        prompts.iter().map(|_| self.password.clone()).collect()
    }
}

fn is_timeout(err: &ssh2::Error) -> bool {
    matches!(err.code(), ssh2::ErrorCode::Session(LIBSSH2_ERROR_TIMEOUT))
}

/// Create an SSH session and authenticate with password + keyboard-interactive.
/// This is blocking, so call from a spawn_blocking context.
pub fn connect(target: &SshTarget, timeout: Duration) -> Result<ssh2::Session, ConnectError> {
    let addr = (target.host.as_str(), target.port)
        .to_socket_addrs()
        .map_err(|e| ConnectError::Connection(format!("Invalid address {}:{}: {}", target.host, target.port, e)))?
        .next()
        .ok_or_else(|| ConnectError::Connection(format!("No address found for {}", target.host)))?;

    let tcp = TcpStream::connect_timeout(&addr, timeout).map_err(|e| {
        if e.kind() == std::io::ErrorKind::TimedOut {
            ConnectError::Timeout(format!("TCP connection to {} timed out", addr))
        } else {
            ConnectError::Connection(format!("TCP connection to {} failed: {}", addr, e))
        }
    })?;

    tcp.set_read_timeout(Some(timeout)).ok();
    tcp.set_write_timeout(Some(timeout)).ok();

    let mut session = ssh2::Session::new()
        .map_err(|e| ConnectError::Connection(format!("Failed to create SSH session: {}", e)))?;
    session.set_tcp_stream(tcp);
    session.set_timeout(timeout.as_millis().min(u32::MAX as u128) as u32);
    session.handshake().map_err(|e| {
        if is_timeout(&e) {
            ConnectError::Timeout(format!("SSH handshake with {} timed out", addr))
        } else {
            ConnectError::Connection(format!("SSH handshake failed: {}", e))
        }
    })?;

    // Try password auth first
    match session.userauth_password(&target.username, &target.password) {
        Ok(_) if session.authenticated() => return Ok(session),
        Err(e) if is_timeout(&e) => {
            return Err(ConnectError::Timeout(format!("SSH authentication with {} timed out", addr)))
        }
        _ => {}
    }

    // Keyboard-interactive covers devices that disable plain password auth
    let mut prompter = PasswordPrompt {
        password: target.password.clone(),
    };
    let _ = session.userauth_keyboard_interactive(&target.username, &mut prompter);

    if session.authenticated() {
        Ok(session)
    } else {
        Err(ConnectError::Authentication(format!(
            "all methods exhausted for user \"{}\"",
            target.username
        )))
    }
}
