use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};

use super::prompt::{is_password_prompt, normalize_output, parse_prompt, Prompt, PromptMode};
use super::{connect, ConnectError, SshOptions, SshTarget};

const PTY_WIDTH: u32 = 511;
const PTY_HEIGHT: u32 = 24;
/// libssh2 blocking-call timeout while the shell is open, so reads return
/// often enough to honour the per-command deadline
const POLL_INTERVAL_MS: u32 = 250;

/// Byte stream to a device CLI
pub trait CliChannel: Read + Write {
    /// The device closed its side of the stream
    fn eof(&self) -> bool;

    /// Tear the stream down; errors are irrelevant at this point
    fn close(&mut self);
}

/// PTY shell channel together with the session that owns it
pub struct SshChannel {
    session: ssh2::Session,
    channel: ssh2::Channel,
}

impl Read for SshChannel {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.channel.read(buf)
    }
}

impl Write for SshChannel {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.channel.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.channel.flush()
    }
}

impl CliChannel for SshChannel {
    fn eof(&self) -> bool {
        self.channel.eof()
    }

    fn close(&mut self) {
        let _ = self.channel.send_eof();
        let _ = self.channel.close();
        let _ = self.session.disconnect(None, "closing", None);
    }
}

/// Interactive IOS CLI over a PTY shell.
///
/// Blocking; run it inside `spawn_blocking`.
pub struct IosShell<C: CliChannel = SshChannel> {
    channel: C,
    read_timeout: Duration,
    prompt: Option<Prompt>,
}

impl IosShell<SshChannel> {
    /// Log in over SSH, wait for the first prompt and disable paging
    pub fn open(target: &SshTarget, options: &SshOptions) -> Result<Self, ConnectError> {
        let session = connect(target, options.connect_timeout)?;

        let mut channel = session
            .channel_session()
            .map_err(|e| ConnectError::Channel(format!("Failed to open channel: {}", e)))?;
        channel
            .request_pty("vt100", None, Some((PTY_WIDTH, PTY_HEIGHT, 0, 0)))
            .map_err(|e| ConnectError::Channel(format!("Failed to request PTY: {}", e)))?;
        channel
            .shell()
            .map_err(|e| ConnectError::Channel(format!("Failed to start shell: {}", e)))?;

        session.set_timeout(POLL_INTERVAL_MS);

        let shell = Self::start(SshChannel { session, channel }, options.read_timeout)?;
        tracing::debug!(
            "Shell open on {} at prompt {:?}",
            target.host,
            shell.prompt.as_ref().map(|p| p.text.as_str())
        );
        Ok(shell)
    }
}

impl<C: CliChannel> IosShell<C> {
    /// Wait for the first prompt on an open channel and disable paging
    pub fn start(channel: C, read_timeout: Duration) -> Result<Self, ConnectError> {
        let mut shell = Self {
            channel,
            read_timeout,
            prompt: None,
        };

        shell.read_until_prompt()?;
        shell.send_command("terminal length 0")?;
        shell.send_command(&format!("terminal width {}", PTY_WIDTH))?;
        Ok(shell)
    }

    pub fn mode(&self) -> Option<PromptMode> {
        self.prompt.as_ref().map(|p| p.mode)
    }

    /// Enter privileged EXEC mode, answering a password prompt with `secret`
    pub fn enable(&mut self, secret: Option<&str>) -> Result<(), ConnectError> {
        if matches!(self.mode(), Some(PromptMode::Privileged) | Some(PromptMode::Config)) {
            return Ok(());
        }

        self.write_line("enable")?;
        let output = self.read_until(|text| is_password_prompt(text) || parse_prompt(text).is_some())?;

        if is_password_prompt(&output) {
            self.write_line(secret.unwrap_or(""))?;
            let output =
                self.read_until(|text| is_password_prompt(text) || parse_prompt(text).is_some())?;
            if is_password_prompt(&output) {
                return Err(ConnectError::Enable("enable secret rejected".to_string()));
            }
            self.prompt = parse_prompt(&output);
        } else {
            self.prompt = parse_prompt(&output);
        }

        match self.mode() {
            Some(PromptMode::Privileged) => Ok(()),
            _ => Err(ConnectError::Enable(
                "device did not reach privileged mode; check the enable secret".to_string(),
            )),
        }
    }

    /// Send `commands` inside `configure terminal`, leaving config mode afterwards.
    /// Returns the transcript with line endings normalized.
    pub fn send_config_set(&mut self, commands: &[String]) -> Result<String, ConnectError> {
        let mut transcript = self
            .prompt
            .as_ref()
            .map(|p| p.text.clone())
            .unwrap_or_default();

        transcript.push_str(&self.send_command("configure terminal")?);
        if self.mode() != Some(PromptMode::Config) {
            return Err(ConnectError::Channel(
                "device did not enter configuration mode".to_string(),
            ));
        }

        for command in commands {
            transcript.push_str(&self.send_command(command)?);
        }

        if self.mode() == Some(PromptMode::Config) {
            transcript.push_str(&self.send_command("end")?);
        }

        Ok(normalize_output(&transcript))
    }

    /// Leave the CLI and close the channel
    pub fn disconnect(mut self) {
        let _ = self.write_line("exit");
        self.channel.close();
    }

    /// Send one line and wait for its echo followed by a prompt
    fn send_command(&mut self, command: &str) -> Result<String, ConnectError> {
        self.write_line(command)?;
        let output = self.read_until(|text| text.contains(command) && parse_prompt(text).is_some())?;
        self.prompt = parse_prompt(&output);
        Ok(output)
    }

    fn read_until_prompt(&mut self) -> Result<String, ConnectError> {
        let output = self.read_until(|text| parse_prompt(text).is_some())?;
        self.prompt = parse_prompt(&output);
        Ok(output)
    }

    fn write_line(&mut self, line: &str) -> Result<(), ConnectError> {
        self.channel
            .write_all(format!("{}\n", line).as_bytes())
            .and_then(|_| self.channel.flush())
            .map_err(|e| ConnectError::Channel(format!("Write failed: {}", e)))
    }

    /// Accumulate output until `done` accepts it or the read deadline passes
    fn read_until(&mut self, done: impl Fn(&str) -> bool) -> Result<String, ConnectError> {
        let deadline = Instant::now() + self.read_timeout;
        let mut raw: Vec<u8> = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            match self.channel.read(&mut buf) {
                Ok(0) if self.channel.eof() => {
                    return Err(ConnectError::Channel("channel closed by device".to_string()));
                }
                Ok(0) => std::thread::sleep(Duration::from_millis(20)),
                Ok(n) => {
                    raw.extend_from_slice(&buf[..n]);
                    let text = String::from_utf8_lossy(&raw);
                    if done(&text) {
                        return Ok(text.into_owned());
                    }
                }
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {}
                Err(e) => return Err(ConnectError::Channel(format!("Read failed: {}", e))),
            }

            if Instant::now() >= deadline {
                return Err(ConnectError::Timeout(format!(
                    "no prompt after {}s; last output: {:?}",
                    self.read_timeout.as_secs(),
                    crate::utils::truncate_lines(String::from_utf8_lossy(&raw).trim(), 3)
                )));
            }
        }
    }
}
