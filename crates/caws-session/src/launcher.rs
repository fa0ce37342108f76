//! Processes bound to a workspace session.
//!
//! A [`ProcessLauncher`] holds an [`EnvironmentProvider`] and asks it for a
//! fresh environment on every [`ProcessLauncher::run`]. Nothing is captured at
//! bind time: long-lived sessions outlive the bearer token they started with.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::environment::EnvironmentProvider;
use crate::error::SessionError;

pub type OutputTap = Arc<dyn Fn(&str) + Send + Sync>;

/// Optional lifecycle hooks for a launcher.
#[derive(Clone, Default)]
pub struct LaunchHooks {
    on_stdout: Option<OutputTap>,
    on_stderr: Option<OutputTap>,
    reject_on_error_code: bool,
}

impl LaunchHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with every stdout line.
    #[must_use]
    pub fn on_stdout(mut self, tap: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_stdout = Some(Arc::new(tap));
        self
    }

    /// Called with every stderr line.
    #[must_use]
    pub fn on_stderr(mut self, tap: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_stderr = Some(Arc::new(tap));
        self
    }

    /// Turn a non-zero exit into [`SessionError::ProcessFailed`].
    #[must_use]
    pub const fn reject_on_error_code(mut self, reject: bool) -> Self {
        self.reject_on_error_code = reject;
        self
    }
}

impl fmt::Debug for LaunchHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchHooks")
            .field("on_stdout", &self.on_stdout.is_some())
            .field("on_stderr", &self.on_stderr.is_some())
            .field("reject_on_error_code", &self.reject_on_error_code)
            .finish()
    }
}

/// Per-call spawn options.
#[derive(Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Wins over both the session and the ambient environment.
    pub env: BTreeMap<String, String>,
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }
}

#[derive(Clone)]
pub struct ProcessLauncher {
    env: Arc<dyn EnvironmentProvider>,
    hooks: LaunchHooks,
}

impl ProcessLauncher {
    /// Bind a launcher to an environment provider.
    #[must_use]
    pub fn bind(env: Arc<dyn EnvironmentProvider>) -> Self {
        Self {
            env,
            hooks: LaunchHooks::default(),
        }
    }

    /// Same binding, different hooks.
    #[must_use]
    pub fn with_hooks(&self, hooks: LaunchHooks) -> Self {
        Self {
            env: Arc::clone(&self.env),
            hooks,
        }
    }

    /// Resolve the environment, then spawn `program` and wait for it.
    ///
    /// The child sees only the resolved environment plus `options.env`.
    ///
    /// # Errors
    ///
    /// Environment resolution errors, [`SessionError::Spawn`], or
    /// [`SessionError::ProcessFailed`] when rejecting on error codes.
    pub async fn run<S: AsRef<OsStr>>(
        &self,
        program: impl AsRef<OsStr>,
        args: &[S],
        options: LaunchOptions,
    ) -> Result<ProcessOutput, SessionError> {
        let program_name = program.as_ref().to_string_lossy().into_owned();

        let mut env = self.env.environment().await?;
        env.extend(options.env);

        let mut command = Command::new(program.as_ref());
        command
            .args(args)
            .env_clear()
            .envs(&env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &options.cwd {
            command.current_dir(cwd);
        }

        tracing::debug!(program = %program_name, "spawning session process");
        let mut child = command.spawn().map_err(|source| SessionError::Spawn {
            program: program_name.clone(),
            source,
        })?;

        let (stdout, stderr) = tokio::try_join!(
            drain(child.stdout.take(), self.hooks.on_stdout.as_ref()),
            drain(child.stderr.take(), self.hooks.on_stderr.as_ref()),
        )?;
        let status = child.wait().await?;

        let output = ProcessOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        };
        if self.hooks.reject_on_error_code && !output.success() {
            return Err(SessionError::ProcessFailed {
                program: program_name,
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Collect a stream verbatim, handing each line to `tap` as it arrives.
///
/// Lines are split on raw bytes so non-UTF-8 output never fails the run;
/// invalid sequences are replaced only at the string boundary.
async fn drain<R>(reader: Option<R>, tap: Option<&OutputTap>) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return Ok(String::new());
    };
    let mut reader = BufReader::new(reader);
    let mut collected = Vec::new();
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if let Some(tap) = tap {
            tap(&String::from_utf8_lossy(trim_line_ending(&line)));
        }
        collected.extend_from_slice(&line);
    }
    Ok(String::from_utf8_lossy(&collected).into_owned())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
