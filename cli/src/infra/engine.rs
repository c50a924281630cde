//! Infrastructure implementation of the `ContainerEngine` port.
//!
//! `DockerEngine` drives a Docker-compatible CLI through a `CommandRunner`.
//! Each operation is one engine invocation; failures carry the tail of the
//! engine's stderr.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, ContainerEngine};
use crate::domain::container::PS_SEPARATOR;
use crate::domain::error::EngineError;
use crate::domain::{PsQuery, RunSpec};

/// Stderr lines kept in an `OperationFailed` detail.
const DETAIL_LINES: usize = 6;

/// Docker-compatible engine driven through its CLI.
pub struct DockerEngine<R: CommandRunner> {
    binary: String,
    runner: R,
}

impl<R: CommandRunner> DockerEngine<R> {
    #[must_use]
    pub fn new(binary: impl Into<String>, runner: R) -> Self {
        Self {
            binary: binary.into(),
            runner,
        }
    }

    /// Run one engine command, mapping a non-zero exit to `OperationFailed`.
    async fn exec(&self, op: &str, args: &[&str]) -> Result<String> {
        let output = self
            .runner
            .run(&self.binary, args)
            .await
            .with_context(|| format!("{op}: cannot run {}", self.binary))?;
        if !output.status.success() {
            return Err(EngineError::OperationFailed {
                op: op.to_string(),
                detail: stderr_tail(&output.stderr),
            }
            .into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<R: CommandRunner> ContainerEngine for DockerEngine<R> {
    fn binary(&self) -> &str {
        &self.binary
    }

    async fn check_available(&self) -> Result<()> {
        let reachable = match self
            .runner
            .run(&self.binary, &["version", "--format", "{{.Server.Version}}"])
            .await
        {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::debug!(error = %e, "engine binary could not be started");
                false
            }
        };
        if !reachable {
            return Err(EngineError::Unavailable(self.binary.clone()).into());
        }
        Ok(())
    }

    async fn build(&self, tag: &str, context: &Path) -> Result<()> {
        let context = context.to_string_lossy();
        self.exec("Image build", &["build", "-t", tag, &context])
            .await
            .map(drop)
    }

    async fn run(&self, spec: &RunSpec) -> Result<String> {
        let args = run_args(spec);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let stdout = self.exec("Container start", &args).await?;
        Ok(stdout.trim().to_string())
    }

    async fn stop(&self, name: &str) -> Result<()> {
        self.exec("Container stop", &["stop", name]).await.map(drop)
    }

    async fn remove(&self, name: &str) -> Result<()> {
        self.exec("Container removal", &["rm", "-f", name])
            .await
            .map(drop)
    }

    async fn remove_image(&self, tag: &str) -> Result<()> {
        self.exec("Image removal", &["rmi", tag]).await.map(drop)
    }

    async fn ps(&self, query: &PsQuery) -> Result<String> {
        let args = ps_args(query);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.exec("Container listing", &args).await
    }

    async fn tail_logs(&self, name: &str, lines: u32) -> Result<()> {
        let lines = lines.to_string();
        let status = self
            .runner
            .run_status(&self.binary, &["logs", "--tail", &lines, name])
            .await?;
        if !status.success() {
            return Err(EngineError::OperationFailed {
                op: "Log retrieval".to_string(),
                detail: format!("{} logs exited with {status}", self.binary),
            }
            .into());
        }
        Ok(())
    }
}

/// Arguments of a detached `run` for `spec`.
#[must_use]
pub fn run_args(spec: &RunSpec) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        spec.name.clone(),
        "-p".to_string(),
        format!("{0}:{0}", spec.port),
    ];
    for host in &spec.extra_hosts {
        args.push("--add-host".to_string());
        args.push(host.clone());
    }
    for (key, value) in &spec.env {
        args.push("-e".to_string());
        args.push(format!("{key}={value}"));
    }
    args.push(spec.image.clone());
    args
}

/// Arguments of a listing for `query`.
#[must_use]
pub fn ps_args(query: &PsQuery) -> Vec<String> {
    match query {
        PsQuery::All => vec!["ps".to_string(), "-a".to_string()],
        PsQuery::ByName(name) => vec![
            "ps".to_string(),
            "-a".to_string(),
            "--filter".to_string(),
            format!("name={name}"),
            "--format".to_string(),
            format!("{{{{.Names}}}}{PS_SEPARATOR}{{{{.Status}}}}"),
        ],
        PsQuery::Publishing(port) => vec![
            "ps".to_string(),
            "--filter".to_string(),
            format!("publish={port}"),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ],
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(DETAIL_LINES);
    let tail = lines[start..].join("\n");
    if tail.is_empty() {
        "no error output".to_string()
    } else {
        tail
    }
}
