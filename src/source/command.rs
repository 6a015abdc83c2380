use std::process::Command;

use anyhow::{Context, Result, anyhow};

use super::NeighborSource;
use crate::error::SourceError;

#[derive(Clone, Debug)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(command_line: &str) -> Result<Self, SourceError> {
        let mut parts = command_line.split_whitespace().map(str::to_owned);
        let program = parts.next().ok_or(SourceError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    fn run(&self, identity: &str, depth: usize) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(identity)
            .arg(depth.to_string())
            .output()
            .with_context(|| format!("failed to spawn {} for {identity}", self.program))?;

        if output.status.success() {
            String::from_utf8(output.stdout).context("fetch command output was not valid UTF-8")
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(anyhow!(
                "{} exited with {} for {identity}: {}",
                self.program,
                output.status,
                stderr.trim()
            ))
        }
    }
}

pub(super) fn parse_neighbor_output(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(trimmed)
            .context("fetch command printed an invalid JSON array");
    }

    Ok(trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect())
}

impl NeighborSource for CommandSource {
    fn fetch_neighbors(&self, identity: &str, depth: usize) -> Result<Vec<String>> {
        let raw = self.run(identity, depth)?;
        parse_neighbor_output(&raw)
    }
}
