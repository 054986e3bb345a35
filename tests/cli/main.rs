use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod init;
mod migrate;
mod scan;

const BIN_NAME: &str = "ngmig";

/// Default manifest location for a project without config.
pub const MANIFEST: &str = "src/translation.json";

/// A throwaway Angular-style project the binary is run against.
pub struct Project {
    _temp_dir: TempDir,
    root: PathBuf,
}

/// Captured result of one `ngmig` invocation.
pub struct Run {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl Run {
    fn from_output(output: Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Panics with stderr attached unless the run exited with 0.
    pub fn assert_success(&self) -> &Self {
        assert_eq!(self.code, Some(0), "stderr: {}", self.stderr);
        self
    }
}

impl Project {
    /// Empty project. The `.git` marker stops the config search at its root.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path().canonicalize()?;
        fs::create_dir(root.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    pub fn with_templates(templates: &[(&str, &str)]) -> Result<Self> {
        let project = Self::new()?;
        for (path, content) in templates {
            project.write(path, content)?;
        }
        Ok(project)
    }

    pub fn write(&self, path: &str, content: impl AsRef<[u8]>) -> Result<()> {
        let file_path = self.root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))
    }

    /// Write `.ngmigrc.json` at the project root.
    pub fn configure(&self, config: &str) -> Result<()> {
        self.write(".ngmigrc.json", config)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn read(&self, path: &str) -> Result<String> {
        let file_path = self.root.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    /// Parsed manifest at `path`.
    pub fn manifest_at(&self, path: &str) -> Result<Value> {
        let content = self.read(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }

    pub fn manifest(&self) -> Result<Value> {
        self.manifest_at(MANIFEST)
    }

    pub fn has_manifest(&self) -> bool {
        self.root.join(MANIFEST).exists()
    }

    /// Run `ngmig <args>` from the project root.
    pub fn run(&self, args: &[&str]) -> Result<Run> {
        self.run_in(".", args)
    }

    /// Run `ngmig <args>` from a directory inside the project.
    pub fn run_in(&self, dir: &str, args: &[&str]) -> Result<Run> {
        let output = Command::new(get_cargo_bin(BIN_NAME))
            .current_dir(self.root.join(dir))
            .env_clear()
            .env("NO_COLOR", "1")
            .args(args)
            .output()
            .context("Failed to run ngmig")?;
        Ok(Run::from_output(output))
    }

    pub fn migrate(&self, args: &[&str]) -> Result<Run> {
        self.subcommand("migrate", args)
    }

    pub fn scan(&self, args: &[&str]) -> Result<Run> {
        self.subcommand("scan", args)
    }

    fn subcommand(&self, name: &str, args: &[&str]) -> Result<Run> {
        let mut full = vec![name];
        full.extend_from_slice(args);
        self.run(&full)
    }
}
