use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary grab base directory.
pub struct TestEnvironment {
    temp: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    pub fn base_dir(&self) -> PathBuf {
        self.temp.path().join("grab")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.base_dir().join("bin")
    }

    pub fn state_file(&self) -> PathBuf {
        self.base_dir().join("grab_state.json")
    }

    /// `grab --dir <base>` with ambient grab/GitHub variables cleared.
    pub fn grab_command(&self) -> Command {
        let mut cmd = Command::cargo_bin("grab").unwrap();
        cmd.arg("--dir")
            .arg(self.base_dir())
            .env_remove("GRAB_HOME")
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Write a binary and a matching state entry, as a finished install would.
    pub fn install_fake(&self, owner: &str, repo: &str, version: &str) -> PathBuf {
        fs::create_dir_all(self.bin_dir()).unwrap();
        let file_name = format!("{repo}_linux");
        let path = self.bin_dir().join(&file_name);
        fs::write(&path, "#!/bin/sh\n").unwrap();

        let mut state = self.read_state().unwrap_or_else(|| json!({}));
        state[owner][repo] = json!({
            "owner": owner,
            "repo": repo,
            "version": version,
            "url": format!("https://github.com/{owner}/{repo}/releases/download/{version}/{file_name}"),
            "installed_path": path.to_str().unwrap(),
        });
        write_state(&self.state_file(), &state);
        path
    }

    pub fn read_state(&self) -> Option<Value> {
        let content = fs::read_to_string(self.state_file()).ok()?;
        serde_json::from_str(&content).ok()
    }

    pub fn write_settings(&self, content: &str) {
        fs::create_dir_all(self.base_dir()).unwrap();
        fs::write(self.base_dir().join("config.toml"), content).unwrap();
    }
}

fn write_state(path: &Path, state: &Value) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string_pretty(state).unwrap()).unwrap();
}
