use std::{
    fs,
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
};

use tempfile::TempDir;

pub const BINARY_PATH: &str = env!("CARGO_BIN_EXE_ccswitch");

/// Scratch home directory with its own profiles.json location.
pub struct Sandbox {
    pub home: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("can create temporary home"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.path().join(".ccswitch").join("profiles.json")
    }

    pub fn write_config(&self, content: &str) {
        let path = self.config_path();
        fs::create_dir_all(path.parent().expect("config has a parent")).expect("can create dir");
        fs::write(path, content).expect("can write config");
    }

    pub fn read_config(&self) -> serde_json::Value {
        let raw = fs::read_to_string(self.config_path()).expect("config exists");
        serde_json::from_str(&raw).expect("config is valid json")
    }

    /// Command for the ccswitch binary isolated from the caller's environment.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(BINARY_PATH);
        command
            .args(args)
            .env("HOME", self.home.path())
            .env_remove("CCSWITCH_CONFIG")
            .env_remove("CC_SWITCH_PROFILE")
            .env_remove("CCSWITCH_COMMAND")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .stdin(Stdio::null());
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("ccswitch runs")
    }

    pub fn run_with_input(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("ccswitch spawns");
        // The binary may exit before reading; a broken pipe is fine here.
        let _ = child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes());
        child.wait_with_output().expect("ccswitch finishes")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub const TWO_PROFILES: &str = r#"{
  "profiles": {
    "kimi": {
      "ANTHROPIC_AUTH_TOKEN": "sk-kimi",
      "ANTHROPIC_BASE_URL": "https://api.moonshot.cn/anthropic",
      "ANTHROPIC_MODEL": "kimi-k2"
    },
    "anthropic": {
      "ANTHROPIC_AUTH_TOKEN": "sk-ant",
      "ANTHROPIC_BASE_URL": "https://api.anthropic.com",
      "ANTHROPIC_MODEL": "claude-sonnet-4-5",
      "API_TIMEOUT_MS": "300000"
    }
  },
  "default": "kimi"
}
"#;
