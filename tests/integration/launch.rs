use crate::common::{stderr, stdout, Sandbox, TWO_PROFILES};

#[test]
fn missing_config_creates_template_and_exits_with_failure() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Created default config at"));
    let config = sandbox.read_config();
    let default = config["default"].as_str().expect("default is a string");
    assert!(config["profiles"].get(default).is_some());
}

#[test]
fn unknown_profile_lists_available_names() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox.run(&["ghost"]);

    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(message.contains("Profile not found: ghost"), "{message}");
    assert!(message.contains("  - kimi (default)"), "{message}");
    assert!(message.contains("  - anthropic"), "{message}");
}

#[test]
fn incomplete_profile_is_rejected_before_spawn() {
    let sandbox = Sandbox::new();
    sandbox.write_config(r#"{"profiles":{"half":{"ANTHROPIC_MODEL":"m"}},"default":"half"}"#);

    let output = sandbox
        .command(&[])
        .env("CCSWITCH_COMMAND", "ccswitch-test-no-such-binary")
        .output()
        .expect("ccswitch runs");

    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(
        message.contains("missing required fields: ANTHROPIC_AUTH_TOKEN, ANTHROPIC_BASE_URL"),
        "{message}"
    );
    assert!(!message.contains("command not found"), "{message}");
}

#[test]
fn absent_command_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox
        .command(&["kimi"])
        .env("CCSWITCH_COMMAND", "ccswitch-test-no-such-binary")
        .output()
        .expect("ccswitch runs");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("ccswitch-test-no-such-binary command not found"));
}

#[cfg(unix)]
mod unix {
    use std::{io::Write, process::Stdio};

    use super::*;

    fn sh(sandbox: &Sandbox, args: &[&str]) -> std::process::Command {
        let mut command = sandbox.command(args);
        command.env("CCSWITCH_COMMAND", "/bin/sh");
        command
    }

    #[test]
    fn child_exit_code_is_propagated() {
        let sandbox = Sandbox::new();
        sandbox.write_config(TWO_PROFILES);

        let output = sh(&sandbox, &["kimi", "--", "-c", "exit 3"])
            .output()
            .expect("ccswitch runs");

        assert_eq!(output.status.code(), Some(3), "stderr: {}", stderr(&output));
    }

    #[test]
    fn profile_values_reach_child_environment_and_stdout() {
        let sandbox = Sandbox::new();
        sandbox.write_config(TWO_PROFILES);

        let output = sh(
            &sandbox,
            &[
                "anthropic",
                "--",
                "-c",
                "echo \"$ANTHROPIC_MODEL $API_TIMEOUT_MS $ANTHROPIC_AUTH_TOKEN\"",
            ],
        )
        .output()
        .expect("ccswitch runs");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "claude-sonnet-4-5 300000 sk-ant\n");
    }

    #[test]
    fn profile_overrides_ambient_variable() {
        let sandbox = Sandbox::new();
        sandbox.write_config(TWO_PROFILES);

        let output = sh(&sandbox, &["--", "-c", "echo \"$ANTHROPIC_MODEL|$CCSWITCH_MARKER\""])
            .env("ANTHROPIC_MODEL", "ambient-model")
            .env("CCSWITCH_MARKER", "kept")
            .output()
            .expect("ccswitch runs");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "kimi-k2|kept\n");
    }

    #[test]
    fn profile_name_can_come_from_environment() {
        let sandbox = Sandbox::new();
        sandbox.write_config(TWO_PROFILES);

        let output = sh(&sandbox, &["--", "-c", "echo \"$ANTHROPIC_BASE_URL\""])
            .env("CC_SWITCH_PROFILE", "anthropic")
            .output()
            .expect("ccswitch runs");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(stdout(&output), "https://api.anthropic.com\n");
    }

    #[test]
    fn stdin_is_passed_through() {
        let sandbox = Sandbox::new();
        sandbox.write_config(TWO_PROFILES);

        let mut child = sh(
            &sandbox,
            &["kimi", "--", "-c", "read line; test \"$line\" = hello"],
        )
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("ccswitch spawns");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(b"hello\n")
            .expect("can write stdin");
        let output = child.wait_with_output().expect("ccswitch finishes");

        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }
}
