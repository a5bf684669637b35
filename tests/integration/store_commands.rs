use crate::common::{stderr, stdout, Sandbox, TWO_PROFILES};

#[test]
fn add_creates_config_and_sets_first_default() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["add", "work", "--token", "sk-work", "--model", "m1"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Profile \"work\" added successfully."));
    let config = sandbox.read_config();
    assert_eq!(config["default"], "work");
    assert_eq!(config["profiles"]["work"]["ANTHROPIC_AUTH_TOKEN"], "sk-work");
    assert_eq!(config["profiles"]["work"]["ANTHROPIC_MODEL"], "m1");
    assert_eq!(
        config["profiles"]["work"]["ANTHROPIC_BASE_URL"],
        "https://api.anthropic.com"
    );
}

#[test]
fn add_without_token_or_terminal_points_at_token_flag() {
    let sandbox = Sandbox::new();

    let output = sandbox.run_with_input(&["add", "empty"], "sk-typed\n\n\n\n\n");

    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(message.contains("--token"), "{message}");
    assert!(message.contains("ANTHROPIC_AUTH_TOKEN"), "{message}");
    assert!(!message.contains("sk-typed"), "{message}");
    assert!(!sandbox.config_path().exists());
}

#[test]
fn add_flags_fill_every_field() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&[
        "add",
        "glm",
        "--token",
        "sk-glm",
        "--base-url",
        "https://open.bigmodel.cn/api/anthropic",
        "--model",
        "glm-4.6",
        "--timeout-ms",
        "600000",
        "--disable-traffic",
    ]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let profile = &sandbox.read_config()["profiles"]["glm"];
    assert_eq!(
        profile["ANTHROPIC_BASE_URL"],
        "https://open.bigmodel.cn/api/anthropic"
    );
    assert_eq!(profile["ANTHROPIC_MODEL"], "glm-4.6");
    assert_eq!(profile["API_TIMEOUT_MS"], "600000");
    assert_eq!(profile["CLAUDE_CODE_DISABLE_NONESSENTIAL_TRAFFIC"], "1");
}

#[test]
fn second_add_keeps_default_and_overwrite_warns() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox.run(&["add", "glm", "--token", "sk-glm"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.read_config()["default"], "kimi");

    let output = sandbox.run(&["add", "glm", "--token", "sk-glm-2"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("already existed and was overwritten"));
    assert_eq!(
        sandbox.read_config()["profiles"]["glm"]["ANTHROPIC_AUTH_TOKEN"],
        "sk-glm-2"
    );
}

#[test]
fn list_shows_insertion_order_with_default_marker() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    for flag in ["-l", "--list"] {
        let output = sandbox.run(&[flag]);
        assert!(output.status.success(), "stderr: {}", stderr(&output));
        assert_eq!(
            stdout(&output),
            "Available profiles:\n  - kimi (default)\n  - anthropic\n"
        );
    }
}

#[test]
fn delete_default_moves_default_then_clears_it() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox.run(&["delete", "kimi"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.read_config()["default"], "anthropic");

    let output = sandbox.run(&["delete", "anthropic"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let config = sandbox.read_config();
    assert_eq!(config["default"], "");
    assert_eq!(config["profiles"], serde_json::json!({}));
}

#[test]
fn delete_unknown_profile_fails_and_keeps_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox.run(&["delete", "ghost"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Profile not found: ghost"));
    let raw = std::fs::read_to_string(sandbox.config_path()).expect("config exists");
    assert_eq!(raw, TWO_PROFILES);
}

#[test]
fn set_default_updates_file() {
    let sandbox = Sandbox::new();
    sandbox.write_config(TWO_PROFILES);

    let output = sandbox.run(&["set-default", "anthropic"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(sandbox.read_config()["default"], "anthropic");

    let output = sandbox.run(&["set-default", "ghost"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(sandbox.read_config()["default"], "anthropic");
}

#[test]
fn config_env_var_redirects_store() {
    let sandbox = Sandbox::new();
    let alternate = sandbox.home.path().join("alt.json");

    let output = sandbox
        .command(&["add", "alt", "--token", "sk-alt"])
        .env("CCSWITCH_CONFIG", &alternate)
        .output()
        .expect("ccswitch runs");

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(alternate.exists());
    assert!(!sandbox.config_path().exists());
}

#[test]
fn corrupt_config_is_reported() {
    let sandbox = Sandbox::new();
    sandbox.write_config("{ \"profiles\": ");

    let output = sandbox.run(&["-l"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse config file"));
}

#[test]
fn version_and_help_exit_cleanly() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["--version"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains(env!("CARGO_PKG_VERSION")));

    let output = sandbox.run(&["-h"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("set-default"));
}
