use crate::IssueWorld;
use cucumber::{given, then, when};
use std::io::Write;
use std::process::{Command, Stdio};

/// Used when a scenario registers no mocks, so any request fails to connect
const UNREACHABLE_API: &str = "http://127.0.0.1:9";
const TEST_TOKEN: &str = "test-token";

async fn server(world: &mut IssueWorld) -> &mut mockito::ServerGuard {
    if world.server.is_none() {
        world.server = Some(mockito::Server::new_async().await);
    }
    world.server.as_mut().expect("server was just started")
}

fn captured(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).expect("Invalid UTF-8")
}

#[given("a GitHub token is configured")]
async fn token_is_configured(world: &mut IssueWorld) {
    world.token = Some(TEST_TOKEN.to_string());
}

#[given("no GitHub token is configured")]
async fn token_is_not_configured(world: &mut IssueWorld) {
    world.token = None;
}

#[given(regex = r#"^the editor writes "(.*)"$"#)]
async fn editor_writes(world: &mut IssueWorld, text: String) {
    let dir = tempfile::tempdir().expect("Failed to create editor directory");
    let script = dir.path().join("editor.sh");
    std::fs::write(&script, format!("printf '%s\\n' '{text}' > \"$1\"\n"))
        .unwrap_or_else(|e| panic!("Failed to write editor script {:?}: {}", script, e));
    world.editor = Some(format!("sh '{}'", script.display()));
    world.editor_dir = Some(dir);
}

#[given("the editor keeps the text")]
async fn editor_keeps_text(world: &mut IssueWorld) {
    world.editor = Some("true".to_string());
}

#[given(regex = r#"^the user enters "(.*)"$"#)]
async fn user_enters(world: &mut IssueWorld, line: String) {
    world.stdin.push_str(&line);
    world.stdin.push('\n');
}

#[given(regex = r#"^the API responds to (GET|POST|PATCH) "(.*)" with status (\d+) and body '(.*)'$"#)]
async fn api_responds(world: &mut IssueWorld, method: String, path: String, status: usize, body: String) {
    let mock = server(world)
        .await
        .mock(method.as_str(), path.as_str())
        .match_header("authorization", format!("Bearer {TEST_TOKEN}").as_str())
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;
    world.mocks.push(mock);
}

#[given(regex = r#"^the API expects (POST|PATCH) "(.*)" with body '(.*)' and responds (\d+) with '(.*)'$"#)]
async fn api_expects_body(
    world: &mut IssueWorld,
    method: String,
    path: String,
    request_body: String,
    status: usize,
    response_body: String,
) {
    let mock = server(world)
        .await
        .mock(method.as_str(), path.as_str())
        .match_header("authorization", format!("Bearer {TEST_TOKEN}").as_str())
        .match_header("content-type", "application/json")
        .match_body(mockito::Matcher::JsonString(request_body))
        .with_status(status)
        .with_body(response_body)
        .create_async()
        .await;
    world.mocks.push(mock);
}

#[given(regex = r#"^the API expects no call to (GET|POST|PATCH) "(.*)"$"#)]
async fn api_expects_no_call(world: &mut IssueWorld, method: String, path: String) {
    let mock = server(world)
        .await
        .mock(method.as_str(), path.as_str())
        .expect(0)
        .create_async()
        .await;
    world.mocks.push(mock);
}

#[when(regex = r"^I run `github-issue-editor(.*)`$")]
async fn run_command(world: &mut IssueWorld, arguments: String) {
    let api_url = world
        .server
        .as_ref()
        .map(|server| server.url())
        .unwrap_or_else(|| UNREACHABLE_API.to_string());
    let editor = world.editor.clone().unwrap_or_else(|| "true".to_string());

    let mut command = Command::new(env!("CARGO_BIN_EXE_github-issue-editor"));
    command
        .args(arguments.split_whitespace())
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG")
        .env("GITHUB_API_URL", api_url)
        .env("EDITOR", editor)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(token) = &world.token {
        command.env("GITHUB_TOKEN", token);
    }

    let input = world.stdin.clone();
    let output = tokio::task::spawn_blocking(move || {
        let mut child = command
            .spawn()
            .unwrap_or_else(|e| panic!("Failed to execute github-issue-editor: {}", e));
        if let Some(mut stdin) = child.stdin.take() {
            // The process may exit before reading its input
            let _ = stdin.write_all(input.as_bytes());
        }
        child
            .wait_with_output()
            .expect("Failed to wait for github-issue-editor")
    })
    .await
    .expect("Command task panicked");

    world.captured_output = output.stdout;
    world.captured_error = output.stderr;
    world.command_status = Some(output.status);
}

#[then("the command should succeed")]
async fn command_should_succeed(world: &mut IssueWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.success()),
        "Command failed with status: {:?}\nstdout:\n{}\nstderr:\n{}",
        world.command_status,
        captured(&world.captured_output),
        captured(&world.captured_error)
    );
}

#[then("the command should fail")]
async fn command_should_fail(world: &mut IssueWorld) {
    assert!(
        world.command_status.is_some_and(|s| s.code() == Some(1)),
        "Command should have exited with status 1 but got: {:?}\nstdout:\n{}",
        world.command_status,
        captured(&world.captured_output)
    );
}

#[then(regex = r#"^the output should contain "(.*)"$"#)]
async fn output_should_contain(world: &mut IssueWorld, expected: String) {
    let output = captured(&world.captured_output);
    assert!(
        output.contains(&expected),
        "Expected output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then(regex = r"^the output should report created issue number (\d+)$")]
async fn output_should_report_created_issue(world: &mut IssueWorld, expected: u64) {
    let output = captured(&world.captured_output);
    let re = regex::Regex::new(r"Created issue #(\d+)").unwrap();
    let issue_number: u64 = re
        .captures(&output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .expect("Failed to extract issue number from output")
        .parse()
        .expect("Invalid issue number");

    assert_eq!(
        issue_number, expected,
        "Unexpected issue number in output:\n---\n{}\n---",
        output
    );
}

#[then(regex = r#"^the error output should contain "(.*)"$"#)]
async fn error_output_should_contain(world: &mut IssueWorld, expected: String) {
    let output = captured(&world.captured_error);
    assert!(
        output.contains(&expected),
        "Expected error output to contain '{}', but got:\n---\n{}\n---",
        expected,
        output
    );
}

#[then("the API received the expected requests")]
async fn api_received_expected_requests(world: &mut IssueWorld) {
    for mock in &world.mocks {
        mock.assert_async().await;
    }
}
