use mirage::{CompletionFailure, CompletionOutcome, SuggestionRequest};

use super::{StubGateway, simulator_with};

#[tokio::test]
async fn test_suggestion_returned_verbatim() {
    let gateway = StubGateway::text("x=1\nprint(x)");
    let simulator = simulator_with(&gateway);

    let suggestion = simulator
        .suggest(&SuggestionRequest::new("x=1", "python", "add a print statement"))
        .await
        .expect("suggest failed");

    assert_eq!(suggestion, "x=1\nprint(x)");
    assert_eq!(gateway.calls(), 1);

    let prompt = gateway.last_prompt().unwrap();
    assert!(prompt.contains("x=1"));
    assert!(prompt.contains("PYTHON"));
    assert!(prompt.contains("add a print statement"));
}

#[tokio::test]
async fn test_suggestion_skips_input_detection() {
    let gateway = StubGateway::text("name = input('Your name: ')");
    let simulator = simulator_with(&gateway);

    let suggestion = simulator
        .suggest(&SuggestionRequest::new(
            "name = input()",
            "python",
            "add a prompt string",
        ))
        .await
        .unwrap();

    assert_eq!(suggestion, "name = input('Your name: ')");
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_suggestion_strips_wrapping_fence() {
    let gateway = StubGateway::text("```cpp\nint main() { return 0; }\n```");
    let simulator = simulator_with(&gateway);

    let suggestion = simulator
        .suggest(&SuggestionRequest::new("int main() {}", "cpp", "return zero"))
        .await
        .unwrap();

    assert_eq!(suggestion, "int main() { return 0; }");
}

#[tokio::test]
async fn test_suggestion_failure_becomes_error() {
    let gateway = StubGateway::answering(CompletionOutcome::Failure(CompletionFailure::Timeout {
        seconds: 30,
    }));
    let simulator = simulator_with(&gateway);

    let err = simulator
        .suggest(&SuggestionRequest::new("x=1", "python", "anything"))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Network error"));
}

#[tokio::test]
async fn test_suggestion_unknown_language() {
    let gateway = StubGateway::text("unused");
    let simulator = simulator_with(&gateway);

    let err = simulator
        .suggest(&SuggestionRequest::new("x", "brainfuck", "anything"))
        .await
        .unwrap_err();

    assert!(err.is_client_error());
    assert_eq!(gateway.calls(), 0);
}
