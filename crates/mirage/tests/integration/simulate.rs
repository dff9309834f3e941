use mirage::{
    CompletionFailure, CompletionOutcome, LIVE_PREVIEW_MESSAGE, NEEDS_INPUT_MESSAGE,
    RequestError, Simulation, SimulationRequest,
};

use super::{StubGateway, simulator_with};

const PYTHON_WITH_INPUT: &str = "name = input('Name: ')\nprint('Hello, ' + name)";

#[tokio::test]
async fn test_needs_input_without_calling_gateway() {
    let gateway = StubGateway::text("unused");
    let simulator = simulator_with(&gateway);

    let result = simulator
        .simulate(&SimulationRequest::new(PYTHON_WITH_INPUT, "python"))
        .await
        .expect("simulate failed");

    assert_eq!(
        result,
        Simulation::NeedsInput {
            message: NEEDS_INPUT_MESSAGE.to_owned()
        }
    );
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_needs_input_any_case() {
    let gateway = StubGateway::text("unused");
    let simulator = simulator_with(&gateway);

    let result = simulator
        .simulate(&SimulationRequest::new("int n; STD::CIN >> n;", "cpp"))
        .await
        .unwrap();

    assert!(result.needs_input());
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_inputs_reach_prompt() {
    let gateway = StubGateway::text("Name: Ada\nHello, Ada");
    let simulator = simulator_with(&gateway);

    let request = SimulationRequest::new(PYTHON_WITH_INPUT, "python").with_input("Ada");
    let result = simulator.simulate(&request).await.unwrap();

    assert_eq!(result, Simulation::Output("Name: Ada\nHello, Ada".to_owned()));
    assert_eq!(gateway.calls(), 1);

    let prompt = gateway.last_prompt().unwrap();
    assert!(prompt.contains("Ada"));
    assert!(prompt.contains(PYTHON_WITH_INPUT));
    assert!(prompt.contains("PYTHON"));
}

#[tokio::test]
async fn test_code_without_input_goes_straight_to_gateway() {
    let gateway = StubGateway::text("Hello, World!");
    let simulator = simulator_with(&gateway);

    let result = simulator
        .simulate(&SimulationRequest::new("print(\"Hello, World!\")", "python"))
        .await
        .unwrap();

    assert_eq!(result.output(), Some("Hello, World!"));
    assert_eq!(gateway.calls(), 1);
    assert!(!gateway.last_prompt().unwrap().contains("User inputs"));
}

#[tokio::test]
async fn test_markup_short_circuits() {
    let gateway = StubGateway::text("unused");
    let simulator = simulator_with(&gateway);

    for (language, code) in [
        ("html", "<input type=\"text\"><script>prompt('x')</script>"),
        ("css", "body { color: red; }"),
        ("html", ""),
    ] {
        let result = simulator
            .simulate(&SimulationRequest::new(code, language))
            .await
            .unwrap();
        assert_eq!(result, Simulation::Output(LIVE_PREVIEW_MESSAGE.to_owned()));
    }
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_unknown_language() {
    let gateway = StubGateway::text("unused");
    let simulator = simulator_with(&gateway);

    let err = simulator
        .simulate(&SimulationRequest::new("IDENTIFICATION DIVISION.", "cobol"))
        .await
        .unwrap_err();

    assert!(matches!(err, RequestError::UnsupportedLanguage(ref key) if key == "cobol"));
    assert!(err.is_client_error());
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_timeout_becomes_error() {
    let gateway = StubGateway::answering(CompletionOutcome::Failure(CompletionFailure::Timeout {
        seconds: 30,
    }));
    let simulator = simulator_with(&gateway);

    let err = simulator
        .simulate(&SimulationRequest::new("print(1)", "python"))
        .await
        .unwrap_err();

    assert!(!err.is_client_error());
    assert!(err.to_string().starts_with("Network error"));
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_network_error_becomes_error() {
    let gateway = StubGateway::answering(CompletionOutcome::Failure(CompletionFailure::Network(
        "dns failure".to_owned(),
    )));
    let simulator = simulator_with(&gateway);

    let err = simulator
        .simulate(&SimulationRequest::new("print(1)", "python"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Network error: dns failure");
}

#[tokio::test]
async fn test_api_error_embeds_status() {
    let gateway = StubGateway::answering(CompletionOutcome::Failure(CompletionFailure::Api {
        status: 429,
        detail: "quota".to_owned(),
    }));
    let simulator = simulator_with(&gateway);

    let err = simulator
        .simulate(&SimulationRequest::new("print(1)", "python"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "API Error: 429");
}
