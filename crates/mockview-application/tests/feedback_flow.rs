mod common;

use common::{PLAIN_ANSWER, ScriptedGateway, feedback_service, fixture};
use mockview_core::InterviewError;
use mockview_core::llm::GatewayError;
use mockview_core::role::RoleProvider;
use mockview_core::session::Message;
use mockview_infrastructure::RoleCatalog;
use serde_json::json;
use std::time::Duration;

fn transcript() -> Vec<Message> {
    vec![
        Message::question("Tell me about yourself.").unwrap(),
        Message::answer(PLAIN_ANSWER).unwrap(),
    ]
}

fn full_reply() -> String {
    json!({
        "scores": { "communication": 4, "technical_knowledge": 5, "structure": 3 },
        "strengths": ["Clear examples", "Good depth", "Calm delivery"],
        "improvements": ["Quantify impact", "Shorter intros", "Mention testing"],
        "overall_feedback": "A strong interview with concrete examples and a clear structure throughout."
    })
    .to_string()
}

#[tokio::test]
async fn test_well_formed_reply() {
    let (service, gateway) = feedback_service(ScriptedGateway::new(Ok(full_reply())));
    let catalog = RoleCatalog::builtin().unwrap();
    let role = catalog.get_role("backend_engineer").unwrap();

    let report = service
        .generate_feedback("s1", role, &transcript())
        .await
        .unwrap();
    assert_eq!(report.session_id, "s1");
    assert_eq!(report.scores.technical_knowledge, 5);
    assert_eq!(report.strengths[0], "Clear examples");
    assert_eq!(report.average_score(), 4.0);

    let request = &gateway.requests()[0];
    assert_eq!(request.temperature, 0.3);
    assert_eq!(request.max_tokens, Some(1000));
    assert!(request.prompt.contains("Candidate: Um, I led the migration"));
    assert!(request.prompt.contains("Respond with valid JSON only."));
    assert!(
        request
            .system
            .as_deref()
            .unwrap_or_default()
            .starts_with("You are an expert interview evaluator.")
    );
}

#[tokio::test]
async fn test_missing_improvements_are_padded() {
    let reply = json!({
        "scores": { "communication": "7", "technical_knowledge": -5, "structure": 3.9 },
        "strengths": ["Clear examples", "  ", "Good depth", "Calm", "Extra"],
        "overall_feedback": "short"
    });
    let (service, _) = feedback_service(ScriptedGateway::new(Ok(format!(
        "```json\n{reply}\n```"
    ))));
    let catalog = RoleCatalog::builtin().unwrap();
    let role = catalog.get_role("data_scientist").unwrap();

    let report = service
        .generate_feedback("s2", role, &transcript())
        .await
        .unwrap();

    assert_eq!(report.scores.communication, 5);
    assert_eq!(report.scores.technical_knowledge, 1);
    assert_eq!(report.scores.structure, 3);
    assert_eq!(report.strengths, vec!["Clear examples", "Good depth", "Calm"]);
    assert_eq!(report.improvements.len(), 3);
    for item in &report.improvements {
        assert!(item.contains("Continue practicing to refine your skills"));
    }
    assert!(report.overall_feedback.chars().count() >= 50);
}

#[tokio::test]
async fn test_missing_score_is_validation_error() {
    let reply = json!({ "scores": { "communication": 4, "structure": 3 } }).to_string();
    let (service, _) = feedback_service(ScriptedGateway::new(Ok(reply)));
    let catalog = RoleCatalog::builtin().unwrap();
    let role = catalog.get_role("backend_engineer").unwrap();

    let err = service
        .generate_feedback("s3", role, &transcript())
        .await
        .unwrap_err();
    assert!(matches!(err, InterviewError::FeedbackValidation(_)));
}

#[tokio::test]
async fn test_gateway_errors_become_engine_errors() {
    let catalog = RoleCatalog::builtin().unwrap();
    let role = catalog.get_role("backend_engineer").unwrap();

    let (service, _) =
        feedback_service(ScriptedGateway::failing(GatewayError::connection("down")));
    let err = service
        .generate_feedback("s4", role, &transcript())
        .await
        .unwrap_err();
    assert!(matches!(err, InterviewError::FeedbackEngine { retryable: true, .. }));

    let (service, _) = feedback_service(ScriptedGateway::new(Ok("not json".to_string())));
    let err = service
        .generate_feedback("s4", role, &transcript())
        .await
        .unwrap_err();
    assert!(matches!(err, InterviewError::FeedbackEngine { retryable: false, .. }));
}

#[tokio::test]
async fn test_late_result_is_discarded() {
    let gateway = ScriptedGateway::new(Ok(full_reply())).with_delay(Duration::from_millis(60));
    let (service, _) = feedback_service(gateway);
    let service = service.with_timeout(Duration::from_millis(10));
    let catalog = RoleCatalog::builtin().unwrap();
    let role = catalog.get_role("backend_engineer").unwrap();

    let err = service
        .generate_feedback("s5", role, &transcript())
        .await
        .unwrap_err();
    match err {
        InterviewError::FeedbackTimeout { elapsed_ms, limit_ms } => {
            assert_eq!(limit_ms, 10);
            assert!(elapsed_ms >= 60);
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_complete_with_feedback_ends_session() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx
        .service
        .create_session("backend_engineer", "chat")
        .await
        .unwrap();

    let (feedback, _) = feedback_service(ScriptedGateway::new(Ok(full_reply())));

    let err = fx
        .service
        .complete_with_feedback(session.id(), &feedback)
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());

    let (session, _) = fx
        .service
        .create_session("backend_engineer", "chat")
        .await
        .unwrap();
    fx.service
        .process_answer(session.id(), PLAIN_ANSWER)
        .await
        .unwrap();
    let report = fx
        .service
        .complete_with_feedback(session.id(), &feedback)
        .await
        .unwrap();
    assert_eq!(report.session_id, session.id());
    assert!(!fx.service.get_session(session.id()).await.unwrap().is_active());
}
