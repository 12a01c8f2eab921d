mod common;

use common::{PLAIN_ANSWER, ScriptedGateway, fixture};
use mockview_core::InterviewError;
use mockview_core::llm::GatewayError;
use mockview_core::persona::PersonaType;
use mockview_core::session::{
    InterviewTurn, MAX_FOLLOWUPS_PER_QUESTION, MessageType, SessionStatus, SessionStore,
};

#[tokio::test]
async fn test_create_session_asks_first_question() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, first) = fx
        .service
        .create_session("backend_engineer", "chat")
        .await
        .unwrap();

    assert_eq!(session.current_question_index(), 0);
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].message_type(), MessageType::Question);
    assert!(first.contains("Question 1 of 8"));
    assert!(first.contains(session.messages()[0].content()));
    assert_eq!(session.persona().indicators, vec!["initial_state".to_string()]);
}

#[tokio::test]
async fn test_create_session_rejects_bad_input() {
    let fx = fixture(ScriptedGateway::always_complete());

    let err = fx.service.create_session("astronaut", "chat").await.unwrap_err();
    assert!(err.is_invalid_input());
    assert!(err.to_string().contains("backend_engineer"));

    let err = fx
        .service
        .create_session("backend_engineer", "telepathy")
        .await
        .unwrap_err();
    assert!(err.is_invalid_input());
    assert!(fx.store.is_empty().await);
}

#[tokio::test]
async fn test_confused_answer_is_classified() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let turn = fx
        .service
        .process_answer(session.id(), "I don't know. What do you mean?")
        .await
        .unwrap();

    let persona = turn.persona();
    assert_eq!(persona.persona_type, PersonaType::Confused);
    assert!(persona.confidence > 0.3);
    assert!(persona.indicators.iter().any(|tag| tag == "short_answer"));
    assert!(persona.indicators.iter().any(|tag| tag.starts_with("asking_questions")));

    let stored = fx.service.get_session_persona(session.id()).await.unwrap();
    assert_eq!(&stored, persona);
}

#[tokio::test]
async fn test_spam_answer_is_edge_case() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("data_scientist", "voice").await.unwrap();

    let turn = fx
        .service
        .process_answer(session.id(), &"a".repeat(100))
        .await
        .unwrap();
    assert_eq!(turn.persona().persona_type, PersonaType::EdgeCase);
    assert!(turn.persona().confidence >= 0.6);
}

#[tokio::test]
async fn test_complete_reply_advances_with_transition() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
    match &turn {
        InterviewTurn::NextQuestion {
            content,
            question_number,
            ..
        } => {
            assert_eq!(*question_number, 2);
            assert!(content.contains("\n\nQuestion 2 of 8:"));
        }
        other => panic!("expected next question, got {other:?}"),
    }

    let stored = fx.service.get_session(session.id()).await.unwrap();
    assert_eq!(stored.current_question_index(), 1);
    assert_eq!(stored.followup_count(), 0);
    let kinds: Vec<MessageType> = stored.messages().iter().map(|m| m.message_type()).collect();
    assert_eq!(
        kinds,
        vec![MessageType::Question, MessageType::Answer, MessageType::Question]
    );
}

#[tokio::test]
async fn test_verdict_sentence_is_not_a_followup() {
    for verdict in [
        "The candidate's answer is COMPLETE.",
        "Answer: COMPLETE",
        "Verdict - COMPLETE, no follow-up needed",
    ] {
        let fx = fixture(ScriptedGateway::new(Ok(verdict.to_string())));
        let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

        let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
        assert_eq!(turn.kind(), "question", "{verdict}");

        let stored = fx.service.get_session(session.id()).await.unwrap();
        assert_eq!(stored.followup_count(), 0);
        assert!(
            stored
                .messages()
                .iter()
                .all(|m| m.message_type() != MessageType::Followup)
        );
    }
}

#[tokio::test]
async fn test_lock_entries_are_dropped_when_sessions_end() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (first, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();
    let (second, _) = fx.service.create_session("data_scientist", "chat").await.unwrap();

    fx.service.process_answer(first.id(), PLAIN_ANSWER).await.unwrap();
    fx.service.process_answer(second.id(), PLAIN_ANSWER).await.unwrap();
    assert_eq!(fx.service.locks().len().await, 2);

    fx.service.end_session(first.id()).await.unwrap();
    assert_eq!(fx.service.locks().len().await, 1);

    for _ in 1..8 {
        fx.service.process_answer(second.id(), PLAIN_ANSWER).await.unwrap();
    }
    let stored = fx.service.get_session(second.id()).await.unwrap();
    assert_eq!(stored.status(), SessionStatus::Completed);
    assert!(fx.service.locks().is_empty().await);
}

#[tokio::test]
async fn test_followup_is_recorded_and_adapted() {
    let followup = "Can you describe how you measured the latency improvements?";
    let fx = fixture(ScriptedGateway::always_complete().then_ok(followup));
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let turn = fx
        .service
        .process_answer(session.id(), "I don't know. What do you mean?")
        .await
        .unwrap();
    match &turn {
        InterviewTurn::Followup {
            content,
            question_number,
            ..
        } => {
            assert_eq!(*question_number, 1);
            assert!(content.starts_with("I notice you might need some guidance."));
            assert!(content.contains(followup));
        }
        other => panic!("expected follow-up, got {other:?}"),
    }

    let stored = fx.service.get_session(session.id()).await.unwrap();
    assert_eq!(stored.followup_count(), 1);
    assert_eq!(stored.current_question_index(), 0);
    let last = stored.last_message().unwrap();
    assert_eq!(last.message_type(), MessageType::Followup);
    assert_eq!(last.content(), followup);

    // The analysis request carries the interviewer prompt and the answer.
    let request = &fx.gateway.requests()[0];
    assert!(request.prompt.contains("What do you mean?"));
    assert!(request.system.as_deref().unwrap_or_default().contains("Backend Engineer"));
    assert_eq!(request.temperature, 0.7);
}

#[tokio::test]
async fn test_followups_are_capped_per_question() {
    let gateway = ScriptedGateway::new(Ok(
        "Could you go deeper into the trade-offs you considered?".to_string(),
    ));
    let fx = fixture(gateway);
    let (session, _) = fx.service.create_session("product_manager", "chat").await.unwrap();

    for round in 1..=MAX_FOLLOWUPS_PER_QUESTION {
        let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
        assert_eq!(turn.kind(), "followup", "round {round}");
    }
    assert_eq!(fx.gateway.calls(), 3);

    // The fourth answer advances without consulting the model.
    let stored = fx.store.get(session.id()).await.unwrap().unwrap();
    assert_eq!(
        fx.service
            .should_ask_followup(&stored, PLAIN_ANSWER, "Any question?")
            .await,
        None
    );
    let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
    assert_eq!(turn.kind(), "question");
    assert_eq!(turn.question_number(), 2);
    assert_eq!(fx.gateway.calls(), 3);

    let stored = fx.service.get_session(session.id()).await.unwrap();
    assert_eq!(stored.followup_count(), 0);
}

#[tokio::test]
async fn test_gateway_failure_fails_open() {
    let fx = fixture(ScriptedGateway::failing(GatewayError::connection("down")));
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
    assert_eq!(turn.kind(), "question");
}

#[tokio::test]
async fn test_degenerate_followup_is_ignored() {
    let fx = fixture(ScriptedGateway::always_complete().then_ok("Why?"));
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
    assert_eq!(turn.kind(), "question");
}

#[tokio::test]
async fn test_full_interview_completes() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("data_scientist", "chat").await.unwrap();

    let mut last_index = 0;
    let mut last_turn = None;
    for _ in 0..8 {
        let turn = fx.service.process_answer(session.id(), PLAIN_ANSWER).await.unwrap();
        let index = fx
            .service
            .get_session(session.id())
            .await
            .unwrap()
            .current_question_index();
        assert!(index >= last_index);
        last_index = index;
        last_turn = Some(turn);
    }

    let turn = last_turn.unwrap();
    assert!(turn.is_complete());
    assert_eq!(turn.question_number(), 8);

    let stored = fx.service.get_session(session.id()).await.unwrap();
    assert_eq!(stored.status(), SessionStatus::Completed);
    assert_eq!(stored.answer_count(), 8);

    let progress = fx.service.get_session_progress(session.id()).await.unwrap();
    assert_eq!(progress.current_question, 8);
    assert_eq!(progress.progress_percentage, 100.0);
}

#[tokio::test]
async fn test_completed_session_is_frozen() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let ended = fx.service.end_session(session.id()).await.unwrap();
    assert_eq!(ended.status(), SessionStatus::Completed);
    let before = fx.service.get_session(session.id()).await.unwrap();

    let err = fx
        .service
        .process_answer(session.id(), PLAIN_ANSWER)
        .await
        .unwrap_err();
    assert!(err.is_invalid_state());
    assert_eq!(fx.service.get_session(session.id()).await.unwrap(), before);

    // Ending again is harmless.
    assert!(fx.service.end_session(session.id()).await.is_ok());
}

#[tokio::test]
async fn test_blank_answer_and_unknown_session() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let err = fx.service.process_answer(session.id(), "   ").await.unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(
        fx.service.get_session_transcript(session.id()).await.unwrap().len(),
        1
    );

    let err = fx.service.process_answer("missing", "hello").await.unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(err, InterviewError::NotFound { entity_type: "session", .. }));
}

#[tokio::test]
async fn test_listing_and_answer_length() {
    let fx = fixture(ScriptedGateway::always_complete());
    let (first, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();
    let (second, _) = fx.service.create_session("product_manager", "voice").await.unwrap();
    fx.service.end_session(second.id()).await.unwrap();

    let active = fx.service.list_active_sessions().await.unwrap();
    let completed = fx.service.list_completed_sessions().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), first.id());
    assert_eq!(completed[0].id(), second.id());

    assert!(fx.service.validate_answer_length(&"word ".repeat(2000)).is_ok());
    let err = fx
        .service
        .validate_answer_length(&"word ".repeat(2001))
        .unwrap_err();
    assert!(err.to_string().contains("2001 words"));

    let intro = fx.service.intro_message("backend_engineer", "voice").unwrap();
    assert!(intro.contains("Backend Engineer"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_answers_are_serialized() {
    let fx = fixture(
        ScriptedGateway::always_complete().with_delay(std::time::Duration::from_millis(10)),
    );
    let (session, _) = fx.service.create_session("backend_engineer", "chat").await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = fx.service.clone();
        let id = session.id().to_string();
        handles.push(tokio::spawn(async move {
            service.process_answer(&id, PLAIN_ANSWER).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = fx.service.get_session(session.id()).await.unwrap();
    assert_eq!(stored.current_question_index(), 4);
    assert_eq!(stored.answer_count(), 4);
}
