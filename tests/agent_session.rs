use std::sync::Arc;

use serde_json::json;

use todo_agent::agent::{AgentConfig, TodoAgent, INITIAL_REMINDER, NAG_REMINDER};
use todo_agent::conversation::ConversationTurn;
use todo_agent::core::AgentEvent;
use todo_agent::helpers::TodoStatus;
use todo_agent::llm::{text_response, tool_use_response, ContentBlock, ScriptedProvider};

fn todo_items(statuses: [&str; 2]) -> serde_json::Value {
    json!({
        "items": [
            {"content": "Write greeting", "status": statuses[0], "activeForm": "Writing greeting"},
            {"content": "Polish greeting", "status": statuses[1], "activeForm": "Polishing greeting"}
        ]
    })
}

#[tokio::test]
async fn test_multi_round_session() {
    let workdir = tempfile::tempdir().unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(&[("t1", "TodoWrite", todo_items(["in_progress", "pending"]))]),
        tool_use_response(&[(
            "w1",
            "write_file",
            json!({"path": "src/hello.txt", "content": "hello world\n"}),
        )]),
        tool_use_response(&[
            (
                "e1",
                "edit_file",
                json!({"path": "src/hello.txt", "old_text": "world", "new_text": "there"}),
            ),
            ("r1", "read_file", json!({"path": "src/hello.txt"})),
        ]),
        tool_use_response(&[("t2", "TodoWrite", todo_items(["completed", "completed"]))]),
        text_response("Greeting written."),
    ]));

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let config = AgentConfig::new("You are a test agent.", workdir.path());
    let mut agent = TodoAgent::new(provider.clone(), config).unwrap().with_events(tx);

    let answer = agent.run("Write a greeting file").await.unwrap();
    assert_eq!(answer, "Greeting written.");

    assert_eq!(
        std::fs::read_to_string(workdir.path().join("src/hello.txt")).unwrap(),
        "hello there\n"
    );

    let todos = agent.todos();
    assert_eq!(todos.len(), 2);
    assert!(todos.items().iter().all(|t| t.status == TodoStatus::Completed));
    assert_eq!(todos.counts(), (0, 0, 2));

    let state = agent.state().unwrap();
    assert_eq!(state.rounds(), 4);
    assert_eq!(state.rounds_without_todo_update(), 0);

    let turns = state.transcript().turns();
    assert_eq!(turns[0], ConversationTurn::reminder(INITIAL_REMINDER));
    assert!(!turns
        .iter()
        .any(|t| matches!(t, ConversationTurn::Reminder { text } if text == NAG_REMINDER)));

    // The request after the edit/read round carries both results, in order
    let requests = provider.requests();
    assert_eq!(requests.len(), 5);
    let blocks = requests[3].messages.last().unwrap().blocks().unwrap().to_vec();
    match (&blocks[0], &blocks[1]) {
        (
            ContentBlock::ToolResult { tool_use_id: first, .. },
            ContentBlock::ToolResult { tool_use_id: second, content, .. },
        ) => {
            assert_eq!(first, "e1");
            assert_eq!(second, "r1");
            assert_eq!(content.as_deref(), Some("hello there\n"));
        }
        other => panic!("unexpected blocks {:?}", other),
    }

    for request in &requests {
        let roles: Vec<&str> = request.messages.iter().map(|m| m.role.as_str()).collect();
        for pair in roles.windows(2) {
            assert_ne!(pair[0], pair[1], "roles must alternate");
        }
    }

    let mut tool_calls = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let AgentEvent::ToolCall { name, .. } = event {
            tool_calls.push(name);
        }
    }
    assert_eq!(
        tool_calls,
        vec!["TodoWrite", "write_file", "edit_file", "read_file", "TodoWrite"]
    );
}

#[tokio::test]
async fn test_errors_are_fed_back_to_the_model() {
    let workdir = tempfile::tempdir().unwrap();

    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_use_response(&[
            ("x1", "read_file", json!({"path": "../../etc/passwd"})),
            ("x2", "launch_rockets", json!({})),
            ("x3", "bash", json!({"command": "sudo reboot"})),
        ]),
        text_response("Could not do it."),
    ]));

    let mut agent = TodoAgent::new(provider.clone(), AgentConfig::new("sys", workdir.path())).unwrap();
    assert_eq!(agent.run("try things").await.unwrap(), "Could not do it.");

    let last = provider.requests()[1].messages.last().unwrap().clone();
    let blocks = last.blocks().unwrap();
    assert_eq!(blocks.len(), 3);
    for block in blocks {
        assert!(matches!(
            block,
            ContentBlock::ToolResult { is_error: Some(true), .. }
        ));
    }
}
