//! Tests for full games driven by the orchestrator.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_bot::{
    ConsoleSource, ConsoleView, GameError, GameEvent, LlmError, LlmSource, Orchestrator,
    TextCompletion, TimeoutSource,
};
use tictactoe_core::{
    Acquisition, AttemptError, Mark, MoveSource, Outcome, Snapshot, SourceError,
};
use tokio::sync::mpsc;

/// Completion backend replaying canned responses and recording prompts.
struct ScriptedCompletion {
    responses: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    fn new(responses: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.iter().map(|r| Ok(r.to_string())).collect()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn with_results(responses: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextCompletion for ScriptedCompletion {
    async fn complete(&self, _system_prompt: &str, user_message: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(user_message.to_string());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::new(message)),
            None => Err(LlmError::new("script exhausted".to_string())),
        }
    }
}

/// Source that never answers.
struct Silent;

#[async_trait::async_trait]
impl MoveSource for Silent {
    async fn propose(
        &mut self,
        _snapshot: &Snapshot,
        _mark: Mark,
        _opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(vec![1, 1])
    }

    fn name(&self) -> &str {
        "silent"
    }
}

fn console(name: &str, lines: &'static str) -> Box<dyn MoveSource> {
    Box::new(ConsoleSource::new(name, lines.as_bytes(), tokio::io::sink()))
}

fn drain(mut rx: mpsc::UnboundedReceiver<GameEvent>) -> Vec<GameEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn test_human_beats_bot() {
    let completion = ScriptedCompletion::new(&["(2, 1)", "(2, 2)"]);
    let human = console("Human", "1, 1\n1, 2\n1, 3\n");
    let bot: Box<dyn MoveSource> = Box::new(LlmSource::new("Bot", completion.clone()));

    let (mut tx, rx) = mpsc::unbounded_channel();
    let report = Orchestrator::new(human, bot, Acquisition::default())
        .run(&mut tx)
        .await
        .expect("game finishes");

    assert_eq!(report.outcome, Outcome::Win(Mark::X));
    assert_eq!(
        report.snapshot.history.entries(),
        vec!["X: (1, 1)", "O: (2, 1)", "X: (1, 2)", "O: (2, 2)", "X: (1, 3)"]
    );

    let prompts = completion.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("Your mark is O and your opponent's mark is X."));
    assert!(prompts[0].contains("History: ['X: (1, 1)']"));
    assert!(prompts[1].contains("History: ['X: (1, 1)', 'O: (2, 1)', 'X: (1, 2)']"));

    let events = drain(rx);
    assert!(matches!(events.first(), Some(GameEvent::Started { .. })));
    assert_eq!(
        events.last(),
        Some(&GameEvent::GameOver {
            outcome: Outcome::Win(Mark::X),
            winner: Some("Human".to_string()),
        })
    );
}

#[tokio::test]
async fn test_bot_retries_after_bad_responses() {
    // Bot plays X. First answer is prose, second targets the centre it
    // already took, third is legal.
    let completion = ScriptedCompletion::new(&[
        "(2, 2)",
        "I will take the corner",
        "(2, 2)",
        "(1, 1)",
        "(3, 3)",
    ]);
    let bot: Box<dyn MoveSource> = Box::new(LlmSource::new("Bot", completion.clone()));
    let human = console("Human", "1, 2\n2, 1\n");

    let (mut tx, rx) = mpsc::unbounded_channel();
    let report = Orchestrator::new(bot, human, Acquisition::default())
        .run(&mut tx)
        .await
        .expect("game finishes");

    assert_eq!(report.outcome, Outcome::Win(Mark::X));
    assert_eq!(completion.prompts().len(), 5);

    let rejections: Vec<u32> = drain(rx)
        .into_iter()
        .filter_map(|e| match e {
            GameEvent::MoveRejected { attempt, .. } => Some(attempt),
            _ => None,
        })
        .collect();
    assert_eq!(rejections, vec![1, 2]);
}

#[tokio::test]
async fn test_exhaustion_aborts_game() {
    let human = console("Human", "4, 1\nzero\n2\n");
    let bot: Box<dyn MoveSource> = Box::new(LlmSource::new("Bot", ScriptedCompletion::new(&[])));

    let (mut tx, rx) = mpsc::unbounded_channel();
    let err = Orchestrator::new(human, bot, Acquisition::default())
        .run(&mut tx)
        .await
        .expect_err("game aborts");

    match err {
        GameError::Exhausted { player, cause } => {
            assert_eq!(player, "Human");
            assert_eq!(cause.mark, Mark::X);
            assert_eq!(cause.attempts, 3);
            assert!(matches!(cause.last_error, AttemptError::Invalid(_)));
        }
        other => panic!("unexpected error: {other}"),
    }

    let events = drain(rx);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::MoveMade { .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
}

#[tokio::test]
async fn test_completion_failure_counts_as_attempt() {
    let completion = ScriptedCompletion::with_results(vec![
        Err("rate limited".to_string()),
        Ok("(1, 1)".to_string()),
        Ok("(1, 2)".to_string()),
        Ok("(1, 3)".to_string()),
    ]);
    let bot: Box<dyn MoveSource> = Box::new(LlmSource::new("Bot", completion.clone()));
    let human = console("Human", "3, 1\n3, 2\n");

    let mut view = ConsoleView::new(Vec::new());
    let report = Orchestrator::new(bot, human, Acquisition::default())
        .run(&mut view)
        .await
        .expect("game finishes");

    assert_eq!(report.outcome, Outcome::Win(Mark::X));
    let text = String::from_utf8(view.into_inner()).unwrap();
    assert!(text.contains("rate limited"));
    assert!(text.contains("Bot trying again. (Attempt 2/3)"));
    assert!(text.ends_with("X wins!\n"));
}

#[tokio::test]
async fn test_tie_game() {
    // X O X
    // X O O
    // O X X
    let x = console("Ann", "1, 1\n1, 3\n2, 1\n3, 2\n3, 3\n");
    let o = console("Bob", "1, 2\n2, 2\n2, 3\n3, 1\n");

    let mut view = ConsoleView::new(Vec::new());
    let report = Orchestrator::new(x, o, Acquisition::default())
        .run(&mut view)
        .await
        .expect("game finishes");

    assert_eq!(report.outcome, Outcome::Tie);
    assert_eq!(report.snapshot.history.len(), 9);
    let text = String::from_utf8(view.into_inner()).unwrap();
    assert!(text.ends_with("Tie!\n"));
}

#[tokio::test]
async fn test_timeout_is_retry_eligible() {
    let slow = TimeoutSource::new(Silent, Duration::from_millis(20));
    let bot: Box<dyn MoveSource> = Box::new(slow);
    let human = console("Human", "1, 1\n");

    let (mut tx, _rx) = mpsc::unbounded_channel();
    let err = Orchestrator::new(human, bot, Acquisition::with_max_attempts(2).unwrap())
        .run(&mut tx)
        .await
        .expect_err("bot times out");

    match err {
        GameError::Exhausted { player, cause } => {
            assert_eq!(player, "silent");
            assert_eq!(cause.attempts, 2);
            assert!(matches!(
                cause.last_error,
                AttemptError::Source(SourceError::TimedOut { .. })
            ));
        }
        other => panic!("unexpected error: {other}"),
    }
}
