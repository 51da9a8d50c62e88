//! Tests for the bounded-retry acquisition loop.

use std::collections::VecDeque;
use tictactoe_core::{
    Acquisition, AttemptError, Coordinate, GameState, InvalidMoveError, Mark, MoveSource,
    RejectedAttempt, Snapshot, SourceError, parse_candidate,
};

/// Source that replays scripted responses and counts calls.
struct Scripted {
    responses: VecDeque<Result<Vec<i64>, SourceError>>,
    fallback: Result<Vec<i64>, SourceError>,
    calls: usize,
    seen_history: Vec<usize>,
}

impl Scripted {
    fn new(responses: Vec<Result<Vec<i64>, SourceError>>) -> Self {
        Self {
            responses: responses.into(),
            fallback: Err(SourceError::unavailable("script exhausted")),
            calls: 0,
            seen_history: Vec::new(),
        }
    }

    fn always(response: Result<Vec<i64>, SourceError>) -> Self {
        Self {
            responses: VecDeque::new(),
            fallback: response,
            calls: 0,
            seen_history: Vec::new(),
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for Scripted {
    async fn propose(
        &mut self,
        snapshot: &Snapshot,
        _mark: Mark,
        _opponent: Mark,
    ) -> Result<Vec<i64>, SourceError> {
        self.calls += 1;
        self.seen_history.push(snapshot.history.len());
        self.responses
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn at(row: u8, col: u8) -> Coordinate {
    Coordinate::new(row, col).expect("in range")
}

#[tokio::test]
async fn test_legal_first_candidate_returned() {
    let state = GameState::new();
    let mut source = Scripted::new(vec![Ok(vec![2, 2])]);

    let coordinate = Acquisition::default()
        .acquire(&mut source, &state, Mark::O, Mark::X)
        .await
        .expect("acquired");

    assert_eq!(coordinate, at(2, 2));
    assert_eq!(source.calls, 1);
}

#[tokio::test]
async fn test_always_invalid_exhausts_after_max_attempts() {
    for max in 1..=5 {
        let state = GameState::new();
        let mut source = Scripted::always(Ok(vec![4, 1]));

        let err = Acquisition::with_max_attempts(max)
            .expect("policy")
            .acquire(&mut source, &state, Mark::X, Mark::O)
            .await
            .expect_err("should exhaust");

        assert_eq!(source.calls, max as usize);
        assert_eq!(err.attempts, max);
        assert_eq!(err.mark, Mark::X);
        assert!(matches!(
            err.last_error,
            AttemptError::Invalid(InvalidMoveError::OutOfRange { .. })
        ));
    }
}

#[tokio::test]
async fn test_invalid_then_legal_calls_source_twice() {
    let mut state = GameState::new();
    state.apply(Mark::X, at(1, 1)).expect("apply");
    let mut source = Scripted::new(vec![Ok(vec![1, 1]), Ok(vec![3, 3])]);

    let coordinate = Acquisition::default()
        .acquire(&mut source, &state, Mark::O, Mark::X)
        .await
        .expect("acquired");

    assert_eq!(coordinate, at(3, 3));
    assert_eq!(source.calls, 2);
}

#[tokio::test]
async fn test_parse_and_source_failures_are_retried() {
    let state = GameState::new();
    let mut source = Scripted::new(vec![
        parse_candidate("banana"),
        Err(SourceError::unavailable("network down")),
        Ok(vec![1, 2, 3]),
    ]);

    let mut rejected: Vec<RejectedAttempt> = Vec::new();
    let err = Acquisition::default()
        .acquire_observed(&mut source, &state, Mark::X, Mark::O, |r| {
            rejected.push(r.clone())
        })
        .await
        .expect_err("should exhaust");

    assert_eq!(source.calls, 3);
    assert_eq!(
        rejected.iter().map(|r| r.attempt).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(matches!(
        rejected[0].error,
        AttemptError::Source(SourceError::Unparsable { .. })
    ));
    assert!(matches!(
        rejected[1].error,
        AttemptError::Source(SourceError::Unavailable { .. })
    ));
    assert!(rejected[1].will_retry());
    assert!(!rejected[2].will_retry());
    assert_eq!(
        err.last_error,
        AttemptError::Invalid(InvalidMoveError::MalformedCoordinate { arity: 3 })
    );
}

#[tokio::test]
async fn test_observer_not_called_on_success() {
    let state = GameState::new();
    let mut source = Scripted::new(vec![Ok(vec![3, 1])]);
    let mut calls = 0;

    Acquisition::default()
        .acquire_observed(&mut source, &state, Mark::X, Mark::O, |_| calls += 1)
        .await
        .expect("acquired");

    assert_eq!(calls, 0);
}

#[tokio::test]
async fn test_acquire_does_not_mutate_state() {
    let state = GameState::new();
    let before = state.snapshot();
    let mut source = Scripted::new(vec![Ok(vec![2, 2])]);

    Acquisition::default()
        .acquire(&mut source, &state, Mark::X, Mark::O)
        .await
        .expect("acquired");

    assert_eq!(state.snapshot(), before);
    assert_eq!(source.seen_history, vec![0]);
}

#[tokio::test]
async fn test_boxed_source_is_accepted() {
    let state = GameState::new();
    let mut source: Box<dyn MoveSource> = Box::new(Scripted::new(vec![Ok(vec![1, 3])]));

    let coordinate = Acquisition::default()
        .acquire(&mut source, &state, Mark::X, Mark::O)
        .await
        .expect("acquired");

    assert_eq!(coordinate, at(1, 3));
    assert_eq!(source.name(), "scripted");
}

#[test]
fn test_zero_attempts_rejected() {
    assert!(Acquisition::with_max_attempts(0).is_err());
    assert_eq!(Acquisition::default().max_attempts(), 3);
}
