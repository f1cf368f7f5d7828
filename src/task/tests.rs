use crate::aggregator::DataAggregator;
use crate::error::ReportError;
use crate::provider::{HistoryProvider, MockProvider};
use crate::report::generator::MockGenerator;
use crate::report::{ReportSynthesizer, mocks};
use crate::task::manager::{ReportTaskManager, map_runtime_state};
use crate::task::runtime::{TaskRuntime, TokioTaskRuntime};
use crate::task::types::{RuntimeState, TaskId, TaskStatus};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn test_manager() -> ReportTaskManager {
    let aggregator = DataAggregator::new(
        vec![
            Arc::new(MockProvider::succeeding("Carfax", json!({ "a": 1 })))
                as Arc<dyn HistoryProvider>,
            Arc::new(MockProvider::succeeding("ClearWin", json!({ "b": 2 }))),
        ],
        Duration::from_millis(200),
    )
    .unwrap();
    let synthesizer = ReportSynthesizer::new(
        aggregator,
        Arc::new(MockGenerator::responding(mocks::FIXTURE_RESPONSE)),
        false,
    );
    ReportTaskManager::new(Arc::new(synthesizer), Arc::new(TokioTaskRuntime::new()))
}

async fn poll_until_terminal(manager: &ReportTaskManager, task_id: TaskId) -> TaskStatus {
    for _ in 0..200 {
        let poll = manager.poll(task_id).await.unwrap();
        if poll.status.is_terminal() {
            return poll.status;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("task {task_id} never reached a terminal state");
}

#[test]
fn runtime_states_map_onto_the_domain_vocabulary() {
    assert_eq!(
        map_runtime_state(RuntimeState::Pending),
        (TaskStatus::Pending, "Task is pending")
    );
    assert_eq!(
        map_runtime_state(RuntimeState::Started),
        (TaskStatus::Started, "Task started")
    );
    assert_eq!(
        map_runtime_state(RuntimeState::Retry),
        (TaskStatus::InProgress, "Task is retrying")
    );
    assert_eq!(
        map_runtime_state(RuntimeState::Running),
        (TaskStatus::InProgress, "Task is in progress")
    );
    assert_eq!(
        map_runtime_state(RuntimeState::Success),
        (TaskStatus::Completed, "Task completed successfully")
    );
    assert_eq!(
        map_runtime_state(RuntimeState::Failure),
        (TaskStatus::Failed, "Task failed")
    );
}

#[tokio::test]
async fn submit_rejects_an_invalid_vin_before_enqueueing() {
    let manager = test_manager();
    let err = manager.submit("not-a-vin").await.unwrap_err();
    assert!(matches!(err, ReportError::InvalidVin(_)));
}

#[tokio::test]
async fn polling_an_unknown_id_is_not_found() {
    let manager = test_manager();
    let err = manager.poll(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, ReportError::TaskNotFound(_)));
}

#[tokio::test]
async fn a_just_submitted_task_is_never_not_found() {
    let manager = test_manager();
    let task_id = manager.submit("1HGBH41JXMN109186").await.unwrap();

    // No sleeping: this poll races the worker on purpose. Whatever state
    // the worker is in, the id must be recognized.
    let poll = manager.poll(task_id).await.unwrap();
    assert!(matches!(
        poll.status,
        TaskStatus::Pending
            | TaskStatus::Started
            | TaskStatus::InProgress
            | TaskStatus::Completed
    ));
}

#[tokio::test]
async fn completed_tasks_return_a_reconstructed_report() {
    let manager = test_manager();
    let task_id = manager.submit("1HGBH41JXMN109186").await.unwrap();

    let status = poll_until_terminal(&manager, task_id).await;
    assert_eq!(status, TaskStatus::Completed);

    let poll = manager.poll(task_id).await.unwrap();
    assert_eq!(poll.message, "Task completed successfully");
    let report = poll.result.expect("completed poll carries the report");
    assert_eq!(report.vin.as_str(), "1HGBH41JXMN109186");
    assert_eq!(report.confidence_score, 1.0);
    assert!(report.body.is_structured());

    // Polling is idempotent: a second read returns the same outcome.
    let again = manager.poll(task_id).await.unwrap();
    assert_eq!(again.status, TaskStatus::Completed);
    assert!(again.result.is_some());
}

#[tokio::test]
async fn non_terminal_polls_carry_no_result() {
    let manager = test_manager();
    let task_id = manager.submit("1HGBH41JXMN109186").await.unwrap();

    let poll = manager.poll(task_id).await.unwrap();
    if !poll.status.is_terminal() {
        assert!(poll.result.is_none());
    }
}

#[tokio::test]
async fn a_failing_job_surfaces_as_failed_with_its_message() {
    let runtime = TokioTaskRuntime::new();
    let task_id = runtime
        .submit(Box::pin(async { Err("boom".to_string()) }))
        .await;

    for _ in 0..200 {
        let snapshot = runtime.state_of(task_id).await.unwrap();
        if snapshot.state == RuntimeState::Failure {
            assert_eq!(snapshot.error.as_deref(), Some("boom"));
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job never failed");
}

#[tokio::test]
async fn a_panicking_job_surfaces_as_failed_not_as_a_lost_task() {
    let runtime = TokioTaskRuntime::new();
    let task_id = runtime
        .submit(Box::pin(async { panic!("report worker exploded") }))
        .await;

    for _ in 0..200 {
        let snapshot = runtime.state_of(task_id).await.unwrap();
        if snapshot.state == RuntimeState::Failure {
            assert!(snapshot.error.unwrap().contains("worker panicked"));
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job never failed");
}
