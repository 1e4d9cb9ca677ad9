use docflow::domain::{
    DocumentId, FailureKind, UploadFailure, UploadFile, UploadStatus, UploadTask,
};

fn task() -> UploadTask {
    UploadTask::new(UploadFile::text("notes.txt", "hello"))
}

fn failure() -> UploadFailure {
    UploadFailure {
        kind: FailureKind::ExtractionFailure,
        message: "boom".to_string(),
    }
}

#[test]
fn given_new_task_when_created_then_is_queued_at_zero_progress() {
    let task = task();

    assert_eq!(task.status, UploadStatus::Queued);
    assert_eq!(task.progress, 0);
    assert!(task.failure.is_none());
    assert!(task.document_id.is_none());
}

#[test]
fn given_full_lifecycle_when_transitioning_in_order_then_reaches_complete() {
    let mut task = task();
    let document_id = DocumentId::new();

    task.transition(UploadStatus::Uploading).unwrap();
    task.transition(UploadStatus::Processing).unwrap();
    task.complete(document_id).unwrap();

    assert_eq!(task.status, UploadStatus::Complete);
    assert_eq!(task.progress, 100);
    assert_eq!(task.document_id, Some(document_id));
}

#[test]
fn given_queued_task_when_skipping_to_processing_then_transition_is_rejected() {
    let mut task = task();

    let result = task.transition(UploadStatus::Processing);

    assert!(result.is_err());
    assert_eq!(task.status, UploadStatus::Queued);
}

#[test]
fn given_any_non_terminal_status_when_failing_then_task_is_error_with_reason() {
    for steps in [0, 1, 2] {
        let mut task = task();
        let path = [UploadStatus::Uploading, UploadStatus::Processing];
        for status in path.iter().take(steps) {
            task.transition(*status).unwrap();
        }

        task.fail(failure()).unwrap();

        assert_eq!(task.status, UploadStatus::Error);
        assert_eq!(task.failure, Some(failure()));
    }
}

#[test]
fn given_terminal_task_when_transitioning_again_then_is_rejected() {
    let mut task = task();
    task.fail(failure()).unwrap();

    assert!(task.transition(UploadStatus::Uploading).is_err());
    assert!(task.complete(DocumentId::new()).is_err());
    assert!(task.fail(failure()).is_err());
}

#[test]
fn given_progress_updates_when_advancing_then_progress_never_decreases() {
    let mut task = task();
    task.transition(UploadStatus::Uploading).unwrap();

    assert!(task.advance_progress(40));
    assert!(!task.advance_progress(20));
    assert_eq!(task.progress, 40);
    assert!(task.advance_progress(250));
    assert_eq!(task.progress, 100);
}

#[test]
fn given_terminal_task_when_advancing_progress_then_update_is_ignored() {
    let mut task = task();
    task.fail(failure()).unwrap();

    assert!(!task.advance_progress(50));
    assert_eq!(task.progress, 0);
}

#[test]
fn given_status_names_when_parsing_then_round_trips() {
    for status in [
        UploadStatus::Queued,
        UploadStatus::Uploading,
        UploadStatus::Processing,
        UploadStatus::Complete,
        UploadStatus::Error,
    ] {
        assert_eq!(status.as_str().parse::<UploadStatus>(), Ok(status));
    }
}
