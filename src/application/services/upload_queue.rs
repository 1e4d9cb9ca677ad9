use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use futures::stream::{self, BoxStream};
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::domain::{
    DocumentId, FailureKind, NewDocument, Tone, UploadFailure, UploadFile, UploadStatus,
    UploadTask, UploadTaskId,
};

use super::file_ingestor::{FileIngestor, IngestionError};
use super::sync_manager::{SyncError, SyncManager};

const COMMAND_CAPACITY: usize = 32;
const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct UploadQueueConfig {
    /// Pause between transferred chunks. Zero transfers as fast as the runtime allows.
    pub progress_tick: Duration,
    pub chunk_size: usize,
    /// How long a completed task stays visible before it is dropped. `None` keeps it until
    /// the caller clears it.
    pub completed_grace: Option<Duration>,
    pub max_file_size: u64,
}

impl Default for UploadQueueConfig {
    fn default() -> Self {
        Self {
            progress_tick: Duration::from_millis(100),
            chunk_size: 16 * 1024,
            completed_grace: Some(Duration::from_secs(2)),
            max_file_size: 10 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    Added {
        task_id: UploadTaskId,
        file_name: String,
    },
    Progress {
        task_id: UploadTaskId,
        progress: u8,
    },
    StatusChanged {
        task_id: UploadTaskId,
        status: UploadStatus,
    },
    Completed {
        task_id: UploadTaskId,
        document_id: DocumentId,
    },
    Failed {
        task_id: UploadTaskId,
        failure: UploadFailure,
    },
    Removed {
        task_id: UploadTaskId,
    },
}

/// Where a task ended up, as seen by a waiter.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadOutcome {
    Complete(DocumentId),
    Failed(UploadFailure),
    Removed,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
}

impl UploadError {
    pub fn kind(&self) -> FailureKind {
        match self {
            UploadError::Ingestion(e) => e.kind(),
            UploadError::Sync(e) => e.kind(),
            UploadError::FileTooLarge { .. } => FailureKind::FileTooLarge,
        }
    }

    fn into_failure(self) -> UploadFailure {
        UploadFailure {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("upload queue is not running")]
pub struct QueueClosed;

enum QueueCommand {
    Enqueue {
        files: Vec<UploadFile>,
        tone: Tone,
        reply: oneshot::Sender<Vec<UploadTaskId>>,
    },
    Remove {
        task_id: UploadTaskId,
        reply: oneshot::Sender<bool>,
    },
    ClearCompleted {
        reply: oneshot::Sender<usize>,
    },
    Snapshot {
        reply: oneshot::Sender<Vec<UploadTask>>,
    },
    Get {
        task_id: UploadTaskId,
        reply: oneshot::Sender<Option<UploadTask>>,
    },
    Outcome {
        task_id: UploadTaskId,
        reply: oneshot::Sender<Option<UploadOutcome>>,
    },
}

/// Messages from per-file workers to the aggregator.
enum TaskUpdate {
    Progress(UploadTaskId, u8),
    Status(UploadTaskId, UploadStatus),
    Completed(UploadTaskId, DocumentId),
    Failed(UploadTaskId, UploadFailure),
    Expired(UploadTaskId),
}

struct TrackedTask {
    task: UploadTask,
    worker: Option<JoinHandle<()>>,
}

/// Handle to the upload queue actor. Cheap to clone; the actor stops once every handle
/// is dropped.
#[derive(Clone)]
pub struct UploadQueue {
    commands: mpsc::Sender<QueueCommand>,
    events: broadcast::Sender<UploadEvent>,
}

impl UploadQueue {
    /// Starts the aggregator on the current tokio runtime.
    pub fn spawn(
        ingestor: Arc<FileIngestor>,
        sync: Arc<SyncManager>,
        config: UploadQueueConfig,
    ) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let actor = UploadQueueActor {
            commands: commands_rx,
            updates: updates_rx,
            updates_tx,
            tasks: HashMap::new(),
            settled: HashMap::new(),
            order: Vec::new(),
            ingestor,
            sync,
            config,
            events: events.clone(),
        };
        tokio::spawn(actor.run());

        Self {
            commands: commands_tx,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UploadEvent> {
        self.events.subscribe()
    }

    /// Admits the whole batch at once; every file is `queued` before any of them moves on.
    pub async fn enqueue(&self, files: Vec<UploadFile>) -> Result<Vec<UploadTaskId>, QueueClosed> {
        self.enqueue_with_tone(files, Tone::default()).await
    }

    pub async fn enqueue_with_tone(
        &self,
        files: Vec<UploadFile>,
        tone: Tone,
    ) -> Result<Vec<UploadTaskId>, QueueClosed> {
        self.request(|reply| QueueCommand::Enqueue { files, tone, reply })
            .await
    }

    /// Drops a task. Removing an unfinished task cancels it: no further events are
    /// published for it, although an extraction already in flight may still run to the end.
    pub async fn remove(&self, task_id: UploadTaskId) -> Result<bool, QueueClosed> {
        self.request(|reply| QueueCommand::Remove { task_id, reply })
            .await
    }

    pub async fn clear_completed(&self) -> Result<usize, QueueClosed> {
        self.request(|reply| QueueCommand::ClearCompleted { reply })
            .await
    }

    /// Tasks in admission order.
    pub async fn snapshot(&self) -> Result<Vec<UploadTask>, QueueClosed> {
        self.request(|reply| QueueCommand::Snapshot { reply }).await
    }

    pub async fn get(&self, task_id: UploadTaskId) -> Result<Option<UploadTask>, QueueClosed> {
        self.request(|reply| QueueCommand::Get { task_id, reply })
            .await
    }

    /// Resolves once the task settles. The outcome outlives the task record, so a completed
    /// upload cleared by the grace period still reports `Complete`.
    pub async fn wait_for_outcome(&self, task_id: UploadTaskId) -> Result<UploadOutcome, QueueClosed> {
        let mut events = self.subscribe();

        loop {
            if let Some(outcome) = self
                .request(|reply| QueueCommand::Outcome { task_id, reply })
                .await?
            {
                return Ok(outcome);
            }

            loop {
                match events.recv().await {
                    Ok(UploadEvent::Completed { task_id: id, document_id }) if id == task_id => {
                        return Ok(UploadOutcome::Complete(document_id));
                    }
                    Ok(UploadEvent::Failed { task_id: id, failure }) if id == task_id => {
                        return Ok(UploadOutcome::Failed(failure));
                    }
                    // Expiry and cancellation both publish this; the settled outcome decides.
                    Ok(UploadEvent::Removed { task_id: id }) if id == task_id => break,
                    Ok(_) => continue,
                    // Missed events; re-read the outcome.
                    Err(broadcast::error::RecvError::Lagged(_)) => break,
                    Err(broadcast::error::RecvError::Closed) => return Err(QueueClosed),
                }
            }
        }
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> QueueCommand,
    ) -> Result<T, QueueClosed> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| QueueClosed)?;
        rx.await.map_err(|_| QueueClosed)
    }
}

/// Owns every `UploadTask`. Workers never touch task state directly; they send
/// `TaskUpdate`s which are applied here one at a time.
struct UploadQueueActor {
    commands: mpsc::Receiver<QueueCommand>,
    updates: mpsc::UnboundedReceiver<TaskUpdate>,
    updates_tx: mpsc::UnboundedSender<TaskUpdate>,
    tasks: HashMap<UploadTaskId, TrackedTask>,
    /// Final outcome of every task that finished or was cancelled, kept after the task
    /// record itself is cleared.
    settled: HashMap<UploadTaskId, UploadOutcome>,
    order: Vec<UploadTaskId>,
    ingestor: Arc<FileIngestor>,
    sync: Arc<SyncManager>,
    config: UploadQueueConfig,
    events: broadcast::Sender<UploadEvent>,
}

impl UploadQueueActor {
    async fn run(mut self) {
        tracing::info!("Upload queue started");

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(update) = self.updates.recv() => self.handle_update(update),
            }
        }

        for tracked in self.tasks.values() {
            if let Some(worker) = &tracked.worker {
                worker.abort();
            }
        }
        tracing::info!("Upload queue stopped: all handles dropped");
    }

    fn handle_command(&mut self, command: QueueCommand) {
        match command {
            QueueCommand::Enqueue { files, tone, reply } => {
                let ids = self.admit(files, tone);
                let _ = reply.send(ids);
            }
            QueueCommand::Remove { task_id, reply } => {
                let _ = reply.send(self.remove(task_id));
            }
            QueueCommand::ClearCompleted { reply } => {
                let completed: Vec<UploadTaskId> = self
                    .order
                    .iter()
                    .copied()
                    .filter(|id| {
                        self.tasks
                            .get(id)
                            .is_some_and(|t| t.task.status == UploadStatus::Complete)
                    })
                    .collect();
                for id in &completed {
                    self.remove(*id);
                }
                let _ = reply.send(completed.len());
            }
            QueueCommand::Snapshot { reply } => {
                let tasks = self
                    .order
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .map(|t| t.task.clone())
                    .collect();
                let _ = reply.send(tasks);
            }
            QueueCommand::Get { task_id, reply } => {
                let _ = reply.send(self.tasks.get(&task_id).map(|t| t.task.clone()));
            }
            QueueCommand::Outcome { task_id, reply } => {
                let _ = reply.send(self.outcome(task_id));
            }
        }
    }

    fn admit(&mut self, files: Vec<UploadFile>, tone: Tone) -> Vec<UploadTaskId> {
        let tasks: Vec<UploadTask> = files.into_iter().map(UploadTask::new).collect();
        let ids: Vec<UploadTaskId> = tasks.iter().map(|t| t.id).collect();

        for task in &tasks {
            self.order.push(task.id);
            self.publish(UploadEvent::Added {
                task_id: task.id,
                file_name: task.file.name.clone(),
            });
        }
        tracing::info!(count = tasks.len(), "Upload batch queued");

        for task in tasks {
            let worker = tokio::spawn(run_upload(
                task.id,
                task.file.clone(),
                tone,
                Arc::clone(&self.ingestor),
                Arc::clone(&self.sync),
                self.config.clone(),
                self.updates_tx.clone(),
            ));
            self.tasks.insert(
                task.id,
                TrackedTask {
                    task,
                    worker: Some(worker),
                },
            );
        }

        ids
    }

    /// `None` while the task is still running. Ids the queue never saw count as removed.
    fn outcome(&self, task_id: UploadTaskId) -> Option<UploadOutcome> {
        if let Some(outcome) = self.settled.get(&task_id) {
            return Some(outcome.clone());
        }
        if self.tasks.contains_key(&task_id) {
            None
        } else {
            Some(UploadOutcome::Removed)
        }
    }

    fn remove(&mut self, task_id: UploadTaskId) -> bool {
        let Some(tracked) = self.tasks.remove(&task_id) else {
            return false;
        };
        if !tracked.task.status.is_terminal() {
            if let Some(worker) = &tracked.worker {
                worker.abort();
            }
            tracing::info!(task_id = %task_id, status = %tracked.task.status, "Upload cancelled");
            self.settled.insert(task_id, UploadOutcome::Removed);
        }
        self.order.retain(|id| *id != task_id);
        self.publish(UploadEvent::Removed { task_id });
        true
    }

    fn handle_update(&mut self, update: TaskUpdate) {
        let task_id = match &update {
            TaskUpdate::Progress(id, _)
            | TaskUpdate::Status(id, _)
            | TaskUpdate::Completed(id, _)
            | TaskUpdate::Failed(id, _)
            | TaskUpdate::Expired(id) => *id,
        };

        // Updates for removed tasks are dropped.
        let Some(tracked) = self.tasks.get_mut(&task_id) else {
            return;
        };
        let task = &mut tracked.task;

        match update {
            TaskUpdate::Progress(_, progress) => {
                if task.advance_progress(progress) {
                    let progress = task.progress;
                    self.publish(UploadEvent::Progress { task_id, progress });
                }
            }
            TaskUpdate::Status(_, status) => match task.transition(status) {
                Ok(()) => {
                    tracing::debug!(task_id = %task_id, status = %status, "Upload status transition");
                    self.publish(UploadEvent::StatusChanged { task_id, status });
                }
                Err(e) => tracing::warn!(task_id = %task_id, error = %e, "Ignoring status update"),
            },
            TaskUpdate::Completed(_, document_id) => match task.complete(document_id) {
                Ok(()) => {
                    tracked.worker = None;
                    tracing::info!(task_id = %task_id, document_id = %document_id, "Upload complete");
                    self.settled
                        .insert(task_id, UploadOutcome::Complete(document_id));
                    self.publish(UploadEvent::Completed {
                        task_id,
                        document_id,
                    });
                    self.schedule_expiry(task_id);
                }
                Err(e) => tracing::warn!(task_id = %task_id, error = %e, "Ignoring completion"),
            },
            TaskUpdate::Failed(_, failure) => match task.fail(failure.clone()) {
                Ok(()) => {
                    tracked.worker = None;
                    tracing::warn!(
                        task_id = %task_id,
                        kind = %failure.kind,
                        error = %failure.message,
                        "Upload failed"
                    );
                    self.settled
                        .insert(task_id, UploadOutcome::Failed(failure.clone()));
                    self.publish(UploadEvent::Failed { task_id, failure });
                }
                Err(e) => tracing::warn!(task_id = %task_id, error = %e, "Ignoring failure"),
            },
            TaskUpdate::Expired(_) => {
                if task.status == UploadStatus::Complete {
                    self.remove(task_id);
                }
            }
        }
    }

    fn schedule_expiry(&self, task_id: UploadTaskId) {
        let Some(grace) = self.config.completed_grace else {
            return;
        };
        let updates = self.updates_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            let _ = updates.send(TaskUpdate::Expired(task_id));
        });
    }

    fn publish(&self, event: UploadEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

async fn run_upload(
    task_id: UploadTaskId,
    file: UploadFile,
    tone: Tone,
    ingestor: Arc<FileIngestor>,
    sync: Arc<SyncManager>,
    config: UploadQueueConfig,
    updates: mpsc::UnboundedSender<TaskUpdate>,
) {
    let span = tracing::info_span!("upload", task_id = %task_id, filename = %file.name);
    let outcome = process_upload(task_id, file, tone, &ingestor, &sync, &config, &updates)
        .instrument(span)
        .await;

    let update = match outcome {
        Ok(document_id) => TaskUpdate::Completed(task_id, document_id),
        Err(e) => TaskUpdate::Failed(task_id, e.into_failure()),
    };
    let _ = updates.send(update);
}

async fn process_upload(
    task_id: UploadTaskId,
    file: UploadFile,
    tone: Tone,
    ingestor: &FileIngestor,
    sync: &SyncManager,
    config: &UploadQueueConfig,
    updates: &mpsc::UnboundedSender<TaskUpdate>,
) -> Result<DocumentId, UploadError> {
    let size = file.size_bytes();
    if size > config.max_file_size {
        return Err(UploadError::FileTooLarge {
            size,
            limit: config.max_file_size,
        });
    }

    let _ = updates.send(TaskUpdate::Status(task_id, UploadStatus::Uploading));
    let received = transfer(task_id, &file.content, config, updates).await;

    let _ = updates.send(TaskUpdate::Status(task_id, UploadStatus::Processing));
    let uploaded = UploadFile {
        content: received,
        ..file
    };
    let text = ingestor.ingest(&uploaded).await?;

    let draft = NewDocument::new(uploaded.name.clone(), text, tone, uploaded.media_type.clone())
        .with_size(size);
    let document = sync.create_active(draft).await?;
    Ok(document.id)
}

/// Moves the payload chunk by chunk, reporting the share of bytes received so far.
async fn transfer(
    task_id: UploadTaskId,
    content: &Bytes,
    config: &UploadQueueConfig,
    updates: &mpsc::UnboundedSender<TaskUpdate>,
) -> Bytes {
    let total = content.len();
    let mut received = BytesMut::with_capacity(total);
    let mut chunks = chunk_stream(content.clone(), config.chunk_size.max(1));

    while let Some(chunk) = chunks.next().await {
        received.extend_from_slice(&chunk);
        let progress = (received.len() * 100 / total) as u8;
        let _ = updates.send(TaskUpdate::Progress(task_id, progress));
        if !config.progress_tick.is_zero() {
            tokio::time::sleep(config.progress_tick).await;
        }
    }

    if total == 0 {
        let _ = updates.send(TaskUpdate::Progress(task_id, 100));
    }
    received.freeze()
}

fn chunk_stream(content: Bytes, chunk_size: usize) -> BoxStream<'static, Bytes> {
    stream::unfold(content, move |mut rest| async move {
        if rest.is_empty() {
            return None;
        }
        let chunk = rest.split_to(chunk_size.min(rest.len()));
        Some((chunk, rest))
    })
    .boxed()
}
