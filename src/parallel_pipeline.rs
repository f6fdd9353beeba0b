// THEORY:
// The `ParallelPipeline` runs independent frames concurrently. Within a frame the
// blob scan is strictly sequential (each expansion consults the boxes found before
// it), so parallelism only ever happens at frame granularity: frame N+1 can be
// scanned while the results of frame N are being consumed.
//
// Key architectural principles:
// 1.  **Dispatcher + Workers**: A dispatcher task hands incoming `FrameTask`s to a
//     fixed set of worker tasks round-robin. Each worker runs one scan at a time on
//     the blocking thread pool, so at most `worker_count` frames are analyzed at
//     once and the async runtime is never stalled by pixel loops.
// 2.  **Owned Frames**: A task owns its `Image`. Nothing can mutate a frame while it
//     is being scanned.
// 3.  **All or Nothing**: A frame either yields its complete `FrameAnalysis` or an
//     error. When a caller's deadline passes, the frame is dropped; its late result
//     is discarded by the worker and never surfaces partially.

use crate::core_modules::pixel_buffer::Image;
use crate::error::{BlobError, Result};
use crate::pipeline::{FrameAnalysis, VisionPipeline};
use futures::future::try_join_all;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub struct FrameTask {
    pub frame_id: u64,
    pub image: Image,
    pub result_sender: oneshot::Sender<Result<FrameAnalysis>>,
}

pub struct WorkerPool {
    task_sender: mpsc::UnboundedSender<FrameTask>,
    dispatcher: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawns the dispatcher and `worker_count` workers. Must be called from within a
    /// tokio runtime.
    pub fn new(pipeline: Arc<VisionPipeline>, worker_count: usize) -> Result<Self> {
        if worker_count == 0 {
            return Err(BlobError::InvalidConfiguration(
                "worker_count must be at least 1".to_string(),
            ));
        }

        let (task_sender, mut task_receiver) = mpsc::unbounded_channel::<FrameTask>();
        let (worker_senders, worker_receivers): (Vec<_>, Vec<_>) = (0..worker_count)
            .map(|_| mpsc::unbounded_channel::<FrameTask>())
            .unzip();

        let dispatcher = tokio::spawn(async move {
            let mut worker_idx = 0;
            while let Some(task) = task_receiver.recv().await {
                if let Err(mpsc::error::SendError(task)) = worker_senders[worker_idx].send(task) {
                    let _ = task.result_sender.send(Err(BlobError::WorkerUnavailable(format!(
                        "worker {worker_idx} has stopped"
                    ))));
                }
                worker_idx = (worker_idx + 1) % worker_senders.len();
            }
        });

        let workers = worker_receivers
            .into_iter()
            .enumerate()
            .map(|(worker_id, mut worker_receiver)| {
                let pipeline = Arc::clone(&pipeline);
                tokio::spawn(async move {
                    while let Some(task) = worker_receiver.recv().await {
                        let analysis = Self::process_frame_worker(Arc::clone(&pipeline), task.frame_id, task.image).await;
                        if task.result_sender.send(analysis).is_err() {
                            debug!(worker_id, frame_id = task.frame_id, "frame result discarded");
                        }
                    }
                })
            })
            .collect();

        Ok(Self {
            task_sender,
            dispatcher,
            workers,
        })
    }

    async fn process_frame_worker(pipeline: Arc<VisionPipeline>, frame_id: u64, image: Image) -> Result<FrameAnalysis> {
        tokio::task::spawn_blocking(move || pipeline.analyze(frame_id, &image))
            .await
            .map_err(|e| BlobError::WorkerUnavailable(e.to_string()))?
    }

    pub async fn process_frame(&self, frame_id: u64, image: Image) -> Result<FrameAnalysis> {
        let (result_sender, result_receiver) = oneshot::channel();

        let task = FrameTask {
            frame_id,
            image,
            result_sender,
        };

        self.task_sender
            .send(task)
            .map_err(|_| BlobError::WorkerUnavailable("failed to send task to worker pool".to_string()))?;

        result_receiver
            .await
            .map_err(|_| BlobError::WorkerUnavailable("failed to receive result from worker".to_string()))?
    }

    /// Stops accepting frames and waits for in-flight work to finish.
    pub async fn shutdown(self) {
        drop(self.task_sender);
        let _ = self.dispatcher.await;
        for worker in self.workers {
            let _ = worker.await;
        }
    }
}

pub struct ParallelPipeline {
    worker_pool: WorkerPool,
    frame_counter: AtomicU64,
}

impl ParallelPipeline {
    /// Wraps a configured `VisionPipeline`. Worker count comes from its config.
    pub fn new(pipeline: VisionPipeline) -> Result<Self> {
        let worker_count = pipeline.config().worker_count;
        let worker_pool = WorkerPool::new(Arc::new(pipeline), worker_count)?;
        Ok(Self {
            worker_pool,
            frame_counter: AtomicU64::new(0),
        })
    }

    pub async fn process_frame(&self, image: Image) -> Result<FrameAnalysis> {
        let frame_id = self.frame_counter.fetch_add(1, Ordering::Relaxed);
        self.worker_pool.process_frame(frame_id, image).await
    }

    /// Analyzes a batch concurrently. Results come back in submission order; the
    /// first failing frame fails the batch.
    pub async fn process_batch(&self, images: Vec<Image>) -> Result<Vec<FrameAnalysis>> {
        try_join_all(images.into_iter().map(|image| self.process_frame(image))).await
    }

    /// Like `process_frame`, but drops the frame if it is not done within `deadline`.
    pub async fn process_frame_with_deadline(&self, image: Image, deadline: Duration) -> Result<FrameAnalysis> {
        match tokio::time::timeout(deadline, self.process_frame(image)).await {
            Ok(analysis) => analysis,
            Err(_) => {
                warn!(deadline_ms = deadline.as_millis() as u64, "frame dropped after exceeding its deadline");
                Err(BlobError::DeadlineExceeded)
            }
        }
    }

    pub fn frames_submitted(&self) -> u64 {
        self.frame_counter.load(Ordering::Relaxed)
    }

    pub async fn shutdown(self) {
        self.worker_pool.shutdown().await;
    }
}
