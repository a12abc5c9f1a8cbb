//! Process-wide dispatch mode and the async worker pool
//!
//! The engine starts in synchronous mode. `set_async_mode` installs a shared
//! worker pool with a bounded queue; every logger constructed afterwards
//! captures that pool and enqueues instead of writing on the calling thread.
//! The switch is never retroactive: loggers keep the dispatch they were
//! built under, and a replaced pool drains and joins once the last logger
//! holding it goes away.

use super::{
    error::{self, LoggerError},
    metrics::QueueMetrics,
    overflow::OverflowPolicy,
    queue::BoundedQueue,
    record::LogRecord,
    sink::Sink,
};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread;

/// Work items consumed by the pool.
pub(crate) enum Task {
    Record {
        record: LogRecord,
        sinks: Vec<Arc<dyn Sink>>,
        flush_after: bool,
    },
    Flush {
        logger_name: Arc<str>,
        sinks: Vec<Arc<dyn Sink>>,
        done: crossbeam_channel::Sender<()>,
    },
}

/// Shared worker pool: a bounded FIFO queue plus one (or a small fixed
/// number of) consumer thread(s) performing the per-sink writes.
pub struct ThreadPool {
    queue: Arc<BoundedQueue<Task>>,
    metrics: Arc<QueueMetrics>,
    workers: Mutex<Vec<thread::JoinHandle<()>>>,
}

impl ThreadPool {
    pub(crate) fn new(queue_size: usize, threads: usize) -> Self {
        let queue = Arc::new(BoundedQueue::new(queue_size.max(1)));
        let metrics = Arc::new(QueueMetrics::new());

        let workers = (0..threads.max(1))
            .map(|_| {
                let queue = Arc::clone(&queue);
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || worker_loop(&queue, &metrics))
            })
            .collect();

        Self {
            queue,
            metrics,
            workers: Mutex::new(workers),
        }
    }

    pub fn metrics(&self) -> &Arc<QueueMetrics> {
        &self.metrics
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }

    /// Enqueue a record task under the given overflow policy.
    pub(crate) fn post(&self, task: Task, policy: OverflowPolicy) {
        match policy {
            OverflowPolicy::Block => match self.queue.try_push(task) {
                Ok(()) => self.metrics.record_enqueued(),
                Err(task) => {
                    self.metrics.record_queue_full();
                    self.metrics.record_block();
                    if self.queue.push_blocking(task) {
                        self.metrics.record_enqueued();
                    }
                }
            },
            OverflowPolicy::DropNewest => match self.queue.try_push(task) {
                Ok(()) => self.metrics.record_enqueued(),
                Err(_) => {
                    self.metrics.record_queue_full();
                    self.metrics.record_dropped();
                }
            },
            OverflowPolicy::DropOldest => match self.queue.push_evict_oldest(task) {
                Ok(None) => self.metrics.record_enqueued(),
                Ok(Some(_evicted)) => {
                    self.metrics.record_queue_full();
                    self.metrics.record_dropped();
                    self.metrics.record_enqueued();
                }
                Err(_) => {
                    // Queue already closed; the pool is shutting down.
                }
            },
        }
    }

    /// Enqueue a flush token behind everything already queued and wait until
    /// the worker has processed it. Flush tokens are never dropped; they use
    /// the blocking push regardless of the overflow policy.
    pub(crate) fn flush_and_wait(&self, logger_name: Arc<str>, sinks: Vec<Arc<dyn Sink>>) {
        let (done, wait) = crossbeam_channel::bounded(1);
        let posted = self.queue.push_blocking(Task::Flush {
            logger_name: Arc::clone(&logger_name),
            sinks: sinks.clone(),
            done,
        });

        if posted {
            // No timeout: drain-before-flush waits until the queue position
            // at call time has been fully consumed.
            let _ = wait.recv();
        } else {
            // Pool already closed; flush inline.
            flush_sinks(&logger_name, &sinks);
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        // Closing the queue rejects producers but leaves queued items for
        // the workers, which drain fully before exiting.
        self.queue.close();
        for handle in self.workers.lock().drain(..) {
            if handle.join().is_err() {
                eprintln!("[fanlog error] async worker panicked during shutdown");
            }
        }
    }
}

fn worker_loop(queue: &BoundedQueue<Task>, metrics: &QueueMetrics) {
    while let Some(task) = queue.pop() {
        match task {
            Task::Record {
                record,
                sinks,
                flush_after,
            } => {
                deliver(&record, &sinks, flush_after);
                metrics.record_delivered();
            }
            Task::Flush {
                logger_name,
                sinks,
                done,
            } => {
                flush_sinks(&logger_name, &sinks);
                let _ = done.send(());
            }
        }
    }
}

/// Fan one record out to its sinks, with per-sink failure isolation: one
/// failing or panicking sink never stops delivery to the others, and no
/// error escapes into caller control flow.
pub(crate) fn deliver(record: &LogRecord, sinks: &[Arc<dyn Sink>], flush_after: bool) {
    for sink in sinks {
        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.log(record)));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) => error::report(&record.logger_name, &e),
            Err(_) => error::report(
                &record.logger_name,
                &LoggerError::writer(format!("sink '{}' panicked", sink.name())),
            ),
        }
    }

    if flush_after {
        flush_sinks(&record.logger_name, sinks);
    }
}

pub(crate) fn flush_sinks(logger_name: &str, sinks: &[Arc<dyn Sink>]) {
    for sink in sinks {
        if let Err(e) = sink.flush() {
            error::report(logger_name, &e);
        }
    }
}

/// Dispatch path captured by a logger at construction time.
#[derive(Clone)]
pub enum DispatchMode {
    Sync,
    Async {
        pool: Arc<ThreadPool>,
        policy: OverflowPolicy,
    },
}

impl DispatchMode {
    pub fn is_async(&self) -> bool {
        matches!(self, DispatchMode::Async { .. })
    }
}

static GLOBAL_MODE: RwLock<DispatchMode> = RwLock::new(DispatchMode::Sync);

/// Switch the process to synchronous dispatch. Affects only loggers created
/// after the call; existing async loggers keep their pool, which drains and
/// joins when the last of them is dropped.
pub fn set_sync_mode() {
    *GLOBAL_MODE.write() = DispatchMode::Sync;
}

/// Switch the process to asynchronous dispatch with one worker thread and
/// the blocking overflow policy.
pub fn set_async_mode(queue_size: usize) {
    set_async_mode_with(queue_size, 1, OverflowPolicy::Block);
}

/// Switch the process to asynchronous dispatch with an explicit worker
/// count and overflow policy. The policy is fixed for the lifetime of the
/// installed pool.
pub fn set_async_mode_with(queue_size: usize, threads: usize, policy: OverflowPolicy) {
    let pool = Arc::new(ThreadPool::new(queue_size, threads));
    *GLOBAL_MODE.write() = DispatchMode::Async { pool, policy };
}

/// Snapshot of the current process-wide mode, captured by `Logger::new`.
pub(crate) fn current_mode() -> DispatchMode {
    GLOBAL_MODE.read().clone()
}

/// Metrics of the currently installed async pool, if the process is in
/// async mode. Loggers holding an older pool expose its metrics through
/// their own handle.
pub fn async_metrics() -> Option<Arc<QueueMetrics>> {
    match &*GLOBAL_MODE.read() {
        DispatchMode::Sync => None,
        DispatchMode::Async { pool, .. } => Some(Arc::clone(pool.metrics())),
    }
}
