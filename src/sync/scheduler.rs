//! Sequential task queue and pacing for outbound requests
//!
//! This module handles:
//! - The queue of URLs awaiting metadata resolution, in discovery order
//! - A fixed pause between consecutive network-bound tasks
//!
//! There is exactly one worker: tasks are taken one at a time and each
//! completes before the next starts.

use std::collections::VecDeque;
use std::time::Duration;

/// Fixed inter-task delay used as a crude rate-limit guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    delay: Duration,
}

impl Pacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// A pacer that never waits
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Suspends the caller for the configured delay
    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tracing::trace!("Pausing {:?}", self.delay);
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// A URL queued for metadata resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveTask {
    pub url: String,

    /// 1-based position within the run, for progress reporting
    pub position: usize,
}

/// FIFO queue of resolution tasks
#[derive(Debug, Default)]
pub struct ResolveQueue {
    tasks: VecDeque<ResolveTask>,
    total: usize,
}

impl ResolveQueue {
    /// Builds a queue preserving the order of `urls`
    pub fn new<I>(urls: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let tasks: VecDeque<ResolveTask> = urls
            .into_iter()
            .enumerate()
            .map(|(i, url)| ResolveTask {
                url,
                position: i + 1,
            })
            .collect();
        let total = tasks.len();

        Self { tasks, total }
    }

    /// Takes the next task
    pub fn next_task(&mut self) -> Option<ResolveTask> {
        self.tasks.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks the queue was built with
    pub fn total(&self) -> usize {
        self.total
    }
}
