//! Bounded FIFO queue for async dispatch
//!
//! A mutex-plus-condvar queue rather than a channel: the DropOldest policy
//! needs producer-side eviction of the head, which channels do not expose.
//! Capacity is fixed at construction and never exceeded. After `close()`,
//! producers are rejected but the consumer drains every remaining item
//! before `pop` reports exhaustion.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    capacity: usize,
    /// Signaled when an item arrives or the queue closes
    not_empty: Condvar,
    /// Signaled when an item leaves
    not_full: Condvar,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            capacity,
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.inner.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().items.is_empty()
    }

    /// Block until there is room, then enqueue. Returns `false` if the
    /// queue closed while waiting (the item is discarded).
    pub fn push_blocking(&self, item: T) -> bool {
        let mut inner = self.inner.lock();
        while inner.items.len() >= self.capacity && !inner.closed {
            self.not_full.wait(&mut inner);
        }
        if inner.closed {
            return false;
        }
        inner.items.push_back(item);
        drop(inner);
        self.not_empty.notify_one();
        true
    }

    /// Enqueue if there is room. `Err` returns the item when full or closed.
    pub fn try_push(&self, item: T) -> std::result::Result<(), T> {
        let mut inner = self.inner.lock();
        if inner.closed || inner.items.len() >= self.capacity {
            return Err(item);
        }
        inner.items.push_back(item);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Enqueue, evicting the oldest queued item when full. Returns the
    /// evicted item, or `Err` with the new item if the queue is closed.
    pub fn push_evict_oldest(&self, item: T) -> std::result::Result<Option<T>, T> {
        let mut inner = self.inner.lock();
        if inner.closed {
            return Err(item);
        }
        let evicted = if inner.items.len() >= self.capacity {
            inner.items.pop_front()
        } else {
            None
        };
        inner.items.push_back(item);
        drop(inner);
        self.not_empty.notify_one();
        Ok(evicted)
    }

    /// Dequeue in FIFO order, blocking while the queue is empty and open.
    /// Returns `None` only once the queue is closed *and* drained.
    pub fn pop(&self) -> Option<T> {
        let mut inner = self.inner.lock();
        loop {
            if let Some(item) = inner.items.pop_front() {
                drop(inner);
                self.not_full.notify_one();
                return Some(item);
            }
            if inner.closed {
                return None;
            }
            self.not_empty.wait(&mut inner);
        }
    }

    /// Close the queue: reject future pushes, wake all waiters. Items
    /// already queued remain poppable.
    pub fn close(&self) {
        let mut inner = self.inner.lock();
        inner.closed = true;
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }
}
