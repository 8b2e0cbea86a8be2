// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Thread-keyed session registry
//!
//! A keyed map from thread id to session handle. Entries are created lazily
//! on first acquire and removed only by an explicit release. No two threads
//! ever touch the same entry, so the concurrent map is the only guard.
//!
//! Callers drive each test on a dedicated thread or a current-thread
//! runtime; a task that migrates across executor threads would observe a
//! different key.

use std::future::Future;
use std::thread::ThreadId;

use dashmap::DashMap;
use tracing::info;

use crate::error::Result;

/// Registry of per-thread session handles
#[derive(Debug)]
pub struct SessionRegistry<S: Clone> {
    sessions: DashMap<ThreadId, S>,
}

impl<S: Clone> SessionRegistry<S> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    fn current_key() -> ThreadId {
        std::thread::current().id()
    }

    /// Handle registered for the current thread, if any
    pub fn get(&self) -> Option<S> {
        self.sessions.get(&Self::current_key()).map(|s| s.clone())
    }

    /// Return the current thread's handle, creating it on first use.
    ///
    /// Repeated calls on the same thread return the same handle until the
    /// entry is released.
    pub async fn acquire_with<F, Fut>(&self, create: F) -> Result<S>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<S>>,
    {
        let key = Self::current_key();
        if let Some(existing) = self.sessions.get(&key) {
            return Ok(existing.clone());
        }

        let session = create().await?;
        info!("Created new session for thread: {:?}", key);
        self.sessions.insert(key, session.clone());
        Ok(session)
    }

    /// Remove and return the current thread's handle
    pub fn release(&self) -> Option<S> {
        self.sessions
            .remove(&Self::current_key())
            .map(|(_, session)| session)
    }

    /// Remove and return every registered handle
    pub fn drain(&self) -> Vec<S> {
        let keys: Vec<ThreadId> = self.sessions.iter().map(|e| *e.key()).collect();
        keys.into_iter()
            .filter_map(|k| self.sessions.remove(&k).map(|(_, s)| s))
            .collect()
    }

    /// Whether the current thread holds a handle
    pub fn contains_current(&self) -> bool {
        self.sessions.contains_key(&Self::current_key())
    }

    /// Number of registered handles
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl<S: Clone> Default for SessionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_repeated_acquire_returns_same_handle() {
        let registry = SessionRegistry::<u32>::new();
        let created = AtomicU32::new(0);

        let first = registry
            .acquire_with(|| async {
                created.fetch_add(1, Ordering::SeqCst);
                Ok(41)
            })
            .await
            .unwrap();
        let second = registry
            .acquire_with(|| async {
                created.fetch_add(1, Ordering::SeqCst);
                Ok(99)
            })
            .await
            .unwrap();

        assert_eq!(first, 41);
        assert_eq!(second, 41);
        assert_eq!(created.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_release_removes_entry_and_next_acquire_is_fresh() {
        let registry = SessionRegistry::<u32>::new();

        let first = registry.acquire_with(|| async { Ok(1) }).await.unwrap();
        assert_eq!(first, 1);
        assert!(registry.contains_current());

        let released = registry.release();
        assert_eq!(released, Some(1));
        assert!(!registry.contains_current());

        let second = registry.acquire_with(|| async { Ok(2) }).await.unwrap();
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_release_without_entry_is_none() {
        let registry = SessionRegistry::<u32>::new();
        assert_eq!(registry.release(), None);
    }

    #[test]
    fn test_entries_are_per_thread() {
        let registry = Arc::new(SessionRegistry::<u32>::new());

        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    let rt = tokio::runtime::Builder::new_current_thread()
                        .build()
                        .unwrap();
                    rt.block_on(async {
                        let v = registry.acquire_with(|| async { Ok(i) }).await.unwrap();
                        assert_eq!(v, i);
                    });
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(registry.len(), 4);
        let drained = registry.drain();
        assert_eq!(drained.len(), 4);
        assert!(registry.is_empty());
    }

    #[tokio::test]
    async fn test_failed_create_leaves_no_entry() {
        let registry = SessionRegistry::<u32>::new();
        let result = registry
            .acquire_with(|| async { Err(crate::error::Error::session("boom")) })
            .await;
        assert!(result.is_err());
        assert!(registry.is_empty());
    }
}
