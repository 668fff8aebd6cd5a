//! Sequential product-code generator.
//!
//! The contract is a single atomic increment-with-upsert: two concurrent
//! product creations must never observe the same code, so the trait exposes
//! only `next_code` and implementations must not split it into a read
//! followed by a write.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::ServiceError;
use crate::models::counter::PRODUCT_CODE_COUNTER;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SequenceCounter: Send + Sync {
    /// Increments the named sequence and returns the new value. The first
    /// call on a fresh store returns 1. A failure here must abort whatever
    /// operation needed the code.
    async fn next_code(&self) -> Result<i64, ServiceError>;

    /// Current value of the sequence without incrementing (0 if the counter
    /// record does not exist yet).
    async fn current(&self) -> Result<i64, ServiceError>;
}

/// In-memory counter backed by one atomic per sequence name. `fetch_add`
/// gives the increment-and-return semantics the trait requires.
#[derive(Debug, Default)]
pub struct InMemorySequenceCounter {
    sequences: DashMap<String, Arc<AtomicI64>>,
}

impl InMemorySequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn sequence(&self, name: &str) -> Arc<AtomicI64> {
        self.sequences
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(AtomicI64::new(0)))
            .clone()
    }
}

#[async_trait]
impl SequenceCounter for InMemorySequenceCounter {
    async fn next_code(&self) -> Result<i64, ServiceError> {
        let seq = self.sequence(PRODUCT_CODE_COUNTER);
        Ok(seq.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn current(&self) -> Result<i64, ServiceError> {
        let seq = self.sequence(PRODUCT_CODE_COUNTER);
        Ok(seq.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn first_code_is_one_and_values_are_sequential() {
        let counter = InMemorySequenceCounter::new();
        assert_eq!(counter.current().await.unwrap(), 0);
        assert_eq!(counter.next_code().await.unwrap(), 1);
        assert_eq!(counter.next_code().await.unwrap(), 2);
        assert_eq!(counter.current().await.unwrap(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_codes_are_distinct_and_contiguous() {
        let counter = Arc::new(InMemorySequenceCounter::new());
        // Seed the sequence so the range does not start at 1.
        for _ in 0..5 {
            counter.next_code().await.unwrap();
        }
        let prior = counter.current().await.unwrap();

        let n = 64;
        let mut tasks = Vec::with_capacity(n);
        for _ in 0..n {
            let counter = counter.clone();
            tasks.push(tokio::spawn(async move {
                counter.next_code().await.unwrap()
            }));
        }

        let mut codes = HashSet::new();
        for task in tasks {
            codes.insert(task.await.unwrap());
        }

        assert_eq!(codes.len(), n);
        let expected: HashSet<i64> = (prior + 1..=prior + n as i64).collect();
        assert_eq!(codes, expected);
    }
}
