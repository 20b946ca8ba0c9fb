// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded fan-out over independent futures.

use futures::stream::{FuturesUnordered, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default number of in-flight get-method calls in a multicall.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Drive `tasks` with at most `limit` of them running at once and return every
/// output in input order. A `limit` of zero is treated as one.
pub async fn run_ordered<F, O>(limit: usize, tasks: impl IntoIterator<Item = F>) -> Vec<O>
where
    F: Future<Output = O>,
{
    let permits = Arc::new(Semaphore::new(limit.max(1)));
    let mut pending: FuturesUnordered<_> = tasks
        .into_iter()
        .enumerate()
        .map(|(position, task)| {
            let permits = permits.clone();
            async move {
                // Never closed, acquiring only waits.
                let _permit = permits.acquire().await;
                (position, task.await)
            }
        })
        .collect();

    let mut slots: Vec<Option<O>> = std::iter::repeat_with(|| None).take(pending.len()).collect();
    while let Some((position, output)) = pending.next().await {
        slots[position] = Some(output);
    }
    slots.into_iter().flatten().collect()
}
