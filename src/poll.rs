// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Fixed-interval polling bounded by a timeout.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

/// Terminal state of a polling loop
#[derive(Debug)]
pub enum PollOutcome<T, E> {
    /// An attempt succeeded
    Found {
        value: T,
        attempts: u32,
        elapsed: Duration,
    },
    /// Every attempt failed until the timeout passed
    TimedOut { attempts: u32, elapsed: Duration },
    /// An attempt failed with an error the caller marked as fatal
    Aborted { error: E, attempts: u32 },
}

impl<T, E> PollOutcome<T, E> {
    pub fn attempts(&self) -> u32 {
        match self {
            PollOutcome::Found { attempts, .. }
            | PollOutcome::TimedOut { attempts, .. }
            | PollOutcome::Aborted { attempts, .. } => *attempts,
        }
    }
}

/// Run `attempt` every `interval` until it succeeds, `is_fatal` accepts its
/// error, or `timeout` has elapsed.
///
/// The first attempt runs immediately. The last sleep is cut short so the
/// loop makes one final attempt right at the timeout boundary.
pub async fn poll_until<T, E, F, Fut, P>(
    interval: Duration,
    timeout: Duration,
    mut attempt: F,
    is_fatal: P,
) -> PollOutcome<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    // never spin
    let interval = interval.max(Duration::from_millis(1));
    let start = Instant::now();
    let mut attempts = 0;

    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => {
                return PollOutcome::Found {
                    value,
                    attempts,
                    elapsed: start.elapsed(),
                }
            }
            Err(error) if is_fatal(&error) => return PollOutcome::Aborted { error, attempts },
            Err(error) => debug!("Attempt {} failed: {}", attempts, error),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            return PollOutcome::TimedOut { attempts, elapsed };
        }

        sleep(interval.min(timeout - elapsed)).await;
    }
}
