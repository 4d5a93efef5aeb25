//! One-shot result delivery from a worker back to the submitter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::TaskResult;

/// Tri-state outcome of a background job as seen by a polling caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The job finished and produced its payload.
    Success,
    /// The job has not produced a result yet. A task discarded at pool
    /// shutdown, or queued on a zero-worker pool, stays in this state
    /// forever.
    NotReady,
    /// The job failed; no payload.
    Error,
}

struct Slot<T> {
    value: Mutex<Option<TaskResult<T>>>,
    ready: Condvar,
}

/// Producer half of a deferred result. Writes exactly one value.
pub(crate) struct ResultWriter<T> {
    slot: Arc<Slot<T>>,
}

impl<T> ResultWriter<T> {
    /// Stores the task's outcome and wakes any waiting reader.
    pub(crate) fn fulfill(self, value: TaskResult<T>) {
        {
            let mut slot = self.slot.value.lock();
            *slot = Some(value);
        }
        self.slot.ready.notify_all();
    }
}

/// Consumer half: the handle returned to the submitter.
///
/// Single-consumer and one-shot: the value can be taken at most once.
/// If the producing task is lost to pool shutdown the handle never
/// resolves; [`status`](Self::status) keeps reporting
/// [`Status::NotReady`], which is how callers tell a lost task apart
/// from a failed one.
pub struct DeferredResult<T> {
    slot: Arc<Slot<T>>,
}

/// Creates a connected writer/reader pair.
pub(crate) fn deferred_pair<T>() -> (ResultWriter<T>, DeferredResult<T>) {
    let slot = Arc::new(Slot {
        value: Mutex::new(None),
        ready: Condvar::new(),
    });
    (
        ResultWriter {
            slot: Arc::clone(&slot),
        },
        DeferredResult { slot },
    )
}

impl<T> DeferredResult<T> {
    /// Non-blocking status check. Does not consume the value.
    pub fn status(&self) -> Status {
        match &*self.slot.value.lock() {
            None => Status::NotReady,
            Some(Ok(_)) => Status::Success,
            Some(Err(_)) => Status::Error,
        }
    }

    /// Blocks until the task resolves and takes its outcome.
    ///
    /// Blocks forever if the task was discarded at pool shutdown; use
    /// [`status`](Self::status) or [`wait_timeout`](Self::wait_timeout)
    /// when that matters.
    pub fn wait(self) -> TaskResult<T> {
        let mut slot = self.slot.value.lock();
        loop {
            if let Some(value) = slot.take() {
                return value;
            }
            self.slot.ready.wait(&mut slot);
        }
    }

    /// Blocks up to `timeout` for the outcome.
    ///
    /// Hands the unconsumed handle back on timeout so the caller can
    /// keep polling. Timeouts are caller policy; the pool itself never
    /// imposes one.
    pub fn wait_timeout(self, timeout: Duration) -> Result<TaskResult<T>, Self> {
        let deadline = Instant::now() + timeout;
        {
            let mut slot = self.slot.value.lock();
            loop {
                if let Some(value) = slot.take() {
                    return Ok(value);
                }
                if self.slot.ready.wait_until(&mut slot, deadline).timed_out() {
                    break;
                }
            }
        }
        Err(self)
    }

    /// Takes the outcome if it is already available.
    pub fn try_take(self) -> Result<TaskResult<T>, Self> {
        {
            let mut slot = self.slot.value.lock();
            if let Some(value) = slot.take() {
                return Ok(value);
            }
        }
        Err(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use std::thread;

    #[test]
    fn test_fulfill_then_wait() {
        let (writer, result) = deferred_pair();
        writer.fulfill(Ok(7u32));
        assert_eq!(result.status(), Status::Success);
        assert_eq!(result.wait(), Ok(7));
    }

    #[test]
    fn test_status_tracks_outcome() {
        let (writer, result) = deferred_pair::<u32>();
        assert_eq!(result.status(), Status::NotReady);
        writer.fulfill(Err(TaskError::Panicked("boom".to_string())));
        assert_eq!(result.status(), Status::Error);
    }

    #[test]
    fn test_wait_blocks_until_fulfilled() {
        let (writer, result) = deferred_pair();
        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            writer.fulfill(Ok("done"));
        });
        assert_eq!(result.wait(), Ok("done"));
        producer.join().expect("producer thread panicked");
    }

    #[test]
    fn test_wait_timeout_hands_handle_back() {
        let (writer, result) = deferred_pair::<u32>();
        let result = match result.wait_timeout(Duration::from_millis(10)) {
            Ok(_) => panic!("resolved without a producer"),
            Err(handle) => handle,
        };
        assert_eq!(result.status(), Status::NotReady);
        writer.fulfill(Ok(3));
        match result.wait_timeout(Duration::from_secs(1)) {
            Ok(value) => assert_eq!(value, Ok(3)),
            Err(_) => panic!("value was written"),
        }
    }

    #[test]
    fn test_try_take_pending_and_ready() {
        let (writer, result) = deferred_pair();
        let result = match result.try_take() {
            Ok(_) => panic!("nothing was written yet"),
            Err(handle) => handle,
        };
        writer.fulfill(Ok(11i64));
        match result.try_take() {
            Ok(value) => assert_eq!(value, Ok(11)),
            Err(_) => panic!("value was written"),
        }
    }
}
