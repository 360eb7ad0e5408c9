//! Cooperative work queue.
//!
//! Work items run to completion one at a time, in submission order, from
//! whatever context calls [`WorkQueue::dispatch_next`]. An item is queued at
//! most once: submitting an item that is already waiting does nothing.
//!
//! Self-resubmission is expressed by the item's return value rather than by
//! the item calling back into the queue. A [`Work::run`] that returns
//! [`WorkOutcome::Resubmit`] is put back at the tail of the queue by the
//! dispatcher, so a perpetual item is a loop owned by the queue and never
//! grows the call stack.
//!
//! State of each registered item:
//!
//! ```text
//!  Idle --submit--> Queued --dispatch--> Running --Done--> Idle
//!                     ^                     |
//!                     +------Resubmit-------+
//! ```

use heapless::{Deque, Vec};

/// What a work item asks for once it has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkOutcome {
    /// Finished; stays idle until submitted again.
    Done,
    /// Put back on the queue immediately.
    Resubmit,
}

/// A unit of cooperatively scheduled work.
pub trait Work {
    /// Runs to completion. Must not block indefinitely.
    fn run(&mut self) -> WorkOutcome;
}

/// Scheduling state of a registered item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WorkState {
    Idle,
    Queued,
    Running,
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Submit {
    /// The item was added to the tail of the queue.
    Queued,
    /// The item was already waiting; nothing changed.
    AlreadyQueued,
}

/// Work queue errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QueueError {
    /// No free slot to register another item.
    CapacityFull,
    /// The handle does not belong to this queue.
    UnknownHandle,
}

impl core::fmt::Display for QueueError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            QueueError::CapacityFull => write!(f, "work queue capacity exceeded"),
            QueueError::UnknownHandle => write!(f, "unknown work handle"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for QueueError {}

/// Reference to an item registered with a [`WorkQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WorkHandle(usize);

struct Slot<'a> {
    work: &'a mut dyn Work,
    state: WorkState,
    dispatched: u32,
}

/// Fixed-capacity FIFO of work items.
///
/// # Type Parameters
/// * `'a` - Lifetime of the registered work items
/// * `N` - Maximum number of registered items
pub struct WorkQueue<'a, const N: usize> {
    slots: Vec<Slot<'a>, N>,
    ready: Deque<usize, N>,
}

impl<'a, const N: usize> WorkQueue<'a, N> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            ready: Deque::new(),
        }
    }

    /// Registers an item. It starts `Idle`.
    pub fn register(&mut self, work: &'a mut dyn Work) -> Result<WorkHandle, QueueError> {
        let index = self.slots.len();
        self.slots
            .push(Slot {
                work,
                state: WorkState::Idle,
                dispatched: 0,
            })
            .map_err(|_| QueueError::CapacityFull)?;
        Ok(WorkHandle(index))
    }

    /// Enqueues an item unless it is already waiting.
    pub fn submit(&mut self, handle: WorkHandle) -> Result<Submit, QueueError> {
        let state = self.slot(handle)?.state;
        if state == WorkState::Queued {
            trace!("workqueue: item {} already queued", handle.0);
            return Ok(Submit::AlreadyQueued);
        }
        self.enqueue(handle.0)?;
        Ok(Submit::Queued)
    }

    /// Runs the item at the head of the queue to completion.
    ///
    /// Returns the handle of the item that ran, or `None` if nothing was
    /// queued.
    pub fn dispatch_next(&mut self) -> Option<WorkHandle> {
        let index = self.ready.pop_front()?;
        let slot = &mut self.slots[index];

        slot.state = WorkState::Running;
        let outcome = slot.work.run();
        slot.dispatched = slot.dispatched.wrapping_add(1);
        slot.state = WorkState::Idle;

        if outcome == WorkOutcome::Resubmit {
            // Popping this item freed the entry it needs.
            if self.enqueue(index).is_err() {
                error!("workqueue: resubmit of item {} failed", index);
            }
        }
        Some(WorkHandle(index))
    }

    /// Dispatches until the queue is empty or `max_dispatches` items ran.
    ///
    /// Returns the number of items that ran.
    pub fn run(&mut self, max_dispatches: usize) -> usize {
        let mut ran = 0;
        while ran < max_dispatches && self.dispatch_next().is_some() {
            ran += 1;
        }
        ran
    }

    /// Current state of an item.
    pub fn state(&self, handle: WorkHandle) -> Result<WorkState, QueueError> {
        Ok(self.slot(handle)?.state)
    }

    /// Number of times an item has run.
    pub fn dispatch_count(&self, handle: WorkHandle) -> Result<u32, QueueError> {
        Ok(self.slot(handle)?.dispatched)
    }

    /// Number of items waiting to run.
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    /// True when nothing is waiting to run.
    pub fn is_idle(&self) -> bool {
        self.ready.is_empty()
    }

    fn slot(&self, handle: WorkHandle) -> Result<&Slot<'a>, QueueError> {
        self.slots.get(handle.0).ok_or(QueueError::UnknownHandle)
    }

    fn enqueue(&mut self, index: usize) -> Result<(), QueueError> {
        let slot = self.slots.get_mut(index).ok_or(QueueError::UnknownHandle)?;
        self.ready
            .push_back(index)
            .map_err(|_| QueueError::CapacityFull)?;
        slot.state = WorkState::Queued;
        Ok(())
    }
}

impl<const N: usize> Default for WorkQueue<'_, N> {
    fn default() -> Self {
        Self::new()
    }
}
