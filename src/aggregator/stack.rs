//! Depth-indexed call stack reconstruction from entry/exit events.
//!
//! The trace is flat: each record only carries its nesting depth. The
//! tracker replays records against a stack of open frames, one slot per
//! depth, and computes time/memory deltas when a frame closes. Deltas
//! bubble up one level per exit, so a frame's child costs are complete by
//! the time it closes itself.

use crate::utils::error::TraceError;
use std::collections::HashMap;

/// One open function invocation
///
/// **Public** - owned by the tracker, one per occupied depth slot
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Function name from the entry record
    pub function_name: String,

    /// Timestamp snapshot at entry
    pub entry_time: f64,

    /// Memory snapshot at entry
    pub entry_memory: i64,

    /// Time spent in calls nested directly or transitively inside this one
    pub child_time: f64,

    /// Memory allocated by calls nested inside this one
    pub child_memory: i64,
}

impl Frame {
    fn new(function_name: String, entry_time: f64, entry_memory: i64) -> Self {
        Self {
            function_name,
            entry_time,
            entry_memory,
            child_time: 0.0,
            child_memory: 0,
        }
    }

    /// Sentinel root frame absorbing top-level deltas
    fn sentinel() -> Self {
        Self::new(String::new(), 0.0, 0)
    }
}

/// A closed call, ready for aggregation
///
/// **Public** - forwarded from the tracker to the function aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct CallExit {
    /// Name of the function that just returned
    pub function_name: String,

    /// Wall time between entry and exit of this frame
    pub time: f64,

    /// Memory delta between entry and exit of this frame
    pub memory: i64,

    /// Time accumulated from nested calls while this frame was open
    pub child_time: f64,

    /// Memory accumulated from nested calls while this frame was open
    pub child_memory: i64,

    /// Whether another invocation of the same function is still open
    pub still_active: bool,
}

/// Replays entry/exit events against a depth-indexed frame stack
///
/// **Public** - owned state, one instance per trace
#[derive(Debug)]
pub struct CallStackTracker {
    /// Open frames indexed by depth; `None` marks a hole from a skipped depth
    frames: Vec<Option<Frame>>,

    /// Occurrence counts of function names currently open on the stack
    active: HashMap<String, usize>,
}

impl CallStackTracker {
    /// Create a tracker with the two sentinel root frames installed
    ///
    /// **Public** - constructor
    pub fn new() -> Self {
        Self {
            frames: vec![Some(Frame::sentinel()), Some(Frame::sentinel())],
            active: HashMap::new(),
        }
    }

    /// Open a new frame at `depth`
    ///
    /// **Public** - called for every entry event
    ///
    /// The stack grows with holes if the trace skips depths; an existing
    /// frame at the same depth is overwritten.
    pub fn on_entry(&mut self, depth: usize, time: f64, memory: i64, name: &str) {
        while self.frames.len() < depth + 1 {
            self.frames.push(None);
        }
        self.frames[depth] = Some(Frame::new(name.to_string(), time, memory));
        *self.active.entry(name.to_string()).or_insert(0) += 1;
    }

    /// Close the frame at `depth` and propagate its deltas to the parent
    ///
    /// **Public** - called for every exit event
    ///
    /// # Errors
    /// * `TraceError::ExitIntoHole` - no open frame at `depth` (the entry
    ///   was skipped, or the frame was already closed), or the parent slot
    ///   at `depth - 1` was never filled
    pub fn on_exit(&mut self, depth: usize, time: f64, memory: i64, line: u64) -> Result<CallExit, TraceError> {
        let frame = self
            .frames
            .get_mut(depth)
            .and_then(Option::take)
            .ok_or(TraceError::ExitIntoHole { depth, line })?;

        let d_time = time - frame.entry_time;
        let d_memory = memory - frame.entry_memory;

        while self.frames.len() < depth {
            self.frames.push(None);
        }

        // Top-level frames at depth 0 have no parent to absorb their deltas.
        if depth > 0 {
            let parent = self.frames[depth - 1]
                .as_mut()
                .ok_or(TraceError::ExitIntoHole { depth: depth - 1, line })?;
            parent.child_time += d_time;
            parent.child_memory += d_memory;
        }

        let still_active = match self.active.get_mut(&frame.function_name) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.active.remove(&frame.function_name);
                false
            }
            None => false,
        };

        Ok(CallExit {
            function_name: frame.function_name,
            time: d_time,
            memory: d_memory,
            child_time: frame.child_time,
            child_memory: frame.child_memory,
            still_active,
        })
    }

    /// Number of stack slots currently allocated (including holes)
    ///
    /// **Public** - used for diagnostics
    pub fn depth_capacity(&self) -> usize {
        self.frames.len()
    }
}

impl Default for CallStackTracker {
    fn default() -> Self {
        Self::new()
    }
}
