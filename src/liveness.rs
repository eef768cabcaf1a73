//! Read/write bookkeeping that turns a stream of variable events into dead
//! stores.
//!
//! Every event draws a fresh [`LogicalTime`]. A write is dead when the next
//! write to the same variable (or the end of program flush) happens without a
//! read in between.
//!
//! Loops need one extra rule. A body runs more than once, so a read near the
//! top of the body may consume a value written further down on the previous
//! pass. While a body is parsed, each read of a variable whose last write
//! happened before the loop started is remembered in the innermost loop
//! frame. When the body closes those variables are read once more,
//! which credits the writes made inside the body.

use crate::location::Location;
use crate::report::{Assignment, DeadStoreReport, LogicalTime};
use crate::var::{Var, VarSet};
use tracing::{debug, trace};

#[derive(Clone, Debug, Default)]
struct VarState {
    /// `None` until the first read.
    last_read: Option<LogicalTime>,
    /// `None` until the first write.
    last_write: Option<LogicalTime>,
    pending: Option<Assignment>,
}

impl VarState {
    /// The latest write has not been read since it happened. Never written
    /// variables count as read.
    fn is_unread(&self) -> bool {
        match (self.last_write, self.last_read) {
            (Some(write), Some(read)) => read < write,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    fn written_before(&self, time: LogicalTime) -> bool {
        self.last_write.map_or(true, |write| write < time)
    }
}

#[derive(Clone, Copy, Debug)]
struct LoopFrame {
    marked: VarSet,
    start: LogicalTime,
}

/// Liveness state of a single analysis run.
#[derive(Debug, Default)]
pub struct Tracker {
    vars: [VarState; Var::COUNT],
    loops: Vec<LoopFrame>,
    clock: LogicalTime,
    dead: Vec<Assignment>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    fn tick(&mut self) -> LogicalTime {
        let time = self.clock;
        self.clock += 1;
        time
    }

    pub fn write(&mut self, var: Var, representation: String, location: Location) {
        let state = &mut self.vars[var.index()];

        if state.is_unread() {
            if let Some(store) = state.pending.take() {
                debug!(store = %store.representation, line = store.location.line, "dead store");
                self.dead.push(store);
            }
        }

        let time = self.tick();
        trace!(%var, time, "write");

        let state = &mut self.vars[var.index()];
        state.last_write = Some(time);
        state.pending = Some(Assignment {
            var,
            representation,
            time,
            location,
        });
    }

    pub fn read(&mut self, var: Var) {
        let state = &self.vars[var.index()];

        if let Some(frame) = self.loops.last_mut() {
            if state.written_before(frame.start) {
                frame.marked.insert(var);
            }
        }

        let time = self.tick();
        trace!(%var, time, "read");
        self.vars[var.index()].last_read = Some(time);
    }

    pub fn enter_loop(&mut self) {
        let start = self.tick();
        debug!(start, depth = self.loops.len() + 1, "enter loop");

        self.loops.push(LoopFrame {
            marked: VarSet::new(),
            start,
        });
    }

    pub fn exit_loop(&mut self) {
        let marked = match self.loops.last() {
            Some(frame) => frame.marked,
            None => return,
        };
        debug!(?marked, depth = self.loops.len(), "exit loop");

        // the frame stays on top while the carried reads happen
        for var in marked.iter() {
            self.read(var);
        }

        self.loops.pop();
    }

    /// Flushes the pending write of `var` as if it were overwritten.
    pub fn finalize_write(&mut self, var: Var, location: Location) {
        self.write(var, String::new(), location);
    }

    /// Number of loops currently open.
    pub fn loop_depth(&self) -> usize {
        self.loops.len()
    }

    /// Variables marked by the innermost open loop.
    pub fn innermost_marked(&self) -> Option<VarSet> {
        self.loops.last().map(|frame| frame.marked)
    }

    pub fn now(&self) -> LogicalTime {
        self.clock
    }

    /// Flushes every variable in letter order and returns the dead stores in
    /// the order they were written.
    pub fn finish(mut self, location: Location) -> DeadStoreReport {
        for var in Var::all() {
            self.finalize_write(var, location);
        }

        DeadStoreReport::from_detected(self.dead)
    }
}
