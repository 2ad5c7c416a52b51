use crate::target::{StyleSink, TargetId};
use crate::timeline::Timeline;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug)]
struct Queued {
    timeline: Timeline,
    overwrite: bool,
}

/// Cloneable inbox for timelines. Safe to push from step callbacks that run
/// inside [`TimelineRunner::advance`]; such timelines start on the next
/// advance.
#[derive(Clone, Debug, Default)]
pub struct TimelineQueue {
    inner: Rc<RefCell<Vec<Queued>>>,
}

impl TimelineQueue {
    pub fn push(&self, timeline: Timeline) {
        self.inner.borrow_mut().push(Queued {
            timeline,
            overwrite: false,
        });
    }

    /// Queue `timeline`; when it starts, running tweens on the same targets
    /// are retired first.
    pub fn push_overwrite(&self, timeline: Timeline) {
        self.inner.borrow_mut().push(Queued {
            timeline,
            overwrite: true,
        });
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    fn take(&self) -> Vec<Queued> {
        std::mem::take(&mut *self.inner.borrow_mut())
    }
}

/// Owns every timeline currently playing on a page.
///
/// Timelines are queued from event handlers and start on the next
/// `advance`, so callers never need the style sink at enqueue time.
#[derive(Debug, Default)]
pub struct TimelineRunner {
    queue: TimelineQueue,
    active: Vec<Timeline>,
}

impl TimelineRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for queuing from callbacks.
    pub fn queue(&self) -> TimelineQueue {
        self.queue.clone()
    }

    pub fn enqueue(&mut self, timeline: Timeline) {
        self.queue.push(timeline);
    }

    pub fn enqueue_overwrite(&mut self, timeline: Timeline) {
        self.queue.push_overwrite(timeline);
    }

    /// Retire running tweens of `target` in every active timeline.
    pub fn kill(&mut self, target: TargetId) {
        for tl in self.active.iter_mut() {
            tl.kill_target(target);
        }
    }

    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty() && self.queue.is_empty()
    }

    /// Start queued timelines at `now`, advance everything, drop finished
    /// timelines.
    pub fn advance(&mut self, now: f64, sink: &mut dyn StyleSink) {
        for Queued {
            mut timeline,
            overwrite,
        } in self.queue.take()
        {
            if overwrite {
                let targets: Vec<TargetId> = timeline.targets().collect();
                for target in targets {
                    self.kill(target);
                }
            }
            timeline.play(now, sink);
            self.active.push(timeline);
        }
        self.active.retain_mut(|tl| !tl.advance(now, sink));
    }
}
