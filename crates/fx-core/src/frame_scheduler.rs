//! Coalesces high-frequency input (scroll, resize, pointer move) into at most
//! one handler run per rendered frame.
//!
//! Each handler owns a latch. `request` sets it; the first request since the
//! last frame tells the host to ask for a frame. `run_frame` resets each
//! pending latch immediately before invoking its handler, in registration
//! order.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

struct Slot {
    name: &'static str,
    pending: bool,
    handler: Box<dyn FnMut()>,
}

#[derive(Default)]
pub struct FrameScheduler {
    slots: Vec<Slot>,
    frame_requested: bool,
}

impl fmt::Debug for FrameScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.slots.iter().map(|s| s.name).collect();
        f.debug_struct("FrameScheduler")
            .field("slots", &names)
            .field("frame_requested", &self.frame_requested)
            .finish()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &'static str, handler: impl FnMut() + 'static) -> SlotId {
        self.slots.push(Slot {
            name,
            pending: false,
            handler: Box::new(handler),
        });
        SlotId(self.slots.len() - 1)
    }

    /// Mark `slot` for the next frame. Returns true when the caller must
    /// request a frame from the host.
    pub fn request(&mut self, slot: SlotId) -> bool {
        let Some(s) = self.slots.get_mut(slot.0) else {
            log::warn!("[frame] unknown slot {:?}", slot);
            return false;
        };
        s.pending = true;
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }

    #[inline]
    pub fn is_pending(&self, slot: SlotId) -> bool {
        self.slots.get(slot.0).map(|s| s.pending).unwrap_or(false)
    }

    /// Run every pending handler once. Returns how many ran.
    pub fn run_frame(&mut self) -> usize {
        self.frame_requested = false;
        let mut ran = 0;
        for slot in &mut self.slots {
            if !slot.pending {
                continue;
            }
            slot.pending = false;
            (slot.handler)();
            ran += 1;
        }
        ran
    }
}
