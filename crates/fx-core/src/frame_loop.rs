use crate::cancel::CancelToken;
use crate::constants::MAX_FRAME_DT_SEC;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Suspended,
    Stopped,
}

/// Bookkeeping for a host-driven render loop: stop handle, suspension while
/// the page is hidden and dt clamping.
///
/// Hosts call `begin_frame` at the top of every frame callback and skip the
/// frame (and any re-request) when it returns `None`. That also neutralizes
/// callbacks that were already queued when the loop was stopped.
#[derive(Clone, Debug)]
pub struct LoopControl {
    name: &'static str,
    state: LoopState,
    last_frame_at: Option<f64>,
    cancel: CancelToken,
}

impl LoopControl {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            state: LoopState::Running,
            last_frame_at: None,
            cancel: CancelToken::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> LoopState {
        if self.cancel.is_cancelled() {
            LoopState::Stopped
        } else {
            self.state
        }
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Returns the clamped dt in seconds, or `None` if this frame must not
    /// run. The first frame after start or resume reports dt = 0.
    pub fn begin_frame(&mut self, now: f64) -> Option<f32> {
        if self.state() != LoopState::Running {
            return None;
        }
        let dt = match self.last_frame_at {
            Some(prev) => ((now - prev).max(0.0) as f32).min(MAX_FRAME_DT_SEC),
            None => 0.0,
        };
        self.last_frame_at = Some(now);
        Some(dt)
    }

    pub fn suspend(&mut self) {
        if self.state() == LoopState::Running {
            log::debug!("[frame] {} suspended", self.name);
            self.state = LoopState::Suspended;
        }
    }

    /// Resume after suspension. Idle time is discarded.
    pub fn resume(&mut self) -> bool {
        if self.state() != LoopState::Suspended {
            return false;
        }
        log::debug!("[frame] {} resumed", self.name);
        self.state = LoopState::Running;
        self.last_frame_at = None;
        true
    }

    /// Idempotent.
    pub fn stop(&mut self) {
        if self.state != LoopState::Stopped {
            log::info!("[frame] {} stopped", self.name);
        }
        self.cancel.cancel();
        self.state = LoopState::Stopped;
    }
}
