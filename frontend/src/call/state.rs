//! Submission lifecycle of the call widget.
//!
//! Kept free of browser APIs so the component only has to forward events and
//! own the timers. Every submission gets an attempt id; completions and timer
//! firings that carry an older id are ignored.

use log::{debug, info};

use super::error::CallError;
use super::phone::format_phone_number;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Loading,
    Success,
    Error(String),
}

impl SubmissionState {
    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Loading => "loading",
            SubmissionState::Success => "success",
            SubmissionState::Error(_) => "error",
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// What `submit` hands back: the request to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub attempt: u64,
    pub phone: String,
}

/// Which auto-return delay to schedule after a request settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    open: bool,
    phone_input: String,
    state: SubmissionState,
    attempt: u64,
}

impl Default for CallRequest {
    fn default() -> Self {
        Self::new()
    }
}

impl CallRequest {
    pub fn new() -> Self {
        Self {
            open: false,
            phone_input: String::new(),
            state: SubmissionState::Idle,
            attempt: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn phone_input(&self) -> &str {
        &self.phone_input
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn attempt(&self) -> u64 {
        self.attempt
    }

    pub fn can_submit(&self) -> bool {
        matches!(self.state, SubmissionState::Idle | SubmissionState::Error(_))
            && !self.phone_input.is_empty()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closing finishes any Success/Error cycle on the spot, so reopening
    /// never shows a stale result. A request still in flight keeps going.
    pub fn close(&mut self) {
        self.open = false;
        match self.state {
            SubmissionState::Success => self.finish_success(),
            SubmissionState::Error(_) => self.state = SubmissionState::Idle,
            SubmissionState::Idle | SubmissionState::Loading => {}
        }
    }

    pub fn set_phone_input(&mut self, value: String) {
        self.phone_input = value;
    }

    /// Starts a new attempt. Returns `None` while a request is in flight,
    /// while the success card is up, or when there is nothing to send.
    pub fn submit(&mut self) -> Option<Submission> {
        if !self.can_submit() {
            debug!("Ignoring submit in state {}", self.state.name());
            return None;
        }

        self.attempt += 1;
        self.state = SubmissionState::Loading;

        let phone = format_phone_number(&self.phone_input);
        info!("Submitting call request #{}", self.attempt);
        Some(Submission { attempt: self.attempt, phone })
    }

    /// Records the outcome of `attempt`. Returns the delay to schedule, or
    /// `None` when the outcome is stale or the widget is closed (the cycle
    /// then completes immediately).
    pub fn resolve(&mut self, attempt: u64, outcome: Result<(), CallError>) -> Option<Settled> {
        if attempt != self.attempt || self.state != SubmissionState::Loading {
            debug!("Dropping stale outcome for attempt #{}", attempt);
            return None;
        }

        let settled = match outcome {
            Ok(()) => {
                self.state = SubmissionState::Success;
                Settled::Succeeded
            }
            Err(err) => {
                self.state = SubmissionState::Error(err.user_message());
                Settled::Failed
            }
        };

        if !self.open {
            self.finish(settled);
            return None;
        }

        Some(settled)
    }

    /// Auto-return to Idle once the delay for `attempt` elapsed. Returns
    /// whether anything changed.
    pub fn reset(&mut self, attempt: u64) -> bool {
        if attempt != self.attempt {
            return false;
        }

        match self.state {
            SubmissionState::Success => self.finish(Settled::Succeeded),
            SubmissionState::Error(_) => self.finish(Settled::Failed),
            SubmissionState::Idle | SubmissionState::Loading => return false,
        }
        true
    }

    fn finish(&mut self, settled: Settled) {
        match settled {
            Settled::Succeeded => self.finish_success(),
            Settled::Failed => self.state = SubmissionState::Idle,
        }
    }

    fn finish_success(&mut self) {
        self.open = false;
        self.phone_input.clear();
        self.state = SubmissionState::Idle;
    }
}
