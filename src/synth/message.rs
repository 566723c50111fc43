use std::collections::VecDeque;

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::sequencing::ToneEvent;

/// Commands sent from the control side to a tone renderer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ToneMessage {
    /// Start `event` at absolute renderer time `at` (seconds).
    Start { event: ToneEvent, at: f64 },
}

pub trait MessageReceiver {
    fn pop(&mut self) -> Option<ToneMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        Consumer::pop(self).ok()
    }
}

/// Offline rendering feeds the renderer from a plain queue.
impl MessageReceiver for VecDeque<ToneMessage> {
    fn pop(&mut self) -> Option<ToneMessage> {
        self.pop_front()
    }
}
