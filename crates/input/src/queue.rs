//! Cross-thread funnel for input.
//!
//! Terminal events are captured on their own thread and sent through a
//! channel; the owner thread drains the queue between scheduler ticks so no
//! gesture ever touches the board concurrently with an update.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use arrayvec::ArrayVec;
use crossterm::event;
use log::debug;

use crate::map::translate;
use crate::types::GestureEvent;

/// Messages drained per call to [`GestureQueue::drain`]
pub const DRAIN_BATCH: usize = 64;

/// What the capture thread hands to the owner thread
#[derive(Debug, Clone, PartialEq)]
pub enum InputMessage {
    Gesture(GestureEvent),
    Resize { cols: u16, rows: u16 },
    Quit,
}

/// Producer side; cheap to clone onto any thread
#[derive(Debug, Clone)]
pub struct GestureSender {
    tx: Sender<InputMessage>,
}

impl GestureSender {
    /// Queue a message. Returns false once the owner has gone away.
    pub fn send(&self, msg: InputMessage) -> bool {
        self.tx.send(msg).is_ok()
    }
}

/// Consumer side, owned by the simulation thread
#[derive(Debug)]
pub struct GestureQueue {
    rx: Receiver<InputMessage>,
    tx: Sender<InputMessage>,
}

impl GestureQueue {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self { rx, tx }
    }

    pub fn sender(&self) -> GestureSender {
        GestureSender {
            tx: self.tx.clone(),
        }
    }

    /// Take up to [`DRAIN_BATCH`] pending messages in arrival order.
    pub fn drain(&self) -> ArrayVec<InputMessage, DRAIN_BATCH> {
        let mut out = ArrayVec::new();
        while !out.is_full() {
            match self.rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        out
    }
}

impl Default for GestureQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn a thread that reads terminal events into `sender` until `stop` is
/// set, a quit key is seen, or the queue is dropped.
pub fn spawn_capture(
    sender: GestureSender,
    stop: Arc<AtomicBool>,
    poll_interval: Duration,
) -> JoinHandle<io::Result<()>> {
    thread::spawn(move || {
        while !stop.load(Ordering::Relaxed) {
            if !event::poll(poll_interval)? {
                continue;
            }
            let Some(msg) = translate(event::read()?) else {
                continue;
            };
            let quit = msg == InputMessage::Quit;
            if !sender.send(msg) || quit {
                break;
            }
        }
        debug!("input capture thread exiting");
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_across_threads() {
        let queue = GestureQueue::new();
        let sender = queue.sender();
        let handle = thread::spawn(move || {
            for i in 0..10 {
                sender.send(InputMessage::Gesture(GestureEvent::press(i as f32, 0.0)));
            }
        });
        handle.join().unwrap();

        let msgs = queue.drain();
        assert_eq!(msgs.len(), 10);
        for (i, msg) in msgs.iter().enumerate() {
            match msg {
                InputMessage::Gesture(g) => assert_eq!(g.x, i as f32),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_drain_is_batched() {
        let queue = GestureQueue::new();
        let sender = queue.sender();
        for _ in 0..DRAIN_BATCH + 5 {
            sender.send(InputMessage::Quit);
        }
        assert_eq!(queue.drain().len(), DRAIN_BATCH);
        assert_eq!(queue.drain().len(), 5);
    }

    #[test]
    fn test_send_fails_after_queue_dropped() {
        let queue = GestureQueue::new();
        let sender = queue.sender();
        drop(queue);
        assert!(!sender.send(InputMessage::Quit));
    }
}
