//! Course engine: small state machines driven by input events.
//! Each phase reports `Flow::Done` exactly once, on the event that finishes it.

pub mod branch;
pub mod checkpoint;
pub mod hub;
pub mod keyed_quiz;
pub mod progress;
pub mod range;
pub mod script;
pub mod sequence;
pub mod session;
pub mod text_quiz;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

pub use checkpoint::{CheckpointStore, KeyValueStore, LocalStorage, MemoryStore};
pub use session::{Session, SessionAction};

use progress::Progress;

use crate::config::GameConfig;
use crate::host::{Drawn, Host, TimerId};
use crate::model::ImageKey;

/// Everything that can move the course forward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Raw `KeyboardEvent::key()` value.
    Key(String),
    Prev,
    Next,
    Skip,
    Yes,
    No,
    Submit(String),
    Station(String),
    VideoEnded,
    Timer(TimerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Done,
}

/// Borrowed collaborators handed to every phase call.
pub struct Env<'a> {
    pub host: &'a mut dyn Host,
    pub config: &'a GameConfig,
    pub progress: &'a mut Progress,
}

/// Draws `key`. A missing slide is warned about once; later misses stay quiet.
pub(crate) fn draw_or_warn(host: &mut dyn Host, key: &ImageKey) -> Drawn {
    let drawn = host.draw(key);
    match drawn {
        Drawn::Shown => {}
        Drawn::Missing => log::warn!("slide not found: {}", key),
        Drawn::Skipped => log::debug!("skipping slide {}", key),
    }
    drawn
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Correct,
    Wrong,
}

/// A feedback image on screen and the timer that takes it down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Feedback {
    pub timer: TimerId,
    pub verdict: Verdict,
}
