//! Capabilities the course engine needs from whatever presents it.
//! The engine never touches the page directly; the web shell implements these
//! traits with `web-sys`, tests implement them with a recorder.

use crate::model::ImageKey;

/// Handle of a scheduled one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Visibility of the prev/next/skip button row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideControls {
    pub visible: bool,
    pub skip: bool,
}

impl SlideControls {
    pub const HIDDEN: SlideControls = SlideControls {
        visible: false,
        skip: false,
    };

    pub fn shown(skip: bool) -> Self {
        Self {
            visible: true,
            skip,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationView {
    pub id: String,
    pub label: String,
    pub played: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StationMap {
    pub stations: Vec<StationView>,
}

/// Outcome of asking the surface for a slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drawn {
    Shown,
    /// First miss for this key.
    Missing,
    /// Miss that was already reported, or an image still decoding.
    Skipped,
}

/// Drawing surface; images are scaled to fit and centered.
pub trait Surface {
    /// On anything but `Shown` the surface is left as it was.
    fn draw(&mut self, key: &ImageKey) -> Drawn;
    fn clear(&mut self);
}

pub trait Controls {
    /// Whether the page carries the prev/next/skip buttons at all.
    fn has_slide_controls(&self) -> bool;
    fn set_slide_controls(&mut self, controls: SlideControls);
    fn set_yes_no(&mut self, visible: bool);
    /// Answer box plus its submit button.
    fn set_answer_box(&mut self, visible: bool);
    fn clear_answer(&mut self);
    fn set_station_map(&mut self, map: Option<StationMap>);
    fn set_canvas_visible(&mut self, visible: bool);
}

pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u32) -> TimerId;
    fn cancel(&mut self, id: TimerId);
}

pub trait Media {
    fn play_video(&mut self, src: &str);
    fn stop_video(&mut self);
    /// Click cue, replayed from the start.
    fn play_click(&mut self);
}

pub trait Notifier {
    /// Blocking, user-visible interrupt.
    fn alert(&mut self, message: &str);
}

pub trait Host: Surface + Controls + Scheduler + Media + Notifier {}

impl<T: Surface + Controls + Scheduler + Media + Notifier> Host for T {}
