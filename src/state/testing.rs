use std::collections::{BTreeMap, BTreeSet};

use super::Env;
use super::progress::Progress;
use crate::config::GameConfig;
use crate::host::{
    Controls, Drawn, Media, Notifier, Scheduler, SlideControls, StationMap, Surface, TimerId,
};
use crate::model::ImageKey;

/// Host double that records every capability call.
pub struct RecordingHost {
    pub drawn: Vec<ImageKey>,
    pub missing: BTreeSet<ImageKey>,
    reported: BTreeSet<ImageKey>,
    pub clears: usize,
    pub has_controls: bool,
    pub controls: SlideControls,
    pub yes_no: bool,
    pub answer_box: bool,
    pub answer_clears: usize,
    pub map: Option<StationMap>,
    pub canvas_visible: bool,
    pub pending: BTreeMap<TimerId, u32>,
    pub cancelled: Vec<TimerId>,
    next_timer: u64,
    pub videos: Vec<String>,
    pub video_stops: usize,
    pub clicks: usize,
    pub alerts: Vec<String>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            drawn: Vec::new(),
            missing: BTreeSet::new(),
            reported: BTreeSet::new(),
            clears: 0,
            has_controls: true,
            controls: SlideControls::HIDDEN,
            yes_no: false,
            answer_box: false,
            answer_clears: 0,
            map: None,
            canvas_visible: true,
            pending: BTreeMap::new(),
            cancelled: Vec::new(),
            next_timer: 0,
            videos: Vec::new(),
            video_stops: 0,
            clicks: 0,
            alerts: Vec::new(),
        }
    }
}

impl RecordingHost {
    pub fn last_drawn(&self) -> Option<&ImageKey> {
        self.drawn.last()
    }

    /// Removes and returns the oldest pending timer.
    pub fn take_timer(&mut self) -> Option<TimerId> {
        let id = *self.pending.keys().next()?;
        self.pending.remove(&id);
        Some(id)
    }

    pub fn drawn_indices(&self, folder: &str) -> Vec<u32> {
        self.drawn
            .iter()
            .filter(|k| k.folder == folder)
            .map(|k| k.index)
            .collect()
    }
}

impl Surface for RecordingHost {
    fn draw(&mut self, key: &ImageKey) -> Drawn {
        if self.missing.contains(key) {
            return if self.reported.insert(key.clone()) {
                Drawn::Missing
            } else {
                Drawn::Skipped
            };
        }
        self.drawn.push(key.clone());
        Drawn::Shown
    }

    fn clear(&mut self) {
        self.clears += 1;
    }
}

impl Controls for RecordingHost {
    fn has_slide_controls(&self) -> bool {
        self.has_controls
    }

    fn set_slide_controls(&mut self, controls: SlideControls) {
        self.controls = controls;
    }

    fn set_yes_no(&mut self, visible: bool) {
        self.yes_no = visible;
    }

    fn set_answer_box(&mut self, visible: bool) {
        self.answer_box = visible;
    }

    fn clear_answer(&mut self) {
        self.answer_clears += 1;
    }

    fn set_station_map(&mut self, map: Option<StationMap>) {
        self.map = map;
    }

    fn set_canvas_visible(&mut self, visible: bool) {
        self.canvas_visible = visible;
    }
}

impl Scheduler for RecordingHost {
    fn schedule(&mut self, delay_ms: u32) -> TimerId {
        self.next_timer += 1;
        let id = TimerId(self.next_timer);
        self.pending.insert(id, delay_ms);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if self.pending.remove(&id).is_some() {
            self.cancelled.push(id);
        }
    }
}

impl Media for RecordingHost {
    fn play_video(&mut self, src: &str) {
        self.videos.push(src.to_string());
    }

    fn stop_video(&mut self) {
        self.video_stops += 1;
    }

    fn play_click(&mut self) {
        self.clicks += 1;
    }
}

impl Notifier for RecordingHost {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}

/// Host, config and progress bundled so tests can hand out an `Env` per call.
#[derive(Default)]
pub struct Rig {
    pub host: RecordingHost,
    pub config: GameConfig,
    pub progress: Progress,
}

impl Rig {
    pub fn env(&mut self) -> Env<'_> {
        Env {
            host: &mut self.host,
            config: &self.config,
            progress: &mut self.progress,
        }
    }
}
