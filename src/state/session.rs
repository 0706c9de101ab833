//! One play-through: start trigger, the step sequence and session progress.

use super::checkpoint::CheckpointStore;
use super::progress::Progress;
use super::sequence::SequenceRunner;
use super::{Env, Input};
use crate::config::GameConfig;
use crate::host::{Host, SlideControls};
use crate::model::Course;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionAction {
    /// The initial click on the start image.
    Start,
    /// Wipe the checkpoint and progress, then play from the first step.
    Restart,
    Input(Input),
}

pub struct Session {
    sequence: SequenceRunner,
    progress: Progress,
    config: GameConfig,
    started: bool,
}

impl Session {
    pub fn new(course: &Course, config: GameConfig, store: CheckpointStore) -> Self {
        Self {
            sequence: SequenceRunner::new(course.steps.clone(), store),
            progress: Progress::default(),
            config,
            started: false,
        }
    }

    pub fn current_step(&self) -> Option<usize> {
        self.sequence.current_step()
    }

    pub fn is_complete(&self) -> bool {
        self.started && self.sequence.is_complete()
    }

    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    pub fn apply(&mut self, action: SessionAction, host: &mut dyn Host) {
        match action {
            SessionAction::Start => self.start(host),
            SessionAction::Restart => self.restart(host),
            SessionAction::Input(input) => self.handle(&input, host),
        }
    }

    pub fn start(&mut self, host: &mut dyn Host) {
        if self.started {
            return;
        }
        self.started = true;
        host.play_click();
        let mut env = Env {
            host,
            config: &self.config,
            progress: &mut self.progress,
        };
        self.sequence.begin(0, &mut env);
    }

    pub fn handle(&mut self, input: &Input, host: &mut dyn Host) {
        if !self.started {
            return;
        }
        let mut env = Env {
            host,
            config: &self.config,
            progress: &mut self.progress,
        };
        self.sequence.handle(input, &mut env);
    }

    pub fn restart(&mut self, host: &mut dyn Host) {
        log::info!("restarting course from the first step");
        self.sequence.cancel(host);
        if let Err(e) = self.sequence.store_mut().clear() {
            log::error!("could not clear checkpoint: {}", e);
        }
        self.progress.reset();
        host.set_slide_controls(SlideControls::HIDDEN);
        host.set_yes_no(false);
        host.set_answer_box(false);
        host.set_station_map(None);
        host.stop_video();
        host.set_canvas_visible(true);
        host.clear();
        if self.started {
            let mut env = Env {
                host,
                config: &self.config,
                progress: &mut self.progress,
            };
            self.sequence.begin(0, &mut env);
        }
    }
}
