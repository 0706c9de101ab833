//! Top-level step sequence with resume-from-checkpoint.
//! Persistence happens only at step boundaries: a reload mid-step replays that
//! whole step.

use super::checkpoint::{Checkpoint, CheckpointStore};
use super::script::Script;
use super::{Env, Flow, Input};
use crate::host::Host;
use crate::model::StepSpec;

pub struct SequenceRunner {
    steps: Vec<StepSpec>,
    store: CheckpointStore,
    index: usize,
    active: Option<Script>,
}

impl SequenceRunner {
    pub fn new(steps: Vec<StepSpec>, store: CheckpointStore) -> Self {
        Self {
            steps,
            store,
            index: 0,
            active: None,
        }
    }

    /// Step currently playing, `None` before start and after completion.
    pub fn current_step(&self) -> Option<usize> {
        self.active.as_ref().map(|_| self.index)
    }

    pub fn is_complete(&self) -> bool {
        self.active.is_none() && self.index >= self.steps.len()
    }

    pub fn store_mut(&mut self) -> &mut CheckpointStore {
        &mut self.store
    }

    /// Reads the checkpoint once; a valid one overrides `requested`.
    pub fn begin(&mut self, requested: usize, env: &mut Env<'_>) {
        let start = match self.store.load() {
            Some(cp) if cp.sequence_index <= self.steps.len() => {
                log::info!("resuming at step {}", cp.sequence_index);
                cp.sequence_index
            }
            Some(cp) => {
                log::warn!(
                    "checkpoint step {} out of range ({} steps), ignoring",
                    cp.sequence_index,
                    self.steps.len()
                );
                requested
            }
            None => requested,
        };
        self.advance(start, env);
    }

    pub fn advance(&mut self, mut index: usize, env: &mut Env<'_>) {
        loop {
            self.index = index;
            let Some(step) = self.steps.get(index) else {
                log::info!("course complete");
                self.active = None;
                return;
            };
            log::info!("starting step {} ({})", index, step.name);
            if let Some(note) = &step.note {
                log::debug!("{}: {}", step.name, note);
            }
            let mut script = Script::new(step.phases.clone());
            if script.start(env) == Flow::Continue {
                self.active = Some(script);
                return;
            }
            self.complete(index);
            index += 1;
        }
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) {
        let Some(script) = self.active.as_mut() else {
            return;
        };
        if script.handle(input, env) == Flow::Done {
            self.active = None;
            let finished = self.index;
            self.complete(finished);
            self.advance(finished + 1, env);
        }
    }

    /// Abandons the running step without persisting anything.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        if let Some(mut script) = self.active.take() {
            script.cleanup(host);
        }
    }

    fn complete(&mut self, index: usize) {
        if let Err(e) = self.store.save(Checkpoint::at_step(index + 1)) {
            log::error!("could not save checkpoint after step {}: {}", index, e);
        }
    }
}
