//! Runs a step's phases one after another.

use super::branch::Branch;
use super::hub::Hub;
use super::keyed_quiz::KeyedQuiz;
use super::range::RangeRunner;
use super::text_quiz::TextQuiz;
use super::video::VideoPlayback;
use super::{Env, Flow, Input};
use crate::host::Host;
use crate::model::Phase;

#[derive(Debug)]
enum Active {
    Video(VideoPlayback),
    Range(RangeRunner),
    Branch(Branch),
    KeyedQuiz(KeyedQuiz),
    TextQuiz(TextQuiz),
    Hub(Box<Hub>),
}

impl Active {
    fn launch(phase: &Phase, env: &mut Env<'_>) -> (Self, Flow) {
        match phase {
            Phase::Video { src } => {
                let mut v = VideoPlayback::new(src.clone());
                let flow = v.start(env);
                (Active::Video(v), flow)
            }
            Phase::Range(spec) => {
                let mut r = RangeRunner::new(spec.clone());
                let flow = r.start(env);
                (Active::Range(r), flow)
            }
            Phase::Branch(spec) => {
                let mut b = Branch::new(spec.clone());
                let flow = b.start(env);
                (Active::Branch(b), flow)
            }
            Phase::KeyedQuiz(spec) => {
                let mut q = KeyedQuiz::new(spec.clone());
                let flow = q.start(env);
                (Active::KeyedQuiz(q), flow)
            }
            Phase::TextQuiz(spec) => {
                let mut q = TextQuiz::new(spec.clone());
                let flow = q.start(env);
                (Active::TextQuiz(q), flow)
            }
            Phase::Hub(spec) => {
                let mut h = Box::new(Hub::new(spec.clone()));
                let flow = h.start(env);
                (Active::Hub(h), flow)
            }
        }
    }

    fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        match self {
            Active::Video(v) => v.handle(input, env),
            Active::Range(r) => r.handle(input, env),
            Active::Branch(b) => b.handle(input, env),
            Active::KeyedQuiz(q) => q.handle(input, env),
            Active::TextQuiz(q) => q.handle(input, env),
            Active::Hub(h) => h.handle(input, env),
        }
    }

    fn cleanup(&mut self, host: &mut dyn Host) {
        match self {
            Active::Video(v) => v.cleanup(host),
            Active::Range(r) => r.cleanup(host),
            Active::Branch(b) => b.cleanup(host),
            Active::KeyedQuiz(q) => q.cleanup(host),
            Active::TextQuiz(q) => q.cleanup(host),
            Active::Hub(h) => h.cleanup(host),
        }
    }
}

/// Sequential phase runner. Reports `Done` once, when the last phase finishes.
#[derive(Debug)]
pub struct Script {
    phases: Vec<Phase>,
    next: usize,
    active: Option<Active>,
}

impl Script {
    pub fn new(phases: Vec<Phase>) -> Self {
        Self {
            phases,
            next: 0,
            active: None,
        }
    }

    /// Index of the phase currently running, if any.
    pub fn phase(&self) -> Option<usize> {
        self.active.as_ref().map(|_| self.next - 1)
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        self.pump(env)
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        let Some(active) = self.active.as_mut() else {
            return Flow::Continue;
        };
        match active.handle(input, env) {
            Flow::Continue => Flow::Continue,
            Flow::Done => {
                self.active = None;
                self.pump(env)
            }
        }
    }

    /// Abandons whatever phase is running.
    pub fn cleanup(&mut self, host: &mut dyn Host) {
        if let Some(mut active) = self.active.take() {
            active.cleanup(host);
        }
        self.next = self.phases.len();
    }

    // Launches phases until one has to wait for input, or none are left.
    fn pump(&mut self, env: &mut Env<'_>) -> Flow {
        while let Some(phase) = self.phases.get(self.next) {
            self.next += 1;
            let (active, flow) = Active::launch(phase, env);
            if flow == Flow::Continue {
                self.active = Some(active);
                return Flow::Continue;
            }
        }
        Flow::Done
    }
}
