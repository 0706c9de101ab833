//! Yes/no prompt: take the lesson first, or go straight on.
//! Both answers end in the same place; the branch only decides whether the
//! lesson range plays.

use super::range::RangeRunner;
use super::{Env, Flow, Input, draw_or_warn};
use crate::host::Host;
use crate::model::BranchSpec;

#[derive(Debug)]
pub struct Branch {
    spec: BranchSpec,
    lesson: Option<RangeRunner>,
    answered: bool,
}

impl Branch {
    pub fn new(spec: BranchSpec) -> Self {
        Self {
            spec,
            lesson: None,
            answered: false,
        }
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        env.host.clear();
        draw_or_warn(env.host, &self.spec.prompt);
        env.host.set_yes_no(true);
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        if let Some(lesson) = self.lesson.as_mut() {
            return lesson.handle(input, env);
        }
        if self.answered {
            return Flow::Continue;
        }
        match input {
            Input::Yes => {
                self.answered = true;
                env.host.set_yes_no(false);
                let mut lesson = RangeRunner::new(self.spec.lesson.clone());
                let flow = lesson.start(env);
                self.lesson = Some(lesson);
                flow
            }
            Input::No => {
                self.answered = true;
                env.host.set_yes_no(false);
                Flow::Done
            }
            _ => Flow::Continue,
        }
    }

    pub fn cleanup(&mut self, host: &mut dyn Host) {
        host.set_yes_no(false);
        if let Some(lesson) = self.lesson.as_mut() {
            lesson.cleanup(host);
        }
    }
}
