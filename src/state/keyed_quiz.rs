//! Multiple-choice quiz answered with keys 1-4.

use super::{Env, Feedback, Flow, Input, Verdict, draw_or_warn};
use crate::host::Host;
use crate::model::{Choice, ImageKey, KeyedQuizSpec};

#[derive(Debug)]
pub struct KeyedQuiz {
    spec: KeyedQuizSpec,
    current: usize,
    /// `None` when the quiz has no health limit.
    health: Option<u32>,
    feedback: Option<Feedback>,
    finished: bool,
}

impl KeyedQuiz {
    pub fn new(spec: KeyedQuizSpec) -> Self {
        let health = spec.health;
        Self {
            spec,
            current: 0,
            health,
            feedback: None,
            finished: false,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn health(&self) -> Option<u32> {
        self.health
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        if self.spec.questions.is_empty() {
            self.finished = true;
            return Flow::Done;
        }
        self.draw_question(env);
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        if self.finished {
            return Flow::Continue;
        }
        match input {
            Input::Timer(id) => match self.feedback {
                Some(fb) if fb.timer == *id => {
                    self.feedback = None;
                    match fb.verdict {
                        Verdict::Correct => self.advance(env),
                        Verdict::Wrong => {
                            if self.health == Some(0) {
                                env.host.alert(&env.config.game_over_message);
                                self.current = 0;
                                self.health = self.spec.health;
                            }
                            self.draw_question(env);
                            Flow::Continue
                        }
                    }
                }
                _ => Flow::Continue,
            },
            // Keys pressed while feedback is up are dropped, not queued.
            Input::Key(_) if self.feedback.is_some() => Flow::Continue,
            Input::Key(key) => {
                let Some(choice) = Choice::from_key(key) else {
                    return Flow::Continue;
                };
                let question = &self.spec.questions[self.current];
                let (answer, correct, wrong) = (question.answer, question.correct, question.wrong);
                if choice == answer {
                    match correct {
                        Some(index) => {
                            self.show_feedback(index, Verdict::Correct, env);
                            Flow::Continue
                        }
                        None => self.advance(env),
                    }
                } else {
                    self.health = self.health.map(|h| h.saturating_sub(1));
                    log::debug!(
                        "wrong answer on question {} (health {:?})",
                        self.current,
                        self.health
                    );
                    self.show_feedback(wrong, Verdict::Wrong, env);
                    Flow::Continue
                }
            }
            _ => Flow::Continue,
        }
    }

    /// Drops a pending feedback timer; used when the session abandons the quiz.
    pub fn cleanup(&mut self, host: &mut dyn Host) {
        if let Some(fb) = self.feedback.take() {
            host.cancel(fb.timer);
        }
    }

    fn advance(&mut self, env: &mut Env<'_>) -> Flow {
        self.current += 1;
        if self.current >= self.spec.questions.len() {
            self.finished = true;
            return Flow::Done;
        }
        self.draw_question(env);
        Flow::Continue
    }

    fn show_feedback(&mut self, index: u32, verdict: Verdict, env: &mut Env<'_>) {
        draw_or_warn(env.host, &self.image(index));
        self.feedback = Some(Feedback {
            timer: env.host.schedule(env.config.feedback_dwell_ms),
            verdict,
        });
    }

    fn draw_question(&mut self, env: &mut Env<'_>) {
        env.host.clear();
        let prompt = self.spec.questions[self.current].prompt;
        draw_or_warn(env.host, &self.image(prompt));
    }

    fn image(&self, index: u32) -> ImageKey {
        ImageKey::new(self.spec.folder.clone(), index)
    }
}
