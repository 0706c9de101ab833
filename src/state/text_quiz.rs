//! Quiz answered by typing into the answer box.

use super::{Env, Feedback, Flow, Input, Verdict, draw_or_warn};
use crate::host::Host;
use crate::model::{ImageKey, TextQuizSpec};

#[derive(Debug)]
pub struct TextQuiz {
    spec: TextQuizSpec,
    current: usize,
    health: u32,
    feedback: Option<Feedback>,
    finished: bool,
}

impl TextQuiz {
    pub fn new(spec: TextQuizSpec) -> Self {
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

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        if self.spec.one_shot && env.progress.is_completed(&self.spec.id) {
            log::warn!("quiz {} already played, skipping", self.spec.id);
            self.finished = true;
            return Flow::Done;
        }
        if self.spec.questions.is_empty() {
            return self.finish(env);
        }
        env.host.set_answer_box(true);
        env.host.clear_answer();
        self.draw_question(env);
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        if self.finished {
            return Flow::Continue;
        }
        match input {
            Input::Submit(_) if self.feedback.is_some() => Flow::Continue,
            Input::Submit(text) => {
                let answer = text.trim();
                let question = &self.spec.questions[self.current];
                let accepted = question.accepted.iter().any(|a| a == answer);
                let (correct, wrong) = (question.correct, question.wrong);
                if accepted {
                    self.show_feedback(correct, Verdict::Correct, env);
                } else {
                    self.health = self.health.saturating_sub(1);
                    log::debug!("rejected answer {:?} (health {})", answer, self.health);
                    self.show_feedback(wrong, Verdict::Wrong, env);
                }
                Flow::Continue
            }
            Input::Timer(id) => match self.feedback {
                Some(fb) if fb.timer == *id => {
                    self.feedback = None;
                    match fb.verdict {
                        Verdict::Correct => {
                            env.host.clear_answer();
                            self.current += 1;
                            if self.current >= self.spec.questions.len() {
                                return self.finish(env);
                            }
                        }
                        Verdict::Wrong => {
                            if self.health == 0 {
                                env.host.alert(&env.config.game_over_message);
                                self.current = 0;
                                self.health = self.spec.health;
                            }
                        }
                    }
                    self.draw_question(env);
                    Flow::Continue
                }
                _ => Flow::Continue,
            },
            _ => Flow::Continue,
        }
    }

    /// Drops a pending feedback timer; used when the session abandons the quiz.
    pub fn cleanup(&mut self, host: &mut dyn Host) {
        if let Some(fb) = self.feedback.take() {
            host.cancel(fb.timer);
        }
        host.set_answer_box(false);
    }

    fn finish(&mut self, env: &mut Env<'_>) -> Flow {
        self.finished = true;
        if self.spec.one_shot {
            env.progress.mark_completed(&self.spec.id);
        }
        env.host.set_answer_box(false);
        Flow::Done
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TextQuestion;
    use crate::state::testing::Rig;

    fn spec() -> TextQuizSpec {
        let q = |prompt: u32, accepted: &[&str]| TextQuestion {
            prompt,
            accepted: accepted.iter().map(|s| s.to_string()).collect(),
            correct: prompt + 2,
            wrong: prompt + 1,
        };
        TextQuizSpec {
            id: "world-2".to_string(),
            folder: "W2_Images".to_string(),
            health: 2,
            one_shot: true,
            questions: vec![q(11, &["4/6", "2/3"]), q(14, &["1/4"]), q(17, &["5/5", "1"])],
        }
    }

    fn submit(s: &str) -> Input {
        Input::Submit(s.to_string())
    }

    fn settle(quiz: &mut TextQuiz, rig: &mut Rig) -> Flow {
        let t = rig.host.take_timer().unwrap();
        quiz.handle(&Input::Timer(t), &mut rig.env())
    }

    #[test]
    fn alternate_spelling_advances() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        assert!(rig.host.answer_box);
        quiz.handle(&submit("2/3"), &mut rig.env());
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W2_Images", 13)));
        settle(&mut quiz, &mut rig);
        assert_eq!(quiz.current(), 1);
        assert_eq!(quiz.health(), 2);
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W2_Images", 14)));
    }

    #[test]
    fn wrong_answer_costs_health_without_advancing() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        quiz.handle(&submit("3/4"), &mut rig.env());
        assert_eq!(quiz.health(), 1);
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W2_Images", 12)));
        settle(&mut quiz, &mut rig);
        assert_eq!(quiz.current(), 0);
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W2_Images", 11)));
    }

    #[test]
    fn input_is_trimmed_but_case_and_spelling_are_exact() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        quiz.handle(&submit("  4/6 \n"), &mut rig.env());
        settle(&mut quiz, &mut rig);
        assert_eq!(quiz.current(), 1);
        quiz.handle(&submit("1 / 4"), &mut rig.env());
        settle(&mut quiz, &mut rig);
        assert_eq!(quiz.current(), 1);
        assert_eq!(quiz.health(), 1);
    }

    #[test]
    fn health_exhaustion_alerts_and_restarts() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        quiz.handle(&submit("4/6"), &mut rig.env());
        settle(&mut quiz, &mut rig);
        for _ in 0..2 {
            quiz.handle(&submit("nope"), &mut rig.env());
            settle(&mut quiz, &mut rig);
        }
        assert_eq!(rig.host.alerts.len(), 1);
        assert_eq!(quiz.current(), 0);
        assert_eq!(quiz.health(), 2);
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W2_Images", 11)));
    }

    #[test]
    fn submit_during_feedback_is_ignored() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        quiz.handle(&submit("4/6"), &mut rig.env());
        quiz.handle(&submit("1/4"), &mut rig.env());
        settle(&mut quiz, &mut rig);
        assert_eq!(quiz.current(), 1);
        assert!(rig.host.pending.is_empty());
    }

    #[test]
    fn finishing_marks_progress_and_blocks_reentry() {
        let mut rig = Rig::default();
        let mut quiz = TextQuiz::new(spec());
        quiz.start(&mut rig.env());
        let mut last = Flow::Continue;
        for answer in ["4/6", "1/4", "1"] {
            quiz.handle(&submit(answer), &mut rig.env());
            last = settle(&mut quiz, &mut rig);
        }
        assert_eq!(last, Flow::Done);
        assert!(!rig.host.answer_box);
        assert!(rig.progress.is_completed("world-2"));

        let drawn = rig.host.drawn.len();
        let mut again = TextQuiz::new(spec());
        assert_eq!(again.start(&mut rig.env()), Flow::Done);
        assert_eq!(rig.host.drawn.len(), drawn);

        rig.progress.reset();
        let mut replay = TextQuiz::new(spec());
        assert_eq!(replay.start(&mut rig.env()), Flow::Continue);
    }
}
