//! Plays a numbered block of slides, by hand or on a timer.

use super::{Env, Flow, Input, draw_or_warn};
use crate::host::{Host, SlideControls, TimerId};
use crate::model::RangeSpec;

#[derive(Debug)]
pub struct RangeRunner {
    spec: RangeSpec,
    cursor: u32,
    /// Effective delay; zero while under manual control.
    delay_ms: u32,
    timer: Option<TimerId>,
    finished: bool,
}

impl RangeRunner {
    pub fn new(spec: RangeSpec) -> Self {
        let cursor = spec.start;
        Self {
            spec,
            cursor,
            delay_ms: 0,
            timer: None,
            finished: false,
        }
    }

    pub fn cursor(&self) -> u32 {
        self.cursor
    }

    pub fn is_auto(&self) -> bool {
        self.delay_ms > 0
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        self.delay_ms = self.spec.auto_delay_ms;
        if self.delay_ms == 0 && !env.host.has_slide_controls() {
            log::warn!(
                "slide controls not found, auto-advancing {} {}..{}",
                self.spec.folder,
                self.spec.start,
                self.spec.end
            );
            self.delay_ms = env.config.fallback_auto_delay_ms.max(1);
        }
        if self.is_auto() {
            env.host.set_slide_controls(SlideControls::HIDDEN);
            self.timer = Some(env.host.schedule(self.delay_ms));
        } else {
            env.host
                .set_slide_controls(SlideControls::shown(self.spec.allow_skip));
        }
        draw_or_warn(env.host, &self.spec.image(self.cursor));
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        if self.finished {
            return Flow::Continue;
        }
        match input {
            Input::Timer(id) if self.timer == Some(*id) => {
                self.timer = None;
                if self.cursor < self.spec.end {
                    self.cursor += 1;
                    draw_or_warn(env.host, &self.spec.image(self.cursor));
                    self.timer = Some(env.host.schedule(self.delay_ms));
                    Flow::Continue
                } else {
                    self.finish(env.host)
                }
            }
            _ if self.is_auto() => Flow::Continue,
            Input::Next => {
                if self.cursor < self.spec.end {
                    self.cursor += 1;
                    draw_or_warn(env.host, &self.spec.image(self.cursor));
                    Flow::Continue
                } else {
                    self.finish(env.host)
                }
            }
            Input::Prev => {
                if self.cursor > self.spec.start {
                    self.cursor -= 1;
                    draw_or_warn(env.host, &self.spec.image(self.cursor));
                }
                Flow::Continue
            }
            Input::Skip if self.spec.allow_skip => self.finish(env.host),
            _ => Flow::Continue,
        }
    }

    /// Hides the controls and drops any pending tick. Safe to repeat.
    pub fn cleanup(&mut self, host: &mut dyn Host) {
        host.set_slide_controls(SlideControls::HIDDEN);
        if let Some(id) = self.timer.take() {
            host.cancel(id);
        }
    }

    fn finish(&mut self, host: &mut dyn Host) -> Flow {
        self.cleanup(host);
        self.finished = true;
        Flow::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageKey;
    use crate::state::testing::Rig;

    fn manual(allow_skip: bool) -> RangeRunner {
        RangeRunner::new(RangeSpec::manual("W1_Images", 1, 3, allow_skip))
    }

    #[test]
    fn next_walks_to_end_then_finishes_once() {
        let mut rig = Rig::default();
        let mut r = manual(true);
        assert_eq!(r.start(&mut rig.env()), Flow::Continue);
        assert_eq!(rig.host.controls, SlideControls::shown(true));
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Done);
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1, 2, 3]);
        assert_eq!(rig.host.controls, SlideControls::HIDDEN);
    }

    #[test]
    fn prev_is_a_no_op_at_start() {
        let mut rig = Rig::default();
        let mut r = manual(true);
        r.start(&mut rig.env());
        r.handle(&Input::Prev, &mut rig.env());
        assert_eq!(r.cursor(), 1);
        r.handle(&Input::Next, &mut rig.env());
        r.handle(&Input::Prev, &mut rig.env());
        assert_eq!(r.cursor(), 1);
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1, 2, 1]);
    }

    #[test]
    fn skip_finishes_without_visiting_the_rest() {
        let mut rig = Rig::default();
        let mut r = manual(true);
        r.start(&mut rig.env());
        assert_eq!(r.handle(&Input::Skip, &mut rig.env()), Flow::Done);
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1]);
    }

    #[test]
    fn skip_on_unskippable_range_is_ignored() {
        let mut rig = Rig::default();
        let mut r = manual(false);
        r.start(&mut rig.env());
        assert_eq!(rig.host.controls, SlideControls::shown(false));
        assert_eq!(r.handle(&Input::Skip, &mut rig.env()), Flow::Continue);
        assert_eq!(r.cursor(), 1);
    }

    #[test]
    fn auto_mode_finishes_after_three_ticks_and_stops() {
        let mut rig = Rig::default();
        let mut r = RangeRunner::new(RangeSpec::auto("W1_Images", 1, 3, 100));
        r.start(&mut rig.env());
        assert_eq!(rig.host.controls, SlideControls::HIDDEN);
        let mut flows = Vec::new();
        while let Some(t) = rig.host.take_timer() {
            assert_eq!(rig.host.pending.len(), 0);
            flows.push(r.handle(&Input::Timer(t), &mut rig.env()));
        }
        assert_eq!(flows, [Flow::Continue, Flow::Continue, Flow::Done]);
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1, 2, 3]);
        assert!(rig.host.pending.is_empty());
    }

    #[test]
    fn auto_mode_ignores_buttons_and_foreign_timers() {
        let mut rig = Rig::default();
        let mut r = RangeRunner::new(RangeSpec::auto("W1_Images", 1, 2, 100));
        r.start(&mut rig.env());
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        assert_eq!(r.handle(&Input::Skip, &mut rig.env()), Flow::Continue);
        assert_eq!(
            r.handle(&Input::Timer(TimerId(999)), &mut rig.env()),
            Flow::Continue
        );
        assert_eq!(r.cursor(), 1);
    }

    #[test]
    fn cleanup_twice_matches_cleanup_once() {
        let mut rig = Rig::default();
        let mut r = RangeRunner::new(RangeSpec::auto("W1_Images", 1, 3, 100));
        r.start(&mut rig.env());
        r.cleanup(&mut rig.host);
        let controls = rig.host.controls;
        let pending = rig.host.pending.clone();
        let cancelled = rig.host.cancelled.clone();
        r.cleanup(&mut rig.host);
        assert_eq!(rig.host.controls, controls);
        assert_eq!(rig.host.pending, pending);
        assert_eq!(rig.host.cancelled, cancelled);
        assert!(rig.host.pending.is_empty());
    }

    #[test]
    fn missing_slide_does_not_block_advancing() {
        let mut rig = Rig::default();
        rig.host.missing.insert(ImageKey::new("W1_Images", 2));
        let mut r = manual(true);
        r.start(&mut rig.env());
        r.handle(&Input::Next, &mut rig.env());
        assert_eq!(rig.host.last_drawn(), Some(&ImageKey::new("W1_Images", 1)));
        r.handle(&Input::Next, &mut rig.env());
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1, 3]);
        assert_eq!(r.handle(&Input::Next, &mut rig.env()), Flow::Done);
    }

    #[test]
    fn page_without_controls_falls_back_to_auto_advance() {
        let mut rig = Rig::default();
        rig.host.has_controls = false;
        let mut r = manual(true);
        r.start(&mut rig.env());
        assert!(r.is_auto());
        assert_eq!(rig.host.pending.values().copied().collect::<Vec<_>>(), [2500]);
        assert_eq!(r.handle(&Input::Skip, &mut rig.env()), Flow::Continue);
    }
}
