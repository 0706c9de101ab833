use super::{Env, Flow, Input};
use crate::host::{Host, SlideControls};

/// Full-screen video; finishes on the player's end-of-playback event.
#[derive(Debug)]
pub struct VideoPlayback {
    src: String,
    playing: bool,
}

impl VideoPlayback {
    pub fn new(src: String) -> Self {
        Self {
            src,
            playing: false,
        }
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        env.host.set_canvas_visible(false);
        env.host.set_station_map(None);
        env.host.set_slide_controls(SlideControls::HIDDEN);
        env.host.play_video(&self.src);
        self.playing = true;
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        match input {
            Input::VideoEnded if self.playing => {
                self.cleanup(env.host);
                Flow::Done
            }
            _ => Flow::Continue,
        }
    }

    pub fn cleanup(&mut self, host: &mut dyn Host) {
        if self.playing {
            self.playing = false;
            host.stop_video();
            host.set_canvas_visible(true);
        }
    }
}
