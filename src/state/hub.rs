//! Station map: every station must be played once, in any order, before the
//! outro runs.

use std::collections::BTreeSet;

use super::script::Script;
use super::{Env, Flow, Input};
use crate::host::{Host, StationMap, StationView};
use crate::model::HubSpec;

#[derive(Debug)]
pub struct Hub {
    spec: HubSpec,
    played: BTreeSet<String>,
    station: Option<(String, Script)>,
    outro: Option<Script>,
    finished: bool,
}

impl Hub {
    pub fn new(spec: HubSpec) -> Self {
        Self {
            spec,
            played: BTreeSet::new(),
            station: None,
            outro: None,
            finished: false,
        }
    }

    pub fn played(&self) -> &BTreeSet<String> {
        &self.played
    }

    pub fn start(&mut self, env: &mut Env<'_>) -> Flow {
        if self.all_played() {
            return self.run_outro(env);
        }
        self.show_map(env.host);
        Flow::Continue
    }

    pub fn handle(&mut self, input: &Input, env: &mut Env<'_>) -> Flow {
        if self.finished {
            return Flow::Continue;
        }
        if let Some(outro) = self.outro.as_mut() {
            let flow = outro.handle(input, env);
            if flow == Flow::Done {
                self.finished = true;
            }
            return flow;
        }
        if let Some((_, script)) = self.station.as_mut() {
            if script.handle(input, env) == Flow::Continue {
                return Flow::Continue;
            }
            return match self.station.take() {
                Some((id, _)) => self.station_finished(id, env),
                None => Flow::Continue,
            };
        }
        match input {
            Input::Station(id) => self.enter(id, env),
            _ => Flow::Continue,
        }
    }

    pub fn cleanup(&mut self, host: &mut dyn Host) {
        if let Some((_, mut script)) = self.station.take() {
            script.cleanup(host);
        }
        if let Some(mut outro) = self.outro.take() {
            outro.cleanup(host);
        }
        host.set_station_map(None);
    }

    fn enter(&mut self, id: &str, env: &mut Env<'_>) -> Flow {
        if self.played.contains(id) {
            log::debug!("station {} already played", id);
            return Flow::Continue;
        }
        let Some(station) = self.spec.stations.iter().find(|s| s.id == id) else {
            log::warn!("unknown station {}", id);
            return Flow::Continue;
        };
        log::info!("entering station {}", id);
        env.host.set_station_map(None);
        env.host.set_canvas_visible(true);
        let mut script = Script::new(station.phases.clone());
        match script.start(env) {
            Flow::Continue => {
                self.station = Some((id.to_string(), script));
                Flow::Continue
            }
            Flow::Done => self.station_finished(id.to_string(), env),
        }
    }

    fn station_finished(&mut self, id: String, env: &mut Env<'_>) -> Flow {
        log::info!("station {} complete", id);
        self.played.insert(id);
        if self.all_played() {
            return self.run_outro(env);
        }
        self.show_map(env.host);
        Flow::Continue
    }

    fn run_outro(&mut self, env: &mut Env<'_>) -> Flow {
        log::info!("all {} stations played", self.spec.stations.len());
        env.host.set_station_map(None);
        env.host.set_canvas_visible(true);
        let mut outro = Script::new(self.spec.outro.clone());
        match outro.start(env) {
            Flow::Continue => {
                self.outro = Some(outro);
                Flow::Continue
            }
            Flow::Done => {
                self.finished = true;
                Flow::Done
            }
        }
    }

    fn all_played(&self) -> bool {
        self.played.len() == self.spec.stations.len()
    }

    fn show_map(&self, host: &mut dyn Host) {
        host.set_canvas_visible(false);
        host.set_station_map(Some(StationMap {
            stations: self
                .spec
                .stations
                .iter()
                .map(|s| StationView {
                    id: s.id.clone(),
                    label: s.label.clone(),
                    played: self.played.contains(&s.id),
                })
                .collect(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, RangeSpec, StationSpec};
    use crate::state::testing::Rig;

    // Each station is a single one-slide range; the outro is another.
    fn hub() -> Hub {
        let station = |id: &str, slide: u32| StationSpec {
            id: id.to_string(),
            label: id.to_uppercase(),
            phases: vec![Phase::Range(RangeSpec::manual("W1_Images", slide, slide, false))],
        };
        Hub::new(HubSpec {
            stations: vec![station("a", 1), station("b", 2), station("c", 3), station("d", 4)],
            outro: vec![Phase::Range(RangeSpec::manual("W1_Images", 142, 142, false))],
        })
    }

    fn play(hub: &mut Hub, rig: &mut Rig, id: &str) -> Flow {
        let entered = hub.handle(&Input::Station(id.to_string()), &mut rig.env());
        assert_eq!(entered, Flow::Continue);
        hub.handle(&Input::Next, &mut rig.env())
    }

    #[test]
    fn any_order_reaches_the_outro_after_the_fourth_station() {
        let mut rig = Rig::default();
        let mut h = hub();
        h.start(&mut rig.env());
        for id in ["c", "a", "d"] {
            assert_eq!(play(&mut h, &mut rig, id), Flow::Continue);
            assert!(!rig.host.drawn_indices("W1_Images").contains(&142));
            assert!(rig.host.map.is_some());
        }
        assert_eq!(play(&mut h, &mut rig, "b"), Flow::Continue);
        assert!(rig.host.map.is_none());
        assert_eq!(rig.host.last_drawn().map(|k| k.index), Some(142));
        assert_eq!(h.handle(&Input::Next, &mut rig.env()), Flow::Done);
        assert_eq!(h.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        let outro_draws = rig
            .host
            .drawn_indices("W1_Images")
            .iter()
            .filter(|i| **i == 142)
            .count();
        assert_eq!(outro_draws, 1);
    }

    #[test]
    fn replaying_a_station_is_a_no_op() {
        let mut rig = Rig::default();
        let mut h = hub();
        h.start(&mut rig.env());
        play(&mut h, &mut rig, "a");
        let drawn = rig.host.drawn.len();
        assert_eq!(
            h.handle(&Input::Station("a".to_string()), &mut rig.env()),
            Flow::Continue
        );
        assert_eq!(rig.host.drawn.len(), drawn);
        assert_eq!(h.played().len(), 1);
        let map = rig.host.map.clone().unwrap();
        assert!(map.stations.iter().find(|s| s.id == "a").unwrap().played);
        assert!(!map.stations.iter().find(|s| s.id == "b").unwrap().played);
    }

    #[test]
    fn station_clicks_are_ignored_while_one_is_running() {
        let mut rig = Rig::default();
        let mut h = hub();
        h.start(&mut rig.env());
        h.handle(&Input::Station("a".to_string()), &mut rig.env());
        h.handle(&Input::Station("b".to_string()), &mut rig.env());
        assert_eq!(rig.host.drawn_indices("W1_Images"), [1]);
        assert_eq!(h.handle(&Input::Next, &mut rig.env()), Flow::Continue);
        assert_eq!(h.played().iter().collect::<Vec<_>>(), ["a"]);
    }

    #[test]
    fn unknown_station_is_ignored() {
        let mut rig = Rig::default();
        let mut h = hub();
        h.start(&mut rig.env());
        assert_eq!(
            h.handle(&Input::Station("pt9".to_string()), &mut rig.env()),
            Flow::Continue
        );
        assert!(h.played().is_empty());
        assert!(rig.host.map.is_some());
    }
}
