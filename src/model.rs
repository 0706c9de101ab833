//! Course description types.
//! The whole course (asset folders, steps and their phases, quiz keys) is data,
//! deserialized from `assets/course.json`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::GameError;

const BUILTIN_COURSE: &str = include_str!("../assets/course.json");

/// Address of one slide image: `./{folder}/{index}.png`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ImageKey {
    pub folder: String,
    pub index: u32,
}

impl ImageKey {
    pub fn new(folder: impl Into<String>, index: u32) -> Self {
        Self {
            folder: folder.into(),
            index,
        }
    }

    pub fn path(&self) -> String {
        format!("./{}/{}.png", self.folder, self.index)
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.folder, self.index)
    }
}

/// Answer space of the keyed quiz.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    /// Physical keys `1..=4` map to `A..=D`; anything else is not a choice.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "1" => Some(Choice::A),
            "2" => Some(Choice::B),
            "3" => Some(Choice::C),
            "4" => Some(Choice::D),
            _ => None,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A contiguous, inclusive block of numbered slides in one folder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub folder: String,
    pub start: u32,
    pub end: u32,
    #[serde(default = "default_true")]
    pub allow_skip: bool,
    /// Zero means manual (prev/next/skip) control.
    #[serde(default)]
    pub auto_delay_ms: u32,
}

impl RangeSpec {
    pub fn manual(folder: impl Into<String>, start: u32, end: u32, allow_skip: bool) -> Self {
        Self {
            folder: folder.into(),
            start,
            end,
            allow_skip,
            auto_delay_ms: 0,
        }
    }

    pub fn auto(folder: impl Into<String>, start: u32, end: u32, delay_ms: u32) -> Self {
        Self {
            folder: folder.into(),
            start,
            end,
            allow_skip: false,
            auto_delay_ms: delay_ms,
        }
    }

    pub fn image(&self, index: u32) -> ImageKey {
        ImageKey::new(self.folder.clone(), index)
    }
}

/// Yes/no prompt: "yes" plays the lesson range first, "no" goes straight on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSpec {
    pub prompt: ImageKey,
    pub lesson: RangeSpec,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedQuestion {
    pub prompt: u32,
    pub answer: Choice,
    pub wrong: u32,
    #[serde(default)]
    pub correct: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyedQuizSpec {
    pub folder: String,
    /// `None` means wrong answers never exhaust the quiz.
    #[serde(default)]
    pub health: Option<u32>,
    pub questions: Vec<KeyedQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuestion {
    pub prompt: u32,
    /// Exact, case-sensitive accepted spellings.
    pub accepted: Vec<String>,
    pub correct: u32,
    pub wrong: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextQuizSpec {
    pub id: String,
    pub folder: String,
    pub health: u32,
    /// A completed one-shot quiz is skipped if the session enters it again.
    #[serde(default)]
    pub one_shot: bool,
    pub questions: Vec<TextQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSpec {
    pub id: String,
    pub label: String,
    pub phases: Vec<Phase>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HubSpec {
    pub stations: Vec<StationSpec>,
    pub outro: Vec<Phase>,
}

/// One sequential part of a step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    Video { src: String },
    Range(RangeSpec),
    Branch(BranchSpec),
    KeyedQuiz(KeyedQuizSpec),
    TextQuiz(TextQuizSpec),
    Hub(HubSpec),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSpec {
    pub name: String,
    /// Free-form remark for content authors, logged when the step starts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub phases: Vec<Phase>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFolder {
    pub name: String,
    pub count: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub start_image: ImageKey,
    pub folders: Vec<AssetFolder>,
    pub steps: Vec<StepSpec>,
}

impl Course {
    pub fn from_json(raw: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The course shipped with the binary.
    pub fn builtin() -> Result<Self, GameError> {
        Self::from_json(BUILTIN_COURSE)
    }

    /// Every image the course may draw, folder by folder, in index order.
    pub fn image_keys(&self) -> impl Iterator<Item = ImageKey> + '_ {
        self.folders
            .iter()
            .flat_map(|f| (1..=f.count).map(move |i| ImageKey::new(f.name.clone(), i)))
    }
}
