use clap::ValueEnum;
use include_dir::{include_dir, Dir};
use log::warn;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use std::{fs, io, path::Path};

use crate::tokenize::tokenize;

static TEXTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/texts");

const BUILTIN_FILE: &str = "samples.json";

/// Shown in place of a sentence when a difficulty level has nothing to offer
pub const UNAVAILABLE: &str = "No text available for this difficulty level.";

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Sentences to draw tests from, grouped by difficulty
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SampleBank {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl SampleBank {
    /// The placeholder sentences shipped with the binary
    pub fn builtin() -> Self {
        let parsed = TEXTS_DIR
            .get_file(BUILTIN_FILE)
            .and_then(|file| file.contents_utf8())
            .map(serde_json::from_str::<SampleBank>);

        match parsed {
            Some(Ok(bank)) => bank,
            Some(Err(e)) => {
                warn!("built-in samples are malformed: {e}");
                Self::default()
            }
            None => {
                warn!("built-in samples missing: {BUILTIN_FILE}");
                Self::default()
            }
        }
    }

    /// Load a bank from a JSON file shaped like `{"easy": [..], "medium": [..], "hard": [..]}`
    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let bytes = fs::read(path)?;
        serde_json::from_slice(&bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// A bank where every level offers the same single sentence. Text without
    /// any words gives an empty bank, so every level reports [`UNAVAILABLE`].
    pub fn single(text: &str) -> Self {
        if tokenize(text).is_empty() {
            return Self::default();
        }

        let texts = vec![text.to_owned()];
        Self {
            easy: texts.clone(),
            medium: texts.clone(),
            hard: texts,
        }
    }

    pub fn texts(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Pick a sentence for `difficulty`, or [`UNAVAILABLE`] when the level is empty
    pub fn random_text<R: Rng + ?Sized>(&self, difficulty: Difficulty, rng: &mut R) -> &str {
        self.texts(difficulty)
            .choose(rng)
            .map(String::as_str)
            .unwrap_or(UNAVAILABLE)
    }
}
