use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Handle naming the voice an event is addressed to
///
/// The voice model itself lives with the playback backend; patterns only
/// carry the name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
}

impl Voice {
    pub fn new(name: impl Into<String>) -> Self {
        Voice { name: name.into() }
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Named float parameters carried by note and change events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Params(BTreeMap<String, f64>);

impl Params {
    pub fn new() -> Self {
        Params(BTreeMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: f64) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn remove(&mut self, key: &str) -> Option<f64> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Copy every parameter of `other` into `self`, overriding existing keys
    pub fn merge(&mut self, other: &Params) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), *v);
        }
    }

    /// Merge a list of parameter sets; later sets win
    pub fn merged<'a>(sets: impl IntoIterator<Item = &'a Params>) -> Params {
        let mut res = Params::new();
        for set in sets {
            res.merge(set);
        }
        res
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Params(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Discriminant of an [`Event`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    NoteOn,
    NoteOff,
    Change,
    Tempo,
    Start,
    End,
}

/// A single schedulable action
///
/// Events kept inside patterns are templates. Each time a pattern places one
/// on a timeline it places a clone, so no two timeline positions ever share
/// payload state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    NoteOn { voice: Voice, params: Params },
    NoteOff { voice: Voice },
    Change { voice: Voice, params: Params },
    Tempo { bpm: f64 },
    Start,
    End,
}

impl Event {
    pub fn on(voice: &Voice, params: Params) -> Self {
        Event::NoteOn {
            voice: voice.clone(),
            params,
        }
    }

    pub fn off(voice: &Voice) -> Self {
        Event::NoteOff {
            voice: voice.clone(),
        }
    }

    pub fn change(voice: &Voice, params: Params) -> Self {
        Event::Change {
            voice: voice.clone(),
            params,
        }
    }

    pub fn bpm(bpm: f64) -> Self {
        Event::Tempo { bpm }
    }

    pub fn start() -> Self {
        Event::Start
    }

    pub fn end() -> Self {
        Event::End
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Event::NoteOn { .. } => EventKind::NoteOn,
            Event::NoteOff { .. } => EventKind::NoteOff,
            Event::Change { .. } => EventKind::Change,
            Event::Tempo { .. } => EventKind::Tempo,
            Event::Start => EventKind::Start,
            Event::End => EventKind::End,
        }
    }

    pub fn voice(&self) -> Option<&Voice> {
        match self {
            Event::NoteOn { voice, .. }
            | Event::NoteOff { voice }
            | Event::Change { voice, .. } => {
                Some(voice)
            }
            _ => None,
        }
    }

    pub fn params(&self) -> Option<&Params> {
        match self {
            Event::NoteOn { params, .. } | Event::Change { params, .. } => Some(params),
            _ => None,
        }
    }

    pub fn params_mut(&mut self) -> Option<&mut Params> {
        match self {
            Event::NoteOn { params, .. } | Event::Change { params, .. } => Some(params),
            _ => None,
        }
    }

    /// Tempo carried by a tempo-change event
    pub fn tempo(&self) -> Option<f64> {
        match self {
            Event::Tempo { bpm } => Some(*bpm),
            _ => None,
        }
    }

    pub fn is_end(&self) -> bool {
        matches!(self, Event::End)
    }
}
