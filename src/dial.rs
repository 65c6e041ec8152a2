use crate::config::DialConfig;
use crate::error::DialError;
use log::{debug, warn};
use std::collections::HashSet;

/// Wraps `raw` into the inclusive range `min..=max`.
///
/// Uses the Euclidean remainder over a span of `max - min + 1`, so negative
/// inputs wrap from the top (`min - 1` becomes `max`) and inputs past the top
/// wrap back to `min`. The arithmetic runs in `i128` so no `i64` input can
/// overflow.
pub fn wrap_value(raw: i64, min: i64, max: i64) -> i64 {
    let span = max as i128 - min as i128 + 1;
    let offset = (raw as i128 - min as i128).rem_euclid(span);
    (offset + min as i128) as i64
}

// A single named gauge with inclusive bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dial {
    name: String,
    unit: String,
    min: i64,
    max: i64,
    value: i64,
}

impl Dial {
    /// Creates a dial resting at its minimum. Fails if `min >= max`.
    pub fn new(
        name: impl Into<String>,
        min: i64,
        max: i64,
        unit: impl Into<String>,
    ) -> Result<Self, DialError> {
        let name = name.into();
        if min >= max {
            return Err(DialError::InvalidBounds { name, min, max });
        }
        Ok(Self {
            name,
            unit: unit.into(),
            min,
            max,
            value: min,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    // Normalizes and stores, returning what was stored
    fn store(&mut self, raw: i64) -> i64 {
        self.value = wrap_value(raw, self.min, self.max);
        self.value
    }
}

type DialObserver = Box<dyn FnMut(&Dial)>;

/// The set of dials shown on the panel.
///
/// Every successful mutation is reported to the registered observers, in
/// registration order, after the new value has been stored.
#[derive(Default)]
pub struct DialModel {
    dials: Vec<Dial>,
    observers: Vec<DialObserver>,
}

impl std::fmt::Debug for DialModel {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("DialModel")
            .field("dials", &self.dials)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DialModel {
    /// Builds a model from already constructed dials. Names must be unique.
    pub fn new(dials: Vec<Dial>) -> Result<Self, DialError> {
        let mut seen = HashSet::new();
        for dial in &dials {
            if !seen.insert(dial.name.as_str()) {
                return Err(DialError::DuplicateDial(dial.name.clone()));
            }
        }
        Ok(Self {
            dials,
            observers: Vec::new(),
        })
    }

    /// Builds a model from the dial definitions in the configuration.
    pub fn from_config(configs: &[DialConfig]) -> Result<Self, DialError> {
        let dials = configs
            .iter()
            .map(|c| Dial::new(c.name.clone(), c.min, c.max, c.unit.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dials)
    }

    /// Registers a callback run after every successful mutation.
    pub fn subscribe(&mut self, observer: impl FnMut(&Dial) + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn get(&self, name: &str) -> Option<&Dial> {
        self.dials.iter().find(|d| d.name == name)
    }

    pub fn value(&self, name: &str) -> Option<i64> {
        self.get(name).map(Dial::value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dial> {
        self.dials.iter()
    }

    pub fn len(&self) -> usize {
        self.dials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dials.is_empty()
    }

    /// Wraps `raw` into the dial's range, stores it and notifies observers.
    ///
    /// Out of range values are never rejected. The only failure is an
    /// unknown dial name, in which case nothing changes.
    pub fn set_value(&mut self, name: &str, raw: i64) -> Result<i64, DialError> {
        let dial = self
            .dials
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| DialError::UnknownDial(name.to_string()))?;

        let stored = dial.store(raw);
        if stored != raw {
            debug!("Dial '{}': wrapped {} to {}", name, raw, stored);
        }

        let dial = &*dial;
        for observer in self.observers.iter_mut() {
            observer(dial);
        }
        Ok(stored)
    }

    /// Manual entry path: parses `text` as an integer then behaves like
    /// [`DialModel::set_value`].
    ///
    /// A parse failure leaves the prior value in place and notifies nobody.
    pub fn set_value_text(&mut self, name: &str, text: &str) -> Result<i64, DialError> {
        if self.get(name).is_none() {
            return Err(DialError::UnknownDial(name.to_string()));
        }
        let trimmed = text.trim();
        let raw = trimmed.parse::<i64>().map_err(|source| {
            warn!("Dial '{}': ignoring non-numeric entry '{}'", name, trimmed);
            DialError::Parse {
                input: trimmed.to_string(),
                source,
            }
        })?;
        self.set_value(name, raw)
    }
}
