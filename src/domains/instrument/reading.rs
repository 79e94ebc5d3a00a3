//! Settings sent to the instrument and readings decoded from it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{InstrumentError, InstrumentResult};

/// A spectral channel reported by the light sensor.
///
/// Variants are declared in wavelength order, so ordered collections keyed by
/// `Channel` iterate from violet to near-infrared with `clear` before `nir`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    #[serde(rename = "415nm")]
    Nm415,
    #[serde(rename = "445nm")]
    Nm445,
    #[serde(rename = "480nm")]
    Nm480,
    #[serde(rename = "515nm")]
    Nm515,
    #[serde(rename = "555nm")]
    Nm555,
    #[serde(rename = "590nm")]
    Nm590,
    #[serde(rename = "630nm")]
    Nm630,
    #[serde(rename = "680nm")]
    Nm680,
    #[serde(rename = "clear")]
    Clear,
    #[serde(rename = "nir")]
    Nir,
}

impl Channel {
    /// Every channel the sensor reports.
    pub const ALL: [Self; 10] = [
        Self::Nm415,
        Self::Nm445,
        Self::Nm480,
        Self::Nm515,
        Self::Nm555,
        Self::Nm590,
        Self::Nm630,
        Self::Nm680,
        Self::Clear,
        Self::Nir,
    ];

    /// Label used by the instrument's JSON body.
    pub fn label(self) -> &'static str {
        match self {
            Self::Nm415 => "415nm",
            Self::Nm445 => "445nm",
            Self::Nm480 => "480nm",
            Self::Nm515 => "515nm",
            Self::Nm555 => "555nm",
            Self::Nm590 => "590nm",
            Self::Nm630 => "630nm",
            Self::Nm680 => "680nm",
            Self::Clear => "clear",
            Self::Nir => "nir",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown channel label: {s}"))
    }
}

/// LED intensities for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSetting {
    #[serde(rename = "R", default)]
    pub red: f64,
    #[serde(rename = "G", default)]
    pub green: f64,
    #[serde(rename = "B", default)]
    pub blue: f64,
}

impl InstrumentSetting {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Green channel only; red and blue stay off.
    pub fn green_only(green: f64) -> Self {
        Self {
            green,
            ..Self::default()
        }
    }

    /// Query fields in the order the endpoint documents them.
    pub fn query(&self) -> [(&'static str, f64); 3] {
        [("R", self.red), ("G", self.green), ("B", self.blue)]
    }
}

/// Sensor intensities keyed by channel, in wavelength order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentReading(BTreeMap<Channel, f64>);

impl InstrumentReading {
    /// Decode an instrument response body.
    ///
    /// The body must be a JSON object with an `out` object mapping channel
    /// labels to numbers. Labels outside the known channel set are skipped.
    pub fn from_body(body: &[u8]) -> InstrumentResult<Self> {
        let value: serde_json::Value = serde_json::from_slice(body)
            .map_err(|e| InstrumentError::decode(format!("JSON parse error: {e}")))?;

        let out = value
            .get("out")
            .and_then(|v| v.as_object())
            .ok_or_else(|| InstrumentError::decode("missing 'out' object"))?;

        let mut channels = BTreeMap::new();
        for (label, raw) in out {
            let Ok(channel) = label.parse::<Channel>() else {
                debug!("Skipping unknown channel label: {}", label);
                continue;
            };
            let intensity = raw.as_f64().ok_or_else(|| {
                InstrumentError::decode(format!("channel '{label}' is not a number: {raw}"))
            })?;
            channels.insert(channel, intensity);
        }

        Ok(Self(channels))
    }

    pub fn get(&self, channel: Channel) -> Option<f64> {
        self.0.get(&channel).copied()
    }

    /// Like `get`, but a missing channel is an error.
    pub fn require(&self, channel: Channel) -> InstrumentResult<f64> {
        self.get(channel).ok_or(InstrumentError::MissingChannel(channel))
    }

    pub fn channels(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Channel, f64)> for InstrumentReading {
    fn from_iter<I: IntoIterator<Item = (Channel, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
