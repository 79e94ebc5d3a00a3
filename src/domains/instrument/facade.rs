//! The four instrument shapes as projections over one fetch.
//!
//! | variant          | inputs  | output                    |
//! |------------------|---------|---------------------------|
//! | `GreenMachine1`  | G       | 515nm                     |
//! | `GreenMachine3`  | G       | [630nm, 515nm, 445nm]     |
//! | `Rgb`            | R, G, B | [630nm, 515nm, 445nm]     |
//! | `Light`          | R, G, B | every channel             |

use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::InstrumentResult;
use super::fetcher::{Fetcher, HttpFetcher};
use super::reading::{Channel, InstrumentReading, InstrumentSetting};
use super::retry::RetryPolicy;

/// Channels reported by the three-output variants, red to blue.
pub const RGB_CHANNELS: [Channel; 3] = [Channel::Nm630, Channel::Nm515, Channel::Nm445];

/// Channel reported by the single-output variant.
pub const GREEN_CHANNEL: Channel = Channel::Nm515;

/// Which instrument shape a call emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallVariant {
    GreenMachine1,
    GreenMachine3,
    Rgb,
    Light,
}

/// What a variant returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Single(f64),
    Triple([f64; 3]),
    Full(InstrumentReading),
}

impl CallVariant {
    /// Restrict a setting to the inputs this variant exposes.
    pub fn constrain(self, setting: InstrumentSetting) -> InstrumentSetting {
        match self {
            Self::GreenMachine1 | Self::GreenMachine3 => {
                InstrumentSetting::green_only(setting.green)
            }
            Self::Rgb | Self::Light => setting,
        }
    }

    /// Apply this variant's projection to a reading.
    pub fn project(self, reading: InstrumentReading) -> InstrumentResult<Projection> {
        match self {
            Self::GreenMachine1 => reading.require(GREEN_CHANNEL).map(Projection::Single),
            Self::GreenMachine3 | Self::Rgb => triple(&reading).map(Projection::Triple),
            Self::Light => Ok(Projection::Full(reading)),
        }
    }
}

/// Client for the remote instrument.
///
/// Every call is one retried fetch followed by a projection. Projection
/// failures are not retried.
pub struct Instrument<F = HttpFetcher> {
    fetcher: Arc<F>,
    policy: RetryPolicy,
}

impl<F> Clone for Instrument<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            policy: self.policy,
        }
    }
}

impl Default for Instrument<HttpFetcher> {
    fn default() -> Self {
        Self::new(HttpFetcher::default(), RetryPolicy::default())
    }
}

impl<F: Fetcher> Instrument<F> {
    pub fn new(fetcher: F, policy: RetryPolicy) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            policy,
        }
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Set the LEDs and read the sensor, retrying per the policy.
    pub fn fetch(&self, setting: InstrumentSetting) -> InstrumentResult<InstrumentReading> {
        self.policy.run(|attempt| {
            debug!("Fetching reading (attempt {})", attempt);
            self.fetcher.fetch_once(&setting)
        })
    }

    /// Run `variant` with `setting`.
    #[instrument(skip(self))]
    pub fn call(
        &self,
        variant: CallVariant,
        setting: InstrumentSetting,
    ) -> InstrumentResult<Projection> {
        let reading = self.fetch(variant.constrain(setting))?;
        variant.project(reading)
    }

    /// One input, one output: the 515nm intensity for a green setting.
    pub fn green_machine_1(&self, green: f64) -> InstrumentResult<f64> {
        let setting = InstrumentSetting::green_only(green);
        match self.call(CallVariant::GreenMachine1, setting)? {
            Projection::Single(value) => Ok(value),
            other => unreachable!("GreenMachine1 projected to {other:?}"),
        }
    }

    /// One input, three outputs: 630nm, 515nm, 445nm for a green setting.
    pub fn green_machine_3(&self, green: f64) -> InstrumentResult<[f64; 3]> {
        let setting = InstrumentSetting::green_only(green);
        match self.call(CallVariant::GreenMachine3, setting)? {
            Projection::Triple(values) => Ok(values),
            other => unreachable!("GreenMachine3 projected to {other:?}"),
        }
    }

    /// Three inputs, three outputs: 630nm, 515nm, 445nm.
    pub fn rgb(&self, red: f64, green: f64, blue: f64) -> InstrumentResult<[f64; 3]> {
        let setting = InstrumentSetting::new(red, green, blue);
        match self.call(CallVariant::Rgb, setting)? {
            Projection::Triple(values) => Ok(values),
            other => unreachable!("Rgb projected to {other:?}"),
        }
    }

    /// Three inputs, every channel.
    pub fn light(&self, red: f64, green: f64, blue: f64) -> InstrumentResult<InstrumentReading> {
        let setting = InstrumentSetting::new(red, green, blue);
        match self.call(CallVariant::Light, setting)? {
            Projection::Full(reading) => Ok(reading),
            other => unreachable!("Light projected to {other:?}"),
        }
    }
}

fn triple(reading: &InstrumentReading) -> InstrumentResult<[f64; 3]> {
    let [red, green, blue] = RGB_CHANNELS;
    Ok([
        reading.require(red)?,
        reading.require(green)?,
        reading.require(blue)?,
    ])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domains::instrument::error::InstrumentError;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Fetcher that replays scripted outcomes and records what it was asked.
    #[derive(Default)]
    pub(crate) struct ScriptedFetcher {
        outcomes: Mutex<VecDeque<InstrumentResult<InstrumentReading>>>,
        pub(crate) seen: Mutex<Vec<InstrumentSetting>>,
    }

    impl ScriptedFetcher {
        pub(crate) fn new(outcomes: Vec<InstrumentResult<InstrumentReading>>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                seen: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn calls(&self) -> usize {
            self.seen.lock().unwrap().len()
        }
    }

    impl Fetcher for ScriptedFetcher {
        fn fetch_once(&self, setting: &InstrumentSetting) -> InstrumentResult<InstrumentReading> {
            self.seen.lock().unwrap().push(*setting);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(InstrumentError::request("script exhausted")))
        }
    }

    /// A reading whose value for each channel is its position in `Channel::ALL`.
    pub(crate) fn full_reading() -> InstrumentReading {
        Channel::ALL
            .into_iter()
            .enumerate()
            .map(|(i, c)| (c, i as f64))
            .collect()
    }

    fn instrument(
        outcomes: Vec<InstrumentResult<InstrumentReading>>,
    ) -> Instrument<ScriptedFetcher> {
        Instrument::new(
            ScriptedFetcher::new(outcomes),
            RetryPolicy::new(3, Duration::ZERO),
        )
    }

    #[test]
    fn test_green_machine_1_returns_515nm() {
        let instrument = instrument(vec![Ok(full_reading())]);
        assert_eq!(instrument.green_machine_1(0.7).unwrap(), 3.0);

        let seen = instrument.fetcher.seen.lock().unwrap();
        assert_eq!(seen[0], InstrumentSetting::new(0.0, 0.7, 0.0));
    }

    #[test]
    fn test_green_machine_1_missing_channel() {
        let reading: InstrumentReading = [(Channel::Nm630, 1.0)].into_iter().collect();
        let instrument = instrument(vec![Ok(reading)]);

        let err = instrument.green_machine_1(0.5).unwrap_err();
        assert!(matches!(err, InstrumentError::MissingChannel(Channel::Nm515)));
        // Projection errors are not retried.
        assert_eq!(instrument.fetcher.calls(), 1);
    }

    #[test]
    fn test_three_output_variants_keep_red_green_blue_order() {
        let gm3 = instrument(vec![Ok(full_reading())]);
        assert_eq!(gm3.green_machine_3(0.1).unwrap(), [6.0, 3.0, 1.0]);

        let rgb = instrument(vec![Ok(full_reading())]);
        assert_eq!(rgb.rgb(1.0, 0.0, 0.5).unwrap(), [6.0, 3.0, 1.0]);
        let seen = rgb.fetcher.seen.lock().unwrap();
        assert_eq!(seen[0], InstrumentSetting::new(1.0, 0.0, 0.5));
    }

    #[test]
    fn test_light_returns_every_channel() {
        let instrument = instrument(vec![Ok(full_reading())]);
        let reading = instrument.light(0.2, 0.4, 0.6).unwrap();

        let channels: Vec<_> = reading.channels().map(|(c, _)| c).collect();
        assert_eq!(channels, Channel::ALL.to_vec());
    }

    #[test]
    fn test_fetch_recovers_on_third_attempt() {
        let instrument = instrument(vec![
            Err(InstrumentError::Status(502)),
            Err(InstrumentError::decode("truncated")),
            Ok(full_reading()),
        ]);

        let reading = instrument.light(0.0, 0.0, 0.0).unwrap();
        assert_eq!(reading, full_reading());
        assert_eq!(instrument.fetcher.calls(), 3);
    }

    #[test]
    fn test_fetch_gives_up_after_three_attempts() {
        let instrument = instrument(vec![
            Err(InstrumentError::Status(502)),
            Err(InstrumentError::Status(502)),
            Err(InstrumentError::decode("truncated")),
            Ok(full_reading()),
        ]);

        let err = instrument.rgb(0.5, 0.5, 0.5).unwrap_err();
        assert!(matches!(err, InstrumentError::Unavailable { attempts: 3, .. }));
        assert_eq!(instrument.fetcher.calls(), 3);
    }

    #[test]
    fn test_call_dispatches_projection() {
        let instrument = instrument((0..4).map(|_| Ok(full_reading())).collect());
        let setting = InstrumentSetting::new(0.9, 0.3, 0.9);

        let cases = [
            (CallVariant::GreenMachine1, Projection::Single(3.0)),
            (CallVariant::GreenMachine3, Projection::Triple([6.0, 3.0, 1.0])),
            (CallVariant::Rgb, Projection::Triple([6.0, 3.0, 1.0])),
            (CallVariant::Light, Projection::Full(full_reading())),
        ];
        for (variant, expected) in cases {
            assert_eq!(instrument.call(variant, setting).unwrap(), expected, "{variant:?}");
        }

        let seen = instrument.fetcher.seen.lock().unwrap();
        assert_eq!(
            *seen,
            [
                InstrumentSetting::green_only(0.3),
                InstrumentSetting::green_only(0.3),
                setting,
                setting,
            ]
        );
    }

    #[test]
    fn test_variants_over_http() {
        use crate::domains::instrument::fetcher::tests::{FULL_BODY, serve};

        let (url, server) = serve(vec![(500, "{}"), (200, FULL_BODY)]);
        let instrument = Instrument::new(
            HttpFetcher::new(url, Duration::from_secs(5)),
            RetryPolicy::new(3, Duration::ZERO),
        );

        assert_eq!(instrument.green_machine_3(0.5).unwrap(), [7.0, 4.0, 2.0]);
        assert_eq!(server.join().unwrap().len(), 2);
    }
}
