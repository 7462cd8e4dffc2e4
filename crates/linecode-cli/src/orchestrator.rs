//! Session orchestration.

use crate::config::SessionConfig;
use anyhow::{Context, Result};
use lib_dsp::psd::SpectralEstimator;
use lib_dsp::theory::{frequency_grid, theoretical_psd};
use lib_dsp::timebase::to_waveform;
use lib_linecode::{compare, render_channel, tile_str, EncodedSignal};
use lib_types::{AnnotationIndex, Channel, Scheme, Spectrum, Waveform};
use serde::Serialize;

/// One displayed trace: samples on a time axis.
#[derive(Clone, Debug, Serialize)]
pub struct Trace {
    pub channel: Channel,
    pub waveform: Waveform,
    pub annotations: AnnotationIndex,
}

impl Trace {
    fn from_signal(signal: EncodedSignal, bits_shown: usize, offset: f64) -> Self {
        Self {
            channel: signal.channel,
            waveform: to_waveform(signal.samples, bits_shown, offset),
            annotations: signal.annotations,
        }
    }

    pub fn label(&self) -> &'static str {
        self.channel.label()
    }
}

/// Empirical and theoretical spectra of one encoded trace.
#[derive(Clone, Debug, Serialize)]
pub struct SpectrumView {
    pub scheme: Scheme,

    /// Samples per bit of the encoded trace; empirical frequencies are in
    /// cycles per sample, so multiply by this for cycles per bit.
    pub samples_per_bit: usize,

    pub empirical: Spectrum,
    pub theoretical: Spectrum,
}

/// Results of a session run.
#[derive(Clone, Debug, Serialize)]
pub struct SessionResults {
    pub name: String,

    /// Bits after tiling the pattern.
    pub bits: String,

    pub amplitude: f64,

    /// Raw input display at 5 V.
    pub input: Trace,

    /// Displayed outputs: one channel, or two in compare mode.
    pub outputs: Vec<Trace>,

    /// Present when spectra are enabled and one encoded channel is shown.
    pub spectrum: Option<SpectrumView>,
}

/// Session orchestrator.
pub struct Orchestrator {
    config: SessionConfig,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(config: SessionConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run the pipeline: tile, encode, time axis, spectra.
    pub fn run(&self) -> Result<SessionResults> {
        tracing::info!("Starting session: {}", self.config.name);

        let bits = tile_str(&self.config.pattern, self.config.bits_shown)
            .with_context(|| format!("Invalid bit pattern {:?}", self.config.pattern))?;
        tracing::info!(
            "Tiled pattern {:?} to {} bits ({} ones, longest zero run {})",
            self.config.pattern,
            bits.len(),
            bits.ones(),
            bits.longest_zero_run()
        );

        let bits_shown = self.config.bits_shown;
        let amplitude = self.config.amplitude();

        let input_signal = render_channel(Channel::Input, &bits, amplitude)?;
        let input = Trace::from_signal(input_signal, bits_shown, 0.0);

        let (outputs, spectrum) = match self.config.compare {
            Some(pair) => {
                let cmp = compare(pair.first, pair.second, &bits, amplitude)
                    .context("Failed to compare schemes")?;
                tracing::info!(
                    "Compared {} and {}: DC difference {:.4} V",
                    pair.first,
                    pair.second,
                    cmp.dc_difference()
                );
                if self.config.spectrum.enabled {
                    tracing::info!("Spectra are not computed in compare mode");
                }
                let outputs = vec![
                    Trace::from_signal(cmp.first, bits_shown, 0.0),
                    Trace::from_signal(cmp.second, bits_shown, 0.0),
                ];
                (outputs, None)
            }
            None => {
                let signal = render_channel(self.config.channel, &bits, amplitude)
                    .with_context(|| format!("Failed to render {}", self.config.channel.label()))?;
                let spectrum = match signal.channel.scheme() {
                    Some(scheme) if self.config.spectrum.enabled => {
                        Some(self.compute_spectrum(scheme, &signal)?)
                    }
                    _ => None,
                };
                let output = Trace::from_signal(signal, bits_shown, 0.0);
                log_annotations(&output);
                (vec![output], spectrum)
            }
        };

        Ok(SessionResults {
            name: self.config.name.clone(),
            bits: bits.to_string(),
            amplitude: amplitude.0,
            input,
            outputs,
            spectrum,
        })
    }

    fn compute_spectrum(&self, scheme: Scheme, signal: &EncodedSignal) -> Result<SpectrumView> {
        let params = &self.config.spectrum;

        let mut estimator = SpectralEstimator::new(self.config.spectrum_config());
        let empirical = estimator
            .estimate(&signal.samples)
            .context("Failed to estimate PSD")?;

        let grid = frequency_grid(params.theory_start, params.theory_stop, params.theory_step)
            .context("Invalid theoretical frequency grid")?;
        let theoretical = theoretical_psd(scheme, &grid)?;

        if let Some(peak) = empirical.peak() {
            tracing::info!(
                "Empirical PSD: {} bins, peak {:.4e} at {:.4} cycles/sample",
                empirical.len(),
                peak.power,
                peak.frequency
            );
        }
        tracing::debug!("Theoretical PSD: {} points", theoretical.len());

        Ok(SpectrumView {
            scheme,
            samples_per_bit: signal.samples_per_bit(),
            empirical,
            theoretical,
        })
    }
}

fn log_annotations(trace: &Trace) {
    if trace.annotations.is_empty() {
        return;
    }
    tracing::info!(
        "{}: {} violation and {} balancing pulses",
        trace.label(),
        trace.annotations.violation.len(),
        trace.annotations.balancing.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{validate_config, CompareConfig};

    fn run(config: SessionConfig) -> SessionResults {
        let config = validate_config(config).unwrap();
        Orchestrator::new(config).unwrap().run().unwrap()
    }

    #[test]
    fn test_default_session() {
        let results = run(SessionConfig::for_pattern("101"));

        assert_eq!(results.bits, "10110110");
        assert_eq!(results.input.waveform.samples, vec![5.0, 0.0, 5.0, 5.0, 0.0, 5.0, 5.0, 0.0]);
        assert_eq!(results.outputs.len(), 1);
        assert_eq!(results.outputs[0].channel, Channel::Encoded(Scheme::UnipolarNrz));

        let spectrum = results.spectrum.unwrap();
        assert_eq!(spectrum.empirical.len(), 2048);
        assert_eq!(spectrum.theoretical.len(), 601);
        assert_eq!(spectrum.samples_per_bit, 1);
    }

    #[test]
    fn test_two_sample_scheme_time_axis() {
        let mut config = SessionConfig::for_pattern("10");
        config.channel = Channel::Encoded(Scheme::Manchester);
        let results = run(config);

        let wf = &results.outputs[0].waveform;
        assert_eq!(wf.len(), 16);
        assert!((wf.dt.0 - 0.5).abs() < 1e-12);
        assert!((wf.duration().0 - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_hdb3_session_carries_annotations() {
        let mut config = SessionConfig::for_pattern("100000001");
        config.channel = Channel::Encoded(Scheme::Hdb3);
        config.bits_shown = 9;
        config.amplitude = 1.0;
        let results = run(config);

        let output = &results.outputs[0];
        assert_eq!(
            output.waveform.samples,
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0]
        );
        assert!(output.annotations.violation.contains(&4));
    }

    #[test]
    fn test_input_channel_has_no_spectrum() {
        let mut config = SessionConfig::for_pattern("1");
        config.channel = Channel::Input;
        let results = run(config);

        assert!(results.spectrum.is_none());
        assert_eq!(results.outputs[0].waveform.samples, results.input.waveform.samples);
    }

    #[test]
    fn test_spectrum_disabled() {
        let mut config = SessionConfig::for_pattern("1100");
        config.spectrum.enabled = false;
        assert!(run(config).spectrum.is_none());
    }

    #[test]
    fn test_compare_mode() {
        let mut config = SessionConfig::for_pattern("1101");
        config.compare = Some(CompareConfig {
            first: Scheme::BipolarAmi,
            second: Scheme::PolarRz,
        });
        let results = run(config);

        assert_eq!(results.outputs.len(), 2);
        assert_eq!(results.outputs[0].label(), "Bipolar AMI");
        assert_eq!(results.outputs[1].waveform.len(), 16);
        assert!(results.spectrum.is_none());
    }

    #[test]
    fn test_run_is_repeatable() {
        let mut config = SessionConfig::for_pattern("0000000011");
        config.channel = Channel::Encoded(Scheme::B8zs);
        config.bits_shown = 20;
        let config = validate_config(config).unwrap();

        let orchestrator = Orchestrator::new(config).unwrap();
        let a = orchestrator.run().unwrap();
        let b = orchestrator.run().unwrap();
        assert_eq!(a.outputs[0].waveform, b.outputs[0].waveform);
        assert_eq!(a.outputs[0].annotations, b.outputs[0].annotations);
    }
}
