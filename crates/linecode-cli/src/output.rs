//! Result output formatting and writing.

use crate::config::OutputConfig;
use crate::orchestrator::{SessionResults, SpectrumView, Trace};
use crate::OutputFormat;
use anyhow::{Context, Result};
use lib_types::{Channel, PulseMark, Spectrum};
use std::io::Write;
use std::path::Path;

fn mark_name(mark: Option<PulseMark>) -> &'static str {
    match mark {
        Some(PulseMark::Violation) => "V",
        Some(PulseMark::Balancing) => "B",
        None => "",
    }
}

/// Write one trace as `time,volts,mark` rows.
fn write_trace_csv(w: &mut impl Write, trace: &Trace) -> Result<()> {
    writeln!(w, "time_bits,volts,mark")?;
    for (i, (t, v)) in trace
        .waveform
        .times()
        .into_iter()
        .zip(&trace.waveform.samples)
        .enumerate()
    {
        writeln!(w, "{},{},{}", t, v, mark_name(trace.annotations.mark(i)))?;
    }
    Ok(())
}

/// Write a spectrum as `frequency,power` rows, with the frequency also
/// expressed per bit when `samples_per_bit` is given.
fn write_spectrum_csv(w: &mut impl Write, spectrum: &Spectrum, samples_per_bit: Option<usize>) -> Result<()> {
    match samples_per_bit {
        Some(k) => {
            writeln!(w, "cycles_per_sample,cycles_per_bit,power")?;
            for p in spectrum.points() {
                writeln!(w, "{},{},{}", p.frequency, p.frequency * k as f64, p.power)?;
            }
        }
        None => {
            writeln!(w, "cycles_per_bit,power")?;
            for p in spectrum.points() {
                writeln!(w, "{},{}", p.frequency, p.power)?;
            }
        }
    }
    Ok(())
}

fn write_annotations(w: &mut impl Write, outputs: &[Trace], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for trace in outputs {
                writeln!(w, "{}", trace.label())?;
                if trace.annotations.is_empty() {
                    writeln!(w, "  (none)")?;
                }
                for (index, mark) in trace.annotations.iter() {
                    let t = trace.waveform.time_at(index).0;
                    writeln!(w, "  sample {:>4}  t={:<8.3} {:?}", index, t, mark)?;
                }
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = outputs
                .iter()
                .map(|trace| {
                    serde_json::json!({
                        "channel": trace.channel,
                        "violation": trace.annotations.violation,
                        "balancing": trace.annotations.balancing,
                    })
                })
                .collect();
            writeln!(w, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            writeln!(w, "channel,sample,time_bits,mark")?;
            for trace in outputs {
                for (index, mark) in trace.annotations.iter() {
                    writeln!(
                        w,
                        "{},{},{},{}",
                        trace.channel.name(),
                        index,
                        trace.waveform.time_at(index).0,
                        mark_name(Some(mark))
                    )?;
                }
            }
        }
    }
    Ok(())
}

/// The input trace followed by every output that is not the input again.
fn distinct_traces(results: &SessionResults) -> impl Iterator<Item = &Trace> {
    std::iter::once(&results.input).chain(
        results
            .outputs
            .iter()
            .filter(|t| t.channel != Channel::Input),
    )
}

fn write_summary(w: &mut impl Write, results: &SessionResults) -> Result<()> {
    writeln!(w, "Line Coding Session: {}", results.name)?;
    writeln!(w, "====================")?;
    writeln!(w, "Bits:      {}", results.bits)?;
    writeln!(w, "Amplitude: {:.2} V", results.amplitude)?;
    writeln!(w)?;

    for trace in distinct_traces(results) {
        let wf = &trace.waveform;
        writeln!(w, "{}:", trace.label())?;
        writeln!(w, "  Samples:     {}", wf.len())?;
        writeln!(w, "  Duration:    {:.2} bits", wf.duration().0)?;
        writeln!(w, "  Mean (DC):   {:.4} V", wf.mean())?;
        writeln!(w, "  RMS:         {:.4} V", wf.rms())?;
        writeln!(w, "  Peak-peak:   {:.4} V", wf.peak_to_peak())?;
        writeln!(w, "  Transitions: {}", wf.transitions())?;
        if !trace.annotations.is_empty() {
            writeln!(
                w,
                "  Substitutions: {} V, {} B",
                trace.annotations.violation.len(),
                trace.annotations.balancing.len()
            )?;
        }
    }

    if let Some(view) = &results.spectrum {
        write_spectrum_summary(w, view)?;
    }

    Ok(())
}

fn write_spectrum_summary(w: &mut impl Write, view: &SpectrumView) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "Spectrum ({}):", view.scheme)?;
    writeln!(w, "  Empirical bins:     {}", view.empirical.len())?;
    writeln!(w, "  Empirical power:    {:.4e}", view.empirical.total_power())?;
    if let Some(peak) = view.empirical.peak() {
        writeln!(
            w,
            "  Empirical peak:     {:.4e} at {:.4} cycles/bit",
            peak.power,
            peak.frequency * view.samples_per_bit as f64
        )?;
    }
    writeln!(w, "  Theoretical points: {}", view.theoretical.len())?;
    if let Some(dc) = view.theoretical.power_near(0.0) {
        writeln!(w, "  Theoretical DC:     {:.4}", dc)?;
    }
    Ok(())
}

/// Write session results to an output directory.
pub fn write_results(
    results: &SessionResults,
    output_dir: &Path,
    format: OutputFormat,
    selection: &OutputConfig,
) -> Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {:?}", output_dir))?;

    if selection.waveforms {
        for trace in distinct_traces(results) {
            let path = output_dir.join(format!("waveform_{}.csv", trace.channel.name()));
            let mut f = std::fs::File::create(&path)?;
            write_trace_csv(&mut f, trace)?;
            tracing::info!("Wrote {} waveform to {:?}", trace.label(), path);
        }
    }

    if selection.annotations && results.outputs.iter().any(|t| !t.annotations.is_empty()) {
        let extension = match format {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        };
        let path = output_dir.join(format!("annotations.{extension}"));
        let mut f = std::fs::File::create(&path)?;
        write_annotations(&mut f, &results.outputs, format)?;
        tracing::info!("Wrote annotations to {:?}", path);
    }

    if selection.spectrum {
        if let Some(view) = &results.spectrum {
            let path = output_dir.join("psd_empirical.csv");
            let mut f = std::fs::File::create(&path)?;
            write_spectrum_csv(&mut f, &view.empirical, Some(view.samples_per_bit))?;
            tracing::info!("Wrote empirical PSD to {:?} ({} bins)", path, view.empirical.len());

            let path = output_dir.join("psd_theoretical.csv");
            let mut f = std::fs::File::create(&path)?;
            write_spectrum_csv(&mut f, &view.theoretical, None)?;
            tracing::info!("Wrote theoretical PSD to {:?}", path);
        }
    }

    match format {
        OutputFormat::Json => {
            let path = output_dir.join("results.json");
            let mut f = std::fs::File::create(&path)?;
            writeln!(f, "{}", serde_json::to_string_pretty(results)?)?;
            tracing::info!("Wrote results to {:?}", path);
        }
        OutputFormat::Text | OutputFormat::Csv => {
            let path = output_dir.join("summary.txt");
            let mut f = std::fs::File::create(&path)?;
            write_summary(&mut f, results)?;
            tracing::info!("Wrote summary to {:?}", path);
        }
    }

    Ok(())
}

/// Print results to stdout.
pub fn print_results(results: &SessionResults, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => {
            writeln!(out)?;
            write_summary(&mut out, results)?;
            if results.outputs.iter().any(|t| !t.annotations.is_empty()) {
                writeln!(out)?;
                writeln!(out, "Annotations:")?;
                write_annotations(&mut out, &results.outputs, format)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(results)?)?;
        }
        OutputFormat::Csv => {
            for trace in &results.outputs {
                writeln!(out, "# {}", trace.label())?;
                write_trace_csv(&mut out, trace)?;
            }
        }
    }

    Ok(())
}

/// Print only the spectra of a session.
pub fn print_spectrum(view: &SpectrumView, theory: bool, format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => write_spectrum_summary(&mut out, view)?,
        OutputFormat::Json => {
            let json = if theory {
                serde_json::to_value(view)?
            } else {
                serde_json::json!({
                    "scheme": view.scheme,
                    "samples_per_bit": view.samples_per_bit,
                    "empirical": view.empirical,
                })
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            write_spectrum_csv(&mut out, &view.empirical, Some(view.samples_per_bit))?;
            if theory {
                writeln!(out)?;
                write_spectrum_csv(&mut out, &view.theoretical, None)?;
            }
        }
    }

    Ok(())
}

/// Print the scheme table.
pub fn print_schemes(format: OutputFormat) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Text => {
            writeln!(out, "{:>2}  {:<16} {:<16} samples/bit", "id", "name", "label")?;
            for scheme in lib_types::Scheme::ALL {
                writeln!(
                    out,
                    "{:>2}  {:<16} {:<16} {}",
                    scheme.id(),
                    scheme.name(),
                    scheme.label(),
                    scheme.samples_per_bit()
                )?;
            }
        }
        OutputFormat::Json => {
            let json: Vec<_> = lib_types::Scheme::ALL
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id(),
                        "name": s.name(),
                        "label": s.label(),
                        "samples_per_bit": s.samples_per_bit(),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        OutputFormat::Csv => {
            writeln!(out, "id,name,label,samples_per_bit")?;
            for s in lib_types::Scheme::ALL {
                writeln!(out, "{},{},{},{}", s.id(), s.name(), s.label(), s.samples_per_bit())?;
            }
        }
    }

    Ok(())
}
