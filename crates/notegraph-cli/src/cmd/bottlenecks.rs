//! `notegraph bottlenecks`: notes that many shortest paths squeeze through.

use std::path::Path;

use clap::Args;
use notegraph_analytics::paths::{Bottleneck, PathConfig, find_bottlenecks};
use notegraph_core::ErrorCode;
use serde::Serialize;

use super::{CorpusArgs, fail, load_project};
use crate::output::{CliError, OutputMode, fmt_score, pretty_section, render_mode};

#[derive(Args, Debug)]
pub struct BottlenecksArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Minimum normalized betweenness, in [0, 1] (overrides
    /// `[paths] bottleneck_threshold`).
    #[arg(long, value_name = "T")]
    pub threshold: Option<f64>,
}

/// Output of `notegraph bottlenecks`.
#[derive(Debug, Serialize)]
pub struct BottlenecksOutput {
    pub threshold: f64,
    pub bottlenecks: Vec<Bottleneck>,
}

/// Execute `notegraph bottlenecks`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded, the threshold is out
/// of range, or output fails.
pub fn run_bottlenecks(
    args: &BottlenecksArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;

    let threshold = args
        .threshold
        .unwrap_or_else(|| PathConfig::from(&project.config.paths).bottleneck_threshold);
    if !(0.0..=1.0).contains(&threshold) {
        return fail(
            output,
            &CliError::from_code(
                ErrorCode::InvalidParameter,
                format!("threshold {threshold} is outside [0, 1]"),
            )
            .with_suggestion("betweenness is normalized; try a value such as 0.1"),
        );
    }

    let result = BottlenecksOutput {
        threshold,
        bottlenecks: find_bottlenecks(&project.graph, threshold),
    };

    render_mode(
        output,
        &result,
        |r, w| {
            for b in &r.bottlenecks {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}",
                    b.id,
                    fmt_score(b.betweenness),
                    b.degree,
                    b.impact
                )?;
            }
            Ok(())
        },
        |r, w| {
            pretty_section(
                w,
                &format!(
                    "{} bottlenecks (betweenness ≥ {})",
                    r.bottlenecks.len(),
                    r.threshold
                ),
            )?;
            for b in &r.bottlenecks {
                writeln!(
                    w,
                    "  {:<40} {:>10.4}  degree {:>3}  impact {}",
                    project.graph.title(&b.id),
                    b.betweenness,
                    b.degree,
                    b.impact
                )?;
            }
            Ok(())
        },
    )
}
