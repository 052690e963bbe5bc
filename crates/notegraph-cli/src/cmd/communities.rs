//! `notegraph communities`: detect communities and summarize each one.

use std::path::Path;

use clap::{Args, ValueEnum};
use notegraph_analytics::community::{
    CommunityConfig, analyze_communities, detect_communities, modularity,
};
use notegraph_analytics::report::CommunitySummary;
use notegraph_core::config::CommunityMethod;

use super::{CorpusArgs, load_project};
use crate::output::{OutputMode, fmt_score, pretty_kv, pretty_section, render_mode};

/// Detection algorithm, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Louvain,
    LabelPropagation,
}

impl From<MethodArg> for CommunityMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Louvain => Self::Louvain,
            MethodArg::LabelPropagation => Self::LabelPropagation,
        }
    }
}

#[derive(Args, Debug)]
pub struct CommunitiesArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Detection algorithm (overrides `[community] method`).
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Pass limit (overrides `[community] max_iter`).
    #[arg(long, value_name = "N")]
    pub max_iter: Option<usize>,
}

/// Execute `notegraph communities`.
///
/// # Errors
///
/// Returns an error if the project cannot be loaded or output fails.
pub fn run_communities(
    args: &CommunitiesArgs,
    config_path: Option<&Path>,
    output: OutputMode,
) -> anyhow::Result<()> {
    let project = load_project(&args.corpus.root, config_path, output)?;
    let g = &project.graph;

    let mut config = CommunityConfig::from(&project.config.community);
    if let Some(method) = args.method {
        config.method = method.into();
    }
    if let Some(max_iter) = args.max_iter {
        config.max_iter = max_iter;
    }

    let partition = detect_communities(g, &config);
    let summary = CommunitySummary {
        method: config.method,
        count: partition.len(),
        modularity: modularity(g, &partition.communities),
        iterations: partition.iterations,
        converged: partition.converged,
        communities: analyze_communities(g, &partition.communities),
    };

    render_mode(
        output,
        &summary,
        |s, w| {
            writeln!(w, "modularity\t{}", fmt_score(s.modularity))?;
            for c in &s.communities {
                writeln!(
                    w,
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    c.id,
                    c.size,
                    c.internal_edges,
                    c.external_edges,
                    fmt_score(c.density),
                    c.members.join(",")
                )?;
            }
            Ok(())
        },
        |s, w| {
            pretty_section(w, &format!("{} communities", s.count))?;
            pretty_kv(w, "method", method_name(s.method))?;
            pretty_kv(w, "modularity", format!("{:.4}", s.modularity))?;
            let status = if s.converged { "converged" } else { "pass limit reached" };
            pretty_kv(w, "passes", format!("{} ({status})", s.iterations))?;
            for c in &s.communities {
                writeln!(w)?;
                writeln!(
                    w,
                    "#{}  {} notes, {} internal / {} external links, density {:.3}",
                    c.id + 1,
                    c.size,
                    c.internal_edges,
                    c.external_edges,
                    c.density
                )?;
                for id in &c.members {
                    writeln!(w, "    {}", g.title(id))?;
                }
            }
            Ok(())
        },
    )
}

const fn method_name(method: CommunityMethod) -> &'static str {
    match method {
        CommunityMethod::Louvain => "louvain",
        CommunityMethod::LabelPropagation => "label-propagation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_arg_maps_onto_config_method() {
        assert_eq!(
            CommunityMethod::from(MethodArg::LabelPropagation),
            CommunityMethod::LabelPropagation
        );
        assert_eq!(method_name(MethodArg::Louvain.into()), "louvain");
    }

    #[test]
    fn value_names_match_config_spelling() {
        let name = MethodArg::LabelPropagation
            .to_possible_value()
            .map(|v| v.get_name().to_string());
        assert_eq!(name.as_deref(), Some("label-propagation"));
    }
}
