//! Analyze command - Value of every legal move from a position

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use super::SearchArgs;
use crate::{
    cli::output::{
        create_spinner, format_number, print_kv, print_section, print_subsection,
    },
    search::{PositionReport, analyze_moves},
    types::describe_value,
};

#[derive(Parser, Debug)]
#[command(about = "Evaluate every legal move from a position")]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Export the report as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = args.search.to_config(false)?;
    let node = args.search.to_node()?;

    let spinner = args
        .search
        .progress
        .then(|| create_spinner("Evaluating moves..."));
    let report = analyze_moves(&node, &config)?;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    print_section("Notakto Position Analysis");
    println!("{node}");
    print_report(&report);

    if let Some(path) = args.export {
        export_report(&report, &path)?;
        println!("\nReport exported to: {}", path.display());
    }

    Ok(())
}

fn print_report(report: &PositionReport) {
    print_subsection("Position");
    print_kv("Key", report.key.as_str());
    print_kv("To move", &report.to_move.to_string());
    print_kv(
        "Value",
        &format!("{} ({})", report.value, describe_value(report.value)),
    );

    if report.moves.is_empty() {
        println!("\n  (position is terminal)");
        return;
    }

    print_subsection("Moves (search order)");
    for mv in &report.moves {
        let marker = if report.best_moves.contains(&mv.action) {
            "*"
        } else {
            " "
        };
        let note = if mv.completes_line {
            "  completes a line"
        } else {
            ""
        };
        println!(
            " {marker} action {:>3} (board {}, cell {}): {:>2}{note}",
            mv.action, mv.board, mv.cell, mv.value
        );
    }

    print_subsection("Search statistics");
    print_kv("Visited", &format_number(report.visited));
    print_kv("Cached positions", &format_number(report.cached_positions as u64));
    print_kv("Cache hits", &format_number(report.stats.cache_hits));
    print_kv("Cutoffs", &format_number(report.stats.cutoffs));
}

/// Write a report as pretty JSON
pub fn export_report(report: &PositionReport, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{app::SearchConfig, game::HistoryNode};

    #[test]
    fn test_export_report() {
        let node = HistoryNode::new(1, &[4]).unwrap();
        let report = analyze_moves(&node, &SearchConfig::new(1)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        export_report(&report, &path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["key"], "0000x0000");
        assert_eq!(json["history"], serde_json::json!([4]));
        assert_eq!(json["moves"].as_array().unwrap().len(), 8);
    }
}
