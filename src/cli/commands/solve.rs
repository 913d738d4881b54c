//! Solve command - Compute the game value of a position
//!
//! By default prints a single line with the value so scripts can diff the
//! output; `--summary` prints a readable report instead.

use anyhow::{Result, bail};
use clap::Parser;

use super::SearchArgs;
use crate::{
    cli::output::{create_spinner, format_number, print_section, print_stats_table},
    search::{AlphaBetaSearch, SearchContext, SearchOutcome},
    types::describe_value,
};

#[derive(Parser, Debug)]
#[command(about = "Compute the game value of a position")]
pub struct SolveArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Print a readable report instead of the bare value
    #[arg(long)]
    pub summary: bool,

    /// Also print every visited history, one per line
    #[arg(long)]
    pub show_visits: bool,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let config = args.search.to_config(args.show_visits)?;
    let node = args.search.to_node()?;
    let mut engine = AlphaBetaSearch::new(config.clone())?;
    let mut ctx = SearchContext::new(config.record_histories);

    let spinner = args
        .search
        .progress
        .then(|| create_spinner(&format!("Solving {} board(s)...", config.num_boards)));
    let outcome = engine.run(&node, &mut ctx)?;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let value = match outcome {
        SearchOutcome::Solved(value) => value,
        SearchOutcome::Aborted(reason) => bail!(
            "search aborted ({reason:?}) after {} positions",
            format_number(ctx.visits.count())
        ),
    };

    if args.summary {
        print_section("Notakto Solution");
        println!("{node}");
        println!();
        print_stats_table(&[
            ("Boards", config.num_boards.to_string()),
            ("Value", format!("{value} ({})", describe_value(value))),
            ("Ordering", format!("{:?}", config.ordering)),
            ("Cache policy", format!("{:?}", config.cache_policy)),
            ("Visited", format_number(ctx.visits.count())),
            ("Cached positions", format_number(ctx.table.len() as u64)),
            ("Cache hits", format_number(ctx.stats.cache_hits)),
            ("Cutoffs", format_number(ctx.stats.cutoffs)),
            ("Skipped stores", format_number(ctx.stats.skipped_stores)),
        ]);
    } else {
        println!("{value}");
    }

    if args.show_visits {
        for history in ctx.visits.histories() {
            println!("{history:?}");
        }
    }

    Ok(())
}
