//! Recshare CLI - plan and confirm shared-list edits
//!
//! The `recshare` command works on list snapshot documents (JSON):
//!
//! - `check`: would adding one recommendation to the list widen its audience?
//! - `plan`: what would an edit add, remove and expand?
//! - `commit`: confirm expansions and print the commit request

mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use recshare_core::{
    evaluate_expansion, finalize_plan, plan_snapshot, AutoConfirm, CommitOutcome, ConfirmMode,
    ConfirmationPort, DeclinePolicy, Expansion, ListSnapshot, ListUpdatePlan, ShareConfig,
    METRICS,
};

use crate::prompt::TerminalPrompt;

#[derive(Parser)]
#[command(name = "recshare")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Visibility checks for shared recommendation lists", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// TOML config file
    #[arg(long, global = true, env = "RECSHARE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether adding one recommendation to the snapshot's list is an expansion
    Check {
        /// Path to the list snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Recommendation id to check
        #[arg(short, long)]
        recommendation: String,
    },

    /// Show the membership plan for a snapshot
    Plan {
        /// Path to the list snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Confirm expansions and print the commit request as JSON
    Commit {
        /// Path to the list snapshot (JSON)
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Accept every expansion without prompting
        #[arg(long, conflicts_with = "no")]
        yes: bool,

        /// Decline every expansion without prompting
        #[arg(long)]
        no: bool,

        /// Abandon the whole edit if any expansion is declined
        #[arg(long)]
        abort_on_decline: bool,

        /// Write the commit request here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    recshare_core::init_tracing(cli.json_logs || config.log_json, level);

    let result = match cli.command {
        Commands::Check {
            snapshot,
            recommendation,
        } => cmd_check(&snapshot, &recommendation),
        Commands::Plan { snapshot, json } => cmd_plan(&snapshot, json),
        Commands::Commit {
            snapshot,
            yes,
            no,
            abort_on_decline,
            output,
        } => {
            let config = apply_commit_flags(config, yes, no, abort_on_decline);
            cmd_commit(&snapshot, &config, output.as_deref()).await
        }
    };

    METRICS.flush();
    result
}

fn load_config(path: Option<&Path>) -> Result<ShareConfig> {
    let config = match path {
        Some(p) => ShareConfig::load(p)
            .with_context(|| format!("Failed to load config {}", p.display()))?
            .with_env_overrides(),
        None => ShareConfig::from_env(),
    };
    config.context("Invalid RECSHARE_* environment")
}

fn apply_commit_flags(mut config: ShareConfig, yes: bool, no: bool, abort: bool) -> ShareConfig {
    if yes {
        config = config.with_confirm_mode(ConfirmMode::AcceptAll);
    }
    if no {
        config = config.with_confirm_mode(ConfirmMode::DeclineAll);
    }
    if abort {
        config = config.with_decline_policy(DeclinePolicy::AbortAll);
    }
    config
}

fn read_snapshot(path: &Path) -> Result<ListSnapshot> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    ListSnapshot::from_json(&text)
        .with_context(|| format!("Invalid snapshot {}", path.display()))
}

/// Check one recommendation against the snapshot's list.
fn cmd_check(snapshot: &Path, recommendation_id: &str) -> Result<()> {
    let expansion = check_recommendation(&read_snapshot(snapshot)?, recommendation_id)?;
    match expansion {
        Some(e) => {
            println!("expansion: yes");
            println!("{}: {} -> {}", e.display_name(), e.current_visibility, e.target_visibility);
            if !e.newly_exposed.is_empty() {
                let names: Vec<&str> = e.newly_exposed.iter().collect();
                println!("newly shared with: {}", names.join(", "));
            }
        }
        None => println!("expansion: no"),
    }
    Ok(())
}

fn check_recommendation(
    snapshot: &ListSnapshot,
    recommendation_id: &str,
) -> Result<Option<Expansion>> {
    let index = snapshot.index()?;
    let rec = index
        .get(recommendation_id)
        .with_context(|| format!("Recommendation {recommendation_id} not in snapshot"))?;
    Ok(evaluate_expansion(
        rec,
        snapshot.list.visibility,
        &snapshot.list.trust_circle_ids,
    ))
}

/// Print the plan for a snapshot.
fn cmd_plan(snapshot: &Path, json: bool) -> Result<()> {
    let snapshot = read_snapshot(snapshot)?;
    let plan = plan_snapshot(&snapshot).context("Failed to plan list update")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        println!("{}", render_plan_text(&snapshot, &plan));
    }
    Ok(())
}

fn render_plan_text(snapshot: &ListSnapshot, plan: &ListUpdatePlan) -> String {
    let mut out = format!(
        "List {} ({})\n",
        snapshot.list.display_name(),
        snapshot.list.visibility
    );
    if plan.is_noop() {
        out.push_str("No changes.");
        return out;
    }
    for id in &plan.to_add {
        let marker = if plan.expansion(id).is_some() { "!" } else { "+" };
        out.push_str(&format!("  {marker} {id}\n"));
    }
    for id in &plan.to_remove {
        out.push_str(&format!("  - {id}\n"));
    }
    if plan.requires_confirmation() {
        out.push_str(&format!(
            "{} addition(s) widen visibility and need confirmation",
            plan.expansions.len()
        ));
    } else {
        out.push_str("No visibility changes needed");
    }
    out
}

/// Run the confirmation flow and emit the commit request.
async fn cmd_commit(snapshot: &Path, config: &ShareConfig, output: Option<&Path>) -> Result<()> {
    let port: Box<dyn ConfirmationPort> = match config.confirm_mode {
        ConfirmMode::Prompt => Box::new(TerminalPrompt::stdio()),
        ConfirmMode::AcceptAll => Box::new(AutoConfirm::accept_all()),
        ConfirmMode::DeclineAll => Box::new(AutoConfirm::decline_all()),
    };
    let snapshot = read_snapshot(snapshot)?;
    let outcome = commit_snapshot(&snapshot, port.as_ref(), config.decline_policy).await?;
    if outcome.commit().is_some_and(|req| req.is_empty()) {
        info!("Nothing to commit for list {}", snapshot.list.id);
    }

    let rendered = serde_json::to_string_pretty(&outcome)?;
    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Commit request written to {}", path.display());
        }
        None => println!("{}", rendered),
    }

    match outcome {
        CommitOutcome::Commit(_) => Ok(()),
        CommitOutcome::Aborted { reason } => anyhow::bail!("Commit aborted: {reason}"),
    }
}

async fn commit_snapshot(
    snapshot: &ListSnapshot,
    port: &dyn ConfirmationPort,
    policy: DeclinePolicy,
) -> Result<CommitOutcome> {
    let plan = plan_snapshot(snapshot).context("Failed to plan list update")?;
    finalize_plan(&snapshot.list, &plan, port, policy)
        .await
        .context("Failed to finalize commit")
}
