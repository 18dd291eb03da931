use anyhow::{Context, Result};
use cakecut::agent::{Agent, AgentCfg, Percept, SneakCuts, Strategy, StrategyKind};
use cakecut::assign::{AssignMethod, PenaltyModel};
use cakecut::cfg::PLATE_RADIUS;
use cakecut::geom2::Tray;
use cakecut::plan::{even_cut_sequence, PlanState};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod doc;
mod record;

use doc::{
    pair, pieces_from, read_json, vec2, write_json, ActionDoc, AssignDoc, Pair, PerceptDoc,
    StateDoc,
};

#[derive(Parser)]
#[command(name = "cakecut")]
#[command(about = "Cake-cutting turn planner and piece assigner")]
struct Cmd {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print (or write) the even-cut sequence for a tray and request count
    Plan {
        #[arg(long)]
        width: f64,
        #[arg(long)]
        length: f64,
        #[arg(long)]
        requests: usize,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decide one engine turn from a percept file
    Turn {
        #[arg(long)]
        percept: PathBuf,
        /// Previous state; a missing file starts a new game
        #[arg(long)]
        state: Option<PathBuf>,
        /// Where to persist the next state (defaults to --state)
        #[arg(long)]
        state_out: Option<PathBuf>,
        #[arg(long, default_value = "sneak", value_parser = parse_strategy)]
        strategy: StrategyKind,
        #[arg(long, default_value_t = 0.0)]
        tolerance: f64,
        #[arg(long, default_value = "sorted", value_parser = parse_method)]
        method: AssignMethod,
    },
    /// Match existing pieces to requests and report the penalty
    Assign {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "sorted", value_parser = parse_method)]
        method: AssignMethod,
        #[arg(long, default_value_t = 0.0)]
        tolerance: f64,
    },
}

fn parse_strategy(s: &str) -> Result<StrategyKind, String> {
    StrategyKind::from_name(s)
        .ok_or_else(|| format!("unknown strategy {s:?} (sneak|climb_hills)"))
}

fn parse_method(s: &str) -> Result<AssignMethod, String> {
    AssignMethod::from_name(s)
        .ok_or_else(|| format!("unknown method {s:?} (sorted|nearest|swap)"))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.command {
        Command::Plan {
            width,
            length,
            requests,
            out,
        } => plan(width, length, requests, out.as_deref()),
        Command::Turn {
            percept,
            state,
            state_out,
            strategy,
            tolerance,
            method,
        } => {
            let cfg = AgentCfg {
                tolerance_pct: tolerance,
                assign_method: method,
                ..AgentCfg::default()
            };
            let state_out = state_out.or_else(|| state.clone());
            let action = turn(
                &percept,
                state.as_deref(),
                state_out.as_deref(),
                strategy,
                cfg,
            )?;
            println!("{}", serde_json::to_string(&action)?);
            Ok(())
        }
        Command::Assign {
            input,
            method,
            tolerance,
        } => {
            let report = assign(&input, method, tolerance)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
    }
}

#[derive(Debug, Serialize)]
struct PlanDoc {
    width: f64,
    length: f64,
    requests: usize,
    init: Pair,
    cuts: Vec<Pair>,
}

fn plan_doc(width: f64, length: f64, requests: usize) -> Result<PlanDoc> {
    let tray = Tray::new(width, length)?;
    let init = SneakCuts.init();
    let cuts = even_cut_sequence(tray, requests, init)?;
    Ok(PlanDoc {
        width,
        length,
        requests,
        init: pair(init),
        cuts: cuts.into_iter().map(pair).collect(),
    })
}

fn plan(width: f64, length: f64, requests: usize, out: Option<&Path>) -> Result<()> {
    tracing::info!(width, length, requests, "plan");
    let doc = plan_doc(width, length, requests)?;
    tracing::info!(cuts = doc.cuts.len(), "plan_ready");
    match out {
        Some(path) => {
            write_json(path, &doc)?;
            let params = json!({"width": width, "length": length, "requests": requests});
            let rec = record::write_sidecar(path, params)?;
            tracing::info!(out = %path.display(), record = %rec.display(), "wrote");
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(())
}

fn turn(
    percept_path: &Path,
    state_in: Option<&Path>,
    state_out: Option<&Path>,
    kind: StrategyKind,
    cfg: AgentCfg,
) -> Result<ActionDoc> {
    let doc: PerceptDoc = read_json(percept_path)?;
    let tray = doc.tray()?;
    let state = match state_in {
        Some(path) if path.exists() => restore_state(path, &tray)?,
        _ => PlanState::default(),
    };
    let pieces = pieces_from(&doc.polygons);
    let percept = Percept {
        turn: doc.turn_number,
        knife: vec2(doc.cur_pos),
        tray,
        pieces: &pieces,
        requests: &doc.requests,
    };
    let agent = Agent::new(kind, cfg);
    let (action, next) = agent
        .turn(&state, &percept)
        .with_context(|| format!("turn {}", doc.turn_number))?;
    tracing::debug!(turn = doc.turn_number, action = action.code(), phase = ?next.phase, "turn");
    if let Some(path) = state_out {
        write_json(path, &StateDoc::from_state(&next))?;
    }
    Ok(ActionDoc::from(&action))
}

fn restore_state(path: &Path, tray: &Tray) -> Result<PlanState> {
    let doc: StateDoc = read_json(path)?;
    doc.into_state(tray)
        .with_context(|| format!("restoring state from {}", path.display()))
}

#[derive(Debug, Serialize)]
struct AssignReport {
    method: &'static str,
    assignment: Vec<i64>,
    penalty: f64,
}

fn assign(input: &Path, method: AssignMethod, tolerance: f64) -> Result<AssignReport> {
    let doc: AssignDoc = read_json(input)?;
    let pieces = pieces_from(&doc.polygons);
    let model = PenaltyModel::new(tolerance, PLATE_RADIUS);
    let assignment = method.assign(&pieces, &doc.requests, &model)?;
    let penalty = model.total(&pieces, &doc.requests, &assignment)?;
    tracing::info!(
        method = method.name(),
        pieces = pieces.len(),
        penalty,
        "assign"
    );
    Ok(AssignReport {
        method: method.name(),
        assignment: assignment.to_wire(),
        penalty,
    })
}
