// src/main.rs
mod advice;
mod extractors;
mod league;
mod models;
mod sheet;
mod storage;
mod utils;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use league::projections::{load_dvp, load_projections, Projection};
use league::rules::load_rules;
use models::Position;
use storage::StorageManager;
use utils::AppError;

/// Fantasy-league helper: cheat-sheet extraction plus draft, waiver, lineup
/// and trade advice.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output directory for exported files
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// Scratch directory for session state (defaults to the OS temp dir)
    #[arg(long)]
    state_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract player records from one cheat-sheet document
    Parse {
        /// Path to the sheet document
        sheet: PathBuf,

        /// The sheet carries a numeric value column
        #[arg(long)]
        has_value: bool,
    },

    /// Merge a primary and a secondary sheet into one master list
    Merge {
        /// Primary (Top300-style) sheet
        top300: PathBuf,

        /// Secondary (Beginner-style) sheet
        beginner: PathBuf,

        /// The primary sheet carries a value column
        #[arg(long)]
        top300_has_value: bool,

        /// The secondary sheet carries a value column
        #[arg(long)]
        beginner_has_value: bool,

        /// Output CSV filename
        #[arg(long, default_value = "master.csv")]
        out: String,
    },

    /// Best available draft picks
    Draft {
        /// Projection table CSV
        projections: PathBuf,

        /// League key for the drafted-player snapshot
        #[arg(long, default_value = "default")]
        league_key: String,

        /// Extra names to treat as drafted for this run only
        #[arg(long)]
        drafted: Vec<String>,

        /// Mark players drafted and persist them before advising
        #[arg(long)]
        mark: Vec<String>,

        /// Restrict to one position (or ALL)
        #[arg(long)]
        position: Option<String>,
    },

    /// Waiver-wire pickups and roster bye conflicts
    Waiver {
        /// Projection table CSV
        projections: PathBuf,

        /// Roster CSV
        roster: PathBuf,

        /// Optional defense-vs-position table CSV
        #[arg(long)]
        dvp: Option<PathBuf>,

        /// Restrict candidates to one week
        #[arg(long)]
        week: Option<u32>,
    },

    /// Best starting lineup for a roster
    Lineup {
        /// Roster CSV
        roster: PathBuf,

        /// Projection table CSV
        projections: PathBuf,

        /// League rules JSON
        #[arg(long)]
        league: PathBuf,
    },

    /// Evaluate trade fairness by value over replacement
    Trade {
        /// Rest-of-season projection table (needs ros_points)
        ros: PathBuf,

        /// League rules JSON
        #[arg(long)]
        league: PathBuf,

        /// Comma-separated names on side A
        #[arg(long, value_delimiter = ',')]
        side_a: Vec<String>,

        /// Comma-separated names on side B
        #[arg(long, value_delimiter = ',')]
        side_b: Vec<String>,
    },
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::debug!("Starting with args: {:?}", args);

    let state_dir = args
        .state_dir
        .clone()
        .unwrap_or_else(storage::default_state_dir);

    match args.command {
        Command::Parse { sheet, has_value } => {
            let records = extractors::parse_cheatsheet(&sheet, has_value)?;
            if records.is_empty() {
                // "Found nothing" is a presentation concern, not an error.
                println!("No player records found in {}", sheet.display());
                return Ok(());
            }
            for r in &records {
                println!(
                    "{:>4}  {:<24} {:<4} {:<3}  bye {:<3} value {}",
                    fmt_opt(r.rank),
                    r.name,
                    r.team.as_deref().unwrap_or("-"),
                    r.position,
                    fmt_opt(r.bye_week),
                    fmt_opt(r.value),
                );
            }
        }

        Command::Merge {
            top300,
            beginner,
            top300_has_value,
            beginner_has_value,
            out,
        } => {
            let primary = extractors::parse_cheatsheet(&top300, top300_has_value)?;
            let secondary = extractors::parse_cheatsheet(&beginner, beginner_has_value)?;
            tracing::info!(
                "Merging {} primary and {} secondary records",
                primary.len(),
                secondary.len()
            );

            let master = extractors::merge::merge(primary, secondary);
            let storage = StorageManager::new(&args.output_dir)?;
            let csv_path = storage.save_master_csv(&master, &out)?;
            let sources = vec![
                top300.display().to_string(),
                beginner.display().to_string(),
            ];
            let meta_name = format!("{}_meta.json", out.trim_end_matches(".csv"));
            storage.save_master_metadata(&master, &sources, &meta_name)?;
            println!("Wrote {} master records to {}", master.len(), csv_path.display());
        }

        Command::Draft {
            projections,
            league_key,
            drafted,
            mark,
            position,
        } => {
            let table = load_projections(&projections)?;
            let mut state = storage::load_league_state(&state_dir, &league_key);
            if !mark.is_empty() {
                for name in mark {
                    if !state.drafted.contains(&name) {
                        state.drafted.push(name);
                    }
                }
                storage::save_league_state(&state_dir, &league_key, &state)?;
            }

            let mut all_drafted = state.drafted.clone();
            all_drafted.extend(drafted);
            let position_filter = parse_position_filter(position.as_deref())?;

            let picks = advice::draft::best_available(&table, &all_drafted, position_filter);
            println!("Best available ({} drafted so far):", all_drafted.len());
            for p in &picks {
                print_projection(p);
            }
        }

        Command::Waiver {
            projections,
            roster,
            dvp,
            week,
        } => {
            let table = load_projections(&projections)?;
            let roster = load_projections(&roster)?;
            let dvp_table = match dvp {
                Some(path) => Some(load_dvp(&path)?),
                None => None,
            };

            let conflicts = advice::waiver::bye_conflicts(&roster);
            println!("Roster byes:");
            for p in &conflicts {
                println!("  week {:<3} {:<3} {}", fmt_opt(p.bye_week), p.pos, p.player);
            }

            let candidates =
                advice::waiver::waiver_candidates(&table, &roster, dvp_table.as_ref(), week);
            println!("Waiver candidates:");
            for c in &candidates {
                print!("  matchup {:>5.1}  ", c.matchup_score);
                print_projection(&c.projection);
            }
        }

        Command::Lineup {
            roster,
            projections,
            league,
        } => {
            let roster = load_projections(&roster)?;
            let table = load_projections(&projections)?;
            let rules = load_rules(&league)?;

            let picks = advice::lineup::optimize_lineup(&roster, &table, &rules);
            println!("Lineup for '{}':", rules.league_name);
            for a in &picks {
                println!(
                    "  {:<5} {:<24} {:>5} pts",
                    a.slot,
                    a.projection.player,
                    fmt_opt(a.projection.proj_points),
                );
            }
        }

        Command::Trade {
            ros,
            league,
            side_a,
            side_b,
        } => {
            let table = load_projections(&ros)?;
            let rules = load_rules(&league)?;
            let verdict = advice::trade::evaluate_trade(&side_a, &side_b, &table, &rules);
            println!("Side A VORP: {:>6.1}", verdict.a_vorp);
            println!("Side B VORP: {:>6.1}", verdict.b_vorp);
            println!("Difference:  {:>6.1}", verdict.difference);
            println!("Verdict:     {}", verdict.verdict);
        }
    }

    Ok(())
}

fn parse_position_filter(raw: Option<&str>) -> Result<Option<Position>, AppError> {
    match raw {
        None => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("ALL") => Ok(None),
        Some(s) => Position::from_token(&s.to_uppercase())
            .map(Some)
            .ok_or_else(|| AppError::Config(format!("Unknown position '{s}'"))),
    }
}

fn print_projection(p: &Projection) {
    println!(
        "{:<24} {:<4} {:<3}  wk {:<3} vs {:<4} proj {:>5} ecr {}",
        p.player,
        p.team.as_deref().unwrap_or("-"),
        p.pos,
        fmt_opt(p.week),
        p.opp.as_deref().unwrap_or("-"),
        fmt_opt(p.proj_points),
        fmt_opt(p.ecr),
    );
}

fn fmt_opt<T: std::fmt::Display>(v: Option<T>) -> String {
    v.map(|x| x.to_string()).unwrap_or_else(|| "-".to_string())
}
