use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use chrono::DateTime;
use clap::{Parser, Subcommand};
use itertools::Itertools;
use serde::de::DeserializeOwned;

use libero::session::{default_roster, parse_player, prepare_roster};
use libero::{
    ActionResult, ActionType, ActionUpdate, AppConfig, FileBasedStorage, LiberoError, NewAction,
    Player, SessionStore, SessionSummary, Team, TrainingSession, Zone,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Args {
    /// Session store file, overrides the configured location
    #[arg(short, long, global = true)]
    storage: Option<PathBuf>,

    /// Config file, defaults to the platform config directory
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start a new training session; the default rosters are used for
    /// teams without players
    New {
        /// Team 1 players as `name` or `number:name`, comma separated
        #[arg(long, value_delimiter = ',')]
        team1: Vec<String>,

        /// Team 2 players as `name` or `number:name`, comma separated
        #[arg(long, value_delimiter = ',')]
        team2: Vec<String>,
    },
    /// List stored sessions
    List,
    /// Show the current session with its action log
    Show,
    /// Make a stored session the current one
    Load { id: String },
    /// Record an action in the current set
    Action {
        #[arg(short, long)]
        player: String,

        #[arg(short, long, value_parser = parse_value::<Team>)]
        team: Team,

        #[arg(short, long, value_parser = parse_value::<ActionType>)]
        action: ActionType,

        #[arg(short, long, value_parser = parse_value::<ActionResult>)]
        result: ActionResult,

        #[arg(short, long, value_parser = parse_zone)]
        zone: Option<Zone>,

        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Change fields of a recorded action
    UpdateAction {
        id: String,

        #[arg(long)]
        player: Option<String>,

        #[arg(long, value_parser = parse_value::<Team>)]
        team: Option<Team>,

        #[arg(long, value_parser = parse_value::<ActionType>)]
        action: Option<ActionType>,

        #[arg(long, value_parser = parse_value::<ActionResult>)]
        result: Option<ActionResult>,

        #[arg(long, value_parser = parse_zone, conflicts_with = "clear_zone")]
        zone: Option<Zone>,

        #[arg(long)]
        clear_zone: bool,

        #[arg(long, conflicts_with = "clear_notes")]
        notes: Option<String>,

        #[arg(long)]
        clear_notes: bool,
    },
    /// Remove a recorded action
    DeleteAction { id: String },
    /// Start a new set
    NewSet,
    /// Mark the current set as completed
    CompleteSet,
    /// Complete the current set when it has actions and start the next one
    NextSet,
    /// Print the score of the current set
    Score,
    /// Print statistics of the current session as JSON
    Stats,
    /// Write a session to a JSON file
    Export {
        /// Stored session to export instead of the current one
        #[arg(short, long)]
        id: Option<String>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Import a session from a JSON file, or from stdin without a file
    Import { file: Option<PathBuf> },
    /// Copy the current session back into the session list
    Save,
    /// Delete a stored session
    Delete { id: String },
    /// Delete every stored session
    Clear,
    /// Show the configuration, or change it when values are given
    Config {
        /// Session store file to use from now on
        #[arg(long)]
        storage_file: Option<PathBuf>,

        /// Directory exported sessions are written to
        #[arg(long)]
        export_dir: Option<PathBuf>,
    },
}

impl Commands {
    /// Whether the command changes the stored state and must flush it
    fn mutates_store(&self) -> bool {
        match self {
            Commands::New { .. }
            | Commands::Load { .. }
            | Commands::Action { .. }
            | Commands::UpdateAction { .. }
            | Commands::DeleteAction { .. }
            | Commands::NewSet
            | Commands::CompleteSet
            | Commands::NextSet
            | Commands::Import { .. }
            | Commands::Save
            | Commands::Delete { .. }
            | Commands::Clear => true,
            Commands::List
            | Commands::Show
            | Commands::Score
            | Commands::Stats
            | Commands::Export { .. }
            | Commands::Config { .. } => false,
        }
    }
}

fn parse_value<T: DeserializeOwned>(value: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.trim().to_lowercase()))
        .map_err(|_| format!("unknown value '{}'", value))
}

fn parse_zone(value: &str) -> Result<Zone, LiberoError> {
    let zone = value
        .trim()
        .parse::<u8>()
        .map_err(|e| LiberoError::InvalidUserInput {
            field: "zone".to_string(),
            reason: e.to_string(),
        })?;
    Zone::new(zone)
}

fn build_roster(team: Team, specs: &[String]) -> Result<Vec<Player>, LiberoError> {
    if specs.is_empty() {
        return Ok(default_roster(team));
    }
    let players = specs
        .iter()
        .enumerate()
        .map(|(idx, spec)| parse_player(format!("{}-{}", team, idx + 1), spec))
        .collect::<Result<Vec<_>, _>>()?;
    prepare_roster(team, players)
}

fn format_time(timestamp: i64) -> String {
    DateTime::from_timestamp_millis(timestamp)
        .map(|time| time.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

fn print_session(session: &TrainingSession) {
    println!("Training {} ({})", session.id, session.date);
    for team in Team::ALL {
        println!(
            "  {}: {}",
            team,
            session
                .teams
                .roster(team)
                .iter()
                .map(|player| match player.number {
                    Some(number) => format!("#{} {}", number, player.name),
                    None => player.name.clone(),
                })
                .join(", ")
        );
    }

    for set in &session.sets {
        let marker = if set.set_number == session.current_set {
            "*"
        } else {
            " "
        };
        let status = if set.is_completed { "completed" } else { "open" };
        println!(
            "{} Set {}: {} x {} ({}, {} action(s))",
            marker,
            set.set_number,
            set.team1_score,
            set.team2_score,
            status,
            set.actions.len()
        );
        for action in &set.actions {
            let zone = action
                .zone
                .map(|zone| format!(" {}", zone))
                .unwrap_or_default();
            let notes = action
                .notes
                .as_ref()
                .map(|notes| format!(" - {}", notes))
                .unwrap_or_default();
            println!(
                "    [{}] {} {} ({}) {} {}{}{}",
                format_time(action.timestamp),
                action.id,
                action.player,
                action.team,
                action.action,
                action.result,
                zone,
                notes
            );
        }
    }
}

fn read_import_source(file: Option<&PathBuf>) -> Result<String, LiberoError> {
    match file {
        Some(path) => {
            fs::read_to_string(path).map_err(|e| LiberoError::FileOperationError {
                operation: "read_import_file".to_string(),
                reason: format!("{:?}: {}", path, e),
            })
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| LiberoError::StorageIOError { source: e })?;
            Ok(text)
        }
    }
}

fn configure(
    mut config: AppConfig,
    config_path: Option<&Path>,
    storage_file: Option<PathBuf>,
    export_dir: Option<PathBuf>,
) -> Result<(), LiberoError> {
    if storage_file.is_none() && export_dir.is_none() {
        let json = serde_json::to_string_pretty(&config)
            .map_err(|e| LiberoError::ConfigSerializeError { source: e })?;
        println!("{}", json);
        return Ok(());
    }

    if storage_file.is_some() {
        config.storage_file = storage_file;
    }
    if export_dir.is_some() {
        config.export_dir = export_dir;
    }
    match config_path {
        Some(path) => config.save_to(path)?,
        None => config.save()?,
    }
    println!("Saved configuration");
    Ok(())
}

fn run(args: Args) -> Result<(), LiberoError> {
    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::from_local_file()?,
    };
    if let Commands::Config {
        storage_file,
        export_dir,
    } = args.command
    {
        return configure(config, args.config.as_deref(), storage_file, export_dir);
    }

    let storage_file = config.resolve_storage_file(args.storage.as_deref())?;
    let mut store = SessionStore::open(FileBasedStorage::new(storage_file)?)?;
    let mutates_store = args.command.mutates_store();

    match args.command {
        Commands::New { team1, team2 } => {
            let team1 = build_roster(Team::Team1, &team1)?;
            let team2 = build_roster(Team::Team2, &team2)?;
            let id = store.create_new_session(team1, team2);
            println!("Started training session {}", id);
        }
        Commands::List => {
            if store.sessions().is_empty() {
                println!("No training sessions recorded");
            }
            let current_id = store.current_session().map(|session| session.id.clone());
            for session in store.sessions() {
                let summary = SessionSummary::from_session(session);
                let marker = if current_id.as_deref() == Some(summary.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {} {} - {} set(s), {} player(s), {} action(s), {} min",
                    marker,
                    summary.id,
                    summary.date,
                    summary.set_count,
                    summary.player_count,
                    summary.total_actions,
                    summary.elapsed_minutes
                );
            }
        }
        Commands::Show => {
            let session = store.current_session().ok_or(LiberoError::NoActiveSession)?;
            print_session(session);
        }
        Commands::Load { id } => {
            store.try_load_session(&id)?;
            println!("Loaded training session {}", id);
        }
        Commands::Action {
            player,
            team,
            action,
            result,
            zone,
            notes,
        } => {
            let mut new_action = NewAction::new(player, team, action, result);
            new_action.zone = zone;
            new_action.notes = notes;
            let id = store.try_add_action(new_action)?;
            let score = store.current_score();
            println!("Recorded action {} ({} x {})", id, score.team1, score.team2);
        }
        Commands::UpdateAction {
            id,
            player,
            team,
            action,
            result,
            zone,
            clear_zone,
            notes,
            clear_notes,
        } => {
            let update = ActionUpdate {
                player,
                team,
                action,
                result,
                zone: if clear_zone { Some(None) } else { zone.map(Some) },
                notes: if clear_notes { Some(None) } else { notes.map(Some) },
            };
            if update.is_empty() {
                return Err(LiberoError::InvalidUserInput {
                    field: "update-action".to_string(),
                    reason: "nothing to update".to_string(),
                });
            }
            store.try_update_action(&id, update)?;
            println!("Updated action {}", id);
        }
        Commands::DeleteAction { id } => {
            store.try_delete_action(&id)?;
            println!("Deleted action {}", id);
        }
        Commands::NewSet => {
            let set_number = store.try_start_new_set()?;
            println!("Started set {}", set_number);
        }
        Commands::CompleteSet => {
            store.try_complete_current_set()?;
            println!("Completed the current set");
        }
        Commands::NextSet => {
            let set_number = store.try_advance_set()?;
            println!("Started set {}", set_number);
        }
        Commands::Score => {
            let session = store.current_session().ok_or(LiberoError::NoActiveSession)?;
            let score = store.current_score();
            println!(
                "Set {}: {} x {}",
                session.current_set, score.team1, score.team2
            );
        }
        Commands::Stats => {
            let stats = store
                .session_statistics()
                .ok_or(LiberoError::NoActiveSession)?;
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| LiberoError::StorageSerializeError { source: e })?;
            println!("{}", json);
        }
        Commands::Export { id, output } => {
            let (session, json) = match &id {
                Some(id) => {
                    let session = store
                        .sessions()
                        .iter()
                        .find(|session| &session.id == id)
                        .ok_or_else(|| LiberoError::SessionNotFound { id: id.clone() })?;
                    let json = store
                        .export_session_by_id(id)
                        .ok_or_else(|| LiberoError::SessionNotFound { id: id.clone() })?;
                    (session, json)
                }
                None => {
                    let session = store.current_session().ok_or(LiberoError::NoActiveSession)?;
                    (session, store.export_session())
                }
            };
            let output = output.unwrap_or_else(|| config.export_path(&session.export_file_name()));
            fs::write(&output, json).map_err(|e| LiberoError::FileOperationError {
                operation: "write_export".to_string(),
                reason: format!("{:?}: {}", output, e),
            })?;
            println!("Exported training session {} to {:?}", session.id, output);
        }
        Commands::Import { file } => {
            let text = read_import_source(file.as_ref())?;
            store.import_session(&text)?;
            if let Some(session) = store.current_session() {
                println!("Imported training session {}", session.id);
            }
        }
        Commands::Save => {
            store.try_save_session()?;
            println!("Saved the current session");
        }
        Commands::Delete { id } => {
            store.try_delete_session(&id)?;
            println!("Deleted training session {}", id);
        }
        Commands::Clear => {
            store.clear()?;
            println!("Cleared all training sessions");
            return Ok(());
        }
        Commands::Config { .. } => {}
    }

    // Surface write failures the store only logged
    if mutates_store {
        store.flush()
    } else {
        Ok(())
    }
}

fn main() {
    #[cfg(debug_assertions)]
    colog::init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
