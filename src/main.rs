mod cli;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod report;

use chrono::{DateTime, Utc};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use db::Database;
use error::{AgroWatchError, Result};
use logic::{catalog, health, AdvisoryBoard, AdvisoryFilter, ConditionsService, RulesEngine};
use models::{Advisory, FieldConditions};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct AdviseOutput<'a> {
    conditions: &'a FieldConditions,
    generated_at: Option<DateTime<Utc>>,
    total: usize,
    unread: usize,
    advisories: Vec<&'a Advisory>,
}

#[tokio::main]
async fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_ref();
    let data_dir = cli.data_dir.as_ref();

    match cli.command {
        Commands::Init => {
            let (config, _) = Config::setup_interactive(config_path)?;
            tracing::info!(farm = %config.farm.name, "Setup complete");
        }
        Commands::Check => {
            let config = Config::load(config_path)?;
            println!("Config OK: {} ({})", config.farm.name, config.farm.city);
            if config.soil_type().is_none() {
                println!("Soil type: not set or unrecognized");
            }

            let db = Database::open(data_dir)?;
            println!("Database: {}", db.path().display());

            let service = ConditionsService::new(config, db);
            let status = match service.check_connection().await {
                Some(true) => "OK",
                Some(false) => "OFFLINE (using baseline readings and simulated weather)",
                None => "not configured (using baseline readings and simulated weather)",
            };
            println!("Farm backend: {}", status);
        }
        Commands::Advise {
            filter,
            json,
            readings,
        } => {
            let db = Database::open(data_dir)?;
            let conditions = refresh(config_path, db.clone(), &readings).await?;
            let engine = RulesEngine::new();
            let batch = engine.generate(
                &conditions.sensors,
                &conditions.weather,
                conditions.crop.as_ref(),
            );

            let mut board = AdvisoryBoard::load(&db)?;
            board.replace(batch, Utc::now());
            board.save(&db)?;

            if json {
                let output = AdviseOutput {
                    conditions: &conditions,
                    generated_at: board.generated_at(),
                    total: board.len(),
                    unread: board.unread_count(),
                    advisories: board.filtered(filter),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!("{}", report::conditions(&conditions));
                print!("{}", report::advisories(&board, filter));
            }
        }
        Commands::Read { id, all } => {
            let db = Database::open(data_dir)?;
            let mut board = loaded_board(&db)?;
            if all {
                let marked = board.unread_count();
                board.mark_all_read();
                println!("Marked {} alert(s) as read.", marked);
            } else if let Some(id) = id {
                if !board.mark_read(id) {
                    return Err(unknown_alert(&board, id));
                }
                println!("Alert #{} marked as read.", id);
            }
            board.save(&db)?;
        }
        Commands::Dismiss { id } => {
            let db = Database::open(data_dir)?;
            let mut board = loaded_board(&db)?;
            let removed = board.dismiss(id).ok_or_else(|| unknown_alert(&board, id))?;
            board.save(&db)?;
            tracing::info!(rule = %removed.rule, "Alert dismissed");
            println!(
                "Dismissed \"{}\". It stays hidden until `agrowatch restore`.",
                removed.title
            );
        }
        Commands::Restore => {
            let db = Database::open(data_dir)?;
            let mut board = AdvisoryBoard::load(&db)?;
            board.clear_dismissed();
            board.save(&db)?;
            println!("Dismissed alerts will show again on the next `agrowatch advise`.");
        }
        Commands::Health { json, readings } => {
            let db = Database::open(data_dir)?;
            let conditions = refresh(config_path, db, &readings).await?;
            let assessment = health::assess(&conditions.sensors);
            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", report::health(&assessment));
            }
        }
        Commands::Crops { soil } => {
            let config = Config::load_or_default(config_path)?;
            let db = Database::open(data_dir)?;
            let soil = resolve_soil(&config, soil.as_deref());
            let selected = db.get_selected_crop()?;
            let list = catalog::recommendations_for(soil);
            print!("{}", report::crops(soil, &list, selected.as_ref()));
        }
        Commands::Select { crop, soil } => {
            let config = Config::load_or_default(config_path)?;
            let db = Database::open(data_dir)?;
            let soil = resolve_soil(&config, soil.as_deref());
            let profile = catalog::find_crop(soil, &crop).ok_or_else(|| {
                AgroWatchError::NotFound(format!(
                    "crop '{}' is not recommended for {}; run `agrowatch crops --soil ...`",
                    crop, soil
                ))
            })?;
            db.set_selected_crop(Some(&profile))?;
            tracing::info!(crop = %profile.name, soil = %soil, "Crop selected");
            print!("{}", report::selected_crop(&profile));
        }
        Commands::Deselect => {
            let db = Database::open(data_dir)?;
            db.set_selected_crop(None)?;
            println!("Crop selection cleared.");
        }
        Commands::History { limit } => {
            let db = Database::open(data_dir)?;
            print!("{}", report::history(&db.recent_readings(limit)?));
        }
        Commands::Rules { rule, readings } => {
            let engine = RulesEngine::new();
            let rules = engine.list_rules();

            let Some(key) = rule else {
                for (i, (id, name)) in rules.into_iter().enumerate() {
                    println!("{:>2}. {:<20} {}", i + 1, id, name);
                }
                return Ok(());
            };

            if !rules.iter().any(|(id, _)| *id == key) {
                return Err(AgroWatchError::NotFound(format!(
                    "rule '{}'; run `agrowatch rules` for the list",
                    key
                )));
            }

            let db = Database::open(data_dir)?;
            let conditions = refresh(config_path, db, &readings).await?;
            match engine.evaluate_rule(
                &key,
                &conditions.sensors,
                &conditions.weather,
                conditions.crop.as_ref(),
            ) {
                Some(advisory) => {
                    let mut board = AdvisoryBoard::new();
                    board.replace(vec![advisory], Utc::now());
                    print!("{}", report::advisories(&board, AdvisoryFilter::All));
                }
                None => println!("Rule '{}' does not fire for current conditions.", key),
            }
        }
    }

    Ok(())
}

async fn refresh(
    config_path: Option<&std::path::PathBuf>,
    db: Database,
    readings: &cli::ReadingArgs,
) -> Result<FieldConditions> {
    let config = Config::load_or_default(config_path)?;
    let service = ConditionsService::new(config, db);
    service.refresh(&readings.overrides()).await
}

fn loaded_board(db: &Database) -> Result<AdvisoryBoard> {
    let board = AdvisoryBoard::load(db)?;
    if board.is_empty() {
        return Err(AgroWatchError::NotFound(
            "no alerts yet; run `agrowatch advise` first".into(),
        ));
    }
    Ok(board)
}

fn unknown_alert(board: &AdvisoryBoard, id: u32) -> AgroWatchError {
    let ids: Vec<String> = board.advisories().iter().map(|a| a.id.to_string()).collect();
    AgroWatchError::NotFound(format!("alert #{} (current alerts: {})", id, ids.join(", ")))
}

fn resolve_soil(config: &Config, soil: Option<&str>) -> models::SoilType {
    match soil {
        Some(s) => catalog::soil_or_default(s),
        None => config.soil_type().unwrap_or(models::SoilType::Loamy),
    }
}
