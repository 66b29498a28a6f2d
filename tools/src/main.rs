//! civic-runner: headless runner for Civic Desk.
//!
//! Usage:
//!   civic-runner --seed 12345 --years 20 --db run.db
//!   civic-runner --seed 12345 --data-dir ./data --ipc-mode

use anyhow::Result;
use civic_core::{
    command::PlayerCommand,
    config::SimConfig,
    engine::SimEngine,
    store::SimStore,
};
use std::env;
use std::io::{self, BufRead, Write};

/// Autoplay stops answering after this many chained events in one year.
const MAX_ANSWERS_PER_YEAR: usize = 8;

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Advance {
        #[serde(default = "one")]
        count: u32,
    },
    Command {
        command: PlayerCommand,
    },
    Quit,
}

fn one() -> u32 {
    1
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let years = parse_arg(&args, "--years", 20u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let db = string_arg(&args, "--db").unwrap_or(":memory:");
    let data_dir = string_arg(&args, "--data-dir");

    if !ipc_mode {
        println!("Civic Desk: civic-runner");
        println!("  seed:      {seed}");
        println!("  years:     {years}");
        println!("  db:        {db}");
        println!("  data_dir:  {}", data_dir.unwrap_or("(builtin)"));
        println!();
    }

    let config = match data_dir {
        Some(dir) => SimConfig::load(dir)?,
        None => SimConfig::builtin()?,
    };

    let store = if db == ":memory:" {
        SimStore::in_memory()?
    } else {
        SimStore::open(db)?
    };
    store.migrate()?;

    let run_id = format!("run-{seed}-{}", uuid::Uuid::new_v4().simple());
    store.insert_run(
        &run_id,
        seed,
        env!("CARGO_PKG_VERSION"),
        chrono::Utc::now().timestamp(),
    )?;

    let mut engine = SimEngine::build(run_id.clone(), seed, config, store)?;

    if ipc_mode {
        run_ipc_loop(&mut engine)?;
    } else {
        autoplay(&mut engine, years)?;
        print_summary(&engine, &run_id)?;
    }

    Ok(())
}

fn run_ipc_loop(engine: &mut SimEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {}
            IpcCommand::Advance { count } => {
                for _ in 0..count {
                    engine.advance_year()?;
                }
            }
            IpcCommand::Command { command } => match engine.apply_command(&command) {
                Ok(_) => {}
                Err(e) if e.is_invalid_selection() => {
                    log::warn!("rejected {}: {e}", command.name());
                    write_error(&mut stdout, &e.to_string())?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
        }
        writeln!(stdout, "{}", serde_json::to_string(&engine.snapshot())?)?;
        stdout.flush()?;
    }
    Ok(())
}

fn write_error(stdout: &mut io::Stdout, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(stdout, "{err_json}")?;
    stdout.flush()?;
    Ok(())
}

/// Answer every offered event with its first option, then advance.
fn autoplay(engine: &mut SimEngine, years: u32) -> Result<()> {
    for _ in 0..years {
        for _ in 0..MAX_ANSWERS_PER_YEAR {
            let Some(event_id) = engine.active_event().map(|e| e.id.clone()) else {
                break;
            };
            engine.choose_option(&event_id, 0)?;
        }
        engine.advance_year()?;
    }
    Ok(())
}

fn print_summary(engine: &SimEngine, run_id: &str) -> Result<()> {
    let snapshot = engine.snapshot();

    println!("=== RUN SUMMARY ===");
    println!("  run_id:          {run_id}");
    println!("  final year:      {}", snapshot.year);
    println!("  events offered:  {}", engine.store.event_count(run_id, "city_event_offered")?);
    println!("  events answered: {}", engine.store.event_count(run_id, "city_event_resolved")?);
    println!("  quiet years:     {}", engine.store.event_count(run_id, "quiet_year")?);
    println!("  {}", snapshot.trend);

    println!();
    println!("=== CITY ===");
    for reading in &snapshot.readings {
        println!("  {:<12} {:>6}  {:?}", reading.label, reading.text, reading.band);
    }

    println!();
    println!("=== HISTORY ===");
    for line in &snapshot.history {
        println!("  {line}");
    }
    Ok(())
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
