//! Super Space Man entry point
//!
//! Runs headless rounds with the reference host and prints one JSON report
//! per round.
//!
//! Usage: `super-space-man [tuning.json|standard|classic|-] [seed] [rounds]`
//! Audio assets are read from `$SUPER_SPACE_MAN_ASSETS` (default `assets`).

fn main() -> std::process::ExitCode {
    use std::path::{Path, PathBuf};
    use std::process::ExitCode;

    use super_space_man::Tuning;
    use super_space_man::audio::SoundBank;
    use super_space_man::consts::SIM_DT;
    use super_space_man::headless::{HeadlessHost, Pilot};
    use super_space_man::sim::Session;

    /// Longest a single headless round may run (simulated seconds)
    const MAX_ROUND_SECONDS: f64 = 600.0;

    env_logger::init();
    log::info!("Super Space Man (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();

    let tuning = Tuning::from_arg(args.first().map(String::as_str));

    let seed = match args.get(1).map(|s| s.parse::<u64>()) {
        None => 1,
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed {:?}: {e}", args[1]);
            return ExitCode::FAILURE;
        }
    };
    let rounds = match args.get(2).map(|s| s.parse::<u32>()) {
        None => 1,
        Some(Ok(rounds)) if rounds > 0 => rounds,
        Some(Ok(_)) => {
            log::error!("Round count must be at least 1");
            return ExitCode::FAILURE;
        }
        Some(Err(e)) => {
            log::error!("Invalid round count {:?}: {e}", args[2]);
            return ExitCode::FAILURE;
        }
    };

    let assets = std::env::var_os("SUPER_SPACE_MAN_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new("assets").to_path_buf());
    let sounds = SoundBank::load(&assets, &tuning);

    let session = Session::new(tuning, seed);
    let mut host = HeadlessHost::new(session, sounds, Pilot::default());

    for round in 1..=rounds {
        if round > 1 && !host.press_restart() {
            log::error!("Restart was refused");
            return ExitCode::FAILURE;
        }

        let report = host.run_round(SIM_DT, MAX_ROUND_SECONDS);
        match report.survived {
            Some(time) => log::info!(
                "Round {round}: survived {time:.3}s ({} hits, {} power-ups)",
                report.enemies_hit,
                report.power_ups_collected
            ),
            None => log::warn!("Round {round}: still alive after {MAX_ROUND_SECONDS}s"),
        }

        match serde_json::to_string(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                log::error!("Could not serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }

        if report.survived.is_none() {
            break;
        }
    }

    ExitCode::SUCCESS
}
