use agora_runner::{MarketSimulation, SimulationConfig};

fn print_help() {
    eprintln!(
        r#"Agora - double auction market simulator

USAGE:
    agora [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --rounds <N>        Override the round cap
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

The JSON report is written to stdout; logs go to stderr.

EXAMPLES:
    # Ten buyers and ten sellers trading apples
    agora

    # Run with config file, short run
    agora --config market.json --rounds 200
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut rounds: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--rounds" | "-r" => {
                i += 1;
                let parsed = args.get(i).and_then(|n| n.parse::<u64>().ok());
                match parsed {
                    Some(n) => rounds = Some(n),
                    None => {
                        eprintln!("Error: --rounds requires a non-negative integer");
                        std::process::exit(1);
                    }
                }
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            match SimulationConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            log::info!("Using default configuration");
            SimulationConfig::default()
        }
    };
    if let Some(n) = rounds {
        config.max_rounds = n;
    }

    let simulation = match MarketSimulation::from_config(config) {
        Ok(simulation) => simulation,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = simulation.run()?;

    for eq in &report.equilibria {
        log::info!(
            "{}: equilibrium price {} quantity {} surplus {}",
            eq.good_name,
            eq.price,
            eq.quantity,
            eq.total_surplus
        );
    }
    log::info!(
        "Empirical surplus {} of theoretical {} ({}% efficiency), {} trades in {} rounds",
        report.summary.total_empirical_surplus,
        report.theoretical_total_surplus,
        report.summary.efficiency_percent.round_dp(2),
        report.trade_count(),
        report.rounds_run
    );

    println!("{}", report.to_json_pretty()?);
    Ok(())
}
