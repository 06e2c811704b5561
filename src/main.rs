//! Demand prediction entry point — CLI wiring and config-driven resource loading.

use std::path::Path;
use std::process;

use chrono::NaiveDate;

use dayton_demand::config::AppConfig;
use dayton_demand::io::export::append_to_log;
use dayton_demand::observability::init_tracing;
use dayton_demand::predict::PredictionRequest;
use dayton_demand::runtime;

/// Configuration file probed when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "dayton-demand.toml";

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    date: Option<String>,
    hour: Option<u32>,
    temperature: Option<f64>,
    prior_mw: Option<f64>,
    history: Option<usize>,
    log_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("dayton-demand — hourly electrical demand prediction for Dayton, Ohio");
    eprintln!();
    eprintln!("Usage: dayton-demand [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>        Load configuration from TOML file");
    eprintln!("  --date <YYYY-MM-DD>    Target date (default: today)");
    eprintln!("  --hour <0-23>          Target hour (default: from config)");
    eprintln!("  --temperature <°C>     Override the suggested temperature");
    eprintln!("  --prior-mw <MW>        Override the prior-hour consumption");
    eprintln!("  --history <n>          Print the last n consumption points and exit");
    eprintln!("  --log-out <path>       Append the prediction to a CSV log");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                Start the JSON API server instead of predicting");
        eprintln!("  --port <u16>           API server port (default: 3000)");
    }
    eprintln!("  --help                 Show this help message");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        date: None,
        hour: None,
        temperature: None,
        prior_mw: None,
        history: None,
        log_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    fn take<'a>(args: &'a [String], i: &mut usize, flag: &str) -> &'a str {
        *i += 1;
        match args.get(*i) {
            Some(value) => value,
            None => {
                eprintln!("error: {flag} requires a value");
                process::exit(1);
            }
        }
    }

    fn parse_or_exit<T: std::str::FromStr>(value: &str, flag: &str, expected: &str) -> T {
        value.parse().unwrap_or_else(|_| {
            eprintln!("error: {flag} value \"{value}\" is not a valid {expected}");
            process::exit(1);
        })
    }

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                cli.config_path = Some(take(&args, &mut i, "--config").to_string());
            }
            "--date" => {
                cli.date = Some(take(&args, &mut i, "--date").to_string());
            }
            "--hour" => {
                let value = take(&args, &mut i, "--hour");
                cli.hour = Some(parse_or_exit(value, "--hour", "hour"));
            }
            "--temperature" => {
                let value = take(&args, &mut i, "--temperature");
                cli.temperature = Some(parse_or_exit(value, "--temperature", "number"));
            }
            "--prior-mw" => {
                let value = take(&args, &mut i, "--prior-mw");
                cli.prior_mw = Some(parse_or_exit(value, "--prior-mw", "number"));
            }
            "--history" => {
                let value = take(&args, &mut i, "--history");
                cli.history = Some(parse_or_exit(value, "--history", "count"));
            }
            "--log-out" => {
                cli.log_out = Some(take(&args, &mut i, "--log-out").to_string());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let value = take(&args, &mut i, "--port");
                cli.port = parse_or_exit(value, "--port", "u16");
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn load_config(cli: &CliArgs) -> AppConfig {
    if let Some(ref path) = cli.config_path {
        match AppConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
        match AppConfig::from_toml_file(Path::new(DEFAULT_CONFIG_PATH)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    }
}

fn main() {
    init_tracing();
    let cli = parse_args();

    let config = load_config(&cli);
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let default_hour = config.prediction.default_hour;

    let resources = match runtime::init(config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    // Trend display mode: dump the tail of the consumption series
    if let Some(n) = cli.history {
        for point in resources.consumption.recent(n) {
            println!(
                "{}  {:>8.2} MW",
                point.timestamp.format("%Y-%m-%d %H:%M"),
                point.demand_mw
            );
        }
        return;
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;

        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(dayton_demand::api::serve(resources, addr));
        return;
    }

    let date = match cli.date {
        Some(ref s) => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(d) => d,
            Err(e) => {
                eprintln!("error: --date value \"{s}\" is not a valid date: {e}");
                process::exit(1);
            }
        },
        None => chrono::Local::now().date_naive(),
    };

    let request = PredictionRequest {
        date,
        hour: cli.hour.unwrap_or(default_hour),
        tavg_c: cli.temperature,
        prior_hour_mw: Some(
            cli.prior_mw
                .unwrap_or_else(|| resources.suggest_prior_hour_mw()),
        ),
    };

    let result = match resources.predictor.predict(&request) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    println!("{result}");

    let history = resources.history();
    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!(
            "trend window: {} points, {} — {}",
            history.len(),
            first.timestamp.format("%Y-%m-%d %H:%M"),
            last.timestamp.format("%Y-%m-%d %H:%M"),
        );
    }

    if let Some(ref path) = cli.log_out {
        if let Err(e) = append_to_log(&result, Path::new(path)) {
            eprintln!("error: failed to write prediction log: {e}");
            process::exit(1);
        }
        eprintln!("Prediction appended to {path}");
    }
}
