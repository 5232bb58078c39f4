use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use obesity::config::{AppConfig, ARTIFACTS_ENV};
use obesity::report::{parse_requests, render_error, render_inspect, render_prediction, Report};
use obesity_form::{FormSession, FormStep, HeightUnit};
use obesity_model::Predictor;

#[derive(Debug, Parser)]
#[command(
    name = "obesity",
    version,
    about = "Predict an obesity level from a lifestyle questionnaire",
    long_about = "obesity asks the questionnaire the classifier was trained on, encodes the\n\
        answers with the training run's lookup tables and scaler, and prints the\n\
        predicted obesity level.\n\n\
        EXAMPLES:\n\
        \n  obesity                                    Fill in the form interactively\n\
        \n  obesity predict person.json                Predict from a JSON record\n\
        \n  obesity predict --json < people.json       JSON report for a batch\n\
        \n  obesity --artifacts artifacts/demo inspect Show the loaded artifact set"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ./obesity.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Directory holding manifest.json and the artifacts it names
    #[arg(long, value_name = "DIR", global = true)]
    artifacts: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fill in the questionnaire interactively
    #[command(long_about = "Asks for each field in turn and prints the prediction after the\n\
        last one, then starts over.\n\n\
        Commands:\n\
        \n  :help   Show available form commands\n\
        \n  :back   Return to the previous field\n\
        \n  :reset  Start the form over\n\
        \n  :quit   Exit (also :q, :exit)")]
    Form(FormArgs),

    /// Predict from JSON records
    Predict(PredictArgs),

    /// Show the loaded artifact set
    Inspect,
}

#[derive(Debug, Args, Clone, Default)]
struct FormArgs {
    /// Ask for height in this unit (m or cm), overriding the config file
    #[arg(long, value_name = "UNIT", value_parser = parse_height_unit)]
    height_unit: Option<HeightUnit>,
}

#[derive(Debug, Args, Clone)]
struct PredictArgs {
    /// JSON file with one record or an array of records (reads stdin if not provided)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print a JSON report instead of text lines
    #[arg(long)]
    json: bool,
}

fn parse_height_unit(s: &str) -> Result<HeightUnit, String> {
    match s {
        "m" | "meters" => Ok(HeightUnit::Meters),
        "cm" | "centimeters" => Ok(HeightUnit::Centimeters),
        other => Err(format!("unknown height unit '{other}' (expected m or cm)")),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

fn read_input(input: &Option<PathBuf>) -> Result<String, String> {
    if let Some(path) = input {
        fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {e}", path.display()))
    } else {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read from stdin: {e}"))?;
        Ok(buf)
    }
}

fn run_form(predictor: &Predictor, unit: HeightUnit) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let mut rl = match DefaultEditor::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize the form: {e}");
            return 2;
        }
    };

    println!("Obesity level questionnaire. Type :help for commands.");
    let mut session = FormSession::new(unit);
    loop {
        let prompt = session.prompt();
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                match session.handle_line(&line) {
                    FormStep::Continue(messages) => {
                        for m in messages {
                            println!("{m}");
                        }
                    }
                    FormStep::Submitted(input) => {
                        match predictor.predict(&input) {
                            Ok(p) => println!("{}", render_prediction(&p)),
                            Err(e) => {
                                log::warn!("request rejected: {e}");
                                println!("{}", render_error(&e));
                            }
                        }
                        println!();
                    }
                    FormStep::Quit => return 0,
                }
            }
            Err(ReadlineError::Interrupted) => {
                session.reset();
                println!("form reset");
            }
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: form input failed: {e}");
                return 2;
            }
        }
    }
}

fn run_predict(predictor: &Predictor, args: &PredictArgs) -> i32 {
    let text = match read_input(&args.input) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };
    let requests = match parse_requests(&text) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: invalid request JSON: {e}");
            return 1;
        }
    };

    let reports: Vec<Report> = requests
        .iter()
        .map(|input| {
            let result = predictor.predict(input);
            if let Err(e) = &result {
                log::warn!("request rejected: {e}");
            }
            Report::from_result(&result)
        })
        .collect();
    let rejected = reports.iter().any(Report::is_rejected);

    if args.json {
        let out = if reports.len() == 1 {
            serde_json::to_string_pretty(&reports[0])
        } else {
            serde_json::to_string_pretty(&reports)
        };
        match out {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("error: failed to render report: {e}");
                return 2;
            }
        }
    } else {
        for report in &reports {
            match report {
                Report::Predicted(p) => println!("{}", render_prediction(p)),
                Report::Rejected { error, .. } => println!("error: {error}"),
            }
        }
    }

    i32::from(rejected)
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    let dir = config.resolve_artifacts(cli.artifacts.as_deref(), std::env::var_os(ARTIFACTS_ENV));
    let predictor = match Predictor::load(&dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: cannot load artifacts from '{}': {e}", dir.display());
            return 2;
        }
    };

    match cli.command.unwrap_or(Command::Form(FormArgs::default())) {
        Command::Form(args) => {
            let unit = args.height_unit.unwrap_or(config.form.height_unit);
            run_form(&predictor, unit)
        }
        Command::Predict(args) => run_predict(&predictor, &args),
        Command::Inspect => {
            print!("{}", render_inspect(predictor.bundle()));
            0
        }
    }
}

fn main() {
    std::process::exit(run_cli());
}
