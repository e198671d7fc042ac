use std::{
    fs::File,
    io::{self, BufWriter, IsTerminal, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};

use ft_linear_regression::{
    config::DEFAULT_THETAS_PATH, load_dataset, load_parameters, render_report, save_parameters,
    TrainSettings, Trainer,
};

const PROGRESS_TEMPLATE: &str = "{bar:40.cyan/blue} {pos}/{len} epochs [{elapsed_precise}<{eta_precise}]";

#[derive(Debug, Parser)]
#[command(
    name = "ft-linear-regression",
    about = "Predicts a car's price from its mileage with a linear regression",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fit the model on a dataset and save its parameters
    Train(TrainArgs),
    /// Estimate a price with the saved parameters
    Predict(PredictArgs),
}

#[derive(Debug, Args)]
struct TrainArgs {
    /// JSON settings file, flags given here override it
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    learning_rate: Option<f64>,

    #[arg(long)]
    epochs: Option<usize>,

    /// CSV dataset with a header and `km,price` rows
    #[arg(long = "data", value_name = "FILE")]
    dataset: Option<PathBuf>,

    /// Where the trained parameters are written
    #[arg(long, value_name = "FILE")]
    thetas: Option<PathBuf>,

    /// Where the SVG report is written
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Also dump the per-epoch error as JSON
    #[arg(long, value_name = "FILE")]
    trace: Option<PathBuf>,

    /// Log the parameters every few epochs
    #[arg(long)]
    debug: bool,
}

impl TrainArgs {
    fn into_settings(self) -> anyhow::Result<TrainSettings> {
        let mut settings = match &self.config {
            Some(path) => TrainSettings::from_json_file(path)?,
            None => TrainSettings::default(),
        };

        if let Some(lr) = self.learning_rate {
            settings.learning_rate = lr;
        }
        if let Some(epochs) = self.epochs {
            settings.epochs = epochs;
        }
        if let Some(dataset) = self.dataset {
            settings.dataset = dataset;
        }
        if let Some(thetas) = self.thetas {
            settings.thetas = thetas;
        }
        if let Some(report) = self.report {
            settings.report = report;
        }
        if self.trace.is_some() {
            settings.trace = self.trace;
        }
        settings.debug |= self.debug;

        Ok(settings)
    }
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Parameters written by `train`
    #[arg(long, value_name = "FILE", default_value = DEFAULT_THETAS_PATH)]
    thetas: PathBuf,

    /// Mileage to estimate, asked for interactively when missing
    #[arg(long)]
    mileage: Option<f64>,
}

/// Installs the logger once, later calls are no-ops. `RUST_LOG` wins over
/// `debug`.
fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

/// A per-epoch bar on stderr, hidden when stderr is not a terminal.
fn training_progress() -> ProgressBar {
    if !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    ProgressBar::new(0).with_style(style)
}

fn run_train(args: TrainArgs) -> anyhow::Result<()> {
    let settings = args.into_settings()?;
    init_logger(settings.debug);

    let config = settings.training_config()?;
    let dataset = load_dataset(&settings.dataset)?;
    let model = Trainer::new(&dataset, config)?.run_with_progress(training_progress())?;

    let params = model.parameters();
    info!(
        "trained parameters: theta_0={} theta_1={}",
        params.theta_0, params.theta_1
    );

    save_parameters(&settings.thetas, params)?;

    if let Some(path) = &settings.trace {
        let file = File::create(path)
            .with_context(|| format!("cannot create trace file '{}'", path.display()))?;
        let mut wtr = BufWriter::new(file);
        serde_json::to_writer(&mut wtr, model.trace())
            .with_context(|| format!("cannot write trace file '{}'", path.display()))?;
        wtr.flush()?;
    }

    render_report(&settings.report, &dataset, &model)?;
    Ok(())
}

fn read_mileage() -> anyhow::Result<f64> {
    print!("Enter the number of Km: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let line = line.trim();
    line.parse::<f64>()
        .with_context(|| format!("'{line}' is not a number of Km"))
}

fn run_predict(args: PredictArgs) -> anyhow::Result<()> {
    init_logger(false);

    let loaded = load_parameters(&args.thetas);
    if loaded.is_defaulted() {
        warn!("the model is not trained, every estimate will be 0");
    }

    let km = match args.mileage {
        Some(km) => km,
        None => read_mileage()?,
    };

    let price = loaded.parameters().predict(km);
    println!("The estimated price for {km} km is {price}");
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let ret = match cli.command {
        Commands::Train(args) => run_train(args),
        Commands::Predict(args) => run_predict(args),
    };

    if let Err(e) = ret {
        init_logger(false);
        error!("{e:#}");
        std::process::exit(1);
    }
}
