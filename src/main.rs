//! Brusselator CLI: simulate path ensembles, inspect and view them
//!
//! Run with: cargo run --features viewer -- --help

use std::path::PathBuf;
use std::process::ExitCode;

use brusselator::config::*;
use brusselator::core::{
    default_file_name, load_dataset, load_manifest, manifest_path, resolve_seed, run_ensemble,
    save_dataset, save_manifest, BrusselatorParams, Manifest, NoiseMatrix,
};
use brusselator::{Error, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "brusselator", version, about = "Stochastic Brusselator simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate an ensemble of paths and save it as a .brus file
    Simulate(SimulateArgs),

    /// Print a summary of a .brus file
    Inspect {
        /// Dataset to inspect
        file: PathBuf,
    },

    /// Animate density heatmaps of two datasets, one above the other
    #[cfg(feature = "viewer")]
    View(ViewArgs),
}

#[derive(Args, Debug)]
struct SimulateArgs {
    /// File to save the paths to. Defaults to a name built from the parameters
    #[arg(short = 'o', long, env = "BRUS_OUTPUT")]
    output: Option<PathBuf>,

    /// Number of paths to simulate
    #[arg(short = 'p', long = "num-paths", env = "BRUS_PATHS", default_value_t = PATH_NUM_DEFAULT)]
    paths: usize,

    /// Number of worker threads
    #[arg(short = 'c', long = "num-cores", env = "BRUS_CORES", default_value_t = CORE_NUM_DEFAULT)]
    cores: usize,

    /// Starting x point
    #[arg(
        short = 'x',
        long,
        env = "BRUS_START_X",
        default_value_t = START_X_DEFAULT,
        allow_negative_numbers = true
    )]
    start_x: f64,

    /// Starting y point
    #[arg(
        short = 'y',
        long,
        env = "BRUS_START_Y",
        default_value_t = START_Y_DEFAULT,
        allow_negative_numbers = true
    )]
    start_y: f64,

    /// Autocatalysis rate a
    #[arg(short = 'a', env = "BRUS_A", default_value_t = A_DEFAULT, allow_negative_numbers = true)]
    a: f64,

    /// Feed rate b
    #[arg(short = 'b', env = "BRUS_B", default_value_t = B_DEFAULT, allow_negative_numbers = true)]
    b: f64,

    /// Noise matrix g^{ij}, row-major. Defaults to the identity
    #[arg(
        short = 'g',
        long = "noise",
        num_args = 4,
        value_names = ["G11", "G12", "G21", "G22"],
        allow_negative_numbers = true
    )]
    noise: Option<Vec<f64>>,

    /// Timestep size dt
    #[arg(
        short = 'd',
        long = "step-size",
        env = "BRUS_STEP_SIZE",
        default_value_t = STEP_SIZE_DEFAULT
    )]
    dt: f64,

    /// Number of steps to take on each path
    #[arg(short = 's', long, env = "BRUS_STEPS", default_value_t = STEPS_DEFAULT)]
    steps: usize,

    /// Base RNG seed, for reproducible runs
    #[arg(long, env = "BRUS_SEED")]
    seed: Option<u64>,

    /// Do not write the JSON manifest next to the dataset
    #[arg(long, env = "BRUS_NO_MANIFEST")]
    no_manifest: bool,
}

impl SimulateArgs {
    fn to_config(&self) -> Result<SimulationConfig> {
        let noise = match self.noise.as_deref() {
            None => NoiseMatrix(G_DEFAULT),
            Some(&[g11, g12, g21, g22]) => NoiseMatrix([g11, g12, g21, g22]),
            Some(other) => {
                return Err(Error::InvalidConfig(format!(
                    "noise matrix needs 4 values, got {}",
                    other.len()
                )))
            }
        };
        let config = SimulationConfig {
            params: BrusselatorParams {
                a: self.a,
                b: self.b,
                noise,
            },
            start: (self.start_x, self.start_y),
            dt: self.dt,
            steps: self.steps,
            paths: self.paths,
            cores: self.cores,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "viewer")]
#[derive(Args, Debug)]
struct ViewArgs {
    /// Dataset shown in the top panel
    first: PathBuf,

    /// Dataset shown in the bottom panel
    second: PathBuf,

    /// Histogram bins per axis
    #[arg(long, env = "BRUS_BINS", default_value_t = BINS_DEFAULT)]
    bins: usize,

    /// Histogram x limits
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    x_range: Option<Vec<f64>>,

    /// Histogram y limits
    #[arg(long, num_args = 2, value_names = ["LO", "HI"], allow_negative_numbers = true)]
    y_range: Option<Vec<f64>>,

    /// Delay between frames in milliseconds
    #[arg(long, env = "BRUS_INTERVAL_MS", default_value_t = INTERVAL_MS_DEFAULT)]
    interval_ms: u64,

    /// Animate at most this many frames
    #[arg(long, env = "BRUS_FRAMES")]
    frames: Option<usize>,

    /// Gaussian smoothing in bins (0 disables)
    #[arg(long, env = "BRUS_SIGMA", default_value_t = SIGMA_DEFAULT)]
    sigma: f64,

    /// Added to every bin before log scaling
    #[arg(long, env = "BRUS_OFFSET", default_value_t = OFFSET_DEFAULT)]
    offset: f64,

    /// Lower end of the log colour scale
    #[arg(long, env = "BRUS_VMIN", default_value_t = VMIN_DEFAULT)]
    vmin: f64,

    /// Upper end of the log colour scale
    #[arg(long, env = "BRUS_VMAX", default_value_t = VMAX_DEFAULT)]
    vmax: f64,

    /// Colour ramp: viridis, inferno or greys
    #[arg(long, env = "BRUS_COLORMAP", default_value = "viridis", value_parser = parse_colormap)]
    colormap: brusselator::core::Colormap,
}

#[cfg(feature = "viewer")]
fn parse_colormap(name: &str) -> std::result::Result<brusselator::core::Colormap, String> {
    brusselator::core::Colormap::from_name(name).ok_or_else(|| format!("unknown colormap '{name}'"))
}

#[cfg(feature = "viewer")]
impl ViewArgs {
    fn to_config(&self) -> Result<ViewerConfig> {
        fn pair(values: Option<&Vec<f64>>, default: [f64; 2]) -> [f64; 2] {
            match values.map(Vec::as_slice) {
                Some(&[lo, hi]) => [lo, hi],
                _ => default,
            }
        }
        let config = ViewerConfig {
            bins: self.bins,
            x_range: pair(self.x_range.as_ref(), X_RANGE_DEFAULT),
            y_range: pair(self.y_range.as_ref(), Y_RANGE_DEFAULT),
            interval_ms: self.interval_ms,
            max_frames: self.frames,
            offset: self.offset,
            vmin: self.vmin,
            vmax: self.vmax,
            sigma: self.sigma,
        };
        config.validate()?;
        Ok(config)
    }
}

fn simulate(args: SimulateArgs) -> Result<()> {
    let config = args.to_config()?;
    let seed = resolve_seed(&config);
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_file_name(&config)));

    if config.params.noise.is_zero() {
        warn!("Noise matrix is zero, every path will be identical");
    }

    let bar = ProgressBar::new(config.paths as u64);
    bar.set_style(
        ProgressStyle::with_template("{elapsed_precise} [{bar:40}] {pos}/{len} paths ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let ensemble = run_ensemble(&config, seed, || bar.inc(1))?;
    bar.finish_and_clear();

    let diverged = ensemble.non_finite_points();
    if diverged > 0 {
        warn!(diverged, "Some points are not finite; they will be skipped when binning");
    }

    save_dataset(&output, &ensemble)?;
    if !args.no_manifest {
        let manifest = Manifest::new(&config, seed, &ensemble);
        save_manifest(&manifest_path(&output), &manifest)?;
    }

    info!(output = %output.display(), seed, "Simulation finished");
    Ok(())
}

/// One-line description of the model parameters and their fixed point
fn params_summary(p: &BrusselatorParams) -> String {
    let fixed = match p.fixed_point() {
        Some((x, y)) => format!("({x}, {y})"),
        None => "none".to_string(),
    };
    format!("a={} b={} g={:?} fixed point={fixed}", p.a, p.b, p.noise.0)
}

fn inspect(file: PathBuf) -> Result<()> {
    let ensemble = load_dataset(&file)?;

    println!("{}", file.display());
    println!("  paths:   {}", ensemble.path_count());
    println!("  frames:  {}", ensemble.frame_count());
    match ensemble.bounds() {
        Some(b) => {
            println!("  x:       [{:.4}, {:.4}]", b.x[0], b.x[1]);
            println!("  y:       [{:.4}, {:.4}]", b.y[0], b.y[1]);
        }
        None => println!("  no finite points"),
    }
    let diverged = ensemble.non_finite_points();
    if diverged > 0 {
        println!("  non-finite points: {diverged}");
    }

    let manifest = manifest_path(&file);
    if manifest.exists() {
        let m = load_manifest(&manifest)?;
        let p = &m.config.params;
        println!("  manifest (v{}):", m.version);
        println!("    {}", params_summary(p));
        println!(
            "    start=({}, {}) dt={} steps={} seed={}",
            m.config.start.0, m.config.start.1, m.config.dt, m.config.steps, m.seed
        );
    }
    Ok(())
}

#[cfg(feature = "viewer")]
fn view(args: ViewArgs) -> Result<()> {
    let config = args.to_config()?;
    let datasets = [&args.first, &args.second]
        .into_iter()
        .map(|path| {
            let label = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            load_dataset(path).map(|e| (label, e))
        })
        .collect::<Result<Vec<_>>>()?;

    brusselator::app::run(datasets, config, args.colormap)
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brusselator=debug"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Simulate(args) => simulate(args),
        Command::Inspect { file } => inspect(file),
        #[cfg(feature = "viewer")]
        Command::View(args) => view(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_simulate_short_flags() {
        let cli = Cli::try_parse_from([
            "brusselator", "simulate", "-p", "10", "-c", "2", "-x", "0.9", "-y", "1.8", "-a",
            "1", "-b", "1.9", "-g", "0.01", "0", "0", "0.01", "-d", "0.001", "-s", "490",
        ])
        .unwrap();
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.paths, 10);
        assert_eq!(config.cores, 2);
        assert_eq!(config.start, (0.9, 1.8));
        assert_eq!(config.params.noise, NoiseMatrix([0.01, 0.0, 0.0, 0.01]));
        assert_eq!(config.steps, 490);
        assert_eq!(
            default_file_name(&config),
            "a_1_b_1.9_x_0.9_y_1.8_g_0.01_0_0_0.01_dt_0.001.brus"
        );
    }

    #[test]
    fn test_simulate_defaults() {
        let cli = Cli::try_parse_from(["brusselator", "simulate"]).unwrap();
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.paths, PATH_NUM_DEFAULT);
        assert_eq!(config.params.noise, NoiseMatrix::IDENTITY);
        assert_eq!(config.dt, STEP_SIZE_DEFAULT);
    }

    #[test]
    fn test_env_fills_in_missing_flags() {
        std::env::set_var("BRUS_STEPS", "42");
        std::env::set_var("BRUS_NO_MANIFEST", "true");
        let from_env = Cli::try_parse_from(["brusselator", "simulate"]);
        let from_flag = Cli::try_parse_from(["brusselator", "simulate", "-s", "7"]);
        std::env::remove_var("BRUS_STEPS");
        std::env::remove_var("BRUS_NO_MANIFEST");

        let Command::Simulate(args) = from_env.unwrap().command else {
            panic!("expected simulate");
        };
        assert_eq!(args.steps, 42);
        assert!(args.no_manifest);

        let Command::Simulate(args) = from_flag.unwrap().command else {
            panic!("expected simulate");
        };
        assert_eq!(args.steps, 7);
    }

    #[test]
    fn test_single_valued_flags_have_env() {
        use clap::CommandFactory;
        let mut cmd = Cli::command();
        cmd.build();
        for sub in cmd.get_subcommands() {
            for arg in sub.get_arguments() {
                let single = arg.get_action().takes_values()
                    && arg.get_num_args().map_or(true, |n| n.max_values() <= 1);
                if single && !arg.is_positional() {
                    assert!(
                        arg.get_env().is_some(),
                        "{} --{} has no env var",
                        sub.get_name(),
                        arg.get_id()
                    );
                }
            }
        }
    }

    #[test]
    fn test_params_summary_shows_fixed_point() {
        let params = BrusselatorParams {
            a: 1.0,
            b: 1.9,
            noise: NoiseMatrix::IDENTITY,
        };
        assert_eq!(
            params_summary(&params),
            "a=1 b=1.9 g=[1.0, 0.0, 0.0, 1.0] fixed point=(1, 1.9)"
        );
        let degenerate = BrusselatorParams { a: 0.0, ..params };
        assert!(params_summary(&degenerate).ends_with("fixed point=none"));
    }

    #[test]
    fn test_negative_start_accepted() {
        let cli = Cli::try_parse_from(["brusselator", "simulate", "-x", "-0.5"]).unwrap();
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert_eq!(args.start_x, -0.5);
    }

    #[test]
    fn test_invalid_step_size_rejected() {
        let cli = Cli::try_parse_from(["brusselator", "simulate", "-d", "0"]).unwrap();
        let Command::Simulate(args) = cli.command else {
            panic!("expected simulate");
        };
        assert!(args.to_config().is_err());
    }
}
