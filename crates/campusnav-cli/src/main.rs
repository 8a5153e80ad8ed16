use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use campusnav_cli::output::{
    render_json, render_locations, render_matrix, render_paths, render_route, MatrixOutput,
    OutputFormat,
};
use campusnav_cli::terminal::ColorPalette;
use campusnav_lib::{
    load_campus_or_builtin, Campus, Error as LibError, LocationId, RouteSnapshot,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Campus shortest-path navigation")]
struct Cli {
    /// Campus dataset JSON file. Defaults to the built-in campus.
    #[arg(long, global = true, env = "CAMPUSNAV_DATASET")]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List campus locations.
    Locations,
    /// List directed paths between locations.
    Paths,
    /// Compute the shortest route between two locations.
    Route {
        /// Starting location id or name.
        #[arg(long = "from")]
        from: String,
        /// Destination location id or name.
        #[arg(long = "to")]
        to: String,
    },
    /// Print the all-pairs shortest distance matrix.
    Matrix,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let campus = load(cli.dataset.as_deref())?;
    let palette = ColorPalette::detect();

    match &cli.command {
        Command::Locations => emit(cli.format, &campus.locations, || {
            render_locations(&campus.locations, palette)
        }),
        Command::Paths => emit(cli.format, &campus.edges, || render_paths(&campus, palette)),
        Command::Route { from, to } => handle_route(campus, from, to, cli.format, palette),
        Command::Matrix => {
            let snapshot = build_snapshot(campus)?;
            let matrix = snapshot.matrix();
            emit(cli.format, &MatrixOutput::new(matrix), || {
                render_matrix(matrix, palette)
            })
        }
    }
}

fn load(dataset: Option<&Path>) -> Result<Campus> {
    let campus = load_campus_or_builtin(dataset).context("failed to load the campus dataset")?;
    tracing::debug!(
        locations = campus.locations.len(),
        paths = campus.edges.len(),
        "campus loaded"
    );
    Ok(campus)
}

fn build_snapshot(campus: Campus) -> Result<RouteSnapshot> {
    RouteSnapshot::build(campus).context("the campus graph is invalid")
}

fn handle_route(
    campus: Campus,
    from: &str,
    to: &str,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let start = campus.resolve_location(from)?;
    let end = campus.resolve_location(to)?;

    let snapshot = build_snapshot(campus)?;
    let route = snapshot.shortest_path(start, end).map_err(|err| match err {
        LibError::NoRoute { .. } => {
            let name = |id: LocationId| {
                snapshot
                    .campus()
                    .location(id)
                    .map_or_else(|| id.to_string(), |l| l.name.clone())
            };
            anyhow::anyhow!("no route from {} to {}", name(start), name(end))
        }
        other => other.into(),
    })?;

    emit(format, &route, || render_route(&route, palette))
}

fn emit<T, F>(format: OutputFormat, value: &T, text: F) -> Result<()>
where
    T: serde::Serialize,
    F: FnOnce() -> String,
{
    match format {
        OutputFormat::Text => print!("{}", text()),
        OutputFormat::Json => println!("{}", render_json(value)?),
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
