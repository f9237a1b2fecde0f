use std::{path::PathBuf, time::Duration};

use clap::Parser;

use amaze::{
    app::{App, MazeConfig, RunStatus, init_tracing},
    generators::Generator,
};

/// Generate perfect mazes and watch them being carved, one step at a time.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of rows
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    rows: u16,

    /// Number of columns
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    columns: u16,

    /// Generation algorithm: aldous-broder, binary-tree, hunt-and-kill,
    /// recursive-backtracker or sidewinder
    #[arg(short, long, default_value = "recursive-backtracker")]
    algorithm: Generator,

    /// Seed for reproducible mazes
    #[arg(short, long)]
    seed: Option<u64>,

    /// Milliseconds between animation steps
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=1_000))]
    delay_ms: u64,

    /// Print the finished maze as text instead of animating it
    #[arg(long)]
    print: bool,

    /// Skip highlighting the longest path
    #[arg(long)]
    no_solve: bool,

    /// Where to write logs
    #[arg(long, value_name = "PATH", default_value = "amaze.log")]
    log_file: PathBuf,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli.log_file, cli.log_level);

    let config = MazeConfig {
        rows: cli.rows as usize,
        columns: cli.columns as usize,
        generator: cli.algorithm,
        seed: cli.seed,
    };
    let app = App::default()
        .with_frame_delay(Duration::from_millis(cli.delay_ms))
        .with_solve(!cli.no_solve);
    tracing::info!("Starting with {:?}", config);

    if cli.print {
        print!("{}", app.print(config)?);
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = App::print_controls(&mut stdout).and_then(|_| app.run(&mut stdout, config));
    App::restore_terminal(&mut stdout)?;

    match result? {
        RunStatus::Completed => println!("Generated a {}x{} maze with {}.", cli.rows, cli.columns, cli.algorithm),
        RunStatus::Cancelled => println!("Cancelled."),
    }
    Ok(())
}
