use clap::Parser;

use hyperact_cli::{HyperactOptions, run_main};
use hyperact_core::{Result, WRITE_GNUPLOT_ACTION_NAME};

#[derive(Parser, Debug)]
#[command(
    name = "hyperact",
    about = "hyperact: run registered element actions over a pose graph",
    version
)]
pub struct Cli {
    /// Graph file with VERTEX_XY and EDGE_XY records
    #[arg(short = 'g', long = "graph", value_name = "FILE")]
    graph: String,

    /// Name of the action collection to apply ('writeGnuplot' or 'draw')
    #[arg(short = 'a', long, value_name = "NAME", default_value = WRITE_GNUPLOT_ACTION_NAME)]
    action: String,

    /// Only visit elements with this type tag (e.g. VERTEX_XY)
    #[arg(short = 't', long = "type", value_name = "TAG")]
    type_filter: Option<String>,

    /// Draw property overrides, e.g. "EDGE_XY::SHOW=false"
    #[arg(long, value_name = "KEY=VALUE,...")]
    set: Option<String>,

    /// Output file path (writes to file instead of stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<String>,
}

pub fn run(args: Cli) -> Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let opts = HyperactOptions {
        graph: args.graph,
        action: args.action,
        type_filter: args.type_filter,
        set: args.set,
    };

    match run_main(&opts) {
        Ok(output) => {
            if let Some(ref path) = args.output {
                std::fs::write(path, &output)?;
                tracing::info!(path, "output written");
            } else {
                print!("{output}");
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "execution failed");
            Err(e)
        }
    }
}

pub fn main() -> Result<()> {
    let args = Cli::parse();
    run(args)
}
