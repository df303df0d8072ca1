use clap::Parser;
use dnary_huffman::{BlockReport, OutputFormat, ReportConfig, sweep};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dnary-huffman")]
#[command(about = "D-ary Huffman block codes for a Bernoulli source")]
struct Args {
    /// Probability of a 1 in the source
    #[arg(short, long, default_value_t = 0.8)]
    probability: f64,

    /// Superletter length for the detailed report
    #[arg(short = 'n', long, default_value_t = 3)]
    block_length: usize,

    /// Size of the code alphabet (D)
    #[arg(short = 'd', long, default_value_t = 2)]
    radix: usize,

    /// Sweep block lengths 1..=sweep_max after the report
    #[arg(long, default_value_t = 14)]
    sweep_max: usize,

    #[arg(long)]
    no_sweep: bool,

    #[arg(long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[arg(long, default_value = "warn")]
    log: String,
}

impl From<&Args> for ReportConfig {
    fn from(args: &Args) -> Self {
        ReportConfig {
            probability: args.probability,
            block_length: args.block_length,
            radix: args.radix,
            sweep_max: if args.no_sweep { 0 } else { args.sweep_max },
            format: args.format,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log))
        .with_writer(std::io::stderr)
        .init();

    let config = ReportConfig::from(&args);
    if let Err(err) = config.validate() {
        tracing::error!(%err, "invalid configuration");
        return Err(err.into());
    }

    let source = config.source()?;
    let report = BlockReport::compute(&source, config.block_length, config.radix)?;
    let sweep_report = if config.sweep_max > 0 {
        Some(sweep(&source, config.sweep_lengths(), config.radix)?)
    } else {
        None
    };

    match config.format {
        OutputFormat::Text => {
            print!("{report}");
            if let Some(sweep_report) = &sweep_report {
                print!("{sweep_report}");
            }
        }
        OutputFormat::Json => {
            let output = json!({
                "report": report,
                "sweep": sweep_report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
