use anyhow::Context;
use clap::Parser;
use snortrule::parse_rule;
use std::io::BufRead;
use tracing::warn;

#[derive(Parser, Debug)]
#[command(name = "snortrule")]
#[command(version = "0.1.0")]
#[command(about = "Parse and re-render single-line Snort rules", long_about = None)]
struct Cli {
    /// Rule text to parse; reads rules from stdin when omitted
    rule: Option<String>,

    /// Verbose logging (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress most output)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Some(rule) = &cli.rule {
        let model = parse_rule(rule).context("Failed to parse rule")?;
        println!("{}", model.render()?);
        return Ok(());
    }

    let stdin = std::io::stdin();
    for (line_num, line) in stdin.lock().lines().enumerate() {
        let line = line.context("Failed to read rule line")?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_rule(line).and_then(|model| model.render()) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => warn!("Skipping rule on line {}: {}", line_num + 1, e),
        }
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    use tracing_subscriber::EnvFilter;

    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    // Use RUST_LOG if explicitly set, otherwise the verbosity flags
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("snortrule={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
