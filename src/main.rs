use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use truss3d::{analyze, load_model, render_json, render_tables, Precision};

/// Analyse a 3D pin-jointed truss described by a comma separated record file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Record file with node and member lines.
    input: PathBuf,
    /// Decimal places in the printed tables (1-12).
    #[arg(allow_negative_numbers = true)]
    decimal_places: Option<String>,
    /// Print the results as JSON instead of tables.
    #[arg(long)]
    json: bool,
}

impl Args {
    /// Display precision, falling back to the default for unparsable or
    /// out-of-range values.
    fn precision(&self) -> Precision {
        match &self.decimal_places {
            None => Precision::default(),
            Some(places) => places
                .trim()
                .parse()
                .ok()
                .and_then(Precision::new)
                .unwrap_or_else(|| {
                    let fallback = Precision::default();
                    warn!(
                        "invalid decimal places {places:?}; using default {}",
                        fallback.places()
                    );
                    fallback
                }),
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let precision = args.precision();
    let model = load_model(&args.input)
        .with_context(|| format!("failed to load model from {}", args.input.display()))?;
    info!(
        "successfully read {} nodes and {} members",
        model.node_count(),
        model.member_count()
    );

    let results = analyze(&model).context("analysis failed")?;

    if args.json {
        println!("{}", render_json(&model, &results)?);
    } else {
        print!("{}", render_tables(&model, &results, precision));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn precision_of(argv: &[&str]) -> usize {
        Args::try_parse_from(argv)
            .expect("arguments accepted")
            .precision()
            .places()
    }

    #[test]
    fn precision_defaults_to_six_places() {
        assert_eq!(precision_of(&["truss3d", "model.csv"]), 6);
    }

    #[test]
    fn valid_precision_is_used() {
        assert_eq!(precision_of(&["truss3d", "model.csv", "3"]), 3);
        assert_eq!(precision_of(&["truss3d", "model.csv", "12", "--json"]), 12);
    }

    #[test]
    fn bad_precision_falls_back_to_default() {
        for bad in ["abc", "0", "-2", "13", "2.5"] {
            assert_eq!(precision_of(&["truss3d", "model.csv", bad]), 6, "{bad}");
        }
    }
}
