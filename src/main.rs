use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::Parser;

use analysis_format::{Config, Error, Formatter, ReportMeta, SearchResponse, render_report};

const DEFAULT_CONFIG_FILE: &str = "analysis-format.toml";

#[derive(Parser)]
#[command(name = "analysis-format")]
#[command(about = "Convert analysis reports to HTML")]
struct Cli {
    /// Input report file; `-` or omitted reads stdin
    input: Option<PathBuf>,

    /// Output HTML file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rule set config (defaults to ./analysis-format.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as a search response JSON body and format its `analysis`
    #[arg(long)]
    json: bool,

    /// Wrap the analysis in a report page for this suburb
    #[arg(long, value_name = "SUBURB")]
    report: Option<String>,

    /// Analysis time in seconds shown in the report header
    #[arg(long, value_name = "SECS", requires = "report")]
    elapsed: Option<f64>,

    /// Print the parsed blocks as JSON instead of HTML
    #[arg(long, conflicts_with = "report")]
    blocks: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => load_explicit_config(path)?,
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    let formatter = Formatter::new(&config)?;

    let input = read_input(cli.input.as_deref())?;
    let analysis = if cli.json {
        SearchResponse::from_json(&input)?.into_analysis()?
    } else {
        Some(input)
    };

    let rendered = if cli.blocks {
        let blocks = formatter.parse(analysis.as_deref().unwrap_or_default());
        let mut json = serde_json::to_string_pretty(&blocks).map_err(Error::Serialize)?;
        json.push('\n');
        json
    } else if let Some(suburb) = &cli.report {
        let mut meta = ReportMeta::new(suburb)?;
        if let Some(secs) = cli.elapsed {
            meta = meta.with_elapsed(secs);
        }
        render_report(&formatter, &meta, analysis.as_deref())
    } else {
        formatter.format_opt(analysis.as_deref())
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;
            log::info!("Created {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

/// An explicitly requested config must exist.
fn load_explicit_config(path: &Path) -> Result<Config, Error> {
    let content = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Config::from_toml(&content, path)
}

fn read_input(input: Option<&Path>) -> Result<String, Error> {
    match input {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).map_err(|source| Error::Read {
                path: path.to_path_buf(),
                source,
            })
        }
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| Error::Read {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            Ok(buf)
        }
    }
}
