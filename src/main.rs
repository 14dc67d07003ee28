use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};

mod mindmap;
mod playbook;
mod report;
mod timing;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "playbook-mindmap")]
#[command(about = "Playbook log to mindmap converter", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a playbook log into a mindmap report (JSON).
    Convert {
        /// Console transcript or structured JSON record of the run.
        #[arg(long)]
        log: String,

        #[arg(short = 'o', long)]
        out: String,

        /// How to interpret the log file.
        #[arg(long, default_value = "auto", value_enum)]
        format: InputFormat,

        /// Rows to keep in the slowest-task ranking.
        #[arg(long, default_value_t = timing::DEFAULT_TOP_N)]
        top: usize,
    },
}

/// Input interpretations accepted by `convert`.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputFormat {
    /// Take the record path when the content parses as a JSON mapping,
    /// the transcript grammar otherwise.
    Auto,
    /// Force the console transcript grammar.
    Text,
    /// Require a structured JSON record.
    Record,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Convert { log, out, format, top } => {
            // 1) Read the log. Decoding is lossy: a transcript with broken
            //    bytes still parses around them.
            let bytes = std::fs::read(&log).with_context(|| format!("read log file {}", log))?;
            let raw = String::from_utf8_lossy(&bytes);

            // 2) Parse into the playbook model.
            let playbook = match format {
                InputFormat::Auto => playbook::parse_any(&raw),
                InputFormat::Text => playbook::parse_text(&raw),
                InputFormat::Record => {
                    let record: serde_json::Value = serde_json::from_str(&raw)
                        .with_context(|| format!("parse record file {}", log))?;
                    if !record.is_object() {
                        bail!("record file {} does not hold a JSON mapping", log);
                    }
                    playbook::from_record(&record)
                }
            };

            // 3) Build the report and write it out.
            let data = report::build_report(&playbook, top);
            let json = serde_json::to_string_pretty(&data)?;
            std::fs::write(&out, json)?;
            println!("Wrote {}", out);
        }
    }

    Ok(())
}
