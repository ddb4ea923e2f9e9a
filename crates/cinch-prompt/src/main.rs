//! Render the toolkit system prompt from a context file.
//!
//! Log verbosity follows `RUST_LOG` (default `warn`); logs go to stderr so
//! the rendered prompt on stdout stays clean.
//!
//! # Examples
//!
//! ```sh
//! # Render a context file
//! cinch-prompt --context ctx.json
//!
//! # Pipe the context, fail on absent fields
//! cat ctx.json | cinch-prompt --strict
//!
//! # Print the built-in action schema
//! cinch-prompt --schema
//!
//! # Check a model's action against the schema and the context's tools
//! cinch-prompt --context ctx.json \
//!   --check-action '{"type": "tool", "name": "search", "activity": "query"}'
//! ```

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use cinch_prompt::action::{Action, default_action_schema};
use cinch_prompt::config::{MissingFieldPolicy, PromptConfig};
use cinch_prompt::context::PromptContext;
use cinch_prompt::template::PromptTemplate;
use cinch_prompt::{PromptError, Result};
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Render the toolkit system prompt from a context file.
#[derive(Parser)]
#[command(name = "cinch-prompt")]
struct Cli {
    /// Context JSON file. Reads stdin when omitted or `-`.
    #[arg(long)]
    context: Option<PathBuf>,

    /// Fail on absent context fields instead of defaulting them
    #[arg(long)]
    strict: bool,

    /// Heading level for template subsections
    #[arg(long, default_value_t = 2)]
    heading_level: u8,

    /// Print the built-in action schema and exit
    #[arg(long)]
    schema: bool,

    /// Validate an action (raw JSON or model output with an `Action:` line)
    /// and print it normalized
    #[arg(long)]
    check_action: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String> {
    if cli.schema {
        return Ok(default_action_schema());
    }

    let policy = if cli.strict {
        MissingFieldPolicy::Strict
    } else {
        MissingFieldPolicy::Lenient
    };
    let ctx = load_context(cli.context.as_deref(), policy)?;

    if let Some(text) = cli.check_action {
        let action = Action::from_text(&text, &ctx.tool_names)?;
        return serde_json::to_string_pretty(&action).map_err(|e| PromptError::InvalidAction {
            message: e.to_string(),
        });
    }

    let config = PromptConfig::default()
        .with_missing_fields(policy)
        .with_heading_level(cli.heading_level);
    PromptTemplate::toolkit().with_config(config).render(&ctx)
}

fn load_context(path: Option<&Path>, policy: MissingFieldPolicy) -> Result<PromptContext> {
    match path {
        Some(p) if p != Path::new("-") => PromptContext::load(p, policy),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| PromptError::Io {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            PromptContext::from_json_str(&buf, policy)
        }
    }
}
