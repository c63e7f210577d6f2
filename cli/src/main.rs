use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use astgen::{lox, DirectorySink, ReferencePolicy};

/// astgen - generate the Lox syntax tree and its visitors
#[derive(Parser, Debug)]
#[command(name = "astgen")]
#[command(about = "Generate Rust AST node types and visitor traits for Lox", long_about = None)]
struct Args {
    /// Directory that receives one `.rs` file per category plus `mod.rs`
    #[arg(value_name = "OUTPUT_DIR", required_unless_present = "stdout")]
    output_dir: Option<PathBuf>,

    /// `use` tree emitted at the top of every unit (repeatable; replaces the defaults)
    #[arg(long = "import", value_name = "USE_TREE")]
    imports: Vec<String>,

    /// Derive path for every generated type (repeatable; replaces the defaults)
    #[arg(long = "derive", value_name = "PATH")]
    derives: Vec<String>,

    /// Reject references to categories declared later
    #[arg(long)]
    backward_only: bool,

    /// Print the units to stdout instead of writing files
    #[arg(long, conflicts_with = "output_dir")]
    stdout: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut builder = lox::builder();
    if !args.imports.is_empty() {
        builder = builder.imports(args.imports);
    }
    if !args.derives.is_empty() {
        builder = builder.derives(args.derives);
    }
    if args.backward_only {
        builder = builder.references(ReferencePolicy::BackwardOnly);
    }

    let grammar = builder.build().context("invalid Lox grammar")?;

    match args.output_dir {
        Some(dir) => {
            let mut sink = DirectorySink::new(&dir);
            let emission = astgen::generate_to(&grammar, &mut sink)
                .with_context(|| format!("generating into {}", dir.display()))?;
            tracing::info!(units = emission.len(), dir = %dir.display(), "done");
        },
        None => {
            let emission = astgen::generate(&grammar).context("generating Lox AST")?;
            for unit in &emission {
                println!("// ---- {} ----", unit.file_name());
                print!("{}", unit.source);
            }
        },
    }

    Ok(())
}
