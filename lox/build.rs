//! Generates the Lox syntax tree into `$OUT_DIR/ast` and a declaration
//! of that directory as module `ast` in `$OUT_DIR/ast_module.rs`.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use astgen::{lox, DirectorySink};

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").context("OUT_DIR is not set")?);
    let grammar = lox::grammar().context("building the Lox grammar")?;

    let mut sink = DirectorySink::new(out_dir.join("ast"));
    let emission = astgen::generate_to(&grammar, &mut sink).context("generating the Lox syntax tree")?;

    let root = emission.get("mod").context("emission has no root unit")?;
    let root_path = sink.path_for(root);
    let root_path = root_path
        .to_str()
        .with_context(|| format!("{} is not valid UTF-8", root_path.display()))?;

    // `#[path]` needs a literal, so the declaration itself is generated
    let declaration = format!("#[path = {:?}]\npub mod ast;\n", root_path);
    let module_file = out_dir.join("ast_module.rs");
    fs::write(&module_file, declaration).with_context(|| format!("writing {}", module_file.display()))?;
    Ok(())
}
