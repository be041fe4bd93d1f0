//! Metascope annotation introspection demo
//!
//! Builds the fixed sample hierarchy and prints four introspection reports:
//! the runtime type of a subclass instance, the subclass itself, the
//! superclass, and the interface. Takes no arguments beyond the clap
//! builtins; exits 0 after the reports.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use metascope_model::{report, sample_registry};

#[derive(Parser)]
#[command(name = "metascope")]
#[command(about = "Annotation introspection report over a sample class hierarchy", long_about = None)]
#[command(version)]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let Cli {} = Cli::parse();

    let (registry, types) =
        sample_registry().context("failed to build the sample type registry")?;

    // Runtime type of an instance first, then the three type literals.
    let instance = registry
        .instantiate(types.subclass)
        .context("failed to instantiate the sample subclass")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for type_id in [
        instance.runtime_type(),
        types.subclass,
        types.superclass,
        types.interface,
    ] {
        report(&registry, type_id, &mut out).context("failed to write report")?;
    }
    out.flush()?;

    Ok(())
}
