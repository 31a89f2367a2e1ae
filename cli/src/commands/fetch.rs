use anyhow::{Context, Result};
use resource_finder::io::write_atomic;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::FetchArgs) -> Result<()> {
    let resources = super::fetch_remote(&args.remote)?;
    let hidden = resources.iter().filter(|r| r.hidden).count();

    eprintln!("[fetch] fetched {} resources ({hidden} hidden)", resources.len());
    write_atomic(&args.output, args.force, |w| {
        serde_json::to_writer_pretty(w, &resources).context("[fetch] Failed to serialize snapshot")
    })?;
    eprintln!("[fetch] wrote snapshot to {}", args.output.display());

    Ok(())
}
