use std::fs::File;
use std::io::BufReader;

use anyhow::{anyhow, Context, Result};
use resource_finder::export::{summary_text, write_csv};
use resource_finder::io::write_atomic;
use resource_finder::view::render_list;
use resource_finder::{Dimension, ListBrowser, Resource};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::ListArgs) -> Result<()> {
    let resources: Vec<Resource> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("[list] Failed to open snapshot {}", path.display()))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("[list] Failed to parse snapshot {}", path.display()))?
        }
        None => super::fetch_remote(&args.remote)?,
    };

    let mut browser = ListBrowser::new(resources);
    for (dim, options) in [
        (Dimension::County, &args.county),
        (Dimension::ServiceCategory, &args.service),
        (Dimension::OrganizationType, &args.org_type),
        (Dimension::PopulationServed, &args.population),
    ] {
        if !options.is_empty() {
            browser.set_filter(dim, options.iter().cloned());
        }
    }
    if let Some(query) = &args.query {
        browser.set_query(query.as_str());
    }
    browser.go_to_page(args.page);

    match &args.summary {
        Some(name) => {
            let resource = browser.find(name)
                .ok_or_else(|| anyhow!("No resource named {name:?} matches the current filters"))?;
            print!("{}", summary_text(resource));
        }
        None => print!("{}", render_list(&browser, args.details)),
    }

    if let Some(path) = &args.csv {
        write_atomic(path, args.force, |w| write_csv(browser.filtered(), w))?;
        eprintln!("[list] wrote {} rows to {}", browser.count(), path.display());
    }

    Ok(())
}
