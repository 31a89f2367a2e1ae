use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use resource_finder::export::write_assets_csv;
use resource_finder::io::write_atomic;
use resource_finder::map::marker_collection;
use resource_finder::resource::read_asset_features_from_bytes;
use resource_finder::view::render_finder;
use resource_finder::{MapCommand, RegionIndex, ResourceFinder, ViewMode};
use serde_json::Value;

fn read_json(path: &Path) -> Result<Value> {
    let bytes = fs::read(path)
        .with_context(|| format!("[map] Failed to read {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("[map] Failed to parse GeoJSON {}", path.display()))
}

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::MapArgs) -> Result<()> {
    let bytes = fs::read(&args.assets)
        .with_context(|| format!("[map] Failed to read {}", args.assets.display()))?;
    let assets = read_asset_features_from_bytes(&bytes)
        .with_context(|| format!("[map] Failed to load assets from {}", args.assets.display()))?;
    let counties = args.counties.as_deref().map(read_json).transpose()?;
    let zip_codes = args.zipcodes.as_deref().map(read_json).transpose()?;
    let regions = RegionIndex::from_sources(counties.as_ref(), zip_codes.as_ref())?;
    eprintln!("[map] loaded {} assets and {} regions", assets.len(), regions.len());

    let mut finder = ResourceFinder::new(assets, regions);
    let mut commands: Vec<MapCommand> = finder.init();

    if args.list {
        commands.extend(finder.toggle_view(ViewMode::List));
    }
    if let Some(geography) = &args.geography {
        commands.extend(finder.select_geography_named(geography));
    }
    for option in &args.types {
        let (cmds, _) = finder.toggle_type(option);
        commands.extend(cmds);
    }
    if let Some(query) = &args.query {
        commands.extend(finder.set_query(query.as_str()));
    }
    if !args.keys.is_empty() {
        finder.focus_map();
        for key in &args.keys {
            commands.extend(finder.map_key(*key));
        }
    }
    if let Some(id) = &args.select {
        commands.extend(finder.select_asset(id)?);
    }
    finder.go_to_page(args.page);

    if args.commands {
        for command in &commands {
            println!("{}", command.to_json());
        }
    }
    print!("{}", render_finder(&finder));

    if let Some(path) = &args.markers {
        let markers = marker_collection(finder.filtered());
        write_atomic(path, args.force, |w| {
            serde_json::to_writer(w, &markers).context("[map] Failed to serialize markers")
        })?;
    }
    if let Some(path) = &args.csv {
        write_atomic(path, args.force, |w| write_assets_csv(finder.filtered(), w))?;
    }

    Ok(())
}
