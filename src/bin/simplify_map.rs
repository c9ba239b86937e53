//! Tile map generator binary - simplifies a classified raster at a given LOD.
//!
//! Usage: cargo run --release --bin simplify_map -- --input <FILE> [OPTIONS]
//!
//! Options:
//!   --input <FILE>    Raw category buffer, one byte per pixel, square (required)
//!   --lod <N>         Level of detail (default: from config, else 0)
//!   --config <FILE>   JSON simplifier config
//!   --json <FILE>     Write tile records as JSON
//!   --png <FILE>      Write a PNG preview of the painted tiles
//!
//! Category codes: 0 = water/other, 1 = grass, 2-3 = alternate grass, 4 = mountain.

use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Instant;

use tilelod::core::{Error, Result};
use tilelod::grid::CategoryGrid;
use tilelod::lod::LevelOfDetail;
use tilelod::render::{ImageCanvas, TileRenderer};
use tilelod::terrain::{Category, palette::WATER_COLOR};
use tilelod::SimplifierConfig;

fn main() -> ExitCode {
    tilelod::core::logging::init();

    let args: Vec<String> = std::env::args().collect();
    let input = match parse_arg::<PathBuf>(&args, "--input") {
        Ok(Some(input)) => input,
        Ok(None) => {
            eprintln!("Usage: simplify_map --input <FILE> [--lod N] [--config FILE] [--json FILE] [--png FILE]");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(&args, input) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String], input: PathBuf) -> Result<()> {
    let config = match parse_arg::<PathBuf>(args, "--config")? {
        Some(path) => SimplifierConfig::load(path)?,
        None => SimplifierConfig::default(),
    };
    let lod = parse_arg::<i64>(args, "--lod")?.unwrap_or(config.level_of_detail as i64);
    let json_out = parse_arg::<PathBuf>(args, "--json")?;
    let png_out = parse_arg::<PathBuf>(args, "--png")?;

    let buffer = std::fs::read(&input)?;
    // Validate up front so the summary can report the grid side
    let grid = CategoryGrid::from_buffer(&buffer)?;
    let level = LevelOfDetail::new(lod)?;

    println!("=== Tile Map Simplifier ===");
    println!("Input: {}", input.display());
    println!("Grid:  {}px x {}px", grid.side(), grid.side());
    println!("LOD:   {} (tile {}px)", level.get(), level.tile_side(grid.side()));
    println!();

    let start = Instant::now();
    let mut renderer = TileRenderer::new(config);
    renderer.set_image_source(buffer);
    renderer.set_level_of_detail(lod);
    renderer.recompute()?;
    let elapsed = start.elapsed();

    let Some(map) = renderer.tile_map() else {
        return Ok(());
    };
    map.check_coverage()?;

    println!("Tiles: {} in {:.2?}", map.len(), elapsed);
    let histogram = map.category_histogram();
    for category in Category::ALL {
        println!("  {:?}: {}", category, histogram[category.index()]);
    }

    if let Some(path) = json_out {
        std::fs::write(&path, map.to_json()?)?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = png_out {
        let mut canvas = ImageCanvas::new(grid.side(), grid.side(), WATER_COLOR);
        renderer.render(&mut canvas);
        canvas.save_png(&path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

/// Value following `flag`, `Ok(None)` if the flag is absent.
///
/// A flag without a value, or with a value that does not parse, is an error.
fn parse_arg<T: FromStr>(args: &[String], flag: &str) -> Result<Option<T>> {
    let Some(i) = args.iter().position(|a| a == flag) else {
        return Ok(None);
    };
    let raw = args
        .get(i + 1)
        .ok_or_else(|| Error::InvalidInput(format!("{} expects a value", flag)))?;
    raw.parse()
        .map(Some)
        .map_err(|_| Error::InvalidInput(format!("invalid value for {}: {:?}", flag, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_arg_present() {
        let args = args(&["simplify_map", "--input", "map.raw", "--lod", "3"]);
        assert_eq!(parse_arg::<i64>(&args, "--lod").unwrap(), Some(3));
        assert_eq!(
            parse_arg::<PathBuf>(&args, "--input").unwrap(),
            Some(PathBuf::from("map.raw"))
        );
    }

    #[test]
    fn test_parse_arg_absent() {
        let args = args(&["simplify_map", "--input", "map.raw"]);
        assert_eq!(parse_arg::<i64>(&args, "--lod").unwrap(), None);
    }

    #[test]
    fn test_parse_arg_malformed_value() {
        let args = args(&["simplify_map", "--lod", "abc"]);
        let err = parse_arg::<i64>(&args, "--lod").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_parse_arg_missing_value() {
        let args = args(&["simplify_map", "--input", "map.raw", "--lod"]);
        assert!(matches!(parse_arg::<i64>(&args, "--lod"), Err(Error::InvalidInput(_))));
    }
}
