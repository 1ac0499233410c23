use std::path::Path;

use anyhow::Result;

use trellis_core::PageDef;

pub mod demo;
pub mod spy;
pub mod swipe;

/// Page definition used when no `--page` file is given.
const DEFAULT_PAGE: &str = include_str!("../../assets/demo-page.toml");

fn load_page(path: Option<&Path>) -> Result<PageDef> {
    let def = match path {
        Some(path) => PageDef::from_file(path)?,
        None => PageDef::from_toml_str(DEFAULT_PAGE)?,
    };
    Ok(def)
}
