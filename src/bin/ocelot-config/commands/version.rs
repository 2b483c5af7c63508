//! `ocelot-config version` command

use std::path::Path;

use anyhow::Result;

use super::Session;
use ocelot_config::ops::{resolve_version, BASE_VERSION};

pub fn execute(source_root: Option<&Path>) -> Result<()> {
    let session = Session::new(source_root)?;
    println!(
        "{}",
        resolve_version(BASE_VERSION, &session.tools(), &session.source_root)
    );
    Ok(())
}
