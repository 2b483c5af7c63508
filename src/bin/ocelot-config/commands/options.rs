//! `ocelot-config options` command
//!
//! Prints every option recognized on this host with its default and the
//! value it would take given the options files and the command line.

use std::path::Path;

use anyhow::Result;

use super::Session;
use crate::cli::ConfigArgs;
use ocelot_config::core::options::help_text;

pub fn execute(args: ConfigArgs, source_root: Option<&Path>) -> Result<()> {
    let session = Session::new(source_root)?;
    let options = session.options(&args)?;

    print!("{}", help_text(&options, &session.platform));
    Ok(())
}
