//! `ocelot-config flags` command

use std::path::Path;

use anyhow::Result;

use super::{join, Session};
use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs, source_root: Option<&Path>) -> Result<()> {
    let session = Session::new(source_root)?;
    let config = session.builder(&args.config)?.resolve(&session.tools())?;

    if !args.link {
        println!("CFLAGS={}", join(config.c_flags()));
        println!("CXXFLAGS={}", join(config.cxx_flags()));
    }

    if !args.compile {
        println!("LINKFLAGS={}", join(config.link_flags()));
        println!("LIBS={}", config.linker_args());
    }

    Ok(())
}
