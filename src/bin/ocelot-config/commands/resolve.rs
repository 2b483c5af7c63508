//! `ocelot-config resolve` command

use std::path::Path;

use anyhow::Result;

use super::{join, Session};
use crate::cli::ResolveArgs;
use ocelot_config::ResolvedConfiguration;

pub fn execute(args: ResolveArgs, source_root: Option<&Path>) -> Result<()> {
    let session = Session::new(source_root)?;
    let config = session.builder(&args.config)?.resolve(&session.tools())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        print_summary(&config);
    }

    Ok(())
}

fn print_summary(config: &ResolvedConfiguration) {
    let toolchain = config.toolchain();

    println!("ocelot {} ({})", config.version(), config.mode());
    println!();
    println!("  CC:         {}", toolchain.cc);
    println!("  CXX:        {}", toolchain.cxx);
    println!("  LINK:       {}", toolchain.link);
    println!("  CFLAGS:     {}", join(config.c_flags()));
    println!("  CXXFLAGS:   {}", join(config.cxx_flags()));
    println!("  LINKFLAGS:  {}", join(config.link_flags()));
    println!("  YACCFLAGS:  {}", join(config.yacc_flags()));
    println!("  CPPPATH:    {}", join(config.include_paths()));
    println!("  LIBPATH:    {}", join(config.library_paths()));
    println!("  LIBS:       {}", config.linker_args());
    println!();
    println!("  LLVM:       {}", config.llvm().describe());
    println!("  test_level: {}", config.test_level().as_str());
    if let Some(msvc) = config.msvc_version() {
        println!("  MSVC:       {}", msvc.as_str());
    }
    println!("  install:    {}", config.install_path().display());
    if let Some(arch) = config.debian_arch() {
        println!("  deb arch:   {}", arch);
    }
    if !config.targets().is_empty() {
        println!("  targets:    {}", config.targets().join(" "));
    }
}
