//! `ocelot-config deps` command

use std::path::Path;

use anyhow::Result;

use super::{join, Session};
use crate::cli::ConfigArgs;
use ocelot_config::core::PathComponent;
use ocelot_config::{Dependency, LlvmAvailability};

pub fn execute(args: ConfigArgs, source_root: Option<&Path>) -> Result<()> {
    let session = Session::new(source_root)?;
    let config = session.builder(&args)?.resolve(&session.tools())?;
    let deps = config.dependencies();

    for dep in Dependency::ALL {
        let triple = deps.get(dep);
        println!("{}:", dep);
        for component in PathComponent::ALL {
            println!(
                "  {:<8} {}    # {}",
                label(component),
                triple.get(component),
                dep.env_var(component)
            );
        }
    }

    println!("LLVM: {}", deps.llvm.describe());
    if let LlvmAvailability::Available(llvm) = &deps.llvm {
        println!("  {:<8} {}", "bin", join(&llvm.bin_dirs));
        println!("  {:<8} {}", "lib", join(&llvm.lib_dirs));
        println!("  {:<8} {}", "include", join(&llvm.include_dirs));
        println!("  {:<8} {}", "libs", llvm.libs.join(" "));
    }

    Ok(())
}

fn label(component: PathComponent) -> &'static str {
    match component {
        PathComponent::Binary => "bin",
        PathComponent::Library => "lib",
        PathComponent::Include => "include",
    }
}
