use crate::cmd::doctor::active_features;
use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("vmrp {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: vmrp");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("VMRP_BUILD_TARGET").unwrap_or("unknown"));
    println!("profile: {}", option_env!("VMRP_BUILD_PROFILE").unwrap_or("unknown"));
    println!("features: {}", active_features().join(", "));
    println!(
        "frame: magic={:?} version={}",
        String::from_utf8_lossy(&vmrp_frame::MAGIC),
        vmrp_frame::VERSION
    );

    Ok(SUCCESS)
}
