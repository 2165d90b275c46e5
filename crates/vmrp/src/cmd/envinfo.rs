use std::collections::BTreeMap;

use serde::Serialize;

use crate::cmd::doctor::active_features;
use crate::cmd::EnvinfoArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Serialize)]
struct PlatformInfo {
    os: String,
    arch: String,
}

#[derive(Serialize)]
struct EnvInfoOutput {
    schema_id: &'static str,
    version: String,
    target: String,
    profile: String,
    platform: PlatformInfo,
    features: Vec<String>,
    codec_available: bool,
    dependencies: BTreeMap<String, String>,
    environment: BTreeMap<String, Option<String>>,
}

pub fn run(_args: EnvinfoArgs, format: OutputFormat) -> CliResult<i32> {
    let mut deps = BTreeMap::new();
    deps.insert("clap".to_string(), "4.5".to_string());
    deps.insert("image".to_string(), "0.25".to_string());
    deps.insert("serde_json".to_string(), "1.0".to_string());

    let mut env = BTreeMap::new();
    for key in ["VMRP_LOG_LEVEL", "RUST_LOG", "TMPDIR"] {
        env.insert(key.to_string(), std::env::var(key).ok());
    }

    let output = EnvInfoOutput {
        schema_id: "vmrp.cli.v1.envinfo",
        version: env!("CARGO_PKG_VERSION").to_string(),
        target: target_triple(),
        profile: option_env!("VMRP_BUILD_PROFILE")
            .unwrap_or("unknown")
            .to_string(),
        platform: PlatformInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        },
        features: active_features().into_iter().map(str::to_string).collect(),
        codec_available: vmrp_stego::is_available(),
        dependencies: deps,
        environment: env,
    };

    print_envinfo(&output, format);
    Ok(SUCCESS)
}

fn target_triple() -> String {
    if let Some(target) = option_env!("VMRP_BUILD_TARGET") {
        return target.to_string();
    }

    match (std::env::consts::ARCH, std::env::consts::OS) {
        ("aarch64", "macos") => "aarch64-apple-darwin".to_string(),
        ("x86_64", "macos") => "x86_64-apple-darwin".to_string(),
        ("aarch64", "linux") => "aarch64-unknown-linux-gnu".to_string(),
        ("x86_64", "linux") => "x86_64-unknown-linux-gnu".to_string(),
        ("x86_64", "windows") => "x86_64-pc-windows-msvc".to_string(),
        (arch, os) => format!("{arch}-unknown-{os}"),
    }
}

fn print_envinfo(output: &EnvInfoOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json(output),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("vmrp environment\n");
            println!("  Version:    {}", output.version);
            println!("  Target:     {}", output.target);
            println!("  Profile:    {}", output.profile);
            println!(
                "  Platform:   {} ({})",
                output.platform.os, output.platform.arch
            );
            println!("  Features:   {}", output.features.join(", "));
            println!("  Codec:      {}", if output.codec_available { "png" } else { "none" });
            println!("\n  Dependencies:");
            for (k, v) in &output.dependencies {
                println!("    {:<12} {}", k, v);
            }
            println!("\n  Environment:");
            for (k, v) in &output.environment {
                println!("    {:<16} {}", k, v.as_deref().unwrap_or("(not set)"));
            }
        }
        OutputFormat::Raw => println!("{}", output.version),
    }
}
