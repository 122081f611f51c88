#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic)]

mod heap_patch;
mod websphere;

use anyhow::{Context, Result};

fn usage() -> ! {
    let exe = std::env::args()
        .next()
        .unwrap_or_else(|| "seclab-tools".to_owned());
    eprintln!("Usage: {exe} <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  xor-decode <credential>              decode a WebSphere {{xor}} credential");
    eprintln!("  xor-encode <plaintext>               obfuscate a plaintext as a {{xor}} credential");
    eprintln!("  heap-patch <pid> <search> <replace>  overwrite a string in a process heap");
    std::process::exit(1)
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("xor-decode") => xor_decode(&args[1..]),
        Some("xor-encode") => xor_encode(&args[1..]),
        Some("heap-patch") => heap_patch_cmd(&args[1..]),
        _ => usage(),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn xor_decode(args: &[String]) -> Result<()> {
    let Some(credential) = args.first() else { usage() };
    println!("{}", websphere::decode(credential)?);
    Ok(())
}

fn xor_encode(args: &[String]) -> Result<()> {
    let Some(plaintext) = args.first() else { usage() };
    println!("{}", websphere::encode(plaintext));
    Ok(())
}

fn heap_patch_cmd(args: &[String]) -> Result<()> {
    let [pid, search, replace] = args else { usage() };
    let pid = pid
        .parse::<u32>()
        .with_context(|| format!("invalid pid: {pid}"))?;
    heap_patch::patch(pid, search.as_bytes(), replace.as_bytes())
}
