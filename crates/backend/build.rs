use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// `target/<profile>` for the current build, derived from OUT_DIR
/// (`target/<profile>/build/backend-xxx/out`).
fn profile_dir() -> Option<PathBuf> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").ok()?);
    let profile = env::var("PROFILE").ok()?;
    out_dir
        .ancestors()
        .find(|p| p.ends_with(&profile))
        .map(Path::to_path_buf)
}

fn main() {
    println!("cargo:rerun-if-changed=../../config.toml");

    // Binaries read config.toml from their own directory first
    let workspace_config = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config.toml");
    let Some(target_dir) = profile_dir() else {
        println!("cargo:warning=target profile directory not found, config.toml not copied");
        return;
    };

    if workspace_config.exists() {
        let dest = target_dir.join("config.toml");
        if let Err(e) = fs::copy(&workspace_config, &dest) {
            panic!("Failed to copy config.toml to {}: {}", dest.display(), e);
        }
    } else {
        println!(
            "cargo:warning=config.toml not found at {}, binaries use the embedded default",
            workspace_config.display()
        );
    }
}
