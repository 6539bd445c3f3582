// Copies the static site to `dist/`; when targeting wasm32 it builds the
// wasm-pack bundle into `static/pkg` first.
use std::process::Command;
use std::{env, fs, path::Path};

use fs_extra::dir::{copy, CopyOptions};

fn main() {
    println!("cargo:rerun-if-changed=static");

    let target = env::var("TARGET").unwrap_or_default();
    if target == "wasm32-unknown-unknown" && env::var_os("WASM_PACK_BUILD").is_none() {
        // wasm-pack is assumed available. If not, emit warning.
        let status = Command::new("wasm-pack")
            .env("WASM_PACK_BUILD", "1")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status();

        match status {
            Ok(st) if !st.success() => println!("cargo:warning=wasm-pack build failed"),
            Ok(_) => {}
            Err(_) => println!("cargo:warning=wasm-pack not installed – skipping"),
        }
    }

    let out_dir = Path::new("dist");
    if out_dir.exists() {
        fs::remove_dir_all(out_dir).ok();
    }
    fs::create_dir_all(out_dir).ok();

    let static_dir = Path::new("static");
    if static_dir.exists() {
        let options = CopyOptions::new().content_only(true).overwrite(true);
        if let Err(err) = copy(static_dir, out_dir, &options) {
            println!("cargo:warning=failed to copy static/ to dist/: {err}");
        }
    }
}
