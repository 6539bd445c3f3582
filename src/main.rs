//! Host-side helper: `cargo run` builds the WASM package into `static/pkg`
//! and serves `static/` on a local port.

#[cfg(not(target_arch = "wasm32"))]
#[derive(clap::Parser, Debug)]
#[command(name = "scene_demos", about = "Build the WASM package and serve the demos")]
struct Args {
    /// Port for the local http server
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Serve the existing `static/pkg` without running wasm-pack
    #[arg(long)]
    no_build: bool,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::process::{Command, Stdio};
    use std::{thread, time::Duration};

    use clap::Parser;
    use scene_demos::DemoKind;

    let args = Args::parse();

    if let Err(err) =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_secs()
            .try_init()
    {
        log::debug!("logger already installed: {err}");
    }

    let port = args.port;
    if !args.no_build {
        log::info!("building WASM pkg …");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(st) if st.success() => {}
            Ok(_) => {
                log::error!("wasm-pack finished with errors");
                std::process::exit(1);
            }
            Err(_) => {
                log::warn!(
                    "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving existing artifacts"
                );
            }
        }
    }

    let server = Command::new("python3")
        .args(["-m", "http.server", &port.to_string(), "--directory", "static"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn();
    if let Err(err) = server {
        log::error!("failed to start http server: {err}");
        std::process::exit(1);
    }

    for kind in DemoKind::ALL {
        log::info!("{kind}: http://127.0.0.1:{port}/?demo={kind}");
    }

    // Keep process alive
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
