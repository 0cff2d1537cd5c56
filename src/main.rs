//! Host-side helper: `cargo run` builds the wasm package into `static/pkg`
//! and serves `static/` on a local port (`PORT`, default 8000).

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::env;
    use std::process::{exit, Command, Stdio};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("building wasm package …");
    match Command::new("wasm-pack")
        .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
        .status()
    {
        Ok(st) if st.success() => {}
        Ok(st) => {
            log::error!("wasm-pack exited with {st}");
            exit(1);
        }
        Err(_) => {
            log::warn!("wasm-pack not found in PATH; serving whatever is already in static/pkg");
        }
    }

    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    log::info!("serving static/ at http://127.0.0.1:{port}");
    let status = Command::new("python3")
        .args(["-m", "http.server", &port, "--directory", "static"])
        .stdout(Stdio::null())
        .status();
    match status {
        Ok(st) if st.success() => {}
        Ok(st) => log::error!("http server exited with {st}"),
        Err(err) => {
            log::error!("failed to start http server: {err}");
            exit(1);
        }
    }
}

// Only meaningful on the host.
#[cfg(target_arch = "wasm32")]
fn main() {}
