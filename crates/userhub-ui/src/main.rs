#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Browser entry point; native builds only print how to build for the web.

#[cfg(target_arch = "wasm32")]
fn main() {
    userhub_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    use std::io::Write;

    writeln!(
        std::io::stderr(),
        "userhub-ui renders in the browser only: cargo build -p userhub-ui --target wasm32-unknown-unknown"
    )
}
