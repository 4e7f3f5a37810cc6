use chrono::Utc;

fn main() {
    let version = format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        Utc::now().format("%Y%m%d%H%M")
    );
    println!("cargo:rustc-env=BUILD_VERSION={version}");
    println!("cargo:rerun-if-changed=build.rs");
}
