use std::env;
use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=config.toml");

    // Get the output directory from cargo
    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR");

    // Copy config.toml next to the built binary
    let config_path = Path::new("config.toml");
    if !config_path.exists() {
        return;
    }
    let Some(target_dir) = Path::new(&out_dir).ancestors().nth(3) else {
        return;
    };

    if let Err(err) = fs::copy(config_path, target_dir.join("config.toml")) {
        println!("cargo:warning=could not copy config.toml: {}", err);
    }
}
