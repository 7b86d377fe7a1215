//! Customizing tabkv output with EncoderOptions.
//!
//! Run with: cargo run --example custom_options

use serde::{Deserialize, Serialize};
use serde_tabkv::{from_reader, to_string_with_options, to_writer_with_options, EncoderOptions};
use std::error::Error;
use std::fs::File;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Window {
    width: u32,
    height: u32,
    vsync: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Config {
    name: String,
    debug: bool,
    window: Window,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = Config {
        name: "MyApp".to_string(),
        debug: true,
        window: Window {
            width: 1280,
            height: 720,
            vsync: false,
        },
    };

    // Default format (2-space tabs, no version line)
    println!("Default:");
    let default = serde_tabkv::to_string(&config)?;
    println!("{}", default);

    // Wider tabs
    println!("Tab size 8:");
    let wide = to_string_with_options(&config, EncoderOptions::new().with_tab_size(8))?;
    println!("{}", wide);

    // Version header
    println!("With version:");
    let options = EncoderOptions::new().with_version("1.0.0");
    let versioned = to_string_with_options(&config, options.clone())?;
    println!("{}", versioned);

    // Options themselves are serde types, so they can live in a JSON config
    let json = serde_json::to_string(&options)?;
    println!("Options as JSON: {}\n", json);

    // Write to a file and read it back
    let path = std::env::temp_dir().join("serde_tabkv_custom_options.txt");
    to_writer_with_options(File::create(&path)?, &config, options)?;
    let config_back: Config = from_reader(File::open(&path)?)?;
    assert_eq!(config, config_back);
    println!("✓ File round-trip successful ({})", path.display());
    std::fs::remove_file(&path)?;

    Ok(())
}
