//! Moving the lookup cursor between map levels.
//!
//! Run with: cargo run --example depth_lookup

use serde_tabkv::Decoder;

const SETTINGS: &str = "\
Version: 2.3.1
language: en
 ------------- Video
resolution: 1920 1080
  fullscreen: true
 ------------- Advanced
vsync: 1
 ============= Advanced
 ============= Video
 ------------- Audio
volume: 7
 ============= Audio
";

fn main() {
    let mut decoder = Decoder::parse(SETTINGS);

    println!("Version: {}", decoder.version().unwrap_or("none"));
    for (depth, level) in decoder.levels().iter().enumerate() {
        println!(
            "[{}] {} ({} keys)",
            depth,
            level.title().unwrap_or("root"),
            level.len()
        );
    }

    // Lookups only see the level under the cursor, which starts at the deepest
    println!("\ndepth {}: volume = {:?}", decoder.depth(), decoder.get("volume").as_str());

    decoder.set_depth(0);
    println!("depth {}: language = {}", decoder.depth(), decoder.get("language"));

    // Audio was opened at depth 1, so its keys share a level with Video's
    decoder.push_depth();
    println!(
        "depth {}: fullscreen = {}, volume = {}",
        decoder.depth(),
        decoder.get("fullscreen").to::<bool>(),
        decoder.get("volume").to::<u8>()
    );

    decoder.push_depth();
    println!("depth {}: vsync = {}", decoder.depth(), decoder.get("vsync").to::<bool>());

    // Pushing past the deepest level is clamped
    for _ in 0..10 {
        decoder.push_depth();
    }
    println!("after 10 pushes the cursor is at depth {}", decoder.depth());

    // Explicit depth without moving the cursor
    println!("depth 1 resolution = {}", decoder.get_at(1, "resolution"));

    // Sections keep every map apart, as written
    for index in decoder.sections()[0].children() {
        if let Some(section) = decoder.section(*index) {
            println!(
                "section {:?}: {} keys, {} nested",
                section.title(),
                section.entries().len(),
                section.children().len()
            );
        }
    }
}
