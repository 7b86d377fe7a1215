//! Basic tabkv serialization and deserialization.
//!
//! Run with: cargo run --example simple

use serde::{Deserialize, Serialize};
use serde_tabkv::{from_str, to_string};
use std::error::Error;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Stats {
    hp: u32,
    speed: f32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct Player {
    id: u32,
    name: String,
    email: String,
    stats: Stats,
}

fn main() -> Result<(), Box<dyn Error>> {
    let player = Player {
        id: 42,
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
        stats: Stats { hp: 10, speed: 1.5 },
    };

    // Serialize to tabkv
    let text = to_string(&player)?;
    println!("tabkv output:\n{}", text);

    // Deserialize back to struct
    let player_back: Player = from_str(&text)?;
    assert_eq!(player, player_back);
    println!("✓ Round-trip successful");

    Ok(())
}
