//! Show the AIGC metadata embedded in a WAV file

use aigc_tag::tagger;
use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;

pub fn handle_info(file: &str) -> Result<(), Box<dyn Error>> {
    let expanded = shellexpand::tilde(file);
    let path = Path::new(expanded.as_ref());

    println!(
        "{} {}",
        "Reading metadata from:".bright_black(),
        file.cyan()
    );

    match tagger::read_aigc(path)? {
        Some(payload) => {
            println!("\n{}", "Found AIGC chunk:".green().bold());
            println!("  {} {} bytes", "Size:".yellow(), payload.len());
            println!("{}", render_payload(&payload));
        }
        None => {
            println!("{} No AIGC chunk found", "!".yellow());
            println!("Use 'aigc-tag tag <file>' to add one");
        }
    }

    match tagger::calculate_audio_md5(path)? {
        Some(md5) => println!("\n{} {}", "Audio MD5:".bright_black(), md5.cyan()),
        None => println!("\n{} No data chunk found", "!".yellow()),
    }

    Ok(())
}

/// Pretty JSON when the payload parses, otherwise the text as-is
fn render_payload(payload: &[u8]) -> String {
    match serde_json::from_slice::<serde_json::Value>(payload) {
        Ok(value) => serde_json::to_string_pretty(&value)
            .unwrap_or_else(|_| String::from_utf8_lossy(payload).to_string()),
        Err(_) => String::from_utf8_lossy(payload).to_string(),
    }
}
