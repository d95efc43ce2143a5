//! List the chunk layout of a RIFF file

use aigc_tag::tagger;
use aigc_tag::utils::validation::validate_input_readable;
use owo_colors::OwoColorize;
use std::error::Error;
use std::path::Path;

pub fn handle_chunks(file: &str) -> Result<(), Box<dyn Error>> {
    let expanded = shellexpand::tilde(file);
    let path = Path::new(expanded.as_ref());

    validate_input_readable(path)?;
    let riff = tagger::read_riff(path)?;

    println!(
        "{} {} / {}",
        file.cyan(),
        String::from_utf8_lossy(riff.form_tag()).yellow(),
        String::from_utf8_lossy(riff.format_tag()).yellow()
    );

    for (index, chunk) in riff.chunks().iter().enumerate() {
        println!(
            "  {:>3} {:?} {:>10} bytes{}",
            index.bright_black(),
            chunk.tag_str(),
            chunk.declared_len(),
            if chunk.is_padded() { " +pad" } else { "" }
        );
    }

    println!(
        "{} {}",
        "RIFF size (recomputed):".bright_black(),
        riff.total_size()
    );

    Ok(())
}
