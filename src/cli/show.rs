//! CLI `show` command: print one memory in full, optionally saving its image.

use anyhow::{bail, Context, Result};
use base64::Engine;
use std::path::Path;

use crate::config::MemoriaConfig;
use crate::ui::render;

/// Print the detail view of memory `id`.
pub fn show(config: &MemoriaConfig, id: &str, save_image: Option<&Path>) -> Result<()> {
    let mut journal = super::open_journal(config)?;
    let record = journal.select(id)?;

    println!("Memory: {}", record.id);
    println!("{}", render::render_detail(record));

    if let Some(path) = save_image {
        let Some(ref url) = record.generated_image_url else {
            bail!("memory {id} has no generated image");
        };
        let bytes = decode_data_uri(url)?;
        std::fs::write(path, &bytes)
            .with_context(|| format!("failed to write image to {}", path.display()))?;
        eprintln!("Image saved to {} ({} bytes)", path.display(), bytes.len());
    }

    Ok(())
}

/// Decode a `data:<mime>;base64,<payload>` URI. Remote URLs are rejected.
pub fn decode_data_uri(url: &str) -> Result<Vec<u8>> {
    let Some((meta, payload)) = url.strip_prefix("data:").and_then(|r| r.split_once(',')) else {
        bail!("image is a remote reference, not embedded data: {url}");
    };
    anyhow::ensure!(meta.ends_with(";base64"), "unsupported data URI encoding: {meta}");
    base64::engine::general_purpose::STANDARD
        .decode(payload)
        .context("image data is not valid base64")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_base64_data_uri() {
        let bytes = decode_data_uri("data:image/jpeg;base64,/9j/4A==").unwrap();
        assert_eq!(bytes, vec![0xff, 0xd8, 0xff, 0xe0]);
    }

    #[test]
    fn rejects_remote_urls() {
        assert!(decode_data_uri("https://picsum.photos/800/600?blur=2").is_err());
    }

    #[test]
    fn rejects_non_base64_data_uri() {
        assert!(decode_data_uri("data:text/plain,hello").is_err());
    }
}
