//! Embedded grid page for single-binary distribution
//!
//! The page, its stylesheet and the wasm-pack output under `pkg/` are
//! compiled into the binary. Debug builds read them from disk instead.

use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "../ui/www/"]
#[include = "index.html"]
#[include = "style.css"]
#[include = "pkg/*.js"]
#[include = "pkg/*.wasm"]
pub struct PageAssets;

pub const INDEX: &str = "index.html";

/// Look up an asset and its MIME type. An empty path or `/` means the page.
pub fn get_asset(path: &str) -> Option<(Vec<u8>, &'static str)> {
    let path = match path.trim_start_matches('/') {
        "" => INDEX,
        rest => rest,
    };

    PageAssets::get(path).map(|file| {
        let mime = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream");
        (file.data.into_owned(), mime)
    })
}
