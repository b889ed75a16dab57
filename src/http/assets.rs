//! Static front-end bundle.
//!
//! Files are served from the configured root. Unknown paths get the index
//! document with `200 OK` so client-side routes resolve in the browser.

use tower_http::services::{ServeDir, ServeFile};

use crate::config::AssetsConfig;

pub type AssetService = ServeDir<ServeFile>;

/// Build the asset service with SPA fallback. Directory listings are never
/// generated.
pub fn asset_service(config: &AssetsConfig) -> AssetService {
    if !config.root.is_dir() {
        tracing::warn!(
            root = %config.root.display(),
            "Static asset directory not found, front-end requests will fail"
        );
    }

    ServeDir::new(&config.root)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(config.index_path()))
}
