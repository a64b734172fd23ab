//! Asset map construction.

use crate::collaborators::{AssetStore, StoreError, UploadedAsset};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use pagesmith_post::AssetMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

const DEFAULT_ASSET_NAME: &str = "asset.png";
const DEFAULT_MIME: &str = "application/octet-stream";

/// Make an uploaded filename safe to reference from markup.
///
/// Characters outside `[A-Za-z0-9_.-]` become `_`, a `.jpeg`/`.jpg`
/// extension (any case) becomes `.jpg`, and an empty name becomes
/// `asset.png`.
pub fn sanitize_asset_name(name: &str) -> String {
    let name = if name.is_empty() { DEFAULT_ASSET_NAME } else { name };
    let mut clean: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let lower = clean.to_ascii_lowercase();
    for ext in [".jpeg", ".jpg"] {
        if lower.ends_with(ext) {
            clean.truncate(clean.len() - ext.len());
            clean.push_str(".jpg");
            break;
        }
    }
    clean
}

/// Base64 `data:` URL for a payload.
pub fn data_url(mime: Option<&str>, bytes: &[u8]) -> String {
    let mime = mime.filter(|m| !m.trim().is_empty()).unwrap_or(DEFAULT_MIME);
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

/// Filename → `data:` URL map, in upload order. Later uploads with the same
/// sanitized name replace earlier ones.
pub fn build_asset_map(uploads: &[UploadedAsset]) -> AssetMap {
    let mut map = AssetMap::new();
    for upload in uploads {
        map.insert(
            sanitize_asset_name(&upload.name),
            data_url(upload.mime.as_deref(), &upload.bytes),
        );
    }
    map
}

/// Guess a MIME type from a file extension.
pub fn mime_for_name(name: &str) -> Option<&'static str> {
    let ext = Path::new(name).extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        _ => return None,
    };
    Some(mime)
}

/// An asset store backed by a local directory; keys are file names.
#[derive(Debug, Clone)]
pub struct DirectoryAssetStore {
    root: PathBuf,
}

impl DirectoryAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every regular file in the directory, sorted by name.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                if let Some(name) = entry.file_name().to_str() {
                    keys.push(name.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }

    /// The file a key names. Keys must be a bare file name; anything with a
    /// separator, a parent reference or a root resolves to nothing.
    fn path_for(&self, key: &str) -> Option<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if !key.contains(['/', '\\']) => Some(self.root.join(name)),
            _ => None,
        }
    }
}

impl AssetStore for DirectoryAssetStore {
    fn resolve(&self, keys: &[String]) -> Result<Vec<UploadedAsset>, StoreError> {
        keys.iter()
            .map(|key| {
                let Some(path) = self.path_for(key) else {
                    tracing::warn!(key = %key, "rejected asset key outside the store root");
                    return Err(StoreError::NotFound(key.clone()));
                };
                if !path.is_file() {
                    return Err(StoreError::NotFound(key.clone()));
                }
                let bytes = fs::read(&path)?;
                Ok(UploadedAsset::new(key.clone(), mime_for_name(key), bytes))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_asset_name() {
        assert_eq!(sanitize_asset_name("My Logo (1).PNG"), "My_Logo__1_.PNG");
        assert_eq!(sanitize_asset_name("hero.JPEG"), "hero.jpg");
        assert_eq!(sanitize_asset_name("photo.Jpg"), "photo.jpg");
        assert_eq!(sanitize_asset_name(""), "asset.png");
        assert_eq!(sanitize_asset_name("café.png"), "caf_.png");
    }

    #[test]
    fn test_data_url() {
        assert_eq!(data_url(Some("image/png"), b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(data_url(None, b""), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_build_asset_map_order() {
        let uploads = vec![
            UploadedAsset::new("b.png", Some("image/png"), vec![1]),
            UploadedAsset::new("a photo.jpeg", Some("image/jpeg"), vec![2]),
        ];
        let map = build_asset_map(&uploads);
        let names: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(names, ["b.png", "a_photo.jpg"]);
        assert_eq!(map["a_photo.jpg"], "data:image/jpeg;base64,Ag==");
    }

    #[test]
    fn test_directory_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("logo.png"), b"png").unwrap();
        fs::write(dir.path().join("a.svg"), b"<svg/>").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let store = DirectoryAssetStore::new(dir.path());
        let keys = store.keys().unwrap();
        assert_eq!(keys, ["a.svg", "logo.png"]);

        let assets = store.resolve(&keys).unwrap();
        assert_eq!(assets[0].mime.as_deref(), Some("image/svg+xml"));
        assert_eq!(assets[1].bytes, b"png");

        let missing = store.resolve(&["nope.png".to_string()]);
        assert!(matches!(missing, Err(StoreError::NotFound(name)) if name == "nope.png"));
    }

    #[test]
    fn test_directory_store_stays_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let uploads = dir.path().join("uploads");
        fs::create_dir(&uploads).unwrap();
        fs::write(dir.path().join("secret.txt"), b"TOPSECRET").unwrap();
        fs::write(uploads.join("logo.png"), b"png").unwrap();

        let store = DirectoryAssetStore::new(&uploads);
        let outside = dir.path().join("secret.txt").to_string_lossy().into_owned();
        for key in ["../secret.txt", "./logo.png", "nested/logo.png", "..", outside.as_str(), ""] {
            let resolved = store.resolve(&[key.to_string()]);
            assert!(matches!(resolved, Err(StoreError::NotFound(_))), "key {key:?} resolved");
        }
        assert_eq!(store.resolve(&["logo.png".to_string()]).unwrap()[0].bytes, b"png");
    }
}
