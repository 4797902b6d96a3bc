use crate::error::AssetError;
use std::fmt;
use std::path::PathBuf;

/// Where an asset file lives: on disk, or behind an HTTP(S) URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    File(PathBuf),
    Remote(String),
}

fn is_remote(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://")
}

impl AssetLocation {
    /// Resolves `path` against an optional base. Absolute URLs ignore the base.
    pub fn resolve(base: Option<&str>, path: &str) -> Self {
        if is_remote(path) {
            return Self::Remote(path.to_string());
        }
        match base {
            Some(base) if is_remote(base) => Self::Remote(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            Some(base) => Self::File(PathBuf::from(base).join(path)),
            None => Self::File(PathBuf::from(path)),
        }
    }

    /// A file next to this one, e.g. an atlas page image.
    pub fn sibling(&self, name: &str) -> Self {
        match self {
            Self::File(path) => Self::File(match path.parent() {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }),
            Self::Remote(url) => match url.rfind('/') {
                Some(idx) => Self::Remote(format!("{}/{}", &url[..idx], name)),
                None => Self::Remote(name.to_string()),
            },
        }
    }

    pub async fn fetch(&self) -> Result<Vec<u8>, AssetError> {
        match self {
            Self::File(path) => Ok(tokio::fs::read(path).await?),
            Self::Remote(url) => download(url).await,
        }
    }
}

impl fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Remote(url) => f.write_str(url),
        }
    }
}

async fn download(url: &str) -> Result<Vec<u8>, AssetError> {
    let response = reqwest::get(url).await?;
    if !response.status().is_success() {
        return Err(AssetError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    Ok(bytes.to_vec())
}
