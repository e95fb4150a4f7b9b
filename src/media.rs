use std::path::{Component, Path, PathBuf};

/// An uploaded image the renderer can point at
#[derive(Clone, Debug, PartialEq)]
pub struct MediaAsset {
    pub reference: String,
    pub url: String,
}

pub trait MediaLibrary {
    fn find(&self, reference: &str) -> Option<MediaAsset>;
}

/// Images uploaded as plain files into one directory and served under
/// `base_url`
pub struct UploadsDirectory {
    dir: PathBuf,
    base_url: String,
}

impl UploadsDirectory {
    pub fn new(dir: PathBuf, base_url: impl Into<String>) -> Self {
        Self {
            dir,
            base_url: base_url.into(),
        }
    }
}

/// A reference must name a file directly inside the uploads directory
fn is_bare_file_name(reference: &str) -> bool {
    let mut components = Path::new(reference).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

impl MediaLibrary for UploadsDirectory {
    fn find(&self, reference: &str) -> Option<MediaAsset> {
        if !is_bare_file_name(reference) {
            return None;
        }
        if !self.dir.join(reference).is_file() {
            return None;
        }

        Some(MediaAsset {
            reference: reference.to_string(),
            url: format!("{}/{}", self.base_url.trim_end_matches('/'), reference),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_existing_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("dubai.png"), b"png").unwrap();
        let uploads = UploadsDirectory::new(dir.path().to_path_buf(), "https://cdn.example.com/uploads/");

        let asset = uploads.find("dubai.png").unwrap();

        assert_eq!(asset.url, "https://cdn.example.com/uploads/dubai.png");
    }

    #[test]
    fn test_missing_upload() {
        let dir = tempfile::TempDir::new().unwrap();
        let uploads = UploadsDirectory::new(dir.path().to_path_buf(), "/uploads");
        assert!(uploads.find("sharjah.png").is_none());
    }

    #[test]
    fn test_references_cannot_leave_directory() {
        let root = tempfile::TempDir::new().unwrap();
        let uploads_dir = root.path().join("uploads");
        std::fs::create_dir(&uploads_dir).unwrap();
        std::fs::write(root.path().join("secret.png"), b"png").unwrap();
        std::fs::create_dir(uploads_dir.join("nested")).unwrap();
        std::fs::write(uploads_dir.join("nested").join("a.png"), b"png").unwrap();
        let uploads = UploadsDirectory::new(uploads_dir, "/uploads");

        assert!(uploads.find("../secret.png").is_none());
        assert!(uploads.find("nested/a.png").is_none());
        assert!(uploads.find("").is_none());
    }
}
