use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use crate::foundation::core::Rgba;
use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::foundation::ids::ImageId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
/// Procedural pattern for generated images.
pub enum GeneratedPattern {
    /// Colored grid with coordinates, used as a resolution placeholder.
    ColorGrid,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Where an image's pixels come from.
pub enum ImageSource {
    /// Generated by the renderer from a pattern.
    Generated {
        /// Pattern to generate.
        pattern: GeneratedPattern,
        /// Background fill.
        fill: Rgba,
        /// Keep an alpha channel.
        alpha: bool,
        /// Store as floating point.
        float: bool,
    },
    /// Loaded from a file on disk.
    File {
        /// Path as given by the user.
        path: PathBuf,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Request for a named image of a given size.
pub struct ImageDesc {
    /// Unique image name.
    pub name: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel source.
    pub source: ImageSource,
}

impl ImageDesc {
    /// Color-grid placeholder with black fill and alpha.
    pub fn color_grid(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            source: ImageSource::Generated {
                pattern: GeneratedPattern::ColorGrid,
                fill: Rgba::BLACK,
                alpha: true,
                float: false,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
/// Image held by a store.
pub struct ImageEntry {
    /// Store id.
    pub id: ImageId,
    /// Description the image was created from.
    pub desc: ImageDesc,
    /// Kept alive even with no users.
    pub persistent: bool,
}

/// External image-resource store keyed by name.
pub trait ImageStore {
    /// Image id by name.
    fn find(&self, name: &str) -> Option<ImageId>;

    /// Allocate a new image. Names must be unique.
    fn create(&mut self, desc: ImageDesc) -> ProjectorResult<ImageId>;

    /// Native pixel dimensions of an image.
    fn native_size(&self, id: ImageId) -> Option<(u32, u32)>;

    /// Mark an image as kept alive regardless of users.
    fn set_persistent(&mut self, id: ImageId, persistent: bool) -> ProjectorResult<()>;

    /// Existing image with `desc.name`, or a newly created one.
    fn get_or_create(&mut self, desc: ImageDesc) -> ProjectorResult<ImageId> {
        match self.find(&desc.name) {
            Some(id) => Ok(id),
            None => self.create(desc),
        }
    }
}

#[derive(Clone, Debug, Default)]
/// In-process image store.
pub struct MemoryImageStore {
    entries: Vec<ImageEntry>,
}

impl MemoryImageStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no images.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Image by id.
    pub fn get(&self, id: ImageId) -> Option<&ImageEntry> {
        self.entries.get(id.0 as usize)
    }

    /// All images in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ImageEntry> {
        self.entries.iter()
    }

    /// Register an image file, reading only its header for the native size.
    ///
    /// The image name is the file name. Loading the same path twice returns the same id.
    pub fn load_file(&mut self, path: &Path) -> ProjectorResult<ImageId> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ProjectorError::validation("image path must end in a file name"))?
            .to_owned();
        if let Some(id) = self.find(&name) {
            return Ok(id);
        }
        let (width, height) = image::image_dimensions(path)
            .with_context(|| format!("read image header '{}'", path.display()))?;
        self.create(ImageDesc {
            name,
            width,
            height,
            source: ImageSource::File {
                path: path.to_path_buf(),
            },
        })
    }

    /// Register an in-memory encoded image under `name`.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> ProjectorResult<ImageId> {
        let img = image::load_from_memory(bytes)?;
        self.create(ImageDesc {
            name: name.to_owned(),
            width: img.width(),
            height: img.height(),
            source: ImageSource::File {
                path: PathBuf::from(name),
            },
        })
    }
}

impl ImageStore for MemoryImageStore {
    fn find(&self, name: &str) -> Option<ImageId> {
        self.entries
            .iter()
            .find(|e| e.desc.name == name)
            .map(|e| e.id)
    }

    fn create(&mut self, desc: ImageDesc) -> ProjectorResult<ImageId> {
        if desc.name.is_empty() {
            return Err(ProjectorError::validation("image name must be non-empty"));
        }
        if self.find(&desc.name).is_some() {
            return Err(ProjectorError::validation(format!(
                "image '{}' already exists",
                desc.name
            )));
        }
        let id = ImageId(self.entries.len() as u32);
        tracing::debug!(name = %desc.name, width = desc.width, height = desc.height, "create image");
        self.entries.push(ImageEntry {
            id,
            desc,
            persistent: false,
        });
        Ok(id)
    }

    fn native_size(&self, id: ImageId) -> Option<(u32, u32)> {
        self.get(id).map(|e| (e.desc.width, e.desc.height))
    }

    fn set_persistent(&mut self, id: ImageId, persistent: bool) -> ProjectorResult<()> {
        let entry = self
            .entries
            .get_mut(id.0 as usize)
            .ok_or_else(|| ProjectorError::validation(format!("unknown image {}", id.0)))?;
        entry.persistent = persistent;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
