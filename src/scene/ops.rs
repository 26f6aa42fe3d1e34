use crate::assets::catalog::ensure_catalog_images;
use crate::assets::store::{ImageStore, MemoryImageStore};
use crate::foundation::core::Transform3;
use crate::foundation::error::{ProjectorError, ProjectorResult};
use crate::foundation::ids::{ImageId, ProjectorId};
use crate::foundation::math::random_color;
use crate::scene::projector::Projector;
use crate::settings::model::{ProjectorSettings, SettingChange};

/// Base name for new projectors.
pub const PROJECTOR_BASE_NAME: &str = "Projector";

/// Projectors plus the shared image store.
#[derive(Debug)]
pub struct Scene<S: ImageStore = MemoryImageStore> {
    store: S,
    projectors: Vec<Projector>,
    next_id: u32,
    /// Transform new projectors are placed at.
    pub cursor: Transform3,
}

impl Default for Scene<MemoryImageStore> {
    fn default() -> Self {
        Self::new(MemoryImageStore::new())
    }
}

impl<S: ImageStore> Scene<S> {
    /// Empty scene over `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            projectors: Vec::new(),
            next_id: 0,
            cursor: Transform3::default(),
        }
    }

    /// Shared image store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Shared image store, mutable.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Projector by id.
    pub fn get(&self, id: ProjectorId) -> ProjectorResult<&Projector> {
        self.projectors
            .iter()
            .find(|p| p.id == id)
            .ok_or(ProjectorError::UnknownProjector(id))
    }

    fn index(&self, id: ProjectorId) -> ProjectorResult<usize> {
        self.projectors
            .iter()
            .position(|p| p.id == id)
            .ok_or(ProjectorError::UnknownProjector(id))
    }

    /// All projectors, or only the selected ones.
    pub fn projectors(&self, only_selected: bool) -> impl Iterator<Item = &Projector> {
        self.projectors
            .iter()
            .filter(move |p| !only_selected || p.selected)
    }

    /// Number of projectors.
    pub fn len(&self) -> usize {
        self.projectors.len()
    }

    /// Whether the scene has no projectors.
    pub fn is_empty(&self) -> bool {
        self.projectors.is_empty()
    }

    fn unique_name(&self) -> String {
        let taken = |name: &str| self.projectors.iter().any(|p| p.controller.name == name);
        if !taken(PROJECTOR_BASE_NAME) {
            return PROJECTOR_BASE_NAME.to_owned();
        }
        (1u32..)
            .map(|n| format!("{PROJECTOR_BASE_NAME}.{n:03}"))
            .find(|name| !taken(name))
            .unwrap_or_else(|| PROJECTOR_BASE_NAME.to_owned())
    }

    /// Create a projector at the cursor, make it the only selection and return its id.
    ///
    /// `seed` picks the checker color. Catalog images are allocated on the first call.
    #[tracing::instrument(skip(self))]
    pub fn create_projector(&mut self, seed: u64) -> ProjectorResult<ProjectorId> {
        ensure_catalog_images(&mut self.store)?;
        let id = ProjectorId(self.next_id);
        let mut projector = Projector::new(id, self.unique_name(), self.cursor)?;
        projector.init(seed, &mut self.store)?;
        self.next_id += 1;
        self.deselect_all();
        projector.selected = true;
        tracing::info!(%id, name = %projector.controller.name, "created projector");
        self.projectors.push(projector);
        Ok(id)
    }

    /// Remove a projector together with its emitter and graph.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: ProjectorId) -> ProjectorResult<Projector> {
        let idx = self.index(id)?;
        let projector = self.projectors.remove(idx);
        tracing::info!(%id, name = %projector.controller.name, "deleted projector");
        Ok(projector)
    }

    /// Remove every selected projector. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let before = self.projectors.len();
        self.projectors.retain(|p| !p.selected);
        let removed = before - self.projectors.len();
        tracing::info!(removed, "deleted selected projectors");
        removed
    }

    /// Set the selection state of one projector.
    pub fn select(&mut self, id: ProjectorId, selected: bool) -> ProjectorResult<()> {
        let idx = self.index(id)?;
        self.projectors[idx].selected = selected;
        Ok(())
    }

    /// Clear the selection.
    pub fn deselect_all(&mut self) {
        for p in &mut self.projectors {
            p.selected = false;
        }
    }

    /// Apply one settings change, rebuilding the graph if it turns out to be damaged.
    pub fn apply(&mut self, id: ProjectorId, change: SettingChange) -> ProjectorResult<()> {
        let idx = self.index(id)?;
        let projector = &mut self.projectors[idx];
        let result = projector.apply(change, &mut self.store);
        recover(projector, &mut self.store, result)
    }

    /// Replace all settings of one projector.
    pub fn apply_snapshot(
        &mut self,
        id: ProjectorId,
        settings: ProjectorSettings,
    ) -> ProjectorResult<()> {
        let idx = self.index(id)?;
        let projector = &mut self.projectors[idx];
        let result = projector.apply_snapshot(settings, &mut self.store);
        recover(projector, &mut self.store, result)
    }

    /// Bind or clear the user image of one projector.
    pub fn bind_image(&mut self, id: ProjectorId, image: Option<ImageId>) -> ProjectorResult<()> {
        if let Some(image) = image
            && self.store.native_size(image).is_none()
        {
            return Err(ProjectorError::validation(format!("unknown image {}", image.0)));
        }
        let idx = self.index(id)?;
        let projector = &mut self.projectors[idx];
        let result = projector.bind_image(image, &mut self.store);
        recover(projector, &mut self.store, result)
    }

    /// New random checker color for the single selected projector.
    pub fn randomize_color(&mut self, seed: u64) -> ProjectorResult<ProjectorId> {
        let selected: Vec<ProjectorId> = self.projectors(true).map(|p| p.id).collect();
        let [id] = selected[..] else {
            return Err(ProjectorError::validation(
                "randomize color needs exactly one selected projector",
            ));
        };
        self.apply(id, SettingChange::ProjectedColor(random_color(seed)))?;
        Ok(id)
    }
}

fn recover<S: ImageStore>(
    projector: &mut Projector,
    store: &mut S,
    result: ProjectorResult<()>,
) -> ProjectorResult<()> {
    match result {
        Err(err) if err.is_structural() => {
            tracing::warn!(projector = %projector.id, error = %err, "graph damaged, rebuilding");
            projector.rebuild_graph(store)
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/ops.rs"]
mod tests;
