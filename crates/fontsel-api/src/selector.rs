// this_file: crates/fontsel-api/src/selector.rs

//! The selector context: UI-facing entry points guarded by an [`UpdateGate`].
//!
//! Each entry point is an explicit command a host adapter calls in response
//! to a property write (family index, variant, favorite flag). When the gate
//! is suppressed, every entry point returns [`UpdateOutcome::Suppressed`]
//! without touching the cache, the favorites document or any entity.

use fontsel_core::{
    FamilyCatalog, FavoriteStore, FileSystem, FontData, FontHandle, FontLoader, FontResource,
    FontselError, PropagationReport, ResourceCache, Result, SelectorConfig, SelectorState,
    Selection, SyncEngine, TextEntity, UpdateGate,
};
use std::sync::Arc;

/// What a guarded entry point did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The font was resolved and propagated
    Applied(PropagationReport),
    /// The favorite flag changed and was persisted
    FavoriteChanged { family: String, favorite: bool },
    /// The active entity no longer has a family selected
    Deselected,
    /// Nothing to switch to
    Unchanged,
    /// Another update is in progress; nothing happened
    Suppressed,
}

/// Cycling direction for [`FontSelector::switch_family`] and
/// [`FontSelector::switch_variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

impl Direction {
    fn step(self, position: Option<usize>, len: usize) -> usize {
        match (self, position) {
            (Direction::Next, Some(p)) => (p + 1) % len,
            (Direction::Previous, Some(p)) => (p + len - 1) % len,
            (Direction::Next, None) => 0,
            (Direction::Previous, None) => len - 1,
        }
    }
}

/// One line of the family list as the UI shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyRow<'a> {
    pub index: usize,
    pub name: &'a str,
    /// Favorite icon, only when the entity shows favorites
    pub favorite: bool,
    /// Multi-component icon, only when the entity shows it
    pub multi_component: bool,
}

/// Selector context owning the catalog, the resource cache and the gate.
pub struct FontSelector {
    config: SelectorConfig,
    catalog: FamilyCatalog,
    cache: ResourceCache,
    gate: Arc<UpdateGate>,
    favorites: FavoriteStore,
}

impl FontSelector {
    /// Build a selector over `catalog`, syncing favorite flags with the
    /// persisted document.
    pub fn new(
        config: SelectorConfig,
        mut catalog: FamilyCatalog,
        loader: Arc<dyn FontLoader>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        let favorites = FavoriteStore::new(config.favorites_path());
        catalog.apply_favorites(&favorites.load());
        Self {
            config,
            catalog,
            cache: ResourceCache::new(loader, fs),
            gate: Arc::new(UpdateGate::new()),
            favorites,
        }
    }

    /// Register the always-present default resource under the configured name.
    pub fn register_builtin(&mut self, data: FontData) -> FontHandle {
        self.cache.insert_builtin(FontResource::new(
            self.config.default_font_name.as_str(),
            "<builtin>",
            data,
        ))
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FamilyCatalog {
        &self.catalog
    }

    pub fn cache(&self) -> &ResourceCache {
        &self.cache
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    /// Shared handle on the gate, for host callbacks that must observe it.
    pub fn gate(&self) -> Arc<UpdateGate> {
        Arc::clone(&self.gate)
    }

    /// Select family `index` on `active` (or clear the selection with `None`)
    /// and apply its first variant.
    pub fn select_family<'e, A, E, I>(
        &mut self,
        active: &mut A,
        cohort: I,
        index: Option<usize>,
    ) -> Result<UpdateOutcome>
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        if self.cancelled("family selection") {
            return Ok(UpdateOutcome::Suppressed);
        }
        let Some(index) = index else {
            active.state_mut().family_index = None;
            return Ok(UpdateOutcome::Deselected);
        };

        let first = self.catalog.first_variant(index)?.to_owned();
        self.apply_variant(active, cohort, index, &first)
    }

    /// Apply `variant` of the active entity's current family.
    pub fn select_variant<'e, A, E, I>(
        &mut self,
        active: &mut A,
        cohort: I,
        variant: &str,
    ) -> Result<UpdateOutcome>
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        if self.cancelled("variant selection") {
            return Ok(UpdateOutcome::Suppressed);
        }
        let index = active
            .state()
            .family_index
            .ok_or(FontselError::NoFamilySelected)?;
        self.apply_variant(active, cohort, index, variant)
    }

    /// Move to the next/previous family visible under the entity's filter.
    pub fn switch_family<'e, A, E, I>(
        &mut self,
        active: &mut A,
        cohort: I,
        direction: Direction,
    ) -> Result<UpdateOutcome>
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        if self.cancelled("family switch") {
            return Ok(UpdateOutcome::Suppressed);
        }
        let visible = self.catalog.filter(&active.state().filter);
        if visible.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }
        let current = active
            .state()
            .family_index
            .and_then(|index| visible.iter().position(|&v| v == index));
        let target = visible[direction.step(current, visible.len())];
        self.select_family(active, cohort, Some(target))
    }

    /// Move to the next/previous variant of the current family.
    pub fn switch_variant<'e, A, E, I>(
        &mut self,
        active: &mut A,
        cohort: I,
        direction: Direction,
    ) -> Result<UpdateOutcome>
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        if self.cancelled("variant switch") {
            return Ok(UpdateOutcome::Suppressed);
        }
        let index = active
            .state()
            .family_index
            .ok_or(FontselError::NoFamilySelected)?;
        let variants = self.catalog.variants_of(index)?;
        if variants.is_empty() {
            return Ok(UpdateOutcome::Unchanged);
        }
        let current = active
            .state()
            .variant
            .as_deref()
            .and_then(|name| variants.iter().position(|v| *v == name));
        let target = variants[direction.step(current, variants.len())].to_owned();
        self.apply_variant(active, cohort, index, &target)
    }

    /// Set the favorite flag of family `index` and persist it.
    ///
    /// If the document cannot be written the flag is rolled back, so memory
    /// and storage never diverge.
    pub fn toggle_favorite(&mut self, index: usize, favorite: bool) -> Result<UpdateOutcome> {
        if self.cancelled("favorite update") {
            return Ok(UpdateOutcome::Suppressed);
        }
        let _guard = self.gate.suppress();

        let family = self.catalog.family(index)?;
        let name = family.name.clone();
        let previous = family.favorite;
        log::debug!("Updating favorite {} -> {}", name, favorite);

        self.catalog.set_favorite(index, favorite)?;
        match self.favorites.toggle_favorite(&name, favorite) {
            Ok(set) => {
                self.catalog.apply_favorites(&set);
                Ok(UpdateOutcome::FavoriteChanged {
                    family: name,
                    favorite,
                })
            }
            Err(e) => {
                log::warn!("Favorite change for {} rolled back: {}", name, e);
                self.catalog.set_favorite(index, previous)?;
                Err(e)
            }
        }
    }

    /// Recover an entity's index and variant from its relink identifiers.
    ///
    /// Returns false when the family (or variant) is no longer catalogued; the
    /// index is then cleared but the relink identifiers are kept.
    pub fn relink<E: TextEntity + ?Sized>(&self, entity: &mut E) -> bool {
        let _guard = self.gate.suppress();

        let Some((family_name, variant)) = entity
            .state()
            .relink_pair()
            .map(|(f, v)| (f.to_owned(), v.to_owned()))
        else {
            return false;
        };

        let state = entity.state_mut();
        match self.catalog.find_family(&family_name) {
            Some(index) => {
                let family = &self.catalog.families()[index];
                state.family_index = Some(index);
                if family.variant(&variant).is_some() {
                    state.variant = Some(variant);
                    true
                } else {
                    log::debug!("Variant {} of {} is gone", variant, family_name);
                    state.variant = family.variants.first().map(|v| v.name.clone());
                    false
                }
            }
            None => {
                log::debug!("Family {} is gone, clearing selection", family_name);
                state.family_index = None;
                state.variant = None;
                false
            }
        }
    }

    /// Install a re-scanned catalog, re-apply persisted favorites and relink
    /// `entities`. Returns how many entities recovered their selection.
    pub fn reload_catalog<'e, E, I>(&mut self, mut catalog: FamilyCatalog, entities: I) -> usize
    where
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        catalog.apply_favorites(&self.favorites.load());
        self.catalog = catalog;
        let relinked = entities
            .into_iter()
            .map(|entity| self.relink(entity))
            .filter(|found| *found)
            .count();
        log::info!(
            "Catalog reloaded ({} families, {} entities relinked)",
            self.catalog.len(),
            relinked
        );
        relinked
    }

    /// Indices of the families the entity's filter keeps.
    pub fn visible_families(&self, state: &SelectorState) -> Vec<usize> {
        self.catalog.filter(&state.filter)
    }

    /// Rows for the family list, honouring the entity's filter and icon toggles.
    pub fn family_rows(&self, state: &SelectorState) -> Vec<FamilyRow<'_>> {
        self.visible_families(state)
            .into_iter()
            .map(|index| {
                let family = &self.catalog.families()[index];
                FamilyRow {
                    index,
                    name: family.name.as_str(),
                    favorite: state.display.show_favorite && family.favorite,
                    multi_component: state.display.show_multi_component
                        && family.multi_component(),
                }
            })
            .collect()
    }

    fn cancelled(&self, what: &str) -> bool {
        let suppressed = self.gate.is_suppressed();
        if suppressed {
            log::debug!("{} cancelled, another update is in progress", what);
        }
        suppressed
    }

    /// Resolve first, mutate only on success.
    fn apply_variant<'e, A, E, I>(
        &mut self,
        active: &mut A,
        cohort: I,
        index: usize,
        variant: &str,
    ) -> Result<UpdateOutcome>
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        let family = self.catalog.family(index)?;
        let target = self.catalog.variant(index, variant)?;
        let selection = Selection {
            family_index: index,
            family_name: family.name.clone(),
            variant: target.name.clone(),
        };

        let handle = self.cache.resolve(target).map_err(|e| {
            log::debug!(
                "Update cancelled, unable to get font file for {} {}",
                selection.family_name,
                selection.variant
            );
            e
        })?;

        let report = SyncEngine::new(&mut self.cache, &self.gate)
            .clear_type_slots(self.config.remove_existing_type_fonts)
            .apply_font_change(&handle, &selection, active, cohort);
        Ok(UpdateOutcome::Applied(report))
    }
}
