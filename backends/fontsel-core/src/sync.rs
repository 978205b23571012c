// this_file: backends/fontsel-core/src/sync.rs

//! Propagation of a font change from one active entity to its cohort.
//!
//! Resolution happens before an engine is ever invoked, so a propagation
//! pass cannot fail part way through: every cohort member either converges
//! on the new selection or is skipped by the guards below.

use crate::cache::ResourceCache;
use crate::diagnostics::PropagationDiagnostics;
use crate::gate::UpdateGate;
use crate::traits::TextEntity;
use crate::types::{same_handle, EntityKind, FontHandle, Selection};

/// Outcome of one propagation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropagationReport {
    pub kind: EntityKind,
    /// Cohort members that received the new font
    pub updated: usize,
    /// Cohort members left alone (wrong kind or already matching)
    pub skipped: usize,
    /// Cache entries collected after propagation
    pub evicted: usize,
}

/// Applies a resolved handle across an active entity and its cohort.
pub struct SyncEngine<'a> {
    cache: &'a mut ResourceCache,
    gate: &'a UpdateGate,
    clear_type_slots: bool,
}

impl<'a> SyncEngine<'a> {
    pub fn new(cache: &'a mut ResourceCache, gate: &'a UpdateGate) -> Self {
        Self {
            cache,
            gate,
            clear_type_slots: false,
        }
    }

    /// Reset bold/italic/bold-italic slots to the builtin resource on change.
    pub fn clear_type_slots(mut self, clear: bool) -> Self {
        self.clear_type_slots = clear;
        self
    }

    /// Assign `handle` to `active` and to every cohort member of the same kind
    /// that does not already use it, recording `selection` as the relink key.
    /// Unused cache entries are collected afterwards.
    ///
    /// `cohort` must not contain `active` itself.
    pub fn apply_font_change<'e, A, E, I>(
        mut self,
        handle: &FontHandle,
        selection: &Selection,
        active: &mut A,
        cohort: I,
    ) -> PropagationReport
    where
        A: TextEntity + ?Sized,
        E: TextEntity + ?Sized + 'e,
        I: IntoIterator<Item = &'e mut E>,
    {
        let _guard = self.gate.suppress();
        let blank = self.cache.builtin().cloned();
        let kind = active.kind();

        self.assign(active, handle, blank.as_ref());
        active.state_mut().adopt(selection);

        let mut updated = 0;
        let mut skipped = 0;
        for member in cohort {
            if !member.kind().is_font_bearing()
                || member.kind() != kind
                || same_handle(member.font(), Some(handle))
            {
                skipped += 1;
                continue;
            }
            self.assign(member, handle, blank.as_ref());
            member.state_mut().adopt(selection);
            updated += 1;
        }

        drop(blank);
        let evicted = self.cache.garbage_collect();

        let report = PropagationReport {
            kind,
            updated,
            skipped,
            evicted,
        };
        PropagationDiagnostics::new(handle.name(), selection, &report).log();
        report
    }

    fn assign<T: TextEntity + ?Sized>(
        &self,
        entity: &mut T,
        handle: &FontHandle,
        blank: Option<&FontHandle>,
    ) {
        if self.clear_type_slots {
            entity.set_type_face_slots(blank.cloned());
        }
        entity.set_font(Some(FontHandle::clone(handle)));
    }
}


#[cfg(test)]
mod tests {
    use super::testing::TestEntity;
    use super::*;
    use crate::cache::testing::memory_cache;
    use crate::types::{FontData, FontResource, FontVariant};
    use std::sync::Arc;

    const REGULAR: &str = "/fonts/Roboto-Regular.ttf";
    const BOLD: &str = "/fonts/Roboto-Bold.ttf";

    fn regular() -> FontVariant {
        FontVariant::new("Regular", "Roboto-Regular", REGULAR)
    }

    fn bold() -> FontVariant {
        FontVariant::new("Bold", "Roboto-Bold", BOLD)
    }

    fn bold_selection() -> Selection {
        Selection {
            family_index: 0,
            family_name: "Roboto".into(),
            variant: "Bold".into(),
        }
    }

    #[test]
    fn test_cohort_converges_and_old_resource_is_collected() {
        let (mut cache, _fs) = memory_cache(&[REGULAR, BOLD]);
        let gate = UpdateGate::new();

        let old = cache.resolve(&regular()).unwrap();
        let mut active = TestEntity::new(EntityKind::TextObject, Some(old.clone()));
        let mut cohort = vec![
            TestEntity::new(EntityKind::TextObject, Some(old.clone())),
            TestEntity::new(EntityKind::TextObject, Some(old.clone())),
        ];
        drop(old);

        let handle = cache.resolve(&bold()).unwrap();
        let report = SyncEngine::new(&mut cache, &gate).apply_font_change(
            &handle,
            &bold_selection(),
            &mut active,
            cohort.iter_mut(),
        );

        assert_eq!(report.updated, 2);
        assert_eq!(report.evicted, 1);
        for entity in std::iter::once(&active).chain(cohort.iter()) {
            assert!(Arc::ptr_eq(entity.font.as_ref().unwrap(), &handle));
            assert_eq!(entity.state.relink_pair(), Some(("Roboto", "Bold")));
            assert_eq!(entity.state.family_index, Some(0));
        }
        assert!(!cache.contains("Roboto-Regular"));
        assert!(cache.contains("Roboto-Bold"));
        assert!(!gate.is_suppressed());
    }

    #[test]
    fn test_skips_other_kinds_and_matching_members() {
        let (mut cache, _fs) = memory_cache(&[REGULAR, BOLD]);
        let gate = UpdateGate::new();
        let handle = cache.resolve(&bold()).unwrap();

        let mut active = TestEntity::new(EntityKind::TextStrip, None);
        let mut strip_done = TestEntity::new(EntityKind::TextStrip, Some(handle.clone()));
        let mut object = TestEntity::new(EntityKind::TextObject, None);
        let mut mesh = TestEntity::new(EntityKind::Other, None);
        let mut cohort: Vec<&mut dyn TextEntity> = vec![&mut strip_done, &mut object, &mut mesh];

        let report = SyncEngine::new(&mut cache, &gate).apply_font_change(
            &handle,
            &bold_selection(),
            &mut active,
            cohort.iter_mut(),
        );
        drop(cohort);

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped, 3);
        assert!(object.font.is_none());
        assert!(mesh.state.relink_pair().is_none());
    }

    #[test]
    fn test_clear_type_slots_uses_builtin() {
        let (mut cache, _fs) = memory_cache(&[REGULAR, BOLD]);
        let gate = UpdateGate::new();
        let builtin = cache.insert_builtin(FontResource::new(
            "Bfont Regular",
            "<builtin>",
            FontData::Owned(vec![]),
        ));
        let old = cache.resolve(&regular()).unwrap();
        let handle = cache.resolve(&bold()).unwrap();

        let mut active = TestEntity::new(EntityKind::TextObject, Some(old.clone()));
        let mut other = TestEntity::new(EntityKind::TextObject, Some(old));
        SyncEngine::new(&mut cache, &gate)
            .clear_type_slots(true)
            .apply_font_change(
                &handle,
                &bold_selection(),
                &mut active,
                std::iter::once(&mut other),
            );

        for entity in [&active, &other] {
            assert!(Arc::ptr_eq(entity.type_slots.as_ref().unwrap(), &builtin));
            assert!(Arc::ptr_eq(entity.font.as_ref().unwrap(), &handle));
            assert_eq!(entity.font_writes, 1);
        }
    }

    #[test]
    fn test_clear_type_slots_without_builtin_blanks() {
        let (mut cache, _fs) = memory_cache(&[BOLD]);
        let gate = UpdateGate::new();
        let handle = cache.resolve(&bold()).unwrap();

        let mut active = TestEntity::new(EntityKind::TextObject, Some(handle.clone()));
        SyncEngine::new(&mut cache, &gate)
            .clear_type_slots(true)
            .apply_font_change(
                &handle,
                &bold_selection(),
                &mut active,
                std::iter::empty::<&mut TestEntity>(),
            );
        assert!(active.type_slots.is_none());
    }

    #[test]
    fn test_non_font_bearing_members_are_skipped() {
        let (mut cache, _fs) = memory_cache(&[BOLD]);
        let gate = UpdateGate::new();
        let handle = cache.resolve(&bold()).unwrap();

        let mut active = TestEntity::new(EntityKind::Other, None);
        let mut mesh = TestEntity::new(EntityKind::Other, None);
        let report = SyncEngine::new(&mut cache, &gate).apply_font_change(
            &handle,
            &bold_selection(),
            &mut active,
            std::iter::once(&mut mesh),
        );

        assert_eq!(report.updated, 0);
        assert_eq!(report.skipped, 1);
        assert!(mesh.font.is_none());
        assert_eq!(mesh.font_writes, 0);
    }
}
