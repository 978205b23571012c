// this_file: benches/propagate.rs

//! Cohort propagation benchmarks

use camino::Utf8Path;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fontsel::core::{
    EntityKind, FileSystem, FontData, FontHandle, FontLoader, FontResource, FontVariant,
    ResourceCache, Result, Selection, SelectorState, SyncEngine, TextEntity, UpdateGate,
};
use std::sync::Arc;

struct StaticLoader;

impl FontLoader for StaticLoader {
    fn load(&self, variant: &FontVariant) -> Result<FontResource> {
        Ok(FontResource::new(
            variant.resource_name.as_str(),
            variant.filepath.as_path(),
            FontData::Owned(Vec::new()),
        ))
    }
}

struct AlwaysPresent;

impl FileSystem for AlwaysPresent {
    fn exists(&self, _path: &Utf8Path) -> bool {
        true
    }
}

struct Entity {
    kind: EntityKind,
    font: Option<FontHandle>,
    state: SelectorState,
}

impl TextEntity for Entity {
    fn kind(&self) -> EntityKind {
        self.kind
    }

    fn font(&self) -> Option<&FontHandle> {
        self.font.as_ref()
    }

    fn set_font(&mut self, font: Option<FontHandle>) {
        self.font = font;
    }

    fn state(&self) -> &SelectorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut SelectorState {
        &mut self.state
    }
}

fn bench_cohort_switch(c: &mut Criterion) {
    let regular = FontVariant::new("Regular", "Roboto-Regular", "/fonts/Roboto-Regular.ttf");
    let bold = FontVariant::new("Bold", "Roboto-Bold", "/fonts/Roboto-Bold.ttf");

    for size in [10usize, 100, 1000] {
        c.bench_with_input(BenchmarkId::new("cohort_switch", size), &size, |b, &size| {
            let mut cache = ResourceCache::new(Arc::new(StaticLoader), Arc::new(AlwaysPresent));
            let gate = UpdateGate::new();
            let mut entities: Vec<Entity> = (0..=size)
                .map(|i| Entity {
                    kind: if i % 3 == 0 {
                        EntityKind::TextStrip
                    } else {
                        EntityKind::TextObject
                    },
                    font: None,
                    state: SelectorState::default(),
                })
                .collect();
            let mut flip = false;

            b.iter(|| {
                flip = !flip;
                let variant = if flip { &bold } else { &regular };
                let handle = cache.resolve(variant).unwrap();
                let selection = Selection {
                    family_index: 0,
                    family_name: "Roboto".to_string(),
                    variant: variant.name.clone(),
                };
                let (active, cohort) = entities.split_at_mut(1);
                let report = SyncEngine::new(&mut cache, &gate).apply_font_change(
                    &handle,
                    &selection,
                    &mut active[0],
                    cohort.iter_mut(),
                );
                black_box(report)
            });
        });
    }
}

criterion_group!(benches, bench_cohort_switch);
criterion_main!(benches);
