use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use satchel_catalog::{Item, ItemDescriptor, ItemKind};
use satchel_core::{EntityId, ItemId};
use satchel_inventory::{Loadout, LoadoutConfig, SlotRef};
use satchel_transfer::{Container, TransferEngine, TransferRequest};

fn consumable(name: &str) -> Item {
    ItemDescriptor::new(ItemId::new(), name)
        .stackable(true)
        .with_kind(ItemKind::Action { consumable: true })
        .into_item()
}

fn loadout_with(size: usize) -> Loadout {
    let config = LoadoutConfig {
        inventory_size: size,
        ..LoadoutConfig::default()
    };
    Loadout::new(EntityId::new(), &config).unwrap()
}

fn bench_simple_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_transfer");
    let potion = consumable("Potion");

    for size in [16usize, 64, 256] {
        group.bench_with_input(BenchmarkId::new("inventory_to_action", size), &size, |b, &size| {
            let engine = TransferEngine::new();
            let mut loadout = loadout_with(size);
            loadout.add_items(SlotRef::Inventory(0), &potion, 50).unwrap();

            // Back and forth keeps the state stable across iterations.
            b.iter(|| {
                engine
                    .execute(&mut loadout, TransferRequest::new(SlotRef::Inventory(0), SlotRef::Action(0)))
                    .unwrap();
                black_box(
                    engine
                        .execute(&mut loadout, TransferRequest::new(SlotRef::Action(0), SlotRef::Inventory(0)))
                        .unwrap(),
                );
            });
        });
    }

    group.finish();
}

fn bench_swap(c: &mut Criterion) {
    let mut group = c.benchmark_group("swap");
    let potion = consumable("Potion");
    let elixir = consumable("Elixir");

    group.bench_function("inventory_action_swap", |b| {
        let engine = TransferEngine::new();
        let mut loadout = loadout_with(16);
        loadout.add_items(SlotRef::Inventory(0), &potion, 3).unwrap();
        loadout.add_items(SlotRef::Action(0), &elixir, 2).unwrap();

        b.iter(|| {
            black_box(
                engine
                    .execute(&mut loadout, TransferRequest::new(SlotRef::Inventory(0), SlotRef::Action(0)))
                    .unwrap(),
            );
        });
    });

    group.bench_function("rolled_back_swap", |b| {
        let engine = TransferEngine::new();
        let rock = ItemDescriptor::new(ItemId::new(), "Rock").into_item();
        let config = LoadoutConfig {
            inventory_size: 1,
            inventory_stack_limit: 2,
            action_slots: 1,
            action_stack_limit: 5,
        };
        let mut loadout = Loadout::new(EntityId::new(), &config).unwrap();
        loadout.add_items(SlotRef::Action(0), &potion, 5).unwrap();
        loadout.add_items(SlotRef::Inventory(0), &rock, 1).unwrap();

        b.iter(|| {
            black_box(
                engine
                    .execute(&mut loadout, TransferRequest::new(SlotRef::Action(0), SlotRef::Inventory(0)))
                    .unwrap(),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_simple_transfer, bench_swap);
criterion_main!(benches);
