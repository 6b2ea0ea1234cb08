use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::sync::Arc;

use chrono::NaiveDate;

use bookforge_accounts::{default_chart, Account, AccountRegistry};
use bookforge_core::{TenantId, UserId};
use bookforge_journal::{EntryMeta, JournalEntryLine, JournalService};
use bookforge_reports::ReportGenerator;
use bookforge_store::InMemoryLedgerStore;

type Store = Arc<InMemoryLedgerStore>;

fn setup() -> (Store, TenantId, UserId, Vec<Account>) {
    let store: Store = Arc::new(InMemoryLedgerStore::new());
    let tenant_id = TenantId::new();
    let registry = AccountRegistry::new(store.clone());
    let chart = registry.seed_chart(tenant_id, default_chart()).unwrap();
    (store, tenant_id, UserId::new(), chart)
}

fn entry_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 15).unwrap()
}

fn bench_create_and_post(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_and_post");
    group.sample_size(1000);

    group.bench_function("two_line_entry", |b| {
        let (store, tenant_id, actor, chart) = setup();
        let journal = JournalService::new(store);
        let debit_account = chart[0].id;
        let credit_account = chart[9].id;

        b.iter(|| {
            journal
                .create_and_post(
                    tenant_id,
                    EntryMeta::manual("Bench entry").on(entry_date()),
                    vec![
                        JournalEntryLine::debit(debit_account, black_box(1_000)),
                        JournalEntryLine::credit(credit_account, black_box(1_000)),
                    ],
                    actor,
                )
                .unwrap();
        });
    });

    group.finish();
}

fn bench_trial_balance(c: &mut Criterion) {
    let mut group = c.benchmark_group("trial_balance");
    group.sample_size(100);

    for entries in [100u64, 1_000] {
        group.bench_function(format!("over_{entries}_entries"), |b| {
            let (store, tenant_id, actor, chart) = setup();
            let journal = JournalService::new(store.clone());
            let reports = ReportGenerator::new(store);

            for i in 0..entries {
                let debit_account = chart[(i % 4) as usize].id;
                let credit_account = chart[9 + (i % 3) as usize].id;
                journal
                    .create_and_post(
                        tenant_id,
                        EntryMeta::manual("Bench entry").on(entry_date()),
                        vec![
                            JournalEntryLine::debit(debit_account, 1_000 + i as i64),
                            JournalEntryLine::credit(credit_account, 1_000 + i as i64),
                        ],
                        actor,
                    )
                    .unwrap();
            }

            b.iter(|| {
                let tb = reports.trial_balance(tenant_id, None).unwrap();
                black_box(tb.total_debit)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_create_and_post, bench_trial_balance);
criterion_main!(benches);
