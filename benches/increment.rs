//! increment_clicks 性能基准测试
//!
//! 基于临时 SQLite 数据库，覆盖"已存在记录累加"与"新建记录"两条路径。

use std::sync::Arc;

use activity_service::services::ActivityService;
use activity_service::storage::backend::SeaOrmStorage;
use activity_service::storage::{ActivityKey, ActivityStore};
use chrono::NaiveDate;
use criterion::{Criterion, criterion_group, criterion_main};
use tempfile::TempDir;

fn create_service(rt: &tokio::runtime::Runtime) -> (Arc<ActivityService>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("bench.db").display()
    );
    let storage = rt
        .block_on(SeaOrmStorage::new(&db_url, "sqlite"))
        .unwrap();
    let store: Arc<dyn ActivityStore> = Arc::new(storage);
    (Arc::new(ActivityService::with_max_retries(store, 3)), temp_dir)
}

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// 同一 key 反复累加（查找 + 原子 UPDATE）
fn bench_increment_existing(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (service, _dir) = create_service(&rt);
    let key = ActivityKey::new(1, "AAA", "2013J", base_date());
    rt.block_on(service.increment_clicks(key.clone(), 1)).unwrap();

    c.bench_function("increment/existing_record", |b| {
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            let key = key.clone();
            async move { service.increment_clicks(key, 1).await.unwrap() }
        });
    });
}

/// 每次使用新日期，走插入路径
fn bench_increment_new_records(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (service, _dir) = create_service(&rt);
    let mut day = 0i64;

    c.bench_function("increment/new_record", |b| {
        b.to_async(&rt).iter(|| {
            day += 1;
            let key = ActivityKey::new(
                2,
                "AAA",
                "2013J",
                base_date() + chrono::Duration::days(day),
            );
            let service = service.clone();
            async move { service.increment_clicks(key, 1).await.unwrap() }
        });
    });
}

/// 汇总查询
fn bench_total_clicks(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (service, _dir) = create_service(&rt);
    rt.block_on(async {
        for day in 0..365 {
            let key = ActivityKey::new(
                3,
                "AAA",
                "2013J",
                base_date() + chrono::Duration::days(day),
            );
            service.increment_clicks(key, 2).await.unwrap();
        }
    });

    c.bench_function("total_clicks/student_365_days", |b| {
        b.to_async(&rt).iter(|| {
            let service = service.clone();
            async move { service.total_clicks_by_student(3).await.unwrap() }
        });
    });
}

criterion_group!(
    benches,
    bench_increment_existing,
    bench_increment_new_records,
    bench_total_clicks
);
criterion_main!(benches);
