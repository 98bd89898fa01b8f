use rangelink_core::ShortCode;
use rangelink_storage::{LinkRecord, ReadRepository, Repository, SqliteRepository, StorageError};
use sqlx::sqlite::SqlitePoolOptions;

struct Fixture {
    repo: SqliteRepository,
}

impl Fixture {
    async fn start() -> Self {
        // A single long-lived connection keeps the in-memory database alive
        // for the whole test.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("open in-memory sqlite");

        let repo = SqliteRepository::new(pool);
        repo.migrate().await.expect("create schema");

        Self { repo }
    }
}

fn code(value: &str) -> ShortCode {
    ShortCode::parse(value).unwrap()
}

#[tokio::test]
async fn insert_and_find_by_short_code() {
    let fixture = Fixture::start().await;
    let record = LinkRecord::new(1_000_000, "https://example.com");

    fixture.repo.insert(record.clone()).await.unwrap();

    let got = fixture
        .repo
        .find_by_short_code(&code("4c92"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.id, 1_000_000);
    assert_eq!(got.long_url, "https://example.com");
    assert_eq!(got.short_code, record.short_code);
    assert_eq!(got.created_at.as_second(), record.created_at.as_second());
}

#[tokio::test]
async fn insert_and_find_by_long_url() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(LinkRecord::new(1_000_001, "https://example.com/a"))
        .await
        .unwrap();

    let got = fixture
        .repo
        .find_by_long_url("https://example.com/a")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.id, 1_000_001);
    assert_eq!(got.short_code.as_str(), "4c93");
}

#[tokio::test]
async fn lookups_return_none_when_missing() {
    let fixture = Fixture::start().await;

    assert!(fixture
        .repo
        .find_by_short_code(&code("zzz"))
        .await
        .unwrap()
        .is_none());
    assert!(fixture
        .repo
        .find_by_long_url("https://missing.example")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn insert_conflicts_when_id_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(LinkRecord::new(42, "https://one.example"))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(LinkRecord::new(42, "https://two.example"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::DuplicateKey(_)));
}

#[tokio::test]
async fn insert_conflicts_when_short_code_already_exists() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(LinkRecord::new(42, "https://one.example"))
        .await
        .unwrap();

    let mut forged = LinkRecord::new(43, "https://two.example");
    forged.short_code = ShortCode::from_id(42);
    let err = fixture.repo.insert(forged).await.unwrap_err();

    assert!(matches!(err, StorageError::DuplicateKey(_)));
}

#[tokio::test]
async fn duplicate_long_urls_are_allowed_and_lowest_id_wins() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(LinkRecord::new(20, "https://example.com"))
        .await
        .unwrap();
    fixture
        .repo
        .insert(LinkRecord::new(10, "https://example.com"))
        .await
        .unwrap();

    let got = fixture
        .repo
        .find_by_long_url("https://example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got.id, 10);
}

#[tokio::test]
async fn migrate_is_idempotent() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(LinkRecord::new(1, "https://example.com"))
        .await
        .unwrap();
    fixture.repo.migrate().await.unwrap();

    assert!(fixture
        .repo
        .find_by_short_code(&code("1"))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn ids_outside_sqlite_range_are_rejected() {
    let fixture = Fixture::start().await;

    let err = fixture
        .repo
        .insert(LinkRecord::new(u64::MAX, "https://example.com"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::InvalidData(_)));
}
