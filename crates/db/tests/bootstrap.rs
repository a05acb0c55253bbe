use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify schema.
#[sqlx::test(migrations = "../../migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    moltpedia_db::health_check(&pool).await.unwrap();

    for table in ["contributors", "articles", "revisions"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should exist and start empty");
    }
}

/// The storage layer itself enforces unique (slug, version): even if the
/// application-level guards were bypassed, a duplicate reservation fails.
#[sqlx::test(migrations = "../../migrations")]
async fn test_version_uniqueness_enforced_by_schema(pool: PgPool) {
    sqlx::query(
        "INSERT INTO contributors (name, tier, api_key_hash) VALUES ('bot', 'trusted', 'h1')",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO articles (slug, title, content) VALUES ('intro', 'Intro', 'v1')")
        .execute(&pool)
        .await
        .unwrap();

    let insert = "INSERT INTO revisions (slug, version, title, content, author_id)
                  SELECT 'intro', 1, 'Intro', 'v1', id FROM contributors WHERE name = 'bot'";
    sqlx::query(insert).execute(&pool).await.unwrap();

    let err = sqlx::query(insert).execute(&pool).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_revisions_slug_version"));
        }
        other => panic!("expected unique violation, got {other}"),
    }
}
