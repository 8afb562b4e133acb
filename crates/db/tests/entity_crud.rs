//! Integration tests for the repository layer against a real database:
//! - Category and tag CRUD with unique-name enforcement
//! - Post create, partial update, and ownership-scoped listing
//! - Foreign-key behaviour when categories, tags, and posts are deleted

use assert_matches::assert_matches;
use inkpost_db::is_unique_violation;
use inkpost_db::models::category::{CreateCategory, UpdateCategory};
use inkpost_db::models::post::{CreatePost, UpdatePost};
use inkpost_db::models::tag::{CreateTag, UpdateTag};
use inkpost_db::models::user::CreateUser;
use inkpost_db::repositories::{CategoryRepo, PostRepo, PostTagRepo, TagRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, email: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn new_post(title: &str, category_id: Option<i64>) -> CreatePost {
    CreatePost {
        title: title.to_string(),
        content: String::new(),
        published: None,
        category_id,
        tag_ids: None,
    }
}

fn category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
    }
}

fn tag(name: &str) -> CreateTag {
    CreateTag {
        name: name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Categories and tags
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_category_crud(pool: PgPool) {
    let go = CategoryRepo::create(&pool, &category("  Go  ")).await.unwrap();
    assert_eq!(go.name, "Go", "names are stored trimmed");
    CategoryRepo::create(&pool, &category("Algorithms")).await.unwrap();

    let names: Vec<String> = CategoryRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Algorithms", "Go"]);

    let renamed = CategoryRepo::update(
        &pool,
        go.id,
        &UpdateCategory {
            name: Some("Golang".to_string()),
        },
    )
    .await
    .unwrap()
    .expect("category exists");
    assert_eq!(renamed.name, "Golang");

    assert!(CategoryRepo::delete(&pool, go.id).await.unwrap());
    assert!(!CategoryRepo::delete(&pool, go.id).await.unwrap());
    assert!(CategoryRepo::find_by_id(&pool, go.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_category_name_is_unique_violation(pool: PgPool) {
    CategoryRepo::create(&pool, &category("Go")).await.unwrap();
    let err = CategoryRepo::create(&pool, &category("Go")).await.unwrap_err();

    assert!(is_unique_violation(&err));
    assert_matches!(err, sqlx::Error::Database(ref db) if db.constraint() == Some("uq_categories_name"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_tag_returns_none(pool: PgPool) {
    let result = TagRepo::update(
        &pool,
        9_999,
        &UpdateTag {
            name: Some("x".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_tag_missing_ids_and_duplicate(pool: PgPool) {
    let infra = TagRepo::create(&pool, &tag("infra")).await.unwrap();

    let missing = TagRepo::missing_ids(&pool, &[9_002, infra.id, 9_001, 9_002])
        .await
        .unwrap();
    assert_eq!(missing, vec![9_002, 9_001], "input order, no repeats");
    assert!(TagRepo::missing_ids(&pool, &[infra.id]).await.unwrap().is_empty());
    assert!(TagRepo::missing_ids(&pool, &[]).await.unwrap().is_empty());

    let err = TagRepo::create(&pool, &tag("infra")).await.unwrap_err();
    assert!(is_unique_violation(&err));
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_post_defaults_and_partial_update(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let go = CategoryRepo::create(&pool, &category("Go")).await.unwrap();

    let post = PostRepo::create(&pool, user, &new_post("Hello", Some(go.id)))
        .await
        .unwrap();
    assert!(post.published, "published defaults to true");
    assert_eq!(post.content, "");
    assert_eq!(post.category_id, Some(go.id));

    // Absent fields stay put.
    let updated = PostRepo::update(
        &pool,
        post.id,
        &UpdatePost {
            content: Some("# Body".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.title, "Hello");
    assert_eq!(updated.content, "# Body");
    assert_eq!(updated.category_id, Some(go.id));

    // An explicit null clears the category.
    let cleared = PostRepo::update(
        &pool,
        post.id,
        &UpdatePost {
            category_id: Some(None),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(cleared.category_id, None);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_for_user_is_scoped_and_newest_first(pool: PgPool) {
    let alice = new_user(&pool, "alice@example.com").await;
    let bob = new_user(&pool, "bob@example.com").await;

    let first = PostRepo::create(&pool, alice, &new_post("first", None)).await.unwrap();
    let second = PostRepo::create(&pool, alice, &new_post("second", None)).await.unwrap();
    PostRepo::create(&pool, bob, &new_post("bob's", None)).await.unwrap();

    let ids: Vec<i64> = PostRepo::list_for_user(&pool, alice)
        .await
        .unwrap()
        .iter()
        .map(|p| p.post.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
    assert_eq!(PostRepo::list_for_user(&pool, bob).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_with_relations_resolves_category_and_tags(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let go = CategoryRepo::create(&pool, &category("Go")).await.unwrap();
    let ops = TagRepo::create(&pool, &tag("ops")).await.unwrap();
    let infra = TagRepo::create(&pool, &tag("infra")).await.unwrap();
    let post = PostRepo::create(&pool, user, &new_post("Deploying", Some(go.id)))
        .await
        .unwrap();
    PostTagRepo::link_post_tags(&pool, post.id, &[ops.id, infra.id])
        .await
        .unwrap();

    let full = PostRepo::find_with_relations(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(full.category.as_ref().map(|c| c.name.as_str()), Some("Go"));
    let names: Vec<&str> = full.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["infra", "ops"], "tags ordered by name");

    assert!(PostRepo::find_with_relations(&pool, 9_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_category_uncategorises_posts(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let go = CategoryRepo::create(&pool, &category("Go")).await.unwrap();
    let post = PostRepo::create(&pool, user, &new_post("Hello", Some(go.id)))
        .await
        .unwrap();

    assert!(CategoryRepo::delete(&pool, go.id).await.unwrap());

    let full = PostRepo::find_with_relations(&pool, post.id)
        .await
        .unwrap()
        .unwrap();
    assert!(full.post.category_id.is_none());
    assert!(full.category.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_tag_or_post_cascades_links(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let ops = TagRepo::create(&pool, &tag("ops")).await.unwrap();
    let infra = TagRepo::create(&pool, &tag("infra")).await.unwrap();
    let post = PostRepo::create(&pool, user, &new_post("Hello", None)).await.unwrap();
    PostTagRepo::link_post_tags(&pool, post.id, &[ops.id, infra.id])
        .await
        .unwrap();

    assert!(TagRepo::delete(&pool, ops.id).await.unwrap());
    let links = PostTagRepo::list_for_post(&pool, post.id).await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tag_id, infra.id);

    assert!(PostRepo::delete(&pool, post.id).await.unwrap());
    let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_post_with_unknown_category_is_fk_violation(pool: PgPool) {
    let user = new_user(&pool, "a@example.com").await;
    let err = PostRepo::create(&pool, user, &new_post("Hello", Some(42)))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref db) if db.code().as_deref() == Some("23503"));
}
