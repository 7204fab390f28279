mod common;

use folio::content::cache::CachePolicy;
use folio::models::filter::Page;
use folio::models::record::{ContentSummary, FacetCount, PostDetail};

fn slugs(items: &[ContentSummary]) -> Vec<&str> {
    items.iter().map(|s| s.slug.as_str()).collect()
}

#[tokio::test]
async fn health_returns_ok() {
    let env = common::TestEnv::start();
    let body: serde_json::Value = env.server().get("/health").await.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_posts_newest_first() {
    let env = common::TestEnv::seeded();
    let page: Page<ContentSummary> = env.server().get("/api/v1/posts").await.json();

    assert_eq!(slugs(&page.items), vec!["a", "c", "b"]);
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn list_posts_on_empty_directory() {
    let env = common::TestEnv::start();
    let page: Page<ContentSummary> = env.server().get("/api/v1/posts").await.json();

    assert!(page.items.is_empty());
    assert_eq!(page.total_items, 0);
}

#[tokio::test]
async fn list_posts_paginates() {
    let env = common::TestEnv::seeded();
    let page: Page<ContentSummary> = env
        .server()
        .get("/api/v1/posts")
        .add_query_param("per_page", 2)
        .add_query_param("page", 2)
        .await
        .json();

    assert_eq!(slugs(&page.items), vec!["b"]);
    assert_eq!(page.total_items, 3);
    assert_eq!(page.total_pages, 2);
}

#[tokio::test]
async fn list_posts_filters_by_category_case_insensitively() {
    let env = common::TestEnv::seeded();
    let page: Page<ContentSummary> = env
        .server()
        .get("/api/v1/posts")
        .add_query_param("category", "ai")
        .await
        .json();

    assert_eq!(slugs(&page.items), vec!["a", "b"]);
}

#[tokio::test]
async fn list_posts_tags_are_or_and_dimensions_are_and() {
    let env = common::TestEnv::seeded();
    let server = env.server();

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("tag", "x")
        .await
        .json();
    assert_eq!(slugs(&page.items), vec!["a", "c"]);

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("tag", "X,y")
        .await
        .json();
    assert_eq!(slugs(&page.items), vec!["a", "c", "b"]);

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("tag", "x,y")
        .add_query_param("category", "DB")
        .await
        .json();
    assert_eq!(slugs(&page.items), vec!["c"]);
}

#[tokio::test]
async fn list_posts_searches_text_fields() {
    let env = common::TestEnv::seeded();
    let server = env.server();

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("q", "ABOUT A")
        .await
        .json();
    assert_eq!(slugs(&page.items), vec!["a"]);

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("q", "team folio")
        .await
        .json();
    assert_eq!(page.total_items, 3);

    let page: Page<ContentSummary> = server
        .get("/api/v1/posts")
        .add_query_param("q", "kubernetes")
        .await
        .json();
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn featured_posts() {
    let env = common::TestEnv::seeded();
    let items: Vec<ContentSummary> = env.server().get("/api/v1/posts/featured").await.json();
    assert_eq!(slugs(&items), vec!["b"]);
}

#[tokio::test]
async fn get_post_returns_detail() {
    let env = common::TestEnv::seeded();
    let detail: PostDetail = env.server().get("/api/v1/posts/a").await.json();

    assert_eq!(detail.post.slug, "a");
    assert_eq!(detail.post.title, "A");
    assert_eq!(detail.post.tags, vec!["x", "y"]);
    assert!(detail.post.body.contains("Some words about a."));
    assert!(detail.html.contains("<h1>A</h1>"));
    assert_eq!(slugs(&detail.related), vec!["b", "c"]);
    assert!(detail.adjacent.newer.is_none());
    assert_eq!(detail.adjacent.older.map(|s| s.slug).as_deref(), Some("c"));
}

#[tokio::test]
async fn get_post_unknown_slug_is_not_found() {
    let env = common::TestEnv::seeded();
    let response = env.server_permissive().get("/api/v1/posts/nope").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn malformed_post_is_hidden_everywhere() {
    let env = common::TestEnv::seeded();
    env.write(
        "broken.md",
        "---\ntitle: Broken\ndescription: No author\ndate: 2024-04-01\ntags: [x]\ncategory: AI\n---\nBody\n",
    );
    let server = env.server_permissive();

    server
        .get("/api/v1/posts/broken")
        .await
        .assert_status_not_found();

    let page: Page<ContentSummary> = server.get("/api/v1/posts").await.json();
    assert_eq!(slugs(&page.items), vec!["a", "c", "b"]);
}

#[tokio::test]
async fn related_posts_respect_limit() {
    let env = common::TestEnv::seeded();
    let server = env.server();

    let items: Vec<ContentSummary> = server
        .get("/api/v1/posts/a/related")
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(slugs(&items), vec!["b"]);

    let items: Vec<ContentSummary> = server.get("/api/v1/posts/c/related").await.json();
    assert_eq!(slugs(&items), vec!["a", "b"]);
}

#[tokio::test]
async fn related_posts_unknown_slug_is_not_found() {
    let env = common::TestEnv::seeded();
    env.server_permissive()
        .get("/api/v1/posts/nope/related")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn facets_are_distinct_and_counted() {
    let env = common::TestEnv::seeded();
    env.post("d", "2024-01-01", "ai", &["Y"], false);
    let server = env.server();

    let categories: Vec<FacetCount> = server.get("/api/v1/categories").await.json();
    assert_eq!(
        categories,
        vec![
            FacetCount { name: "AI".into(), count: 3 },
            FacetCount { name: "DB".into(), count: 1 },
        ]
    );

    let tags: Vec<FacetCount> = server.get("/api/v1/tags").await.json();
    assert_eq!(
        tags,
        vec![
            FacetCount { name: "x".into(), count: 2 },
            FacetCount { name: "y".into(), count: 3 },
        ]
    );
}

#[tokio::test]
async fn cache_invalidate_requires_token() {
    let env = common::TestEnv::seeded();
    let server = env.server_permissive();

    server
        .post("/api/v1/cache/invalidate")
        .await
        .assert_status_unauthorized();

    server
        .post("/api/v1/cache/invalidate")
        .authorization_bearer("wrong-token")
        .await
        .assert_status_unauthorized();

    server
        .post("/api/v1/cache/invalidate")
        .authorization_bearer(common::SERVICE_TOKEN)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn manual_cache_serves_snapshot_until_invalidated() {
    let env = common::TestEnv::with_cache(CachePolicy::Manual);
    env.seed();
    let server = env.server();

    let page: Page<ContentSummary> = server.get("/api/v1/posts").await.json();
    assert_eq!(page.total_items, 3);

    env.post("d", "2024-04-01", "Ops", &[], false);
    let page: Page<ContentSummary> = server.get("/api/v1/posts").await.json();
    assert_eq!(page.total_items, 3);

    server
        .post("/api/v1/cache/invalidate")
        .authorization_bearer(common::SERVICE_TOKEN)
        .await;

    let page: Page<ContentSummary> = server.get("/api/v1/posts").await.json();
    assert_eq!(slugs(&page.items), vec!["d", "a", "c", "b"]);
}
