use std::path::Path;
use std::sync::Arc;

use axum::Router;
use tempfile::TempDir;

use folio::app::{router, AppState};
use folio::config::ApiSettings;
use folio::content::cache::CachePolicy;
use folio::content::service::{ContentService, ContentSettings};
use folio::storage::client::{ContentStore, FsContentStore};

pub const SERVICE_TOKEN: &str = "test-token";

/// A content directory on disk plus a router serving it.
///
/// The directory is removed when this struct is dropped.
pub struct TestEnv {
    dir: TempDir,
    pub router: Router,
    pub content: Arc<ContentService>,
}

impl TestEnv {
    /// Empty content directory with caching disabled.
    pub fn start() -> Self {
        Self::with_cache(CachePolicy::Always)
    }

    pub fn with_cache(cache_policy: CachePolicy) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create content directory");
        let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(dir.path()));
        let content = Arc::new(ContentService::new(
            store,
            ContentSettings {
                cache_policy,
                ..Default::default()
            },
        ));

        let router = router(AppState {
            content: content.clone(),
            api: ApiSettings {
                default_per_page: 10,
                max_per_page: 50,
                service_token: Some(SERVICE_TOKEN.to_string()),
            },
        });

        Self {
            dir,
            router,
            content,
        }
    }

    /// Same fixtures as [`Self::start`], then [`Self::seed`].
    pub fn seeded() -> Self {
        let env = Self::start();
        env.seed();
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a raw post file.
    pub fn write(&self, file_name: &str, raw: &str) {
        std::fs::write(self.dir.path().join(file_name), raw).expect("Failed to write post");
    }

    /// Write a valid post.
    pub fn post(&self, slug: &str, date: &str, category: &str, tags: &[&str], featured: bool) {
        self.write(&format!("{slug}.md"), &post(slug, date, category, tags, featured));
    }

    /// Three related posts:
    /// `a` (AI, [x, y], 03-15), `b` (AI, [y], 03-10, featured), `c` (DB, [x], 03-12).
    pub fn seed(&self) {
        self.post("a", "2024-03-15", "AI", &["x", "y"], false);
        self.post("b", "2024-03-10", "AI", &["y"], true);
        self.post("c", "2024-03-12", "DB", &["x"], false);
    }

    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .try_build(self.router.clone())
            .expect("Failed to build TestServer")
    }
}

/// Text of a valid post whose title is the upper-cased slug.
pub fn post(slug: &str, date: &str, category: &str, tags: &[&str], featured: bool) -> String {
    format!(
        "---\ntitle: {title}\ndescription: About {title}\ndate: {date}\nauthor: Team Folio\ntags: [{tags}]\ncategory: {category}\nfeatured: {featured}\n---\n# {title}\n\nSome words about {slug}.\n",
        title = slug.to_uppercase(),
        tags = tags.join(", "),
    )
}
