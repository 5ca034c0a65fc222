//! Integration tests for the wp2hexo library
//!
//! These tests run whole conversions over small export trees on disk and
//! check the produced Hexo tree and the diagnostics of each run.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wp2hexo::*;

const HELLO_SIDECAR: &str = r#"{
    "title": "Hello",
    "slug": "hello-world",
    "date": "2020-01-02T03:04:05+0000",
    "tags": ["a"],
    "categories": [],
    "alias": ["hello-old"],
    "status": "published"
}"#;

struct Export {
    temp_dir: TempDir,
}

impl Export {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.temp_dir.path().join(rel)
    }

    fn file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    fn config(&self, source: &str, dist: &str) -> MigrateConfig {
        MigrateConfig::new(Some(self.path(source)), Some(self.path(dist))).unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("{}: {}", path.display(), e))
}

#[test]
fn test_canonical_post() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/hello-world.md", "# Hello\n\nFirst post.\n");
    export.file("export/posts/2020/01/02/hello-world.json", HELLO_SIDECAR);

    let config = export.config("export/posts", "export/source");
    let result = convert(&LocalFs::new(), &config).unwrap();

    assert_eq!(result.written(), 1);
    assert_eq!(result.failed(), 0);
    assert_eq!(
        read(&export.path("export/source/2020/01/02/hello-world.md")),
        "---\n\
         title: \"Hello\"\n\
         date: \"2020-01-02 11:04:05\"\n\
         tags: [\"a\"]\n\
         alias:\n    - \"/2020/01/02/hello-old.html\"\n\
         ---\n\
         \n\
         \nFirst post.\n"
    );
}

#[test]
fn test_rerun_respects_collision_policy() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/a.md", "# A\nbody a\n");
    export.file("export/posts/2020/01/03/b.md", "# B\nbody b\n");

    let config = export.config("export/posts", "export/source");
    let first = convert(&LocalFs::new(), &config).unwrap();
    assert_eq!(first.written(), 2);

    let a = export.path("export/source/2020/01/02/a.md");
    fs::write(&a, "edited by hand").unwrap();

    let second = convert(&LocalFs::new(), &config).unwrap();
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 2);
    assert_eq!(second.diagnostics_with(DiagnosticCode::AlreadyExists).count(), 2);
    assert!(second
        .reports
        .iter()
        .all(|r| r.outcome == PostOutcome::Skipped(SkipReason::AlreadyExists)));
    assert_eq!(read(&a), "edited by hand");

    let third = convert(&LocalFs::new(), &config.clone().with_overwrite(true)).unwrap();
    assert_eq!(third.written(), 2);
    assert_eq!(third.diagnostics_with(DiagnosticCode::AlreadyExists).count(), 0);
    assert_eq!(
        read(&a),
        "---\ntitle: \"A\"\ndate: \"2020-01-02 00:00:00\"\n---\n\nbody a\n"
    );
}

#[test]
fn test_unpublished_posts_are_skipped() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/draft.md", "# Draft\nwip\n");
    export.file(
        "export/posts/2020/01/02/draft.json",
        r#"{"title":"Draft","slug":"draft","date":"2020-01-02","status":"draft"}"#,
    );

    let config = export.config("export/posts", "export/source");
    let result = convert(&LocalFs::new(), &config).unwrap();

    assert_eq!(result.written(), 0);
    assert_eq!(
        result.reports[0].outcome,
        PostOutcome::Skipped(SkipReason::Unpublished)
    );
    assert!(!export.path("export/source/2020/01/02/draft.md").exists());
}

#[test]
fn test_bad_posts_do_not_stop_the_run() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/a.md", "# A\nbody\n");
    export.file("export/posts/2020/01/02/a.json", r#"{"slug":"a","date":"2020-01-02"}"#);
    export.file("export/posts/2020/01/02/b.md", "# B\nbody\n");
    export.file("export/posts/2020/01/02/b.json", "not json");
    export.file("export/posts/2020/01/02/c.md", "# C\nbody\n");
    export.file("export/posts/2020/01/02/c.json", r#"{"title":"C","slug":"c","tags":7}"#);
    export.file("export/posts/2020/01/02/d.md", "# D\nbody\n");

    let config = export.config("export/posts", "export/source");
    let result = convert(&LocalFs::new(), &config).unwrap();

    let outcomes: Vec<_> = result.reports.iter().map(|r| r.outcome.clone()).collect();
    assert_eq!(
        outcomes,
        vec![
            PostOutcome::Failed(DiagnosticCode::MissingTitle),
            PostOutcome::Failed(DiagnosticCode::SidecarParse),
            PostOutcome::Failed(DiagnosticCode::MetaShape),
            PostOutcome::Written(export.path("export/source/2020/01/02/d.md")),
        ]
    );
    assert!(result.has_failures());
}

#[test]
fn test_preserved_layout_does_not_duplicate_destination_segment() {
    let export = Export::new();
    export.file("export/posts/blog/2020/a.md", "# A\nbody\n");
    export.file(
        "export/posts/blog/2020/a.json",
        r#"{"title":"A","slug":"a","date":"2020-05-06 07:08:09"}"#,
    );

    let config = export
        .config("export/posts", "site/blog")
        .with_not_sync_meta_file(true);
    let result = convert(&LocalFs::new(), &config).unwrap();

    assert_eq!(result.written(), 1);
    assert!(export.path("site/blog/2020/a.md").is_file());
    assert!(!export.path("site/blog/blog").exists());
}

#[test]
fn test_keep_dir_struct_mirrors_assets() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/hello-world.md", "# Hello\nbody\n");
    export.file("export/posts/2020/01/02/hello-world.json", HELLO_SIDECAR);
    export.file("export/posts/2020/01/02/photo.png", "png");
    fs::create_dir_all(export.path("export/posts/empty")).unwrap();

    let config = export
        .config("export/posts", "export/source")
        .with_keep_dir_struct(true);
    let result = convert(&LocalFs::new(), &config).unwrap();

    assert_eq!(result.written(), 1);
    let out = export.path("export/source");
    assert!(out.join("empty").is_dir());
    assert_eq!(read(&out.join("2020/01/02/photo.png")), "png");
    assert!(out.join("2020/01/02/hello-world.json").is_file());
    assert!(read(&out.join("2020/01/02/hello-world.md")).starts_with("---\ntitle: \"Hello\"\n"));
}

#[test]
fn test_limit_keeps_last_posts() {
    let export = Export::new();
    export.file("export/posts/2020/01/01/a.md", "# A\nbody\n");
    export.file("export/posts/2020/01/02/b.md", "# B\nbody\n");
    export.file("export/posts/2020/01/03/c.md", "# C\nbody\n");

    let config = export
        .config("export/posts", "export/source")
        .with_limit(Some(2));
    let result = convert(&LocalFs::new(), &config).unwrap();

    let posts: Vec<_> = result
        .reports
        .iter()
        .map(|r| r.post.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(posts, vec!["b.md", "c.md"]);
    assert!(!export.path("export/source/2020/01/01/a.md").exists());
}

#[test]
fn test_destination_created_and_reported() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/a.md", "# A\nbody\n");

    let config = export.config("export/posts", "export/source");
    let result = convert(&LocalFs::new(), &config).unwrap();

    assert_eq!(result.diagnostics_with(DiagnosticCode::DestinationCreated).count(), 1);
    assert!(export.path("export/source").is_dir());
}

#[test]
fn test_unusable_destination_aborts_run() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/a.md", "# A\nbody\n");
    export.file("blocked", "a file, not a directory");

    let config = export.config("export/posts", "blocked");
    let err = convert(&LocalFs::new(), &config).unwrap_err();

    assert_eq!(err.code(), DiagnosticCode::DestinationUnusable);
    assert!(!export.path("export/source").exists());
}

#[test]
fn test_destroy_generated_tree() {
    let export = Export::new();
    export.file("export/posts/2020/01/02/a.md", "# A\nbody\n");
    let config = export.config("export/posts", "export/source");
    convert(&LocalFs::new(), &config).unwrap();

    destroy(&LocalFs::new(), &export.path("export/source")).unwrap();

    assert!(!export.path("export/source").exists());
    assert!(export.path("export/posts/2020/01/02/a.md").is_file());
}
