//! End-to-end rendering of content trees into JSON collections

use folio_render::{Category, Error, Folio};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

struct Site {
    _dir: tempfile::TempDir,
    folio: Folio,
}

impl Site {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        for category in Category::ALL {
            fs::create_dir_all(folio.category_dir(category)).unwrap();
        }
        fs::create_dir_all(&folio.output_dir).unwrap();
        Self { _dir: dir, folio }
    }

    fn write(&self, category: Category, name: &str, content: &str) {
        fs::write(self.folio.category_dir(category).join(name), content).unwrap();
    }

    fn output(&self, category: Category) -> Value {
        read_json(&self.folio.artifact_path(category))
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn metadata_keys_pass_through_with_body_html() {
    let site = Site::new();
    site.write(
        Category::Blog,
        "first.md",
        "---\ntitle: First post\npublishedDate: \"2024-01-01\"\nsummary: Hello\n---\n\nSome *text*.\n",
    );

    let report = site.folio.render_category(Category::Blog).unwrap();
    assert_eq!(report.count, 1);

    let output = site.output(Category::Blog);
    assert_eq!(
        output,
        json!([{
            "title": "First post",
            "publishedDate": "2024-01-01",
            "summary": "Hello",
            "body_html": "<p>Some <em>text</em>.</p>\n"
        }])
    );
}

#[test]
fn document_without_header_is_skipped() {
    let site = Site::new();
    site.write(Category::Blog, "a.md", "# No header\n\nJust markdown.\n");
    site.write(Category::Blog, "b.md", "---\ntitle: Kept\n---\nBody\n");
    site.write(Category::Blog, "c.md", "---\ntitle: [broken\n---\nBody\n");

    let report = site.folio.render_category(Category::Blog).unwrap();
    assert_eq!(report.count, 1);
    let skipped: Vec<_> = report.skipped.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(skipped, vec!["a.md", "c.md"]);

    let output = site.output(Category::Blog);
    assert_eq!(output.as_array().unwrap().len(), 1);
    assert_eq!(output[0]["title"], "Kept");
    assert!(output[0]["body_html"].is_string());
}

#[test]
fn rendering_twice_is_byte_identical() {
    let site = Site::new();
    site.write(Category::Blog, "x.md", "---\ntitle: X\npublishedDate: \"2023-01-01\"\n---\n```python\nprint('hi')\n```\n");
    site.write(Category::Blog, "y.md", "---\ntitle: Y\npublishedDate: \"2023-01-01\"\n---\nSame date\n");

    let path = site.folio.artifact_path(Category::Blog);
    site.folio.render_category(Category::Blog).unwrap();
    let first = fs::read(&path).unwrap();
    site.folio.render_category(Category::Blog).unwrap();
    let second = fs::read(&path).unwrap();
    assert_eq!(first, second);
}

#[test]
fn blog_orders_newest_first_with_undated_last() {
    let site = Site::new();
    site.write(Category::Blog, "a.md", "---\ntitle: Undated\n---\nx\n");
    site.write(Category::Blog, "b.md", "---\ntitle: Old\npublishedDate: \"2023-06-01\"\n---\nx\n");
    site.write(Category::Blog, "c.md", "---\ntitle: New\npublishedDate: \"2024-01-01\"\n---\nx\n");

    site.folio.render_category(Category::Blog).unwrap();
    let output = site.output(Category::Blog);
    let titles: Vec<_> = output
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["New", "Old", "Undated"]);
}

#[test]
fn projects_order_featured_before_year() {
    let site = Site::new();
    site.write(Category::Projects, "a.md", "---\nfeatured: true\nyear: \"2022\"\n---\nx\n");
    site.write(Category::Projects, "b.md", "---\nfeatured: false\nyear: \"2024\"\n---\nx\n");
    site.write(Category::Projects, "c.md", "---\nfeatured: true\nyear: \"2023\"\n---\nx\n");

    site.folio.render_category(Category::Projects).unwrap();
    let output = site.output(Category::Projects);
    let years: Vec<_> = output
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["year"].as_str().unwrap())
        .collect();
    assert_eq!(years, vec!["2023", "2022", "2024"]);
}

#[test]
fn fenced_code_blocks() {
    let site = Site::new();
    site.write(
        Category::Blog,
        "code.md",
        "---\ntitle: Code\n---\n```python\nimport json\n```\n\n```\nplain <text>\n```\n",
    );

    site.folio.render_category(Category::Blog).unwrap();
    let output = site.output(Category::Blog);
    let html = output[0]["body_html"].as_str().unwrap();
    assert!(html.contains(r#"<div class="codehilite"><pre><code class="language-python">"#));
    assert!(html.contains("<pre><code>plain &lt;text&gt;\n</code></pre>"));
}

#[test]
fn nested_header_values_round_trip() {
    let site = Site::new();
    site.write(
        Category::Projects,
        "nested.md",
        "---\ntitle: Nested\ntags:\n  - aws\n  - terraform\nhighlights:\n  - label: Cost\n    description: Cut 40%\n---\nBody\n",
    );

    site.folio.render_category(Category::Projects).unwrap();
    let output = site.output(Category::Projects);
    assert_eq!(output[0]["tags"], json!(["aws", "terraform"]));
    assert_eq!(
        output[0]["highlights"],
        json!([{ "label": "Cost", "description": "Cut 40%" }])
    );
}

#[test]
fn output_is_pretty_and_keeps_non_ascii() {
    let site = Site::new();
    site.write(Category::Blog, "intl.md", "---\ntitle: Café — 東京\n---\nÜber\n");

    site.folio.render_category(Category::Blog).unwrap();
    let raw = fs::read_to_string(site.folio.artifact_path(Category::Blog)).unwrap();
    assert!(raw.starts_with("[\n  {\n    \"title\": \"Café — 東京\","));
    assert!(raw.contains("Über"));
    assert!(!raw.contains("\\u"));
}

#[test]
fn unknown_category_is_rejected() {
    let site = Site::new();
    let err = site.folio.render_named("recipes").unwrap_err();
    assert!(matches!(err, Error::UnknownCategory(_)));
    assert!(!site.folio.artifact_path(Category::Blog).exists());
}

#[test]
fn render_all_writes_every_category() {
    let site = Site::new();
    site.write(Category::Blog, "post.md", "---\ntitle: Post\n---\nx\n");
    site.write(Category::Projects, "proj.md", "---\ntitle: Proj\n---\nx\n");

    let reports = site.folio.render_named("all").unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(site.output(Category::Blog)[0]["title"], "Post");
    assert_eq!(site.output(Category::Projects)[0]["title"], "Proj");
}

#[test]
fn missing_output_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let folio = Folio::new(dir.path()).unwrap();
    fs::create_dir_all(folio.category_dir(Category::Blog)).unwrap();

    let err = folio.render_category(Category::Blog).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn config_file_relocates_directories() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("_config.yml"),
        "content_dir: content\noutput_dir: site/data\noutput_name: \":category.json\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("content/blog")).unwrap();
    fs::create_dir_all(dir.path().join("site/data")).unwrap();
    fs::write(dir.path().join("content/blog/p.md"), "---\ntitle: Moved\n---\nx\n").unwrap();

    let folio = Folio::new(dir.path()).unwrap();
    assert_eq!(folio.config.content_dir, "content");
    let report = folio.render_category(Category::Blog).unwrap();
    assert_eq!(report.output, dir.path().join("site/data/blog.json"));
    assert_eq!(read_json(&report.output)[0]["title"], "Moved");
}
