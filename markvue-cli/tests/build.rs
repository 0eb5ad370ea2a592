use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(root: &Path, name: &str, content: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn markvue(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("markvue").unwrap();
    cmd.arg("--config").arg(config).arg("build");
    cmd
}

fn fixture_site(root: &Path) {
    write_file(
        root,
        "markvue.yml",
        "input: md\noutput: out\ntypescript: true\n",
    );
    write_file(
        root,
        "md/About.md",
        "---\ntitle: About Us\n---\n# About\n\nHello.\n",
    );
    write_file(root, "md/Bare.md", "Just a page, nothing declared.\n");
    write_file(
        root,
        "md/FirstPost.md",
        "---\ntitle: First Post\ndate: 2017-01-02\n---\nfirst\n",
    );
    write_file(
        root,
        "md/SecondPost.md",
        "---\ntitle: Second Post\ndate: 2017-01-03\n---\nsecond\n",
    );
    write_file(
        root,
        "md/Widget.md",
        "---\nisComponent: true\n---\nreusable widget\n",
    );
}

#[test]
fn build_renders_components_and_indexes() {
    let dir = tempdir().unwrap();
    fixture_site(dir.path());

    markvue(&dir.path().join("markvue.yml")).assert().success();

    let out = dir.path().join("out");

    let about = fs::read_to_string(out.join("About.vue")).unwrap();
    assert!(about.contains(r#"<div id="about">"#));
    assert!(about.contains("<h1>About</h1>"));

    // components are rendered but excluded from the indexes
    assert!(out.join("Widget.vue").exists());
    let routes = fs::read_to_string(out.join("auto-routes.js")).unwrap();
    assert!(!routes.contains("widget"));

    // undated views first (scan order), then dated views chronologically
    let about_at = routes.find(r#"name: "about""#).unwrap();
    let bare_at = routes.find(r#"name: "bare""#).unwrap();
    let first_at = routes.find(r#"name: "first-post""#).unwrap();
    let second_at = routes.find(r#"name: "second-post""#).unwrap();
    assert!(about_at < bare_at && bare_at < first_at && first_at < second_at);

    // a document with bare identity keeps its route but not a post entry
    let posts = fs::read_to_string(out.join("auto-posts.js")).unwrap();
    assert!(posts.contains(r#""id": "first-post""#));
    assert!(posts.contains(r#""date": "2017-01-02T00:00:00+00:00""#));
    assert!(!posts.contains(r#""id": "bare""#));
    assert!(!posts.contains("null"));

    assert!(out.join("auto-routes.d.ts").exists());
    assert!(out.join("auto-posts.d.ts").exists());
}

#[test]
fn build_never_overwrites_existing_typings() {
    let dir = tempdir().unwrap();
    fixture_site(dir.path());
    let config = dir.path().join("markvue.yml");

    markvue(&config).assert().success();

    let typings = dir.path().join("out/auto-routes.d.ts");
    fs::write(&typings, "// hand edited\n").unwrap();

    markvue(&config).assert().success();
    assert_eq!(fs::read_to_string(&typings).unwrap(), "// hand edited\n");
}

#[test]
fn build_fails_on_unterminated_front_matter() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "markvue.yml", "input: md\noutput: out\n");
    write_file(dir.path(), "md/Fine.md", "---\ntitle: Fine\n---\nok\n");
    write_file(dir.path(), "md/Broken.md", "---\ntitle: Never closed\n");

    markvue(&dir.path().join("markvue.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Broken.md"));
}

#[test]
fn build_fails_on_duplicate_permalink() {
    let dir = tempdir().unwrap();
    write_file(dir.path(), "markvue.yml", "input: md\noutput: out\n");
    write_file(dir.path(), "md/One.md", "---\npermalink: /same\n---\none\n");
    write_file(dir.path(), "md/Two.md", "---\npermalink: /same\n---\ntwo\n");

    markvue(&dir.path().join("markvue.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("/same"));
}

#[test]
fn html_output_mode_writes_plain_html() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "markvue.yml",
        "input: md\noutput: out\noutput_type: html\n",
    );
    write_file(dir.path(), "md/Page.md", "---\ntitle: Page\n---\n# Page\n");

    markvue(&dir.path().join("markvue.yml")).assert().success();

    let out = dir.path().join("out");
    let page = fs::read_to_string(out.join("Page.html")).unwrap();
    assert!(page.contains("<h1>Page</h1>"));
    assert!(!page.contains("<template>"));
    assert!(!out.join("auto-routes.js").exists());
}

#[test]
fn clean_flag_removes_stale_output() {
    let dir = tempdir().unwrap();
    fixture_site(dir.path());
    write_file(dir.path(), "out/Stale.vue", "old artifact\n");

    let mut cmd = Command::cargo_bin("markvue").unwrap();
    cmd.arg("--config")
        .arg(dir.path().join("markvue.yml"))
        .arg("build")
        .arg("--clean");
    cmd.assert().success();

    assert!(!dir.path().join("out/Stale.vue").exists());
    assert!(dir.path().join("out/About.vue").exists());
}
