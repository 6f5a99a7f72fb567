//! Site builds over a temporary project with the discourse extension loaded.

use std::fs;
use std::path::Path;

use fd_config::Config;
use fd_discourse::{DiscourseExtension, PLACEHOLDER};
use fd_renderer::OutputTarget;
use fd_site::{BuildError, SiteBuilder};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn project(pages: &[(&str, &str)]) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in pages {
        let path = dir.path().join("docs").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    let mut config = Config::default();
    config.project.source_dir = dir.path().join("docs");
    config.project.output_dir = dir.path().join("_build");
    config.project.title = "Handbook".to_owned();
    (dir, config)
}

fn with_url(mut config: Config, url: &str) -> Config {
    config
        .extensions
        .insert("discourse_url".to_owned(), url.to_owned());
    config
}

fn build(config: &Config) -> Result<fd_site::BuildSummary, BuildError> {
    SiteBuilder::new(config, &[&DiscourseExtension]).build()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join("_build").join(name)).unwrap()
}

const COMMENTED: &str = "# Install\n\nSteps.\n\n::discourse{topic_identifier=\"42\"}\n";

#[test]
fn builds_html_pages_with_comments() {
    let (dir, config) = project(&[
        ("index.md", "# Welcome\n\nHello.\n"),
        ("guide/install.md", COMMENTED),
    ]);
    let config = with_url(config, "https://forum.example.com/");

    let summary = build(&config).unwrap();
    assert_eq!(summary.pages, 2);
    assert!(summary.warnings.is_empty());

    let index = read(dir.path(), "index.html");
    assert!(index.contains("<title>Welcome - Handbook</title>"));
    assert!(!index.contains("discourse"));

    let install = read(dir.path(), "guide/install.html");
    assert!(install.contains(PLACEHOLDER));
    assert!(install.contains("discourseUrl: 'https://forum.example.com/'"));
    assert!(install.contains("topicId: '42'"));
    assert!(install.contains("</script>\n</body>"));
}

#[test]
fn missing_url_fails_only_pages_with_comments() {
    let (_dir, config) = project(&[("index.md", "# Welcome\n")]);
    assert_eq!(build(&config).unwrap().pages, 1);

    let (_dir, config) = project(&[("index.md", "# Welcome\n"), ("talk.md", COMMENTED)]);
    let err = build(&config).unwrap_err();
    match err {
        BuildError::Hook { page, source } => {
            assert_eq!(page, "talk");
            assert_eq!(
                source.to_string(),
                "Discourse option error: ::discourse directive found, but discourse_url is not set"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_url_fails_build() {
    let (_dir, config) = project(&[("talk.md", COMMENTED)]);
    let config = with_url(config, "https://forum.example.com");
    let err = build(&config).unwrap_err();
    assert!(matches!(err, BuildError::Hook { .. }));
    assert!(err.to_string().contains("ending with trailing slash"));
}

#[test]
fn duplicate_directive_fails_render() {
    let duplicated = format!("{COMMENTED}\n::discourse{{topic_identifier=\"43\"}}\n");
    let (_dir, config) = project(&[("talk.md", &duplicated)]);
    let config = with_url(config, "https://forum.example.com/");

    let err = build(&config).unwrap_err();
    assert!(matches!(err, BuildError::Render(_)));
    assert!(err.to_string().starts_with("talk:7: Discourse option error"));
}

#[test]
fn text_builder_ignores_comments() {
    let (dir, mut config) = project(&[("talk.md", COMMENTED)]);
    config.project.builder = OutputTarget::Text;

    let summary = build(&config).unwrap();
    assert_eq!(summary.pages, 1);
    assert_eq!(read(dir.path(), "talk.txt"), "Install\n=======\n\nSteps.\n\n");
}

#[test]
fn latex_builder_ignores_comments() {
    let (dir, mut config) = project(&[("talk.md", COMMENTED)]);
    config.project.builder = OutputTarget::Latex;

    build(&config).unwrap();
    let tex = read(dir.path(), "talk.tex");
    assert!(tex.contains("\\section{Install}"));
    assert!(!tex.contains("discourse"));
}

#[test]
fn unknown_directive_is_a_warning() {
    let (_dir, config) = project(&[("page.md", "::nope\n")]);
    let summary = build(&config).unwrap();
    assert_eq!(
        summary.warnings,
        vec!["page: line 1: unknown directive ::nope"]
    );
}

#[test]
fn empty_source_dir_builds_nothing() {
    let (dir, config) = project(&[]);
    let summary = build(&config).unwrap();
    assert_eq!(summary.pages, 0);
    assert!(dir.path().join("_build").is_dir());
}

#[test]
fn registry_lists_loaded_extensions() {
    let (_dir, config) = project(&[]);
    let builder = SiteBuilder::new(&config, &[&DiscourseExtension]);
    let extensions = builder.registry().extensions();
    assert_eq!(extensions.len(), 1);
    assert_eq!(extensions[0].0, "discourse");
    assert_eq!(extensions[0].1.version, fd_discourse::VERSION);
}
