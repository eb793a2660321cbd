//! End-to-end tests for the `generate` command writing to files.

use rlog_generator::{run_generate, GenerateArgs};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("patterns.yaml");
    std::fs::write(&path, body).unwrap();
    path
}

fn args(config: PathBuf, patterns: &[&str], count: u64, locale: Option<&str>) -> GenerateArgs {
    GenerateArgs {
        config,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        count: Some(count),
        locale: locale.map(str::to_string),
    }
}

fn lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_generate_writes_count_lines_per_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let firewall = dir.path().join("firewall.log");
    let auth = dir.path().join("logs").join("auth.log");
    let config = write_config(
        &dir,
        &format!(
            r#"
patterns:
  - name: firewall
    template: "{{0:%Y-%m-%dT%H:%M:%S}} {{src}} -> {{dst}}:{{port}} {{action}}"
    fields:
      src: func_randippriv
      dst: func_randippub
      port: func_randint 1 1024
      action: [ACCEPT, DROP]
    path: {}
  - name: auth
    template: "user={{user}} id={{id}}"
    fields:
      user: func_randusername
      id: func_randuuid
    path: {}
"#,
            firewall.display(),
            auth.display()
        ),
    );

    run_generate(args(config, &[], 25, None)).await.unwrap();

    let firewall_lines = lines(&firewall);
    assert_eq!(firewall_lines.len(), 25);
    for line in &firewall_lines {
        let parts: Vec<&str> = line.split(' ').collect();
        assert_eq!(parts.len(), 5, "{line}");
        assert_eq!(parts[0].len(), "2024-01-01T00:00:00".len());
        assert_eq!(parts[2], "->");
        assert!(parts[4] == "ACCEPT" || parts[4] == "DROP");
        let port: u32 = parts[3].rsplit(':').next().unwrap().parse().unwrap();
        assert!((1..=1024).contains(&port));
    }

    let auth_lines = lines(&auth);
    assert_eq!(auth_lines.len(), 25);
    assert!(auth_lines.iter().all(|l| l.starts_with("user=") && l.contains(" id=")));
}

#[tokio::test]
async fn test_generate_appends_and_honours_selection() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.log");
    std::fs::write(&out, "before\n").unwrap();
    let config = write_config(
        &dir,
        &format!(
            r#"
patterns:
  - name: one
    template: "one {{v}}"
    fields:
      v: [a]
    path: {out}
  - name: two
    enabled: false
    template: "two {{v}}"
    fields:
      v: [b]
    path: {out}
"#,
            out = out.display()
        ),
    );

    run_generate(args(config.clone(), &["two"], 2, None))
        .await
        .unwrap();
    assert_eq!(lines(&out), vec!["before", "two b", "two b"]);

    run_generate(args(config, &[], 1, None)).await.unwrap();
    assert_eq!(lines(&out), vec!["before", "two b", "two b", "one a"]);
}

#[tokio::test]
async fn test_generate_locale_override() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.log");
    let config = write_config(
        &dir,
        &format!(
            "locale: de_DE\npatterns:\n  - name: p\n    template: \"{{city}}\"\n    fields:\n      city: func_randcity\n    path: {}\n",
            out.display()
        ),
    );

    run_generate(args(config.clone(), &[], 3, Some("it_IT")))
        .await
        .unwrap();
    assert_eq!(lines(&out).len(), 3);

    let err = run_generate(args(config, &[], 1, Some("xx_XX")))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("xx_XX"));
}

#[tokio::test]
async fn test_generate_rejects_bad_configs_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.log");

    let unknown_function = write_config(
        &dir,
        &format!(
            "patterns:\n  - name: p\n    template: \"{{a}}\"\n    fields:\n      a: func_doesNotExist\n    path: {}\n",
            out.display()
        ),
    );
    let err = run_generate(args(unknown_function, &[], 1, None))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("func_doesNotExist"));
    assert!(!out.exists());

    let undefined = write_config(
        &dir,
        "patterns:\n  - name: p\n    template: \"{a} {b}\"\n    fields:\n      a: [x]\n",
    );
    let err = run_generate(args(undefined, &[], 1, None))
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("'b'"));

    let missing = dir.path().join("missing.yaml");
    assert!(run_generate(args(missing, &[], 1, None)).await.is_err());

    let unknown_pattern = write_config(&dir, "patterns: []\n");
    let err = run_generate(args(unknown_pattern, &["ghost"], 1, None))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("ghost"));
}
