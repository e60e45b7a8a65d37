//! Integration tests for the hanmark CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn write_component(dir: &TempDir) -> std::path::PathBuf {
    let views = dir.path().join("views");
    fs::create_dir_all(&views).unwrap();
    let file = views.join("page.vue");
    fs::write(&file, "<template><div>你好</div></template>").unwrap();
    file
}

#[test]
fn test_scan_text_output() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("scan").arg("-i").arg(&file).arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(":1:15 tag 你好"));
}

#[test]
fn test_scan_json_output() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("scan").arg("-i").arg(&file).arg("-f").arg("json").arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"value\": \"你好\""))
        .stdout(predicate::str::contains("\"kind\": \"tag\""));
}

#[test]
fn test_scan_markdown_output() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("scan").arg("-i").arg(&file).arg("-f").arg("markdown").arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("| 你好 | 1 |"))
        .stdout(predicate::str::contains("*Total entries: 1*"));
}

#[test]
fn test_scan_no_match_fails() {
    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("scan").arg("-i").arg("/nonexistent/**/*.vue").arg("-q");

    cmd.assert().failure();
}

#[test]
fn test_extract_dry_run_prints_rewrite() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);
    let keys = dir.path().join("keys.toml");
    fs::write(&keys, "[keys]\n\"你好\" = \"greeting\"\n").unwrap();

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("extract")
        .arg("-i")
        .arg(&file)
        .arg("-k")
        .arg(&keys)
        .arg("--dry-run")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{{$t('greeting')}}"));

    // Dry run leaves the source untouched.
    let content = fs::read_to_string(&file).unwrap();
    assert!(content.contains("你好"));
}

#[test]
fn test_extract_rewrites_and_exports() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);
    let keys = dir.path().join("keys.toml");
    fs::write(&keys, "[keys]\n\"你好\" = \"greeting\"\n").unwrap();
    let out = dir.path().join("i18n");

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("extract")
        .arg("-i")
        .arg(&file)
        .arg("-k")
        .arg(&keys)
        .arg("-o")
        .arg(&out)
        .arg("-q");

    cmd.assert().success();

    let content = fs::read_to_string(&file).unwrap();
    assert_eq!(content, "<template><div>{{$t('greeting')}}</div></template>");

    let module = fs::read_to_string(out.join("zh/views_page.ts")).unwrap();
    assert_eq!(module, "export default {\n  greeting: '你好',\n};\n");

    let report = fs::read_to_string(out.join("i18n.md")).unwrap();
    assert!(report.contains("| greeting | 你好 |"));
}

#[test]
fn test_extract_with_glossary_translates() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);
    let keys = dir.path().join("keys.toml");
    fs::write(&keys, "[keys]\n\"你好\" = \"greeting\"\n").unwrap();
    let glossary = dir.path().join("glossary.toml");
    fs::write(&glossary, "[en]\n\"你好\" = \"hello\"\n").unwrap();
    let out = dir.path().join("i18n");

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("extract")
        .arg("-i")
        .arg(&file)
        .arg("-k")
        .arg(&keys)
        .arg("-g")
        .arg(&glossary)
        .arg("-l")
        .arg("en")
        .arg("-o")
        .arg(&out)
        .arg("-q");

    cmd.assert().success();

    let en = fs::read_to_string(out.join("en/views_page.ts")).unwrap();
    assert_eq!(en, "export default {\n  greeting: 'hello',\n};\n");

    let report = fs::read_to_string(out.join("i18n.md")).unwrap();
    assert!(report.contains("| key | zh | en |"));
    assert!(report.contains("| greeting | 你好 | hello |"));
}

#[test]
fn test_extract_auto_key_prefix() {
    let dir = TempDir::new().unwrap();
    let file = write_component(&dir);

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("extract")
        .arg("-i")
        .arg(&file)
        .arg("--key-prefix")
        .arg("t")
        .arg("--dry-run")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("{{$t('t1')}}"));
}

#[test]
fn test_extract_script_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("api.ts");
    fs::write(&file, "const msg = '保存成功';").unwrap();
    let keys = dir.path().join("keys.toml");
    fs::write(&keys, "[keys]\n\"保存成功\" = \"saved\"\n").unwrap();

    let mut cmd = Command::cargo_bin("hanmark").unwrap();
    cmd.arg("extract")
        .arg("-i")
        .arg(&file)
        .arg("-k")
        .arg(&keys)
        .arg("--dry-run")
        .arg("-q");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("const msg = $t('saved');"));
}
