use std::fs;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let control = tmp.path().join("apps/control/components");
    let core = tmp.path().join("apps/core/components");
    fs::create_dir_all(&control).unwrap();
    fs::create_dir_all(&core).unwrap();
    fs::write(
        control.join("Form.tsx"),
        "import { Button } from '@/components/admin/Button';\n",
    )
    .unwrap();
    fs::write(
        core.join("Form.tsx"),
        "import { Button } from '@/components/admin/Button';\nimport { cn } from '@/lib/utils';\n",
    )
    .unwrap();
    tmp
}

fn repath(tmp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("repath");
    cmd.current_dir(tmp.path())
        .env_remove("RUST_LOG")
        .env_remove("REPATH_ROOT")
        .env_remove("REPATH_PRESET")
        .env_remove("REPATH_RULES");
    cmd
}

fn stdout(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).unwrap()
}

#[test]
fn defaults_to_apps_with_control_preset() {
    let tmp = workspace();
    let out = stdout(&mut repath(&tmp));

    assert!(out.starts_with("Rewriting import aliases under apps\n"));
    assert!(out.contains("modified apps/control/components/Form.tsx (1 imports)"));
    assert!(out.ends_with("Done: 2 files visited, 2 modified, 2 imports rewritten\n"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("apps/control/components/Form.tsx")).unwrap(),
        "import { Button } from \"@/components/Button\";\n"
    );
    assert_eq!(
        fs::read_to_string(tmp.path().join("apps/core/components/Form.tsx")).unwrap(),
        "import { Button } from '@/components/admin/Button';\nimport { cn } from \"@lib/utils\";\n"
    );
}

#[test]
fn dry_run_does_not_write() {
    let tmp = workspace();
    let out = stdout(repath(&tmp).arg("--dry-run"));

    assert!(out.contains("would modify"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("apps/control/components/Form.tsx")).unwrap(),
        "import { Button } from '@/components/admin/Button';\n"
    );
}

#[test]
fn rule_file_replaces_the_preset() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("rules.toml"),
        "[[rules]]\nfrom = \"@/components/admin/\"\nto = \"@admin/\"\n",
    )
    .unwrap();
    stdout(repath(&tmp).args(["--rules", "rules.toml", "apps/core"]));

    assert_eq!(
        fs::read_to_string(tmp.path().join("apps/core/components/Form.tsx")).unwrap(),
        "import { Button } from \"@admin/Button\";\nimport { cn } from '@/lib/utils';\n"
    );
}

#[test]
fn missing_root_fails() {
    let tmp = workspace();
    let out = repath(&tmp)
        .arg("src")
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "error: root directory `src` does not exist or is not a directory\n"
    );
}

#[test]
fn unknown_preset_is_rejected() {
    let tmp = workspace();
    repath(&tmp).args(["--preset", "admin"]).assert().failure();
}
