use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::Project;

#[test]
fn test_scan_lists_keys_without_writing() -> Result<()> {
    let source = "<h2>Welcome back</h2><button>Sign in</button>";
    let path = "src/app/auth/login.component.html";
    let project = Project::with_templates(&[(path, source)])?;

    let run = project.scan(&[])?;
    run.assert_success();

    assert!(run.stdout.contains("login.component.html [AUTH]"));
    assert!(run.stdout.contains("  LOGIN_COMPONENT_000  \"Welcome back\""));
    assert!(run.stdout.contains("  LOGIN_COMPONENT_001  \"Sign in\""));
    assert!(run.stdout.contains("Would extract 2 key(s) in 1 module(s) from 1 template(s)"));

    assert_eq!(project.read(path)?, source);
    assert!(!project.has_manifest());

    Ok(())
}

#[test]
fn test_scan_without_text() -> Result<()> {
    let project = Project::with_templates(&[(
        "src/app/app.component.html",
        "<router-outlet></router-outlet>",
    )])?;

    let run = project.scan(&[])?;
    run.assert_success();

    insta::assert_snapshot!(
        run.stdout.trim_end(),
        @"✓ Scanned 1 template(s) - no translatable text found"
    );

    Ok(())
}

#[test]
fn test_scan_with_source_root() -> Result<()> {
    let project = Project::with_templates(&[("packages/admin/app/users/list.html", "<th>Name</th>")])?;

    let run = project.scan(&["--source-root", "packages/admin"])?;
    run.assert_success();

    assert!(run.stdout.contains("[USERS]"));
    assert!(run.stdout.contains("LIST_000  \"Name\""));

    Ok(())
}
