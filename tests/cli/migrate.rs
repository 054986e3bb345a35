use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::Project;

const LOGIN: &str = "src/app/auth/login.component.html";
const REGISTER: &str = "src/app/auth/register.component.html";

#[test]
fn test_migrate_rewrites_template_and_writes_manifest() -> Result<()> {
    let project = Project::with_templates(&[(LOGIN, "<button>Sign in</button>")])?;

    let run = project.migrate(&[])?;
    run.assert_success();

    insta::assert_snapshot!(
        project.read(LOGIN)?,
        @"<button>{{ 'AUTH.LOGIN_COMPONENT_000' | translate }}</button>"
    );
    assert_eq!(
        project.read("src/translation.json")?,
        "{\n  \"AUTH\": {\n    \"LOGIN_COMPONENT_000\": \"Sign in\"\n  }\n}\n"
    );
    assert!(run.stdout.contains("Rewrote 1 of 1 template(s), 1 key(s) in 1 module(s)"));

    Ok(())
}

#[test]
fn test_migrate_keeps_markup_outside_texts() -> Result<()> {
    let source = r#"<form [formGroup]="form" (ngSubmit)="save()">
  <label for="email">Email address</label>
  <input id="email" formControlName="email" placeholder="Email address">
  <!-- TODO: hint -->
  <span *ngIf="error">{{ error }}</span>
  <button type="submit">Save</button>
</form>
"#;
    let path = "src/app/profile/edit-profile.component.html";
    let project = Project::with_templates(&[(path, source)])?;

    project.migrate(&[])?.assert_success();

    assert_eq!(
        project.read(path)?,
        r#"<form [formGroup]="form" (ngSubmit)="save()">
  <label for="email">{{ 'PROFILE.EDIT_PROFILE_COMPONENT_000' | translate }}</label>
  <input id="email" formControlName="email" placeholder="Email address">
  <!-- TODO: hint -->
  <span *ngIf="error">{{ error }}</span>
  <button type="submit">{{ 'PROFILE.EDIT_PROFILE_COMPONENT_001' | translate }}</button>
</form>
"#
    );
    assert_eq!(
        project.manifest()?,
        json!({
            "PROFILE": {
                "EDIT_PROFILE_COMPONENT_000": "Email address",
                "EDIT_PROFILE_COMPONENT_001": "Save"
            }
        })
    );

    Ok(())
}

#[test]
fn test_migrate_replaces_every_copy_of_a_text() -> Result<()> {
    let source = "<button>Save</button>\n<p>\n  Save\n</p>\n<a>Cancel</a>\n";
    let path = "src/app/editor/toolbar.html";
    let project = Project::with_templates(&[(path, source)])?;

    project.migrate(&[])?.assert_success();

    assert_eq!(
        project.read(path)?,
        "<button>{{ 'EDITOR.TOOLBAR_000' | translate }}</button>\n\
         <p>\n  {{ 'EDITOR.TOOLBAR_000' | translate }}\n</p>\n\
         <a>{{ 'EDITOR.TOOLBAR_001' | translate }}</a>\n"
    );
    assert_eq!(
        project.manifest()?,
        json!({"EDITOR": {"TOOLBAR_000": "Save", "TOOLBAR_001": "Cancel"}})
    );

    // A second run finds nothing left to extract.
    let rescan = project.scan(&[])?;
    assert!(rescan.stdout.contains("no translatable text found"));

    Ok(())
}

#[test]
fn test_migrate_warns_about_split_text() -> Result<()> {
    let path = "src/app/report/sales.html";
    let project = Project::with_templates(&[(path, "<h1>Sales</h1><td>10<small>%</small></td>")])?;

    let run = project.migrate(&[])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("unreplaced-text"));
    assert!(run.stdout.contains("SALES_001 (\"10%\")"));
    assert!(run.stdout.contains("1 problems (0 errors, 1 warning)"));
    assert_eq!(
        project.manifest()?,
        json!({"REPORT": {"SALES_000": "Sales", "SALES_001": "10%"}})
    );

    Ok(())
}

#[test]
fn test_migrate_dry_run_leaves_templates() -> Result<()> {
    let project = Project::with_templates(&[(LOGIN, "<button>Sign in</button>")])?;

    let run = project.migrate(&["--dry-run"])?;
    run.assert_success();

    assert_eq!(project.read(LOGIN)?, "<button>Sign in</button>");
    assert_eq!(
        project.manifest()?,
        json!({"AUTH": {"LOGIN_COMPONENT_000": "Sign in"}})
    );
    assert!(run.stdout.contains("templates not modified"));

    Ok(())
}

#[test]
fn test_migrate_same_module_takes_union() -> Result<()> {
    let project = Project::with_templates(&[
        (LOGIN, "<h2>Welcome back</h2><button>Sign in</button>"),
        (REGISTER, "<h2>Create account</h2>"),
        ("src/app/shop/cart.component.html", "<p>Your cart is empty</p>"),
    ])?;

    project.migrate(&[])?.assert_success();

    assert_eq!(
        project.manifest()?,
        json!({
            "AUTH": {
                "LOGIN_COMPONENT_000": "Welcome back",
                "LOGIN_COMPONENT_001": "Sign in",
                "REGISTER_COMPONENT_000": "Create account"
            },
            "SHOP": {
                "CART_COMPONENT_000": "Your cart is empty"
            }
        })
    );

    Ok(())
}

#[test]
fn test_migrate_skips_untranslatable_text() -> Result<()> {
    let source = "<td>42</td><td>-</td><td>{{ price | currency }}</td>";
    let path = "src/app/shop/price.component.html";
    let project = Project::with_templates(&[(path, source)])?;

    project.migrate(&[])?.assert_success();

    assert_eq!(project.read(path)?, source);
    assert_eq!(project.read("src/translation.json")?, "{}\n");

    Ok(())
}

#[test]
fn test_migrate_is_idempotent() -> Result<()> {
    let project = Project::with_templates(&[(LOGIN, "<button>Sign in</button>")])?;

    project.migrate(&[])?.assert_success();
    let first = project.read(LOGIN)?;

    project.migrate(&[])?.assert_success();
    assert_eq!(project.read(LOGIN)?, first);

    Ok(())
}

#[test]
fn test_migrate_with_config_file() -> Result<()> {
    let project = Project::with_templates(&[
        ("web/app/auth/login.html", "<p>Sign in</p>"),
        ("web/app/legacy/old.html", "<p>Old page</p>"),
    ])?;
    project.configure(
        r#"{
  "sourceRoot": "./web",
  "outputFile": "i18n/en.json",
  "keyPadding": 2,
  "modulePrefixedKeys": true,
  "ignores": ["**/legacy/**"]
}"#,
    )?;

    project.migrate(&[])?.assert_success();

    assert_eq!(
        project.manifest_at("web/i18n/en.json")?,
        json!({"AUTH": {"AUTH_LOGIN_00": "Sign in"}})
    );
    assert_eq!(project.read("web/app/legacy/old.html")?, "<p>Old page</p>");

    Ok(())
}

#[test]
fn test_migrate_cli_overrides_config() -> Result<()> {
    let project = Project::with_templates(&[("client/app/home/home.html", "<h1>Home</h1>")])?;
    project.configure(r#"{ "sourceRoot": "./missing" }"#)?;

    project
        .migrate(&["--source-root", "client", "--output", "out/messages.json"])?
        .assert_success();

    assert_eq!(
        project.manifest_at("client/out/messages.json")?,
        json!({"HOME": {"HOME_000": "Home"}})
    );

    Ok(())
}

#[test]
fn test_migrate_relative_source_root_starting_at_app() -> Result<()> {
    let project = Project::with_templates(&[("src/app/auth/login.component.html", "<p>Sign in</p>")])?;

    let run = project.run_in("src", &["migrate", "--source-root", "app"])?;
    run.assert_success();

    assert_eq!(
        project.manifest_at("src/app/translation.json")?,
        json!({"AUTH": {"LOGIN_COMPONENT_000": "Sign in"}})
    );
    assert_eq!(
        project.read("src/app/auth/login.component.html")?,
        "<p>{{ 'AUTH.LOGIN_COMPONENT_000' | translate }}</p>"
    );

    Ok(())
}

#[test]
fn test_migrate_missing_source_root_is_fatal() -> Result<()> {
    let project = Project::new()?;

    let run = project.migrate(&[])?;

    assert_eq!(run.code, Some(2));
    assert!(run.stderr.contains("Error: Source root './src' is not a directory"));

    Ok(())
}

#[test]
fn test_migrate_invalid_config_is_fatal() -> Result<()> {
    let project = Project::with_templates(&[(LOGIN, "<p>Sign in</p>")])?;
    project.configure(r#"{ "keyPadding": 0 }"#)?;

    let run = project.migrate(&[])?;

    assert_eq!(run.code, Some(2));
    assert!(run.stderr.contains("keyPadding"));
    assert_eq!(project.read(LOGIN)?, "<p>Sign in</p>");

    Ok(())
}

#[test]
fn test_migrate_unreadable_file_fails_but_finishes() -> Result<()> {
    let project = Project::with_templates(&[(LOGIN, "<button>Sign in</button>")])?;
    project.write("src/app/auth/broken.component.html", [0xff, 0xfe, 0x00, 0x3c])?;

    let run = project.migrate(&[])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("read-error"));
    assert!(run.stdout.contains("broken.component.html"));
    assert!(run.stdout.contains("1 problems (1 error, 0 warnings)"));
    assert_eq!(
        project.manifest()?,
        json!({"AUTH": {"LOGIN_COMPONENT_000": "Sign in"}})
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let project = Project::new()?;

    let run = project.run(&[])?;

    run.assert_success();
    assert!(run.stdout.contains("migrate"));

    Ok(())
}
