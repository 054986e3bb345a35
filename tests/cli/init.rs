use anyhow::Result;

use crate::Project;

#[test]
fn test_init_creates_config() -> Result<()> {
    let project = Project::new()?;

    let run = project.run(&["init"])?;
    run.assert_success();
    assert!(run.stdout.contains("Created .ngmigrc.json"));

    let config = project.manifest_at(".ngmigrc.json")?;
    assert_eq!(config["sourceRoot"], "./src");
    assert_eq!(config["outputFile"], "translation.json");
    assert_eq!(config["replaceHtmlTexts"], true);
    assert_eq!(config["keyPadding"], 3);
    assert!(
        project.read(".ngmigrc.json")?.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let project = Project::new()?;
    project.configure("{}")?;

    let run = project.run(&["init"])?;

    assert_eq!(run.code, Some(2));
    insta::assert_snapshot!(run.stderr.trim_end(), @"Error: .ngmigrc.json already exists");
    assert_eq!(project.read(".ngmigrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let project = Project::new()?;
    project.run(&["init"])?.assert_success();
    project.write("src/app/home/home.component.html", "<h1>Welcome</h1>")?;

    project.migrate(&[])?.assert_success();
    assert!(project.has_manifest());

    Ok(())
}
