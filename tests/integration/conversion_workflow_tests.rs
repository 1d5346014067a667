/*!
 * End-to-end conversion tests
 */

use std::fs;
use anyhow::Result;
use playshift::app_config::Config;
use playshift::app_controller::Controller;
use playshift::recognition::mock::MockRecognizer;
use crate::common;

/// Test that converting a page object writes the expected output file
#[tokio::test]
async fn test_run_withPageObject_shouldWriteConvertedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_page_object(&root, "LoginPage.java")?;
    let output_dir = root.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(input, output_dir.clone(), false).await?;

    let output_path = output_dir.join("LoginPage.page.ts");
    assert!(output_path.exists());

    let output = fs::read_to_string(&output_path)?;
    assert!(output.contains("import { test, expect } from '@playwright/test';"));
    assert!(output.contains("export class LoginPage {"));
    assert!(output.contains("await (await this.loginButton()).click();"));
    assert!(output.contains("await (await this.loginButton()).waitFor({ timeout: 2 });"));

    Ok(())
}

/// Test that a step-definition file converts under the spec suffix
#[tokio::test]
async fn test_run_withStepDefinitions_shouldWriteSpecFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_step_definitions(&root, "LoginSteps.java")?;
    let output_dir = root.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(input, output_dir.clone(), false).await?;

    let output_path = output_dir.join("LoginSteps.spec.ts");
    assert!(output_path.exists());

    let output = fs::read_to_string(&output_path)?;
    assert!(output.contains("// Step: the user is on the login page"));
    assert!(output.contains("// TODO: int retries = computeSomething();"));

    Ok(())
}

/// Test that converting twice produces byte-identical output
#[tokio::test]
async fn test_run_withSameInputTwice_shouldProduceIdenticalOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_page_object(&root, "LoginPage.java")?;
    let output_dir = root.join("out");
    let output_path = output_dir.join("LoginPage.page.ts");

    let controller = Controller::new_for_test()?;
    controller.run(input.clone(), output_dir.clone(), false).await?;
    let first = fs::read_to_string(&output_path)?;

    controller.run(input, output_dir, true).await?;
    let second = fs::read_to_string(&output_path)?;

    assert_eq!(first, second);

    Ok(())
}

/// Test that the converted output always balances its braces
#[tokio::test]
async fn test_run_withTruncatedSource_shouldBalanceOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_file(
        &root,
        "BrokenPage.java",
        "public class BrokenPage {\n    public void half() {\n        loginButton.click();\n",
    )?;
    let output_dir = root.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(input, output_dir.clone(), false).await?;

    let output = fs::read_to_string(output_dir.join("BrokenPage.page.ts"))?;
    assert_eq!(output.matches('{').count(), output.matches('}').count());

    Ok(())
}

/// Test that diagnostics mode writes the echo and skipped-line side files
#[tokio::test]
async fn test_run_withDiagnostics_shouldWriteSideFiles() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_page_object(&root, "LoginPage.java")?;
    let output_dir = root.join("out");

    let mut config = Config::default();
    config.emit_diagnostics = true;
    let controller = Controller::with_config(config)?;
    controller.run(input, output_dir.clone(), false).await?;

    let echo = fs::read_to_string(output_dir.join("LoginPage.echo.txt"))?;
    assert!(echo.contains("   1 | package com.example.pages;"));

    let skipped = fs::read_to_string(output_dir.join("LoginPage.skipped.log"))?;
    assert!(skipped.contains("no pattern match"));
    assert!(skipped.contains("constructor replaced by scaffold"));

    Ok(())
}

/// Test that folder conversion mirrors the input tree
#[tokio::test]
async fn test_runFolder_withNestedTree_shouldMirrorStructure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let pages_dir = root.join("input").join("pages");
    fs::create_dir_all(&pages_dir)?;
    common::create_test_page_object(&pages_dir, "LoginPage.java")?;
    common::create_test_step_definitions(&root.join("input"), "LoginSteps.java")?;
    let output_dir = root.join("out");

    let controller = Controller::new_for_test()?;
    controller
        .run_folder(root.join("input"), output_dir.clone(), false)
        .await?;

    assert!(output_dir.join("pages").join("LoginPage.page.ts").exists());
    assert!(output_dir.join("LoginSteps.spec.ts").exists());
    assert!(output_dir.join("conversion.log").exists());

    Ok(())
}

/// Test that a recognized pattern lands as a header comment
#[tokio::test]
async fn test_run_withWorkingRecognizer_shouldAnnotateOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_page_object(&root, "LoginPage.java")?;
    let output_dir = root.join("out");

    let controller =
        Controller::with_recognizer(Config::default(), Box::new(MockRecognizer::working()));
    controller.run(input, output_dir.clone(), false).await?;

    let output = fs::read_to_string(output_dir.join("LoginPage.page.ts"))?;
    assert!(output.contains("// Pattern: recorded-flow (confidence 0.90)"));

    Ok(())
}

/// Test that a failing recognizer never fails the conversion
#[tokio::test]
async fn test_run_withFailingRecognizer_shouldStillConvert() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let root = temp_dir.path().to_path_buf();
    let input = common::create_test_page_object(&root, "LoginPage.java")?;
    let output_dir = root.join("out");

    let controller =
        Controller::with_recognizer(Config::default(), Box::new(MockRecognizer::failing()));
    controller.run(input, output_dir.clone(), false).await?;

    let output = fs::read_to_string(output_dir.join("LoginPage.page.ts"))?;
    assert!(output.contains("export class LoginPage {"));
    assert!(!output.contains("// Pattern:"));

    Ok(())
}
