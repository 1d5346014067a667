/*!
 * Common test utilities for the playshift test suite
 */

use std::path::PathBuf;
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample page-object source file for testing
pub fn create_test_page_object(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_PAGE_OBJECT)
}

/// Creates a sample step-definition source file for testing
pub fn create_test_step_definitions(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, SAMPLE_STEP_DEFINITIONS)
}

/// A representative legacy page object
pub const SAMPLE_PAGE_OBJECT: &str = r#"package com.example.pages;

import org.openqa.selenium.WebDriver;
import org.openqa.selenium.WebElement;

public class LoginPage {

    private WebDriver driver;

    @ElementInfo("{""locator"":""id=username"",""desc"":""Username field""}")
    private WebElement usernameField;

    @ElementInfo("{""locator"":""id=password""}")
    private WebElement passwordField;

    @FindBy(id = "loginBtn")
    private WebElement loginButton;

    public LoginPage(WebDriver driver) {
        this.driver = driver;
    }

    public void login(String user, String pass) {
        usernameField.sendKeys(user);
        passwordField.sendKeys(pass);
        loginButton.click();
        waitForElement(loginButton, 2000);
    }

    public boolean isLoaded() {
        return loginButton.isDisplayed();
    }
}
"#;

/// A representative step-definition class
pub const SAMPLE_STEP_DEFINITIONS: &str = r#"package com.example.steps;

import io.cucumber.java.en.Given;
import io.cucumber.java.en.Then;
import io.cucumber.java.en.When;

public class LoginSteps {

    @Given("the user is on the login page")
    public void userIsOnLoginPage() {
        driver.get("https://example.com/login");
    }

    @When("the user logs in")
    public void userLogsIn(String username) {
        Thread.sleep(1500);
        int retries = computeSomething();
    }

    @Then("the dashboard is visible")
    public void dashboardVisible() {
        Assert.assertTrue(dashboard.isDisplayed());
    }
}
"#;
