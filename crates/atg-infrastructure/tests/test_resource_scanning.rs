use std::fs;
use std::path::Path;

use std::sync::Arc;

use atg_core::{
    Framework, InMemoryCorrectionRepository, Mapper, MatcherConfig, ScaffoldMetadata,
    ScaffoldRenderer,
};
use atg_infrastructure::{ResourceScanner, TestCaseInput};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(
        root,
        "resources/common.robot",
        "*** Keywords ***\nOpen Browser To Login Page\n    No Operation\n\nInput Username\n    [Arguments]    ${name}\n    No Operation\n",
    );
    write(
        root,
        "keywords/login.py",
        "def click_login_button(page):\n    pass\n\n\n@given(\"the user is logged in\")\ndef logged_in(context):\n    pass\n",
    );
    write(
        root,
        "src/test/java/com/acme/LoginKeywords.java",
        "public class LoginKeywords {\n    public static void clickLoginButton() {}\n}\n",
    );
    write(
        root,
        "vendor/mobile.keywords.toml",
        "[[keyword]]\nname = \"Open Application\"\narity = 1\nframework = \"robot\"\nsource = \"AppiumLibrary\"\n",
    );
    write(root, "keywords/__pycache__/login.py", "def stale():\n    pass\n");
    write(root, "README.md", "# not a resource\n");
    temp_dir
}

#[test]
fn test_scan_project_into_library() {
    let temp_dir = project();
    let scanner = ResourceScanner::new().unwrap();

    let library = scanner
        .build_library(&[temp_dir.path()])
        .expect("Should build library");

    assert_eq!(library.len(), 6);
    assert_eq!(library.entries(Framework::Robot).count(), 3);
    assert_eq!(library.entries(Framework::Pytest).count(), 1);
    assert_eq!(library.entries(Framework::Gherkin).count(), 1);
    assert_eq!(library.entries(Framework::Junit).count(), 1);

    let input = library.find_by_name("Input Username", Framework::Robot).unwrap();
    assert_eq!(input.arity, 1);
    assert!(input.source_ref.ends_with("resources/common.robot"));
    assert!(library.find_by_name("stale", Framework::Pytest).is_none());
}

#[test]
fn test_scan_is_deterministic() {
    let temp_dir = project();
    let scanner = ResourceScanner::new().unwrap();

    let first = scanner.scan(temp_dir.path()).unwrap();
    let second = scanner.scan(temp_dir.path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_keywords_across_files_fail_the_build() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "a.robot", "*** Keywords ***\nLog Out\n    No Operation\n");
    write(temp_dir.path(), "b.resource", "*** Keywords ***\nlog_out\n    No Operation\n");

    let err = ResourceScanner::new()
        .unwrap()
        .build_library(&[temp_dir.path()])
        .unwrap_err();
    assert!(err.is_malformed_resource());
}

#[test]
fn test_step_registered_for_several_types_builds() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "features/steps/login_steps.py",
        "@given(\"the user is logged in\")\n@when(\"the user is logged in\")\ndef logged_in(context):\n    pass\n",
    );

    let library = ResourceScanner::new()
        .unwrap()
        .build_library(&[temp_dir.path()])
        .expect("Stacked decorators should not collide");

    assert_eq!(library.len(), 1);
    let entry = library
        .find_by_name("the user is logged in", Framework::Gherkin)
        .unwrap();
    assert_eq!(entry.step_kind, None);
}

#[test]
fn test_missing_root_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let scanner = ResourceScanner::new().unwrap();
    assert!(scanner.scan(&temp_dir.path().join("missing")).is_err());
}

#[test]
fn test_step_file_to_scaffold() {
    let temp_dir = project();
    write(
        temp_dir.path(),
        "cases/login.json",
        r#"{
            "name": "Valid Login",
            "description": "User signs in with valid credentials",
            "steps": [
                {"action": "Open browser to login page", "expected_result": "Login form shown"},
                {"action": "Input username", "expected_result": "Name typed"},
                {"action": "Solve the captcha", "expected_result": "Captcha accepted"}
            ]
        }"#,
    );

    let library = ResourceScanner::new()
        .unwrap()
        .build_library(&[temp_dir.path().join("resources")])
        .unwrap();
    let case = TestCaseInput::load(&temp_dir.path().join("cases/login.json")).unwrap();

    let mapper = Mapper::new(
        Arc::new(library),
        Arc::new(InMemoryCorrectionRepository::new()),
        MatcherConfig::new(Framework::Robot),
    );
    let session = mapper.run(case.steps).unwrap();
    assert_eq!(session.summary().mapped, 2);

    let metadata = ScaffoldMetadata::new(case.name.unwrap())
        .with_description(case.description.unwrap_or_default());
    let doc = ScaffoldRenderer::new()
        .unwrap()
        .render(&session, "robot", &metadata)
        .unwrap();

    assert!(doc.body_text().contains("    Input Username    <arg1>\n"));
    assert_eq!(doc.unresolved_placeholders().len(), 1);
    assert_eq!(doc.unresolved_placeholders()[0].action, "Solve the captcha");
    assert_eq!(doc.file_name(), "valid_login.robot");
}
