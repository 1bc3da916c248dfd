use std::{io::Cursor, path::PathBuf};

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary database and settings file for one test
struct TestEnv {
    dir: TempDir,
    db_path: PathBuf,
    settings_path: PathBuf,
}

impl TestEnv {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temporary directory");
        let db_path = dir.path().join("cli_test.db");
        let settings_path = dir.path().join("settings.json");
        Self {
            dir,
            db_path,
            settings_path,
        }
    }

    /// A `garden` command with --no-color and this environment's files
    fn garden(&self) -> Command {
        let mut cmd = Command::cargo_bin("garden").expect("Failed to find garden binary");
        cmd.arg("--no-color")
            .arg("--database-file")
            .arg(&self.db_path)
            .arg("--settings-file")
            .arg(&self.settings_path);
        cmd
    }

    fn run(&self, args: &[&str]) -> String {
        let output = self.garden().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "garden {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn add_plant(&self, name: &str, latin_name: &str) -> String {
        extract_id_from_output(&self.run(&["plant", "add", name, latin_name]))
    }

    fn add_task(&self, plant_id: &str, description: &str) -> String {
        extract_id_from_output(&self.run(&["task", "add", plant_id, description]))
    }
}

fn extract_id_from_output(output: &str) -> String {
    output
        .lines()
        .find_map(|line| line.split_once("with ID: ").map(|(_, id)| id.trim().to_string()))
        .expect("output should contain an ID")
}

#[test]
fn test_cli_list_empty_plants() {
    let env = TestEnv::new();

    env.garden()
        .args(["plant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Plants"))
        .stdout(predicate::str::contains("No plants found."));
}

#[test]
fn test_cli_default_command_lists_plants() {
    let env = TestEnv::new();
    env.add_plant("Basil", "Ocimum basilicum");

    env.garden()
        .assert()
        .success()
        .stdout(predicate::str::contains("## Basil (Ocimum basilicum)"));
}

#[test]
fn test_cli_add_plant() {
    let env = TestEnv::new();

    env.garden()
        .args([
            "plant",
            "add",
            "Rose",
            "Rosa",
            "--age",
            "3 years",
            "--goals",
            "More blooms",
            "--other-info",
            "South-facing wall",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created plant with ID: "))
        .stdout(predicate::str::contains("## Rose (Rosa)"))
        .stdout(predicate::str::contains("- Age: 3 years"))
        .stdout(predicate::str::contains("- Goals: More blooms"))
        .stdout(predicate::str::contains("South-facing wall"));
}

#[test]
fn test_cli_add_plant_blank_name_fails() {
    let env = TestEnv::new();

    env.garden()
        .args(["plant", "add", "  ", "Rosa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));

    env.garden()
        .args(["plant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No plants found."));
}

#[test]
fn test_cli_list_plants_in_creation_order() {
    let env = TestEnv::new();
    env.add_plant("First", "Primus");
    env.add_plant("Second", "Secundus");

    let output = env.run(&["plant", "list"]);
    let first = output.find("## First").unwrap();
    let second = output.find("## Second").unwrap();
    assert!(first < second);
}

#[test]
fn test_cli_show_plant_with_tasks() {
    let env = TestEnv::new();
    let id = env.add_plant("Tomato", "Solanum lycopersicum");
    env.add_task(&id, "Pinch out side shoots");

    env.garden()
        .args(["plant", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Tomato (Solanum lycopersicum)"))
        .stdout(predicate::str::contains("No photo."))
        .stdout(predicate::str::contains("**Pinch out side shoots**"));
}

#[test]
fn test_cli_show_unknown_plant() {
    let env = TestEnv::new();

    env.garden()
        .args(["plant", "show", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plant with ID missing not found"));
}

#[test]
fn test_cli_update_plant() {
    let env = TestEnv::new();
    let id = env.add_plant("Fern", "Polypodiopsida");

    env.garden()
        .args(["plant", "update", &id, "--goals", "Keep humid"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated plant with ID: "))
        .stdout(predicate::str::contains("Set goals to 'Keep humid'"))
        .stdout(predicate::str::contains("- Goals: Keep humid"));
}

#[test]
fn test_cli_update_plant_without_changes_fails() {
    let env = TestEnv::new();
    let id = env.add_plant("Fern", "Polypodiopsida");

    env.garden()
        .args(["plant", "update", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_cli_plant_photo_round_trip() {
    let env = TestEnv::new();
    let photo_path = env.dir.path().join("leaf.png");
    let pixels = RgbImage::from_fn(1000, 500, |x, _| Rgb([(x % 256) as u8, 160, 40]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(pixels)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    std::fs::write(&photo_path, bytes).unwrap();

    let output = env.run(&[
        "plant",
        "add",
        "Monstera",
        "Monstera deliciosa",
        "--photo",
        photo_path.to_str().unwrap(),
    ]);
    let id = extract_id_from_output(&output);

    env.garden()
        .args(["plant", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("- Thumbnail: blob:garden/"));

    let exported = env.dir.path().join("thumb.jpg");
    env.garden()
        .args([
            "plant",
            "photo",
            &id,
            "--output",
            exported.to_str().unwrap(),
            "--thumbnail",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved thumbnail of 'Monstera'"));

    let thumbnail = image::load_from_memory(&std::fs::read(&exported).unwrap()).unwrap();
    assert_eq!((thumbnail.width(), thumbnail.height()), (200, 100));
}

#[test]
fn test_cli_invalid_photo_fails() {
    let env = TestEnv::new();
    let photo_path = env.dir.path().join("broken.jpg");
    std::fs::write(&photo_path, b"not really a jpeg").unwrap();

    env.garden()
        .args([
            "plant",
            "add",
            "Cactus",
            "Cactaceae",
            "--photo",
            photo_path.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to process image"));
}

#[test]
fn test_cli_photo_export_without_photo_fails() {
    let env = TestEnv::new();
    let id = env.add_plant("Ivy", "Hedera helix");
    let out = env.dir.path().join("ivy.jpg");

    env.garden()
        .args(["plant", "photo", &id, "--output", out.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no photo"));
}

#[test]
fn test_cli_delete_plant_cascades_to_tasks() {
    let env = TestEnv::new();
    let id = env.add_plant("Pepper", "Capsicum annuum");
    env.add_task(&id, "Feed weekly");

    env.garden()
        .args(["plant", "delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deleted plant 'Pepper' (ID: ",
        ));

    env.garden()
        .args(["task", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_cli_add_task() {
    let env = TestEnv::new();
    let id = env.add_plant("Lavender", "Lavandula");

    env.garden()
        .args([
            "task",
            "add",
            &id,
            "Trim after flowering",
            "--date-range",
            "15.08 - 31.08",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created task with ID: "))
        .stdout(predicate::str::contains(
            "○ Pending **Trim after flowering** (15.08 - 31.08)",
        ));
}

#[test]
fn test_cli_add_task_for_unknown_plant_fails() {
    let env = TestEnv::new();

    env.garden()
        .args(["task", "add", "ghost", "Water"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Plant with ID ghost not found"));
}

#[test]
fn test_cli_toggle_and_filter_tasks() {
    let env = TestEnv::new();
    let id = env.add_plant("Apple", "Malus domestica");
    let prune = env.add_task(&id, "Winter prune");
    env.add_task(&id, "Thin fruitlets");

    env.garden()
        .args(["task", "toggle", &prune])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as done"))
        .stdout(predicate::str::contains("✓ Done **Winter prune**"));

    let completed = env.run(&["task", "list", "--completed"]);
    assert!(completed.contains("Winter prune"));
    assert!(!completed.contains("Thin fruitlets"));

    let pending = env.run(&["task", "list", "--plant", &id, "--pending"]);
    assert!(pending.contains("Thin fruitlets"));
    assert!(!pending.contains("Winter prune"));

    env.garden()
        .args(["task", "toggle", &prune])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked as pending"));
}

#[test]
fn test_cli_pending_and_completed_conflict() {
    let env = TestEnv::new();

    env.garden()
        .args(["task", "list", "--pending", "--completed"])
        .assert()
        .failure();
}

#[test]
fn test_cli_update_and_delete_task() {
    let env = TestEnv::new();
    let id = env.add_plant("Mint", "Mentha");
    let task = env.add_task(&id, "Divide");

    env.garden()
        .args(["task", "update", &task, "--description", "Divide clumps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set description to 'Divide clumps'"));

    env.garden()
        .args(["task", "delete", &task])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted task 'Divide clumps'"));

    env.garden()
        .args(["task", "delete", &task])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_cli_settings_api_key() {
    let env = TestEnv::new();

    env.garden()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key: not set"));

    env.garden()
        .args(["settings", "set-key", "sk-test-123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key saved."));

    env.garden()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key: set (sk-t...)"))
        .stdout(predicate::str::contains("sk-test-123").not());

    let stored = std::fs::read_to_string(&env.settings_path).unwrap();
    assert!(stored.contains("garden-tracker-settings"));

    env.garden()
        .args(["settings", "clear-key"])
        .assert()
        .success();

    env.garden()
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("API key: not set"));
}

#[test]
fn test_cli_assist_without_api_key_fails() {
    let env = TestEnv::new();
    let id = env.add_plant("Olive", "Olea europaea");

    env.garden()
        .args(["assist", "questions", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("OpenAI API key is required"));
}

#[test]
fn test_cli_help_output() {
    Command::cargo_bin("garden")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plant"))
        .stdout(predicate::str::contains("task"))
        .stdout(predicate::str::contains("assist"));
}

#[test]
fn test_cli_version_output() {
    Command::cargo_bin("garden")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("garden"));
}
