use site_builder::publish::{GitPublisher, HostedPublisher, PublishError, PublishRequest, PublishTarget};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("git runs");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn project(root: &Path) -> PublishRequest {
    let dir = root.join("adventure-gear-pro");
    fs::create_dir_all(dir.join("pages")).expect("project dir");
    fs::write(dir.join("pages/index.js"), "export default function Home() {}\n").expect("write page");
    PublishRequest {
        project_dir: dir,
        brand_name: "Adventure Gear Pro".to_string(),
        brand_slug: "adventure-gear-pro".to_string(),
        niche: "outdoor-adventure".to_string(),
    }
}

fn publisher(remote: &Path) -> GitPublisher {
    GitPublisher::new(&remote.display().to_string(), "main").with_identity("Site Builder", "builder@example.com")
}

#[tokio::test]
async fn pushes_to_a_bare_remote_and_can_repeat() {
    let temp = TempDir::new().expect("temp dir");
    let remote = temp.path().join("remote.git");
    fs::create_dir_all(&remote).expect("remote dir");
    git(&remote, &["init", "--bare", "--quiet"]);

    let request = project(temp.path());
    let target = PublishTarget::Git(publisher(&remote));

    let outcome = target.publish(&request).await.expect("first push");
    assert_eq!(outcome.target, "git");
    assert_eq!(outcome.url, remote.display().to_string());

    let message = git(&remote, &["log", "-1", "--format=%s", "main"]);
    assert_eq!(
        message,
        "Deploy Adventure Gear Pro - outdoor-adventure affiliate site with live data"
    );

    // Unchanged output still publishes
    target.publish(&request).await.expect("second push");
    assert_eq!(git(&remote, &["rev-list", "--count", "main"]), "2");

    let files = git(&remote, &["ls-tree", "-r", "--name-only", "main"]);
    assert!(files.lines().any(|line| line == "pages/index.js"));
}

#[tokio::test]
async fn push_to_missing_remote_reports_the_failing_command() {
    let temp = TempDir::new().expect("temp dir");
    let request = project(temp.path());
    let missing = temp.path().join("does-not-exist.git");

    let err = publisher(&missing).publish(&request).await.unwrap_err();
    match err {
        PublishError::GitCommand { command, status, .. } => {
            assert!(command.starts_with("git push"), "{command}");
            assert_ne!(status, Some(0));
        }
        other => panic!("unexpected error: {other}"),
    }

    // Generated files are left in place
    assert!(request.project_dir.join("pages/index.js").is_file());
}

#[tokio::test]
async fn hosted_publisher_derives_url_from_slug() {
    let temp = TempDir::new().expect("temp dir");
    let request = project(temp.path());

    let outcome = PublishTarget::Hosted(HostedPublisher::new(None))
        .publish(&request)
        .await
        .expect("hosted publish");
    assert_eq!(outcome.target, "vercel");
    assert_eq!(outcome.url, "https://adventure-gear-pro.vercel.app");
}
