/// Version-control publisher
///
/// Commits the generated project and force-pushes it to a remote branch by
/// driving the `git` CLI. Any non-zero exit aborts the publish; there is no
/// retry.

use crate::publish::{PublishError, PublishOutcome, PublishRequest};
use crate::template::{render, TemplateContext};
use std::path::Path;
use tokio::process::Command;

/// Commit message template; expanded with `brand_name` and `niche`
pub const DEFAULT_COMMIT_TEMPLATE: &str = "Deploy {{brand_name}} - {{niche}} affiliate site with live data";

/// Author/committer identity applied through GIT_AUTHOR_* / GIT_COMMITTER_*
#[derive(Debug, Clone)]
pub struct GitIdentity {
    pub name: String,
    pub email: String,
}

/// Publishes a project directory to a git remote
#[derive(Debug, Clone)]
pub struct GitPublisher {
    remote_url: String,
    branch: String,
    identity: Option<GitIdentity>,
}

impl GitPublisher {
    pub fn new(remote_url: &str, branch: &str) -> Self {
        Self {
            remote_url: remote_url.to_string(),
            branch: branch.to_string(),
            identity: None,
        }
    }

    pub fn with_identity(mut self, name: &str, email: &str) -> Self {
        self.identity = Some(GitIdentity {
            name: name.to_string(),
            email: email.to_string(),
        });
        self
    }

    /// Commit message for a request
    pub fn commit_message(&self, request: &PublishRequest) -> String {
        let context = TemplateContext::new()
            .with("brand_name", request.brand_name.as_str())
            .with("brand_slug", request.brand_slug.as_str())
            .with("niche", request.niche.as_str());
        render(DEFAULT_COMMIT_TEMPLATE, &context)
    }

    /// init (if needed) -> point origin at the remote -> add -> commit -> force-push
    pub async fn publish(&self, request: &PublishRequest) -> Result<PublishOutcome, PublishError> {
        let dir = request.project_dir.as_path();
        if !dir.is_dir() {
            return Err(PublishError::MissingProject {
                path: request.project_dir.clone(),
            });
        }

        tracing::info!("📤 Publishing {} to {} ({})", dir.display(), self.remote_url, self.branch);

        if !dir.join(".git").exists() {
            self.run_git(dir, &["init"]).await?;
        }

        if self.run_git(dir, &["remote", "get-url", "origin"]).await.is_ok() {
            self.run_git(dir, &["remote", "set-url", "origin", &self.remote_url]).await?;
        } else {
            self.run_git(dir, &["remote", "add", "origin", &self.remote_url]).await?;
        }

        self.run_git(dir, &["add", "-A"]).await?;

        let message = self.commit_message(request);
        self.run_git(
            dir,
            &["-c", "commit.gpgsign=false", "commit", "--allow-empty", "-m", &message],
        )
        .await?;

        let refspec = format!("HEAD:refs/heads/{}", self.branch);
        self.run_git(dir, &["push", "--force", "origin", &refspec]).await?;

        tracing::info!("✅ Pushed {} to {}", request.brand_slug, self.remote_url);
        Ok(PublishOutcome {
            target: "git".to_string(),
            url: self.remote_url.clone(),
        })
    }

    /// Run one git command in `dir`, returning trimmed stdout
    async fn run_git(&self, dir: &Path, args: &[&str]) -> Result<String, PublishError> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!("🔧 {}", command);

        let mut git = Command::new("git");
        git.args(args).current_dir(dir);
        if let Some(identity) = &self.identity {
            git.env("GIT_AUTHOR_NAME", &identity.name)
                .env("GIT_AUTHOR_EMAIL", &identity.email)
                .env("GIT_COMMITTER_NAME", &identity.name)
                .env("GIT_COMMITTER_EMAIL", &identity.email);
        }

        let output = git.output().await.map_err(|source| PublishError::GitSpawn {
            command: command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(PublishError::GitCommand {
                command,
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn request() -> PublishRequest {
        PublishRequest {
            project_dir: PathBuf::from("/nonexistent/site-builder/project"),
            brand_name: "Adventure Gear Pro".to_string(),
            brand_slug: "adventure-gear-pro".to_string(),
            niche: "outdoor-adventure".to_string(),
        }
    }

    #[test]
    fn commit_message_uses_brand_and_niche() {
        let publisher = GitPublisher::new("git@example.com:sites.git", "main");
        assert_eq!(
            publisher.commit_message(&request()),
            "Deploy Adventure Gear Pro - outdoor-adventure affiliate site with live data"
        );
    }

    #[tokio::test]
    async fn missing_project_directory_is_rejected_before_running_git() {
        let publisher = GitPublisher::new("git@example.com:sites.git", "main");
        let err = publisher.publish(&request()).await.unwrap_err();
        assert!(matches!(err, PublishError::MissingProject { .. }));
    }
}
