/// Project directory layout and file writing
///
/// Writes are synchronous and not transactional. Regeneration overwrites
/// previous content, so a partially written project is repaired by rerunning.

use crate::site::catalog::PROJECT_DIRECTORIES;
use crate::site::types::{GeneratedFile, GenerationError};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem- and URL-safe identifier derived from a brand name
///
/// Lower-cases, maps spaces and underscores to hyphens and drops everything
/// that is not an ASCII letter, digit or hyphen.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Create {output_dir}/{slug} and its fixed subdirectories
pub fn create_project_skeleton(output_dir: &Path, slug: &str) -> Result<PathBuf, GenerationError> {
    let project_dir = output_dir.join(slug);
    for dir in PROJECT_DIRECTORIES {
        let path = project_dir.join(dir);
        fs::create_dir_all(&path).map_err(|source| GenerationError::Filesystem { path, source })?;
    }
    tracing::debug!("📁 Created project skeleton at {}", project_dir.display());
    Ok(project_dir)
}

/// Write every file under `project_dir`, returning the written paths in order
pub fn write_site(project_dir: &Path, files: &[GeneratedFile]) -> Result<Vec<PathBuf>, GenerationError> {
    let mut written = Vec::with_capacity(files.len());

    for file in files {
        let path = project_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| GenerationError::Filesystem {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&path, &file.content).map_err(|source| GenerationError::Filesystem {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("📝 Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn slugify_normalizes_brand_names() {
        assert_eq!(slugify("Adventure Gear Pro"), "adventure-gear-pro");
        assert_eq!(slugify("Trail_Kit 2.0!"), "trail-kit-20");
        assert_eq!(slugify("Café Outdoors"), "caf-outdoors");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn skeleton_contains_fixed_directories() {
        let temp = TempDir::new().expect("temp dir");
        let project = create_project_skeleton(temp.path(), "trail-kit").expect("skeleton");
        assert_eq!(project, temp.path().join("trail-kit"));
        for dir in PROJECT_DIRECTORIES {
            assert!(project.join(dir).is_dir(), "{dir}");
        }
    }

    #[test]
    fn write_site_overwrites_existing_files() {
        let temp = TempDir::new().expect("temp dir");
        let file = |content: &str| GeneratedFile {
            path: PathBuf::from("pages/index.js"),
            content: content.to_string(),
        };

        write_site(temp.path(), &[file("first")]).expect("first write");
        let written = write_site(temp.path(), &[file("second")]).expect("second write");

        assert_eq!(written, vec![temp.path().join("pages/index.js")]);
        assert_eq!(fs::read_to_string(&written[0]).expect("read back"), "second");
    }

    #[test]
    fn write_failures_name_the_path() {
        let temp = TempDir::new().expect("temp dir");
        // A regular file where a directory is needed
        fs::write(temp.path().join("pages"), "not a directory").expect("blocker");
        let err = write_site(
            temp.path(),
            &[GeneratedFile {
                path: PathBuf::from("pages/index.js"),
                content: String::new(),
            }],
        )
        .unwrap_err();
        assert!(matches!(err, GenerationError::Filesystem { .. }));
        assert!(err.to_string().contains("pages"));
    }
}
