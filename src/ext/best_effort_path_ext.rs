use std::path::{Component, Path, PathBuf};

/// Renders a path for log lines and error messages.
///
/// Generated files are frequently reported before they exist, so a failed
/// canonicalization falls back to a lexically normalized absolute path.
pub fn best_effort_path_display(path: &Path) -> String {
    if let Ok(canonical_path) = path.canonicalize() {
        return canonical_path.display().to_string();
    }

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|current_dir| current_dir.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    normalize_path(&absolute_path).display().to_string()
}

fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(components.last(), Some(Component::Normal(_))) {
                    components.pop();
                }
            }
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> BestEffortPathExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
