use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Plain-text resume files under `path`, sorted by path.
pub fn walk_text_files(path: &Path, recursive: bool) -> Vec<PathBuf> {
    let max_depth = if recursive { None } else { Some(1) };
    let mut files: Vec<PathBuf> = WalkBuilder::new(path)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .max_depth(max_depth)
        .build()
        .filter_map(Result::ok)
        .map(|entry| entry.into_path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
        })
        .collect();
    files.sort();
    files
}
