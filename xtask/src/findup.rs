use std::path::{Path, PathBuf};

pub fn find_upwards(start: &Path, filename: &str) -> Option<PathBuf> {
    let mut dir = if start.is_dir() {
        start.to_path_buf()
    } else {
        start.parent().unwrap_or(start).to_path_buf()
    };

    loop {
        let candidate = dir.join(filename);
        if candidate.is_file() {
            return Some(candidate);
        }

        if !dir.pop() {
            break;
        }
    }

    None
}

/// Nearest `filename` from the current directory upwards, then from the
/// workspace this binary was built in.
pub fn find_plan(filename: &str) -> anyhow::Result<Option<PathBuf>> {
    let start = std::env::current_dir()?;
    Ok(find_upwards(&start, filename)
        .or_else(|| find_upwards(Path::new(env!("CARGO_MANIFEST_DIR")), filename)))
}
