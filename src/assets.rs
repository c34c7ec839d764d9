/// Frame asset loading.
///
/// Frames live in plain text files, one frame per file. Patterns take `*`
/// wildcards in the file-name part only (`assets/rocket/rocket_frame_*.txt`);
/// matches are loaded in lexicographic path order.

use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::entities::Frame;
use crate::error::{GameError, Result};

/// Load every frame matching `pattern`.
///
/// Fails with `EmptyAsset` when nothing matches or a matched file has no
/// visible content, and with `UnsupportedPattern` when a directory part
/// carries a `*`.
pub fn load_frames(pattern: &str) -> Result<Vec<Frame>> {
    let empty = || GameError::EmptyAsset {
        pattern: pattern.to_string(),
    };

    let path = Path::new(pattern);
    let name_pattern = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(empty)?;
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.to_string_lossy().contains('*') {
        return Err(GameError::UnsupportedPattern {
            pattern: pattern.to_string(),
        });
    }

    if !dir.is_dir() {
        return Err(empty());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(&dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .map(|n| wildcard_match(name_pattern, n))
                .unwrap_or(false)
        })
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(empty());
    }

    let mut frames = Vec::with_capacity(files.len());
    for file in &files {
        let text = fs::read_to_string(file)?;
        if text.trim().is_empty() {
            return Err(empty());
        }
        let name = file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();
        frames.push(Frame::new(name, &text));
    }
    log::debug!("loaded {} frame(s) for {}", frames.len(), pattern);
    Ok(frames)
}

/// `*` matches any run of characters, everything else matches itself.
fn wildcard_match(pattern: &str, name: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == name;
    }

    let (first, last) = (parts[0], parts[parts.len() - 1]);
    if !name.starts_with(first) || name.len() < first.len() + last.len() {
        return false;
    }
    let mut rest = &name[first.len()..];
    for middle in &parts[1..parts.len() - 1] {
        match rest.find(middle) {
            Some(at) => rest = &rest[at + middle.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

// ── Frame bundle ──────────────────────────────────────────────────────────────

/// Every frame the game needs, loaded once at start-up and shared read-only.
#[derive(Clone, Debug)]
pub struct FrameSet {
    pub rocket: Vec<Rc<Frame>>,
    pub garbage: Vec<Rc<Frame>>,
    pub explosion: Vec<Rc<Frame>>,
    pub game_over: Rc<Frame>,
}

impl FrameSet {
    pub fn load(dir: &Path) -> Result<Self> {
        let load = |relative: &str| -> Result<Vec<Rc<Frame>>> {
            let pattern = dir.join(relative);
            let frames = load_frames(&pattern.to_string_lossy())?;
            Ok(frames.into_iter().map(Rc::new).collect())
        };

        let rocket = load("rocket/rocket_frame_*.txt")?;
        let garbage = load("garbage/*.txt")?;
        let explosion = load("explosion/explosion_*.txt")?;
        let game_over = load("gameover/gameover.txt")?
            .into_iter()
            .next()
            .ok_or_else(|| GameError::EmptyAsset {
                pattern: "gameover/gameover.txt".into(),
            })?;

        Ok(FrameSet {
            rocket,
            garbage,
            explosion,
            game_over,
        })
    }
}
