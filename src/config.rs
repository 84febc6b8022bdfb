// src/config.rs

use crate::game::search::SearchConfig;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const PROFILES_DIR: &str = "profiles";

fn profile_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name))
}

pub fn save_profile(dir: &Path, name: &str, config: &SearchConfig) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    let json = serde_json::to_string_pretty(config)?;
    fs::File::create(profile_path(dir, name))?.write_all(json.as_bytes())
}

pub fn load_profile(dir: &Path, name: &str) -> io::Result<SearchConfig> {
    let json = fs::read_to_string(profile_path(dir, name))?;
    serde_json::from_str(&json).map_err(io::Error::from)
}

pub fn get_profiles(dir: &Path) -> io::Result<Vec<String>> {
    let mut profiles = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            if let Some(stem) = path.file_stem() {
                if let Some(name) = stem.to_str() {
                    profiles.push(name.to_string());
                }
            }
        }
    }
    profiles.sort();
    Ok(profiles)
}
