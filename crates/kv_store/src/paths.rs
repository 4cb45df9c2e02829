use std::path::PathBuf;

pub const STATE_DIR: &str = "termfolio";
pub const STATE_FILE_NAME: &str = "state.json";

/// Resolves the default state file from `XDG_STATE_HOME`, falling back to
/// `$HOME/.local/state`.
#[must_use]
pub fn default_state_path() -> Option<PathBuf> {
    let xdg = std::env::var("XDG_STATE_HOME").ok();
    let home = std::env::var("HOME").ok();
    state_path_from(xdg.as_deref(), home.as_deref())
}

#[must_use]
pub fn state_path_from(xdg_state_home: Option<&str>, home: Option<&str>) -> Option<PathBuf> {
    let non_empty = |value: &&str| !value.trim().is_empty();

    if let Some(xdg) = xdg_state_home.filter(non_empty) {
        return Some(PathBuf::from(xdg).join(STATE_DIR).join(STATE_FILE_NAME));
    }

    home.filter(non_empty).map(|home| {
        PathBuf::from(home)
            .join(".local")
            .join("state")
            .join(STATE_DIR)
            .join(STATE_FILE_NAME)
    })
}
