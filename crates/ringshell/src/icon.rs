use derive_more::{AsRef, Deref, Display, From, Into};
use freedesktop_icons::lookup;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Icon theme name (`utilities-terminal`) or path to an image file.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct IconName(String);

crate::impl_string_newtype!(IconName);

static RESOLVED: OnceLock<RwLock<HashMap<IconName, Option<PathBuf>>>> = OnceLock::new();

fn resolved() -> &'static RwLock<HashMap<IconName, Option<PathBuf>>> {
    RESOLVED.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Forgets earlier lookups so newly installed icons are found on the next reload.
pub fn refresh_cache() {
    resolved().write().clear();
}

pub fn find_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if let Some(hit) = resolved().read().get(icon_name) {
        return hit.clone();
    }

    let found = lookup_icon_path(icon_name);
    resolved().write().insert(icon_name.clone(), found.clone());
    found
}

fn lookup_icon_path(icon_name: &IconName) -> Option<PathBuf> {
    if icon_name.is_empty() {
        return None;
    }

    let path = Path::new(icon_name.as_str());
    if path.is_absolute() {
        return path.exists().then(|| path.to_path_buf());
    }

    lookup(icon_name.as_str())
        .with_size(512)
        .with_scale(1)
        .find()
}
