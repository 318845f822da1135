use crate::error::Result;
use crate::model::Theme;
use crate::store::DataStore;

/// Stored theme, or `default` when none has been chosen yet.
pub fn current<S: DataStore>(store: &S, default: Theme) -> Result<Theme> {
    Ok(store.load_theme()?.unwrap_or(default))
}

pub fn set<S: DataStore>(store: &mut S, theme: Theme) -> Result<Theme> {
    store.save_theme(theme)?;
    tracing::debug!(%theme, "theme saved");
    Ok(theme)
}

pub fn toggle<S: DataStore>(store: &mut S, default: Theme) -> Result<Theme> {
    let next = current(store, default)?.toggled();
    set(store, next)
}
