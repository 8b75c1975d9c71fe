/// Row cap for a list command.
///
/// `--limit` on the subcommand beats the global `--limit`, which beats
/// `[general] default_limit`. A zero from either flag counts as unset, so
/// `--limit 0` falls back instead of listing nothing.
#[must_use]
pub fn effective_limit(local: Option<u32>, global: Option<u32>, config_default: u32) -> u32 {
    let given = |limit: Option<u32>| limit.filter(|n| *n > 0);
    given(local).or(given(global)).unwrap_or(config_default)
}
