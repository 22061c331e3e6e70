//! Pre-save hooks.
//!
//! Hooks run in registration order against the in-memory profile right
//! before it is serialized. A failing hook is rolled back on its own; the
//! others still run.

use raidledger_domain::Profile;

#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct SaveHookError(String);

impl SaveHookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

type HookFn = Box<dyn Fn(&mut Profile) -> Result<(), SaveHookError> + Send + Sync>;

/// A named, fallible transform applied before every save.
pub struct SaveHook {
    id: String,
    apply: HookFn,
}

impl SaveHook {
    pub fn new(
        id: impl Into<String>,
        apply: impl Fn(&mut Profile) -> Result<(), SaveHookError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            apply: Box::new(apply),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn apply(&self, profile: &mut Profile) -> Result<(), SaveHookError> {
        (self.apply)(profile)
    }
}

impl std::fmt::Debug for SaveHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveHook").field("id", &self.id).finish()
    }
}

/// Runs every hook against `profile`. A hook that fails has its changes
/// undone. Returns the ids of the hooks that failed.
pub fn run_save_hooks(hooks: &[SaveHook], profile: &mut Profile) -> Vec<String> {
    let mut failed = Vec::new();
    for hook in hooks {
        let snapshot = profile.clone();
        if let Err(e) = hook.apply(profile) {
            tracing::error!(
                session_id = %profile.session_id(),
                hook = hook.id(),
                error = %e,
                "Pre-save hook failed, rolling back its changes"
            );
            *profile = snapshot;
            failed.push(hook.id.clone());
        }
    }
    failed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::profiles;

    #[test]
    fn failing_hook_is_rolled_back_and_others_still_run() {
        let hooks = vec![
            SaveHook::new("rename", |p: &mut Profile| {
                p.info.username = "renamed".into();
                Ok(())
            }),
            SaveHook::new("broken", |p: &mut Profile| {
                p.info.username = "half-written".into();
                p.characters.pmc.info.level = 99;
                Err(SaveHookError::new("boom"))
            }),
            SaveHook::new("level", |p: &mut Profile| {
                p.characters.pmc.info.level += 1;
                Ok(())
            }),
        ];
        let mut profile = profiles::basic("s1");
        let level = profile.characters.pmc.info.level;

        let failed = run_save_hooks(&hooks, &mut profile);

        assert_eq!(failed, vec!["broken".to_string()]);
        assert_eq!(profile.info.username, "renamed");
        assert_eq!(profile.characters.pmc.info.level, level + 1);
    }

    #[test]
    fn no_hooks_leaves_profile_untouched() {
        let mut profile = profiles::basic("s1");
        let before = profile.clone();
        assert!(run_save_hooks(&[], &mut profile).is_empty());
        assert_eq!(profile, before);
    }
}
