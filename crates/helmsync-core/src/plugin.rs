//! Helm plugin probe

use crate::helm::Helm;

impl Helm {
    /// Whether a helm plugin is installed, e.g. `gcs` or `diff`
    ///
    /// Matches by substring of `helm plugin list`, so a name contained in
    /// another plugin's name also counts as present.
    pub async fn plugin_exists(&self, plugin: &str) -> bool {
        let cmd = self.command(
            ["plugin", "list"],
            format!("Validating that [ {} ] is installed", plugin),
        );
        let result = self.execute(&cmd).await;
        result.success() && result.stdout.contains(plugin)
    }
}
