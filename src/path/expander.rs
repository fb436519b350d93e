use std::env;
use std::path::PathBuf;

/// Tilde handling for `cd`.
///
/// `~` alone is the home directory. `~suffix` is the home directory with
/// `suffix` appended verbatim, so `~/src` and `~src` give `$HOME/src` and
/// `$HOMEsrc` respectively.
#[derive(Clone, Debug, Default)]
pub struct PathExpander;

impl PathExpander {
    pub fn new() -> Self {
        Self
    }

    pub fn expand(&self, path: &str) -> Option<PathBuf> {
        match path.strip_prefix('~') {
            Some(suffix) => {
                let mut home = self.get_home_dir()?.into_os_string();
                home.push(suffix);
                Some(PathBuf::from(home))
            }
            None => Some(PathBuf::from(path)),
        }
    }

    pub fn is_home_path(&self, path: &str) -> bool {
        path.starts_with('~')
    }

    /// `$HOME`, or the platform's idea of it when the variable is unset.
    pub fn get_home_dir(&self) -> Option<PathBuf> {
        env::var_os("HOME")
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
    }
}
