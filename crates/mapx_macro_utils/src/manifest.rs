use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

/// Locate an accessible [`syn::Path`] for a `mapx_*` crate as seen from the
/// caller's Cargo.toml.
///
/// Generated code must name the reflection crate through a path that
/// resolves inside the crate invoking the macro.
///
/// # Example
///
/// ```rust
/// # use mapx_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("mapx_reflect"));
/// ```
///
/// Reading the manifest is not free, call this once per macro invocation.
///
/// # Resolution rules
///
/// 1. If the requested crate is listed in `dependencies`, return `::crate_name`.
/// 2. If the requested crate name begins with `mapx_` and the caller depends
///    on the facade crate `mapx`, return `::mapx::short_name`
///    (e.g. `mapx_reflect` -> `::mapx::reflect`).
/// 3. Repeat step 1-2 in `dev-dependencies`.
/// 4. If the caller *is* the facade crate, return `::mapx::short_name`.
/// 5. Otherwise, fall back to the absolute path `::crate_name`.
///
/// A crate referring to itself should declare `extern crate self as name;`
/// so that `::name` also works inside its own doc tests.
#[derive(Debug)]
pub struct Manifest {
    pub manifest: Document<Box<str>>,
    pub modified_time: SystemTime,
}

const FACADE_NAME: &str = "mapx";
const CRATE_PREFIX: &str = "mapx_";

impl Manifest {
    #[inline(never)]
    fn get_manifest_path() -> PathBuf {
        env::var_os("CARGO_MANIFEST_DIR")
            .map(|path| {
                let mut path = PathBuf::from(path);
                path.push("Cargo.toml");
                assert!(
                    path.exists(),
                    "Cargo manifest does not exist at path {}",
                    path.display(),
                );
                path
            })
            .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.")
    }

    #[inline(never)]
    fn get_manifest_modified_time(
        cargo_manifest_path: &Path,
    ) -> Result<SystemTime, std::io::Error> {
        std::fs::metadata(cargo_manifest_path).and_then(|metadata| metadata.modified())
    }

    #[inline(never)]
    fn read_manifest(path: &Path) -> Document<Box<str>> {
        let manifest = std::fs::read_to_string(path)
            .unwrap_or_else(|_| panic!("Unable to read cargo manifest: {}", path.display()))
            .into_boxed_str();
        Document::parse(manifest)
            .unwrap_or_else(|_| panic!("Failed to parse cargo manifest: {}", path.display()))
    }

    fn facade_path(module: &str) -> syn::Path {
        let mut path = Self::parse_str::<syn::Path>(&format!("::{FACADE_NAME}"));
        path.segments.push(Self::parse_str(module));
        path
    }

    #[inline]
    fn parse_str<T: syn::parse::Parse>(path: &str) -> T {
        syn::parse_str(path).unwrap()
    }

    fn find_in_deps(deps: &Table, name: &str) -> Option<syn::Path> {
        if deps.contains_key(name) {
            return Some(Self::parse_str(&format!("::{name}")));
        }
        match name.strip_prefix(CRATE_PREFIX) {
            Some(module) if deps.contains_key(FACADE_NAME) => Some(Self::facade_path(module)),
            _ => None,
        }
    }

    fn package_name(&self) -> Option<&str> {
        self.manifest.get("package")?.get("name")?.as_str()
    }

    /// Return a [`syn::Path`] for the package named `name` as resolved from this
    /// crate's Cargo.toml. See the type-level documentation for the resolution order.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        for table in ["dependencies", "dev-dependencies"] {
            if let Some(Item::Table(deps)) = self.manifest.get(table)
                && let Some(val) = Self::find_in_deps(deps, name)
            {
                return val;
            }
        }

        if self.package_name() == Some(FACADE_NAME)
            && let Some(module) = name.strip_prefix(CRATE_PREFIX)
        {
            return Self::facade_path(module);
        }

        Self::parse_str(&format!("::{name}"))
    }

    /// Obtain the [`Manifest`] of the caller's Cargo.toml.
    ///
    /// Parsed manifests are cached per path and re-read when the file's
    /// modification time changes.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let manifest_path = Self::get_manifest_path();
        let modified_time = Self::get_manifest_modified_time(&manifest_path)
            .expect("The Cargo.toml should have a modified time.");

        let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);

        if let Some(manifest) = manifests.get(&manifest_path)
            && manifest.modified_time == modified_time
        {
            return func(manifest);
        }

        drop(manifests);

        let manifest = Manifest {
            manifest: Self::read_manifest(&manifest_path),
            modified_time,
        };

        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(manifest_path, manifest);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::Manifest;
    use std::time::SystemTime;
    use toml_edit::Document;

    fn manifest(text: &str) -> Manifest {
        Manifest {
            manifest: Document::parse(Box::<str>::from(text)).unwrap(),
            modified_time: SystemTime::UNIX_EPOCH,
        }
    }

    fn path_string(path: syn::Path) -> String {
        path.segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("::")
    }

    #[test]
    fn direct_dependency() {
        let m = manifest("[package]\nname = \"app\"\n[dependencies]\nmapx_reflect = \"0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("mapx_reflect")), "mapx_reflect");
    }

    #[test]
    fn facade_dependency() {
        let m = manifest("[package]\nname = \"app\"\n[dev-dependencies]\nmapx = \"0.1\"\n");
        assert_eq!(path_string(m.get_crate_path("mapx_reflect")), "mapx::reflect");
    }

    #[test]
    fn facade_itself() {
        let m = manifest("[package]\nname = \"mapx\"\n");
        assert_eq!(path_string(m.get_crate_path("mapx_codec")), "mapx::codec");
    }

    #[test]
    fn fallback() {
        let m = manifest("[package]\nname = \"app\"\n");
        assert_eq!(path_string(m.get_crate_path("mapx_reflect")), "mapx_reflect");
    }
}
