//! Domain entities: actions, build variants and validated command descriptors

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::error::{DomainError, DomainResult};

/// What the helper was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Build,
    Clean,
    Run,
}

impl Action {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Action::Build => "build",
            Action::Clean => "clean",
            Action::Run => "run",
        }
    }

    /// Whether the action accepts a build variant selector.
    pub const fn takes_variant(&self) -> bool {
        matches!(self, Action::Run)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named build configuration selecting which binary `run` launches (e.g. a rendering backend).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variant(String);

impl Variant {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Closed set of known build variants plus the designated default.
///
/// An empty catalog is valid: `run` then launches the bare binary name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCatalog {
    variants: Vec<Variant>,
    default: Option<Variant>,
}

impl VariantCatalog {
    /// Build a catalog from variant names and an optional default.
    ///
    /// # Errors
    /// - a name is empty or listed twice
    /// - the set is non-empty but no default is given
    /// - the default is not a member of the set
    pub fn new<S: AsRef<str>>(names: &[S], default: Option<&str>) -> DomainResult<Self> {
        let mut seen = HashSet::new();
        let mut variants = Vec::with_capacity(names.len());
        for name in names {
            let name: &str = name.as_ref();
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::InvalidCatalog {
                    message: "variant names must not be empty".into(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(DomainError::InvalidCatalog {
                    message: format!("variant '{name}' is listed more than once"),
                });
            }
            variants.push(Variant(name.to_string()));
        }

        let default = match default {
            Some(name) => {
                let found = variants.iter().find(|v| v.as_str() == name).cloned();
                match found {
                    Some(variant) => Some(variant),
                    None => {
                        return Err(DomainError::InvalidCatalog {
                            message: format!(
                                "default variant '{name}' is not one of: {}",
                                join_or_none(&variants)
                            ),
                        })
                    }
                }
            }
            None if variants.is_empty() => None,
            None => {
                return Err(DomainError::InvalidCatalog {
                    message: "a default variant is required when variants are defined".into(),
                })
            }
        };

        Ok(Self { variants, default })
    }

    pub fn names(&self) -> Vec<&str> {
        self.variants.iter().map(Variant::as_str).collect()
    }

    pub fn default_variant(&self) -> Option<&Variant> {
        self.default.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Resolve a requested variant name, falling back to the default when none is given.
    pub fn resolve(&self, requested: Option<&str>) -> DomainResult<Option<Variant>> {
        match requested {
            None => Ok(self.default.clone()),
            Some(name) => self
                .variants
                .iter()
                .find(|v| v.as_str() == name)
                .cloned()
                .map(Some)
                .ok_or_else(|| DomainError::UnknownVariant {
                    given: name.to_string(),
                    allowed: join_or_none(&self.variants),
                }),
        }
    }
}

fn join_or_none(variants: &[Variant]) -> String {
    if variants.is_empty() {
        "none".to_string()
    } else {
        variants
            .iter()
            .map(Variant::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Validated, structured representation of one CLI invocation.
///
/// Only constructible through [`CommandDescriptor::new`], so every descriptor
/// in hand is fully valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    action: Action,
    variant: Option<Variant>,
}

impl CommandDescriptor {
    pub fn new(action: Action, variant: Option<&str>, catalog: &VariantCatalog) -> DomainResult<Self> {
        if !action.takes_variant() {
            return match variant {
                Some(_) => Err(DomainError::VariantNotApplicable { action }),
                None => Ok(Self {
                    action,
                    variant: None,
                }),
            };
        }

        Ok(Self {
            action,
            variant: catalog.resolve(variant)?,
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn variant(&self) -> Option<&Variant> {
        self.variant.as_ref()
    }
}

/// Names the command mapping is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    build_tool: String,
    build_dir: PathBuf,
    remove_program: String,
    remove_flags: Vec<String>,
    binary_name: String,
}

impl Toolchain {
    pub fn new(
        build_tool: impl Into<String>,
        build_dir: impl Into<PathBuf>,
        remove_command: Vec<String>,
        binary_name: impl Into<String>,
    ) -> DomainResult<Self> {
        let build_tool = build_tool.into();
        let build_dir = build_dir.into();
        let binary_name = binary_name.into();

        if build_tool.trim().is_empty() {
            return Err(invalid_toolchain("build_tool must not be empty"));
        }
        if build_dir.as_os_str().is_empty() {
            return Err(invalid_toolchain("build_dir must not be empty"));
        }
        let mut remove_command = remove_command.into_iter();
        let remove_program = match remove_command.next() {
            Some(program) if !program.trim().is_empty() => program,
            _ => return Err(invalid_toolchain("remove_command must name a program")),
        };
        if binary_name.trim().is_empty() {
            return Err(invalid_toolchain("binary_name must not be empty"));
        }

        Ok(Self {
            build_tool,
            build_dir,
            remove_program,
            remove_flags: remove_command.collect(),
            binary_name,
        })
    }

    pub fn build_tool(&self) -> &str {
        &self.build_tool
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn remove_program(&self) -> &str {
        &self.remove_program
    }

    pub fn remove_flags(&self) -> &[String] {
        &self.remove_flags
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            build_tool: "cmake".into(),
            build_dir: PathBuf::from("build"),
            remove_program: "rm".into(),
            remove_flags: vec!["-rf".into()],
            binary_name: "GraphicalApp".into(),
        }
    }
}

fn invalid_toolchain(message: &str) -> DomainError {
    DomainError::InvalidToolchain {
        message: message.to_string(),
    }
}

/// Expand shell variables and tilde in path-like strings.
///
/// Handles `~`, `$VAR`, and `${VAR}`; returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> VariantCatalog {
        VariantCatalog::new(&["opengl", "vulkan"], Some("opengl")).unwrap()
    }

    fn no_variants() -> VariantCatalog {
        VariantCatalog::new::<&str>(&[], None).unwrap()
    }

    #[test]
    fn given_actions_when_displaying_then_match_command_names() {
        assert_eq!(Action::Build.to_string(), "build");
        assert_eq!(Action::Clean.to_string(), "clean");
        assert_eq!(Action::Run.to_string(), "run");
        assert!(Action::Run.takes_variant());
        assert!(!Action::Clean.takes_variant());
    }

    #[test]
    fn given_no_variant_when_resolving_run_then_uses_default() {
        let descriptor = CommandDescriptor::new(Action::Run, None, &catalog()).unwrap();
        assert_eq!(descriptor.variant().map(Variant::as_str), Some("opengl"));
    }

    #[test]
    fn given_known_variant_when_resolving_run_then_selects_it() {
        let descriptor = CommandDescriptor::new(Action::Run, Some("vulkan"), &catalog()).unwrap();
        assert_eq!(descriptor.variant().map(Variant::as_str), Some("vulkan"));
    }

    #[test]
    fn given_unknown_variant_when_resolving_run_then_lists_allowed() {
        let err = CommandDescriptor::new(Action::Run, Some("metal"), &catalog()).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownVariant {
                given: "metal".into(),
                allowed: "opengl, vulkan".into(),
            }
        );
    }

    #[test]
    fn given_variant_on_build_when_constructing_then_not_applicable() {
        let err = CommandDescriptor::new(Action::Build, Some("opengl"), &catalog()).unwrap_err();
        assert_eq!(err, DomainError::VariantNotApplicable { action: Action::Build });
    }

    #[test]
    fn given_empty_catalog_when_resolving_run_then_no_variant() {
        let descriptor = CommandDescriptor::new(Action::Run, None, &no_variants()).unwrap();
        assert!(descriptor.variant().is_none());

        let err = CommandDescriptor::new(Action::Run, Some("opengl"), &no_variants()).unwrap_err();
        assert!(err.to_string().contains("valid variants: none"));
    }

    #[test]
    fn given_default_outside_set_when_building_catalog_then_fails() {
        let err = VariantCatalog::new(&["opengl"], Some("vulkan")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidCatalog { .. }));
    }

    #[test]
    fn given_duplicate_names_when_building_catalog_then_fails() {
        let err = VariantCatalog::new(&["opengl", "opengl"], Some("opengl")).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn given_variants_without_default_when_building_catalog_then_fails() {
        assert!(VariantCatalog::new(&["opengl"], None).is_err());
    }

    #[test]
    fn given_empty_remove_command_when_building_toolchain_then_fails() {
        let err = Toolchain::new("cmake", "build", vec![], "GraphicalApp").unwrap_err();
        assert!(matches!(err, DomainError::InvalidToolchain { .. }));
    }
}
