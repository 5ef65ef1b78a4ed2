//! Pure mapping from a validated descriptor to the external commands it runs
//!
//! A plan is a list of argument vectors, never a shell string. The rendered
//! form (`cmake -B build && cmake --build build`) exists only for display.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

use crate::domain::{Action, CommandDescriptor, Toolchain};

/// One external program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Ordered invocations with `&&` semantics: each runs only if the previous exited 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlan {
    steps: Vec<Invocation>,
}

impl CommandPlan {
    /// Map a descriptor onto the toolchain. Total and deterministic.
    pub fn for_descriptor(descriptor: &CommandDescriptor, toolchain: &Toolchain) -> Self {
        let build_dir = path_arg(toolchain.build_dir());

        let steps = match descriptor.action() {
            Action::Build => vec![
                Invocation::new(toolchain.build_tool()).args(["-B", build_dir.as_str()]),
                compile(toolchain, &build_dir),
            ],
            Action::Clean => vec![Invocation::new(toolchain.remove_program())
                .args(toolchain.remove_flags().iter().cloned())
                .arg(build_dir.as_str())],
            Action::Run => {
                let binary = match descriptor.variant() {
                    Some(variant) => format!("{}-{}", toolchain.binary_name(), variant),
                    None => toolchain.binary_name().to_string(),
                };
                let binary_path = Path::new(".").join(toolchain.build_dir()).join(binary);
                vec![
                    compile(toolchain, &build_dir),
                    Invocation::new(path_arg(&binary_path)),
                ]
            }
        };

        Self { steps }
    }

    pub fn steps(&self) -> &[Invocation] {
        &self.steps
    }
}

impl fmt::Display for CommandPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                f.write_str(" && ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

fn compile(toolchain: &Toolchain, build_dir: &str) -> Invocation {
    Invocation::new(toolchain.build_tool()).args(["--build", build_dir])
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

/// Single-quote a word for display if a POSIX shell would split or expand it.
fn quote(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}
