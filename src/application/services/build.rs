//! Build, clean and run service
//!
//! Turns validated descriptors into command plans and executes them one step
//! at a time through the injected [`CommandRunner`]. The first non-zero exit
//! stops the plan; its code is reported unchanged and never retried.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Action, CommandDescriptor, CommandPlan, Toolchain, VariantCatalog};
use crate::infrastructure::traits::CommandRunner;

/// Plans and executes build tool invocations.
pub struct BuildService {
    cmd: Arc<dyn CommandRunner>,
    toolchain: Toolchain,
    catalog: VariantCatalog,
}

impl BuildService {
    /// Create a new build service.
    pub fn new(cmd: Arc<dyn CommandRunner>, toolchain: Toolchain, catalog: VariantCatalog) -> Self {
        Self {
            cmd,
            toolchain,
            catalog,
        }
    }

    pub fn catalog(&self) -> &VariantCatalog {
        &self.catalog
    }

    /// Validate an action and optional variant into a descriptor.
    pub fn descriptor(&self, action: Action, variant: Option<&str>) -> ApplicationResult<CommandDescriptor> {
        Ok(CommandDescriptor::new(action, variant, &self.catalog)?)
    }

    pub fn plan(&self, descriptor: &CommandDescriptor) -> CommandPlan {
        let plan = CommandPlan::for_descriptor(descriptor, &self.toolchain);
        debug!("plan for {:?}: {}", descriptor, plan);
        plan
    }

    /// Execute each step in order, stopping at the first failure.
    ///
    /// # Errors
    /// - `CommandUnavailable` if a program cannot be spawned; later steps are skipped
    /// - `CommandFailed` carrying the exact exit code of the failing step
    #[instrument(skip_all, fields(plan = %plan))]
    pub fn execute(&self, plan: &CommandPlan) -> ApplicationResult<()> {
        for step in plan.steps() {
            debug!("execute: {}", step);
            let code = self
                .cmd
                .run(step)
                .map_err(|source| ApplicationError::CommandUnavailable {
                    program: step.program().to_string(),
                    source,
                })?;

            if code != 0 {
                debug!("execute: '{}' exited with {}", step, code);
                return Err(ApplicationError::CommandFailed {
                    command: step.to_string(),
                    code,
                });
            }
        }

        info!("completed: {}", plan);
        Ok(())
    }
}
