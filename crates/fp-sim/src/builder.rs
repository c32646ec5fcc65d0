//! Fluent builder for constructing a [`Planner`].

use fp_core::PlannerConfig;
use fp_spatial::{DijkstraRouter, Router};

use crate::policy::{AssignmentPolicy, policy_for};
use crate::{PlanResult, Planner};

/// Fluent builder for [`Planner<R>`].
///
/// | Method         | Default                                   |
/// |----------------|-------------------------------------------|
/// | `.router(r)`   | [`DijkstraRouter`]                        |
/// | `.policy(p)`   | the policy named by `config.assignment`   |
///
/// # Example
///
/// ```rust,ignore
/// let planner = PlannerBuilder::new(PlannerConfig::default())
///     .policy(NearestFieldPolicy)
///     .build()?;
/// let result = planner.plan(&request);
/// ```
pub struct PlannerBuilder<R: Router = DijkstraRouter> {
    config: PlannerConfig,
    router: R,
    policy: Option<Box<dyn AssignmentPolicy>>,
}

impl PlannerBuilder<DijkstraRouter> {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config, router: DijkstraRouter, policy: None }
    }
}

impl<R: Router> PlannerBuilder<R> {
    /// Replace the routing engine.
    pub fn router<R2: Router>(self, router: R2) -> PlannerBuilder<R2> {
        PlannerBuilder { config: self.config, router, policy: self.policy }
    }

    /// Override the assignment policy chosen by `config.assignment`.
    pub fn policy<P: AssignmentPolicy + 'static>(mut self, policy: P) -> Self {
        self.policy = Some(Box::new(policy));
        self
    }

    /// Validate the configuration and return a ready planner.
    pub fn build(self) -> PlanResult<Planner<R>> {
        self.config.validate()?;
        let policy = self.policy.unwrap_or_else(|| policy_for(self.config.assignment));
        Ok(Planner { config: self.config, router: self.router, policy })
    }
}
