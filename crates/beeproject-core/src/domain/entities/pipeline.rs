//! Ordered action pipeline.
//!
//! A generation run is a sequence of named [`Action`]s applied once, in order,
//! to the `(ProjectTree, Options)` pair. Extensions do not edit the sequence
//! directly: they *register* actions with a [`Placement`] relative to another
//! action, and the final order is resolved when the pipeline is built.

use std::fmt;

use crate::domain::{
    entities::{options::Options, project_tree::ProjectTree},
    error::{DomainError, DomainResult},
};

/// Signature shared by every pipeline action.
pub type ActionFn = fn(ProjectTree, Options) -> DomainResult<(ProjectTree, Options)>;

/// A named transformation of the project tree.
#[derive(Clone, Copy)]
pub struct Action {
    name: &'static str,
    run: ActionFn,
}

impl Action {
    pub const fn new(name: &'static str, run: ActionFn) -> Self {
        Self { name, run }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
        (self.run)(tree, options)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Action").field(&self.name).finish()
    }
}

/// Where a registered action goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Start,
    End,
    Before(&'static str),
    After(&'static str),
}

impl Placement {
    fn anchor(&self) -> Option<&'static str> {
        match *self {
            Self::Before(a) | Self::After(a) => Some(a),
            Self::Start | Self::End => None,
        }
    }
}

/// Collects base actions and extension registrations.
#[derive(Debug, Clone, Default)]
pub struct PipelineBuilder {
    base: Vec<Action>,
    pending: Vec<(Action, Placement)>,
}

impl PipelineBuilder {
    /// Start from a fixed sequence of base actions.
    pub fn new(base: impl IntoIterator<Item = Action>) -> Self {
        Self {
            base: base.into_iter().collect(),
            pending: Vec::new(),
        }
    }

    /// Register `action` at `placement`.
    ///
    /// The anchor does not need to exist yet; it only has to exist once
    /// [`build`](Self::build) is called.
    pub fn register(mut self, action: Action, placement: Placement) -> Self {
        self.pending.push((action, placement));
        self
    }

    /// Resolve all placements into a concrete order.
    ///
    /// Registrations are placed in registration order. A registration whose
    /// anchor is itself still pending is retried once the anchor is placed.
    /// Placing an action right after an anchor puts it *before* anything that
    /// was placed after that anchor earlier.
    ///
    /// # Errors
    ///
    /// - [`DomainError::DuplicateAction`] if two actions share a name
    /// - [`DomainError::UnknownAnchor`] if an anchor never appears
    pub fn build(self) -> DomainResult<Pipeline> {
        let mut actions: Vec<Action> = Vec::with_capacity(self.base.len() + self.pending.len());
        for action in self.base {
            push_unique(&mut actions, action, None)?;
        }

        let mut pending = self.pending;
        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = Vec::new();

            for (action, placement) in pending {
                let index = match placement {
                    Placement::Start => Some(0),
                    Placement::End => Some(actions.len()),
                    Placement::Before(anchor) => position(&actions, anchor),
                    Placement::After(anchor) => position(&actions, anchor).map(|i| i + 1),
                };
                match index {
                    Some(index) => push_unique(&mut actions, action, Some(index))?,
                    None => deferred.push((action, placement)),
                }
            }

            if deferred.len() == before {
                let (action, placement) = deferred[0];
                return Err(DomainError::UnknownAnchor {
                    action: action.name().to_owned(),
                    anchor: placement.anchor().unwrap_or_default().to_owned(),
                });
            }
            pending = deferred;
        }

        Ok(Pipeline { actions })
    }
}

fn position(actions: &[Action], name: &str) -> Option<usize> {
    actions.iter().position(|a| a.name() == name)
}

fn push_unique(actions: &mut Vec<Action>, action: Action, at: Option<usize>) -> DomainResult<()> {
    if position(actions, action.name()).is_some() {
        return Err(DomainError::DuplicateAction {
            name: action.name().to_owned(),
        });
    }
    match at {
        Some(index) => actions.insert(index, action),
        None => actions.push(action),
    }
    Ok(())
}

/// A resolved, ready-to-run sequence of actions.
#[derive(Debug, Clone)]
pub struct Pipeline {
    actions: Vec<Action>,
}

impl Pipeline {
    /// Apply every action once, in order.
    ///
    /// The first failing action aborts the run; its error is returned as-is.
    pub fn run(&self, tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
        self.actions
            .iter()
            .try_fold((tree, options), |(tree, options), action| {
                action.apply(tree, options)
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(Action::name).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::project_tree::MergeMode;

    fn noop(tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
        Ok((tree, options))
    }

    fn add_marker(mut tree: ProjectTree, options: Options) -> DomainResult<(ProjectTree, Options)> {
        let project = options.require("project")?.to_owned();
        tree.ensure(&[project.as_str(), "marker"], "1", MergeMode::NoOverwrite)?;
        Ok((tree, options))
    }

    fn overwrite_marker(
        mut tree: ProjectTree,
        options: Options,
    ) -> DomainResult<(ProjectTree, Options)> {
        let project = options.require("project")?.to_owned();
        tree.ensure(&[project.as_str(), "marker"], "2", MergeMode::Overwrite)?;
        Ok((tree, options))
    }

    fn base() -> PipelineBuilder {
        PipelineBuilder::new([
            Action::new("first", noop),
            Action::new("define", noop),
            Action::new("last", noop),
        ])
    }

    #[test]
    fn after_places_immediately_after_anchor() {
        let pipeline = base()
            .register(Action::new("ext", noop), Placement::After("define"))
            .build()
            .unwrap();

        assert_eq!(pipeline.names(), vec!["first", "define", "ext", "last"]);
    }

    #[test]
    fn later_registration_after_same_anchor_runs_first() {
        let pipeline = base()
            .register(Action::new("a", noop), Placement::After("define"))
            .register(Action::new("b", noop), Placement::After("define"))
            .build()
            .unwrap();

        assert_eq!(pipeline.names(), vec!["first", "define", "b", "a", "last"]);
    }

    #[test]
    fn chained_registrations_keep_dependency_order() {
        let pipeline = base()
            .register(Action::new("build", noop), Placement::After("define"))
            .register(Action::new("replace", noop), Placement::After("build"))
            .build()
            .unwrap();

        assert_eq!(
            pipeline.names(),
            vec!["first", "define", "build", "replace", "last"]
        );
    }

    #[test]
    fn anchor_registered_later_is_resolved() {
        let pipeline = base()
            .register(Action::new("replace", noop), Placement::After("build"))
            .register(Action::new("build", noop), Placement::After("define"))
            .build()
            .unwrap();

        assert_eq!(
            pipeline.names(),
            vec!["first", "define", "build", "replace", "last"]
        );
    }

    #[test]
    fn start_end_and_before() {
        let pipeline = base()
            .register(Action::new("s", noop), Placement::Start)
            .register(Action::new("e", noop), Placement::End)
            .register(Action::new("b", noop), Placement::Before("define"))
            .build()
            .unwrap();

        assert_eq!(
            pipeline.names(),
            vec!["s", "first", "b", "define", "last", "e"]
        );
    }

    #[test]
    fn unknown_anchor_is_an_error() {
        let err = base()
            .register(Action::new("orphan", noop), Placement::After("missing"))
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownAnchor {
                action: "orphan".into(),
                anchor: "missing".into(),
            }
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = base()
            .register(Action::new("define", noop), Placement::End)
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateAction {
                name: "define".into()
            }
        );
    }

    #[test]
    fn run_threads_tree_through_actions_in_order() {
        let pipeline = PipelineBuilder::new([
            Action::new("add", add_marker),
            Action::new("overwrite", overwrite_marker),
        ])
        .build()
        .unwrap();

        let options = Options::new().with("project", "foo");
        let (tree, _) = pipeline.run(ProjectTree::new(), options).unwrap();

        assert_eq!(tree.file(&["foo", "marker"]), Some("2"));
    }

    #[test]
    fn run_stops_at_first_failure() {
        let pipeline = PipelineBuilder::new([
            Action::new("noop", noop),
            Action::new("add", add_marker),
        ])
        .build()
        .unwrap();

        let result = pipeline.run(ProjectTree::new(), Options::new());
        assert_eq!(
            result,
            Err(DomainError::MissingOption {
                key: "project".into()
            })
        );
    }
}
