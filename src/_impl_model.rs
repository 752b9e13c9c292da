use crate::_evaluator::{Evaluator, Images};
use crate::classifier::LineClasses;
use crate::orderers::{LineOrderer, Shuffle};
use crate::rules::RuleTable;
use crate::trajectory::detect_cycles;
use crate::{tokenize_text, BooleanNetError, Mode, Model, State, Value};
use fxhash::FxHashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Methods for loading models.
impl Model {
    /// Load a model from its source text using the given mode tag and an entropy seeded
    /// random generator.
    ///
    /// The mode must be one of `plde`, `sync`, `async`, `rank` or `time`.
    pub fn new(mode: &str, text: &str) -> Result<Model, BooleanNetError> {
        let mode: Mode = mode.parse()?;
        Self::with_rules(mode, text, Self::default_rules(mode), StdRng::from_entropy())
    }

    /// Same as `Model::new`, but with a reproducible random generator.
    pub fn with_seed(mode: &str, text: &str, seed: u64) -> Result<Model, BooleanNetError> {
        let mode: Mode = mode.parse()?;
        Self::with_rules(
            mode,
            text,
            Self::default_rules(mode),
            StdRng::seed_from_u64(seed),
        )
    }

    /// Load a model with a custom `RuleTable` and random generator.
    ///
    /// The source is lexed and classified immediately. Node names which differ only
    /// in capitalization are rejected before any line is evaluated.
    pub fn with_rules(
        mode: Mode,
        text: &str,
        rules: RuleTable,
        rng: StdRng,
    ) -> Result<Model, BooleanNetError> {
        let classes = LineClasses::new(tokenize_text(text)?)?;
        let schedule = classes.rank_groups(mode.collapses_ranks());
        debug!(
            mode = %mode,
            nodes = classes.all_nodes().len(),
            initializers = classes.init_lines().len(),
            ranks = schedule.len(),
            "Model loaded."
        );
        Ok(Model {
            mode,
            rules,
            rng,
            classes,
            schedule,
            images: None,
            states: Vec::new(),
        })
    }

    /// The rule table used by `Model::new` for the given mode.
    pub fn default_rules(mode: Mode) -> RuleTable {
        if mode.is_continuous() {
            RuleTable::continuous()
        } else {
            RuleTable::standard()
        }
    }
}

/// Methods for running the simulation.
impl Model {
    /// Evaluate all initializer lines in source order and reset the trajectory to the
    /// resulting initial state.
    ///
    /// Fails with `UninitializedNodes` if some update line references a node that is
    /// never initialized. Use `Model::initialize_with` to provide default values instead.
    pub fn initialize(&mut self) -> Result<(), BooleanNetError> {
        self.initialize_internal(None)
    }

    /// Same as `Model::initialize`, but values of uninitialized nodes are obtained from
    /// `missing`, which is called once for every such node.
    pub fn initialize_with<F>(&mut self, mut missing: F) -> Result<(), BooleanNetError>
    where
        F: FnMut(&str) -> Value,
    {
        let missing: &mut dyn FnMut(&str) -> Value = &mut missing;
        self.initialize_internal(Some(missing))
    }

    fn initialize_internal(
        &mut self,
        missing: Option<&mut dyn FnMut(&str) -> Value>,
    ) -> Result<(), BooleanNetError> {
        self.images = None;
        self.states.clear();

        let mut images = Images::new(self.mode);
        let mut evaluator = Evaluator::new(self.mode, &self.rules, &mut images, &mut self.rng);
        for line in self.classes.init_lines() {
            evaluator.evaluate(line)?;
        }

        let uninitialized = self.classes.uninitialized_nodes();
        if !uninitialized.is_empty() {
            let missing = match missing {
                Some(missing) => missing,
                None => return Err(BooleanNetError::UninitializedNodes(uninitialized)),
            };
            for node in &uninitialized {
                let value = missing(node.as_str());
                if let Some(old) = images.old_mut() {
                    self.rules.set_value(old, node, value);
                }
                self.rules.set_value(images.new_mut(), node, value);
            }
            debug!(nodes = ?uninitialized, "Resolved uninitialized nodes.");
        }

        self.states.push(images.new_image().clone());
        self.images = Some(images);
        Ok(())
    }

    /// Perform `steps` simulation rounds, appending one state per round.
    ///
    /// Each round calls the start-iteration hook of the rule table and then evaluates
    /// the update lines rank by rank in ascending order. The lines of every rank are
    /// passed through `orderer` first. Positions returned by the orderer which are out
    /// of range are skipped.
    pub fn iterate<O>(&mut self, steps: usize, orderer: &mut O) -> Result<(), BooleanNetError>
    where
        O: LineOrderer + ?Sized,
    {
        let images = self
            .images
            .as_mut()
            .ok_or(BooleanNetError::NotInitialized)?;
        for index in 0..steps {
            self.rules.start_iteration(index, images.new_mut());
            images.advance();
            for (rank, lines) in &self.schedule {
                let order = orderer.order(lines, &mut self.rng);
                trace!(round = index, rank = *rank, lines = order.len(), "Evaluating rank.");
                let mut evaluator = Evaluator::new(self.mode, &self.rules, images, &mut self.rng);
                for line in order.into_iter().filter_map(|it| lines.get(it)) {
                    evaluator.evaluate(line)?;
                }
            }
            let state = images.new_image().clone();
            if cfg!(feature = "print-progress") {
                println!(" >> Round {}/{}: {}", index + 1, steps, state);
            }
            self.states.push(state);
        }
        Ok(())
    }

    /// Same as `Model::iterate` using the default `Shuffle` orderer.
    pub fn iterate_shuffled(&mut self, steps: usize) -> Result<(), BooleanNetError> {
        self.iterate(steps, &mut Shuffle)
    }
}

/// Inspection of the model and its trajectory.
impl Model {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn classes(&self) -> &LineClasses {
        &self.classes
    }

    /// Every node name that appears in the model source.
    pub fn nodes(&self) -> &BTreeSet<String> {
        self.classes.all_nodes()
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// The trajectory: the initial state followed by one state per completed round.
    ///
    /// Empty until the model is initialized.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    /// Detect a cycle in the trajectory, see `trajectory::detect_cycles`.
    pub fn detect_cycles(&self) -> (usize, usize) {
        detect_cycles(&self.states)
    }

    /// Label every state of the trajectory with a small integer. Equal states get
    /// equal labels, assigned in the order of first appearance.
    pub fn fingerprints(&self) -> Vec<usize> {
        let mut seen: FxHashMap<u64, Vec<(usize, &State)>> = FxHashMap::default();
        let mut next = 0;
        let mut result = Vec::with_capacity(self.states.len());
        for state in &self.states {
            let bucket = seen.entry(state.fingerprint()).or_default();
            let known = bucket
                .iter()
                .find(|(_, it)| *it == state)
                .map(|(label, _)| *label);
            let label = match known {
                Some(label) => label,
                None => {
                    bucket.push((next, state));
                    next += 1;
                    next - 1
                }
            };
            result.push(label);
        }
        result
    }
}
