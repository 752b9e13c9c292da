//! Partitioning of a tokenized model into initializer and update lines.
//!
//! The classification is computed once when a model is loaded. Besides splitting the
//! lines, it collects the node names used by the model and checks that no two of them
//! differ only in capitalization.

use crate::{BooleanNetError, TokenLine};
use fxhash::{FxHashMap, FxHashSet};
use std::collections::{BTreeMap, BTreeSet};

/// Rank assigned to update lines without an explicit rank marker.
pub const DEFAULT_RANK: u32 = 1;

/// Lines of a model split by their role.
#[derive(Clone, Debug)]
pub struct LineClasses {
    init_lines: Vec<TokenLine>,
    update_lines: BTreeMap<u32, Vec<TokenLine>>,
    update_sequence: Vec<TokenLine>,
    init_nodes: BTreeSet<String>,
    update_nodes: BTreeSet<String>,
    all_nodes: BTreeSet<String>,
}

impl LineClasses {
    /// Classify the given lines.
    ///
    /// Fails with `NameCollision` if two node names are equal up to case, and with
    /// `Parse` if some line is neither an initializer nor an update, if it has
    /// a rank marker without an update rule after it, or if the rank does not fit
    /// into `u32`.
    pub fn new(lines: Vec<TokenLine>) -> Result<LineClasses, BooleanNetError> {
        let all_nodes: BTreeSet<String> = lines
            .iter()
            .flat_map(|line| line.referenced_nodes())
            .map(|it| it.to_string())
            .collect();
        check_case(all_nodes.iter().map(|it| it.as_str()))?;

        let mut init_lines = Vec::new();
        let mut update_lines: BTreeMap<u32, Vec<TokenLine>> = BTreeMap::new();
        let mut update_sequence = Vec::new();
        let mut init_nodes = BTreeSet::new();
        let mut update_nodes = BTreeSet::new();
        for line in lines {
            if line.has_rank_marker() && line.rank().is_none() {
                return Err(BooleanNetError::Parse {
                    line: line.source().to_string(),
                    token: line.tokens()[0].to_string(),
                });
            }
            if line.is_update() {
                let body = line.body();
                update_nodes.extend(body.referenced_nodes().map(|it| it.to_string()));
                let rank = line.rank().unwrap_or(DEFAULT_RANK);
                update_lines.entry(rank).or_default().push(body.clone());
                update_sequence.push(body);
            } else if line.is_initializer() {
                init_nodes.extend(line.targets().into_iter().map(|it| it.to_string()));
                init_lines.push(line);
            } else {
                return Err(invalid_line(&line));
            }
        }

        Ok(LineClasses {
            init_lines,
            update_lines,
            update_sequence,
            init_nodes,
            update_nodes,
            all_nodes,
        })
    }

    /// Initializer lines in source order.
    pub fn init_lines(&self) -> &[TokenLine] {
        &self.init_lines
    }

    /// All ranks that have at least one update line, in ascending order.
    pub fn update_ranks(&self) -> Vec<u32> {
        self.update_lines.keys().copied().collect()
    }

    /// Update lines of the given rank (without their rank markers), in source order.
    pub fn lines_for_rank(&self, rank: u32) -> &[TokenLine] {
        self.update_lines
            .get(&rank)
            .map(|it| it.as_slice())
            .unwrap_or(&[])
    }

    /// Update lines grouped by rank in ascending order.
    ///
    /// If `collapse` is set, all lines form a single group of rank `DEFAULT_RANK` in
    /// source order. Rank markers are ignored completely.
    pub fn rank_groups(&self, collapse: bool) -> Vec<(u32, Vec<TokenLine>)> {
        if collapse {
            if self.update_sequence.is_empty() {
                Vec::new()
            } else {
                vec![(DEFAULT_RANK, self.update_sequence.clone())]
            }
        } else {
            self.update_lines
                .iter()
                .map(|(rank, lines)| (*rank, lines.clone()))
                .collect()
        }
    }

    /// Nodes assigned by some initializer line.
    pub fn init_nodes(&self) -> &BTreeSet<String> {
        &self.init_nodes
    }

    /// Nodes referenced by some update line (targets and operands).
    pub fn update_nodes(&self) -> &BTreeSet<String> {
        &self.update_nodes
    }

    /// Nodes referenced by update lines but never initialized.
    pub fn uninitialized_nodes(&self) -> Vec<String> {
        self.update_nodes
            .difference(&self.init_nodes)
            .cloned()
            .collect()
    }

    /// Every node name that appears in the model.
    pub fn all_nodes(&self) -> &BTreeSet<String> {
        &self.all_nodes
    }
}

/// Check that the given names are unique up to capitalization.
///
/// The error lists every name that collides with another one, sorted.
pub fn check_case<'a, I>(names: I) -> Result<(), BooleanNetError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut by_key: FxHashMap<String, FxHashSet<&'a str>> = FxHashMap::default();
    for name in names {
        by_key.entry(name.to_uppercase()).or_default().insert(name);
    }
    let mut collisions: Vec<String> = by_key
        .into_values()
        .filter(|it| it.len() > 1)
        .flatten()
        .map(|it| it.to_string())
        .collect();
    if collisions.is_empty() {
        Ok(())
    } else {
        collisions.sort();
        Err(BooleanNetError::NameCollision(collisions))
    }
}

/// **(internal)** A line that has no meaning as a statement.
fn invalid_line(line: &TokenLine) -> BooleanNetError {
    let token = line
        .body()
        .tokens()
        .get(1)
        .map(|it| it.to_string())
        .unwrap_or_else(|| "end of line".to_string());
    BooleanNetError::Parse {
        line: line.source().to_string(),
        token,
    }
}
