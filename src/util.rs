//! Small helpers for preparing models: default value resolvers and source rewriting.

use crate::{tokenize_text, BooleanNetError, Value};
use fxhash::FxHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A resolver for uninitialized nodes which always returns the same value.
pub fn always(value: Value) -> impl FnMut(&str) -> Value {
    move |_| value
}

/// A resolver for uninitialized nodes which flips a (seeded) coin for every node.
pub fn random_bool(seed: u64) -> impl FnMut(&str) -> Value {
    let mut rng = StdRng::seed_from_u64(seed);
    move |_| Value::Bool(rng.gen())
}

/// Rewrite a model source such that the nodes in `turn_on` are always active and the
/// nodes in `turn_off` are always inactive.
///
/// The initializer lines are kept and followed by `N = True`/`N = False` for every
/// forced node (later initializers override earlier ones). Update lines of forced
/// nodes are commented out. The result is written in the canonical token layout,
/// so original comments and spacing are not preserved.
pub fn modify_states(
    text: &str,
    turn_on: &[&str],
    turn_off: &[&str],
) -> Result<String, BooleanNetError> {
    let on: FxHashSet<&str> = turn_on.iter().copied().collect();
    let off: FxHashSet<&str> = turn_off.iter().copied().collect();
    let mut common: Vec<String> = on.intersection(&off).map(|it| it.to_string()).collect();
    if !common.is_empty() {
        common.sort();
        return Err(BooleanNetError::ConflictingModification(common));
    }

    let mut init_lines = Vec::new();
    let mut body_lines = Vec::new();
    for line in tokenize_text(text)? {
        if line.is_update() {
            let forced = line
                .targets()
                .iter()
                .any(|it| on.contains(it) || off.contains(it));
            if forced {
                body_lines.push(format!("#{}", line.to_line()));
            } else {
                body_lines.push(line.to_line());
            }
        } else {
            init_lines.push(line.to_line());
        }
    }

    for node in turn_off {
        init_lines.push(format!("{} = False", node));
    }
    for node in turn_on {
        init_lines.push(format!("{} = True", node));
    }

    init_lines.extend(body_lines);
    Ok(init_lines.join("\n"))
}
