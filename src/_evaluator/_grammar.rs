use super::{Cursor, Evaluator};
use crate::TokenKind::{And, Assign, Comma, Equal, Id, LParen, Not, Number, Or, RParen, State};
use crate::{BooleanNetError, Token, TokenKind, Triple, Value};
use rand::Rng;

/// Operator precedence, from the loosest: `or` < `and` < `not`. Binary operators
/// are left associative, `not` is right associative.
impl Evaluator<'_> {
    /// `stmt := ID '=' stmt | ID '*' '=' stmt | expression`
    pub(super) fn stmt(&mut self, c: &mut Cursor) -> Result<Value, BooleanNetError> {
        let first = c.peek().map(|it| it.kind());
        let second = c.peek_at(1).map(|it| it.kind());
        let third = c.peek_at(2).map(|it| it.kind());
        match (first, second, third) {
            (Some(Id), Some(Equal), _) => {
                let name = c.advance().map(|it| it.value()).unwrap_or_default();
                c.advance();
                let value = self.stmt(c)?;
                // Initializers write both images.
                if let Some(old) = self.images.old_mut() {
                    self.rules.set_value(old, name, value);
                }
                Ok(self.rules.set_value(self.images.new_mut(), name, value))
            }
            (Some(Id), Some(Assign), Some(Equal)) => {
                let name = c.advance().map(|it| it.value()).unwrap_or_default();
                c.advance();
                c.advance();
                let value = self.stmt(c)?;
                Ok(self.rules.set_value(self.images.new_mut(), name, value))
            }
            _ => self.or_expression(c),
        }
    }

    /// `or_expression := and_expression ('or' and_expression)*`
    fn or_expression(&mut self, c: &mut Cursor) -> Result<Value, BooleanNetError> {
        let mut value = self.and_expression(c)?;
        while accept(c, Or) {
            let right = self.and_expression(c)?;
            value = self.rules.or(value, right);
        }
        Ok(value)
    }

    /// `and_expression := not_expression ('and' not_expression)*`
    fn and_expression(&mut self, c: &mut Cursor) -> Result<Value, BooleanNetError> {
        let mut value = self.not_expression(c)?;
        while accept(c, And) {
            let right = self.not_expression(c)?;
            value = self.rules.and(value, right);
        }
        Ok(value)
    }

    /// `not_expression := 'not' not_expression | terminal`
    fn not_expression(&mut self, c: &mut Cursor) -> Result<Value, BooleanNetError> {
        if accept(c, Not) {
            let value = self.not_expression(c)?;
            Ok(self.rules.not(value))
        } else {
            self.terminal(c)
        }
    }

    /// `terminal := ID | STATE | '(' NUMBER ',' NUMBER ',' NUMBER ')' | '(' expression ')'`
    fn terminal(&mut self, c: &mut Cursor) -> Result<Value, BooleanNetError> {
        let token = match c.peek() {
            Some(token) => token,
            None => return Err(c.error()),
        };
        match token.kind() {
            Id => {
                c.advance();
                // The only difference between synchronous and other updates.
                let image = if self.mode.is_sync() {
                    self.images.old()
                } else {
                    self.images.new_image()
                };
                self.rules
                    .get_value(image, token.value())
                    .ok_or_else(|| BooleanNetError::UnknownNode {
                        line: c.line.source().to_string(),
                        name: token.value().to_string(),
                    })
            }
            State => {
                c.advance();
                let value = match token.value() {
                    "Random" => self.rng.gen::<bool>(),
                    other => other == "True",
                };
                if self.mode.is_continuous() {
                    Ok(Value::Triple(value.into()))
                } else {
                    Ok(Value::Bool(value))
                }
            }
            LParen => {
                let is_triple = c.peek_at(1).map_or(false, |it| it.is(Number))
                    && c.peek_at(2).map_or(false, |it| it.is(Comma));
                c.advance();
                if is_triple {
                    let concentration = number(c)?;
                    expect(c, Comma)?;
                    let decay = number(c)?;
                    expect(c, Comma)?;
                    let threshold = number(c)?;
                    expect(c, RParen)?;
                    let triple = Triple::new(concentration, decay, threshold);
                    if self.mode.is_continuous() {
                        Ok(Value::Triple(triple))
                    } else {
                        Ok(Value::Bool(triple.as_bool()))
                    }
                } else {
                    let value = self.or_expression(c)?;
                    expect(c, RParen)?;
                    Ok(value)
                }
            }
            _ => Err(c.error()),
        }
    }
}

/// **(internal)** Consume the next token if it has the given type.
fn accept(c: &mut Cursor, kind: TokenKind) -> bool {
    if c.peek().map_or(false, |it| it.is(kind)) {
        c.advance();
        true
    } else {
        false
    }
}

/// **(internal)** Consume the next token, failing unless it has the given type.
fn expect<'a>(c: &mut Cursor<'a>, kind: TokenKind) -> Result<&'a Token, BooleanNetError> {
    match c.peek() {
        Some(token) if token.is(kind) => {
            c.advance();
            Ok(token)
        }
        _ => Err(c.error()),
    }
}

/// **(internal)** Consume a numeric literal.
fn number(c: &mut Cursor) -> Result<f64, BooleanNetError> {
    let error = c.error();
    expect(c, Number)?.value().parse::<f64>().map_err(|_| error)
}

#[cfg(test)]
mod tests {
    use crate::_evaluator::{Evaluator, Images};
    use crate::rules::RuleTable;
    use crate::{tokenize_line, BooleanNetError, Mode, Triple, Value};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Evaluate the given lines in order and return the images.
    fn run(mode: Mode, lines: &[&str]) -> Result<Images, BooleanNetError> {
        let rules = if mode.is_continuous() {
            RuleTable::continuous()
        } else {
            RuleTable::standard()
        };
        let mut images = Images::new(mode);
        let mut rng = StdRng::seed_from_u64(0);
        for line in lines {
            let line = tokenize_line(line, 1)?;
            Evaluator::new(mode, &rules, &mut images, &mut rng).evaluate(&line)?;
        }
        Ok(images)
    }

    fn eval(lines: &[&str], expression: &str) -> bool {
        let assignment = format!("Result = {}", expression);
        let mut all = lines.to_vec();
        all.push(assignment.as_str());
        run(Mode::Async, &all)
            .unwrap()
            .new_image()
            .get_bool("Result")
            .unwrap()
    }

    #[test]
    fn chained_initializer() {
        let images = run(Mode::Sync, &["A = B = True"]).unwrap();
        assert_eq!(Some(true), images.old().get_bool("A"));
        assert_eq!(Some(true), images.old().get_bool("B"));
        assert_eq!(Some(true), images.new_image().get_bool("A"));
        assert_eq!(Some(true), images.new_image().get_bool("B"));
    }

    #[test]
    fn update_writes_new_image_only() {
        let images = run(Mode::Sync, &["A = True", "B = False", "A* = B", "B* = A"]).unwrap();
        // Both updates read the old image.
        assert_eq!(Some(true), images.old().get_bool("A"));
        assert_eq!(Some(false), images.new_image().get_bool("A"));
        assert_eq!(Some(true), images.new_image().get_bool("B"));

        let images = run(Mode::Async, &["A = True", "B = False", "A* = B", "B* = A"]).unwrap();
        assert_eq!(Some(false), images.new_image().get_bool("A"));
        assert_eq!(Some(false), images.new_image().get_bool("B"));
    }

    #[test]
    fn operator_precedence() {
        let init = ["T = True", "F = False"];
        // `and` binds tighter than `or`.
        assert!(eval(&init, "T or T and F"));
        assert!(!eval(&init, "(T or T) and F"));
        // `not` binds tighter than `and`.
        assert!(!eval(&init, "not T and F"));
        assert!(eval(&init, "not (T and F)"));
        assert!(eval(&init, "not not T"));
        assert!(eval(&init, "F or F or T"));
        assert!(!eval(&init, "T and T and F"));
        assert!(eval(&init, "((T))"));
    }

    #[test]
    fn literal_triples() {
        assert!(eval(&[], "(0.6, 1.0, 0.5)"));
        assert!(!eval(&[], "(0.4, 1.0, 0.5)"));
        assert!(eval(&[], "(0.3, 2, 0.5) and True"));

        let images = run(Mode::Plde, &["A = (0.6, 1.0, 0.5)", "B = True"]).unwrap();
        assert_eq!(
            Some(Value::Triple(Triple::new(0.6, 1.0, 0.5))),
            images.new_image().get("A")
        );
        assert_eq!(
            Some(Value::Triple(Triple::new(1.0, 1.0, 0.5))),
            images.new_image().get("B")
        );
    }

    #[test]
    fn random_literal() {
        let lines: Vec<String> = (0..64).map(|i| format!("N{} = Random", i)).collect();
        let lines: Vec<&str> = lines.iter().map(|it| it.as_str()).collect();
        let images = run(Mode::Rank, &lines).unwrap();
        let values: Vec<bool> = images
            .new_image()
            .iter()
            .map(|(_, value)| value.as_bool())
            .collect();
        assert_eq!(64, values.len());
        assert!(values.contains(&true));
        assert!(values.contains(&false));

        // The same seed gives the same values.
        let again = run(Mode::Rank, &lines).unwrap();
        assert_eq!(images.new_image(), again.new_image());
    }

    #[test]
    fn syntax_errors() {
        let invalid = [
            "A = ",
            "A* = B and",
            "A* = (B",
            "A* = B)",
            "A* = B C",
            "A = (0.5, 1.0)",
            "A = (0.5, 1.0, B)",
            "B * True",
            "= True",
            "A = not",
            "A = 1",
        ];
        for line in invalid {
            let result = run(Mode::Async, &["B = True", line]);
            assert!(
                matches!(result, Err(BooleanNetError::Parse { .. })),
                "Expected syntax error in `{}`, got {:?}",
                line,
                result.err()
            );
        }
    }

    #[test]
    fn unknown_node() {
        let err = run(Mode::Async, &["A = B"]).unwrap_err();
        assert_eq!(
            BooleanNetError::UnknownNode {
                line: "A = B".to_string(),
                name: "B".to_string()
            },
            err
        );
    }
}
