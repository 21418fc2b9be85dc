use crate::ast::AstNode;
use crate::functions;
use crate::EvalError;
use std::collections::HashMap;

/// Tree walker. Holds no state of its own; every operation it can dispatch
/// to lives in the closed registry in [`crate::functions`].
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    /// Evaluates an `AstNode` against a set of variable bindings.
    ///
    /// # Arguments
    ///
    /// * `ast` - The parsed expression tree.
    /// * `bindings` - A reference to a `HashMap` that contains variable values
    ///   for the expression.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if the evaluation succeeds.
    /// * `Err(EvalError)` if an identifier cannot be resolved, a call is
    ///   invalid, or a value falls outside an operation's domain.
    pub fn evaluate(
        &self,
        ast: &AstNode,
        bindings: &HashMap<String, f64>,
    ) -> Result<f64, EvalError> {
        match ast {
            AstNode::Number(n) => Ok(*n),

            // Bindings take priority over registry constants.
            AstNode::Identifier(name) => bindings
                .get(name)
                .copied()
                .or_else(|| functions::constant(name))
                .ok_or_else(|| EvalError::UndefinedSymbol { name: name.clone() }),

            AstNode::UnaryOperation { operator, operand } => {
                let value = self.evaluate(operand, bindings)?;
                Ok(operator.apply(value))
            }

            AstNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left, bindings)?;
                let right_value = self.evaluate(right, bindings)?;
                operator.apply(left_value, right_value)
            }

            AstNode::FunctionCall { name, args } => {
                let function = functions::lookup(name)
                    .ok_or_else(|| EvalError::UndefinedSymbol { name: name.clone() })?;

                if args.len() != function.arity {
                    return Err(EvalError::MalformedExpression {
                        reason: format!(
                            "function '{}' expects {} argument(s), got {}",
                            function.name,
                            function.arity,
                            args.len()
                        ),
                    });
                }

                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.evaluate(arg, bindings)?);
                }
                (function.apply)(&values)
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}
