use crate::ast::{AstNode, BinaryOperator, UnaryOperator};
use crate::validate;
use crate::EvalError;
use log::debug;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

/// Deepest tree the parser will hand to the evaluator. Long operator chains
/// grow the tree one level per operator, so this also caps chain length.
pub const MAX_TREE_DEPTH: usize = 512;

#[derive(Parser)]
#[grammar = "./expression.pest"] // Link to the grammar file
pub struct FormulaParser;

impl FormulaParser {
    pub fn parse_expression(input: &str) -> Result<AstNode, EvalError> {
        debug!("Parsing expression: {}", input);
        // The grammar descends one call frame per nesting level, so the
        // nesting and length caps must hold before pest runs.
        validate::check_parentheses(input)?;
        validate::check_length(input)?;
        let parse_result = FormulaParser::parse(Rule::expression, input)
            .map_err(|e| EvalError::MalformedExpression {
                reason: e.to_string(),
            })?
            .next()
            .ok_or_else(|| EvalError::MalformedExpression {
                reason: "empty parse result".to_string(),
            })?;

        debug!("Parse result: {:#?}", parse_result);
        let node = Self::build_expression(parse_result)?;

        if node.depth() > MAX_TREE_DEPTH {
            return Err(EvalError::MalformedExpression {
                reason: format!("expression tree deeper than {} levels", MAX_TREE_DEPTH),
            });
        }
        Ok(node)
    }

    fn build_expression(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        // The first inner pair is the additive chain; the trailing EOI is ignored.
        let mut pairs = pair.into_inner();
        let additive = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
            reason: "expected an expression".to_string(),
        })?;
        Self::build_additive(additive)
    }

    fn build_additive(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        debug!("Building additive expression: {:?}", pair);
        let mut pairs = pair.into_inner();
        let first = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
            reason: "expected an operand".to_string(),
        })?;
        let mut node = Self::build_multiplicative(first)?;

        while let Some(operator_pair) = pairs.next() {
            let operator: BinaryOperator = operator_pair.as_str().try_into()?;

            let right_pair = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
                reason: format!("operator '{}' is missing its right operand", operator.symbol()),
            })?;
            let right = Self::build_multiplicative(right_pair)?;
            node = AstNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_multiplicative(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        debug!("Building multiplicative expression: {:?}", pair);
        let mut pairs = pair.into_inner();
        let first = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
            reason: "expected an operand".to_string(),
        })?;
        let mut node = Self::build_power(first)?;

        while let Some(operator_pair) = pairs.next() {
            let operator: BinaryOperator = operator_pair.as_str().try_into()?;

            let right_pair = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
                reason: format!("operator '{}' is missing its right operand", operator.symbol()),
            })?;
            let right = Self::build_power(right_pair)?;
            node = AstNode::BinaryOperation {
                left: Box::new(node),
                operator,
                right: Box::new(right),
            };
        }

        Ok(node)
    }

    fn build_power(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        debug!("Building power expression: {:?}", pair);
        let mut operands = Vec::new();
        for inner in pair.into_inner() {
            match inner.as_rule() {
                Rule::POW => {}
                _ => operands.push(Self::build_unary(inner)?),
            }
        }

        // '**' chains associate to the right.
        let mut node = operands.pop().ok_or_else(|| EvalError::MalformedExpression {
            reason: "expected an operand".to_string(),
        })?;
        while let Some(left) = operands.pop() {
            node = AstNode::BinaryOperation {
                left: Box::new(left),
                operator: BinaryOperator::Power,
                right: Box::new(node),
            };
        }

        Ok(node)
    }

    fn build_unary(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut pairs = pair.into_inner();
        debug!("Building unary expression: {:?}", pairs);

        // A unary plus is accepted but contributes no node.
        let mut negations = 0usize;
        while let Some(sign_pair) = pairs.peek() {
            match sign_pair.as_rule() {
                Rule::MINUS => {
                    negations += 1;
                    pairs.next();
                }
                Rule::PLUS => {
                    pairs.next();
                }
                _ => break,
            }
        }

        let primary = pairs.next().ok_or_else(|| EvalError::MalformedExpression {
            reason: "expected a primary expression".to_string(),
        })?;
        let mut node = Self::build_primary(primary)?;
        for _ in 0..negations {
            node = AstNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: Box::new(node),
            };
        }

        Ok(node)
    }

    fn build_primary(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        debug!("Building primary expression: {:?}", pair);
        match pair.as_rule() {
            Rule::number => {
                let literal = pair.as_str();
                let value: f64 =
                    literal
                        .parse()
                        .map_err(|_| EvalError::MalformedExpression {
                            reason: format!("invalid numeric literal: {}", literal),
                        })?;
                // Literals wide enough to saturate to infinity parse "successfully"
                // and would otherwise leak a non-finite value into the tree.
                if !value.is_finite() {
                    return Err(EvalError::MalformedExpression {
                        reason: format!("numeric literal out of range: {}", literal),
                    });
                }
                Ok(AstNode::Number(value))
            }
            Rule::identifier => Ok(AstNode::Identifier(pair.as_str().to_string())),
            Rule::group => {
                let inner = pair
                    .into_inner()
                    .next()
                    .ok_or_else(|| EvalError::MalformedExpression {
                        reason: "empty parentheses".to_string(),
                    })?;
                Self::build_additive(inner)
            }
            Rule::function_call => Self::build_function_call(pair),
            _ => Err(EvalError::MalformedExpression {
                reason: format!("unexpected rule in primary expression: {:?}", pair.as_rule()),
            }),
        }
    }

    fn build_function_call(pair: Pair<Rule>) -> Result<AstNode, EvalError> {
        let mut inner = pair.into_inner();
        let name = inner
            .next()
            .ok_or_else(|| EvalError::MalformedExpression {
                reason: "expected a function name".to_string(),
            })?
            .as_str()
            .to_string();
        let args = inner
            .map(Self::build_additive)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AstNode::FunctionCall { name, args })
    }
}
