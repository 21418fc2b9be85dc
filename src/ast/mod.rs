use crate::EvalError;

mod evaluator;
mod parser;

pub use evaluator::Evaluator;
pub use parser::FormulaParser as Parser;

#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Number(f64),
    Identifier(String),
    BinaryOperation {
        left: Box<AstNode>,
        operator: BinaryOperator,
        right: Box<AstNode>,
    },
    UnaryOperation {
        operator: UnaryOperator,
        operand: Box<AstNode>,
    },
    FunctionCall {
        name: String,
        args: Vec<AstNode>,
    },
}

impl AstNode {
    /// Depth of the tree in nodes, computed without recursion so the
    /// measurement itself cannot blow the stack on hostile input.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1usize)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            match node {
                AstNode::BinaryOperation { left, right, .. } => {
                    stack.push((left, depth + 1));
                    stack.push((right, depth + 1));
                }
                AstNode::UnaryOperation { operand, .. } => stack.push((operand, depth + 1)),
                AstNode::FunctionCall { args, .. } => {
                    for arg in args {
                        stack.push((arg, depth + 1));
                    }
                }
                AstNode::Number(_) | AstNode::Identifier(_) => {}
            }
        }

        max_depth
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

impl BinaryOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Power => "**",
        }
    }

    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalError> {
        let result = match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Subtract => left - right,
            BinaryOperator::Multiply => left * right,
            BinaryOperator::Divide => {
                if right == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                left / right
            }
            BinaryOperator::Power => left.powf(right),
        };

        // Finite operands can still overflow (or, for '**', produce NaN);
        // neither may escape as a successful result.
        if result.is_finite() {
            Ok(result)
        } else {
            Err(EvalError::DomainError {
                operation: self.symbol().to_string(),
                value: result,
            })
        }
    }
}

impl TryFrom<&str> for BinaryOperator {
    type Error = EvalError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "+" => Ok(BinaryOperator::Add),
            "-" => Ok(BinaryOperator::Subtract),
            "*" => Ok(BinaryOperator::Multiply),
            "/" => Ok(BinaryOperator::Divide),
            "**" => Ok(BinaryOperator::Power),
            _ => Err(EvalError::MalformedExpression {
                reason: format!("unknown operator: {}", value),
            }),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn apply(&self, operand: f64) -> f64 {
        match self {
            UnaryOperator::Negate => -operand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_apply_arithmetic() {
        assert_eq!(BinaryOperator::Add.apply(2.0, 3.0).unwrap(), 5.0);
        assert_eq!(BinaryOperator::Subtract.apply(2.0, 3.0).unwrap(), -1.0);
        assert_eq!(BinaryOperator::Multiply.apply(2.0, 3.0).unwrap(), 6.0);
        assert_eq!(BinaryOperator::Divide.apply(3.0, 2.0).unwrap(), 1.5);
        assert_eq!(BinaryOperator::Power.apply(2.0, 10.0).unwrap(), 1024.0);
    }

    #[test]
    fn test_operator_divide_by_zero() {
        assert_eq!(
            BinaryOperator::Divide.apply(1.0, 0.0),
            Err(EvalError::DivisionByZero)
        );
    }

    #[test]
    fn test_operator_overflow_is_rejected() {
        let result = BinaryOperator::Multiply.apply(f64::MAX, 2.0);
        assert!(matches!(result, Err(EvalError::DomainError { .. })));

        let result = BinaryOperator::Power.apply(10.0, 400.0);
        assert!(matches!(result, Err(EvalError::DomainError { .. })));
    }

    #[test]
    fn test_power_of_negative_base_with_fractional_exponent() {
        // powf yields NaN here, which must surface as a failure.
        let result = BinaryOperator::Power.apply(-2.0, 0.5);
        assert!(matches!(result, Err(EvalError::DomainError { .. })));
    }

    #[test]
    fn test_operator_from_symbol() {
        assert_eq!(BinaryOperator::try_from("+").unwrap(), BinaryOperator::Add);
        assert_eq!(
            BinaryOperator::try_from("**").unwrap(),
            BinaryOperator::Power
        );
        assert!(BinaryOperator::try_from("%").is_err());
        assert!(BinaryOperator::try_from("^").is_err());
    }

    #[test]
    fn test_symbol_round_trip() {
        for operator in [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Power,
        ] {
            assert_eq!(BinaryOperator::try_from(operator.symbol()), Ok(operator));
        }
    }

    #[test]
    fn test_negate() {
        assert_eq!(UnaryOperator::Negate.apply(3.5), -3.5);
        assert_eq!(UnaryOperator::Negate.apply(-3.5), 3.5);
    }

    #[test]
    fn test_depth_of_leaf() {
        assert_eq!(AstNode::Number(1.0).depth(), 1);
        assert_eq!(AstNode::Identifier("x".to_string()).depth(), 1);
    }

    #[test]
    fn test_depth_of_nested_tree() {
        let tree = AstNode::BinaryOperation {
            left: Box::new(AstNode::Number(1.0)),
            operator: BinaryOperator::Add,
            right: Box::new(AstNode::UnaryOperation {
                operator: UnaryOperator::Negate,
                operand: Box::new(AstNode::FunctionCall {
                    name: "sqrt".to_string(),
                    args: vec![AstNode::Number(4.0)],
                }),
            }),
        };
        assert_eq!(tree.depth(), 4);
    }
}
