//! The closed table of operations reachable from a formula. Everything the
//! evaluator can call by name lives here; there is no way to register more
//! at runtime.

use crate::EvalError;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A whitelisted pure numeric function.
pub struct Function {
    pub name: &'static str,
    pub arity: usize,
    pub apply: fn(&[f64]) -> Result<f64, EvalError>,
}

static FUNCTIONS: &[Function] = &[
    Function { name: "sqrt", arity: 1, apply: sqrt },
    Function { name: "sin", arity: 1, apply: sin },
    Function { name: "cos", arity: 1, apply: cos },
    Function { name: "tan", arity: 1, apply: tan },
    Function { name: "log", arity: 1, apply: log },
    Function { name: "abs", arity: 1, apply: abs },
    Function { name: "floor", arity: 1, apply: floor },
    Function { name: "ceil", arity: 1, apply: ceil },
    Function { name: "factorial", arity: 1, apply: factorial },
    Function { name: "mod", arity: 2, apply: modulo },
    Function { name: "pow", arity: 2, apply: pow },
];

static FUNCTION_INDEX: LazyLock<HashMap<&'static str, &'static Function>> =
    LazyLock::new(|| FUNCTIONS.iter().map(|f| (f.name, f)).collect());

static CONSTANTS: &[(&str, f64)] = &[("PI", std::f64::consts::PI)];

/// Looks up a whitelisted function by name.
pub fn lookup(name: &str) -> Option<&'static Function> {
    FUNCTION_INDEX.get(name).copied()
}

/// Looks up a whitelisted named constant.
pub fn constant(name: &str) -> Option<f64> {
    CONSTANTS
        .iter()
        .find(|(constant_name, _)| *constant_name == name)
        .map(|(_, value)| *value)
}

/// True if the name belongs to a registered function or constant and may
/// therefore not be used as a variable name.
pub fn is_reserved(name: &str) -> bool {
    lookup(name).is_some() || constant(name).is_some()
}

fn sqrt(args: &[f64]) -> Result<f64, EvalError> {
    let x = args[0];
    if x < 0.0 {
        return Err(EvalError::DomainError {
            operation: "sqrt".to_string(),
            value: x,
        });
    }
    Ok(x.sqrt())
}

fn sin(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].sin())
}

fn cos(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].cos())
}

fn tan(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].tan())
}

/// Natural logarithm.
fn log(args: &[f64]) -> Result<f64, EvalError> {
    let x = args[0];
    if x <= 0.0 {
        return Err(EvalError::DomainError {
            operation: "log".to_string(),
            value: x,
        });
    }
    Ok(x.ln())
}

fn abs(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].abs())
}

fn floor(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].floor())
}

fn ceil(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].ceil())
}

/// Defined for non-negative integral arguments. 170! is the largest value
/// representable as an f64, so anything above that is out of domain too.
fn factorial(args: &[f64]) -> Result<f64, EvalError> {
    let x = args[0];
    if x < 0.0 || x.fract() != 0.0 || x > 170.0 {
        return Err(EvalError::DomainError {
            operation: "factorial".to_string(),
            value: x,
        });
    }

    let n = x as u64;
    Ok((2..=n).fold(1.0_f64, |acc, k| acc * k as f64))
}

/// Floating-point remainder, keeping the sign of the dividend.
fn modulo(args: &[f64]) -> Result<f64, EvalError> {
    if args[1] == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(args[0] % args[1])
}

fn pow(args: &[f64]) -> Result<f64, EvalError> {
    let result = args[0].powf(args[1]);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(EvalError::DomainError {
            operation: "pow".to_string(),
            value: result,
        })
    }
}
