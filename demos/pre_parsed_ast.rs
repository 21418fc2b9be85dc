use formulix_rs::{Evaluator, Parser};
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let expression = "pow(mod(x, 10) + floor(y), 2)";
    let ast = Parser::parse_expression(expression).expect("Failed to parse");

    let bindings: HashMap<String, f64> = [("x".to_string(), 27.0), ("y".to_string(), 3.7)]
        .iter()
        .cloned()
        .collect();

    match Evaluator::new().evaluate(&ast, &bindings) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
