use formulix_rs::evaluate;
use std::collections::HashMap;

fn main() {
    pretty_env_logger::init();

    let binding_sets = vec![
        HashMap::from([("price".to_string(), 120.0), ("volume".to_string(), 3000.0)]),
        HashMap::from([("price".to_string(), 80.0), ("volume".to_string(), 6000.0)]),
    ];

    let expression = "sqrt(price) + (price * volume) / 2";

    for (i, bindings) in binding_sets.iter().enumerate() {
        let result = evaluate(expression, bindings).unwrap();
        println!("Result {}: {}", i, result);
    }
}
