//! Interactive single-shot calculator. Prompts for a formula and its
//! unknowns on stdin, then prints the result or the evaluation error.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use log::debug;

fn prompt(
    lines: &mut io::Lines<io::StdinLock<'static>>,
    text: &str,
) -> io::Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn main() -> io::Result<()> {
    pretty_env_logger::init();

    let mut lines = io::stdin().lock().lines();

    let Some(formula) = prompt(&mut lines, "Enter a formula: ")? else {
        return Ok(());
    };

    let Some(count_text) = prompt(&mut lines, "Enter the number of unknowns: ")? else {
        return Ok(());
    };
    let Ok(count) = count_text.parse::<usize>() else {
        println!("Error: Number of unknowns must be a positive integer");
        return Ok(());
    };

    let mut bindings = HashMap::new();
    for i in 0..count {
        let name_prompt = format!("Enter the name of the unknown {}: ", i + 1);
        let Some(name) = prompt(&mut lines, &name_prompt)? else {
            return Ok(());
        };
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
            println!("Error: Unknown name must contain only letters");
            return Ok(());
        }

        let value_prompt = format!("Enter the value of {}: ", name);
        let Some(value_text) = prompt(&mut lines, &value_prompt)? else {
            return Ok(());
        };
        let Ok(value) = value_text.parse::<f64>() else {
            println!("Error: Unknown value must be a number (e.g., 5, -3, 3.14, -2.5)");
            return Ok(());
        };

        bindings.insert(name, value);
    }

    debug!("evaluating '{}' with {} binding(s)", formula, bindings.len());

    match formulix_rs::evaluate(&formula, &bindings) {
        Ok(result) => println!("{} with {:?} = {}", formula, bindings, result),
        Err(error) => println!("Error: {}", error),
    }

    Ok(())
}
