use anyhow::bail;
use dialoguer::Input;

use easel_formula::{FormulaOutcome, FormulaSheet};

/// Split `NAME=VALUE`. The value may be empty.
fn parse_assignment(s: &str) -> anyhow::Result<(&str, &str)> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("expected NAME=VALUE, got '{s}'"),
    }
}

fn show(sheet: &FormulaSheet) {
    for (binding, outcome) in sheet.formulas() {
        println!("{} => {outcome}", binding.expression());
    }
}

pub fn run(expression: &str, inputs: &[String], interactive: bool) -> anyhow::Result<()> {
    let mut sheet = FormulaSheet::new();
    for input in inputs {
        let (name, value) = parse_assignment(input)?;
        sheet.add_field(name, value);
    }
    let index = sheet.add_formula(expression);
    show(&sheet);

    if !interactive {
        if let Some(FormulaOutcome::Invalid(e)) = sheet.outcome(index) {
            tracing::debug!(error = %e, "Formula rejected");
        }
        return Ok(());
    }

    loop {
        let line: String = match Input::new()
            .with_prompt("NAME=VALUE")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim();
        if line.is_empty() || line == "quit" {
            break;
        }
        match parse_assignment(line) {
            Ok((name, value)) => {
                if sheet.input(name, value) > 0 {
                    show(&sheet);
                } else {
                    println!("{name} is not used by the formula");
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}
