use color_eyre::Result;
use dialoguer::{Input, Password};

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input = input.default(default_value.to_string());
    }

    input
        .interact_text()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Masked input, for the API key
pub fn prompt_secret(prompt: &str) -> Result<String> {
    Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read secret: {}", e))
}

/// Prompt for a positive number, re-asking until the input parses
pub fn prompt_number(prompt: &str, default: usize) -> Result<usize> {
    loop {
        let raw = prompt_string(prompt, Some(&default.to_string()))?;
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => return Ok(n),
            _ => eprintln!("Please enter a whole number greater than zero"),
        }
    }
}
