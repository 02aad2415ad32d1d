use crate::core::render::render_category;
use crate::domain::model::{Category, DisplaySettings};
use crate::domain::ports::Terminal;
use crate::utils::error::{InvalidInputKind, OfferError, Result};

/// Parses a whole input line as a number within `[min, max]`.
///
/// Surrounding whitespace is ignored, anything else that is not a base-10
/// integer (including `"2x"`) is `NotNumeric`.
pub fn parse_choice(input: &str, min: usize, max: usize) -> Result<usize> {
    let trimmed = input.trim();
    let value: usize = trimmed.parse().map_err(|_| OfferError::InvalidInput {
        kind: InvalidInputKind::NotNumeric,
        input: trimmed.to_string(),
    })?;

    if value < min || value > max {
        return Err(OfferError::InvalidInput {
            kind: InvalidInputKind::OutOfBounds,
            input: trimmed.to_string(),
        });
    }

    Ok(value)
}

/// Empty line selects `default`; `y`/`yes` and `n`/`no` in any case.
pub fn parse_yes_no(input: &str, default: bool) -> Result<bool> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(OfferError::InvalidInput {
            kind: InvalidInputKind::Unrecognized,
            input: trimmed.to_string(),
        }),
    }
}

pub fn wait_for_enter<T: Terminal>(term: &mut T) -> Result<()> {
    term.write_str("Press [ENTER] to continue.")?;
    term.read_line()?.ok_or(OfferError::InputClosed)?;
    Ok(())
}

fn retry_message(err: &OfferError, min: usize, max: usize) -> String {
    match err {
        OfferError::InvalidInput {
            kind: InvalidInputKind::NotNumeric,
            input,
        } => format!("\nThe input '{}' is not a numeric value. ", input),
        OfferError::InvalidInput {
            kind: InvalidInputKind::OutOfBounds,
            input,
        } => format!(
            "\nThe input '{}' is out of bounds. Please choose a number between {} and {}. ",
            input, min, max
        ),
        _ => "\nProvided unrecognized input. Please try again. ".to_string(),
    }
}

/// Runs `present`, reads a line and retries until it is a number in `[min, max]`.
///
/// Invalid input never leaves this loop; a closed input stream ends it with
/// `OfferError::InputClosed`.
pub fn prompt_choice<T, F>(term: &mut T, min: usize, max: usize, mut present: F) -> Result<usize>
where
    T: Terminal,
    F: FnMut(&mut T) -> Result<()>,
{
    loop {
        present(term)?;
        let line = term.read_line()?.ok_or(OfferError::InputClosed)?;

        match parse_choice(&line, min, max) {
            Ok(choice) => return Ok(choice),
            Err(err) if err.is_recoverable() => {
                tracing::debug!("Rejected choice: {}", err);
                term.write_str(&retry_message(&err, min, max))?;
                wait_for_enter(term)?;
            }
            Err(err) => return Err(err),
        }
    }
}

pub fn prompt_yes_no<T: Terminal>(term: &mut T, question: &str, default: bool) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    loop {
        term.write_str(&format!("{}\n\nChoice ({}): ", question, hint))?;
        let line = term.read_line()?.ok_or(OfferError::InputClosed)?;

        match parse_yes_no(&line, default) {
            Ok(answer) => return Ok(answer),
            Err(err) if err.is_recoverable() => {
                tracing::debug!("Rejected yes/no answer: {}", err);
                term.write_str(&retry_message(&err, 0, 0))?;
                wait_for_enter(term)?;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Presents categories and returns the operator's option index.
pub struct SelectionEngine<'a> {
    display: &'a DisplaySettings,
}

impl<'a> SelectionEngine<'a> {
    pub fn new(display: &'a DisplaySettings) -> Self {
        Self { display }
    }

    /// Returns an index in `[0, category.options.len() - 1]`.
    pub fn choose<T: Terminal>(&self, term: &mut T, category: &Category) -> Result<usize> {
        let (min, max) = category.bounds().ok_or_else(|| OfferError::EmptyCategory {
            name: category.name.clone(),
        })?;

        let listing = render_category(category, self.display);
        let choice = prompt_choice(term, min, max, |term| {
            term.clear_screen()?;
            term.write_str("Please choose an option from the following category:\n")?;
            term.write_str(&listing)?;
            term.write_str(&format!("Input ({}-{}): ", min, max))
        })?;

        tracing::debug!(
            "Chose '{}' from category '{}'",
            category.options[choice].name,
            category.name
        );
        Ok(choice)
    }
}
