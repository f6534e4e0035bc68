use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Ask the operator to type `yes`. Anything else, including end of input, declines.
pub fn confirm(message: &str, assume_yes: bool) -> Result<bool> {
  if assume_yes {
    return Ok(true);
  }

  let stdin = io::stdin();
  confirm_with(message, &mut stdin.lock(), &mut io::stderr())
}

pub fn confirm_with<R: BufRead, W: Write>(message: &str, input: &mut R, output: &mut W) -> Result<bool> {
  write!(output, "{} Type 'yes' to continue: ", message)?;
  output.flush()?;

  let mut answer = String::new();
  if input.read_line(&mut answer)? == 0 {
    writeln!(output)?;
    return Ok(false);
  }

  Ok(answer.trim().eq_ignore_ascii_case("yes"))
}
