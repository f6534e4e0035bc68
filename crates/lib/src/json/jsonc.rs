//! Reduce JSON-with-comments to plain JSON.
//!
//! `tsc --init` writes `tsconfig.json` with line comments, block comments and
//! (depending on the compiler version) trailing commas, none of which
//! `serde_json` accepts.

/// Strip `//` and `/* */` comments and trailing commas outside of strings.
///
/// Newlines inside removed comments are kept so parse errors still point at
/// the right line.
pub fn strip_jsonc(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  let mut chars = input.chars().peekable();
  let mut in_string = false;

  while let Some(c) = chars.next() {
    if in_string {
      out.push(c);
      match c {
        '\\' => {
          if let Some(escaped) = chars.next() {
            out.push(escaped);
          }
        }
        '"' => in_string = false,
        _ => {}
      }
      continue;
    }

    match c {
      '"' => {
        in_string = true;
        out.push(c);
      }
      '/' if chars.peek() == Some(&'/') => {
        for next in chars.by_ref() {
          if next == '\n' {
            out.push('\n');
            break;
          }
        }
      }
      '/' if chars.peek() == Some(&'*') => {
        chars.next();
        let mut prev = '\0';
        for next in chars.by_ref() {
          if next == '\n' {
            out.push('\n');
          }
          if prev == '*' && next == '/' {
            break;
          }
          prev = next;
        }
      }
      '}' | ']' => {
        drop_trailing_comma(&mut out);
        out.push(c);
      }
      _ => out.push(c),
    }
  }

  out
}

/// Remove a comma directly before a closing bracket, but only when a value
/// precedes it. `[,]` and `{,}` stay invalid.
fn drop_trailing_comma(out: &mut String) {
  let end = out.trim_end().len();
  if !out[..end].ends_with(',') {
    return;
  }
  let before = out[..end - 1].trim_end();
  if before.is_empty() || before.ends_with(['[', '{', ',']) {
    return;
  }
  out.remove(end - 1);
}
