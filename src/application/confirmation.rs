use std::io::{self, BufRead, Write};

/// Asks `question` on stdout and reads the answer from stdin.
pub fn confirm(question: &str) -> io::Result<bool> {
    confirm_with(&mut io::stdin().lock(), &mut io::stdout(), question)
}

/// Only `y` or `yes` (any case) count as consent; anything else, including
/// end of input, declines.
pub fn confirm_with(
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    question: &str,
) -> io::Result<bool> {
    write!(writer, "{} [y/N]: ", question)?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();

    Ok(answer == "y" || answer == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    #[case("y\n", true)]
    #[case("YES\n", true)]
    #[case("  yes  \n", true)]
    #[case("n\n", false)]
    #[case("\n", false)]
    #[case("", false)]
    #[case("yep\n", false)]
    fn test_confirm_answers(#[case] input: &str, #[case] expected: bool) {
        let mut reader = Cursor::new(input.as_bytes());
        let mut prompt = Vec::new();

        let answer = confirm_with(&mut reader, &mut prompt, "Proceed?").unwrap();

        assert_eq!(answer, expected);
        assert_eq!(String::from_utf8(prompt).unwrap(), "Proceed? [y/N]: ");
    }
}
