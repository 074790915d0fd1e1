use std::io::{self, BufRead, Write};

pub const SAVE_PROMPT: &str = "¿Guardar datos en CSV? (s/n): ";

/// Ask whether to save the capture. Only `s` (any case) means yes.
pub fn confirm_save<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "\n{}", SAVE_PROMPT)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_save_answer(&answer))
}

fn is_save_answer(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_s_confirms() {
        assert!(is_save_answer("s\n"));
        assert!(is_save_answer(" S \r\n"));
        assert!(!is_save_answer("si\n"));
        assert!(!is_save_answer("n\n"));
        assert!(!is_save_answer(""));
    }

    #[test]
    fn prompt_is_written_before_reading() {
        let mut input = "s\n".as_bytes();
        let mut out = Vec::new();
        assert!(confirm_save(&mut input, &mut out).unwrap());
        assert!(String::from_utf8(out).unwrap().ends_with(SAVE_PROMPT));
    }

    #[test]
    fn closed_stdin_means_no() {
        let mut input = "".as_bytes();
        let mut out = Vec::new();
        assert!(!confirm_save(&mut input, &mut out).unwrap());
    }
}
