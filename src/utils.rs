use byte_unit::{Byte, UnitType};
use std::io::{self, BufRead, Write};

/// Formats a byte count, either humanized ("1.5 MB") or as raw digits.
pub fn format_size(bytes: u64, humanize: bool) -> String {
    if humanize {
        let adjusted = Byte::from_u64(bytes).get_appropriate_unit(UnitType::Decimal);
        format!("{adjusted:.1}")
    } else {
        bytes.to_string()
    }
}

/// Prompts on stdout and reads a y/n answer from stdin.
pub fn ask_confirmation(message: &str) -> bool {
    print!("{} [y/N]: ", message);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_sizes_are_plain_digits() {
        assert_eq!(format_size(0, false), "0");
        assert_eq!(format_size(123_456, false), "123456");
    }

    #[test]
    fn humanized_sizes_pick_a_unit() {
        assert_eq!(format_size(0, true), "0.0 B");
        assert_eq!(format_size(1_500_000, true), "1.5 MB");
    }
}
