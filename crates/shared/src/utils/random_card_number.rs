use rand::{Rng, rng};
use regex::Regex;

/// Draws a fresh 16-digit card number. `rand::rng()` is a CSPRNG, so the
/// numbers are not predictable from previous draws.
pub fn random_card_number() -> Result<String, Box<dyn std::error::Error>> {
    let mut rng = rng();

    let random_digits: String = (0..15)
        .map(|_| rng.random_range(0..10).to_string())
        .collect();

    let candidate = format!("4{random_digits}");

    let re = Regex::new(r"^\d{16}$")?;
    if re.is_match(&candidate) {
        Ok(candidate)
    } else {
        Err("Generated number is invalid".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_sixteen_digits() {
        let number = random_card_number().unwrap();
        assert_eq!(number.len(), 16);
        assert!(number.chars().all(|c| c.is_ascii_digit()));
        assert!(number.starts_with('4'));
    }

    #[test]
    fn consecutive_draws_differ() {
        let first = random_card_number().unwrap();
        let second = random_card_number().unwrap();
        assert_ne!(first, second);
    }
}
