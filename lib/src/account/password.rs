use rand::seq::SliceRandom;
use rand::Rng;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generates a random password containing at least one uppercase letter, one lowercase letter,
/// one digit and one symbol. Lengths below 4 are raised to 4.
pub fn generate_secure_password(length: usize) -> String {
    let mut rng = rand::thread_rng();
    let all: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS].concat();
    let mut result: Vec<u8> = [UPPERCASE, LOWERCASE, DIGITS, SYMBOLS]
        .iter()
        .map(|set| set[rng.gen_range(0..set.len())])
        .collect();
    while result.len() < length {
        result.push(all[rng.gen_range(0..all.len())]);
    }
    result.shuffle(&mut rng);
    result.into_iter().map(char::from).collect()
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize)]
pub struct PasswordStrength {
    /// From 0 (very weak) to 4 (very strong)
    pub score: u8,
    pub label: &'static str,
    pub percentage: u8,
}

/// Rates a password from its length and the kinds of characters it contains
pub fn evaluate_password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "Enter password",
            percentage: 0,
        };
    }
    let length = password.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let points = checks.iter().filter(|passed| **passed).count();
    // two thirds of a level per passed check
    let score = ((points * 2) / 3).min(4) as u8;
    let label = match score {
        0 => "Very Weak",
        1 => "Weak",
        2 => "Medium",
        3 => "Strong",
        _ => "Very Strong",
    };
    PasswordStrength {
        score,
        label,
        percentage: (score + 1) * 20,
    }
}
