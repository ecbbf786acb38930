use rand::Rng;

use crate::Error;

/// Domain of every school email address
pub const SCHOOL_DOMAIN: &str = "glorious.com";

const MAX_RANDOM_ATTEMPTS: usize = 10;

fn base_name(full_name: &str) -> String {
    let lower = full_name.to_lowercase();
    let parts: Vec<&str> = lower.split_whitespace().collect();
    let base = match parts.as_slice() {
        [] => String::new(),
        [single] => single.to_string(),
        [first, .., last] => format!("{first}{last}"),
    };
    base.chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Generates a school email address from a full name.
///
/// Uses the first and last names. When the address is already taken, a random three digit
/// number is appended, falling back to the current time in milliseconds after ten attempts.
///
/// ```
/// use gallery::account::generate_school_email;
///
/// let email = generate_school_email::<&str>("John  Doe", &[]).unwrap();
/// assert_eq!(email, "johndoe@glorious.com");
/// ```
pub fn generate_school_email<S: AsRef<str>>(full_name: &str, existing: &[S]) -> Result<String, Error> {
    let base = base_name(full_name);
    if base.is_empty() {
        return Err(Error::InvalidName);
    }
    let taken = |email: &str| existing.iter().any(|item| item.as_ref() == email);

    let email = format!("{base}@{SCHOOL_DOMAIN}");
    if !taken(&email) {
        return Ok(email);
    }
    let mut rng = rand::thread_rng();
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let number: u16 = rng.gen_range(100..=999);
        let email = format!("{base}{number}@{SCHOOL_DOMAIN}");
        if !taken(&email) {
            return Ok(email);
        }
    }
    tracing::debug!("no free random suffix for {base:?}, using timestamp");
    Ok(format!(
        "{base}{}@{SCHOOL_DOMAIN}",
        chrono::Utc::now().timestamp_millis()
    ))
}

/// Body of the email sending their credentials to a new student
pub fn credential_email(student_name: &str, school_email: &str, password: &str) -> String {
    format!(
        "Dear {student_name},

Welcome to Glorious Schools! Your account has been successfully created.

Here are your login credentials for the School Management System:

School Email: {school_email}
Password: {password}

Please keep these credentials secure and do not share them with anyone.

To access the portal:
1. Visit the school portal at https://glorious.school/login
2. Enter your school email and password
3. Complete your profile setup upon first login

For security reasons, we recommend changing your password after your first login.

If you have any questions or need assistance, please contact our IT support team at support@{SCHOOL_DOMAIN}

Best regards,
Glorious Schools Administration"
    )
}
