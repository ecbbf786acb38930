use gallery::account::{evaluate_password_strength, generate_school_email, generate_secure_password};

#[derive(clap::Parser)]
pub(crate) struct EmailCommand {
    /// Full name of the student
    name: String,
    /// Addresses already in use
    #[clap(long = "existing")]
    existing: Vec<String>,
}

impl EmailCommand {
    pub(crate) fn execute(self) -> anyhow::Result<()> {
        let email = generate_school_email(&self.name, &self.existing)?;
        println!("{email}");
        Ok(())
    }
}

#[derive(clap::Parser)]
pub(crate) struct PasswordCommand {
    /// Length of the generated password
    #[clap(long, default_value_t = 12)]
    length: usize,
    /// Rate the given password instead of generating one
    #[clap(long)]
    rate: Option<String>,
}

impl PasswordCommand {
    pub(crate) fn execute(self) -> anyhow::Result<()> {
        let password = match self.rate {
            Some(value) => value,
            None => {
                let value = generate_secure_password(self.length);
                println!("{value}");
                value
            }
        };
        let strength = evaluate_password_strength(&password);
        eprintln!("strength: {} ({}%)", strength.label, strength.percentage);
        Ok(())
    }
}
