use gallery::quote::Quotes;

use crate::config::Context;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Pick another quote, replacing the quote of the day
    #[clap(long)]
    random: bool,
}

impl Command {
    pub(crate) async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        let today = chrono::Utc::now().date_naive();
        let quotes = Quotes::new(ctx.client.clone(), ctx.cache());
        let quote = if self.random {
            quotes.random_quote(today).await
        } else {
            quotes.quote_of_the_day(today).await
        };
        println!("{}", serde_json::to_string_pretty(&quote)?);
        Ok(())
    }
}
