use gallery::thumbnail::{extract_filename, Thumbnails};

use crate::config::Context;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// File name, path or url of the thumbnail
    path: String,
}

impl Command {
    pub(crate) async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        let filename = extract_filename(&self.path);
        let url = Thumbnails::new(ctx.client.clone(), ctx.cache())
            .url(filename)
            .await;
        println!("{url}");
        Ok(())
    }
}
