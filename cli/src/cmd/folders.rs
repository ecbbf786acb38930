use gallery::gallery::{Gallery, DEFAULT_FOLDER};

use crate::config::Context;

#[derive(clap::Parser)]
pub(crate) struct Command {
    /// Remote folder holding the gallery
    #[clap(long, default_value = DEFAULT_FOLDER)]
    folder: String,
    /// Print the folder options as json
    #[clap(long)]
    json: bool,
}

impl Command {
    pub(crate) async fn execute(self, ctx: &Context) -> anyhow::Result<()> {
        let options = Gallery::new(ctx.client.clone(), ctx.cache())
            .with_cache_key(super::images::cache_key(&self.folder))
            .with_folder(self.folder)
            .folder_options()
            .await;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&options)?);
        } else {
            for option in options {
                println!("{}", option.label);
            }
        }
        Ok(())
    }
}
